use crate::bootstrap::{DEFAULT_OPPONENT_PRIOR, Seeding, emotion_mismatch, performance_rating};
use crate::data_processing::{Scenario, get_scenarios_by_name, read_json};
use crate::error::Result;
use crate::metrics::{Agreement, ComparisonReport};
use crate::systems::{Film, RatingSystem, WildcardElo};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum SystemParams {
    // Fields left out of the file keep their default values
    Wildcard(WildcardElo),
}

impl Default for SystemParams {
    fn default() -> Self {
        Self::Wildcard(WildcardElo::default())
    }
}

fn default_opponent_prior() -> usize {
    DEFAULT_OPPONENT_PRIOR
}

#[derive(Deserialize, Debug)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub system: SystemParams,
    pub reference: Seeding,
    pub candidate: Seeding,
    pub scenario_source: String,
    #[serde(default = "default_opponent_prior")]
    pub opponent_prior: usize,
    pub save_summary: Option<String>,
}

impl ExperimentConfig {
    pub fn from_file(source: impl AsRef<Path>) -> Result<Self> {
        // json5 rather than serde_json, so experiment files may carry comments
        read_json(source)
    }
}

#[derive(Debug)]
pub struct Experiment {
    pub system: Box<dyn RatingSystem + Send>,
    pub reference: Seeding,
    pub candidate: Seeding,
    pub scenarios: Vec<Scenario>,
    pub opponent_prior: usize,
    pub save_summary: Option<String>,
}

impl Experiment {
    pub fn from_config(config: ExperimentConfig) -> Result<Self> {
        tracing::info!("Loading experiment:\n{:?}", config);
        let scenarios = get_scenarios_by_name(&config.scenario_source)?;
        let system: Box<dyn RatingSystem + Send> = match config.system {
            SystemParams::Wildcard(params) => Box::new(params),
        };

        Ok(Self {
            system,
            reference: config.reference,
            candidate: config.candidate,
            scenarios,
            opponent_prior: config.opponent_prior,
            save_summary: config.save_summary,
        })
    }

    pub fn eval(&self) -> Result<ExperimentResults> {
        let now = std::time::Instant::now();
        let mut rated = Vec::with_capacity(self.scenarios.len());

        for (index, scenario) in self.scenarios.iter().enumerate() {
            let reference = scenario.rate(&*self.system, self.reference, self.opponent_prior)?;
            let candidate = scenario.rate(&*self.system, self.candidate, self.opponent_prior)?;
            let difference = (reference.rating - candidate.rating).abs();

            tracing::debug!(
                "Scenario {:3}: {} ({}) {:?} vs {:?}, performance {:?}",
                index,
                scenario.name,
                scenario.emotion,
                reference.progression(),
                candidate.progression(),
                performance_rating(&scenario.opponents, scenario.num_wins(), None)
            );
            if Agreement::classify(difference) == Agreement::Significant {
                tracing::warn!(
                    "{}: {} gives {:.1} but {} gives {:.1}",
                    scenario.name,
                    self.reference,
                    reference.rating,
                    self.candidate,
                    candidate.rating
                );
            }
            for (seeding, film) in [(self.reference, &reference), (self.candidate, &candidate)] {
                if emotion_mismatch(scenario.emotion, film.rating) {
                    tracing::warn!(
                        "{}: {} film ends at {:.1} under {}",
                        scenario.name,
                        scenario.emotion,
                        film.rating,
                        seeding
                    );
                }
            }

            rated.push(RatedScenario {
                scenario: scenario.clone(),
                reference,
                candidate,
            });
        }

        let differences: Vec<_> = rated
            .iter()
            .map(|r| (r.scenario.emotion, r.difference()))
            .collect();
        let report = ComparisonReport::from_differences(&differences);
        let secs_elapsed = now.elapsed().as_nanos() as f64 * 1e-9;

        let results = ExperimentResults {
            rated,
            report,
            secs_elapsed,
        };
        if let Some(filename) = &self.save_summary {
            // A failed write still leaves the results usable
            if let Err(e) = crate::summary::write_summary(&results, filename) {
                tracing::error!("WARNING: failed write to {:?} because {}", filename, e);
            }
        }
        Ok(results)
    }
}

/// One scenario, rated under both seedings.
pub struct RatedScenario {
    pub scenario: Scenario,
    pub reference: Film,
    pub candidate: Film,
}

impl RatedScenario {
    pub fn difference(&self) -> f64 {
        (self.reference.rating - self.candidate.rating).abs()
    }
}

pub struct ExperimentResults {
    pub rated: Vec<RatedScenario>,
    pub report: ComparisonReport,
    pub secs_elapsed: f64,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metrics::Verdict;
    use claims::{assert_err, assert_ok};

    #[test]
    fn test_config_defaults() {
        let text = r#"{
            reference: "emotion-baseline",
            candidate: "opponent-offset",
            scenario_source: "showdown",
        }"#;
        let config: ExperimentConfig = json5::from_str(text).unwrap();
        assert_eq!(config.opponent_prior, 5);
        assert!(config.save_summary.is_none());
        let SystemParams::Wildcard(params) = config.system;
        assert_eq!(params, WildcardElo::default());
    }

    #[test]
    fn test_config_overrides_system_params() {
        let text = r#"{
            system: { method: "wildcard", max_change: 1.0, major_upset_bonus: 2.0 },
            reference: "emotion-baseline",
            candidate: "emotion-baseline",
            scenario_source: "mega",
            opponent_prior: 20,
        }"#;
        let config: ExperimentConfig = json5::from_str(text).unwrap();
        let SystemParams::Wildcard(params) = &config.system;
        assert_eq!(params.max_change, 1.0);
        assert_eq!(params.major_upset_bonus, 2.0);
        assert_eq!(params.min_change, 0.1);

        // A seeding compared with itself always agrees
        let ex = assert_ok!(Experiment::from_config(config));
        let results = assert_ok!(ex.eval());
        assert_eq!(results.report.count(Agreement::Identical), 10);
        assert_eq!(results.report.verdict(), Verdict::Excellent);
    }

    #[test]
    fn test_unknown_scenario_source() {
        let config = ExperimentConfig {
            system: SystemParams::default(),
            reference: Seeding::EmotionBaseline,
            candidate: Seeding::OpponentOffset,
            scenario_source: "no/such/file.json".to_string(),
            opponent_prior: DEFAULT_OPPONENT_PRIOR,
            save_summary: None,
        };
        assert_err!(Experiment::from_config(config));
    }

    #[test]
    fn test_failed_summary_write_keeps_results() {
        let config = ExperimentConfig {
            system: SystemParams::default(),
            reference: Seeding::EmotionBaseline,
            candidate: Seeding::OpponentOffset,
            scenario_source: "showdown".to_string(),
            opponent_prior: DEFAULT_OPPONENT_PRIOR,
            save_summary: Some("showdown_summary.txt".to_string()),
        };
        let ex = assert_ok!(Experiment::from_config(config));
        assert!(format!("{:?}", ex).contains("WildcardElo"));

        let results = assert_ok!(ex.eval());
        assert_eq!(results.rated.len(), 5);
        assert!(!std::path::Path::new("showdown_summary.txt").exists());
    }
}
