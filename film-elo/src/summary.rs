use crate::bootstrap::Emotion;
use crate::data_processing::try_write_slice_to_file;
use crate::error::Result;
use crate::experiment_config::{ExperimentResults, RatedScenario};
use crate::metrics::{Agreement, ComparisonReport};
use crate::systems::Film;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One output row per scenario.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub name: String,
    pub emotion: Emotion,
    pub results: String,
    pub reference_rating: f64,
    pub candidate_rating: f64,
    pub difference: f64,
    pub agreement: Agreement,
    pub reference_progression: String,
    pub candidate_progression: String,
    pub major_upsets: usize,
}

fn progression(film: &Film) -> String {
    film.event_history
        .iter()
        .map(|event| format!("{:.1}", event.rating_after))
        .join(" > ")
}

impl ScenarioSummary {
    pub fn new(rated: &RatedScenario) -> Self {
        let difference = rated.difference();
        Self {
            name: rated.scenario.name.clone(),
            emotion: rated.scenario.emotion,
            results: rated.scenario.results.iter().join(" "),
            reference_rating: rated.reference.rating,
            candidate_rating: rated.candidate.rating,
            // Keep the csv free of float noise like 0.09999999999999964
            difference: (difference * 100.).round() / 100.,
            agreement: Agreement::classify(difference),
            reference_progression: progression(&rated.reference),
            candidate_progression: progression(&rated.candidate),
            major_upsets: rated
                .reference
                .event_history
                .iter()
                .chain(&rated.candidate.event_history)
                .filter(|event| event.major_upset)
                .count(),
        }
    }
}

pub fn make_summary(results: &ExperimentResults) -> Vec<ScenarioSummary> {
    results.rated.iter().map(ScenarioSummary::new).collect()
}

pub fn write_summary(results: &ExperimentResults, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    try_write_slice_to_file(&make_summary(results), path)?;
    tracing::info!("Successfully wrote summary to {:?}", path);
    Ok(())
}

pub fn print_report(report: &ComparisonReport) {
    tracing::info!("{}", report);
    for (emotion, stats) in &report.by_emotion {
        tracing::info!(
            "{:>8} x{:3} mean diff {:.3} max diff {:.3}",
            emotion.to_string(),
            stats.count,
            stats.mean().unwrap_or(0.),
            stats.max().unwrap_or(0.)
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bootstrap::{DEFAULT_OPPONENT_PRIOR, Seeding};
    use crate::data_processing::showdown;
    use crate::systems::WildcardElo;

    #[test]
    fn test_summary_row() {
        let system = WildcardElo::default();
        let scenario = showdown().remove(0);
        let rated = RatedScenario {
            reference: scenario
                .rate(&system, Seeding::EmotionBaseline, DEFAULT_OPPONENT_PRIOR)
                .unwrap(),
            candidate: scenario
                .rate(&system, Seeding::OpponentOffset, DEFAULT_OPPONENT_PRIOR)
                .unwrap(),
            scenario,
        };
        let row = ScenarioSummary::new(&rated);

        assert_eq!(row.results, "WIN WIN WIN");
        assert_eq!(row.reference_progression, "8.6 > 8.7 > 8.9");
        assert_eq!(row.candidate_progression, "6.5 > 6.8 > 7.2");
        assert_eq!(row.difference, 1.7);
        assert_eq!(row.agreement, Agreement::Significant);
        assert_eq!(row.major_upsets, 0);
    }
}
