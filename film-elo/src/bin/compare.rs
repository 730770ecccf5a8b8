use film_elo::bootstrap::{DEFAULT_OPPONENT_PRIOR, Seeding};
use film_elo::data_processing::get_scenarios_by_name;
use film_elo::error::Result;
use film_elo::experiment_config::{Experiment, ExperimentConfig};
use film_elo::summary::print_report;
use film_elo::systems::get_rating_system_by_name;

fn get_experiment_from_args(args: &[String]) -> Result<Experiment> {
    if args[1] == "file:" {
        let config = ExperimentConfig::from_file(&args[2])?;
        Experiment::from_config(config)
    } else {
        let reference: Seeding = args[1].parse()?;
        let candidate: Seeding = args[2].parse()?;
        let scenarios = get_scenarios_by_name(&args[3])?;

        Ok(Experiment {
            system: get_rating_system_by_name("wildcard")?,
            reference,
            candidate,
            scenarios,
            opponent_prior: DEFAULT_OPPONENT_PRIOR,
            save_summary: None,
        })
    }
}

/// Rates every scenario under two seedings and reports how far apart they land
fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let valid = matches!(args.len(), 3 if args[1] == "file:") || args.len() == 4;
    if !valid {
        tracing::error!(
            "Usage: {} reference_seeding candidate_seeding scenario_set\n   or: {} file: experiment_file",
            args[0],
            args[0]
        );
        return;
    }

    let results = match get_experiment_from_args(&args).and_then(|ex| {
        tracing::info!("Comparing {} against {}", ex.reference, ex.candidate);
        ex.eval()
    }) {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    };

    for rated in &results.rated {
        tracing::info!(
            "{:>24} {:>8}: {:?} vs {:?}",
            rated.scenario.name,
            rated.scenario.emotion.to_string(),
            rated.reference.progression(),
            rated.candidate.progression()
        );
    }
    print_report(&results.report);
    tracing::info!("Finished in {} seconds.", results.secs_elapsed);
}
