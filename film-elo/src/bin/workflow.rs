use film_elo::bootstrap::{
    DEFAULT_OPPONENT_PRIOR, Emotion, Seeding, emotion_mismatch, performance_rating,
    rate_new_film,
};
use film_elo::data_processing::{LibraryFilm, read_library, sample_library, write_slice_to_file};
use film_elo::error::{RatingError, Result};
use film_elo::opponents::select_opponents;
use film_elo::systems::{Film, Outcome, WildcardElo};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Args {
    emotion: Emotion,
    outcomes: Vec<Outcome>,
    seed: u64,
    library: Option<String>,
    history: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let emotion: Emotion = args[1].parse()?;
    let mut outcomes: Vec<Outcome> = vec![];
    let mut seed = 0;
    let mut library = None;
    let mut history = None;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--seed" => {
                seed = rest
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| RatingError::InvalidArgument("--seed needs a number".into()))?;
            }
            "--library" => {
                library = Some(rest.next().cloned().ok_or_else(|| {
                    RatingError::InvalidArgument("--library needs a file".into())
                })?);
            }
            "--history" => {
                history = Some(rest.next().cloned().ok_or_else(|| {
                    RatingError::InvalidArgument("--history needs a file".into())
                })?);
            }
            outcome => outcomes.push(outcome.parse()?),
        }
    }
    if outcomes.is_empty() {
        return Err(RatingError::InvalidArgument("no outcomes given".into()));
    }

    Ok(Args {
        emotion,
        outcomes,
        seed,
        library,
        history,
    })
}

fn run(args: Args) -> Result<Film> {
    let library = match &args.library {
        Some(path) => read_library(path)?,
        None => sample_library(),
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let opponents: Vec<LibraryFilm> =
        select_opponents(args.emotion, &library, args.outcomes.len(), &mut rng);
    if opponents.len() < args.outcomes.len() {
        return Err(RatingError::InvalidArgument(format!(
            "{} outcomes but only {} opponents available",
            args.outcomes.len(),
            opponents.len()
        )));
    }

    let ratings: Vec<f64> = opponents.iter().map(|film| film.rating).collect();
    let system = WildcardElo::default();
    let film = rate_new_film(
        &system,
        Seeding::OpponentOffset,
        args.emotion,
        &ratings,
        &args.outcomes,
        DEFAULT_OPPONENT_PRIOR,
    )?;

    for (event, opponent) in film.event_history.iter().zip(&opponents) {
        tracing::info!(
            "Round {}: {} vs {} ({:.1}) => {:.1} ({})",
            event.round + 1,
            event.outcome,
            opponent.title,
            opponent.rating,
            event.rating_after,
            event
                .change()
                .map_or("first rating".to_string(), |change| format!("{:+.1}", change))
        );
    }
    if let Some(path) = &args.history {
        write_slice_to_file(&film.event_history, path);
    }

    let wins = args.outcomes.iter().filter(|&&o| o == Outcome::Win).count();
    if let Some(estimate) = performance_rating(&ratings, wins, None) {
        tracing::info!("Performance estimate: {:.2}", estimate);
    }
    if emotion_mismatch(args.emotion, film.rating) {
        tracing::warn!(
            "A {} film ended at {:.1}; the first impression may be off",
            args.emotion,
            film.rating
        );
    }
    Ok(film)
}

/// Rates a new film against opponents drawn from a library, without an emotion baseline
fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        tracing::error!(
            "Usage: {} EMOTION outcome... [--seed N] [--library file.csv] [--history file.csv]",
            args[0]
        );
        return;
    }

    match parse_args(&args).and_then(run) {
        Ok(film) => println!("{:.1}", film.rating),
        Err(e) => tracing::error!("{}", e),
    }
}
