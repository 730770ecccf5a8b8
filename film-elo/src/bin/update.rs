use film_elo::error::{RatingError, Result, check_rating};
use film_elo::systems::{RatingSystem, WildcardElo};

fn parse_prior(arg: Option<&String>) -> Result<usize> {
    match arg {
        None => Ok(0),
        Some(s) => s.parse().map_err(|_| {
            RatingError::InvalidArgument(format!("{:?} is not a comparison count", s))
        }),
    }
}

fn parse_rating(arg: &str) -> Result<f64> {
    let rating: f64 = arg
        .parse()
        .map_err(|_| RatingError::InvalidArgument(format!("{:?} is not a rating", arg)))?;
    check_rating(rating)
}

fn parse_args(args: &[String]) -> Result<(f64, f64, usize, usize)> {
    Ok((
        parse_rating(&args[1])?,
        parse_rating(&args[2])?,
        parse_prior(args.get(3))?,
        parse_prior(args.get(4))?,
    ))
}

/// Applies a single comparison and prints both new ratings
fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if !(3..=5).contains(&args.len()) {
        tracing::error!(
            "Usage: {} winner_rating loser_rating [winner_prior] [loser_prior]",
            args[0]
        );
        return;
    }

    let (winner, loser, winner_prior, loser_prior) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    };

    let system = WildcardElo::default();
    let (new_winner, new_loser) = system.update(winner, loser, winner_prior, loser_prior);
    if system.is_major_upset(winner, loser) {
        tracing::info!("Major upset!");
    }
    tracing::info!("Winner: {:.1} -> {:.1}", winner, new_winner);
    tracing::info!("Loser:  {:.1} -> {:.1}", loser, new_loser);
    println!("{:.1} {:.1}", new_winner, new_loser);
}
