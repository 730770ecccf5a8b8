mod film;

use crate::numerical::clamp_rating;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use film::{Film, FilmEvent};

/// Result of one comparison, seen from the side of the film being rated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    /// "Too tough to decide"
    Tie,
}

impl Outcome {
    pub fn reversed(self) -> Self {
        match self {
            Self::Win => Self::Loss,
            Self::Loss => Self::Win,
            Self::Tie => Self::Tie,
        }
    }
}

impl From<bool> for Outcome {
    fn from(won: bool) -> Self {
        if won { Self::Win } else { Self::Loss }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Win => "WIN",
            Self::Loss => "LOSS",
            Self::Tie => "TIE",
        };
        f.write_str(label)
    }
}

impl FromStr for Outcome {
    type Err = crate::error::RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "win" | "w" => Ok(Self::Win),
            "loss" | "l" => Ok(Self::Loss),
            "tie" | "t" => Ok(Self::Tie),
            other => Err(crate::error::RatingError::InvalidArgument(format!(
                "'{}' is not an outcome. Must be one of: win, loss, tie",
                other
            ))),
        }
    }
}

// Each side of a drawn comparison lands this far from the pair's average.
pub const TIE_SPREAD: f64 = 0.05;

pub trait RatingSystem: std::fmt::Debug {
    /// New ratings for the winner and the loser of a decided comparison.
    fn update(
        &self,
        winner_rating: f64,
        loser_rating: f64,
        winner_prior: usize,
        loser_prior: usize,
    ) -> (f64, f64);

    fn is_major_upset(&self, winner_rating: f64, loser_rating: f64) -> bool;

    /// New ratings after a tie. Both films move to either side of their average.
    fn tie_update(&self, rating_a: f64, rating_b: f64) -> (f64, f64) {
        let average = 0.5 * (rating_a + rating_b);
        (
            clamp_rating(average + TIE_SPREAD),
            clamp_rating(average - TIE_SPREAD),
        )
    }
}

/// Applies one comparison between two rated films, updating both ratings,
/// comparison counts and histories.
pub fn simulate_comparison(
    system: &dyn RatingSystem,
    film: &mut Film,
    opponent: &mut Film,
    outcome: Outcome,
) {
    let (film_before, opponent_before) = (film.rating, opponent.rating);
    let (film_after, opponent_after, major_upset) = match outcome {
        Outcome::Win => {
            let (w, l) = system.update(
                film_before,
                opponent_before,
                film.comparisons,
                opponent.comparisons,
            );
            (w, l, system.is_major_upset(film_before, opponent_before))
        }
        Outcome::Loss => {
            let (w, l) = system.update(
                opponent_before,
                film_before,
                opponent.comparisons,
                film.comparisons,
            );
            (l, w, system.is_major_upset(opponent_before, film_before))
        }
        Outcome::Tie => {
            let (a, b) = system.tie_update(film_before, opponent_before);
            (a, b, false)
        }
    };

    tracing::trace!(
        "{} vs {}: {} -> {:.1} / {:.1}",
        film_before,
        opponent_before,
        outcome,
        film_after,
        opponent_after
    );
    film.update_rating(film_after, opponent_before, outcome, major_upset);
    opponent.update_rating(opponent_after, film_before, outcome.reversed(), major_upset);
}
