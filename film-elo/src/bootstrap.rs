//! Giving a brand-new film its first rating, then folding the rest of its
//! comparisons into that rating.

use crate::error::{RatingError, Result};
use crate::numerical::{clamp_and_quantize, clamp_rating, logistic_win_probability};
use crate::systems::{Film, Outcome, RatingSystem, TIE_SPREAD, simulate_comparison};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparisons an established opponent is assumed to have behind it.
pub const DEFAULT_OPPONENT_PRIOR: usize = 5;

/// How far above or below its first opponent a film without a baseline lands.
pub const OPPONENT_OFFSET: f64 = 0.5;

const PERFORMANCE_WEIGHT: f64 = 0.3;
const PERFORMANCE_SCALE: f64 = 4.;

/// The user's first impression of a film.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Emotion {
    Loved,
    Liked,
    Average,
    Disliked,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [
        Emotion::Loved,
        Emotion::Liked,
        Emotion::Average,
        Emotion::Disliked,
    ];

    pub fn baseline(self) -> f64 {
        match self {
            Self::Loved => 8.5,
            Self::Liked => 7.0,
            Self::Average => 5.5,
            Self::Disliked => 3.0,
        }
    }

    /// Fractions of a best-first ranking from which this emotion's first opponent is drawn.
    pub fn percentile_band(self) -> (f64, f64) {
        match self {
            Self::Loved => (0.0, 0.25),
            Self::Liked => (0.25, 0.5),
            Self::Average => (0.5, 0.75),
            Self::Disliked => (0.75, 1.0),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Loved => "LOVED",
            Self::Liked => "LIKED",
            Self::Average => "AVERAGE",
            Self::Disliked => "DISLIKED",
        };
        f.write_str(name)
    }
}

impl FromStr for Emotion {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|emotion| emotion.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                RatingError::InvalidArgument(format!(
                    "'{}' is not an emotion. Must be one of: LOVED, LIKED, AVERAGE, DISLIKED",
                    s
                ))
            })
    }
}

/// Strategy for deriving a new film's first rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seeding {
    /// Start from the emotion's baseline and run every comparison through the update.
    EmotionBaseline,
    /// Ignore the emotion; place the film just above or below its first opponent.
    OpponentOffset,
}

impl fmt::Display for Seeding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmotionBaseline => f.write_str("emotion-baseline"),
            Self::OpponentOffset => f.write_str("opponent-offset"),
        }
    }
}

impl FromStr for Seeding {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "emotion-baseline" | "baseline" | "wildcard" => Ok(Self::EmotionBaseline),
            "opponent-offset" | "baseline-free" | "home" => Ok(Self::OpponentOffset),
            name => Err(RatingError::InvalidArgument(format!(
                "{} is not a valid seeding. Must be one of: emotion-baseline, opponent-offset",
                name
            ))),
        }
    }
}

/// First rating of a film known only by its result against one opponent.
pub fn offset_rating(opponent_rating: f64, outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Win => clamp_and_quantize(opponent_rating + OPPONENT_OFFSET),
        Outcome::Loss => clamp_and_quantize(opponent_rating - OPPONENT_OFFSET),
        Outcome::Tie => clamp_rating(opponent_rating + TIE_SPREAD),
    }
}

/// Rates a new film from its comparisons, in order. Every opponent is
/// treated as an established film with `opponent_prior` comparisons, and
/// its updated rating is discarded after the round.
pub fn rate_new_film(
    system: &dyn RatingSystem,
    seeding: Seeding,
    emotion: Emotion,
    opponents: &[f64],
    results: &[Outcome],
    opponent_prior: usize,
) -> Result<Film> {
    if opponents.len() != results.len() {
        return Err(RatingError::InvalidArgument(format!(
            "{} opponents but {} results",
            opponents.len(),
            results.len()
        )));
    }
    let mut rounds = opponents.iter().copied().zip(results.iter().copied());

    let seed = match seeding {
        Seeding::EmotionBaseline => Film::with_rating(emotion.baseline(), 0),
        Seeding::OpponentOffset => {
            let (opponent_rating, outcome) = rounds.next().ok_or_else(|| {
                RatingError::InvalidArgument(
                    "opponent-offset seeding needs at least one comparison".to_string(),
                )
            })?;
            let mut film = Film::default();
            let first_rating = offset_rating(opponent_rating, outcome);
            film.assign_first_rating(first_rating, opponent_rating, outcome);
            film
        }
    };

    let film = rounds.fold(seed, |mut film, (opponent_rating, outcome)| {
        let mut opponent = Film::with_rating(opponent_rating, opponent_prior);
        simulate_comparison(system, &mut film, &mut opponent, outcome);
        film
    });
    tracing::debug!(
        "{} film seeded by {}: {:?}",
        emotion,
        seeding,
        film.progression()
    );
    Ok(film)
}

/// Batch estimate from a set of comparisons: starts at `suggested` (or the
/// mean opponent rating) and moves by how many more wins the film earned
/// than a mean-rated film would expect.
pub fn performance_rating(opponents: &[f64], wins: usize, suggested: Option<f64>) -> Option<f64> {
    if opponents.is_empty() {
        return None;
    }
    let mean = opponents.iter().sum::<f64>() / opponents.len() as f64;
    let expected_wins: f64 = opponents
        .iter()
        .map(|&opponent| logistic_win_probability(mean, opponent, PERFORMANCE_SCALE))
        .sum();
    let base = suggested.unwrap_or(mean);
    Some(clamp_rating(base + PERFORMANCE_WEIGHT * (wins as f64 - expected_wins)))
}

/// Whether a final rating contradicts the user's first impression badly enough to flag.
pub fn emotion_mismatch(emotion: Emotion, final_rating: f64) -> bool {
    match emotion {
        Emotion::Loved => final_rating < 7.0,
        Emotion::Disliked => final_rating > 6.0,
        Emotion::Liked | Emotion::Average => false,
    }
}
