//! A capped Elo variant on a 1-10 scale. Each side moves by a step that
//! shrinks with experience; underdog wins are amplified, and a win over a
//! film rated more than `major_upset_gap` higher escapes the cap entirely.

use super::RatingSystem;
use crate::numerical::{clamp_and_quantize, logistic_win_probability};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WildcardElo {
    // (comparisons_below, step) pairs in increasing order of comparisons;
    // a count past the last threshold uses final_step
    pub step_table: Vec<(usize, f64)>,
    pub final_step: f64,
    // rating gap that corresponds to 10:1 odds
    pub logistic_scale: f64,
    // every comparison moves both sides at least this far
    pub min_change: f64,
    pub max_change: f64,
    pub underdog_multiplier: f64,
    pub major_upset_gap: f64,
    pub major_upset_bonus: f64,
}

impl Default for WildcardElo {
    fn default() -> Self {
        Self {
            step_table: vec![(5, 0.5), (10, 0.25), (20, 0.125)],
            final_step: 0.1,
            logistic_scale: 4.,
            min_change: 0.1,
            max_change: 0.7,
            underdog_multiplier: 1.2,
            major_upset_gap: 3.,
            major_upset_bonus: 3.,
        }
    }
}

impl WildcardElo {
    /// The learning rate for a film with `prior_comparisons` behind it.
    pub fn step_size(&self, prior_comparisons: usize) -> f64 {
        self.step_table
            .iter()
            .find(|&&(below, _)| prior_comparisons < below)
            .map_or(self.final_step, |&(_, step)| step)
    }

    pub fn expected_win_probability(&self, winner_rating: f64, loser_rating: f64) -> f64 {
        logistic_win_probability(winner_rating, loser_rating, self.logistic_scale)
    }

    /// Winner gain and loser loss before they are applied, after the
    /// underdog multiplier, upset bonus and cap.
    pub fn rating_changes(
        &self,
        winner_rating: f64,
        loser_rating: f64,
        winner_prior: usize,
        loser_prior: usize,
    ) -> (f64, f64) {
        let surprise = 1. - self.expected_win_probability(winner_rating, loser_rating);
        let mut gain = (self.step_size(winner_prior) * surprise).max(self.min_change);
        let mut loss = (self.step_size(loser_prior) * surprise).max(self.min_change);

        if winner_rating < loser_rating {
            gain *= self.underdog_multiplier;
        }
        if self.is_major_upset(winner_rating, loser_rating) {
            gain += self.major_upset_bonus;
        } else {
            gain = gain.min(self.max_change);
            loss = loss.min(self.max_change);
        }
        (gain, loss)
    }
}

impl RatingSystem for WildcardElo {
    fn update(
        &self,
        winner_rating: f64,
        loser_rating: f64,
        winner_prior: usize,
        loser_prior: usize,
    ) -> (f64, f64) {
        let (gain, loss) =
            self.rating_changes(winner_rating, loser_rating, winner_prior, loser_prior);
        if self.is_major_upset(winner_rating, loser_rating) {
            tracing::debug!(
                "Major upset: {} defeated {}, winner gains {:.3}",
                winner_rating,
                loser_rating,
                gain
            );
        }
        (
            clamp_and_quantize(winner_rating + gain),
            clamp_and_quantize(loser_rating - loss),
        )
    }

    fn is_major_upset(&self, winner_rating: f64, loser_rating: f64) -> bool {
        winner_rating < loser_rating && loser_rating - winner_rating > self.major_upset_gap
    }
}
