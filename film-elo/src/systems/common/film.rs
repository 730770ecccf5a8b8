use super::Outcome;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilmEvent {
    pub round: usize,
    pub opponent_rating: f64,
    pub outcome: Outcome,
    // None when the film had no rating before this round
    pub rating_before: Option<f64>,
    pub rating_after: f64,
    pub major_upset: bool,
}

impl FilmEvent {
    pub fn change(&self) -> Option<f64> {
        self.rating_before.map(|before| self.rating_after - before)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Film {
    pub rating: f64,
    pub comparisons: usize,
    pub event_history: Vec<FilmEvent>,
}

impl Film {
    pub fn with_rating(rating: f64, comparisons: usize) -> Self {
        Self {
            rating,
            comparisons,
            event_history: vec![],
        }
    }

    pub fn is_newcomer(&self) -> bool {
        self.comparisons == 0
    }

    /// Records a finished round against an opponent and moves to the new rating.
    pub fn update_rating(
        &mut self,
        rating: f64,
        opponent_rating: f64,
        outcome: Outcome,
        major_upset: bool,
    ) {
        self.push_event(Some(self.rating), rating, opponent_rating, outcome, major_upset);
    }

    /// Like `update_rating`, but for a film whose previous rating carried no meaning.
    pub fn assign_first_rating(&mut self, rating: f64, opponent_rating: f64, outcome: Outcome) {
        self.push_event(None, rating, opponent_rating, outcome, false);
    }

    fn push_event(
        &mut self,
        rating_before: Option<f64>,
        rating_after: f64,
        opponent_rating: f64,
        outcome: Outcome,
        major_upset: bool,
    ) {
        self.event_history.push(FilmEvent {
            round: self.event_history.len(),
            opponent_rating,
            outcome,
            rating_before,
            rating_after,
            major_upset,
        });
        self.rating = rating_after;
        self.comparisons += 1;
    }

    pub fn progression(&self) -> Vec<f64> {
        self.event_history.iter().map(|e| e.rating_after).collect()
    }
}
