mod common;
mod wildcard_elo;

pub use common::{Film, FilmEvent, Outcome, RatingSystem, TIE_SPREAD, simulate_comparison};
pub use wildcard_elo::WildcardElo;

use crate::error::{RatingError, Result};

pub fn get_rating_system_by_name(system_name: &str) -> Result<Box<dyn RatingSystem + Send>> {
    match system_name {
        "wildcard" => Ok(Box::new(WildcardElo::default())),
        name => Err(RatingError::InvalidArgument(format!(
            "{} is not a valid rating system. Must be one of: wildcard",
            name
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_win_moves_both_films() {
        let system = WildcardElo::default();
        let mut film = Film::with_rating(7.0, 0);
        let mut opponent = Film::with_rating(7.0, 0);
        simulate_comparison(&system, &mut film, &mut opponent, Outcome::Win);

        assert_eq!(film.rating, 7.3);
        assert_eq!(opponent.rating, 6.8);
        assert_eq!(film.comparisons, 1);
        assert_eq!(opponent.comparisons, 1);
        assert_eq!(opponent.event_history[0].outcome, Outcome::Loss);
    }

    #[test]
    fn test_loss_mirrors_win() {
        let system = WildcardElo::default();
        let mut film = Film::with_rating(8.0, 5);
        let mut opponent = Film::with_rating(3.0, 0);
        simulate_comparison(&system, &mut film, &mut opponent, Outcome::Loss);

        assert_eq!(film.rating, 7.8);
        assert_eq!(opponent.rating, 6.6);
        let event = film.event_history[0];
        assert!(event.major_upset);
        assert_eq!(event.rating_before, Some(8.0));
        assert_eq!(event.opponent_rating, 3.0);
    }

    #[test]
    fn test_tie_splits_the_average() {
        let system = WildcardElo::default();
        let mut film = Film::with_rating(6.0, 2);
        let mut opponent = Film::with_rating(8.0, 9);
        simulate_comparison(&system, &mut film, &mut opponent, Outcome::Tie);

        assert!((film.rating - 7.05).abs() < 1e-12);
        assert!((opponent.rating - 6.95).abs() < 1e-12);

        let (top, bottom) = system.tie_update(10., 10.);
        assert_eq!(top, 10.);
        assert!((bottom - 9.95).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_system_name() {
        assert!(get_rating_system_by_name("wildcard").is_ok());
        assert!(get_rating_system_by_name("glicko").is_err());
    }
}
