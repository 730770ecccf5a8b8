use crate::numerical::{MAX_RATING, MIN_RATING};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RatingError>;

/// Errors raised where outside input enters the library.
/// The rating update itself never fails.
#[derive(Debug, Error)]
pub enum RatingError {
    #[error("invalid rating {0}: must be a finite number in [1, 10]")]
    InvalidRating(f64),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("scenario {name} has {opponents} opponents but {results} results")]
    MismatchedScenario {
        name: String,
        opponents: usize,
        results: usize,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Accepts a rating only if it already lies in the valid range.
pub fn check_rating(rating: f64) -> Result<f64> {
    if rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(RatingError::InvalidRating(rating))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use claims::{assert_err, assert_ok_eq};

    #[test]
    fn ratings_on_the_boundary_are_accepted() {
        assert_ok_eq!(check_rating(1.0), 1.0);
        assert_ok_eq!(check_rating(10.0), 10.0);
    }

    #[test]
    fn ratings_outside_the_range_are_rejected() {
        assert_err!(check_rating(0.9));
        assert_err!(check_rating(10.01));
    }

    #[test]
    fn non_finite_ratings_are_rejected() {
        assert_err!(check_rating(f64::NAN));
        assert_err!(check_rating(f64::INFINITY));
    }
}
