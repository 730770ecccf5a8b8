pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Probability that a film rated `rating` beats one rated `foe_rating`,
/// on a base-10 logistic curve where a gap of `scale` means 10:1 odds.
pub fn logistic_win_probability(rating: f64, foe_rating: f64, scale: f64) -> f64 {
    (1. + 10f64.powf((foe_rating - rating) / scale)).recip()
}

pub fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

/// Rounds half away from zero, so 7.25 becomes 7.3.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.).round() / 10.
}

pub fn clamp_and_quantize(rating: f64) -> f64 {
    round_to_tenth(clamp_rating(rating))
}
