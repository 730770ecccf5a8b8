use crate::bootstrap::Emotion;
use crate::data_processing::LibraryFilm;
use rand::Rng;
use rand::seq::SliceRandom;

/// Films from the emotion's percentile band of a best-first ranking.
/// The band always holds at least one film when the library is non-empty.
pub fn percentile_candidates(emotion: Emotion, library: &[LibraryFilm]) -> Vec<&LibraryFilm> {
    let mut ranked: Vec<&LibraryFilm> = library.iter().collect();
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    let n = ranked.len();
    let (lo, hi) = emotion.percentile_band();
    let start = ((lo * n as f64).floor() as usize).min(n.saturating_sub(1));
    let end = ((hi * n as f64).floor() as usize).max(start + 1).min(n);
    ranked.truncate(end);
    ranked.split_off(start)
}

/// Picks `count` distinct opponents: the first from the emotion's band,
/// the rest uniformly from the remaining films.
pub fn select_opponents<R: Rng + ?Sized>(
    emotion: Emotion,
    library: &[LibraryFilm],
    count: usize,
    rng: &mut R,
) -> Vec<LibraryFilm> {
    if count == 0 || library.is_empty() {
        return vec![];
    }
    let candidates = percentile_candidates(emotion, library);
    let first = candidates[rng.random_range(0..candidates.len())].clone();

    let mut rest: Vec<&LibraryFilm> = library.iter().filter(|film| film.id != first.id).collect();
    rest.shuffle(rng);
    if rest.len() + 1 < count {
        tracing::warn!(
            "Library of {} films cannot supply {} opponents",
            library.len(),
            count
        );
    }

    tracing::debug!("First opponent for {}: {} ({})", emotion, first.title, first.rating);
    std::iter::once(first)
        .chain(rest.into_iter().take(count - 1).cloned())
        .collect()
}
