use super::{LibraryFilm, Scenario};
use crate::bootstrap::Emotion::{self, Average, Disliked, Liked, Loved};

fn scenario(
    name: &str,
    description: &str,
    emotion: Emotion,
    opponents: [f64; 3],
    results: [bool; 3],
) -> Scenario {
    Scenario {
        name: name.to_string(),
        description: description.to_string(),
        emotion,
        opponents: opponents.to_vec(),
        results: results.into_iter().map(Into::into).collect(),
    }
}

/// Five hand-picked films, one per kind of comparison run.
pub fn showdown() -> Vec<Scenario> {
    vec![
        scenario(
            "The Great Victory",
            "Wins every comparison against progressively stronger opponents",
            Loved,
            [6.0, 7.0, 8.0],
            [true, true, true],
        ),
        scenario(
            "The Upset Champion",
            "A disliked film beats three great ones",
            Disliked,
            [8.5, 9.0, 9.5],
            [true, true, true],
        ),
        scenario(
            "The Roller Coaster",
            "Mixed results against opponents of varying strength",
            Liked,
            [5.0, 8.5, 6.0],
            [true, false, true],
        ),
        scenario(
            "The Disappointment",
            "Loses every comparison against superior opponents",
            Average,
            [8.0, 8.5, 9.0],
            [false, false, false],
        ),
        scenario(
            "The Close Call",
            "Narrow wins and losses against near-identical ratings",
            Liked,
            [7.2, 6.8, 7.1],
            [false, true, false],
        ),
    ]
}

/// Ten films covering every emotion and the extreme ends of the scale.
pub fn mega() -> Vec<Scenario> {
    vec![
        scenario(
            "LOVED Blockbuster",
            "Wins every comparison against weaker opponents",
            Loved,
            [4.0, 5.5, 6.0],
            [true, true, true],
        ),
        scenario(
            "DISLIKED Underdog",
            "A chain of major upsets",
            Disliked,
            [8.5, 9.0, 9.5],
            [true, true, true],
        ),
        scenario(
            "LIKED Drama",
            "Mixed win/loss pattern",
            Liked,
            [6.5, 8.0, 7.5],
            [true, false, true],
        ),
        scenario(
            "AVERAGE Disappointment",
            "Loses to superior opponents",
            Average,
            [8.0, 8.5, 9.0],
            [false, false, false],
        ),
        scenario(
            "LOVED vs Titans",
            "Struggles against top-tier opponents",
            Loved,
            [9.0, 9.5, 10.0],
            [false, true, false],
        ),
        scenario(
            "DISLIKED Surprise",
            "Wins some comparisons against similar quality",
            Disliked,
            [4.0, 3.5, 4.5],
            [true, true, false],
        ),
        scenario(
            "LIKED Phenomenon",
            "Beats the best films on the scale",
            Liked,
            [10.0, 9.8, 9.9],
            [true, true, true],
        ),
        scenario(
            "AVERAGE Mediocrity",
            "Performs as expected against similar ratings",
            Average,
            [5.0, 6.0, 5.5],
            [true, false, true],
        ),
        scenario(
            "LOVED Flop",
            "Loses to terrible opponents",
            Loved,
            [2.0, 1.5, 3.0],
            [false, false, false],
        ),
        scenario(
            "DISLIKED Wildcard",
            "Extreme variance in opponent ratings",
            Disliked,
            [9.5, 2.0, 8.0],
            [true, false, true],
        ),
    ]
}

/// A user's already-rated films, spread evenly over the scale.
pub fn sample_library() -> Vec<LibraryFilm> {
    [
        ("The Godfather", 9.2),
        ("Citizen Kane", 8.8),
        ("Pulp Fiction", 8.5),
        ("The Dark Knight", 8.2),
        ("Inception", 7.8),
        ("Forrest Gump", 7.5),
        ("Titanic", 7.0),
        ("Avatar", 6.5),
        ("Transformers", 6.0),
        ("Fast & Furious", 5.5),
        ("The Room", 5.0),
        ("Battlefield Earth", 4.5),
        ("Movie 43", 4.0),
        ("Cats (2019)", 3.5),
        ("The Emoji Movie", 3.0),
        ("Jack and Jill", 2.5),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, rating), id)| LibraryFilm {
        id,
        title: title.to_string(),
        rating,
    })
    .collect()
}
