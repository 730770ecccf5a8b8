mod builtin;

pub use builtin::{mega, sample_library, showdown};

use crate::bootstrap::{Emotion, Seeding, rate_new_film};
use crate::error::{RatingError, Result, check_rating};
use crate::systems::{Film, Outcome, RatingSystem};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;

/// A brand-new film and the comparisons it went through, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// A human-readable title for the film.
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// The user's first impression, before any comparison.
    pub emotion: Emotion,
    /// Ratings of the opponents, one per round.
    pub opponents: Vec<f64>,
    /// The film's result in each round.
    pub results: Vec<Outcome>,
}

impl Scenario {
    /// Checks that every round has a result and every opponent a valid rating.
    pub fn validate(&self) -> Result<()> {
        if self.opponents.len() != self.results.len() {
            return Err(RatingError::MismatchedScenario {
                name: self.name.clone(),
                opponents: self.opponents.len(),
                results: self.results.len(),
            });
        }
        self.opponents
            .iter()
            .try_for_each(|&rating| check_rating(rating).map(drop))
    }

    pub fn rate(
        &self,
        system: &dyn RatingSystem,
        seeding: Seeding,
        opponent_prior: usize,
    ) -> Result<Film> {
        rate_new_film(
            system,
            seeding,
            self.emotion,
            &self.opponents,
            &self.results,
            opponent_prior,
        )
    }

    pub fn num_wins(&self) -> usize {
        self.results.iter().filter(|&&r| r == Outcome::Win).count()
    }
}

/// A film the user has already rated, available as an opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LibraryFilm {
    pub id: u32,
    pub title: String,
    pub rating: f64,
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| RatingError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads JSON or JSON5; the latter permits comments and trailing commas.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let text = read_to_string(path)?;
    json5::from_str(&text).map_err(|e| RatingError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn read_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let rows = csv::Reader::from_path(path)?
        .deserialize()
        .collect::<std::result::Result<_, _>>()?;
    Ok(rows)
}

/// Reads a list of scenarios and checks each one.
pub fn read_scenarios(path: impl AsRef<Path>) -> Result<Vec<Scenario>> {
    let scenarios: Vec<Scenario> = read_json(path)?;
    scenarios.iter().try_for_each(Scenario::validate)?;
    Ok(scenarios)
}

/// Reads `id,title,rating` rows, rejecting films rated outside the scale.
pub fn read_library(path: impl AsRef<Path>) -> Result<Vec<LibraryFilm>> {
    let library: Vec<LibraryFilm> = read_csv(path)?;
    library
        .iter()
        .try_for_each(|film| check_rating(film.rating).map(drop))?;
    Ok(library)
}

/// Helper function to get any named scenario set, or a file of scenarios.
pub fn get_scenarios_by_name(source: &str) -> Result<Vec<Scenario>> {
    match source {
        "showdown" => Ok(showdown()),
        "mega" => Ok(mega()),
        path => {
            let scenarios = read_scenarios(path)?;
            tracing::info!("Found {} scenarios at {:?}", scenarios.len(), path);
            Ok(scenarios)
        }
    }
}

fn write_to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| RatingError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|source| RatingError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write_to_csv<T: Serialize>(values: &[T], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    values.iter().try_for_each(|val| writer.serialize(val))?;
    writer.flush().map_err(|source| RatingError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Writes rows to `path`, choosing the format from its extension.
pub fn try_write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_to_json(values, path),
        Some("csv") => write_to_csv(values, path),
        _ => Err(RatingError::InvalidArgument(format!(
            "{:?} has an invalid or missing filename extension",
            path
        ))),
    }
}

pub fn write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) {
    let path = path.as_ref();
    match try_write_slice_to_file(values, path) {
        Ok(()) => tracing::info!("Successfully wrote to {:?}", path),
        Err(e) => tracing::error!("WARNING: failed write to {:?} because {}", path, e),
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use claims::{assert_err, assert_matches, assert_ok};

    #[test]
    fn test_builtin_scenarios_are_valid() {
        let showdown = assert_ok!(get_scenarios_by_name("showdown"));
        let mega = assert_ok!(get_scenarios_by_name("mega"));
        assert_eq!(showdown.len(), 5);
        assert_eq!(mega.len(), 10);
        for scenario in showdown.iter().chain(&mega) {
            assert_ok!(scenario.validate());
        }
        assert_eq!(showdown[2].num_wins(), 2);
    }

    #[test]
    fn test_sample_library() {
        let library = sample_library();
        assert_eq!(library.len(), 16);
        assert_eq!(library[0].id, 1);
        assert_eq!(library[15].title, "Jack and Jill");
    }

    #[test]
    fn test_mismatched_scenario() {
        let mut scenario = showdown().remove(0);
        scenario.results.pop();
        assert_matches!(
            scenario.validate(),
            Err(RatingError::MismatchedScenario { opponents: 3, results: 2, .. })
        );

        let mut scenario = showdown().remove(0);
        scenario.opponents[1] = 11.;
        assert_err!(scenario.validate());
    }

    #[test]
    fn test_scenario_file() {
        let path = std::env::temp_dir().join("film_elo_scenarios.json5");
        let text = r#"[
            // trailing commas and comments are fine
            {
                name: "Quiet Sleeper",
                emotion: "AVERAGE",
                opponents: [6.0, 7.5],
                results: ["win", "tie"],
            },
        ]"#;
        std::fs::write(&path, text).unwrap();

        let scenarios = assert_ok!(get_scenarios_by_name(path.to_str().unwrap()));
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].emotion, Emotion::Average);
        assert_eq!(scenarios[0].results, vec![Outcome::Win, Outcome::Tie]);
        assert!(scenarios[0].description.is_empty());

        std::fs::remove_file(&path).unwrap();
        assert_err!(get_scenarios_by_name(path.to_str().unwrap()));
    }

    #[test]
    fn test_library_csv() {
        let path = std::env::temp_dir().join("film_elo_library.csv");
        std::fs::write(&path, "id,title,rating\n1,Heat,8.3\n2,Cats,1.5\n").unwrap();
        let library = assert_ok!(read_library(&path));
        assert_eq!(library[0].title, "Heat");
        assert_eq!(library[1].rating, 1.5);

        std::fs::write(&path, "id,title,rating\n1,Heat,18.3\n").unwrap();
        assert_err!(read_library(&path));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unknown_extension() {
        assert_err!(try_write_slice_to_file(&[1, 2, 3], "ratings.txt"));
    }
}
