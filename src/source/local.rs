//! Bundled fallback content.
//!
//! Used when an API is unreachable and for author searches, which the quote
//! API cannot do. The JSON files under `data/` are compiled in; a configured
//! data directory can override any of them.

use crate::model::{Fact, Joke, Quote};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const QUOTES_FILE: &str = "quotes.json";
const FACTS_FILE: &str = "facts.json";
const JOKES_FILE: &str = "jokes.json";

const EMBEDDED_QUOTES: &str = include_str!("../../data/quotes.json");
const EMBEDDED_FACTS: &str = include_str!("../../data/facts.json");
const EMBEDDED_JOKES: &str = include_str!("../../data/jokes.json");

/// Errors reading local content.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// An override file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The override file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid JSON of the expected shape.
    #[error("Malformed {name}: {source}")]
    Parse {
        /// File name, such as `quotes.json`.
        name: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Facts are stored either as bare strings or as `{ "text": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFact {
    Plain(String),
    Object { text: String },
}

impl From<RawFact> for Fact {
    fn from(raw: RawFact) -> Self {
        match raw {
            RawFact::Plain(text) | RawFact::Object { text } => Fact::new(text),
        }
    }
}

/// Jokes come as setup/punchline pairs, `{ "joke": ... }` one-liners, or bare strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawJoke {
    TwoPart { setup: String, punchline: String },
    Single { joke: String },
    Plain(String),
}

impl From<RawJoke> for Joke {
    fn from(raw: RawJoke) -> Self {
        match raw {
            RawJoke::TwoPart { setup, punchline } => Joke::two_part(setup, punchline),
            RawJoke::Single { joke } | RawJoke::Plain(joke) => Joke::OneLiner(joke),
        }
    }
}

/// In-memory quotes, facts and jokes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalLibrary {
    quotes: Vec<Quote>,
    facts: Vec<Fact>,
    jokes: Vec<Joke>,
}

impl LocalLibrary {
    /// Library holding exactly the given content.
    pub fn new(quotes: Vec<Quote>, facts: Vec<Fact>, jokes: Vec<Joke>) -> Self {
        Self {
            quotes,
            facts,
            jokes,
        }
    }

    /// The compiled-in library.
    ///
    /// # Errors
    ///
    /// Only if the bundled JSON is malformed.
    pub fn embedded() -> Result<Self, LibraryError> {
        Self::load(None)
    }

    /// Bundled data, with any of `quotes.json`, `facts.json`, `jokes.json`
    /// found in `data_dir` taking precedence.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if an override file cannot be read or parsed.
    pub fn load(data_dir: Option<&Path>) -> Result<Self, LibraryError> {
        let quotes: Vec<Quote> = load_list(data_dir, QUOTES_FILE, EMBEDDED_QUOTES)?;
        let facts: Vec<RawFact> = load_list(data_dir, FACTS_FILE, EMBEDDED_FACTS)?;
        let jokes: Vec<RawJoke> = load_list(data_dir, JOKES_FILE, EMBEDDED_JOKES)?;

        Ok(Self {
            quotes,
            facts: facts.into_iter().map(Fact::from).collect(),
            jokes: jokes.into_iter().map(Joke::from).collect(),
        })
    }

    /// All quotes, in file order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Random quote, `None` if there are none.
    pub fn random_quote<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Quote> {
        self.quotes.choose(rng)
    }

    /// Quotes whose author contains `filter`, ignoring case.
    pub fn quotes_by_author(&self, filter: &str) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| q.author_matches(filter))
            .collect()
    }

    /// Random fact, `None` if there are none.
    pub fn random_fact<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Fact> {
        self.facts.choose(rng)
    }

    /// Random joke, `None` if there are none.
    pub fn random_joke<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Joke> {
        self.jokes.choose(rng)
    }
}

fn load_list<T: DeserializeOwned>(
    data_dir: Option<&Path>,
    file_name: &str,
    embedded: &str,
) -> Result<Vec<T>, LibraryError> {
    let override_path = data_dir
        .map(|dir| dir.join(file_name))
        .filter(|path| path.is_file());

    let Some(path) = override_path else {
        return parse_list(file_name, embedded);
    };

    debug!(path = %path.display(), "Loading local data override");
    let contents = std::fs::read_to_string(&path).map_err(|source| LibraryError::Read {
        path: path.clone(),
        source,
    })?;
    parse_list(&path.display().to_string(), &contents)
}

fn parse_list<T: DeserializeOwned>(name: &str, contents: &str) -> Result<Vec<T>, LibraryError> {
    serde_json::from_str(contents).map_err(|source| LibraryError::Parse {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn embedded_library_is_populated() {
        let library = LocalLibrary::embedded().expect("bundled data must parse");
        let mut rng = StdRng::seed_from_u64(7);

        assert!(!library.quotes().is_empty());
        assert!(library.random_fact(&mut rng).is_some());
        assert!(library.random_joke(&mut rng).is_some());
    }

    #[test]
    fn embedded_jokes_include_both_shapes() {
        let library = LocalLibrary::embedded().expect("bundled data must parse");
        assert!(library
            .jokes
            .iter()
            .any(|j| matches!(j, Joke::SetupPunchline { .. })));
        assert!(library.jokes.iter().any(|j| matches!(j, Joke::OneLiner(_))));
    }

    #[test]
    fn author_search_is_case_insensitive() {
        let library = LocalLibrary::embedded().expect("bundled data must parse");
        let einstein = library.quotes_by_author("EINSTEIN");
        assert!(!einstein.is_empty());
        assert!(einstein.iter().all(|q| q.author == "Albert Einstein"));
    }

    #[test]
    fn author_search_without_match_is_empty() {
        let library = LocalLibrary::embedded().expect("bundled data must parse");
        assert!(library.quotes_by_author("nobody-by-this-name").is_empty());
    }

    #[test]
    fn facts_accept_strings_and_objects() {
        let facts: Vec<RawFact> =
            serde_json::from_str(r#"["plain", {"text": "object"}]"#).expect("parse");
        let facts: Vec<Fact> = facts.into_iter().map(Fact::from).collect();
        assert_eq!(facts, vec![Fact::new("plain"), Fact::new("object")]);
    }

    #[test]
    fn jokes_accept_all_three_shapes() {
        let jokes: Vec<RawJoke> = serde_json::from_str(
            r#"[{"setup": "S", "punchline": "P", "id": 1}, {"joke": "J"}, "bare"]"#,
        )
        .expect("parse");
        let jokes: Vec<Joke> = jokes.into_iter().map(Joke::from).collect();
        assert_eq!(
            jokes,
            vec![
                Joke::two_part("S", "P"),
                Joke::OneLiner("J".to_string()),
                Joke::OneLiner("bare".to_string()),
            ]
        );
    }

    #[test]
    fn data_dir_overrides_only_present_files() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(
            dir.path().join(QUOTES_FILE),
            r#"[{"text": "Custom quote.", "author": "Me"}]"#,
        )
        .expect("write override");

        let library = LocalLibrary::load(Some(dir.path())).expect("load");

        assert_eq!(library.quotes(), &[Quote::new("Custom quote.", "Me")]);
        assert_eq!(library.facts, LocalLibrary::embedded().expect("embedded").facts);
    }

    #[test]
    fn malformed_override_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(JOKES_FILE), "{ not json").expect("write");

        let result = LocalLibrary::load(Some(dir.path()));
        assert!(matches!(result, Err(LibraryError::Parse { .. })));
    }

    #[test]
    fn empty_library_returns_none() {
        let library = LocalLibrary::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(library.random_quote(&mut rng).is_none());
        assert!(library.random_fact(&mut rng).is_none());
        assert!(library.random_joke(&mut rng).is_none());
    }
}
