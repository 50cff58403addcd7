//! Displayable content: quotes, facts and jokes.

use serde::{Deserialize, Serialize};

/// A quote and its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text, without surrounding quotes.
    pub text: String,
    /// Who said it.
    pub author: String,
}

impl Quote {
    /// Quote `text` attributed to `author`.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Case-insensitive substring match on the author name.
    pub fn author_matches(&self, filter: &str) -> bool {
        self.author
            .to_lowercase()
            .contains(&filter.trim().to_lowercase())
    }
}

/// A single fun fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    /// The fact, one sentence or a few.
    pub text: String,
}

impl Fact {
    /// Fact from `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A joke, either two-part or a one-liner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Joke {
    /// Question-and-answer joke.
    SetupPunchline {
        /// Opening line.
        setup: String,
        /// Answer, shown after a blank line.
        punchline: String,
    },
    /// Joke told in a single line.
    OneLiner(String),
}

impl Joke {
    /// Joke with a setup line and a punchline.
    pub fn two_part(setup: impl Into<String>, punchline: impl Into<String>) -> Self {
        Joke::SetupPunchline {
            setup: setup.into(),
            punchline: punchline.into(),
        }
    }
}
