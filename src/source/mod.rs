//! Content sources.
//!
//! This module provides where quotes, facts, jokes and background photos
//! come from:
//! - [`HttpSource`] talks to the public content APIs
//! - [`LocalLibrary`] is the bundled fallback data, also used for author search
//! - [`ContentSource`] is the seam commands depend on, so tests can run offline

use crate::model::{Fact, Joke, Quote, Resolution};
use image::DynamicImage;
use rand::RngCore;
use thiserror::Error;

pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::{LibraryError, LocalLibrary};

/// Errors from remote content APIs.
///
/// Never fatal: callers log them and fall back to local data or to a
/// gradient background.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout or undecodable JSON body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("{url} answered with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Well-formed response that carried no usable content.
    #[error("{url} returned no content")]
    Empty {
        /// Requested URL.
        url: String,
    },

    /// Downloaded background could not be decoded.
    #[error("Could not decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Anything that can produce fresh content for a command.
pub trait ContentSource {
    /// A random quote from the quote API.
    fn random_quote(&self) -> Result<Quote, FetchError>;

    /// A random fact from the fact API.
    fn random_fact(&self) -> Result<Fact, FetchError>;

    /// A random joke from the joke API.
    fn random_joke(&self) -> Result<Joke, FetchError>;

    /// A scenic photo from the photo search service, or `Ok(None)` when no
    /// search service is configured.
    fn search_photo(&self, rng: &mut dyn RngCore) -> Result<Option<DynamicImage>, FetchError>;

    /// A random photo of exactly `resolution`, used when searching fails.
    fn random_photo(
        &self,
        resolution: Resolution,
        rng: &mut dyn RngCore,
    ) -> Result<DynamicImage, FetchError>;
}
