//! Top-level error type for quoteme.
//!
//! Each subsystem owns a focused `thiserror` enum next to its code. This module
//! gathers the ones that can abort a run into [`AppError`], composing through
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - returned from command handlers and `main`
//!   - [`ConfigError`] - config file read/parse/write failures
//!   - [`LoggingError`] - tracing subscriber setup
//!   - [`LibraryError`] - local fallback data that cannot be read or parsed
//!   - [`ShellError`] - shell startup file editing
//!   - [`ResolutionError`] - invalid resolution input
//!   - `std::io::Error` - terminal output and prompt input
//!
//! # Error Recovery Strategy
//!
//! Content fetching ([`FetchError`]) and image generation ([`CanvasError`]) are
//! **non-fatal** and never reach this type: a failed API call falls back to the
//! local library, a failed image leaves the text output in place. Both are
//! logged with `warn!` and reported to the user as a one-line notice.
//!
//! [`FetchError`]: crate::source::FetchError
//! [`CanvasError`]: crate::canvas::CanvasError

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::ResolutionError;
use crate::shell::ShellError;
use crate::source::LibraryError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Examples
///
/// ```no_run
/// use quoteme::model::error::AppError;
/// use quoteme::model::Resolution;
///
/// fn pick() -> Result<Resolution, AppError> {
///     // ResolutionError converts to AppError via From
///     Ok("1920x1080".parse::<Resolution>()?)
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file exists but could not be read, parsed or written back.
    ///
    /// **Recovery**: reading falls back to defaults in `main`; a failed write
    /// is reported and the command still completes its visible output.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be set up (bad log path, unwritable directory).
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Local fallback data is missing or malformed.
    ///
    /// The embedded library is always valid; this only happens when a
    /// configured `data_dir` holds a broken file.
    #[error("Local data error: {0}")]
    Library(#[from] LibraryError),

    /// Shell startup file could not be read or rewritten.
    #[error("Shell configuration error: {0}")]
    Shell(#[from] ShellError),

    /// User supplied a resolution that is out of range or unparseable.
    #[error("Invalid resolution: {0}")]
    Resolution(#[from] ResolutionError),

    /// Writing to the terminal or reading a prompt answer failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
