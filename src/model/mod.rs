//! Domain types.
//!
//! Plain data with no I/O: the content we display and the resolution we
//! render images at.

pub mod content;
pub mod error;
pub mod resolution;

pub use content::{Fact, Joke, Quote};
pub use error::AppError;
pub use resolution::{Preset, Resolution, ResolutionError, MAX_HEIGHT, MAX_WIDTH, PRESETS};
