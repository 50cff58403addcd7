//! quoteme
//!
//! Random quotes, facts and jokes for the terminal, framed in a colored box,
//! optionally rendered onto a PNG with a scenic or gradient background.
//!
//! Pure core: [`layout`], [`model`]. Impure shell: everything that touches
//! the network, the filesystem or the terminal.

pub mod canvas;
pub mod commands;
pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod shell;
pub mod source;
pub mod view;
