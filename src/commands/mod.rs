//! Command handlers: one method per CLI action.
//!
//! [`Commands`] bundles everything a single invocation needs. Remote content
//! goes through the injected [`ContentSource`] and randomness through the
//! injected RNG, so every handler runs offline and deterministically in tests.
//!
//! Failure policy: fetch and image errors degrade (local data, gradient
//! background, text-only output) and are logged with `warn!`. Only config
//! writes requested explicitly, shell file edits, bad resolution input and
//! terminal I/O surface as [`AppError`].

mod auto_display;
mod resolution;

use crate::canvas::{self, CanvasError, FontSet};
use crate::config::{ConfigStore, ResolvedConfig};
use crate::model::{AppError, Fact, Joke, Quote, Resolution};
use crate::source::{ContentSource, LocalLibrary};
use crate::view::{
    fact_paragraphs, joke_paragraphs, quote_paragraphs, FrameOptions, Output, Paragraphs, Tone,
};
use chrono::Utc;
use image::{DynamicImage, RgbaImage};
use rand::seq::IndexedRandom;
use rand::RngCore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What `--image` asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRequest {
    /// File or directory given on the command line.
    pub output: Option<PathBuf>,
}

/// State for one invocation.
pub struct Commands<'a, W: Write> {
    out: Output<W>,
    config: ResolvedConfig,
    store: ConfigStore,
    source: &'a dyn ContentSource,
    library: LocalLibrary,
    rng: &'a mut dyn RngCore,
    silent: bool,
}

impl<'a, W: Write> Commands<'a, W> {
    /// Bundle one invocation. Notices are printed unless [`Commands::silent`] is set.
    pub fn new(
        out: Output<W>,
        config: ResolvedConfig,
        store: ConfigStore,
        source: &'a dyn ContentSource,
        library: LocalLibrary,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            out,
            config,
            store,
            source,
            library,
            rng,
            silent: false,
        }
    }

    /// Suppress notices and footers (used by the shell hook).
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Give back the writer, for inspecting captured output.
    pub fn into_output(self) -> Output<W> {
        self.out
    }

    /// Configuration as changed by the commands run so far.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    fn chatter(&mut self, tone: Tone, text: &str) -> Result<(), AppError> {
        if !self.silent {
            self.out.notice(tone, text)?;
        }
        Ok(())
    }

    fn footer(&mut self, text: &str) -> Result<(), AppError> {
        if !self.silent {
            self.out.notice(Tone::Accent, text)?;
            self.out.blank_line()?;
        }
        Ok(())
    }

    fn print_box(&mut self, content: &Paragraphs) -> Result<(), AppError> {
        let frame = FrameOptions::random(&mut *self.rng);
        self.out.boxed(content, &frame)?;
        Ok(())
    }

    // ===== Quote =====

    /// Show a quote, optionally filtered by author and rendered to an image.
    pub fn show_quote(
        &mut self,
        author: Option<&str>,
        image: Option<&ImageRequest>,
    ) -> Result<(), AppError> {
        let quote = match author {
            Some(filter) => self.quote_by_author(filter)?,
            None => self.any_quote(),
        };

        match quote {
            Some(quote) => {
                self.print_box(&quote_paragraphs(&quote))?;
                if let Some(request) = image {
                    self.render_image(&quote, request)?;
                }
            }
            None => self.out.notice(
                Tone::Error,
                "⚠️  No quotes available right now, try again later.",
            )?,
        }

        self.footer("✨ Stay inspired! ✨")
    }

    fn quote_by_author(&mut self, filter: &str) -> Result<Option<Quote>, AppError> {
        let matches = self.library.quotes_by_author(filter);
        if let Some(quote) = matches.choose(&mut *self.rng) {
            return Ok(Some((*quote).clone()));
        }

        info!(filter, "No local quotes for author");
        if !self.silent {
            self.out.notice(
                Tone::Error,
                &format!("No quotes found for author \"{filter}\". Showing random quote instead."),
            )?;
            self.out.blank_line()?;
        }
        Ok(self.library.random_quote(&mut *self.rng).cloned())
    }

    fn any_quote(&mut self) -> Option<Quote> {
        match self.source.random_quote() {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!(error = %e, "Quote API failed, using local quotes");
                self.library.random_quote(&mut *self.rng).cloned()
            }
        }
    }

    // ===== Image =====

    fn render_image(&mut self, quote: &Quote, request: &ImageRequest) -> Result<(), AppError> {
        let resolution = self.config.resolution;
        self.out
            .notice(Tone::Dim, &format!("📐 Current resolution: {resolution}"))?;
        if !self.silent {
            self.out.notice(
                Tone::Info,
                "🎨 Generating quote image with scenic background...",
            )?;
            self.out.blank_line()?;
        }

        let background = self.fetch_background(resolution)?;
        let image = match self.generate(quote, background.as_ref()) {
            Ok(image) => image,
            Err(e) => return self.image_failed(&e),
        };
        self.out.preview(&image)?;
        self.out.blank_line()?;

        let explicit = request.output.as_deref();
        let path = canvas::save_path(explicit, &self.config.save_directory, Utc::now());
        if explicit.is_some() {
            if let Some(dir) = path.parent() {
                self.remember_save_directory(dir)?;
            }
        }

        if let Err(e) = canvas::save_png(&image, &path) {
            return self.image_failed(&e);
        }
        self.out.notice(
            Tone::Success,
            &format!("📸 Image saved as: {}", path.display()),
        )?;
        self.out.blank_line()?;
        Ok(())
    }

    /// Photo search first, then a random photo. `None` means draw a gradient.
    fn fetch_background(
        &mut self,
        resolution: Resolution,
    ) -> Result<Option<DynamicImage>, AppError> {
        match self.source.search_photo(&mut *self.rng) {
            Ok(Some(photo)) => return Ok(Some(photo)),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Unsplash background failed, trying Picsum");
                self.chatter(
                    Tone::Warning,
                    "⚠️  Could not fetch from Unsplash API, trying fallback...",
                )?;
            }
        }

        match self.source.random_photo(resolution, &mut *self.rng) {
            Ok(photo) => Ok(Some(photo)),
            Err(e) => {
                warn!(error = %e, "Background fetch failed, using gradient");
                self.chatter(
                    Tone::Warning,
                    "⚠️  Could not fetch background image, using gradient",
                )?;
                Ok(None)
            }
        }
    }

    fn generate(
        &mut self,
        quote: &Quote,
        background: Option<&DynamicImage>,
    ) -> Result<RgbaImage, CanvasError> {
        let fonts = FontSet::load(
            self.config.font_path.as_deref(),
            self.config.italic_font_path.as_deref(),
        )?;

        Ok(canvas::generate_quote_image(
            &quote.text,
            &quote.author,
            self.config.resolution,
            &fonts,
            background,
            &mut *self.rng,
        ))
    }

    fn image_failed(&mut self, error: &CanvasError) -> Result<(), AppError> {
        warn!(error = %error, "Image generation failed");
        if !self.silent {
            self.out.notice(
                Tone::Warning,
                "⚠️  Could not generate image, but here's your quote!",
            )?;
            self.out.blank_line()?;
        }
        Ok(())
    }

    fn remember_save_directory(&mut self, dir: &Path) -> Result<(), AppError> {
        let dir = dir.to_path_buf();
        self.config.save_directory = dir.clone();
        let saved = self
            .store
            .update(|file| file.save_directory = Some(dir.clone()));
        match saved {
            Ok(()) => self.out.notice(
                Tone::Info,
                &format!("📁 Config updated: future images will save to {}", dir.display()),
            )?,
            Err(e) => {
                warn!(error = %e, "Could not persist save directory");
                self.out
                    .notice(Tone::Warning, "⚠️  Could not update config file")?;
            }
        }
        Ok(())
    }

    // ===== Fact / Joke =====

    /// Show a random fact, falling back to the local library.
    pub fn show_fact(&mut self) -> Result<(), AppError> {
        let fact: Option<Fact> = match self.source.random_fact() {
            Ok(fact) => Some(fact),
            Err(e) => {
                warn!(error = %e, "Fact API failed, using local facts");
                self.fallback_notice("⚠️  Could not fetch fact from API, using local fallback...")?;
                self.library.random_fact(&mut *self.rng).cloned()
            }
        };

        match fact {
            Some(fact) => self.print_box(&fact_paragraphs(&fact))?,
            None => self.no_local_content("⚠️  No local facts available either, try again later.")?,
        }
        self.footer("✨ Keep learning something new! ✨")
    }

    /// Show a random joke, falling back to the local library.
    pub fn show_joke(&mut self) -> Result<(), AppError> {
        let joke: Option<Joke> = match self.source.random_joke() {
            Ok(joke) => Some(joke),
            Err(e) => {
                warn!(error = %e, "Joke API failed, using local jokes");
                self.fallback_notice("⚠️  Could not fetch joke from API, using local fallback...")?;
                self.library.random_joke(&mut *self.rng).cloned()
            }
        };

        match joke {
            Some(joke) => self.print_box(&joke_paragraphs(&joke))?,
            None => self.no_local_content("⚠️  No local jokes available either, try again later.")?,
        }
        self.footer("✨ Keep smiling! ✨")
    }

    fn fallback_notice(&mut self, text: &str) -> Result<(), AppError> {
        if !self.silent {
            self.out.notice(Tone::Warning, text)?;
            self.out.blank_line()?;
        }
        Ok(())
    }

    fn no_local_content(&mut self, text: &str) -> Result<(), AppError> {
        self.out.notice(Tone::Error, text)?;
        self.out.blank_line()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
