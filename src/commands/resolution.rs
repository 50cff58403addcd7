//! `--resolution`: explicit value or interactive preset menu.

use super::Commands;
use crate::model::{AppError, Resolution, MAX_HEIGHT, MAX_WIDTH, PRESETS};
use crate::view::Tone;
use std::io::{BufRead, Write};
use tracing::{info, warn};

const CUSTOM_DEFAULT: Resolution = Resolution::new(1920, 1080);

/// One numbered menu entry.
enum Choice {
    Preset(Resolution),
    Custom,
}

/// Menu rows: every preset except the trailing default, then "Custom
/// Resolution", then the default.
fn menu() -> Vec<(&'static str, Choice)> {
    let (default, presets) = match PRESETS.split_last() {
        Some((last, rest)) => (Some(last), rest),
        None => (None, PRESETS),
    };
    let mut rows: Vec<_> = presets
        .iter()
        .map(|p| (p.name, Choice::Preset(p.resolution)))
        .collect();
    rows.push(("Custom Resolution", Choice::Custom));
    if let Some(default) = default {
        rows.push((default.name, Choice::Preset(default.resolution)));
    }
    rows
}

impl<W: Write> Commands<'_, W> {
    /// Pick a resolution, persist it and print tips for it.
    ///
    /// `value` skips the menu. Menu answers are read line by line from `input`.
    ///
    /// # Errors
    ///
    /// `AppError::Resolution` for an invalid `value`; `AppError::Terminal` if
    /// prompting fails.
    pub fn select_resolution<R: BufRead>(
        &mut self,
        value: Option<&str>,
        input: &mut R,
    ) -> Result<Resolution, AppError> {
        let resolution = match value {
            Some(value) => value.parse::<Resolution>()?,
            None => self.resolution_menu(input)?,
        };

        self.config.resolution = resolution;
        match self.store.update(|file| file.resolution = Some(resolution)) {
            Ok(()) => {
                info!(%resolution, "Resolution saved");
                self.out.blank_line()?;
                self.out
                    .notice(Tone::Success, &format!("✅ Resolution saved: {resolution}"))?;
                self.out.notice(
                    Tone::Info,
                    "📁 Configuration updated. Future images will use this resolution.",
                )?;
                self.resolution_tips(resolution)?;
            }
            Err(e) => {
                warn!(error = %e, "Could not save resolution");
                self.out
                    .notice(Tone::Warning, "⚠️  Could not save resolution to config file")?;
            }
        }
        Ok(resolution)
    }

    fn resolution_tips(&mut self, resolution: Resolution) -> Result<(), AppError> {
        self.out.blank_line()?;
        self.out.notice(Tone::Dim, "💡 Resolution Info:")?;
        self.out.notice(
            Tone::Dim,
            &format!("   Aspect Ratio: {:.2}:1", resolution.aspect_ratio()),
        )?;
        self.out.notice(
            Tone::Dim,
            &format!("   Perfect for: {}", resolution.usage_hint()),
        )?;
        Ok(())
    }

    fn resolution_menu<R: BufRead>(&mut self, input: &mut R) -> Result<Resolution, AppError> {
        self.out.notice(Tone::Heading, "📐 Resolution Configuration")?;
        self.out
            .notice(Tone::Dim, "Choose a resolution for your quote images:")?;
        self.out.blank_line()?;

        let rows = menu();
        for (i, (name, _)) in rows.iter().enumerate() {
            self.out.line(&format!("  {:>2}) {name}", i + 1))?;
        }
        self.out.blank_line()?;

        loop {
            self.out
                .prompt(&format!("Select a resolution [1-{}]: ", rows.len()))?;
            let Some(answer) = read_answer(input)? else {
                return self.cancelled();
            };
            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| rows.get(i));
            match picked {
                Some((_, Choice::Preset(resolution))) => return Ok(*resolution),
                Some((_, Choice::Custom)) => return self.custom_resolution(input),
                None => self.out.notice(
                    Tone::Error,
                    &format!("Please enter a number between 1 and {}", rows.len()),
                )?,
            }
        }
    }

    fn custom_resolution<R: BufRead>(&mut self, input: &mut R) -> Result<Resolution, AppError> {
        self.out.blank_line()?;
        self.out.notice(Tone::Info, "🎯 Custom Resolution Setup:")?;

        let Some(width) =
            self.ask_dimension(input, "width", CUSTOM_DEFAULT.width, MAX_WIDTH)?
        else {
            return self.cancelled();
        };
        let Some(height) =
            self.ask_dimension(input, "height", CUSTOM_DEFAULT.height, MAX_HEIGHT)?
        else {
            return self.cancelled();
        };

        self.out
            .prompt(&format!("Confirm resolution: {width}x{height}? [Y/n]: "))?;
        let confirmed = match read_answer(input)? {
            Some(answer) => !matches!(answer.to_lowercase().as_str(), "n" | "no"),
            None => false,
        };
        if !confirmed {
            return self.cancelled();
        }
        Ok(Resolution::new(width, height))
    }

    /// Prompt until a value in `1..=max` is given. `None` on end of input.
    fn ask_dimension<R: BufRead>(
        &mut self,
        input: &mut R,
        name: &str,
        default: u32,
        max: u32,
    ) -> Result<Option<u32>, AppError> {
        loop {
            self.out
                .prompt(&format!("Enter {name} (pixels) [{default}]: "))?;
            let Some(answer) = read_answer(input)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }

            let label = capitalize(name);
            match answer.parse::<u32>() {
                Ok(0) | Err(_) => self
                    .out
                    .notice(Tone::Error, &format!("{label} must be a positive number"))?,
                Ok(n) if n > max => self.out.notice(
                    Tone::Error,
                    &format!("{label} cannot exceed {max} pixels"),
                )?,
                Ok(n) => return Ok(Some(n)),
            }
        }
    }

    fn cancelled(&mut self) -> Result<Resolution, AppError> {
        self.out.notice(
            Tone::Warning,
            "❌ Resolution setup cancelled. Using default resolution.",
        )?;
        Ok(Resolution::DEFAULT)
    }
}

/// Next trimmed line, or `None` at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
