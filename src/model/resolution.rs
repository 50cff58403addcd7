//! Image resolution and the preset catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted width in pixels (8K).
pub const MAX_WIDTH: u32 = 7680;
/// Largest accepted height in pixels (8K).
pub const MAX_HEIGHT: u32 = 4320;

/// Errors produced when parsing or validating a resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Input is neither `WIDTHxHEIGHT` nor a known preset.
    #[error("Unrecognized resolution {0:?} (expected WIDTHxHEIGHT or a preset name)")]
    Unrecognized(String),

    /// Width outside `1..=MAX_WIDTH`.
    #[error("Width must be between 1 and 7680 pixels, got {0}")]
    Width(u32),

    /// Height outside `1..=MAX_HEIGHT`.
    #[error("Height must be between 1 and 4320 pixels, got {0}")]
    Height(u32),
}

/// Pixel dimensions of a generated image.
///
/// Deserializing validates the range, so a resolution read from the config
/// file is as trustworthy as one parsed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawResolution")]
pub struct Resolution {
    /// Width in pixels, `1..=MAX_WIDTH`.
    pub width: u32,
    /// Height in pixels, `1..=MAX_HEIGHT`.
    pub height: u32,
}

/// `[resolution]` table as written in the config file, before validation.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResolution {
    width: u32,
    height: u32,
}

impl TryFrom<RawResolution> for Resolution {
    type Error = ResolutionError;

    fn try_from(raw: RawResolution) -> Result<Self, Self::Error> {
        Resolution::new(raw.width, raw.height).validated()
    }
}

impl Resolution {
    /// Used when neither config nor CLI pick a resolution.
    pub const DEFAULT: Resolution = Resolution::new(1200, 800);

    /// Resolution without range checks; see [`Resolution::validated`].
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check both dimensions against the accepted range.
    pub fn validated(self) -> Result<Self, ResolutionError> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(ResolutionError::Width(self.width));
        }
        if self.height == 0 || self.height > MAX_HEIGHT {
            return Err(ResolutionError::Height(self.height));
        }
        Ok(self)
    }

    /// Width over height, rounded to two decimals.
    pub fn aspect_ratio(self) -> f64 {
        (f64::from(self.width) / f64::from(self.height) * 100.0).round() / 100.0
    }

    /// What this resolution is typically good for.
    pub fn usage_hint(self) -> &'static str {
        let ratio = self.aspect_ratio();
        if self.width == self.height {
            "Instagram posts, profile pictures"
        } else if ratio > 1.7 && ratio < 1.8 {
            "Widescreen displays, presentations"
        } else if self.width == 1080 && self.height == 1920 {
            "Instagram/TikTok stories, mobile wallpapers"
        } else if self.width > 3000 {
            "High-res prints, detailed artwork"
        } else if ratio > 2.5 {
            "Social media covers, banners"
        } else {
            "General use, social media posts"
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    /// Accepts `1920x1080` (also `1920X1080`, `1920*1080`) or a preset short name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(preset) = Preset::find(trimmed) {
            return Ok(preset.resolution);
        }

        let (w, h) = trimmed
            .split_once(['x', 'X', '*'])
            .ok_or_else(|| ResolutionError::Unrecognized(s.to_string()))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| ResolutionError::Unrecognized(s.to_string()))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| ResolutionError::Unrecognized(s.to_string()))?;

        Resolution::new(width, height).validated()
    }
}

/// A named, ready-made resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Label shown in the menu.
    pub name: &'static str,
    /// Name accepted by `--resolution`.
    pub short: &'static str,
    /// Pixel size.
    pub resolution: Resolution,
}

const fn preset(name: &'static str, short: &'static str, width: u32, height: u32) -> Preset {
    Preset {
        name,
        short,
        resolution: Resolution::new(width, height),
    }
}

/// Presets in menu order. The interactive menu adds "Custom Resolution"
/// before the last entry.
pub const PRESETS: &[Preset] = &[
    preset("HD (1280x720)", "HD", 1280, 720),
    preset("Full HD (1920x1080)", "Full HD", 1920, 1080),
    preset("2K (2560x1440)", "2K", 2560, 1440),
    preset("4K (3840x2160)", "4K", 3840, 2160),
    preset("Instagram Square (1080x1080)", "IG Square", 1080, 1080),
    preset("Instagram Story (1080x1920)", "IG Story", 1080, 1920),
    preset("Twitter Post (1200x675)", "Twitter", 1200, 675),
    preset("Facebook Cover (851x315)", "FB Cover", 851, 315),
    preset("YouTube Thumbnail (1280x720)", "YT Thumb", 1280, 720),
    preset("Desktop Wallpaper (1920x1080)", "Wallpaper", 1920, 1080),
    preset("Use Default (1200x800)", "Default", 1200, 800),
];

impl Preset {
    /// Look up a preset by short name, ignoring case, spaces, dashes and underscores.
    pub fn find(name: &str) -> Option<&'static Preset> {
        let wanted = normalize(name);
        PRESETS.iter().find(|p| normalize(p.short) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
