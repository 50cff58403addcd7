//! Color and text styling.
//!
//! Styles are plain `ratatui::style::Style` values. Whether they reach the
//! terminal is decided once, at emission time, by [`ColorConfig`].

use crossterm::style::{Attribute, Color as TermColor};
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Plain output, for tests and pipes.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Colored output regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Tone =====

/// Semantic color of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Completed action (green).
    Success,
    /// Neutral information (blue).
    Info,
    /// Degraded but continuing (yellow).
    Warning,
    /// Failed action (red).
    Error,
    /// Secondary detail (dim).
    Dim,
    /// Closing sign-off line (light blue).
    Accent,
    /// Section heading (bold cyan).
    Heading,
}

impl Tone {
    /// Style of a line in this tone.
    pub fn style(self) -> Style {
        match self {
            Tone::Success => Style::default().fg(Color::Green),
            Tone::Info => Style::default().fg(Color::Blue),
            Tone::Warning => Style::default().fg(Color::Yellow),
            Tone::Error => Style::default().fg(Color::Red),
            Tone::Dim => Style::default().add_modifier(Modifier::DIM),
            Tone::Accent => Style::default().fg(Color::LightBlue),
            Tone::Heading => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ===== ContentStyles =====

/// Styles for the parts of a content box.
pub struct ContentStyles;

impl ContentStyles {
    /// Quote text.
    pub fn quote() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    /// Author line.
    pub fn author() -> Style {
        Style::default().fg(Color::Magenta)
    }

    /// Fact box heading.
    pub fn fact_heading() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    /// Joke box heading.
    pub fn joke_heading() -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }

    /// Fact text and joke setups (bright white).
    pub fn body() -> Style {
        Style::default().fg(Color::White)
    }

    /// Joke punchline.
    pub fn punchline() -> Style {
        Style::default().fg(Color::Yellow)
    }
}

// ===== crossterm conversion =====

/// Map a ratatui color onto the crossterm color the terminal backend would use.
pub fn to_terminal_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightBlue => TermColor::Blue,
        Color::LightYellow => TermColor::Yellow,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Indexed(i) => TermColor::AnsiValue(i),
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
    }
}

/// Terminal attributes for the modifiers we use.
pub fn to_terminal_attributes(modifier: Modifier) -> Vec<Attribute> {
    [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
    ]
    .into_iter()
    .filter(|(m, _)| modifier.contains(*m))
    .map(|(_, a)| a)
    .collect()
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // ===== ColorConfig Tests =====

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");

        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled());
    }

    // ===== Tone / ContentStyles Tests =====

    #[test]
    fn warning_and_error_tones_differ() {
        assert_ne!(Tone::Warning.style(), Tone::Error.style());
    }

    #[test]
    fn quote_style_is_bold_green() {
        let style = ContentStyles::quote();
        assert_eq!(style.fg, Some(Color::Green));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    // ===== Conversion Tests =====

    #[test]
    fn named_colors_map_to_dark_terminal_variants() {
        assert_eq!(to_terminal_color(Color::Red), TermColor::DarkRed);
        assert_eq!(to_terminal_color(Color::LightRed), TermColor::Red);
        assert_eq!(
            to_terminal_color(Color::Rgb(1, 2, 3)),
            TermColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn modifiers_map_to_attributes() {
        let attrs = to_terminal_attributes(Modifier::BOLD | Modifier::ITALIC);
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::Italic]);
        assert!(to_terminal_attributes(Modifier::empty()).is_empty());
    }
}
