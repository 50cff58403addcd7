//! Box decoration: border style, border color, padding and margin.

use rand::seq::IndexedRandom;
use rand::Rng;
use ratatui::style::Color;
use ratatui::symbols::border;

/// ASCII-only border.
pub const CLASSIC: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// Border line drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    /// Light box drawing lines.
    Single,
    /// Double lines.
    Double,
    /// Light lines with rounded corners.
    Round,
    /// Heavy lines.
    Bold,
    /// ASCII `+`, `-` and `|`.
    Classic,
}

impl BorderStyle {
    /// Every style, for random picks.
    pub const ALL: [BorderStyle; 5] = [
        BorderStyle::Single,
        BorderStyle::Double,
        BorderStyle::Round,
        BorderStyle::Bold,
        BorderStyle::Classic,
    ];

    /// Border glyphs for this style.
    pub fn symbols(self) -> border::Set {
        match self {
            BorderStyle::Single => border::PLAIN,
            BorderStyle::Double => border::DOUBLE,
            BorderStyle::Round => border::ROUNDED,
            BorderStyle::Bold => border::THICK,
            BorderStyle::Classic => CLASSIC,
        }
    }
}

/// Colors a border is picked from.
pub const BORDER_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// How a content box is decorated.
///
/// Padding and margin are one "unit" each: one row vertically, three
/// columns horizontally, which keeps the box visually square-ish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    /// Line style.
    pub border: BorderStyle,
    /// Border color.
    pub color: Color,
    /// Blank rows inside the border, above and below.
    pub padding_rows: u16,
    /// Blank columns inside the border, left and right.
    pub padding_cols: u16,
    /// Blank rows printed around the box.
    pub margin_rows: u16,
    /// Columns the box is indented by.
    pub margin_cols: u16,
}

impl FrameOptions {
    /// Frame with `border` in `color` and default spacing.
    pub fn new(border: BorderStyle, color: Color) -> Self {
        Self {
            border,
            color,
            padding_rows: 1,
            padding_cols: 3,
            margin_rows: 1,
            margin_cols: 3,
        }
    }

    /// Random border style and color, default spacing.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let border = BorderStyle::ALL
            .choose(rng)
            .copied()
            .unwrap_or(BorderStyle::Round);
        let color = BORDER_COLORS.choose(rng).copied().unwrap_or(Color::Cyan);
        Self::new(border, color)
    }

    /// Columns taken by borders and padding.
    pub fn horizontal_chrome(&self) -> u16 {
        2 + 2 * self.padding_cols
    }

    /// Rows taken by borders and padding.
    pub fn vertical_chrome(&self) -> u16 {
        2 + 2 * self.padding_rows
    }
}
