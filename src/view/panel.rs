//! Decorated content boxes.
//!
//! Content is a list of styled paragraphs. Each paragraph is wrapped to the
//! available width with the layout engine (measuring terminal cells), then
//! the whole box is laid out off-screen in a ratatui [`Buffer`] with a
//! bordered, padded [`Block`].

use super::frame::FrameOptions;
use super::styles::ContentStyles;
use crate::layout::{wrap_text, Measure};
use crate::model::{Fact, Joke, Quote};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

/// Terminal cell width as a layout measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellWidth;

impl Measure for CellWidth {
    fn width(&self, text: &str) -> f32 {
        text.width() as f32
    }
}

/// One styled paragraph of box content. An empty paragraph is a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraphs(Vec<(String, Style)>);

impl Paragraphs {
    /// No paragraphs.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a paragraph of `text` in `style`.
    pub fn push(mut self, text: impl Into<String>, style: Style) -> Self {
        self.0.push((text.into(), style));
        self
    }

    /// Append an empty line.
    pub fn blank(self) -> Self {
        self.push(String::new(), Style::default())
    }

    /// Wrap every paragraph to `width` cells.
    fn wrapped_lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (text, style) in &self.0 {
            for raw in text.split('\n') {
                // wrap_text accepts widths strictly below the limit
                let wrapped = wrap_text(raw, f32::from(width) + 1.0, &CellWidth);
                if wrapped.is_empty() {
                    lines.push(Line::default());
                }
                lines.extend(wrapped.into_iter().map(|l| Line::styled(l, *style)));
            }
        }
        lines
    }
}

impl Default for Paragraphs {
    fn default() -> Self {
        Self::new()
    }
}

/// `"text"` then `— author`.
pub fn quote_paragraphs(quote: &Quote) -> Paragraphs {
    Paragraphs::new()
        .push(format!("\"{}\"", quote.text), ContentStyles::quote())
        .blank()
        .push(format!("— {}", quote.author), ContentStyles::author())
}

/// `🤯 Fun Fact:` heading then the fact.
pub fn fact_paragraphs(fact: &Fact) -> Paragraphs {
    Paragraphs::new()
        .push("🤯 Fun Fact:", ContentStyles::fact_heading())
        .blank()
        .push(fact.text.clone(), ContentStyles::body())
}

/// `😂 Random Joke:` heading, then setup and punchline.
pub fn joke_paragraphs(joke: &Joke) -> Paragraphs {
    let base = Paragraphs::new()
        .push("😂 Random Joke:", ContentStyles::joke_heading())
        .blank();
    match joke {
        Joke::SetupPunchline { setup, punchline } => base
            .push(setup.clone(), ContentStyles::body())
            .blank()
            .push(punchline.clone(), ContentStyles::punchline()),
        Joke::OneLiner(text) => base.push(text.clone(), ContentStyles::body()),
    }
}

/// Lay out a box no wider than `max_width` columns, margins included.
///
/// Text is wrapped to fit, but a single word wider than the space left is
/// never cut: the box grows to hold it and the terminal may wrap the row.
/// The returned buffer holds only the bordered box; the caller adds margins
/// when printing.
pub fn render_box(content: &Paragraphs, frame: &FrameOptions, max_width: u16) -> Buffer {
    let available = max_width
        .saturating_sub(frame.horizontal_chrome() + 2 * frame.margin_cols)
        .max(1);

    // A word wider than `available` keeps its own line and widens the box.
    let lines = content.wrapped_lines(available);
    let widest = lines.iter().map(Line::width).max().unwrap_or(0).max(1);
    let content_width = u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .min(u16::MAX - frame.horizontal_chrome());
    let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let area = Rect::new(
        0,
        0,
        content_width + frame.horizontal_chrome(),
        content_height.saturating_add(frame.vertical_chrome()),
    );
    let mut buffer = Buffer::empty(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(frame.border.symbols())
        .border_style(Style::default().fg(frame.color))
        .padding(Padding::new(
            frame.padding_cols,
            frame.padding_cols,
            frame.padding_rows,
            frame.padding_rows,
        ));

    Paragraph::new(Text::from(lines))
        .block(block)
        .render(area, &mut buffer);

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::frame::BorderStyle;
    use ratatui::style::Color;

    /// Convert a ratatui buffer to a string representation for snapshot testing.
    ///
    /// Empty trailing lines are removed and continuation cells of wide
    /// glyphs skipped.
    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area();
        let mut lines = Vec::new();

        for y in area.top()..area.bottom() {
            let mut line = String::new();
            let mut skip = 0;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = buffer[(x, y)].symbol();
                skip = symbol.width().saturating_sub(1);
                line.push_str(symbol);
            }
            let trimmed = line.trim_end();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        lines.join("\n")
    }

    fn classic() -> FrameOptions {
        FrameOptions::new(BorderStyle::Classic, Color::Red)
    }

    #[test]
    fn quote_box_snapshot() {
        let quote = Quote::new("Well done is better than well said.", "Benjamin Franklin");
        let buffer = render_box(&quote_paragraphs(&quote), &classic(), 80);

        insta::assert_snapshot!(buffer_to_string(&buffer), @r#"
+-------------------------------------------+
|                                           |
|   "Well done is better than well said."   |
|                                           |
|   — Benjamin Franklin                     |
|                                           |
+-------------------------------------------+
"#);
    }

    #[test]
    fn long_text_wraps_to_fit_terminal() {
        let fact = Fact::new("one two three four five six seven eight nine ten");
        // 30 columns: 6 margin + 8 chrome leaves 16 for text.
        let buffer = render_box(&fact_paragraphs(&fact), &classic(), 30);

        assert!(buffer.area().width <= 30 - 6);
        let text = buffer_to_string(&buffer);
        assert!(text.contains("|   one two three      |"), "got:\n{text}");
        assert!(text.contains("|   four five six      |"), "got:\n{text}");
    }

    #[test]
    fn over_wide_word_widens_box_instead_of_clipping() {
        let fact = Fact::new("see supercalifragilisticexpialidocious now");
        let buffer = render_box(&fact_paragraphs(&fact), &classic(), 30);

        let text = buffer_to_string(&buffer);
        assert!(
            text.contains("|   supercalifragilisticexpialidocious   |"),
            "got:\n{text}"
        );
        assert!(text.contains("|   see"), "got:\n{text}");
        assert!(text.contains("|   now"), "got:\n{text}");
        // 34-cell word + 8 chrome
        assert_eq!(buffer.area().width, 42);
    }

    #[test]
    fn box_height_counts_blank_lines() {
        let joke = Joke::two_part("Setup?", "Punchline!");
        let buffer = render_box(&joke_paragraphs(&joke), &classic(), 80);
        // heading, blank, setup, blank, punchline + 2 padding + 2 border
        assert_eq!(buffer.area().height, 9);
    }

    #[test]
    fn one_liner_joke_has_no_punchline_row() {
        let joke = Joke::OneLiner("Short.".to_string());
        let buffer = render_box(&joke_paragraphs(&joke), &classic(), 80);
        assert_eq!(buffer.area().height, 7);
    }

    #[test]
    fn border_cells_carry_frame_color() {
        let quote = Quote::new("Hi.", "Me");
        let frame = FrameOptions::new(BorderStyle::Double, Color::Magenta);
        let buffer = render_box(&quote_paragraphs(&quote), &frame, 80);

        let corner = &buffer[(0, 0)];
        assert_eq!(corner.symbol(), "╔");
        assert_eq!(corner.fg, Color::Magenta);
    }

    #[test]
    fn quote_text_keeps_its_style() {
        let quote = Quote::new("Hi.", "Me");
        let buffer = render_box(&quote_paragraphs(&quote), &classic(), 80);
        // border (1) + padding (3) puts the opening quote at x = 4, row 2
        let cell = &buffer[(4, 2)];
        assert_eq!(cell.symbol(), "\"");
        assert_eq!(cell.fg, Color::Green);
    }

    #[test]
    fn cell_width_counts_wide_glyphs() {
        assert_eq!(CellWidth.width("ab"), 2.0);
        assert_eq!(CellWidth.width("🤯"), 2.0);
    }
}
