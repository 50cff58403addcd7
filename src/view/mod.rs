//! Terminal output (impure shell)
//!
//! Nothing here owns the screen: boxes are laid out off-screen in a ratatui
//! buffer and then streamed to stdout as ordinary scrolling text, so the
//! output stays in the user's scrollback like any other command.

pub mod frame;
pub mod panel;
pub mod preview;
mod styles;

pub use frame::{BorderStyle, FrameOptions};
pub use panel::{fact_paragraphs, joke_paragraphs, quote_paragraphs, render_box, Paragraphs};
pub use styles::{ColorConfig, ContentStyles, Tone};

use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier, Style};
use std::io::{self, Stdout, Write};
use styles::{to_terminal_attributes, to_terminal_color};
use unicode_width::UnicodeWidthStr;

/// Width assumed when stdout is not a terminal.
pub const FALLBACK_COLUMNS: u16 = 80;

/// Styled writer for everything a command prints.
pub struct Output<W: Write> {
    out: W,
    colors: ColorConfig,
    columns: u16,
}

impl Output<Stdout> {
    /// Stdout, sized to the current terminal.
    pub fn stdout(colors: ColorConfig) -> Self {
        let columns = crossterm::terminal::size()
            .map(|(cols, _)| cols)
            .unwrap_or(FALLBACK_COLUMNS);
        Self::new(io::stdout(), colors, columns)
    }
}

impl<W: Write> Output<W> {
    /// Writer for `out`, wrapping boxes at `columns`.
    pub fn new(out: W, colors: ColorConfig, columns: u16) -> Self {
        Self {
            out,
            colors,
            columns,
        }
    }

    /// Whether styles are emitted.
    pub fn colors(&self) -> ColorConfig {
        self.colors
    }

    /// Terminal width used for boxes and previews.
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// One line of text in a semantic tone.
    pub fn notice(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.styled(text, tone.style())?;
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Unstyled line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print("\n"))?;
        self.out.flush()
    }

    /// `label` unstyled followed by `value` in `tone`.
    pub fn labeled(&mut self, label: &str, value: &str, tone: Tone) -> io::Result<()> {
        queue!(self.out, Print(label))?;
        self.notice(tone, value)
    }

    /// Text without a trailing newline, for prompts.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.styled(text, Style::default())?;
        self.out.flush()
    }

    /// Empty line.
    pub fn blank_line(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Decorated box around `content`, with the frame's margins.
    pub fn boxed(&mut self, content: &Paragraphs, frame: &FrameOptions) -> io::Result<()> {
        let buffer = render_box(content, frame, self.columns);
        for _ in 0..frame.margin_rows {
            queue!(self.out, Print("\n"))?;
        }
        write_buffer(&buffer, &mut self.out, self.colors, frame.margin_cols)?;
        for _ in 0..frame.margin_rows {
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }

    /// Half-block preview at half the terminal width. Skipped without colors.
    pub fn preview(&mut self, image: &image::RgbaImage) -> io::Result<()> {
        if !self.colors.colors_enabled() {
            return Ok(());
        }
        preview::write_preview(&mut self.out, image, self.columns / 2)
    }

    fn styled(&mut self, text: &str, style: Style) -> io::Result<()> {
        if self.colors.colors_enabled() {
            apply_style(&mut self.out, style)?;
            queue!(self.out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
        } else {
            queue!(self.out, Print(text))
        }
    }
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(to_terminal_color(fg)))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(to_terminal_color(bg)))?;
    }
    for attribute in to_terminal_attributes(style.add_modifier) {
        queue!(out, SetAttribute(attribute))?;
    }
    Ok(())
}

/// Stream `buffer` as lines of text, each indented by `indent` spaces.
///
/// Consecutive cells with the same style share one set of escape codes.
/// Continuation cells behind wide glyphs are skipped. Trailing blank cells
/// are dropped so plain output has no trailing whitespace.
pub fn write_buffer<W: Write>(
    buffer: &Buffer,
    out: &mut W,
    colors: ColorConfig,
    indent: u16,
) -> io::Result<()> {
    let area = buffer.area();
    let padding = " ".repeat(usize::from(indent));

    for y in area.top()..area.bottom() {
        let last = (area.left()..area.right())
            .rev()
            .find(|&x| buffer[(x, y)].symbol() != " ")
            .map(|x| x + 1)
            .unwrap_or(area.left());

        queue!(out, Print(&padding))?;
        let mut current: Option<(Color, Color, Modifier)> = None;
        let mut skip = 0;

        for x in area.left()..last {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let cell = &buffer[(x, y)];
            let symbol = cell.symbol();
            skip = symbol.width().saturating_sub(1);

            if colors.colors_enabled() {
                let key = (cell.fg, cell.bg, cell.modifier);
                if current != Some(key) {
                    if current.is_some() {
                        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                    }
                    let style = Style::default()
                        .fg(cell.fg)
                        .bg(cell.bg)
                        .add_modifier(cell.modifier);
                    apply_style(out, style)?;
                    current = Some(key);
                }
            }
            queue!(out, Print(symbol))?;
        }

        if current.is_some() {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}
