//! Inline word output.
//!
//! The text is written to the terminal as it is read, not redrawn as a
//! screen: whitespace is echoed verbatim, the active word is printed
//! highlighted, and once its time is up it is printed again in place
//! without the highlight.

use std::io::{self, Write};

use crossterm::cursor::MoveLeft;
use crossterm::queue;
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthStr;

/// Foreground colour of the active word.
pub const HIGHLIGHT_COLOR: Color = Color::Green;

/// How the active word is set apart from the text already read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Color(Color),
    /// Used when colour is disabled.
    Bold,
}

/// Writes the reading stream to a terminal-like sink.
#[derive(Debug)]
pub struct Renderer<W: Write> {
    out: W,
    highlight: Highlight,
    width: Option<usize>,
    /// Cells used on the current row. Equal to `width` while the terminal
    /// holds a pending wrap.
    column: usize,
}

impl<W: Write> Renderer<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            highlight: Highlight::Color(HIGHLIGHT_COLOR),
            width: None,
            column: 0,
        }
    }

    /// Highlight with colour, or with bold text when disabled.
    #[must_use]
    pub const fn with_color(mut self, enabled: bool) -> Self {
        self.highlight = if enabled {
            Highlight::Color(HIGHLIGHT_COLOR)
        } else {
            Highlight::Bold
        };
        self
    }

    /// Terminal width used to break lines before words that don't fit.
    #[must_use]
    pub fn with_width(mut self, width: Option<u16>) -> Self {
        self.set_width(width);
        self
    }

    pub fn set_width(&mut self, width: Option<u16>) {
        self.width = width.map(usize::from).filter(|&w| w > 0);
        self.advance_column(0);
    }

    pub const fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub const fn column(&self) -> usize {
        self.column
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Echo skipped separators. Newlines are written as CR LF since raw
    /// mode turns off output post-processing.
    pub fn echo_whitespace(&mut self, bytes: &[u8]) -> io::Result<()> {
        for &byte in bytes {
            if byte == b'\n' {
                self.out.write_all(b"\r\n")?;
                self.column = 0;
            } else {
                self.out.write_all(&[byte])?;
                self.advance_column(1);
            }
        }
        Ok(())
    }

    /// Print the active word with the highlight.
    ///
    /// A blank placeholder as wide as the word goes out first, so a word
    /// that doesn't fit moves to the next row before it is drawn.
    pub fn show_word(&mut self, word: &[u8]) -> io::Result<()> {
        let word = drawn(word);
        let cells = display_width(word);
        self.break_line_if_needed(cells)?;
        if cells > 0 {
            self.out.write_all(" ".repeat(cells).as_bytes())?;
            queue!(self.out, MoveLeft(cells_u16(cells)))?;
        }
        self.begin_highlight()?;
        self.out.write_all(word)?;
        self.end_highlight()?;
        self.advance_column(cells);
        self.out.flush()
    }

    /// Reprint the word just shown, in place and without the highlight.
    pub fn settle_word(&mut self, word: &[u8]) -> io::Result<()> {
        let word = drawn(word);
        let cells = display_width(word);
        if cells > 0 {
            queue!(self.out, MoveLeft(cells_u16(cells)))?;
        }
        self.out.write_all(word)?;
        self.out.flush()
    }

    /// Print a full line of text below the reading stream.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        if self.column > 0 {
            self.out.write_all(b"\r\n")?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\r\n")?;
        self.column = 0;
        self.out.flush()
    }

    fn break_line_if_needed(&mut self, cells: usize) -> io::Result<()> {
        let Some(width) = self.width else {
            return Ok(());
        };
        // Keep the last column free: a placeholder ending there would
        // leave a pending wrap and the cursor retreat would land one short.
        if self.column > 0 && self.column + cells >= width {
            self.out.write_all(b"\r\n")?;
            self.column = 0;
        }
        Ok(())
    }

    fn advance_column(&mut self, cells: usize) {
        self.column += cells;
        if let Some(width) = self.width {
            while self.column > width {
                self.column -= width;
            }
        }
    }

    fn begin_highlight(&mut self) -> io::Result<()> {
        match self.highlight {
            Highlight::Color(color) => queue!(self.out, SetForegroundColor(color)),
            Highlight::Bold => queue!(self.out, SetAttribute(Attribute::Bold)),
        }
    }

    fn end_highlight(&mut self) -> io::Result<()> {
        match self.highlight {
            Highlight::Color(_) => queue!(self.out, ResetColor),
            Highlight::Bold => queue!(self.out, SetAttribute(Attribute::Reset)),
        }
    }
}

/// Terminal cells a word occupies. Invalid UTF-8 counts one cell per
/// replacement character.
pub fn display_width(word: &[u8]) -> usize {
    String::from_utf8_lossy(word).width()
}

/// The part of a word that is printed. A trailing CR from CRLF text would
/// send the cursor to the start of the row.
fn drawn(word: &[u8]) -> &[u8] {
    word.strip_suffix(b"\r").unwrap_or(word)
}

fn cells_u16(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}
