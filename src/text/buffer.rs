use std::ops::Range;

use super::{is_separator, symbol_byte_length};

/// A word located in the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    /// Byte offset of the first symbol.
    pub start: usize,
    /// Length of the word in bytes.
    pub byte_len: usize,
    /// Number of symbols (decoded characters) in the word.
    pub symbols: usize,
}

impl Word {
    /// Byte range of the word within its buffer.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.byte_len
    }
}

/// The file contents plus a byte cursor that only moves forward.
///
/// The cursor always sits on a symbol boundary (or at the end of the
/// buffer), since every advance steps a whole symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl TextBuffer {
    /// Create a buffer with the cursor at the start.
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Total length in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current byte offset of the cursor.
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor reached the end of the buffer.
    pub const fn is_exhausted(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// Everything after the cursor.
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.cursor..]
    }

    /// Bytes within `range`, clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        let end = range.end.min(self.bytes.len());
        let start = range.start.min(end);
        &self.bytes[start..end]
    }

    /// Bytes of a word produced by this buffer.
    pub fn word_bytes(&self, word: Word) -> &[u8] {
        self.slice(word.range())
    }

    /// Advance over a run of separators and return the consumed span.
    ///
    /// The span is echoed verbatim so the original spacing and line
    /// breaks survive on screen.
    pub fn skip_whitespace(&mut self) -> Range<usize> {
        let start = self.cursor;
        self.cursor = skip_separators(&self.bytes, start);
        start..self.cursor
    }

    /// Advance over one word, stepping whole symbols.
    ///
    /// Returns `None` when the cursor is at the end of the buffer or at a
    /// separator (call [`skip_whitespace`](Self::skip_whitespace) first).
    pub fn next_word(&mut self) -> Option<Word> {
        let start = self.cursor;
        let (end, symbols) = scan_word(&self.bytes, start);
        if symbols == 0 {
            return None;
        }
        self.cursor = end;
        Some(Word {
            start,
            byte_len: end - start,
            symbols,
        })
    }
}

/// Offset of the first non-separator byte at or after `pos`.
pub(super) fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|&byte| is_separator(byte)) {
        pos += 1;
    }
    pos
}

/// End offset and symbol count of the word starting at `pos`.
pub(super) fn scan_word(bytes: &[u8], mut pos: usize) -> (usize, usize) {
    let mut symbols = 0;
    while let Some(&byte) = bytes.get(pos) {
        if is_separator(byte) {
            break;
        }
        // A truncated symbol at the very end is clamped to the buffer.
        pos = (pos + symbol_byte_length(byte)).min(bytes.len());
        symbols += 1;
    }
    (pos, symbols)
}
