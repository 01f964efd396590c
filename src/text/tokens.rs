use super::buffer::{scan_word, skip_separators};

/// A run of bytes produced by [`tokens`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Consecutive spaces and newlines.
    Whitespace(&'a [u8]),
    /// A maximal run of non-separator symbols.
    Word { bytes: &'a [u8], symbols: usize },
}

impl<'a> Token<'a> {
    pub const fn bytes(&self) -> &'a [u8] {
        match self {
            Token::Whitespace(bytes) | Token::Word { bytes, .. } => bytes,
        }
    }
}

/// Iterator over the whitespace and word runs of a byte slice.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// Split `bytes` into alternating whitespace and word runs.
///
/// Concatenating the bytes of every token reproduces the input exactly.
pub fn tokens(bytes: &[u8]) -> Tokens<'_> {
    Tokens { bytes, pos: 0 }
}

/// Number of words in `bytes`.
pub fn count_words(bytes: &[u8]) -> usize {
    tokens(bytes)
        .filter(|token| matches!(token, Token::Word { .. }))
        .count()
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let end = skip_separators(self.bytes, start);
        if end > start {
            self.pos = end;
            return Some(Token::Whitespace(&self.bytes[start..end]));
        }
        let (end, symbols) = scan_word(self.bytes, start);
        if symbols == 0 {
            return None;
        }
        self.pos = end;
        Some(Token::Word {
            bytes: &self.bytes[start..end],
            symbols,
        })
    }
}
