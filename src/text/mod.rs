//! Text scanning and word tokenizing.
//!
//! This module handles:
//! - Classifying UTF-8 leading bytes into symbol lengths
//! - Walking the file bytes with a monotonic byte cursor
//! - Splitting the stream into whitespace runs and word runs

mod buffer;
mod tokens;
mod utf8;

pub use buffer::{TextBuffer, Word};
pub use tokens::{Token, Tokens, count_words, tokens};
pub use utf8::symbol_byte_length;

/// Bytes that separate words. Everything else belongs to a word.
pub const fn is_separator(byte: u8) -> bool {
    byte == b' ' || byte == b'\n'
}
