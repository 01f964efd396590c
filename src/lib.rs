// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # Quickread
//!
//! A terminal speed reader.
//!
//! Quickread prints a text file one word at a time at a chosen pace:
//! - The active word is highlighted, read words stay on screen
//! - Speed is in characters per minute and adjustable while reading
//! - Quitting truncates the file to the unread text, so the next run
//!   continues where this one stopped
//!
//! ## Architecture
//!
//! The reading loop uses The Elm Architecture (TEA) pattern:
//! - **Model**: Text cursor, word timer and phase
//! - **Message**: Ticks and control keys
//! - **Update**: Pure state transitions
//! - **Output**: Inline ANSI rendering driven by phase changes
//!
//! ## Modules
//!
//! - [`app`]: Speed prompt, reading loop and rendering
//! - [`text`]: UTF-8 symbol scanning and word tokenizing
//! - [`pacing`]: Speed and per-word display timing
//! - [`progress`]: Reading the file and saving what is left
//! - [`terminal`]: Raw mode and key input
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod pacing;
pub mod progress;
pub mod terminal;
pub mod text;
