//! Word pacing.
//!
//! A word stays on screen for `60s * symbols / speed`, where speed is in
//! symbols per minute. [`Pacer`] accumulates unpaused time for the word on
//! screen and reports when that window has run out.

use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

const NANOS_PER_MINUTE: u128 = 60_000_000_000;

/// Reading speed in symbols (characters) per minute.
///
/// Always strictly positive, so the display window of a word is finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(NonZeroU32);

impl Speed {
    /// Amount added or removed by one speed key press.
    pub const STEP: u32 = 200;
    /// Lowest speed reachable by slowing down.
    pub const FLOOR: u32 = Self::STEP;

    /// A speed of `cpm` symbols per minute, or `None` for zero.
    pub const fn new(cpm: u32) -> Option<Self> {
        match NonZeroU32::new(cpm) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One step faster, saturating at `u32::MAX`.
    #[must_use]
    pub const fn faster(self) -> Self {
        Self(self.0.saturating_add(Self::STEP))
    }

    /// One step slower, never dropping below [`Speed::FLOOR`].
    ///
    /// A speed already at or below the floor is left as it is.
    #[must_use]
    pub fn slower(self) -> Self {
        let value = self.get();
        if value >= Self::FLOOR + Self::STEP {
            Self::new(value - Self::STEP).unwrap_or(self)
        } else {
            self
        }
    }

    /// How long a word of `symbols` symbols stays on screen.
    pub fn word_duration(self, symbols: usize) -> Duration {
        let nanos = NANOS_PER_MINUTE * symbols as u128 / u128::from(self.get());
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(NonZeroU32::new(1000).unwrap_or(NonZeroU32::MIN))
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cpm", self.get())
    }
}

/// Tracks how long the current word has been visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pacer {
    speed: Speed,
    elapsed: Duration,
    paused: bool,
}

impl Pacer {
    pub fn new(speed: Speed) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    pub const fn speed(&self) -> Speed {
        self.speed
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time the current word has been on screen, excluding pauses.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Account for `dt` of wall time. Ignored while paused.
    pub fn tick(&mut self, dt: Duration) {
        if !self.paused {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Whether a word of `symbols` symbols has used up its display window.
    ///
    /// Compared as `elapsed * speed >= 60s * symbols` in integer
    /// nanoseconds, so there is no rounding at the boundary.
    pub fn is_word_expired(&self, symbols: usize) -> bool {
        self.elapsed.as_nanos() * u128::from(self.speed.get())
            >= NANOS_PER_MINUTE * symbols as u128
    }

    /// Start timing the next word.
    pub const fn on_expire(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub const fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub const fn faster(&mut self) {
        self.speed = self.speed.faster();
    }

    pub fn slower(&mut self) {
        self.speed = self.speed.slower();
    }
}
