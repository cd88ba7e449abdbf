// SPDX-License-Identifier: MPL-2.0
//! Notice newtypes.
//!
//! This module provides type-safe wrappers for notice identity and
//! auto-close timing.

use std::fmt;
use std::time::Duration;

// =============================================================================
// NoticeIndex
// =============================================================================

/// Identity of a notice, unique for the lifetime of its manager.
///
/// Indices are handed out in strictly increasing order and never reused,
/// so a stale index can only ever refer to a notice that is already gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeIndex(u64);

impl NoticeIndex {
    /// Wraps a raw index value.
    ///
    /// Presenters use this to turn an index read back from a visual element
    /// (e.g. a `data-index` attribute) into a typed index.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw index value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the index that follows this one.
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NoticeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Auto-Close Bounds
// =============================================================================

/// Auto-close timing constants.
pub mod auto_close_bounds {
    /// Default auto-close delay in milliseconds.
    pub const DEFAULT_MS: i64 = 5000;
    /// Shortest delay produced by [`super::AutoClose::reading_time`].
    pub const READING_MIN_MS: u64 = 5000;
    /// Reading allowance per character of title and message.
    pub const READING_MS_PER_CHAR: u64 = 100;
}

// =============================================================================
// AutoClose
// =============================================================================

/// Whether a notice closes itself, and after how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoClose {
    /// The notice stays until closed explicitly.
    Never,
    /// A graceful close is issued once the duration has elapsed.
    After(Duration),
}

impl AutoClose {
    /// Interprets a millisecond count; zero or negative disables auto-close.
    #[must_use]
    pub fn from_millis(ms: i64) -> Self {
        match u64::try_from(ms) {
            Ok(ms) if ms > 0 => Self::After(Duration::from_millis(ms)),
            _ => Self::Never,
        }
    }

    /// Derives a delay from the amount of text the user has to read.
    ///
    /// Allows 100ms per character of title and message, but never less than
    /// five seconds.
    #[must_use]
    pub fn reading_time(title: &str, message: &str) -> Self {
        let chars = (title.chars().count() + message.chars().count()) as u64;
        let ms = chars
            .saturating_mul(auto_close_bounds::READING_MS_PER_CHAR)
            .max(auto_close_bounds::READING_MIN_MS);
        Self::After(Duration::from_millis(ms))
    }

    /// Returns the delay, or `None` when auto-close is disabled.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After(d) if d.is_zero() => None,
            Self::After(d) => Some(d),
        }
    }
}

impl Default for AutoClose {
    fn default() -> Self {
        Self::from_millis(auto_close_bounds::DEFAULT_MS)
    }
}
