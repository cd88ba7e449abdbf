// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// History Capacity Bounds
// =============================================================================

/// Event history bounds (100 to 10000 events).
pub mod history_capacity_bounds {
    /// Smallest history worth keeping.
    pub const MIN: usize = 100;
    /// Largest history the collector will allocate.
    pub const MAX: usize = 10_000;
    /// Default history size.
    pub const DEFAULT: usize = 1000;
}

// =============================================================================
// HistoryCapacity
// =============================================================================

/// Number of lifecycle events retained by the diagnostics collector.
///
/// Always within [`history_capacity_bounds::MIN`]..=[`history_capacity_bounds::MAX`];
/// out-of-range requests are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(history_capacity_bounds::MIN, history_capacity_bounds::MAX))
    }

    /// Returns the number of events.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_capacity_bounds::DEFAULT)
    }
}
