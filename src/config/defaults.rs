// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Auto-close**: how long a notice stays before closing itself
//! - **Animation**: entrance and exit timing for the bundled overlay
//! - **Diagnostics**: lifecycle event history size

use crate::domain::diagnostics::history_capacity_bounds;
use crate::domain::notice::auto_close_bounds;

// ==========================================================================
// Auto-close Defaults
// ==========================================================================

/// Default auto-close delay in milliseconds (`<= 0` disables).
pub const DEFAULT_AUTO_CLOSE_MS: i64 = auto_close_bounds::DEFAULT_MS;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Whether notices play an entrance animation unless told otherwise.
pub const DEFAULT_ANIMATION: bool = true;

/// Default entrance animation length in milliseconds.
pub const DEFAULT_ENTER_ANIMATION_MS: u64 = 300;

/// Default exit animation length in milliseconds.
pub const DEFAULT_EXIT_ANIMATION_MS: u64 = 200;

/// Longest animation accepted from the configuration file.
pub const MAX_ANIMATION_MS: u64 = 5000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept in memory.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = history_capacity_bounds::DEFAULT;

/// Minimum number of lifecycle events kept in memory.
pub const MIN_DIAGNOSTICS_CAPACITY: usize = history_capacity_bounds::MIN;

/// Maximum number of lifecycle events kept in memory.
pub const MAX_DIAGNOSTICS_CAPACITY: usize = history_capacity_bounds::MAX;
