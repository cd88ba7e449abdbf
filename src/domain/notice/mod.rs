// SPDX-License-Identifier: MPL-2.0
//! Notice domain types.
//!
//! - [`NoticeIndex`]: process-unique identity of a notice
//! - [`AutoClose`]: when (if ever) a notice closes on its own
//! - [`NoticeKind`]: visual category with icon fallback
//! - [`NoticeState`]: lifecycle state machine

mod kind;
mod newtypes;
mod state;

pub use kind::NoticeKind;
pub use newtypes::{auto_close_bounds, AutoClose, NoticeIndex};
pub use state::{NoticeState, Transition};
