// SPDX-License-Identifier: MPL-2.0
//! Domain layer - notice value types with ZERO external dependencies.
//!
//! Everything here is plain data plus the rules that govern it. The
//! lifecycle machinery in [`crate::notice`] builds on these types but none of
//! them know about presenters, schedulers or callbacks.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`HistoryCapacity`](diagnostics::HistoryCapacity))
//! - [`notice`]: Notice types ([`NoticeIndex`](notice::NoticeIndex),
//!   [`AutoClose`](notice::AutoClose), [`NoticeKind`](notice::NoticeKind),
//!   [`NoticeState`](notice::NoticeState))

pub mod diagnostics;
pub mod notice;
