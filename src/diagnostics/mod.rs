// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording notice lifecycle events.
//!
//! The notice manager reports what happens to each notice (opened,
//! replaced, closed, removed) and every race it resolves (stale timers,
//! late animation events, panicking callbacks). Events travel through a
//! non-blocking channel into a memory-bounded ring buffer and can be
//! exported as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped lifecycle event
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: Receiver and cheap sender

mod buffer;
mod collector;
mod events;
mod report;

pub use crate::domain::diagnostics::HistoryCapacity;
pub use buffer::CircularBuffer;
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
