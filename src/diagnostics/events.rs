// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for notice lifecycle tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// A lifecycle event with the moment it was recorded.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock).
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// What happened to a notice.
///
/// Indices are stored as raw `u64` so the serialized form stays flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A notice was created and handed to the presenter.
    Opened {
        index: u64,
        kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        external_id: Option<String>,
        /// Auto-close delay, absent when the notice never closes by itself.
        #[serde(skip_serializing_if = "Option::is_none")]
        auto_close_ms: Option<u64>,
    },

    /// Opening a notice forced out an older one holding the same external id.
    Replaced {
        previous: u64,
        replacement: u64,
        external_id: String,
    },

    /// A close was started.
    Closed { index: u64, immediate: bool },

    /// The auto-close timer fired and started a graceful close.
    AutoClosed { index: u64 },

    /// The notice's record was deleted.
    Removed { index: u64 },

    /// A timer fired for a notice that had already closed or been replaced.
    StaleTimer { index: u64 },

    /// An animation-complete event arrived for a notice not in the exiting state.
    StaleAnimation { index: u64 },

    /// A user callback panicked; the panic was contained.
    CallbackPanicked {
        index: u64,
        event: String,
        message: String,
    },
}

impl DiagnosticEventKind {
    /// Returns the snake_case name used as the serialized `type` tag.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::Replaced { .. } => "replaced",
            Self::Closed { .. } => "closed",
            Self::AutoClosed { .. } => "auto_closed",
            Self::Removed { .. } => "removed",
            Self::StaleTimer { .. } => "stale_timer",
            Self::StaleAnimation { .. } => "stale_animation",
            Self::CallbackPanicked { .. } => "callback_panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opened_event_omits_absent_fields() {
        let kind = DiagnosticEventKind::Opened {
            index: 4,
            kind: "info".to_string(),
            external_id: None,
            auto_close_ms: None,
        };
        let json = serde_json::to_string(&kind).expect("serialization should succeed");
        assert_eq!(json, r#"{"type":"opened","index":4,"kind":"info"}"#);
    }

    #[test]
    fn tag_matches_type_name() {
        let kinds = [
            DiagnosticEventKind::Closed {
                index: 1,
                immediate: true,
            },
            DiagnosticEventKind::StaleTimer { index: 2 },
            DiagnosticEventKind::CallbackPanicked {
                index: 3,
                event: "close".to_string(),
                message: "boom".to_string(),
            },
        ];
        for kind in kinds {
            let value = serde_json::to_value(&kind).expect("serialization should succeed");
            assert_eq!(value["type"], kind.type_name());
        }
    }

    #[test]
    fn replaced_event_deserializes() {
        let json = r#"{"type":"replaced","previous":0,"replacement":1,"external_id":"a"}"#;
        let kind: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");
        assert_eq!(
            kind,
            DiagnosticEventKind::Replaced {
                previous: 0,
                replacement: 1,
                external_id: "a".to_string(),
            }
        );
    }
}
