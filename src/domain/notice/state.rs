// SPDX-License-Identifier: MPL-2.0
//! Per-notice lifecycle state machine.
//!
//! ```text
//!            EntranceFinished
//!  Entering ─────────────────▶ Visible
//!     │                          │
//!     └──────── BeginExit ───────┤
//!                                ▼
//!                             Exiting ── ExitFinished ──▶ Removed
//!
//!  ForceRemove: Entering | Visible | Exiting ──▶ Removed
//! ```

/// Lifecycle state of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeState {
    /// Mounted, entrance animation still running.
    Entering,
    /// Fully shown.
    Visible,
    /// Exit animation running; removal happens when it completes.
    Exiting,
    /// Gone for good. Removed notices are never stored by the manager.
    Removed,
}

/// Events that move a notice through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The presenter finished the entrance animation.
    EntranceFinished,
    /// A graceful close started the exit animation.
    BeginExit,
    /// The presenter finished the exit animation.
    ExitFinished,
    /// An immediate close detached the notice.
    ForceRemove,
}

impl NoticeState {
    /// Applies a transition, returning `None` when it is not valid from the
    /// current state.
    #[must_use]
    pub fn apply(self, transition: Transition) -> Option<Self> {
        use NoticeState::{Entering, Exiting, Removed, Visible};
        match (self, transition) {
            (Entering, Transition::EntranceFinished) => Some(Visible),
            (Entering | Visible, Transition::BeginExit) => Some(Exiting),
            (Exiting, Transition::ExitFinished) => Some(Removed),
            (Entering | Visible | Exiting, Transition::ForceRemove) => Some(Removed),
            _ => None,
        }
    }

    /// Returns true for every state except [`NoticeState::Removed`].
    #[must_use]
    pub fn is_live(self) -> bool {
        self != Self::Removed
    }

    /// Returns true while a graceful close can still be started.
    #[must_use]
    pub fn is_closable(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }

    /// Title and message edits are only applied before the exit starts.
    #[must_use]
    pub fn accepts_content_updates(self) -> bool {
        self.is_closable()
    }
}
