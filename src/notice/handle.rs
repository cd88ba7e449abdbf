// SPDX-License-Identifier: MPL-2.0
//! Caller-held control surface for a single notice.

use super::manager::{CloseMode, WeakNoticeManager};
use crate::domain::notice::{NoticeIndex, NoticeState};

/// A handle to one notice.
///
/// The handle does not own the notice or keep the manager alive. Once the
/// notice is removed, or the manager dropped, every operation is a no-op.
#[derive(Debug, Clone)]
pub struct NoticeHandle {
    index: NoticeIndex,
    manager: WeakNoticeManager,
}

impl NoticeHandle {
    pub(crate) fn new(index: NoticeIndex, manager: WeakNoticeManager) -> Self {
        Self { index, manager }
    }

    #[must_use]
    pub fn index(&self) -> NoticeIndex {
        self.index
    }

    /// Starts the exit animation.
    pub fn close_graceful(&self) {
        if let Some(manager) = self.manager.upgrade() {
            manager.close(self.index, CloseMode::Graceful);
        }
    }

    /// Detaches the notice right away.
    pub fn close_immediate(&self) {
        if let Some(manager) = self.manager.upgrade() {
            manager.close(self.index, CloseMode::Immediate);
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        if let Some(manager) = self.manager.upgrade() {
            manager.set_title(self.index, title);
        }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        if let Some(manager) = self.manager.upgrade() {
            manager.set_message(self.index, message);
        }
    }

    /// Current state, or `None` when the manager is gone.
    #[must_use]
    pub fn state(&self) -> Option<NoticeState> {
        self.manager
            .upgrade()
            .and_then(|manager| manager.state(self.index))
    }

    /// Returns true while the notice is tracked by a live manager.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.manager
            .upgrade()
            .is_some_and(|manager| manager.contains(self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{ManualScheduler, NoticeManager, NoticeOptions};
    use crate::test_utils::RecordingPresenter;
    use std::rc::Rc;

    fn manager() -> NoticeManager {
        NoticeManager::new(RecordingPresenter::new(), Rc::new(ManualScheduler::new()))
    }

    #[test]
    fn handle_controls_its_notice() {
        let manager = manager();
        let index = manager.open(NoticeOptions::new("body").title("title"));
        let handle = manager.handle(index);

        handle.set_title("renamed");
        handle.set_message("updated");
        assert_eq!(manager.title(index).as_deref(), Some("renamed"));
        assert_eq!(manager.message(index).as_deref(), Some("updated"));

        handle.close_graceful();
        assert_eq!(handle.state(), Some(NoticeState::Exiting));
        assert!(handle.is_live());

        handle.close_immediate();
        assert!(!handle.is_live());
        assert_eq!(handle.state(), Some(NoticeState::Removed));
    }

    #[test]
    fn handle_to_removed_notice_is_inert() {
        let manager = manager();
        let index = manager.open(NoticeOptions::new("x"));
        let handle = manager.handle(index);
        manager.close(index, CloseMode::Immediate);

        let other = manager.open(NoticeOptions::new("y"));
        handle.set_title("ghost");
        handle.close_immediate();
        assert!(manager.contains(other));
        assert_eq!(manager.title(other).as_deref(), Some(""));
    }

    #[test]
    fn handle_outliving_manager_is_inert() {
        let manager = manager();
        let index = manager.open(NoticeOptions::new("x"));
        let handle = manager.handle(index);
        drop(manager);

        handle.close_graceful();
        handle.set_message("late");
        assert_eq!(handle.state(), None);
        assert!(!handle.is_live());
    }
}
