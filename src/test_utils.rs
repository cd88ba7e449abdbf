// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::notice::NoticeIndex;
use crate::notice::{NoticeManager, NoticeView, Presenter};

/// One call received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Mount(NoticeIndex),
    PlayExit(NoticeIndex),
    Remove(NoticeIndex),
    UpdateTitle(NoticeIndex, String),
    UpdateMessage(NoticeIndex, String),
}

#[derive(Default)]
struct Recording {
    calls: Vec<PresenterCall>,
    views: Vec<NoticeView>,
}

/// Presenter that records every call and never animates on its own.
///
/// Clones share the same recording.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    recording: Rc<RefCell<Recording>>,
    finish_exits: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports exit completion from inside `play_exit`.
    pub fn finishing_exits_immediately(mut self) -> Self {
        self.finish_exits = true;
        self
    }

    pub fn calls(&self) -> Vec<PresenterCall> {
        self.recording.borrow().calls.clone()
    }

    pub fn last_view(&self) -> Option<NoticeView> {
        self.recording.borrow().views.last().cloned()
    }

    fn record(&self, call: PresenterCall) {
        self.recording.borrow_mut().calls.push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn mount(&mut self, notice: &NoticeView, _manager: &NoticeManager) {
        self.record(PresenterCall::Mount(notice.index));
        self.recording.borrow_mut().views.push(notice.clone());
    }

    fn play_exit(&mut self, index: NoticeIndex, manager: &NoticeManager) {
        self.record(PresenterCall::PlayExit(index));
        if self.finish_exits {
            manager.notify_animation_complete(index);
        }
    }

    fn remove(&mut self, index: NoticeIndex) {
        self.record(PresenterCall::Remove(index));
    }

    fn update_title(&mut self, index: NoticeIndex, title: &str) {
        self.record(PresenterCall::UpdateTitle(index, title.to_string()));
    }

    fn update_message(&mut self, index: NoticeIndex, message: &str) {
        self.record(PresenterCall::UpdateMessage(index, message.to_string()));
    }
}
