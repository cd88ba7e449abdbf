// SPDX-License-Identifier: MPL-2.0
//! The visual side of a notice, as seen by the manager.
//!
//! A [`Presenter`] owns whatever actually draws notices (DOM nodes, widgets,
//! terminal cells). The manager tells it what to show and the presenter
//! reports back the two things only it can observe: animations finishing and
//! the user clicking.

use super::manager::NoticeManager;
use super::options::NoticeContent;
use crate::domain::notice::NoticeIndex;

/// Everything a presenter needs to mount a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub index: NoticeIndex,
    pub external_id: Option<String>,
    pub content: NoticeContent,
    /// Whether to play an entrance animation.
    pub animation: bool,
}

/// Rendering collaborator of [`NoticeManager`].
///
/// The manager never calls a presenter while holding any internal borrow, so
/// implementations may call back into the manager from any method. Such
/// calls are queued and take effect before the outermost manager call
/// returns.
pub trait Presenter {
    /// Renders a new notice.
    ///
    /// When the entrance animation ends (or immediately, without one), the
    /// presenter calls [`NoticeManager::notify_entrance_complete`].
    fn mount(&mut self, notice: &NoticeView, manager: &NoticeManager);

    /// Starts the exit animation for `index`.
    ///
    /// The presenter detaches the element when the animation ends and must
    /// then call [`NoticeManager::notify_animation_complete`] exactly once.
    fn play_exit(&mut self, index: NoticeIndex, manager: &NoticeManager);

    /// Detaches the element for `index` right away, without animation.
    /// An element that is already gone is ignored.
    fn remove(&mut self, index: NoticeIndex);

    fn update_title(&mut self, index: NoticeIndex, title: &str);

    fn update_message(&mut self, index: NoticeIndex, message: &str);
}

/// A raw user interaction forwarded by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Click on the notice body; fires the click callback only.
    Click,
    /// Click on the close control; closes the notice gracefully.
    CloseClick,
}

/// Part of a notice that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Body,
    CloseButton,
}

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickModifiers {
    pub shift: bool,
}

/// Routes a click resolved by a delegated listener to the manager.
///
/// Shift-clicking any close button closes every notice.
pub fn dispatch_click(
    manager: &NoticeManager,
    index: NoticeIndex,
    target: PointerTarget,
    modifiers: ClickModifiers,
) {
    match (target, modifiers.shift) {
        (PointerTarget::CloseButton, true) => manager.close_all(),
        (PointerTarget::CloseButton, false) => {
            manager.trigger_interaction(index, Interaction::CloseClick);
        }
        (PointerTarget::Body, _) => manager.trigger_interaction(index, Interaction::Click),
    }
}
