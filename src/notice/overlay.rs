// SPDX-License-Identifier: MPL-2.0
//! In-memory presenter that models the notice stack without drawing it.
//!
//! [`HeadlessOverlay`] keeps one element per mounted notice, newest first,
//! with the style classes a real overlay would put on it. Animations are
//! timers on the shared [`Scheduler`]; when one ends the overlay reports back
//! to the manager exactly like a rendering presenter would.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::manager::{NoticeManager, WeakNoticeManager};
use super::options::NoticeIcon;
use super::presenter::{dispatch_click, ClickModifiers, NoticeView, PointerTarget, Presenter};
use super::scheduler::{Scheduler, TimerId};
use crate::config::{DEFAULT_ENTER_ANIMATION_MS, DEFAULT_EXIT_ANIMATION_MS};
use crate::domain::notice::NoticeIndex;

const BASE_CLASS: &str = "aura-notice";
const ENTER_CLASS: &str = "aura-notice-enter";
const EXIT_CLASS: &str = "aura-notice-exit";

/// Entrance and exit animation lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTiming {
    pub enter: Duration,
    pub exit: Duration,
}

impl Default for OverlayTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(DEFAULT_ENTER_ANIMATION_MS),
            exit: Duration::from_millis(DEFAULT_EXIT_ANIMATION_MS),
        }
    }
}

/// Which animation, if any, an element is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPhase {
    Entering,
    Idle,
    Exiting,
}

/// Snapshot of one mounted notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayElement {
    pub index: NoticeIndex,
    pub external_id: Option<String>,
    pub kind: String,
    pub custom_class: String,
    pub icon: String,
    /// True when `icon` is raw markup rather than text.
    pub icon_is_markup: bool,
    pub title: String,
    pub message: String,
    pub width: Option<String>,
    pub phase: ElementPhase,
}

impl OverlayElement {
    fn from_view(view: &NoticeView, phase: ElementPhase) -> Self {
        let content = &view.content;
        let (icon, icon_is_markup) = match content.resolved_icon() {
            NoticeIcon::Markup(markup) => (markup.to_string(), true),
            NoticeIcon::Text(text) => (text.to_string(), false),
        };
        Self {
            index: view.index,
            external_id: view.external_id.clone(),
            kind: content.kind.as_str().to_string(),
            custom_class: content.custom_class.clone(),
            icon,
            icon_is_markup,
            title: content.title.clone(),
            message: content.message.clone(),
            width: content.width.clone(),
            phase,
        }
    }

    /// Style classes in the order a markup overlay would emit them.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec![BASE_CLASS.to_string(), format!("{BASE_CLASS}-{}", self.kind)];
        classes.extend(self.custom_class.split_whitespace().map(str::to_string));
        match self.phase {
            ElementPhase::Entering => classes.push(ENTER_CLASS.to_string()),
            ElementPhase::Exiting => classes.push(EXIT_CLASS.to_string()),
            ElementPhase::Idle => {}
        }
        classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }
}

impl fmt::Display for OverlayElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.icon, self.kind)?;
        if !self.title.is_empty() {
            write!(f, " {}:", self.title)?;
        }
        write!(f, " {}", self.message)
    }
}

#[derive(Default)]
struct OverlayState {
    /// Newest first.
    elements: Vec<OverlayElement>,
    /// Pending animation timer per element.
    timers: HashMap<NoticeIndex, TimerId>,
    manager: WeakNoticeManager,
}

impl OverlayState {
    fn element_mut(&mut self, index: NoticeIndex) -> Option<&mut OverlayElement> {
        self.elements.iter_mut().find(|element| element.index == index)
    }

    fn detach(&mut self, index: NoticeIndex) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| element.index != index);
        self.elements.len() != before
    }
}

/// Presenter that tracks notices in memory.
///
/// Clones share the same element stack, so a host can hand one clone to the
/// manager and keep another for inspection and click dispatch.
#[derive(Clone)]
pub struct HeadlessOverlay {
    state: Rc<RefCell<OverlayState>>,
    scheduler: Rc<dyn Scheduler>,
    timing: OverlayTiming,
}

impl HeadlessOverlay {
    pub fn new(scheduler: Rc<dyn Scheduler>, timing: OverlayTiming) -> Self {
        Self {
            state: Rc::new(RefCell::new(OverlayState::default())),
            scheduler,
            timing,
        }
    }

    #[must_use]
    pub fn timing(&self) -> OverlayTiming {
        self.timing
    }

    /// Elements currently attached, newest first.
    #[must_use]
    pub fn elements(&self) -> Vec<OverlayElement> {
        self.state.borrow().elements.clone()
    }

    #[must_use]
    pub fn element(&self, index: NoticeIndex) -> Option<OverlayElement> {
        self.state
            .borrow()
            .elements
            .iter()
            .find(|element| element.index == index)
            .cloned()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.state.borrow().elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().elements.is_empty()
    }

    /// Simulates a click landing on an attached element.
    ///
    /// Clicks on elements that are not attached are dropped, as a delegated
    /// listener would never see them.
    pub fn click(&self, index: NoticeIndex, target: PointerTarget, modifiers: ClickModifiers) {
        let manager = {
            let state = self.state.borrow();
            if !state.elements.iter().any(|element| element.index == index) {
                return;
            }
            state.manager.upgrade()
        };
        if let Some(manager) = manager {
            dispatch_click(&manager, index, target, modifiers);
        }
    }

    fn cancel_animation(&self, index: NoticeIndex) {
        let timer = self.state.borrow_mut().timers.remove(&index);
        if let Some(timer) = timer {
            self.scheduler.cancel(timer);
        }
    }

    fn schedule_animation(
        &self,
        index: NoticeIndex,
        delay: Duration,
        finish: impl FnOnce(&Rc<RefCell<OverlayState>>) -> bool + 'static,
        report: impl FnOnce(&NoticeManager, NoticeIndex) + 'static,
        manager: &NoticeManager,
    ) {
        let state: Weak<RefCell<OverlayState>> = Rc::downgrade(&self.state);
        let manager = manager.downgrade();
        let timer = self.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                state.borrow_mut().timers.remove(&index);
                if finish(&state) {
                    if let Some(manager) = manager.upgrade() {
                        report(&manager, index);
                    }
                }
            }),
        );
        self.state.borrow_mut().timers.insert(index, timer);
    }
}

impl Presenter for HeadlessOverlay {
    fn mount(&mut self, notice: &NoticeView, manager: &NoticeManager) {
        let animate = notice.animation && !self.timing.enter.is_zero();
        let phase = if animate {
            ElementPhase::Entering
        } else {
            ElementPhase::Idle
        };
        {
            let mut state = self.state.borrow_mut();
            state.manager = manager.downgrade();
            state.detach(notice.index);
            state
                .elements
                .insert(0, OverlayElement::from_view(notice, phase));
        }

        if !animate {
            manager.notify_entrance_complete(notice.index);
            return;
        }
        let index = notice.index;
        self.schedule_animation(
            index,
            self.timing.enter,
            move |state| match state.borrow_mut().element_mut(index) {
                Some(element) if element.phase == ElementPhase::Entering => {
                    element.phase = ElementPhase::Idle;
                    true
                }
                _ => false,
            },
            NoticeManager::notify_entrance_complete,
            manager,
        );
    }

    fn play_exit(&mut self, index: NoticeIndex, manager: &NoticeManager) {
        self.cancel_animation(index);
        let attached = match self.state.borrow_mut().element_mut(index) {
            Some(element) => {
                element.phase = ElementPhase::Exiting;
                true
            }
            None => false,
        };

        if !attached {
            tracing::trace!(%index, "exit requested for detached element");
            manager.notify_animation_complete(index);
            return;
        }
        if self.timing.exit.is_zero() {
            self.state.borrow_mut().detach(index);
            manager.notify_animation_complete(index);
            return;
        }
        self.schedule_animation(
            index,
            self.timing.exit,
            move |state| {
                state.borrow_mut().detach(index);
                true
            },
            NoticeManager::notify_animation_complete,
            manager,
        );
    }

    fn remove(&mut self, index: NoticeIndex) {
        self.cancel_animation(index);
        self.state.borrow_mut().detach(index);
    }

    fn update_title(&mut self, index: NoticeIndex, title: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(index) {
            title.clone_into(&mut element.title);
        }
    }

    fn update_message(&mut self, index: NoticeIndex, message: &str) {
        if let Some(element) = self.state.borrow_mut().element_mut(index) {
            message.clone_into(&mut element.message);
        }
    }
}

impl fmt::Debug for HeadlessOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessOverlay")
            .field("elements", &self.count())
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notice::NoticeState;
    use crate::notice::{CloseMode, ManualScheduler, NoticeEvent, NoticeOptions};
    use std::cell::Cell;

    fn setup(timing: OverlayTiming) -> (NoticeManager, HeadlessOverlay, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let overlay = HeadlessOverlay::new(scheduler.clone(), timing);
        let manager = NoticeManager::new(overlay.clone(), scheduler.clone());
        (manager, overlay, scheduler)
    }

    #[test]
    fn mounted_element_carries_classes_icon_and_width() {
        let (manager, overlay, _) = setup(OverlayTiming::default());
        let index = manager.open(
            NoticeOptions::warning("disk almost full")
                .title("Storage")
                .custom_class("compact wide")
                .width("320px"),
        );

        let element = overlay.element(index).expect("element mounted");
        assert_eq!(
            element.classes(),
            vec!["aura-notice", "aura-notice-warn", "compact", "wide", "aura-notice-enter"]
        );
        assert_eq!(element.icon, "⚠️");
        assert!(!element.icon_is_markup);
        assert_eq!(element.width.as_deref(), Some("320px"));
        assert_eq!(element.to_string(), "⚠️ [warn] Storage: disk almost full");
    }

    #[test]
    fn markup_icon_is_flagged() {
        let (manager, overlay, _) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("x").icon("<svg/>"));
        let element = overlay.element(index).expect("element mounted");
        assert!(element.icon_is_markup);
        assert_eq!(element.icon, "<svg/>");
    }

    #[test]
    fn newest_element_comes_first() {
        let (manager, overlay, _) = setup(OverlayTiming::default());
        let first = manager.open(NoticeOptions::new("first"));
        let second = manager.open(NoticeOptions::new("second"));
        let order: Vec<_> = overlay.elements().iter().map(|e| e.index).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn entrance_animation_completes_after_enter_duration() {
        let (manager, overlay, scheduler) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("x").auto_close_ms(0));

        scheduler.advance(Duration::from_millis(299));
        assert_eq!(manager.state(index), Some(NoticeState::Entering));
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(manager.state(index), Some(NoticeState::Visible));
        assert!(!overlay.element(index).expect("attached").has_class(ENTER_CLASS));
    }

    #[test]
    fn without_animation_notice_is_visible_at_once() {
        let (manager, overlay, _) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("x").animation(false));
        assert_eq!(manager.state(index), Some(NoticeState::Visible));
        assert_eq!(overlay.element(index).map(|e| e.phase), Some(ElementPhase::Idle));
    }

    #[test]
    fn auto_close_plays_exit_then_removes() {
        let (manager, overlay, scheduler) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("x").auto_close_ms(1000));

        scheduler.advance(Duration::from_millis(1000));
        assert_eq!(manager.state(index), Some(NoticeState::Exiting));
        assert!(overlay.element(index).expect("still attached").has_class(EXIT_CLASS));

        scheduler.advance(Duration::from_millis(200));
        assert!(overlay.is_empty());
        assert!(manager.is_empty());
    }

    #[test]
    fn exit_during_entrance_cancels_entrance_timer() {
        let (manager, overlay, scheduler) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("x"));
        manager.close(index, CloseMode::Graceful);

        scheduler.advance(Duration::from_millis(200));
        assert!(overlay.is_empty());
        assert!(!manager.contains(index));
        assert_eq!(scheduler.advance(Duration::from_secs(10)), 0);
    }

    #[test]
    fn zero_exit_duration_removes_synchronously() {
        let timing = OverlayTiming {
            enter: Duration::ZERO,
            exit: Duration::ZERO,
        };
        let (manager, overlay, _) = setup(timing);
        let index = manager.open(NoticeOptions::new("x"));
        assert_eq!(manager.state(index), Some(NoticeState::Visible));

        manager.close(index, CloseMode::Graceful);
        assert!(overlay.is_empty());
        assert!(manager.is_empty());
    }

    #[test]
    fn immediate_close_detaches_and_cancels_exit() {
        let (manager, overlay, scheduler) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("x").auto_close_ms(0));
        let other = manager.open(NoticeOptions::new("y").auto_close_ms(0));
        scheduler.advance(Duration::from_millis(300));

        manager.close(index, CloseMode::Graceful);
        manager.close(index, CloseMode::Immediate);
        assert_eq!(overlay.count(), 1);
        assert_eq!(scheduler.pending(), 0);
        assert!(manager.contains(other));
    }

    #[test]
    fn content_updates_reach_the_element() {
        let (manager, overlay, _) = setup(OverlayTiming::default());
        let index = manager.open(NoticeOptions::new("uploading").title("Upload"));
        manager.set_message(index, "done");
        manager.set_title(index, "Upload complete");

        let element = overlay.element(index).expect("attached");
        assert_eq!(element.message, "done");
        assert_eq!(element.title, "Upload complete");
    }

    #[test]
    fn replacement_swaps_elements() {
        let (manager, overlay, _) = setup(OverlayTiming::default());
        manager.open(NoticeOptions::new("first").external_id("job"));
        let second = manager.open(NoticeOptions::new("second").external_id("job"));

        let elements = overlay.elements();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].index, second);
        assert_eq!(elements[0].message, "second");
    }

    #[test]
    fn clicks_route_through_dispatch() {
        let (manager, overlay, scheduler) = setup(OverlayTiming::default());
        let clicks = Rc::new(Cell::new(0));
        let sink = Rc::clone(&clicks);
        let index = manager.open(NoticeOptions::new("x").on_event(move |event, _| {
            if event == NoticeEvent::Click {
                sink.set(sink.get() + 1);
            }
        }));

        overlay.click(index, PointerTarget::Body, ClickModifiers::default());
        assert_eq!(clicks.get(), 1);
        assert_eq!(manager.state(index), Some(NoticeState::Entering));

        overlay.click(index, PointerTarget::CloseButton, ClickModifiers::default());
        assert_eq!(manager.state(index), Some(NoticeState::Exiting));

        scheduler.advance(Duration::from_millis(200));
        overlay.click(index, PointerTarget::Body, ClickModifiers::default());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn shift_click_on_close_closes_everything() {
        let (manager, overlay, scheduler) = setup(OverlayTiming::default());
        let first = manager.open(NoticeOptions::new("a"));
        manager.open(NoticeOptions::new("b"));
        manager.open(NoticeOptions::new("c"));

        overlay.click(first, PointerTarget::CloseButton, ClickModifiers { shift: true });
        assert!(overlay.elements().iter().all(|e| e.phase == ElementPhase::Exiting));

        scheduler.advance(Duration::from_millis(200));
        assert!(overlay.is_empty());
        assert!(manager.is_empty());
    }
}
