// SPDX-License-Identifier: MPL-2.0
//! Notice lifecycle management.
//!
//! The [`NoticeManager`] allocates indices, keeps the index → notice map,
//! arms and disarms auto-close timers, and enforces the lifecycle rules:
//!
//! - indices are never reused
//! - at most one live notice per external id; opening a duplicate forces the
//!   old one out first
//! - a removed notice has no map entry and no timer
//! - at most one pending auto-close timer per notice
//!
//! Registry changes happen synchronously inside each call. Presenter calls
//! and user callbacks are queued and run in order once the registry is
//! consistent, so callers and callbacks may re-enter the manager freely.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::handle::NoticeHandle;
use super::options::{NoticeCallback, NoticeContent, NoticeDefaults, NoticeEvent, NoticeOptions};
use super::presenter::{Interaction, NoticeView, Presenter};
use super::scheduler::{Scheduler, TimerId};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::notice::{NoticeIndex, NoticeState, Transition};

/// How a close removes the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseMode {
    /// Play the exit animation; the notice is deleted when it completes.
    Graceful,
    /// Detach and delete right away.
    Immediate,
}

struct NoticeRecord {
    external_id: Option<String>,
    state: NoticeState,
    content: NoticeContent,
    callback: Option<NoticeCallback>,
    timer: Option<TimerId>,
}

struct Registry {
    next_index: NoticeIndex,
    notices: BTreeMap<NoticeIndex, NoticeRecord>,
}

impl Registry {
    fn new() -> Self {
        Self {
            next_index: NoticeIndex::new(0),
            notices: BTreeMap::new(),
        }
    }

    fn allocate(&mut self) -> NoticeIndex {
        let index = self.next_index;
        self.next_index = index.next();
        index
    }
}

/// Outward side effects, run in FIFO order after registry updates.
enum Effect {
    Mount(NoticeView),
    PlayExit(NoticeIndex),
    Remove(NoticeIndex),
    UpdateTitle(NoticeIndex, String),
    UpdateMessage(NoticeIndex, String),
    Callback {
        index: NoticeIndex,
        event: NoticeEvent,
        callback: NoticeCallback,
    },
}

struct Inner {
    registry: RefCell<Registry>,
    presenter: RefCell<Box<dyn Presenter>>,
    scheduler: Rc<dyn Scheduler>,
    defaults: NoticeDefaults,
    effects: RefCell<VecDeque<Effect>>,
    draining: Cell<bool>,
    diagnostics: RefCell<Option<DiagnosticsHandle>>,
}

/// Resets the draining flag even if a presenter panics mid-drain.
struct DrainGuard<'a>(&'a Cell<bool>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owner of every notice and the single authority over their lifecycle.
///
/// Cloning is cheap and yields another handle to the same manager. The
/// manager is single-threaded: it is driven from UI events and timer
/// callbacks on one thread.
#[derive(Clone)]
pub struct NoticeManager {
    inner: Rc<Inner>,
}

/// Non-owning reference to a [`NoticeManager`].
///
/// Held by timers, handles and presenter listeners so they never keep the
/// manager alive on their own.
#[derive(Clone, Debug, Default)]
pub struct WeakNoticeManager {
    inner: Weak<Inner>,
}

impl WeakNoticeManager {
    #[must_use]
    pub fn upgrade(&self) -> Option<NoticeManager> {
        self.inner.upgrade().map(|inner| NoticeManager { inner })
    }
}

impl NoticeManager {
    /// Creates a manager with the built-in defaults (5s auto-close,
    /// entrance animation on).
    pub fn new<P>(presenter: P, scheduler: Rc<dyn Scheduler>) -> Self
    where
        P: Presenter + 'static,
    {
        Self::with_defaults(presenter, scheduler, NoticeDefaults::default())
    }

    /// Creates a manager whose unset options fall back to `defaults`.
    pub fn with_defaults<P>(presenter: P, scheduler: Rc<dyn Scheduler>, defaults: NoticeDefaults) -> Self
    where
        P: Presenter + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                registry: RefCell::new(Registry::new()),
                presenter: RefCell::new(Box::new(presenter)),
                scheduler,
                defaults,
                effects: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
                diagnostics: RefCell::new(None),
            }),
        }
    }

    /// Sets the diagnostics handle for recording lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        *self.inner.diagnostics.borrow_mut() = Some(handle);
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakNoticeManager {
        WeakNoticeManager {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns a handle bound to `index`. Handles to unknown indices are
    /// valid; every operation on them is a no-op.
    #[must_use]
    pub fn handle(&self, index: NoticeIndex) -> NoticeHandle {
        NoticeHandle::new(index, self.downgrade())
    }

    #[must_use]
    pub fn defaults(&self) -> NoticeDefaults {
        self.inner.defaults
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens a notice and returns its index.
    ///
    /// A live notice holding the same external id is closed immediately
    /// first. With a positive auto-close delay a timer is armed that closes
    /// the notice gracefully when it fires.
    pub fn open(&self, options: NoticeOptions) -> NoticeIndex {
        let NoticeOptions {
            content,
            external_id,
            auto_close,
            animation,
            callback,
        } = options;
        let auto_close = auto_close.unwrap_or(self.inner.defaults.auto_close);
        let animation = animation.unwrap_or(self.inner.defaults.animation);

        let index = self.inner.registry.borrow_mut().allocate();

        if let Some(id) = external_id.as_deref() {
            if let Some(previous) = self.find_by_external_id(id) {
                tracing::debug!(%previous, replacement = %index, external_id = id, "replacing notice");
                self.log(DiagnosticEventKind::Replaced {
                    previous: previous.value(),
                    replacement: index.value(),
                    external_id: id.to_string(),
                });
                self.begin_close(previous, CloseMode::Immediate);
            }
        }

        let view = NoticeView {
            index,
            external_id: external_id.clone(),
            content: content.clone(),
            animation,
        };
        self.log(DiagnosticEventKind::Opened {
            index: index.value(),
            kind: content.kind.to_string(),
            external_id: external_id.clone(),
            auto_close_ms: auto_close
                .duration()
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        });
        self.inner.registry.borrow_mut().notices.insert(
            index,
            NoticeRecord {
                external_id,
                state: NoticeState::Entering,
                content,
                callback,
                timer: None,
            },
        );

        if let Some(delay) = auto_close.duration() {
            let timer = self.schedule_auto_close(index, delay);
            if let Some(record) = self.inner.registry.borrow_mut().notices.get_mut(&index) {
                record.timer = Some(timer);
            }
        }
        tracing::debug!(%index, "notice opened");

        self.enqueue(Effect::Mount(view));
        self.run_effects();
        index
    }

    /// Closes a notice. Unknown indices are ignored.
    ///
    /// The close callback fires once, before the presenter is told to
    /// detach or animate. A graceful close of a notice already exiting does
    /// nothing; an immediate close of an exiting notice removes it without
    /// firing the callback again.
    pub fn close(&self, index: NoticeIndex, mode: CloseMode) {
        self.begin_close(index, mode);
        self.run_effects();
    }

    /// Closes the live notice holding `external_id`, if there is one.
    pub fn close_by_external_id(&self, external_id: &str, mode: CloseMode) {
        if let Some(index) = self.find_by_external_id(external_id) {
            self.close(index, mode);
        }
    }

    /// Gracefully closes every notice.
    ///
    /// Each notice is deleted when its own exit animation completes, so
    /// notices may still be present when this returns.
    pub fn close_all(&self) {
        for index in self.indices() {
            self.begin_close(index, CloseMode::Graceful);
        }
        self.run_effects();
    }

    /// Called by the presenter when the exit animation for `index` ends.
    ///
    /// Only deletes a notice that is exiting; late or duplicate reports for
    /// a notice that is already gone are ignored.
    pub fn notify_animation_complete(&self, index: NoticeIndex) {
        let removed = {
            let mut registry = self.inner.registry.borrow_mut();
            let finished = registry
                .notices
                .get(&index)
                .and_then(|record| record.state.apply(Transition::ExitFinished))
                .is_some();
            if finished {
                registry.notices.remove(&index);
            }
            finished
        };

        if removed {
            tracing::debug!(%index, "notice removed after exit animation");
            self.log(DiagnosticEventKind::Removed {
                index: index.value(),
            });
        } else {
            tracing::trace!(%index, "ignoring animation completion for notice not exiting");
            self.log(DiagnosticEventKind::StaleAnimation {
                index: index.value(),
            });
        }
    }

    /// Called by the presenter when the entrance animation for `index` ends.
    pub fn notify_entrance_complete(&self, index: NoticeIndex) {
        let mut registry = self.inner.registry.borrow_mut();
        if let Some(record) = registry.notices.get_mut(&index) {
            if let Some(state) = record.state.apply(Transition::EntranceFinished) {
                record.state = state;
            }
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Replaces the title of an entering or visible notice.
    pub fn set_title(&self, index: NoticeIndex, title: impl Into<String>) {
        let title = title.into();
        let applied = self.update_content(index, |content| content.title.clone_from(&title));
        if applied {
            self.enqueue(Effect::UpdateTitle(index, title));
            self.run_effects();
        }
    }

    /// Replaces the message of an entering or visible notice.
    pub fn set_message(&self, index: NoticeIndex, message: impl Into<String>) {
        let message = message.into();
        let applied = self.update_content(index, |content| content.message.clone_from(&message));
        if applied {
            self.enqueue(Effect::UpdateMessage(index, message));
            self.run_effects();
        }
    }

    /// Handles a user interaction reported by the presenter.
    ///
    /// A body click fires the click callback and leaves the notice open. A
    /// close click closes the notice gracefully, which fires the close
    /// callback.
    pub fn trigger_interaction(&self, index: NoticeIndex, interaction: Interaction) {
        match interaction {
            Interaction::Click => {
                let callback = self
                    .inner
                    .registry
                    .borrow()
                    .notices
                    .get(&index)
                    .and_then(|record| record.callback.clone());
                if let Some(callback) = callback {
                    self.enqueue(Effect::Callback {
                        index,
                        event: NoticeEvent::Click,
                        callback,
                    });
                    self.run_effects();
                }
            }
            Interaction::CloseClick => self.close(index, CloseMode::Graceful),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of tracked notices, exiting ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.registry.borrow().notices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.registry.borrow().notices.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: NoticeIndex) -> bool {
        self.inner.registry.borrow().notices.contains_key(&index)
    }

    /// Indices of tracked notices in ascending (creation) order.
    #[must_use]
    pub fn indices(&self) -> Vec<NoticeIndex> {
        self.inner.registry.borrow().notices.keys().copied().collect()
    }

    /// Returns the state of `index`: `Removed` for an index that was issued
    /// and is gone, `None` for one never issued.
    #[must_use]
    pub fn state(&self, index: NoticeIndex) -> Option<NoticeState> {
        let registry = self.inner.registry.borrow();
        match registry.notices.get(&index) {
            Some(record) => Some(record.state),
            None if index < registry.next_index => Some(NoticeState::Removed),
            None => None,
        }
    }

    #[must_use]
    pub fn content(&self, index: NoticeIndex) -> Option<NoticeContent> {
        self.with_record(index, |record| record.content.clone())
    }

    #[must_use]
    pub fn title(&self, index: NoticeIndex) -> Option<String> {
        self.with_record(index, |record| record.content.title.clone())
    }

    #[must_use]
    pub fn message(&self, index: NoticeIndex) -> Option<String> {
        self.with_record(index, |record| record.content.message.clone())
    }

    #[must_use]
    pub fn external_id(&self, index: NoticeIndex) -> Option<String> {
        self.with_record(index, |record| record.external_id.clone())
            .flatten()
    }

    /// Finds the live notice holding `external_id`.
    #[must_use]
    pub fn find_by_external_id(&self, external_id: &str) -> Option<NoticeIndex> {
        self.inner
            .registry
            .borrow()
            .notices
            .iter()
            .find(|(_, record)| record.external_id.as_deref() == Some(external_id))
            .map(|(&index, _)| index)
    }

    /// Returns whether `index` holds a pending auto-close timer.
    #[must_use]
    pub fn has_pending_timer(&self, index: NoticeIndex) -> bool {
        self.with_record(index, |record| record.timer.is_some())
            .unwrap_or(false)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn with_record<T>(&self, index: NoticeIndex, f: impl FnOnce(&NoticeRecord) -> T) -> Option<T> {
        self.inner.registry.borrow().notices.get(&index).map(f)
    }

    fn update_content(&self, index: NoticeIndex, apply: impl FnOnce(&mut NoticeContent)) -> bool {
        let mut registry = self.inner.registry.borrow_mut();
        match registry.notices.get_mut(&index) {
            Some(record) if record.state.accepts_content_updates() => {
                apply(&mut record.content);
                true
            }
            _ => false,
        }
    }

    fn schedule_auto_close(&self, index: NoticeIndex, delay: Duration) -> TimerId {
        let manager = self.downgrade();
        let slot = Rc::new(Cell::new(None));
        let task_slot = Rc::clone(&slot);
        let timer = self.inner.scheduler.schedule(
            delay,
            Box::new(move || {
                if let (Some(manager), Some(timer)) = (manager.upgrade(), task_slot.get()) {
                    manager.close_expired(index, timer);
                }
            }),
        );
        slot.set(Some(timer));
        timer
    }

    /// Timer entry point: closes `index` only if it still owns `timer`.
    fn close_expired(&self, index: NoticeIndex, timer: TimerId) {
        let owns_timer = {
            let mut registry = self.inner.registry.borrow_mut();
            match registry.notices.get_mut(&index) {
                Some(record) if record.timer == Some(timer) => {
                    record.timer = None;
                    true
                }
                _ => false,
            }
        };

        if !owns_timer {
            tracing::trace!(%index, "ignoring stale auto-close timer");
            self.log(DiagnosticEventKind::StaleTimer {
                index: index.value(),
            });
            return;
        }

        tracing::debug!(%index, "auto-close timer fired");
        self.log(DiagnosticEventKind::AutoClosed {
            index: index.value(),
        });
        self.close(index, CloseMode::Graceful);
    }

    /// Applies a close to the registry and queues its effects without
    /// running them. Returns whether anything changed.
    fn begin_close(&self, index: NoticeIndex, mode: CloseMode) -> bool {
        let transition = match mode {
            CloseMode::Graceful => Transition::BeginExit,
            CloseMode::Immediate => Transition::ForceRemove,
        };

        let (timer, effects) = {
            let mut registry = self.inner.registry.borrow_mut();
            let Some(record) = registry.notices.get_mut(&index) else {
                return false;
            };
            let timer = record.timer.take();
            let Some(next) = record.state.apply(transition) else {
                drop(registry);
                self.cancel_timer(timer);
                return false;
            };

            let mut effects = Vec::with_capacity(2);
            if record.state.is_closable() {
                if let Some(callback) = record.callback.clone() {
                    effects.push(Effect::Callback {
                        index,
                        event: NoticeEvent::Close,
                        callback,
                    });
                }
            }
            if next == NoticeState::Removed {
                registry.notices.remove(&index);
                effects.push(Effect::Remove(index));
            } else {
                record.state = next;
                effects.push(Effect::PlayExit(index));
            }
            (timer, effects)
        };

        self.cancel_timer(timer);
        tracing::debug!(%index, ?mode, "notice closing");
        self.log(DiagnosticEventKind::Closed {
            index: index.value(),
            immediate: mode == CloseMode::Immediate,
        });
        if mode == CloseMode::Immediate {
            self.log(DiagnosticEventKind::Removed {
                index: index.value(),
            });
        }
        self.inner.effects.borrow_mut().extend(effects);
        true
    }

    fn cancel_timer(&self, timer: Option<TimerId>) {
        if let Some(timer) = timer {
            self.inner.scheduler.cancel(timer);
        }
    }

    fn enqueue(&self, effect: Effect) {
        self.inner.effects.borrow_mut().push_back(effect);
    }

    /// Drains the effect queue unless an outer call is already draining it.
    fn run_effects(&self) {
        if self.inner.draining.replace(true) {
            return;
        }
        let _guard = DrainGuard(&self.inner.draining);
        loop {
            let effect = self.inner.effects.borrow_mut().pop_front();
            let Some(effect) = effect else {
                break;
            };
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&self, effect: Effect) {
        match effect {
            // A notice replaced before its mount ran is never shown.
            Effect::Mount(view) if !self.contains(view.index) => {}
            Effect::Mount(view) => self.inner.presenter.borrow_mut().mount(&view, self),
            Effect::PlayExit(index) => self.inner.presenter.borrow_mut().play_exit(index, self),
            Effect::Remove(index) => self.inner.presenter.borrow_mut().remove(index),
            Effect::UpdateTitle(index, title) => {
                self.inner.presenter.borrow_mut().update_title(index, &title);
            }
            Effect::UpdateMessage(index, message) => {
                self.inner
                    .presenter
                    .borrow_mut()
                    .update_message(index, &message);
            }
            Effect::Callback {
                index,
                event,
                callback,
            } => self.invoke_callback(index, event, &callback),
        }
    }

    /// Runs a user callback, containing any panic it raises.
    fn invoke_callback(&self, index: NoticeIndex, event: NoticeEvent, callback: &NoticeCallback) {
        let handle = self.handle(index);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(event, handle)));
        if let Err(payload) = outcome {
            let message = panic_message(payload.as_ref());
            tracing::error!(%index, event = event.as_str(), %message, "notice callback panicked");
            self.log(DiagnosticEventKind::CallbackPanicked {
                index: index.value(),
                event: event.as_str().to_string(),
                message,
            });
        }
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = self.inner.diagnostics.borrow().as_ref() {
            handle.log(kind);
        }
    }
}

impl fmt::Debug for NoticeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeManager")
            .field("notices", &self.indices())
            .field("defaults", &self.inner.defaults)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
