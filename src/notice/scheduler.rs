// SPDX-License-Identifier: MPL-2.0
//! Timer scheduling for auto-close and animation completion.
//!
//! The manager never waits: it registers a task with a [`Scheduler`] and
//! carries on. Two implementations are provided:
//!
//! - [`ManualScheduler`]: virtual clock advanced explicitly, for hosts that
//!   already run a frame/tick loop and for deterministic tests
//! - [`TokioScheduler`]: real timers on a tokio `LocalSet`

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Identifies a scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Wraps a raw id. Scheduler implementations mint their own ids.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Deferred, cancellable execution of a task.
///
/// Implementations must never run a task synchronously from inside
/// [`Scheduler::schedule`]. Cancelling an unknown or already-fired timer is a
/// no-op.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;
    fn cancel(&self, timer: TimerId);
}

// =============================================================================
// ManualScheduler
// =============================================================================

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so equal deadlines fire in scheduling order.
    pending: BTreeMap<(Duration, u64), Task>,
    deadlines: HashMap<u64, Duration>,
}

/// A scheduler driven by an explicit virtual clock.
///
/// Nothing fires until [`ManualScheduler::advance`] moves time forward.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Deadline of the next task, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.borrow().pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Moves the clock forward, running every task that falls due.
    ///
    /// Tasks scheduled by a running task fire in the same call if their
    /// deadline is within the advanced window. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut fired = 0;
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                match state.pending.first_key_value() {
                    Some((&(deadline, _), _)) if deadline <= target => {}
                    _ => break,
                }
                let Some(((deadline, id), task)) = state.pending.pop_first() else {
                    break;
                };
                state.deadlines.remove(&id);
                state.now = state.now.max(deadline);
                task
            };
            task();
            fired += 1;
        }
        self.state.borrow_mut().now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let deadline = state.now + delay;
        state.pending.insert((deadline, id), task);
        state.deadlines.insert(id, deadline);
        TimerId(id)
    }

    fn cancel(&self, timer: TimerId) {
        let mut state = self.state.borrow_mut();
        if let Some(deadline) = state.deadlines.remove(&timer.0) {
            state.pending.remove(&(deadline, timer.0));
        }
    }
}

// =============================================================================
// TokioScheduler
// =============================================================================

/// A scheduler backed by `tokio::time::sleep` on the current `LocalSet`.
///
/// Tasks are spawned with `tokio::task::spawn_local`, so every call to
/// [`Scheduler::schedule`] must happen inside a `tokio::task::LocalSet`.
/// Dropping the scheduler aborts every pending task.
#[derive(Default)]
pub struct TokioScheduler {
    tasks: Rc<RefCell<HashMap<TimerId, JoinHandle<()>>>>,
    next_id: Cell<u64>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let tasks = Rc::downgrade(&self.tasks);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if let Some(tasks) = tasks.upgrade() {
                tasks.borrow_mut().remove(&id);
            }
            task();
        });
        self.tasks.borrow_mut().insert(id, handle);
        id
    }

    fn cancel(&self, timer: TimerId) {
        let handle = self.tasks.borrow_mut().remove(&timer);
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.borrow_mut().drain() {
            handle.abort();
        }
    }
}
