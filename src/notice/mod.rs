// SPDX-License-Identifier: MPL-2.0
//! Transient notices that appear, stay for a while and dismiss themselves.
//!
//! # Components
//!
//! - [`manager`] - `NoticeManager`, the owner of every notice and its lifecycle
//! - [`handle`] - `NoticeHandle`, the per-notice control surface given to callers
//! - [`options`] - creation options, content and callbacks
//! - [`presenter`] - the `Presenter` trait the manager drives, plus click routing
//! - [`scheduler`] - timer abstraction with manual and tokio implementations
//! - [`overlay`] - `HeadlessOverlay`, an in-memory presenter
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use aura_notify::notice::{
//!     HeadlessOverlay, ManualScheduler, NoticeManager, NoticeOptions, OverlayTiming,
//! };
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let overlay = HeadlessOverlay::new(scheduler.clone(), OverlayTiming::default());
//! let manager = NoticeManager::new(overlay.clone(), scheduler.clone());
//!
//! let index = manager.open(NoticeOptions::success("Saved").auto_close_ms(1000));
//! assert_eq!(overlay.count(), 1);
//!
//! // Auto-close at 1000ms, exit animation done 200ms later.
//! scheduler.advance(Duration::from_millis(1200));
//! assert!(!manager.contains(index));
//! assert!(overlay.is_empty());
//! ```

pub mod handle;
pub mod manager;
pub mod options;
pub mod overlay;
pub mod presenter;
pub mod scheduler;

pub use handle::NoticeHandle;
pub use manager::{CloseMode, NoticeManager, WeakNoticeManager};
pub use options::{
    NoticeCallback, NoticeContent, NoticeDefaults, NoticeEvent, NoticeIcon, NoticeOptions,
};
pub use overlay::{ElementPhase, HeadlessOverlay, OverlayElement, OverlayTiming};
pub use presenter::{
    dispatch_click, ClickModifiers, Interaction, NoticeView, PointerTarget, Presenter,
};
pub use scheduler::{ManualScheduler, Scheduler, TimerId, TokioScheduler};
