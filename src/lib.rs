// SPDX-License-Identifier: MPL-2.0
//! `aura_notify` manages transient notification toasts.
//!
//! It tracks every notice from creation to removal: index allocation,
//! replacement by external id, auto-close timers, graceful and immediate
//! close, click and close callbacks. Drawing is left to a [`notice::Presenter`];
//! timing is left to a [`notice::Scheduler`].

#![doc(html_root_url = "https://docs.rs/aura_notify/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notice;

#[cfg(test)]
mod test_utils;
