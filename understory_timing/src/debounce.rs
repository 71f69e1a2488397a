// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce helper: collapse a burst of signals into one delayed callback.
//!
//! ## Usage
//!
//! 1) Keep one [`Debouncer`] per signal kind (for example one for scroll and one
//!    for resize) so that bursts of one kind never cancel the other.
//! 2) On every raw signal, call [`Debouncer::schedule`]. Any pending timer for
//!    this debouncer is cancelled before the new one is scheduled.
//! 3) When a timer fires, call [`Debouncer::fire`] with its id. Only the most
//!    recently scheduled id is accepted; stale ids return `false`.
//!
//! ## Minimal example
//!
//! ```
//! use understory_timing::{Debouncer, TimerQueue};
//!
//! let mut queue = TimerQueue::new();
//! let mut scroll = Debouncer::new();
//!
//! // Three scroll events 50ms apart.
//! scroll.schedule(&mut queue, 150, "scroll");
//! queue.set_now(50);
//! scroll.schedule(&mut queue, 150, "scroll");
//! queue.set_now(100);
//! scroll.schedule(&mut queue, 150, "scroll");
//!
//! // Only the last one survives, 150ms after the final event.
//! let expired = queue.pop_due(1000).unwrap();
//! assert_eq!(expired.deadline, 250);
//! assert!(scroll.fire(expired.id));
//! assert!(queue.pop_due(1000).is_none());
//! ```

use crate::{Scheduler, TimerId};

/// Tracks the single pending timer of a debounced signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    pending: Option<TimerId>,
}

impl Debouncer {
    /// Creates a debouncer with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Cancels any pending timer and schedules `timer` after `delay`.
    pub fn schedule<T, S>(&mut self, scheduler: &mut S, delay: u64, timer: T) -> TimerId
    where
        S: Scheduler<T> + ?Sized,
    {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        let id = scheduler.after(delay, timer);
        self.pending = Some(id);
        id
    }

    /// Accepts a fired timer.
    ///
    /// Returns `true` (and clears the pending state) only if `id` is the
    /// timer this debouncer is currently waiting on.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancels the pending timer, if any.
    pub fn cancel<T, S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<T> + ?Sized,
    {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Returns the pending timer id, if any.
    #[must_use]
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Returns `true` while a timer is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
