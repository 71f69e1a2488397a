// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! UI state machines frequently need "call me back later": a debounced scroll
//! handler, a periodic heartbeat, an idle countdown. This crate models those
//! needs without owning an event loop or storing callbacks:
//!
//! - [`Clock`]: a source of monotonic milliseconds. [`ManualClock`] is a
//!   shared, settable clock for deterministic hosts and tests; with the `std`
//!   feature, [`SystemClock`] reads [`std::time::Instant`].
//! - [`Scheduler`]: requests one-shot ([`Scheduler::after`]) and periodic
//!   ([`Scheduler::every`]) timers, each identified by a [`TimerId`], and
//!   cancels them ([`Scheduler::cancel`]). Cancellation is always idempotent.
//! - [`TimerQueue`]: a small virtual-time [`Scheduler`] that yields expired
//!   timers in deadline order via [`TimerQueue::pop_due`].
//! - [`Debouncer`]: cancel-and-reschedule helper for a single signal kind.
//!
//! Timers carry a caller-chosen payload `T` instead of a closure. When a timer
//! fires the host hands the payload (and its [`TimerId`]) back to whichever
//! state machine requested it. This keeps ownership simple: the state machine
//! is only ever borrowed by the host, never captured by the scheduler.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{Scheduler, TimerQueue};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Tick {
//!     Blink,
//!     Save,
//! }
//!
//! let mut queue = TimerQueue::new();
//! let blink = queue.every(500, Tick::Blink);
//! queue.after(1200, Tick::Save);
//!
//! // Advance virtual time to 1200ms and drain everything that expired.
//! let mut fired = Vec::new();
//! while let Some(expired) = queue.pop_due(1200) {
//!     fired.push((expired.deadline, expired.timer));
//! }
//! assert_eq!(
//!     fired,
//!     vec![(500, Tick::Blink), (1000, Tick::Blink), (1200, Tick::Save)]
//! );
//!
//! queue.cancel(blink);
//! queue.cancel(blink); // no-op
//! assert!(queue.is_empty());
//! ```
//!
//! All durations and timestamps are `u64` milliseconds.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod debounce;
mod queue;

pub use clock::{Clock, ManualClock};
pub use debounce::Debouncer;
pub use queue::{Expired, TimerQueue};

#[cfg(feature = "std")]
pub use clock::SystemClock;

/// Opaque handle for a scheduled timer.
///
/// Ids are unique per scheduler and never reused, so a stale id can always be
/// told apart from the live one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Creates an id from a raw value.
    ///
    /// Schedulers other than [`TimerQueue`] use this to mint their own ids.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Requests and cancels timers on behalf of a state machine.
///
/// `T` is the payload delivered back to the requester when the timer fires.
pub trait Scheduler<T> {
    /// Schedules `timer` to fire once, `delay` milliseconds from now.
    fn after(&mut self, delay: u64, timer: T) -> TimerId;

    /// Schedules `timer` to fire every `period` milliseconds, starting one
    /// period from now.
    fn every(&mut self, period: u64, timer: T) -> TimerId;

    /// Cancels a timer.
    ///
    /// Cancelling a timer that already fired (one-shot) or was already
    /// cancelled is a no-op.
    fn cancel(&mut self, id: TimerId);
}

impl<T, S: Scheduler<T> + ?Sized> Scheduler<T> for &mut S {
    fn after(&mut self, delay: u64, timer: T) -> TimerId {
        (**self).after(delay, timer)
    }

    fn every(&mut self, period: u64, timer: T) -> TimerId {
        (**self).every(period, timer)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id);
    }
}
