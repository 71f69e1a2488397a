// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Idle timeout: let attention lapse after a period without input.
//!
//! [`IdleCountdown`] owns a periodic [`AttentionTimer::IdleTick`] while
//! running. Each tick takes one tick period off the budget; input renews the
//! budget to the full timeout (never beyond it). When the budget runs out the
//! countdown cancels its own timer and reports [`IdleTick::Expired`].

use log::trace;
use understory_timing::{Scheduler, TimerId};

use crate::AttentionTimer;

/// Result of delivering a tick to an [`IdleCountdown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleTick {
    /// The tick was not for the running countdown and was ignored.
    Stale,
    /// Budget remains; carries the remaining milliseconds.
    Counting(u64),
    /// The budget ran out and the countdown stopped.
    Expired,
}

/// Countdown towards an idle timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleCountdown {
    timeout: u64,
    tick: u64,
    remaining: u64,
    timer: Option<TimerId>,
}

impl IdleCountdown {
    /// Creates a stopped countdown with a full budget.
    #[must_use]
    pub fn new(timeout: u64, tick: u64) -> Self {
        Self {
            timeout,
            tick,
            remaining: timeout,
            timer: None,
        }
    }

    /// Renews the budget and starts ticking.
    ///
    /// Restarting a running countdown replaces its timer.
    pub fn start<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<AttentionTimer> + ?Sized,
    {
        self.stop(scheduler);
        self.renew();
        self.timer = Some(scheduler.every(self.tick, AttentionTimer::IdleTick));
    }

    /// Resets the budget to the full timeout.
    pub fn renew(&mut self) {
        self.remaining = self.timeout;
    }

    /// Delivers a fired idle tick.
    pub fn tick<S>(&mut self, scheduler: &mut S, id: TimerId) -> IdleTick
    where
        S: Scheduler<AttentionTimer> + ?Sized,
    {
        if self.timer != Some(id) {
            return IdleTick::Stale;
        }
        self.remaining = self.remaining.saturating_sub(self.tick);
        trace!("idle budget: {}ms remaining", self.remaining);
        if self.remaining == 0 {
            self.stop(scheduler);
            IdleTick::Expired
        } else {
            IdleTick::Counting(self.remaining)
        }
    }

    /// Stops ticking. Safe to call when already stopped.
    pub fn stop<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<AttentionTimer> + ?Sized,
    {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
    }

    /// Returns `true` while ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns the remaining budget in milliseconds.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns the configured timeout.
    #[must_use]
    pub fn timeout(&self) -> u64 {
        self.timeout
    }
}
