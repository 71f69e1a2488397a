// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accumulate wall-clock time across attentive intervals.

/// Measures time since a start mark and adds it to a running total.
///
/// Timestamps are milliseconds from a [`Clock`](understory_timing::Clock).
/// If the clock reads earlier than the mark, the elapsed time is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElapsedAccumulator {
    started_at: Option<u64>,
    total: u64,
}

impl ElapsedAccumulator {
    /// Creates an accumulator with no mark and a zero total.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started_at: None,
            total: 0,
        }
    }

    /// Marks the start of an interval.
    pub fn mark_start(&mut self, now: u64) {
        self.started_at = Some(now);
    }

    /// Returns the current mark, if any.
    #[must_use]
    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    /// Returns the time since the mark, or `0` without a mark.
    #[must_use]
    pub fn elapsed_since(&self, now: u64) -> u64 {
        self.started_at
            .map_or(0, |started| now.saturating_sub(started))
    }

    /// Adds the time since the mark to the total and re-marks at `now`.
    ///
    /// Returns the amount added. Without a mark nothing is added and no mark
    /// is set.
    pub fn lap(&mut self, now: u64) -> u64 {
        let elapsed = self.elapsed_since(now);
        self.total = self.total.saturating_add(elapsed);
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
        elapsed
    }

    /// Adds the time since the mark to the total and clears the mark.
    ///
    /// Returns the amount added.
    pub fn stop(&mut self, now: u64) -> u64 {
        let elapsed = self.elapsed_since(now);
        self.total = self.total.saturating_add(elapsed);
        self.started_at = None;
        elapsed
    }

    /// Returns the accumulated total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Lowers the total to `max` if it exceeds it.
    pub fn clamp_total(&mut self, max: u64) {
        self.total = self.total.min(max);
    }
}
