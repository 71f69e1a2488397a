// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable state of one tracking session.

use understory_timing::TimerId;

use crate::{ElapsedAccumulator, IdleCountdown, ViewportBand};

/// Why attention last lapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The element scrolled out of view.
    OutOfView,
    /// The window lost focus.
    Blur,
    /// No input arrived within the idle timeout.
    IdleTimeout,
    /// Cumulative attentive time passed the expiry cap.
    Expired,
    /// A summary was requested (flush or unload).
    Flush,
}

/// State of a single tracked element for the lifetime of the page.
///
/// Owned by an [`AttentionTracker`](crate::AttentionTracker) and exposed
/// read-only through [`AttentionTracker::session`](crate::AttentionTracker::session).
#[derive(Clone, Debug)]
pub struct TrackingSession {
    pub(crate) elapsed: ElapsedAccumulator,
    pub(crate) heartbeat_count: u64,
    pub(crate) heartbeat: Option<TimerId>,
    pub(crate) idle: IdleCountdown,
    pub(crate) band: Option<ViewportBand>,
    pub(crate) expired: bool,
    pub(crate) last_stop: Option<StopReason>,
}

impl TrackingSession {
    pub(crate) fn new(idle: IdleCountdown) -> Self {
        Self {
            elapsed: ElapsedAccumulator::new(),
            heartbeat_count: 0,
            heartbeat: None,
            idle,
            band: None,
            expired: false,
            last_stop: None,
        }
    }

    /// Accumulated attentive time in milliseconds, excluding the interval in
    /// progress.
    #[must_use]
    pub fn total_attentive_time(&self) -> u64 {
        self.elapsed.total()
    }

    /// Number of heartbeats emitted.
    #[must_use]
    pub fn heartbeat_count(&self) -> u64 {
        self.heartbeat_count
    }

    /// `true` while the heartbeat timer is scheduled.
    #[must_use]
    pub fn is_attentive(&self) -> bool {
        self.heartbeat.is_some()
    }

    /// Start of the current attentive interval, `None` when not attentive.
    #[must_use]
    pub fn attention_started_at(&self) -> Option<u64> {
        self.elapsed.started_at()
    }

    /// Remaining idle budget in milliseconds; only meaningful while
    /// attentive, so `None` otherwise.
    #[must_use]
    pub fn remaining_idle_budget(&self) -> Option<u64> {
        self.is_attentive().then(|| self.idle.remaining())
    }

    /// Band thresholds from the last load or resize, if any.
    #[must_use]
    pub fn viewport_band(&self) -> Option<ViewportBand> {
        self.band
    }

    /// `true` once the expiry cap was reached. Never cleared.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Reason for the most recent transition out of attentive.
    #[must_use]
    pub fn last_stop(&self) -> Option<StopReason> {
        self.last_stop
    }
}
