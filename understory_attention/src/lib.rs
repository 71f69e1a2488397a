// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_attention --heading-base-level=0

//! Understory Attention: measure how long a single element is actually looked at.
//!
//! An element counts as *attended* while it is in view, the window has focus,
//! and the user has shown some sign of life within the idle timeout. While
//! attended the tracker accumulates dwell time and emits a periodic heartbeat;
//! on demand (or on page unload) it emits a summary of the totals.
//!
//! The pieces, bottom-up:
//!
//! - [`VisibilityEvaluator`]: the geometric in-view test against a
//!   [`GeometryProvider`].
//! - [`ElapsedAccumulator`]: total time across start/stop intervals.
//! - [`IdleCountdown`]: lets attention lapse after a period without input.
//! - [`AttentionTracker`]: the state machine tying them together, driven by
//!   [`Signal`]s and [`AttentionTimer`]s, reporting to an [`EventSink`].
//!
//! The tracker owns no event loop. Timers are requested from an
//! [`understory_timing::Scheduler`] and handed back through
//! [`AttentionTracker::on_timer`] when they fire. For deterministic hosts
//! and tests, pairing a [`ManualClock`] with a [`TimerQueue`] gives
//! [`AttentionTracker::advance_to`], which runs virtual time forward.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_attention::{
//!     AttentionConfig, AttentionTracker, EventLog, FixedGeometry, ManualClock, Signal,
//!     TimerQueue,
//! };
//!
//! // A 100px tall element near the top of an 800px viewport.
//! let geometry = FixedGeometry::new(Rect::new(0.0, 40.0, 320.0, 140.0), 800.0);
//! let mut tracker = AttentionTracker::new(
//!     AttentionConfig::default(),
//!     geometry,
//!     ManualClock::new(0),
//!     TimerQueue::new(),
//!     EventLog::new(),
//! )?;
//!
//! tracker.signal(Signal::Load);
//! tracker.advance_to(5_000);
//!
//! // Heartbeats at 2s and 4s.
//! let totals: Vec<u64> = tracker
//!     .sink()
//!     .heartbeats()
//!     .map(|p| p.total_attentive_time)
//!     .collect();
//! assert_eq!(totals, [2_000, 4_000]);
//!
//! let summary = tracker.flush();
//! assert_eq!(summary.total_attentive_time, 5_000);
//! assert_eq!(summary.heartbeat_count, 2);
//! # Ok::<(), understory_attention::ConfigurationError>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo and `understory_timing`.
//! - `libm`: floating point support for `no_std` builds of Kurbo.
//! - `serde`: `Deserialize` for [`AttentionConfig`] (partial settings merge
//!   over defaults) and `Serialize` for [`AttentionEvent`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod elapsed;
mod error;
mod event;
mod geometry;
mod idle;
mod session;
mod signal;
mod tracker;
mod visibility;

pub use config::AttentionConfig;
pub use elapsed::ElapsedAccumulator;
pub use error::ConfigurationError;
pub use event::{AttentionEvent, AttentionPayload, EventLog, EventSink, LogSink};
pub use geometry::{FixedGeometry, GeometryProvider};
pub use idle::{IdleCountdown, IdleTick};
pub use session::{StopReason, TrackingSession};
pub use signal::{AttentionTimer, Signal};
pub use tracker::AttentionTracker;
pub use visibility::{ViewportBand, VisibilityEvaluator, VisibilityRule};

pub use understory_timing::{Clock, ManualClock, Scheduler, TimerId, TimerQueue};
