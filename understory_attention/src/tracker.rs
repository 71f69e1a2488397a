// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The heartbeat state machine.
//!
//! ```text
//!            in view, below cap
//!   Idle ─────────────────────────▶ Attentive ──┐ heartbeat tick:
//!    ▲                                  │  ▲     │ accumulate, count, emit
//!    │  out of view, blur, idle         │  └─────┘
//!    │  timeout, cap, flush             │
//!    └──────────────────────────────────┘
//! ```
//!
//! While attentive two periodic timers run: the heartbeat ticker and the idle
//! countdown. Both are cancelled together on every transition back to idle.

use log::{debug, trace, warn};
use understory_timing::{Clock, Debouncer, ManualClock, Scheduler, TimerId, TimerQueue};

use crate::{
    AttentionConfig, AttentionEvent, AttentionPayload, AttentionTimer, ConfigurationError,
    EventSink, GeometryProvider, IdleCountdown, IdleTick, Signal, StopReason, TrackingSession,
    VisibilityEvaluator,
};

/// Tracks attention on a single element.
///
/// The tracker owns its collaborators:
///
/// - `G`: a [`GeometryProvider`] for element bounds and viewport height,
/// - `C`: a [`Clock`],
/// - `S`: a [`Scheduler`] for [`AttentionTimer`]s,
/// - `E`: an [`EventSink`] receiving heartbeats and summaries.
///
/// The host forwards page signals to [`signal`](Self::signal), hands fired
/// timers back through [`on_timer`](Self::on_timer), and calls
/// [`flush`](Self::flush) (or sends [`Signal::Unload`]) when the page goes
/// away. All work happens synchronously inside those calls.
#[derive(Debug)]
pub struct AttentionTracker<G, C, S, E> {
    config: AttentionConfig,
    evaluator: VisibilityEvaluator,
    geometry: G,
    clock: C,
    scheduler: S,
    sink: E,
    session: TrackingSession,
    scroll: Debouncer,
    resize: Debouncer,
}

impl<G, C, S, E> AttentionTracker<G, C, S, E>
where
    G: GeometryProvider,
    C: Clock,
    S: Scheduler<AttentionTimer>,
    E: EventSink,
{
    /// Starts a tracking session.
    ///
    /// Fails if the configuration is invalid or the tracked element is not
    /// present. The session begins idle; send [`Signal::Load`] (or
    /// [`Signal::Focus`]) to evaluate visibility for the first time.
    pub fn new(
        config: AttentionConfig,
        geometry: G,
        clock: C,
        scheduler: S,
        sink: E,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        if geometry.element_bounds().is_none() {
            return Err(ConfigurationError::MissingElement);
        }
        debug!("tracking attention with {config:?}");
        Ok(Self {
            evaluator: VisibilityEvaluator::new(config.pct_in_view),
            session: TrackingSession::new(IdleCountdown::new(
                config.heartbeat_timeout,
                config.idle_tick,
            )),
            config,
            geometry,
            clock,
            scheduler,
            sink,
            scroll: Debouncer::new(),
            resize: Debouncer::new(),
        })
    }

    /// Handles a page signal.
    pub fn signal(&mut self, signal: Signal) {
        trace!("signal {signal:?}");
        match signal {
            Signal::Scroll => {
                self.session.idle.renew();
                self.scroll.schedule(
                    &mut self.scheduler,
                    self.config.debounce_delay,
                    AttentionTimer::ScrollSettled,
                );
            }
            Signal::Resize => {
                self.resize.schedule(
                    &mut self.scheduler,
                    self.config.debounce_delay,
                    AttentionTimer::ResizeSettled,
                );
            }
            Signal::Load => {
                self.measure_viewport();
                self.try_start();
            }
            Signal::Focus => self.try_start(),
            Signal::Blur => self.stop(StopReason::Blur),
            Signal::Activity => self.session.idle.renew(),
            Signal::Unload => {
                self.flush();
            }
        }
    }

    /// Handles a fired timer.
    ///
    /// Timers that are no longer live (cancelled, superseded by a newer
    /// debounce, or from an earlier attentive interval) are ignored.
    pub fn on_timer(&mut self, id: TimerId, timer: AttentionTimer) {
        match timer {
            AttentionTimer::Heartbeat => {
                if self.session.heartbeat == Some(id) {
                    self.heartbeat_tick();
                } else {
                    trace!("ignoring stale heartbeat {id:?}");
                }
            }
            AttentionTimer::IdleTick => {
                if self.session.idle.tick(&mut self.scheduler, id) == IdleTick::Expired {
                    self.stop(StopReason::IdleTimeout);
                }
            }
            AttentionTimer::ScrollSettled => {
                if self.scroll.fire(id) {
                    self.scroll_settled();
                }
            }
            AttentionTimer::ResizeSettled => {
                if self.resize.fire(id) {
                    self.measure_viewport();
                }
            }
        }
    }

    /// Ends the current attentive interval, if any, and emits a summary.
    ///
    /// Safe to call at any time and any number of times; without intervening
    /// signals repeated calls return identical payloads. Tracking resumes on
    /// the next signal that finds the element in view.
    pub fn flush(&mut self) -> AttentionPayload {
        self.stop(StopReason::Flush);
        let payload = self.payload();
        let event = AttentionEvent::Summary(payload);
        debug!("{event}");
        self.sink.emit(&event);
        payload
    }

    /// Evaluates the in-view test against current geometry.
    #[must_use]
    pub fn is_in_view(&self) -> bool {
        self.evaluator.is_in_view(
            self.geometry.element_bounds(),
            self.geometry.viewport_height(),
            self.session.band,
        )
    }

    /// Builds a payload from the current session and geometry without
    /// emitting it.
    ///
    /// The attentive interval in progress, if any, is not included.
    #[must_use]
    pub fn payload(&self) -> AttentionPayload {
        AttentionPayload {
            heartbeat_count: self.session.heartbeat_count,
            total_attentive_time: self.session.total_attentive_time(),
            viewport_height: self.geometry.viewport_height(),
            element_height: self
                .geometry
                .element_bounds()
                .map_or(0.0, |rect| rect.abs().height()),
        }
    }

    fn scroll_settled(&mut self) {
        if self.is_in_view() {
            self.session.idle.renew();
            self.try_start();
        } else {
            self.stop(StopReason::OutOfView);
        }
    }

    fn measure_viewport(&mut self) {
        let height = self.geometry.viewport_height();
        if !height.is_finite() || height <= 0.0 {
            warn!("ignoring degenerate viewport height {height}");
            return;
        }
        let band = self.evaluator.band(height);
        trace!("viewport {height}px, band {}..{}", band.top, band.bottom);
        self.session.band = Some(band);
    }

    fn try_start(&mut self) {
        if self.session.is_attentive() || !self.is_in_view() {
            return;
        }
        if self.session.expired
            || self.session.total_attentive_time() >= self.config.heartbeat_expires
        {
            trace!("expiry cap reached; attention stays off");
            return;
        }

        let now = self.clock.now();
        self.session.elapsed.mark_start(now);
        self.session.heartbeat = Some(
            self.scheduler
                .every(self.config.heartbeat_interval, AttentionTimer::Heartbeat),
        );
        self.session.idle.start(&mut self.scheduler);
        debug!(
            "attention started at {now}ms with {}ms accumulated",
            self.session.total_attentive_time()
        );

        if self.config.initial_heartbeat && self.session.heartbeat_count == 0 {
            self.emit_heartbeat();
        }
    }

    fn heartbeat_tick(&mut self) {
        let now = self.clock.now();
        self.session.elapsed.lap(now);
        if self.session.total_attentive_time() > self.config.heartbeat_expires {
            self.session.expired = true;
            self.stop(StopReason::Expired);
            return;
        }
        self.emit_heartbeat();
    }

    fn emit_heartbeat(&mut self) {
        self.session.heartbeat_count += 1;
        let event = AttentionEvent::Heartbeat(self.payload());
        trace!("{event}");
        self.sink.emit(&event);
    }

    fn stop(&mut self, reason: StopReason) {
        let Some(heartbeat) = self.session.heartbeat.take() else {
            return;
        };
        self.scheduler.cancel(heartbeat);
        self.session.idle.stop(&mut self.scheduler);

        let now = self.clock.now();
        let added = self.session.elapsed.stop(now);
        let cap = self.config.heartbeat_expires;
        if self.session.total_attentive_time() >= cap {
            self.session.elapsed.clamp_total(cap);
            self.session.expired = true;
        }
        self.session.last_stop = Some(reason);
        debug!(
            "attention stopped ({reason:?}) after {added}ms, {}ms total",
            self.session.total_attentive_time()
        );
    }
}

impl<G, C, S, E> AttentionTracker<G, C, S, E> {
    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AttentionConfig {
        &self.config
    }

    /// Returns the session state.
    #[must_use]
    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    /// Returns `true` while attentive.
    #[must_use]
    pub fn is_attentive(&self) -> bool {
        self.session.is_attentive()
    }

    /// Returns the geometry provider.
    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Returns the geometry provider mutably, for hosts that push layout.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the scheduler mutably, for hosts that drain it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Returns the event sink.
    #[must_use]
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Returns the event sink mutably.
    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }
}

impl<G, E> AttentionTracker<G, ManualClock, TimerQueue<AttentionTimer>, E>
where
    G: GeometryProvider,
    E: EventSink,
{
    /// Moves virtual time to `now`, firing every timer that falls due on the
    /// way at its exact deadline.
    ///
    /// The clock and queue should start at the same time and only be moved
    /// through this method (or [`advance_by`](Self::advance_by)).
    pub fn advance_to(&mut self, now: u64) {
        while let Some(expired) = self.scheduler.pop_due(now) {
            self.clock.set(expired.deadline);
            self.on_timer(expired.id, expired.timer);
        }
        if now > self.clock.now() {
            self.clock.set(now);
        }
    }

    /// Moves virtual time forward by `delta`; see [`advance_to`](Self::advance_to).
    pub fn advance_by(&mut self, delta: u64) {
        self.advance_to(self.clock.now().saturating_add(delta));
    }
}
