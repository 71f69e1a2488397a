// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `AttentionTracker`.
//!
//! Each test drives a tracker on virtual time: page signals are sent the way a
//! host would forward them and `advance_to` replays every timer at its exact
//! deadline.

use kurbo::Rect;
use understory_attention::{
    AttentionConfig, AttentionEvent, AttentionTimer, AttentionTracker, ConfigurationError,
    EventLog, FixedGeometry, ManualClock, Signal, StopReason, TimerQueue,
};

type Tracker = AttentionTracker<FixedGeometry, ManualClock, TimerQueue<AttentionTimer>, EventLog>;

const VIEWPORT: f64 = 1000.0;

fn element(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, 600.0, top + height)
}

fn tracker_with(config: AttentionConfig, rect: Rect) -> Tracker {
    AttentionTracker::new(
        config,
        FixedGeometry::new(rect, VIEWPORT),
        ManualClock::new(0),
        TimerQueue::new(),
        EventLog::new(),
    )
    .unwrap()
}

fn tracker(rect: Rect) -> Tracker {
    tracker_with(AttentionConfig::default(), rect)
}

/// Scrolls the element to `top` and lets the scroll debounce settle.
fn scroll_to(t: &mut Tracker, top: f64) {
    t.geometry_mut().scroll_to(top);
    t.signal(Signal::Scroll);
    t.advance_by(t.config().debounce_delay);
}

fn heartbeat_totals(t: &Tracker) -> Vec<u64> {
    t.sink()
        .heartbeats()
        .map(|p| p.total_attentive_time)
        .collect()
}

#[test]
fn short_element_counts_only_when_fully_visible() {
    let mut t = tracker(element(950.0, 100.0));
    t.signal(Signal::Load);
    assert!(!t.is_attentive(), "bottom edge is below the fold");

    scroll_to(&mut t, 900.0);
    assert!(t.is_attentive());

    scroll_to(&mut t, -1.0);
    assert!(!t.is_attentive());
    assert_eq!(t.session().last_stop(), Some(StopReason::OutOfView));

    scroll_to(&mut t, 0.0);
    assert!(t.is_attentive());
}

#[test]
fn tall_element_counts_while_covering_the_midline() {
    let mut t = tracker(element(400.0, 1200.0));
    t.signal(Signal::Load);
    assert!(t.is_attentive());

    scroll_to(&mut t, 500.0);
    assert!(t.is_attentive(), "top edge exactly on the midline");

    scroll_to(&mut t, 501.0);
    assert!(!t.is_attentive());

    scroll_to(&mut t, -700.0);
    assert!(t.is_attentive(), "bottom edge exactly on the midline");

    scroll_to(&mut t, -701.0);
    assert!(!t.is_attentive());
}

#[test]
fn expiry_cap_stops_heartbeats() {
    let config = AttentionConfig::default()
        .with_heartbeat_interval(2000)
        .with_heartbeat_expires(5000);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(6000);

    assert_eq!(heartbeat_totals(&t), [2000, 4000]);
    assert!(!t.is_attentive());
    assert!(t.session().is_expired());
    assert_eq!(t.session().last_stop(), Some(StopReason::Expired));
    assert_eq!(t.session().total_attentive_time(), 5000, "total is clamped");

    t.advance_to(20_000);
    assert_eq!(t.sink().heartbeats().count(), 2);
}

#[test]
fn expiry_is_permanent() {
    let config = AttentionConfig::default()
        .with_heartbeat_interval(2000)
        .with_heartbeat_expires(5000);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(6000);

    scroll_to(&mut t, 200.0);
    t.signal(Signal::Focus);
    t.signal(Signal::Load);
    t.advance_to(30_000);

    assert!(!t.is_attentive());
    assert_eq!(t.sink().heartbeats().count(), 2);
    assert_eq!(t.flush().total_attentive_time, 5000);
}

#[test]
fn stopping_at_the_cap_expires_without_a_tick() {
    let config = AttentionConfig::default()
        .with_heartbeat_interval(2000)
        .with_heartbeat_expires(3000);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(3500);
    t.signal(Signal::Blur);

    assert_eq!(t.session().total_attentive_time(), 3000);
    assert!(t.session().is_expired());
    t.signal(Signal::Focus);
    assert!(!t.is_attentive());
}

#[test]
fn tick_landing_on_the_cap_still_emits() {
    let config = AttentionConfig::default()
        .with_heartbeat_interval(2000)
        .with_heartbeat_expires(4000);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(4000);

    // Reaching the cap exactly is not passing it.
    assert_eq!(heartbeat_totals(&t), [2000, 4000]);
    assert!(t.is_attentive());
    assert!(!t.session().is_expired());

    t.advance_to(5999);
    assert!(t.is_attentive());
    t.advance_to(6000);
    assert!(!t.is_attentive());
    assert!(t.session().is_expired());
    assert_eq!(t.session().last_stop(), Some(StopReason::Expired));
    assert_eq!(t.session().total_attentive_time(), 4000);
    assert_eq!(t.sink().heartbeats().count(), 2);
}

#[test]
fn zero_expiry_never_starts() {
    let config = AttentionConfig::default().with_heartbeat_expires(0);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(10_000);

    assert!(!t.is_attentive());
    assert!(t.sink().events().is_empty());
}

#[test]
fn idle_timeout_ends_attention_in_view() {
    let mut t = tracker(element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(29_999);
    assert!(t.is_attentive());

    t.advance_to(30_000);
    assert!(!t.is_attentive());
    assert!(t.is_in_view(), "still in view; lapse came from idleness");
    assert_eq!(t.session().last_stop(), Some(StopReason::IdleTimeout));
    assert_eq!(t.session().total_attentive_time(), 30_000);
    assert_eq!(t.sink().heartbeats().count(), 15);

    t.advance_to(60_000);
    assert_eq!(t.session().total_attentive_time(), 30_000);
}

#[test]
fn activity_after_idle_timeout_does_not_resume() {
    let config = AttentionConfig::default().with_heartbeat_timeout(3000);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(3000);
    assert!(!t.is_attentive());

    t.signal(Signal::Activity);
    t.advance_to(5000);
    assert!(!t.is_attentive());

    // Scrolling is what brings attention back.
    scroll_to(&mut t, 120.0);
    assert!(t.is_attentive());
    assert_eq!(t.session().attention_started_at(), Some(5150));
}

#[test]
fn blur_while_idle_is_a_no_op() {
    let mut t = tracker(element(2000.0, 100.0));
    t.signal(Signal::Load);
    let before = t.session().clone();

    t.signal(Signal::Blur);
    t.signal(Signal::Blur);

    assert!(!t.is_attentive());
    assert_eq!(
        t.session().total_attentive_time(),
        before.total_attentive_time()
    );
    assert_eq!(t.session().last_stop(), None);
}

#[test]
fn blur_and_focus_resume_accumulation() {
    let mut t = tracker(element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(1500);
    t.signal(Signal::Blur);
    assert_eq!(t.session().last_stop(), Some(StopReason::Blur));

    t.advance_to(10_000);
    t.signal(Signal::Focus);
    t.advance_to(11_000);

    assert_eq!(t.flush().total_attentive_time, 2500);
    // The first interval ended before its heartbeat; the second started a
    // fresh ticker that has not fired yet.
    assert!(t.sink().heartbeats().next().is_none());
}

#[test]
fn flush_is_idempotent() {
    let mut t = tracker(element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(4321);

    let first = t.flush();
    let second = t.flush();
    assert_eq!(first, second);
    assert_eq!(first.total_attentive_time, 4321);
    assert_eq!(first.heartbeat_count, 2);

    let summaries: Vec<_> = t.sink().summaries().copied().collect();
    assert_eq!(summaries, [first, first]);
}

#[test]
fn flush_while_idle_reports_totals() {
    let mut t = tracker(element(2000.0, 100.0));
    t.signal(Signal::Load);
    let summary = t.flush();
    assert_eq!(summary.total_attentive_time, 0);
    assert_eq!(summary.heartbeat_count, 0);
    assert_eq!(summary.viewport_height, VIEWPORT);
    assert_eq!(summary.element_height, 100.0);
}

#[test]
fn unload_emits_final_summary() {
    let mut t = tracker(element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(2200);
    t.signal(Signal::Unload);

    let events = t.sink().events();
    assert_eq!(events.len(), 2);
    assert!(events[0].is_heartbeat());
    assert!(matches!(events[1], AttentionEvent::Summary(p) if p.total_attentive_time == 2200));
    assert_eq!(
        events[1].to_string(),
        "totaltime: 2200ms after 1 heartbeats (viewport 1000px, element 100px)"
    );
}

#[test]
fn totals_never_decrease_and_never_exceed_cap() {
    let config = AttentionConfig::default().with_heartbeat_expires(7000);
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);

    let mut last = 0;
    for step in 1..=40_u64 {
        match step % 7 {
            0 => t.signal(Signal::Blur),
            1 => t.signal(Signal::Focus),
            3 => {
                let top = if step % 2 == 0 { 3000.0 } else { 50.0 };
                t.geometry_mut().scroll_to(top);
            }
            4 => t.signal(Signal::Scroll),
            _ => t.signal(Signal::Activity),
        }
        t.advance_by(700);
        let total = t.session().total_attentive_time();
        assert!(total >= last, "total went from {last} to {total}");
        assert!(total <= 7000, "total {total} exceeds the cap");
        last = total;
    }
    let heartbeats = heartbeat_totals(&t);
    assert!(heartbeats.windows(2).all(|w| w[0] <= w[1]));
    assert!(heartbeats.iter().all(|&total| total <= 7000));
}

#[test]
fn heartbeat_counts_are_sequential() {
    let mut t = tracker(element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(5000);
    t.signal(Signal::Blur);
    t.signal(Signal::Focus);
    t.advance_to(9000);

    let counts: Vec<u64> = t.sink().heartbeats().map(|p| p.heartbeat_count).collect();
    assert_eq!(counts, [1, 2, 3, 4]);
    assert_eq!(heartbeat_totals(&t), [2000, 4000, 7000, 9000]);
}

#[test]
fn resize_moves_the_band() {
    let mut t = tracker(element(-100.0, 1200.0));
    t.signal(Signal::Load);
    assert!(t.is_attentive());

    // A taller viewport puts the element above the new midline.
    t.geometry_mut().viewport_height = 2400.0;
    t.signal(Signal::Resize);
    t.advance_by(150);
    let band = t.session().viewport_band().unwrap();
    assert_eq!(band.top, 1200.0);

    t.signal(Signal::Scroll);
    t.advance_by(150);
    assert!(!t.is_attentive());
}

#[test]
fn arrow_keys_scroll_other_keys_keep_alive() {
    let config = AttentionConfig::default().with_heartbeat_timeout(2000);
    let mut t = tracker_with(config, element(3000.0, 100.0));
    t.signal(Signal::Load);

    t.geometry_mut().scroll_to(300.0);
    t.signal(Signal::from_key("ArrowDown"));
    t.advance_by(150);
    assert!(t.is_attentive());

    for _ in 0..5 {
        t.advance_by(1000);
        t.signal(Signal::from_key("j"));
    }
    assert!(t.is_attentive(), "key presses renew the idle budget");
}

#[test]
fn missing_element_fails_at_init() {
    let geometry = FixedGeometry {
        element: None,
        viewport_height: VIEWPORT,
    };
    let err = AttentionTracker::new(
        AttentionConfig::default(),
        geometry,
        ManualClock::new(0),
        TimerQueue::<AttentionTimer>::new(),
        EventLog::new(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigurationError::MissingElement);
}

#[test]
fn string_overrides_configure_a_tracker() {
    let mut config = AttentionConfig::default();
    config
        .merge([
            ("pctInView", "25"),
            ("heartbeat_interval", "1000"),
            ("trackerId", "x"),
        ])
        .unwrap();
    let mut t = tracker_with(config, element(100.0, 100.0));
    t.signal(Signal::Load);
    t.advance_to(3000);
    assert_eq!(heartbeat_totals(&t), [1000, 2000, 3000]);
}

#[test]
fn closure_sink_receives_events() {
    let mut seen = Vec::new();
    {
        let mut t = AttentionTracker::new(
            AttentionConfig::default(),
            FixedGeometry::new(element(100.0, 100.0), VIEWPORT),
            ManualClock::new(0),
            TimerQueue::new(),
            |event: &AttentionEvent| seen.push(event.to_string()),
        )
        .unwrap();
        t.signal(Signal::Load);
        t.advance_to(2000);
    }
    assert_eq!(seen, ["heartbeat 1=2000ms"]);
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_settings_keep_defaults() {
        let config: AttentionConfig = serde_json::from_value(json!({
            "pctInView": 75,
            "heartbeatExpires": 60000,
            "trackerId": "ignored"
        }))
        .unwrap();
        assert_eq!(
            config,
            AttentionConfig::default()
                .with_pct_in_view(75.0)
                .with_heartbeat_expires(60_000)
        );
    }

    #[test]
    fn events_serialize_tagged() {
        let mut t = tracker(element(100.0, 100.0));
        t.signal(Signal::Load);
        t.advance_to(2000);
        t.flush();

        let events = serde_json::to_value(t.sink().events()).unwrap();
        assert_eq!(
            events,
            json!([
                {
                    "kind": "heartbeat",
                    "payload": {
                        "heartbeatCount": 1,
                        "totalAttentiveTime": 2000,
                        "viewportHeight": 1000.0,
                        "elementHeight": 100.0
                    }
                },
                {
                    "kind": "summary",
                    "payload": {
                        "heartbeatCount": 1,
                        "totalAttentiveTime": 2000,
                        "viewportHeight": 1000.0,
                        "elementHeight": 100.0
                    }
                }
            ])
        );
    }
}
