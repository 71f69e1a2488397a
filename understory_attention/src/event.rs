// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Emitted events and the sinks that deliver them.

use alloc::vec::Vec;
use core::fmt;

/// Progress snapshot carried by every emitted event.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct AttentionPayload {
    /// Heartbeats emitted so far in this session.
    pub heartbeat_count: u64,
    /// Accumulated attentive time in milliseconds.
    pub total_attentive_time: u64,
    /// Viewport height when the event was produced.
    pub viewport_height: f64,
    /// Element height when the event was produced, `0.0` if the element is
    /// gone.
    pub element_height: f64,
}

/// An event emitted by the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "payload", rename_all = "camelCase")
)]
pub enum AttentionEvent {
    /// Periodic progress while attentive.
    Heartbeat(AttentionPayload),
    /// Final totals, emitted on flush or unload.
    Summary(AttentionPayload),
}

impl AttentionEvent {
    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &AttentionPayload {
        match self {
            Self::Heartbeat(payload) | Self::Summary(payload) => payload,
        }
    }

    /// Returns `true` for heartbeats.
    #[must_use]
    pub fn is_heartbeat(&self) -> bool {
        matches!(self, Self::Heartbeat(_))
    }
}

impl fmt::Display for AttentionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heartbeat(p) => write!(
                f,
                "heartbeat {}={}ms",
                p.heartbeat_count, p.total_attentive_time
            ),
            Self::Summary(p) => write!(
                f,
                "totaltime: {}ms after {} heartbeats (viewport {}px, element {}px)",
                p.total_attentive_time, p.heartbeat_count, p.viewport_height, p.element_height
            ),
        }
    }
}

/// Receives events from the tracker.
///
/// This is the seam to the actual transport: a network beacon, a queue, a
/// log. Closures taking `&AttentionEvent` implement it directly.
pub trait EventSink {
    /// Delivers one event.
    fn emit(&mut self, event: &AttentionEvent);
}

impl<F: FnMut(&AttentionEvent)> EventSink for F {
    fn emit(&mut self, event: &AttentionEvent) {
        self(event);
    }
}

/// Writes every event to the [`log`] facade at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: &AttentionEvent) {
        log::info!(target: "understory_attention::event", "{event}");
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: Vec<AttentionEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[AttentionEvent] {
        &self.events
    }

    /// Returns only the heartbeat payloads.
    pub fn heartbeats(&self) -> impl Iterator<Item = &AttentionPayload> + '_ {
        self.events
            .iter()
            .filter(|e| e.is_heartbeat())
            .map(AttentionEvent::payload)
    }

    /// Returns only the summary payloads.
    pub fn summaries(&self) -> impl Iterator<Item = &AttentionPayload> + '_ {
        self.events
            .iter()
            .filter(|e| !e.is_heartbeat())
            .map(AttentionEvent::payload)
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<AttentionEvent> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AttentionEvent) {
        self.events.push(*event);
    }
}
