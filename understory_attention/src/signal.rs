// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs to the tracker: page signals and the timers it schedules.

/// A page-level signal delivered by the host.
///
/// Hosts register for the real platform events (DOM `scroll`, `resize`,
/// `load`, `focus`, `blur`, pointer and key input, `beforeunload`) and forward
/// them to [`AttentionTracker::signal`](crate::AttentionTracker::signal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The document scrolled. Debounced, then visibility is re-evaluated.
    Scroll,
    /// The viewport resized. Debounced, then the viewport band is recomputed.
    Resize,
    /// The document finished loading.
    Load,
    /// The window gained focus.
    Focus,
    /// The window lost focus.
    Blur,
    /// Pointer or key input. Renews the idle budget only.
    Activity,
    /// The page is about to unload. Equivalent to a flush.
    Unload,
}

impl Signal {
    /// Maps a key press, named as in DOM `KeyboardEvent.key`, to a signal.
    ///
    /// Vertical arrow keys scroll the document and are treated as
    /// [`Signal::Scroll`]; every other key is [`Signal::Activity`].
    ///
    /// ```rust
    /// use understory_attention::Signal;
    ///
    /// assert_eq!(Signal::from_key("ArrowDown"), Signal::Scroll);
    /// assert_eq!(Signal::from_key("a"), Signal::Activity);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowUp" | "ArrowDown" | "Up" | "Down" => Self::Scroll,
            _ => Self::Activity,
        }
    }
}

/// Timers the tracker asks its [`Scheduler`](understory_timing::Scheduler) for.
///
/// When one fires, hand it back with
/// [`AttentionTracker::on_timer`](crate::AttentionTracker::on_timer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttentionTimer {
    /// Periodic heartbeat while attentive.
    Heartbeat,
    /// Periodic idle countdown tick while attentive.
    IdleTick,
    /// The scroll debounce settled.
    ScrollSettled,
    /// The resize debounce settled.
    ResizeSettled,
}
