// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker configuration.
//!
//! [`AttentionConfig`] is a plain struct with named, typed, defaulted fields.
//! User settings are layered over [`AttentionConfig::default`] in one of three
//! ways:
//!
//! - builder-style `with_*` setters,
//! - string key/value overrides through [`AttentionConfig::set`] (for hosts that
//!   read settings from markup attributes or query strings), where unknown keys
//!   are ignored,
//! - with the `serde` feature, deserializing a partial settings object; omitted
//!   keys keep their defaults and unknown keys are ignored.
//!
//! Keys use the `camelCase` names of the embedding API (`pctInView`,
//! `heartbeatInterval`, ...). [`AttentionConfig::set`] also accepts the
//! `snake_case` field names.

use core::str::FromStr;

use crate::ConfigurationError;

/// Configuration for an [`AttentionTracker`](crate::AttentionTracker).
///
/// All durations are in milliseconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct AttentionConfig {
    /// Percentage (`0..=100`) of the element, or of the viewport for tall
    /// elements, that must be visible for the element to count as in view.
    pub pct_in_view: f64,
    /// Period between heartbeat events while attentive.
    pub heartbeat_interval: u64,
    /// Cap on cumulative attentive time; once exceeded, no further heartbeats
    /// are emitted for the session.
    pub heartbeat_expires: u64,
    /// Inactivity after which attention lapses even while the element is in
    /// view.
    pub heartbeat_timeout: u64,
    /// Granularity of the idle countdown.
    pub idle_tick: u64,
    /// Quiet period before a burst of scroll or resize signals is acted on.
    pub debounce_delay: u64,
    /// Emit a heartbeat immediately on the first transition to attentive.
    pub initial_heartbeat: bool,
}

impl AttentionConfig {
    /// Default for [`pct_in_view`](Self::pct_in_view).
    pub const DEFAULT_PCT_IN_VIEW: f64 = 50.0;
    /// Default for [`heartbeat_interval`](Self::heartbeat_interval): 2 seconds.
    pub const DEFAULT_HEARTBEAT_INTERVAL: u64 = 2_000;
    /// Default for [`heartbeat_expires`](Self::heartbeat_expires): 3 minutes.
    pub const DEFAULT_HEARTBEAT_EXPIRES: u64 = 180_000;
    /// Default for [`heartbeat_timeout`](Self::heartbeat_timeout): 30 seconds.
    pub const DEFAULT_HEARTBEAT_TIMEOUT: u64 = 30_000;
    /// Default for [`idle_tick`](Self::idle_tick): 1 second.
    pub const DEFAULT_IDLE_TICK: u64 = 1_000;
    /// Default for [`debounce_delay`](Self::debounce_delay).
    pub const DEFAULT_DEBOUNCE_DELAY: u64 = 150;

    /// Sets [`pct_in_view`](Self::pct_in_view).
    #[must_use]
    pub fn with_pct_in_view(mut self, pct: f64) -> Self {
        self.pct_in_view = pct;
        self
    }

    /// Sets [`heartbeat_interval`](Self::heartbeat_interval).
    #[must_use]
    pub fn with_heartbeat_interval(mut self, ms: u64) -> Self {
        self.heartbeat_interval = ms;
        self
    }

    /// Sets [`heartbeat_expires`](Self::heartbeat_expires).
    #[must_use]
    pub fn with_heartbeat_expires(mut self, ms: u64) -> Self {
        self.heartbeat_expires = ms;
        self
    }

    /// Sets [`heartbeat_timeout`](Self::heartbeat_timeout).
    #[must_use]
    pub fn with_heartbeat_timeout(mut self, ms: u64) -> Self {
        self.heartbeat_timeout = ms;
        self
    }

    /// Sets [`idle_tick`](Self::idle_tick).
    #[must_use]
    pub fn with_idle_tick(mut self, ms: u64) -> Self {
        self.idle_tick = ms;
        self
    }

    /// Sets [`debounce_delay`](Self::debounce_delay).
    #[must_use]
    pub fn with_debounce_delay(mut self, ms: u64) -> Self {
        self.debounce_delay = ms;
        self
    }

    /// Sets [`initial_heartbeat`](Self::initial_heartbeat).
    #[must_use]
    pub fn with_initial_heartbeat(mut self, enabled: bool) -> Self {
        self.initial_heartbeat = enabled;
        self
    }

    /// Overrides one setting from a string key/value pair.
    ///
    /// Returns `Ok(true)` if the key was recognized and applied, and
    /// `Ok(false)` if the key is unknown (the override is ignored). A
    /// recognized key with an unparsable value is an error and leaves the
    /// configuration unchanged.
    ///
    /// ```rust
    /// use understory_attention::AttentionConfig;
    ///
    /// let mut config = AttentionConfig::default();
    /// assert_eq!(config.set("heartbeatInterval", "5000"), Ok(true));
    /// assert_eq!(config.set("element", ".article"), Ok(false));
    /// assert!(config.set("pctInView", "lots").is_err());
    /// assert_eq!(config.heartbeat_interval, 5000);
    /// ```
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool, ConfigurationError> {
        let value = value.trim();
        match key {
            "pctInView" | "pct_in_view" => self.pct_in_view = parse("pctInView", value)?,
            "heartbeatInterval" | "heartbeat_interval" => {
                self.heartbeat_interval = parse("heartbeatInterval", value)?;
            }
            "heartbeatExpires" | "heartbeat_expires" => {
                self.heartbeat_expires = parse("heartbeatExpires", value)?;
            }
            "heartbeatTimeout" | "heartbeat_timeout" => {
                self.heartbeat_timeout = parse("heartbeatTimeout", value)?;
            }
            "idleTick" | "idle_tick" => self.idle_tick = parse("idleTick", value)?,
            "debounceDelay" | "debounce_delay" => {
                self.debounce_delay = parse("debounceDelay", value)?;
            }
            "initialHeartbeat" | "initial_heartbeat" => {
                self.initial_heartbeat = parse("initialHeartbeat", value)?;
            }
            _ => {
                log::debug!("ignoring unknown attention setting `{key}`");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Applies a sequence of key/value overrides, ignoring unknown keys.
    ///
    /// Stops at the first invalid value.
    pub fn merge<'a, I>(&mut self, overrides: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in overrides {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Checks that the configuration can drive a tracker.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.pct_in_view.is_finite() || !(0.0..=100.0).contains(&self.pct_in_view) {
            return Err(ConfigurationError::PctInViewOutOfRange(self.pct_in_view));
        }
        for (key, value) in [
            ("heartbeatInterval", self.heartbeat_interval),
            ("heartbeatTimeout", self.heartbeat_timeout),
            ("idleTick", self.idle_tick),
        ] {
            if value == 0 {
                return Err(ConfigurationError::ZeroDuration { key });
            }
        }
        Ok(())
    }
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            pct_in_view: Self::DEFAULT_PCT_IN_VIEW,
            heartbeat_interval: Self::DEFAULT_HEARTBEAT_INTERVAL,
            heartbeat_expires: Self::DEFAULT_HEARTBEAT_EXPIRES,
            heartbeat_timeout: Self::DEFAULT_HEARTBEAT_TIMEOUT,
            idle_tick: Self::DEFAULT_IDLE_TICK,
            debounce_delay: Self::DEFAULT_DEBOUNCE_DELAY,
            initial_heartbeat: false,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigurationError> {
    value
        .parse()
        .map_err(|_| ConfigurationError::InvalidValue { key })
}
