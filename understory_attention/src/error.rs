// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised when a tracker is created.

use core::fmt;

/// Error returned when tracking cannot start.
///
/// This is the only error the tracker produces. Everything after
/// initialization (missing geometry, stale timers, redundant signals) is
/// handled by failing closed rather than by returning errors.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// The tracked element could not be found when tracking started.
    MissingElement,
    /// `pct_in_view` is not a finite value in `0..=100`.
    PctInViewOutOfRange(f64),
    /// A duration that must be positive was zero.
    ZeroDuration {
        /// The configuration key.
        key: &'static str,
    },
    /// A key/value override could not be parsed for its key.
    InvalidValue {
        /// The configuration key.
        key: &'static str,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement => write!(f, "tracked element is not present in the document"),
            Self::PctInViewOutOfRange(pct) => {
                write!(f, "pctInView must be within 0..=100, got {pct}")
            }
            Self::ZeroDuration { key } => write!(f, "{key} must be greater than zero"),
            Self::InvalidValue { key } => write!(f, "invalid value for {key}"),
        }
    }
}

impl core::error::Error for ConfigurationError {}
