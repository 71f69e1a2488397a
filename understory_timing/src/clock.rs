// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond clocks.

use alloc::rc::Rc;
use core::cell::Cell;

/// A source of monotonic time in milliseconds.
///
/// The origin is arbitrary; only differences between readings are meaningful.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// A settable clock whose clones all observe the same time.
///
/// Useful for deterministic hosts (replays, simulations) and tests: hand one
/// clone to the state machine and keep another to move time forward.
///
/// ```rust
/// use understory_timing::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// let observer = clock.clone();
/// clock.advance(50);
/// assert_eq!(observer.now(), 150);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn new(start: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Sets the current time.
    ///
    /// Moving the clock backwards is allowed; consumers are expected to
    /// saturate differences rather than underflow.
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// Moves the clock forward by `delta` milliseconds.
    pub fn advance(&self, delta: u64) {
        self.now.set(self.now.get().saturating_add(delta));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

/// Wall clock backed by [`std::time::Instant`], counting from construction.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock that reads `0` now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
