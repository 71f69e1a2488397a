// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual-time timer queue.

use alloc::vec::Vec;

use crate::{Scheduler, TimerId};

/// A timer that expired, as returned by [`TimerQueue::pop_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Id the timer was scheduled under.
    pub id: TimerId,
    /// The time at which the timer was due.
    pub deadline: u64,
    /// Payload supplied when scheduling.
    pub timer: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: u64,
    period: Option<u64>,
    timer: T,
}

/// A deterministic [`Scheduler`] driven by explicit time advancement.
///
/// The queue keeps its own notion of "now": new timers are scheduled relative
/// to it, and [`pop_due`](Self::pop_due) moves it forward to the deadline of
/// each timer it yields. Draining with `pop_due(t)` until it returns `None`
/// therefore replays every expiry up to `t` at the exact instant it was due,
/// including periodic timers that expire several times.
///
/// Timers with equal deadlines fire in the order they were first scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue at time `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates an empty queue whose current time is `now`.
    #[must_use]
    pub fn starting_at(now: u64) -> Self {
        Self {
            now,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Returns the queue's current time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Moves the queue's current time forward to `now`.
    ///
    /// Time never moves backwards; earlier values are ignored. Timers that
    /// become due are not fired; use [`pop_due`](Self::pop_due) for that.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Returns the number of live timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes every timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, delay: u64, period: Option<u64>, timer: T) -> TimerId {
        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline: self.now.saturating_add(delay),
            period,
            timer,
        });
        id
    }

    fn earliest_due(&self, now: u64) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(index, _)| index)
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pops the earliest timer that is due at or before `now`.
    ///
    /// The queue's time moves to the popped timer's deadline. Periodic timers
    /// are re-armed one period later and stay scheduled. When nothing is due,
    /// the queue's time moves to `now` and `None` is returned.
    pub fn pop_due(&mut self, now: u64) -> Option<Expired<T>> {
        let Some(index) = self.earliest_due(now) else {
            self.set_now(now);
            return None;
        };
        let deadline = self.entries[index].deadline;
        self.set_now(deadline);

        let expired = match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.deadline = deadline.saturating_add(period);
                Expired {
                    id: entry.id,
                    deadline,
                    timer: entry.timer.clone(),
                }
            }
            None => {
                let entry = self.entries.swap_remove(index);
                Expired {
                    id: entry.id,
                    deadline,
                    timer: entry.timer,
                }
            }
        };
        Some(expired)
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn after(&mut self, delay: u64, timer: T) -> TimerId {
        self.push(delay, None, timer)
    }

    fn every(&mut self, period: u64, timer: T) -> TimerId {
        // A zero period would never let time advance past the deadline.
        let period = period.max(1);
        self.push(period, Some(period), timer)
    }

    fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }
}
