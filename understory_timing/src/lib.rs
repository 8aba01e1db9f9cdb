// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI state machines often need "do this later unless something else happens
//! first": open a tooltip after a delay, close it after a grace period, expire a
//! double-click window. This crate models exactly that bookkeeping and nothing
//! more.
//!
//! - [`TimerQueue`] holds pending timers, each carrying an application payload.
//! - [`TimerQueue::schedule`] returns a [`TimerId`] handle.
//! - [`TimerQueue::cancel`] is synchronous and reports whether the timer was
//!   still pending (it returns the payload) or had already fired.
//! - [`TimerQueue::pop_due`] hands out expired timers in deadline order.
//!
//! The queue never reads a clock. Hosts pass monotonic timestamps (milliseconds
//! in the examples, but any consistent unit works) and decide when to poll,
//! typically by sleeping until [`TimerQueue::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let open = timers.schedule(1_000, 750, "open");
//! let close = timers.schedule(1_000, 300, "close");
//!
//! // Cancel before it fires: the payload comes back.
//! assert_eq!(timers.cancel(close), Some("close"));
//!
//! // Nothing is due yet.
//! assert!(timers.pop_due(1_500).is_none());
//! assert_eq!(timers.next_deadline(), Some(1_750));
//!
//! let fired = timers.pop_due(1_750).unwrap();
//! assert_eq!(fired.id, open);
//! assert_eq!(fired.payload, "open");
//!
//! // Cancelling after it fired is a no-op.
//! assert_eq!(timers.cancel(open), None);
//! ```
//!
//! ## Ordering
//!
//! Timers fire in ascending deadline order. Timers sharing a deadline fire in
//! the order they were scheduled. A timer scheduled while draining (for example
//! a follow-up timer chained from an expiry handler) is delivered by the same
//! drain if its deadline is already due.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Handle to a scheduled timer.
///
/// Handles are unique for the lifetime of the [`TimerQueue`] that issued them;
/// a handle is never reused, so a stale handle can't cancel a newer timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw sequence number of this handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer removed from the queue because its deadline passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Handle returned when the timer was scheduled.
    pub id: TimerId,
    /// Timestamp at which the timer became due.
    ///
    /// Chained timers should be scheduled relative to this rather than the
    /// polling timestamp, so a late poll doesn't stretch the chain.
    pub deadline: u64,
    /// Application payload.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: u64,
    payload: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (u64, TimerId) {
        (self.deadline, self.id)
    }
}

/// A queue of pending timers ordered by deadline.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    // Sorted descending by (deadline, id) so the earliest timer is at the end.
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire `delay` units after `now`.
    ///
    /// The deadline saturates at `u64::MAX`.
    pub fn schedule(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let entry = Entry {
            id,
            deadline: now.saturating_add(delay),
            payload,
        };
        let key = entry.key();
        let idx = self.entries.partition_point(|e| e.key() > key);
        self.entries.insert(idx, entry);
        id
    }

    /// Cancel a pending timer.
    ///
    /// Returns the payload if the timer had not fired yet, or `None` if it
    /// already fired or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).payload)
    }

    /// Returns `true` if `id` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.deadline)
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.last().map(|e| e.deadline)
    }

    /// Remove and return the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Expired<T>> {
        if self.entries.last()?.deadline > now {
            return None;
        }
        let Entry {
            id,
            deadline,
            payload,
        } = self.entries.pop()?;
        Some(Expired {
            id,
            deadline,
            payload,
        })
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending timer without firing it.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn drain<T>(q: &mut TimerQueue<T>, now: u64) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(e) = q.pop_due(now) {
            out.push(e.payload);
        }
        out
    }

    #[test]
    fn empty_queue_has_no_deadline() {
        let q = TimerQueue::<()>::new();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(0, 30, 'c');
        q.schedule(0, 10, 'a');
        q.schedule(0, 20, 'b');
        assert_eq!(q.next_deadline(), Some(10));
        assert_eq!(drain(&mut q, 100), vec!['a', 'b', 'c']);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(5, 10, 1);
        q.schedule(0, 15, 2);
        q.schedule(15, 0, 3);
        assert_eq!(drain(&mut q, 15), vec![1, 2, 3]);
    }

    #[test]
    fn not_due_before_deadline() {
        let mut q = TimerQueue::new();
        let id = q.schedule(100, 50, ());
        assert!(q.pop_due(149).is_none());
        assert!(q.is_pending(id));
        let e = q.pop_due(150).unwrap();
        assert_eq!(e.id, id);
        assert_eq!(e.deadline, 150);
        assert!(!q.is_pending(id));
    }

    #[test]
    fn cancel_reports_whether_timer_was_pending() {
        let mut q = TimerQueue::new();
        let a = q.schedule(0, 10, "a");
        let b = q.schedule(0, 20, "b");
        assert_eq!(q.cancel(a), Some("a"));
        assert_eq!(q.cancel(a), None);
        assert_eq!(q.pop_due(20).map(|e| e.payload), Some("b"));
        assert_eq!(q.cancel(b), None);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut q = TimerQueue::new();
        let a = q.schedule(0, 10, ());
        q.cancel(a);
        let b = q.schedule(0, 10, ());
        assert_ne!(a, b);
        assert_eq!(q.cancel(a), None);
        assert!(q.is_pending(b));
    }

    #[test]
    fn chained_timer_due_in_same_drain() {
        let mut q = TimerQueue::new();
        q.schedule(0, 10, 0_u32);
        q.schedule(0, 40, 2_u32);
        let mut seen = Vec::new();
        while let Some(e) = q.pop_due(40) {
            seen.push(e.payload);
            if e.payload == 0 {
                q.schedule(e.deadline, 5, 1);
            }
        }
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn deadline_saturates() {
        let mut q = TimerQueue::new();
        let id = q.schedule(u64::MAX - 1, 10, ());
        assert_eq!(q.deadline(id), Some(u64::MAX));
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        let id = q.schedule(0, 1, ());
        q.schedule(0, 2, ());
        q.clear();
        assert_eq!(q.len(), 0);
        assert_eq!(q.cancel(id), None);
    }
}
