//! Virtual-time timer queue.
//!
//! Every delayed UI step (fade-in after display, display:none after fade-out,
//! status clearing, typewriter ticks) goes through a [`Scheduler`] instead of
//! a real timer. Time only moves when the owner asks it to, so tests can step
//! through a transition millisecond by millisecond.
//!
//! Scheduled tasks are never cancelled. A task that has become stale (its
//! item was re-filtered, its status message replaced) still fires when due.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Milliseconds since page load.
pub type Millis = u64;

#[derive(Debug)]
struct Entry<T> {
    due: Millis,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed: BinaryHeap is a max-heap and we want the earliest entry on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Timer queue ordered by due time, ties broken by scheduling order.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Millis,
    next_seq: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Run `task` once `delay` milliseconds from now have elapsed.
    pub fn schedule(&mut self, delay: Millis, task: T) {
        let entry = Entry {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(entry);
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest waiting task.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.peek().map(|e| e.due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time.
    ///
    /// Callers loop on this so that tasks scheduled while handling a popped
    /// task still run inside the same window.
    pub fn pop_due(&mut self, until: Millis) -> Option<T> {
        if self.queue.peek()?.due > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Move the clock forward to `until` once every due task has been popped.
    pub fn settle_at(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }

    /// Pop every task due within the next `delta` milliseconds, in order.
    ///
    /// Convenience for callers whose tasks never schedule more tasks.
    pub fn advance(&mut self, delta: Millis) -> Vec<T> {
        let until = self.now.saturating_add(delta);
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until) {
            fired.push(task);
        }
        self.settle_at(until);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(300, "hide");
        s.schedule(10, "show");
        assert_eq!(s.advance(5), Vec::<&str>::new());
        assert_eq!(s.advance(10), vec!["show"]);
        assert_eq!(s.now(), 15);
        assert_eq!(s.advance(1000), vec!["hide"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule(10, 1);
        s.schedule(10, 2);
        s.schedule(10, 3);
        assert_eq!(s.advance(10), vec![1, 2, 3]);
    }

    #[test]
    fn pop_due_moves_clock_to_task_time() {
        let mut s = Scheduler::new();
        s.schedule(40, ());
        assert_eq!(s.pop_due(100), Some(()));
        assert_eq!(s.now(), 40);
        assert_eq!(s.pop_due(100), None);
        s.settle_at(100);
        assert_eq!(s.now(), 100);
    }

    #[test]
    fn tasks_scheduled_mid_window_run_in_same_window() {
        let mut s = Scheduler::new();
        s.schedule(100, 0u32);
        let mut seen = Vec::new();
        while let Some(n) = s.pop_due(350) {
            seen.push((s.now(), n));
            if n < 5 {
                s.schedule(100, n + 1);
            }
        }
        assert_eq!(seen, vec![(100, 0), (200, 1), (300, 2)]);
        assert_eq!(s.next_due(), Some(400));
    }
}
