//! Deferred AN work queue
//!
//! A single-threaded FIFO of the two deferred tasks the AN interrupt
//! drives. Each task is queued at most once; queuing a task that is
//! already pending coalesces into the pending instance.

use crate::internal::constants::WORK_QUEUE_DEPTH;

/// Deferred task kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnWork {
    /// Hop from interrupt context to the worker
    Relay,
    /// Run the AN state machine
    Negotiate,
}

/// FIFO of pending [`AnWork`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkQueue {
    slots: [Option<AnWork>; WORK_QUEUE_DEPTH],
    running: Option<AnWork>,
}

impl WorkQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            slots: [None; WORK_QUEUE_DEPTH],
            running: None,
        }
    }

    /// Queue `work` behind the pending tasks
    ///
    /// Returns `false` if `work` was already pending.
    pub fn queue(&mut self, work: AnWork) -> bool {
        if self.is_pending(work) {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(work);
                true
            }
            // Unreachable with one slot per task kind
            None => false,
        }
    }

    /// Take the oldest pending task and mark it running
    pub fn start_next(&mut self) -> Option<AnWork> {
        let next = self.slots[0].take()?;
        self.slots.rotate_left(1);
        self.running = Some(next);
        Some(next)
    }

    /// Mark the running task finished
    pub fn finish(&mut self) {
        self.running = None;
    }

    /// Drop `work` if pending; returns whether it was
    pub fn cancel(&mut self, work: AnWork) -> bool {
        let Some(pos) = self.slots.iter().position(|slot| *slot == Some(work)) else {
            return false;
        };
        self.slots[pos] = None;
        self.slots[pos..].rotate_left(1);
        true
    }

    /// Whether `work` is waiting to run
    pub fn is_pending(&self, work: AnWork) -> bool {
        self.slots.contains(&Some(work))
    }

    /// Task currently running, if any
    pub const fn running(&self) -> Option<AnWork> {
        self.running
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}
