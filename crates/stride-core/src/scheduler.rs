//! Single-shot timer scheduling against simulation time
//!
//! Timers carry a payload event instead of a closure. The owner advances the
//! scheduler with the scaled simulation delta and dispatches whatever comes
//! due, so delivery always happens on the simulation thread between ticks.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

/// Handle to a pending single-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw identifier, unique per scheduler
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Errors that can occur when scheduling a timer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    #[error("timer delay must be finite and non-negative, got {0}")]
    InvalidDelay(f32),
}

/// A host-provided source of cancellable single-shot alarms.
pub trait Scheduler<E> {
    /// Arm a timer that yields `event` once `delay` simulated seconds have passed
    fn schedule_once(&mut self, delay: f32, event: E) -> Result<TimerHandle, SchedulerError>;

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Advance the clock and return every event that came due, earliest first
    fn advance(&mut self, dt: f32) -> Vec<E>;

    /// Check whether a timer is still pending
    fn is_pending(&self, handle: TimerHandle) -> bool;

    /// Number of timers still pending
    fn pending_count(&self) -> usize;
}

/// A timer waiting in the queue
#[derive(Debug)]
struct PendingTimer<E> {
    due: f64,
    handle: TimerHandle,
    event: E,
}

impl<E> PartialEq for PendingTimer<E> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}
impl<E> Eq for PendingTimer<E> {}

impl<E> PartialOrd for PendingTimer<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for PendingTimer<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is a max-heap); ties fire in arming order
        other
            .due
            .partial_cmp(&self.due)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.handle.0.cmp(&self.handle.0))
    }
}

/// Scheduler driven by simulated time
#[derive(Debug)]
pub struct SimScheduler<E> {
    /// Simulated seconds since creation
    now: f64,
    next_id: u64,
    pending: BinaryHeap<PendingTimer<E>>,
}

impl<E> Default for SimScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SimScheduler<E> {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Time remaining until a pending timer fires
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| (timer.due - self.now).max(0.0) as f32)
    }
}

impl<E> Scheduler<E> for SimScheduler<E> {
    fn schedule_once(&mut self, delay: f32, event: E) -> Result<TimerHandle, SchedulerError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SchedulerError::InvalidDelay(delay));
        }

        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            due: self.now + delay as f64,
            handle,
            event,
        });
        trace!(timer = handle.0, delay, "timer armed");
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        let cancelled = self.pending.len() != before;
        if cancelled {
            trace!(timer = handle.0, "timer cancelled");
        }
        cancelled
    }

    fn advance(&mut self, dt: f32) -> Vec<E> {
        self.now += dt.max(0.0) as f64;

        let mut fired = Vec::new();
        while self.pending.peek().is_some_and(|timer| timer.due <= self.now) {
            if let Some(timer) = self.pending.pop() {
                trace!(timer = timer.handle.0, "timer fired");
                fired.push(timer.event);
            }
        }
        fired
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
