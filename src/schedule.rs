//! Clocks and frame scheduling.
//!
//! Animations never sleep or spawn. Each one requests a frame from a
//! [`FrameScheduler`]; the host presents due frames and calls back into the
//! animation, which compares the presented handle with the one it holds.
//! Cancelling drops the handle, so a stale frame can never run.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Instant;

/// Source of monotonic time in milliseconds.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to a renderer.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `ms`. Time never moves backwards.
    pub fn set(&self, ms: f64) {
        self.now.set(self.now.get().max(ms));
    }

    /// Move forward by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Identifies a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// "Run me before the next refresh" and "never mind".
pub trait FrameScheduler {
    /// Request a callback on the next presented frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a previously requested frame. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Present a frame: return and forget every handle that was due.
    fn present(&mut self) -> Vec<FrameHandle>;

    /// Whether any frame is waiting to be presented.
    fn has_pending(&self) -> bool;
}

/// In-memory frame queue, presented by the host loop or a test.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    cancelled: usize,
}

impl FrameQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `handle` is still waiting.
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Number of frames waiting.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total number of frames cancelled while still pending.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle) {
            self.cancelled += 1;
        }
    }

    fn present(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared_and_monotonic() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(100.0);
        assert_eq!(other.now_ms(), 100.0);
        clock.set(50.0);
        assert_eq!(other.now_ms(), 100.0);
    }

    #[test]
    fn test_cancelled_frame_is_not_presented() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        queue.cancel_frame(a);

        assert_eq!(queue.present(), vec![b]);
        assert!(!queue.has_pending());
        assert_eq!(queue.cancelled_count(), 1);
    }

    #[test]
    fn test_cancel_after_present_is_ignored() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        queue.present();
        queue.cancel_frame(a);
        assert_eq!(queue.cancelled_count(), 0);
    }
}
