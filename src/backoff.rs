use std::hint;
use std::thread;

/// Adaptive backoff strategy (crossbeam-style): spin with a PAUSE hint, then
/// yield to the OS, then give up.
///
/// The ring itself never waits: `put_begin`/`get_begin` return `None`
/// immediately when the queue is full or empty. `Backoff` is an opt-in
/// helper for callers who want to retry around a `None` result instead of
/// busy-looping or dropping; nothing in [`crate::Ring`] uses it internally.
///
/// # Example
///
/// ```
/// use mpmc_ring::{Backoff, Ring};
///
/// let ring: Ring<4> = Ring::new();
/// let mut backoff = Backoff::new();
/// loop {
///     if let Some(token) = ring.put_begin() {
///         ring.put_commit(token);
///         break;
///     }
///     if backoff.is_completed() {
///         break; // give up; caller decides what "full" means to do next
///     }
///     backoff.snooze();
/// }
/// ```
#[derive(Debug)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6;
    const YIELD_LIMIT: u32 = 10;

    /// Creates a new backoff instance at step zero.
    #[inline]
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Light spin with PAUSE hints.
    #[inline]
    pub fn spin(&mut self) {
        let spins = 1 << self.step.min(Self::SPIN_LIMIT);
        for _ in 0..spins {
            hint::spin_loop();
        }
        if self.step <= Self::SPIN_LIMIT {
            self.step += 1;
        }
    }

    /// Heavier backoff: spin while cheap, then yield to the scheduler.
    #[inline]
    pub fn snooze(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            self.spin();
        } else {
            thread::yield_now();
            if self.step <= Self::YIELD_LIMIT {
                self.step += 1;
            }
        }
    }

    /// Whether this backoff has exhausted its patience.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.step > Self::YIELD_LIMIT
    }

    /// Resets the backoff for the next wait cycle.
    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
