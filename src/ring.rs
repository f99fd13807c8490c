//! The bounded MPMC ring: shared position counters plus a per-slot sequence
//! number array that doubles as the ring's only state tag.
//!
//! # Memory ordering
//!
//! - `put_pos`/`get_pos` are claimed with a compare-exchange loop
//!   (`Acquire` on load, `AcqRel`/`Acquire` on the CAS itself) so a producer
//!   (or consumer) that loses the race observes the winner's new position
//!   before retrying.
//! - `sequences[i]` is read with `Acquire` in `*_begin` and written with
//!   `Release` in the matching `*_commit`. The `Release` store publishes the
//!   element the caller wrote between begin and commit; the paired
//!   `Acquire` load is what lets the other side's `*_begin` see that write
//!   before handing out the slot.
//! - Only the holder of a claim token ever stores into that slot's sequence
//!   number before the matching commit runs, so the store in
//!   `put_commit`/`get_commit` needs no CAS.

use crossbeam_utils::CachePadded;
use std::array;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::invariants::{debug_assert_claim_matches_ring, debug_assert_slot_sequence};
use crate::token::ClaimToken;
use crate::trace::ring_trace;

/// Returns the signed 8-bit difference `a - b`, wrapping modulo 256.
///
/// Valid as long as the true difference between any two live sequence or
/// position values fits in `i8`'s range, which the capacity ceiling of 64
/// guarantees.
#[inline]
fn signed_diff(a: u8, b: u8) -> i8 {
    a.wrapping_sub(b) as i8
}

/// A bounded, lock-free MPMC ring that allocates *indices*, not storage.
///
/// `Ring` does not own element storage: callers pair it with their own
/// `[T; CAPACITY]` (or any array-like type addressed by `usize`). A producer
/// calls [`put_begin`](Ring::put_begin) to claim a slot, writes the element
/// into their array at the returned [`ClaimToken::index`], then calls
/// [`put_commit`](Ring::put_commit) to publish it. A consumer does the dual
/// with [`get_begin`](Ring::get_begin)/[`get_commit`](Ring::get_commit).
///
/// `CAPACITY` must be a power of two in `[2, 64]`; this is checked at
/// compile time in [`Ring::new`]. Because `CAPACITY` is a `const` generic,
/// `Ring<CAPACITY>` has no heap allocation and can be placed directly in a
/// `static` (see the [`mpmc_ring!`](crate::mpmc_ring) macro).
#[repr(C)]
pub struct Ring<const CAPACITY: usize> {
    /// Producer cursor: the position of the next slot a producer will try
    /// to claim. Advanced only by a successful CAS in `put_begin`.
    put_pos: CachePadded<AtomicU8>,
    /// Consumer cursor: the dual of `put_pos`, advanced only in `get_begin`.
    get_pos: CachePadded<AtomicU8>,
    /// One sequence number per slot; encodes both slot state and wave. Not
    /// cache-line padded: under contention every producer/consumer touches a
    /// different slot, so there's no single hot line to protect the way
    /// there is for `put_pos`/`get_pos`.
    sequences: [AtomicU8; CAPACITY],
}

// Safety: all shared mutation goes through atomics (CAS on the position
// counters, single-writer stores on `sequences[i]` authorized by possession
// of a claim token for that slot). There is no `T` to worry about: the ring
// only ever moves `usize` indices and `u8` positions.
unsafe impl<const CAPACITY: usize> Send for Ring<CAPACITY> {}
unsafe impl<const CAPACITY: usize> Sync for Ring<CAPACITY> {}

impl<const CAPACITY: usize> Ring<CAPACITY> {
    /// Forces a compile-time error if `CAPACITY` isn't a power of two in
    /// `[2, 64]`. Referenced from [`Ring::new`] so it is evaluated at
    /// monomorphization time for every concrete `CAPACITY` the crate is
    /// built with.
    const CAPACITY_VALID: () = assert!(
        CAPACITY >= crate::config::MIN_CAPACITY
            && CAPACITY <= crate::config::MAX_CAPACITY
            && CAPACITY.is_power_of_two(),
        "Ring capacity must be a power of two in [2, 64]",
    );

    const MASK: usize = CAPACITY - 1;

    /// Creates a new, initialized ring: `put_pos = get_pos = 0`,
    /// `sequences[i] = i`.
    ///
    /// # Panics
    ///
    /// Fails to compile if `CAPACITY` is not a power of two in `[2, 64]`.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::CAPACITY_VALID;
        Self {
            put_pos: CachePadded::new(AtomicU8::new(0)),
            get_pos: CachePadded::new(AtomicU8::new(0)),
            sequences: array::from_fn(|i| AtomicU8::new(i as u8)),
        }
    }

    /// Resets a ring to its fresh, empty state.
    ///
    /// Takes `&mut self`: the borrow checker enforces the precondition that
    /// calling `init` on a live, shared ring is undefined: you cannot hold
    /// a `&mut Ring` while any producer or consumer holds a shared reference
    /// to it.
    pub fn init(&mut self) {
        self.put_pos.store(0, Ordering::Relaxed);
        self.get_pos.store(0, Ordering::Relaxed);
        for (i, slot) in self.sequences.iter_mut().enumerate() {
            *slot.get_mut() = i as u8;
        }
    }

    /// The ring's capacity. Fixed for the lifetime of the ring; it never
    /// grows or shrinks.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        CAPACITY
    }

    /// Attempts to reserve a slot for a producer.
    ///
    /// Returns `None` immediately if the ring is full; this never spins or
    /// blocks.
    pub fn put_begin(&self) -> Option<ClaimToken<CAPACITY>> {
        let mut p = self.put_pos.load(Ordering::Acquire);
        loop {
            let i = (p as usize) & Self::MASK;
            let seq = self.sequences[i].load(Ordering::Acquire);
            let dif = signed_diff(seq, p);
            if dif == 0 {
                match self.put_pos.compare_exchange_weak(
                    p,
                    p.wrapping_add(1),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => {
                        ring_trace!("put_begin: claimed slot {i} at pos {p}");
                        return Some(ClaimToken::new(i, p, self));
                    }
                    Err(actual) => p = actual,
                }
            } else if dif < 0 {
                // Slot is still in the previous wave: a producer lapped the
                // consumer. The ring is full.
                return None;
            } else {
                // Another producer has already advanced past this position.
                p = self.put_pos.load(Ordering::Acquire);
            }
        }
    }

    /// Publishes the element claimed by `token`.
    ///
    /// Commits never fail. Only the holder of `token` is permitted to write
    /// this slot's sequence number, so no CAS is needed; just a
    /// release-ordered store so the caller's element write (done between
    /// `put_begin` and this call) is visible to whichever consumer observes
    /// the new sequence value.
    pub fn put_commit(&self, token: ClaimToken<CAPACITY>) {
        debug_assert_claim_matches_ring!(token, self);
        let index = token.index();
        let pos = token.pos();
        debug_assert_slot_sequence!(
            self.sequences[index].load(Ordering::Relaxed),
            pos,
            "put_commit"
        );
        self.sequences[index].store(pos.wrapping_add(1), Ordering::Release);
        ring_trace!("put_commit: published slot {index} at pos {pos}");
    }

    /// The dual of [`put_begin`](Ring::put_begin): attempts to reserve an
    /// occupied slot for a consumer.
    ///
    /// Returns `None` immediately if the ring is empty.
    pub fn get_begin(&self) -> Option<ClaimToken<CAPACITY>> {
        let mut p = self.get_pos.load(Ordering::Acquire);
        loop {
            let i = (p as usize) & Self::MASK;
            let seq = self.sequences[i].load(Ordering::Acquire);
            let dif = signed_diff(seq, p.wrapping_add(1));
            if dif == 0 {
                match self.get_pos.compare_exchange_weak(
                    p,
                    p.wrapping_add(1),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => {
                        ring_trace!("get_begin: claimed slot {i} at pos {p}");
                        return Some(ClaimToken::new(i, p, self));
                    }
                    Err(actual) => p = actual,
                }
            } else if dif < 0 {
                // Slot is still empty: the consumer has caught up to the
                // producer. The ring is empty.
                return None;
            } else {
                p = self.get_pos.load(Ordering::Acquire);
            }
        }
    }

    /// Finishes consuming the element claimed by `token`, freeing the slot
    /// for the next producer wave.
    pub fn get_commit(&self, token: ClaimToken<CAPACITY>) {
        debug_assert_claim_matches_ring!(token, self);
        let index = token.index();
        let pos = token.pos();
        debug_assert_slot_sequence!(
            self.sequences[index].load(Ordering::Relaxed),
            pos.wrapping_add(1),
            "get_commit"
        );
        self.sequences[index].store(pos.wrapping_add(CAPACITY as u8), Ordering::Release);
        ring_trace!("get_commit: freed slot {index} at pos {pos}");
    }

    /// A best-effort snapshot of the number of elements currently queued.
    ///
    /// Reads `put_pos` and `get_pos` without synchronizing the two loads
    /// against each other, so under concurrent mutation this may transiently
    /// read as negative or otherwise outside `[0, CAPACITY]`. In a quiescent
    /// ring it is exact and within bounds.
    #[must_use]
    pub fn elements(&self) -> i32 {
        let put = self.put_pos.load(Ordering::Relaxed);
        let get = self.get_pos.load(Ordering::Relaxed);
        i32::from(signed_diff(put, get))
    }

    /// `true` iff [`elements`](Ring::elements) reads as zero right now.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.elements() == 0
    }
}

impl<const CAPACITY: usize> Default for Ring<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares a ring as a lazily-initialized file-scope `static`, the
/// idiomatic counterpart of the original C library's `MPMC_RING(name, size)`
/// macro. `CAPACITY` is not required to be usable in a `const` context to
/// build the ring ([`Ring::new`] is not itself `const`, since the sequence
/// array's per-slot initial values are computed at construction time), so
/// the backing static is a [`std::sync::LazyLock`] rather than a bare
/// `const`-initialized item; the first access on any thread pays the
/// (cheap, allocation-free) one-time initialization, and every access after
/// that derefs straight through to the `Ring`.
///
/// ```
/// use mpmc_ring::mpmc_ring;
///
/// mpmc_ring!(RING32, 32);
///
/// assert!(RING32.empty());
/// assert_eq!(RING32.size(), 32);
/// ```
#[macro_export]
macro_rules! mpmc_ring {
    ($name:ident, $capacity:expr) => {
        static $name: ::std::sync::LazyLock<$crate::Ring<$capacity>> =
            ::std::sync::LazyLock::new($crate::Ring::new);
    };
}
