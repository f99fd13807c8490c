//! Debug assertion macros for the claim protocol's internal bookkeeping.
//!
//! Active only in debug builds (`#[cfg(debug_assertions)]`); zero overhead in
//! release builds, matching the original C library's `assert()` usage.

/// A claim token must be redeemed against the exact ring instance that
/// produced it; mixing tokens between two rings would free or publish the
/// wrong slot.
macro_rules! debug_assert_claim_matches_ring {
    ($token:expr, $ring:expr) => {
        debug_assert!(
            core::ptr::eq($token.ring(), $ring),
            "claim token redeemed against a different ring instance than the one that issued it"
        )
    };
}

/// Before a commit overwrites a slot's sequence number, the slot must still
/// hold the value the matching begin left it in, otherwise something else
/// raced in between begin and commit, which the protocol should make
/// impossible.
macro_rules! debug_assert_slot_sequence {
    ($actual:expr, $expected:expr, $what:literal) => {
        debug_assert_eq!(
            $actual, $expected,
            "slot sequence was {} but {} expected {}",
            $actual, $what, $expected
        )
    };
}

pub(crate) use debug_assert_claim_matches_ring;
pub(crate) use debug_assert_slot_sequence;
