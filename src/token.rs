use crate::Ring;

/// Opaque handle returned by [`Ring::put_begin`]/[`Ring::get_begin`],
/// consumed by the matching `put_commit`/`get_commit`.
///
/// Carries the claimed slot index and the position at which it was claimed.
/// Only [`ClaimToken::index`] is meant for callers: they use it to address
/// their own backing array. The position is needed internally to compute the
/// slot's next sequence number on commit.
///
/// A `ClaimToken` is move-only (no `Clone`, no `Copy`): it must be consumed
/// exactly once by the matching commit, and must not outlive the ring that
/// produced it.
#[derive(Debug)]
#[must_use = "a claim token must be consumed by the matching put_commit/get_commit"]
pub struct ClaimToken<const CAPACITY: usize> {
    index: usize,
    pos: u8,
    ring: *const Ring<CAPACITY>,
}

impl<const CAPACITY: usize> ClaimToken<CAPACITY> {
    pub(crate) fn new(index: usize, pos: u8, ring: *const Ring<CAPACITY>) -> Self {
        Self { index, pos, ring }
    }

    /// The slot index into the caller's backing array.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn pos(&self) -> u8 {
        self.pos
    }

    #[inline]
    pub(crate) fn ring(&self) -> *const Ring<CAPACITY> {
        self.ring
    }
}
