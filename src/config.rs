use thiserror::Error;

/// Smallest capacity a [`crate::Ring`] supports (I1).
pub const MIN_CAPACITY: usize = 2;

/// Largest capacity a [`crate::Ring`] supports (I1).
///
/// Bounded by the fact that sequence numbers and positions wrap at 256 and
/// the algorithm needs adjacent live values to fit in a signed 8-bit
/// difference; see `spec.md` §3 and §9's "Capacity = 128" note.
pub const MAX_CAPACITY: usize = 64;

/// Why a runtime-supplied capacity fails invariant I1.
///
/// This is the only fallible surface in the crate. The core begin/commit API
/// never returns a `Result`: would-block is `Option::None`, and anything
/// else is a programmer error caught by `debug_assert!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `capacity` is not a power of two.
    #[error("ring capacity {0} is not a power of two")]
    NotPowerOfTwo(usize),
    /// `capacity` is a power of two but outside `[MIN_CAPACITY, MAX_CAPACITY]`.
    #[error("ring capacity {0} is outside the supported range [{MIN_CAPACITY}, {MAX_CAPACITY}]")]
    OutOfRange(usize),
}

/// Validates a capacity against invariant I1 without requiring the caller to
/// monomorphize a [`crate::Ring`] first.
///
/// Useful when the desired capacity is only known at runtime (e.g. read from
/// a configuration file) and the caller wants a descriptive error before
/// selecting the matching `Ring::<CAPACITY>` type.
///
/// # Examples
///
/// ```
/// use mpmc_ring::validate_capacity;
///
/// assert!(validate_capacity(32).is_ok());
/// assert!(validate_capacity(3).is_err());
/// assert!(validate_capacity(128).is_err());
/// ```
pub fn validate_capacity(capacity: usize) -> Result<(), ConfigError> {
    if !capacity.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo(capacity));
    }
    if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) {
        return Err(ConfigError::OutOfRange(capacity));
    }
    Ok(())
}
