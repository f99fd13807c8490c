//! A bounded, lock-free, multi-producer/multi-consumer ring buffer.
//!
//! [`Ring`] arbitrates concurrent enqueue/dequeue among an arbitrary number
//! of producers and consumers using only atomic compare-and-swap on
//! single bytes: no locks, no blocking, no dynamic allocation. It is a
//! faithful port of the sequence-number design used by Contiki-NG's
//! `mpmc-ring` library, restructured around Rust's ownership system: the
//! ring is a pure index allocator and never touches the caller's element
//! storage.
//!
//! # Split-transaction API
//!
//! A producer calls [`Ring::put_begin`] to claim a slot, writes into its own
//! backing array at [`ClaimToken::index`], then calls [`Ring::put_commit`]
//! to publish the element. A consumer does the dual with
//! [`Ring::get_begin`]/[`Ring::get_commit`]. `begin` never blocks: it
//! returns `None` immediately when the ring is full (for producers) or
//! empty (for consumers).
//!
//! ```
//! use mpmc_ring::Ring;
//!
//! let ring: Ring<8> = Ring::new();
//! let mut storage = [0u64; 8];
//!
//! let token = ring.put_begin().expect("ring has room");
//! storage[token.index()] = 42;
//! ring.put_commit(token);
//!
//! let token = ring.get_begin().expect("ring has an element");
//! assert_eq!(storage[token.index()], 42);
//! ring.get_commit(token);
//!
//! assert!(ring.empty());
//! ```
//!
//! # What this crate does not do
//!
//! Growing/shrinking the ring, blocking waits, priority inheritance,
//! per-element locks, and wait-freedom are all out of scope; see the
//! module docs on [`Ring`] for the invariants this *does* guarantee.

mod backoff;
mod config;
mod invariants;
mod ring;
mod token;
mod trace;

pub use backoff::Backoff;
pub use config::{validate_capacity, ConfigError, MAX_CAPACITY, MIN_CAPACITY};
pub use ring::Ring;
pub use token::ClaimToken;
