//! Demonstrates the property spec.md §5 cares about most: a producer that
//! can never block, because it might be running from interrupt context.
//!
//! `interrupt_producer` below stands in for an ISR: it calls `put_begin`
//! exactly once per event and, if the ring is full, drops the event and
//! counts it rather than spinning or waiting — an interrupt handler that
//! spun here could deadlock the system it interrupted. A regular worker
//! thread uses [`mpmc_ring::Backoff`] instead, since it *can* afford to
//! wait a little for the consumer to catch up.

use mpmc_ring::{Backoff, Ring};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const CAPACITY: usize = 8;
const INTERRUPT_EVENTS: u64 = 20_000;

fn main() {
    let ring = Arc::new(Ring::<CAPACITY>::new());
    let storage: Arc<[AtomicU64; CAPACITY]> =
        Arc::new(std::array::from_fn(|_| AtomicU64::new(0)));
    let dropped = Arc::new(AtomicU32::new(0));

    // Stand-in for an interrupt handler: one put_begin per event, never
    // retried in place.
    let isr_ring = Arc::clone(&ring);
    let isr_storage = Arc::clone(&storage);
    let isr_dropped = Arc::clone(&dropped);
    let interrupt_producer = thread::spawn(move || {
        for i in 0..INTERRUPT_EVENTS {
            match isr_ring.put_begin() {
                Some(token) => {
                    isr_storage[token.index()].store(i, Ordering::Relaxed);
                    isr_ring.put_commit(token);
                }
                None => {
                    isr_dropped.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    });

    // A regular consumer thread, which can afford to back off when the
    // ring is momentarily empty.
    let consumer_ring = Arc::clone(&ring);
    let consumer_storage = Arc::clone(&storage);
    let consumer = thread::spawn(move || {
        let mut backoff = Backoff::new();
        let mut received = 0u64;
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while received < INTERRUPT_EVENTS && std::time::Instant::now() < deadline {
            if let Some(token) = consumer_ring.get_begin() {
                let _ = consumer_storage[token.index()].load(Ordering::Relaxed);
                consumer_ring.get_commit(token);
                received += 1;
                backoff.reset();
            } else {
                backoff.snooze();
            }
        }
        received
    });

    interrupt_producer.join().unwrap();
    let received = consumer.join().unwrap();

    println!(
        "interrupt producer finished: {received} consumed, {} dropped (ring full)",
        dropped.load(Ordering::Relaxed)
    );
}
