//! Single-producer/single-consumer walk-through of the split-transaction API.
//!
//! `Ring` never touches element storage, so this example owns the backing
//! array itself — here as a fixed array of `AtomicU64`, so a slot can be
//! written by whichever producer currently holds its claim token and read
//! by whichever consumer holds the matching one, without extra locking.

use mpmc_ring::Ring;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

const CAPACITY: usize = 16;
const ITEM_COUNT: u64 = 1_000_000;

fn main() {
    println!("mpmc-ring basic example");
    println!("========================\n");

    let ring = Arc::new(Ring::<CAPACITY>::new());
    let storage: Arc<[AtomicU64; CAPACITY]> =
        Arc::new(std::array::from_fn(|_| AtomicU64::new(0)));

    let producer_ring = Arc::clone(&ring);
    let producer_storage = Arc::clone(&storage);
    let producer = thread::spawn(move || {
        for i in 0..ITEM_COUNT {
            loop {
                if let Some(token) = producer_ring.put_begin() {
                    producer_storage[token.index()].store(i, Ordering::Relaxed);
                    producer_ring.put_commit(token);
                    break;
                }
                thread::yield_now();
            }
        }
    });

    let consumer_ring = Arc::clone(&ring);
    let consumer_storage = Arc::clone(&storage);
    let consumer = thread::spawn(move || {
        let mut sum = 0u64;
        let mut received = 0u64;
        while received < ITEM_COUNT {
            if let Some(token) = consumer_ring.get_begin() {
                sum += consumer_storage[token.index()].load(Ordering::Relaxed);
                consumer_ring.get_commit(token);
                received += 1;
            } else {
                thread::yield_now();
            }
        }
        sum
    });

    producer.join().unwrap();
    let sum = consumer.join().unwrap();

    println!("Consumed {ITEM_COUNT} items, sum = {sum}");
    assert_eq!(sum, (0..ITEM_COUNT).sum::<u64>());
}
