use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mpmc_ring::Ring;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

const CAPACITY: usize = 64;
const MSG_PER_PRODUCER: u64 = 2_000_000;

fn bench_spsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc");
    group.throughput(Throughput::Elements(MSG_PER_PRODUCER));

    group.bench_function("single_producer_consumer", |b| {
        b.iter(|| {
            let ring = Arc::new(Ring::<CAPACITY>::new());
            let storage: Arc<[AtomicU64; CAPACITY]> =
                Arc::new(std::array::from_fn(|_| AtomicU64::new(0)));

            let p_ring = Arc::clone(&ring);
            let p_storage = Arc::clone(&storage);
            let producer = thread::spawn(move || {
                for i in 0..MSG_PER_PRODUCER {
                    loop {
                        if let Some(token) = p_ring.put_begin() {
                            p_storage[token.index()].store(i, Ordering::Relaxed);
                            p_ring.put_commit(token);
                            break;
                        }
                        std::hint::spin_loop();
                    }
                }
            });

            let mut received = 0u64;
            while received < MSG_PER_PRODUCER {
                if let Some(token) = ring.get_begin() {
                    black_box(storage[token.index()].load(Ordering::Relaxed));
                    ring.get_commit(token);
                    received += 1;
                } else {
                    std::hint::spin_loop();
                }
            }

            producer.join().unwrap();
        });
    });

    group.finish();
}

fn bench_mpmc(c: &mut Criterion) {
    let mut group = c.benchmark_group("mpmc");

    for &num_threads in &[2u64, 4, 8] {
        let total_msgs = MSG_PER_PRODUCER * num_threads;
        group.throughput(Throughput::Elements(total_msgs));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{num_threads}P_{num_threads}C")),
            &num_threads,
            |b, &n| {
                b.iter(|| {
                    let ring = Arc::new(Ring::<CAPACITY>::new());
                    let storage: Arc<[AtomicU64; CAPACITY]> =
                        Arc::new(std::array::from_fn(|_| AtomicU64::new(0)));

                    let producers: Vec<_> = (0..n)
                        .map(|_| {
                            let ring = Arc::clone(&ring);
                            let storage = Arc::clone(&storage);
                            thread::spawn(move || {
                                for i in 0..MSG_PER_PRODUCER {
                                    loop {
                                        if let Some(token) = ring.put_begin() {
                                            storage[token.index()].store(i, Ordering::Relaxed);
                                            ring.put_commit(token);
                                            break;
                                        }
                                        std::hint::spin_loop();
                                    }
                                }
                            })
                        })
                        .collect();

                    let target = MSG_PER_PRODUCER * n;
                    let received = Arc::new(AtomicU64::new(0));
                    let consumers: Vec<_> = (0..n)
                        .map(|_| {
                            let ring = Arc::clone(&ring);
                            let storage = Arc::clone(&storage);
                            let received = Arc::clone(&received);
                            thread::spawn(move || {
                                while received.load(Ordering::Relaxed) < target {
                                    if let Some(token) = ring.get_begin() {
                                        black_box(storage[token.index()].load(Ordering::Relaxed));
                                        ring.get_commit(token);
                                        received.fetch_add(1, Ordering::Relaxed);
                                    } else {
                                        std::hint::spin_loop();
                                    }
                                }
                            })
                        })
                        .collect();

                    for h in producers {
                        h.join().unwrap();
                    }
                    for h in consumers {
                        h.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    for &num_producers in &[4u64, 16, 64] {
        let total_msgs = MSG_PER_PRODUCER.min(500_000) * num_producers;
        group.throughput(Throughput::Elements(total_msgs));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{num_producers}_producers_1_consumer")),
            &num_producers,
            |b, &n| {
                let msgs_per_producer = MSG_PER_PRODUCER.min(500_000);
                b.iter(|| {
                    let ring = Arc::new(Ring::<CAPACITY>::new());
                    let storage: Arc<[AtomicU64; CAPACITY]> =
                        Arc::new(std::array::from_fn(|_| AtomicU64::new(0)));

                    let producers: Vec<_> = (0..n)
                        .map(|_| {
                            let ring = Arc::clone(&ring);
                            let storage = Arc::clone(&storage);
                            thread::spawn(move || {
                                for i in 0..msgs_per_producer {
                                    loop {
                                        if let Some(token) = ring.put_begin() {
                                            storage[token.index()].store(i, Ordering::Relaxed);
                                            ring.put_commit(token);
                                            break;
                                        }
                                        std::hint::spin_loop();
                                    }
                                }
                            })
                        })
                        .collect();

                    let target = msgs_per_producer * n;
                    let mut received = 0u64;
                    while received < target {
                        if let Some(token) = ring.get_begin() {
                            black_box(storage[token.index()].load(Ordering::Relaxed));
                            ring.get_commit(token);
                            received += 1;
                        } else {
                            std::hint::spin_loop();
                        }
                    }

                    for h in producers {
                        h.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_spsc, bench_mpmc, bench_contention);
criterion_main!(benches);
