use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{Criterion, criterion_group, criterion_main};
use ftsync::adaptive::channel::Emulated;
use ftsync::{AdaptiveLock, AdaptiveSemaphore, Lock, SpinLock, SpinSemaphore};

const THREADS: usize = 4;
const ITERS: usize = 1_000;

fn contend<L: Lock + Send + Sync + 'static>(lock: &Arc<L>) {
    let handles = (0..THREADS)
        .map(|_| {
            let lock = Arc::clone(lock);
            thread::spawn(move || {
                for i in 0..ITERS {
                    lock.lock();
                    black_box(i);
                    unsafe { lock.unlock() };
                }
            })
        })
        .collect::<Vec<_>>();

    for h in handles {
        h.join().unwrap();
    }
}

fn uncontended(c: &mut Criterion) {
    let spin = SpinLock::new();
    c.bench_function("spin_lock_uncontended", |b| {
        b.iter(|| {
            spin.lock();
            unsafe { spin.unlock() };
        })
    });

    let adaptive = AdaptiveLock::new();
    c.bench_function("adaptive_lock_uncontended", |b| {
        b.iter(|| {
            adaptive.lock();
            unsafe { adaptive.unlock() };
        })
    });
}

fn contended(c: &mut Criterion) {
    let spin = Arc::new(SpinLock::new());
    c.bench_function("spin_lock_4_threads", |b| b.iter(|| contend(&spin)));

    let adaptive = Arc::new(AdaptiveLock::new());
    c.bench_function("adaptive_lock_4_threads", |b| b.iter(|| contend(&adaptive)));

    let emulated = Arc::new(AdaptiveLock::with_channel(Emulated::new()));
    c.bench_function("emulated_lock_4_threads", |b| b.iter(|| contend(&emulated)));

    let spin_sem = Arc::new(SpinSemaphore::with_capacity(2));
    c.bench_function("spin_semaphore_4_threads", |b| b.iter(|| contend(&spin_sem)));

    let adaptive_sem = Arc::new(AdaptiveSemaphore::with_capacity(2));
    c.bench_function("adaptive_semaphore_4_threads", |b| {
        b.iter(|| contend(&adaptive_sem))
    });
}

criterion_group!(benches, uncontended, contended);
criterion_main!(benches);
