use ftsync::AdaptiveSemaphore;
use std::sync::Arc;
use std::{thread, time::Duration};

pub fn main() {
    let semaphore = Arc::new(AdaptiveSemaphore::with_capacity(0));

    let sem1 = Arc::clone(&semaphore);
    let wait_t = thread::spawn(move || {
        for _ in 0..6 {
            sem1.lock();
            println!("Thread 1 took a unit");
        }
    });

    let sem2 = Arc::clone(&semaphore);
    let writer_t = thread::spawn(move || {
        println!("Thread 2 releases 1 unit");
        sem2.unlock();
        thread::sleep(Duration::from_millis(100));

        println!("Thread 2 adds 2 units");
        sem2.add_counter(2);
        thread::sleep(Duration::from_millis(100));

        println!("Thread 2 releases 1 unit");
        sem2.unlock();
        thread::sleep(Duration::from_millis(100));

        println!("Thread 2 adds 3 units");
        sem2.add_counter(3);
        thread::sleep(Duration::from_millis(100));
    });

    wait_t.join().unwrap();
    writer_t.join().unwrap();

    assert_eq!(semaphore.num_counters(), 1);
}
