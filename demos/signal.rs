use core::time::Duration;
use std::sync::Arc;
use std::thread;

use ftsync::{AdaptiveMutex, Signal};

pub fn main() {
    let value = Arc::new(AdaptiveMutex::new(10));
    let signal = Arc::new(Signal::new());

    let v = Arc::clone(&value);
    let s = Arc::clone(&signal);
    let reader_t = thread::spawn(move || {
        loop {
            s.wait();
            let n = *v.lock();
            println!("[R]: Woke up, value = {n}");
            if n <= 0 {
                break;
            }
        }
        println!("[R]: EXIT");
    });

    let writer_t = thread::spawn(move || {
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(100));
            *value.lock() -= 1;
            println!("[W]: Sending wake");
            /* Wakes only reach a thread already waiting */
            while !signal.has_waiting_thread() {
                thread::yield_now();
            }
            signal.wake();
        }
        println!("[W]: EXIT");
    });

    writer_t.join().unwrap();
    reader_t.join().unwrap();
}
