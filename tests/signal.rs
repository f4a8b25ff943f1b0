use std::sync::Arc;
use std::sync::mpsc::{RecvTimeoutError, channel};
use std::thread;
use std::time::Duration;

use ftsync::adaptive::WaitChannel;
use ftsync::adaptive::channel::Emulated;
use ftsync::{Signal, Signaling, SpinSignal};

const DEADLINE: Duration = Duration::from_secs(5);

fn wait_for_waiter(signal: &impl Signaling) {
    while !signal.has_waiting_thread() {
        thread::yield_now();
    }
}

fn wake_is_delivered<C: WaitChannel + Send + 'static>(signal: Signal<C>) {
    let signal = Arc::new(signal);
    let (tx, rx) = channel();

    let s = Arc::clone(&signal);
    let waiter = thread::spawn(move || {
        s.wait();
        tx.send(()).unwrap();
    });

    wait_for_waiter(&*signal);
    /* Still parked until somebody wakes it */
    assert_eq!(rx.recv_timeout(Duration::from_millis(50)), Err(RecvTimeoutError::Timeout));

    signal.wake();
    rx.recv_timeout(DEADLINE).expect("waiter wasn't released");
    assert!(!signal.has_waiting_thread());
    waiter.join().unwrap();
}

#[test]
fn native_wake_is_delivered() {
    wake_is_delivered(Signal::new());
}

#[test]
fn emulated_wake_is_delivered() {
    wake_is_delivered(Signal::with_channel(Emulated::new()));
}

/// Parks `first`, wakes it with `wake_fn`, then starts a second waiter.
/// The wake belongs to `first` alone; the late waiter stays parked.
fn wake_only_reaches_current_waiters<C, F>(signal: Signal<C>, wake_fn: F)
where
    C: WaitChannel + Send + 'static,
    F: Fn(&Signal<C>),
{
    let signal = Arc::new(signal);
    let (first_tx, first_rx) = channel();
    let (late_tx, late_rx) = channel();

    let s = Arc::clone(&signal);
    let first = thread::spawn(move || {
        s.wait();
        first_tx.send(()).unwrap();
    });
    wait_for_waiter(&*signal);

    wake_fn(&signal);

    let s = Arc::clone(&signal);
    let late = thread::spawn(move || {
        s.wait();
        late_tx.send(()).unwrap();
    });

    first_rx.recv_timeout(DEADLINE).expect("parked waiter wasn't released");
    first.join().unwrap();

    assert_eq!(late_rx.recv_timeout(Duration::from_millis(100)), Err(RecvTimeoutError::Timeout));
    assert!(signal.has_waiting_thread());

    signal.wake();
    late_rx.recv_timeout(DEADLINE).expect("late waiter wasn't released");
    late.join().unwrap();
}

#[test]
fn native_wake_all_only_reaches_current_waiters() {
    wake_only_reaches_current_waiters(Signal::new(), Signal::wake_all);
}

#[test]
fn emulated_wake_all_only_reaches_current_waiters() {
    wake_only_reaches_current_waiters(Signal::with_channel(Emulated::new()), Signal::wake_all);
}

#[test]
fn native_wake_only_reaches_current_waiters() {
    wake_only_reaches_current_waiters(Signal::new(), Signal::wake);
}

#[test]
fn emulated_wake_only_reaches_current_waiters() {
    wake_only_reaches_current_waiters(Signal::with_channel(Emulated::new()), Signal::wake);
}

#[test]
fn wake_before_wait_is_not_remembered() {
    let signal = Arc::new(Signal::new());
    signal.wake();
    signal.wake_all();

    let (tx, rx) = channel();
    let s = Arc::clone(&signal);
    let waiter = thread::spawn(move || {
        s.wait();
        tx.send(()).unwrap();
    });
    wait_for_waiter(&*signal);
    assert_eq!(rx.recv_timeout(Duration::from_millis(100)), Err(RecvTimeoutError::Timeout));

    signal.wake();
    rx.recv_timeout(DEADLINE).expect("waiter wasn't released");
    waiter.join().unwrap();
}

#[test]
fn wake_all_releases_everyone() {
    const WAITERS: usize = 6;

    let signal = Arc::new(Signal::new());
    let (tx, rx) = channel();

    for _ in 0..WAITERS {
        let s = Arc::clone(&signal);
        let tx = tx.clone();
        thread::spawn(move || {
            s.wait();
            tx.send(()).unwrap();
        });
    }

    let mut released = 0;
    while released < WAITERS {
        signal.wake_all();
        match rx.recv_timeout(Duration::from_millis(10)) {
            Ok(()) => released += 1,
            Err(RecvTimeoutError::Timeout) => {}
            Err(e) => panic!("{e}"),
        }
    }
    assert!(!signal.has_waiting_thread());
}

#[test]
fn spin_signal_handshake() {
    let signal = Arc::new(SpinSignal::new());
    let (tx, rx) = channel();

    let s = Arc::clone(&signal);
    let waiter = thread::spawn(move || {
        s.wait();
        tx.send(()).unwrap();
    });

    wait_for_waiter(&*signal);
    signal.wake();
    rx.recv_timeout(DEADLINE).expect("waiter wasn't released");
    waiter.join().unwrap();
}
