use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pbuf::{ProtectedBuffer, SemaphoreBuffer};

fn may_interrupt() {
    // simulate preemption points
    if fastrand::u8(0..3) == 0 {
        thread::yield_now();
    }
}

#[test]
fn semaphore_basic_round_trip() {
    let buf = SemaphoreBuffer::new(3);
    buf.put(1);
    buf.put(2);
    buf.put(3);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.capacity(), 3);
    assert_eq!(buf.get(), 1);
    assert_eq!(buf.get(), 2);
    assert_eq!(buf.get(), 3);
}

#[test]
fn permit_reservation_admits_one_producer_per_slot() {
    // Capacity 1 with several blocked producers: each released slot permit
    // hands the reservation to exactly one of them.
    const PRODUCERS: u32 = 4;

    let buf = Arc::new(SemaphoreBuffer::new(1));
    buf.put(0);

    let handles: Vec<_> = (1..=PRODUCERS)
        .map(|i| {
            let buf = Arc::clone(&buf);
            thread::spawn(move || buf.put(i))
        })
        .collect();

    let mut seen = HashSet::new();
    for _ in 0..=PRODUCERS {
        seen.insert(buf.get());
        assert!(buf.len() <= 1);
        may_interrupt();
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(seen.len(), PRODUCERS as usize + 1);
    assert!(buf.is_empty());
}

#[test]
fn try_put_failure_keeps_counts_in_sync() {
    let buf = SemaphoreBuffer::new(2);
    buf.put(1);
    buf.put(2);

    for attempt in 0..3 {
        assert_eq!(buf.try_put(90 + attempt).unwrap_err().into_inner(), 90 + attempt);
        assert_eq!(buf.len(), 2);
    }

    // The failed attempts reserved nothing: both items still come out and
    // both slots are usable again afterwards.
    assert_eq!(buf.get(), 1);
    assert_eq!(buf.get(), 2);
    assert!(buf.try_put(5).is_ok());
    assert!(buf.try_put(6).is_ok());
    assert_eq!(buf.len(), 2);
}

#[test]
fn poll_takes_item_published_mid_wait() {
    let buf = Arc::new(SemaphoreBuffer::new(1));

    let deadline = Instant::now() + Duration::from_millis(100);
    let consumer = {
        let buf = Arc::clone(&buf);
        thread::spawn(move || buf.poll(deadline))
    };

    thread::sleep(Duration::from_millis(40));
    buf.put(8);

    assert_eq!(consumer.join().unwrap(), Ok(8));
    assert!(buf.is_empty());
}

#[test]
fn producers_and_consumers_in_lockstep() {
    const CAPACITY: usize = 2;
    const ITERS: usize = 1_000;
    const PAIRS: usize = 3;

    let buf: Arc<SemaphoreBuffer<usize>> = Arc::new(SemaphoreBuffer::new(CAPACITY));
    let mut handles = Vec::new();

    for worker in 0..PAIRS {
        let producer = Arc::clone(&buf);
        handles.push(thread::spawn(move || {
            for i in 0..ITERS {
                producer.put(worker * ITERS + i);
                may_interrupt();
            }
        }));

        let consumer = Arc::clone(&buf);
        handles.push(thread::spawn(move || {
            for _ in 0..ITERS {
                consumer.get();
                may_interrupt();
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert!(buf.is_empty());
}
