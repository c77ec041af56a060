use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use super::*;

/// Spin until `count` threads are parked in a wait
fn wait_for_waiters(sync: &RenderSync, count: usize) {
    while sync.waiting_count() < count {
        thread::yield_now();
    }
}

#[test]
fn test_new_is_idle() {
    let sync = RenderSync::new();
    assert_eq!(sync.waiting_count(), 0);
    assert!(!sync.is_render_ready());
}

#[test]
fn test_mark_without_waiter_sets_flag() {
    let sync = RenderSync::new();
    sync.mark_render_complete();
    assert!(sync.is_render_ready());
}

#[test]
fn test_wait_returns_after_mark() {
    let sync = Arc::new(RenderSync::new());
    let done = Arc::new(AtomicBool::new(false));

    let waiter = {
        let sync = sync.clone();
        let done = done.clone();
        thread::spawn(move || {
            sync.wait_for_render_complete();
            done.store(true, Ordering::SeqCst);
        })
    };

    wait_for_waiters(&sync, 1);
    assert!(!done.load(Ordering::SeqCst));

    sync.mark_render_complete();
    waiter.join().unwrap();

    assert!(done.load(Ordering::SeqCst));
    assert_eq!(sync.waiting_count(), 0);
    assert!(!sync.is_render_ready());
}

#[test]
fn test_signal_before_wait_is_discarded() {
    let sync = RenderSync::new();
    sync.mark_render_complete();
    assert!(!sync.wait_for_render_complete_for(Duration::from_millis(20)));
}

#[test]
fn test_consecutive_marks_do_not_accumulate() {
    let sync = RenderSync::new();
    sync.mark_render_complete();
    sync.mark_render_complete();
    assert!(sync.is_render_ready());

    // One pending flag, not a count: nothing is left for a later wait
    assert!(!sync.wait_for_render_complete_for(Duration::from_millis(20)));
    assert!(!sync.is_render_ready());
}

#[test]
fn test_each_wait_needs_its_own_mark() {
    let sync = Arc::new(RenderSync::new());
    let waiter = {
        let sync = sync.clone();
        thread::spawn(move || sync.wait_for_render_complete())
    };

    wait_for_waiters(&sync, 1);
    sync.mark_render_complete();
    waiter.join().unwrap();

    assert!(!sync.wait_for_render_complete_for(Duration::from_millis(20)));
}

#[test]
fn test_timeout_without_producer() {
    let sync = RenderSync::new();
    assert!(!sync.wait_for_render_complete_for(Duration::from_millis(10)));
    assert_eq!(sync.waiting_count(), 0);
}

#[test]
fn test_timed_wait_sees_signal() {
    let sync = Arc::new(RenderSync::new());
    let waiter = {
        let sync = sync.clone();
        thread::spawn(move || sync.wait_for_render_complete_for(Duration::from_secs(10)))
    };

    wait_for_waiters(&sync, 1);
    sync.mark_render_complete();
    assert!(waiter.join().unwrap());
}

#[test]
fn test_mark_wakes_one_waiter_at_a_time() {
    let sync = Arc::new(RenderSync::new());
    let waiters: Vec<_> = (0..2)
        .map(|_| {
            let sync = sync.clone();
            thread::spawn(move || sync.wait_for_render_complete())
        })
        .collect();

    wait_for_waiters(&sync, 2);
    sync.mark_render_complete();
    while sync.waiting_count() > 1 {
        thread::yield_now();
    }
    assert_eq!(sync.waiting_count(), 1);

    sync.mark_render_complete();
    for waiter in waiters {
        waiter.join().unwrap();
    }
    assert_eq!(sync.waiting_count(), 0);
}
