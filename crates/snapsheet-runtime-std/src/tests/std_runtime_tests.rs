use super::StdRuntime;
use snapsheet_animation::{MotionProfile, MotionValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn frame_requests_are_consumed_on_poll() {
    let runtime = StdRuntime::new();
    assert!(!runtime.take_frame_request());

    runtime.runtime_handle().register_frame_callback(|_| {});
    assert!(runtime.take_frame_request(), "registration requests a frame");
    assert!(!runtime.take_frame_request(), "the request is edge triggered");
}

#[test]
fn waker_fires_while_registered() {
    let runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    runtime.set_frame_waker(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    runtime.runtime_handle().register_frame_callback(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    runtime.clear_frame_waker();
    runtime.runtime_handle().register_frame_callback(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
}

#[test]
fn std_runtime_drives_a_motion_to_rest() {
    let runtime = StdRuntime::new();
    let motion = MotionValue::new(0.0, runtime.runtime_handle());

    motion.ease_to(100.0, MotionProfile::settle());
    assert!(runtime.take_frame_request(), "easing requests a frame");

    // The host frame loop, with a synthetic 60 FPS timestamp.
    let mut frame_time = 0u64;
    for _ in 0..600 {
        if !runtime.runtime_handle().has_frame_callbacks() {
            break;
        }
        frame_time += 16_666_667;
        runtime.drain_frame_callbacks(frame_time);
    }

    assert_eq!(motion.value(), 100.0);
    assert!(!motion.is_easing());
}

#[test]
fn now_nanos_is_monotonic() {
    let runtime = StdRuntime::new();
    let first = runtime.now_nanos();
    let second = runtime.now_nanos();
    assert!(second >= first);
}
