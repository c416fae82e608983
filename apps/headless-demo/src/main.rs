//! Headless demo: a scripted sheet session against the std runtime.
//!
//! No window, no renderer. The demo wires a [`SheetController`] to
//! [`StdRuntime`] the way a real host would, scripts a drag session
//! against it, and logs every state change the sheet reports.

use snapsheet::{DragTracker, SheetConfig, SheetController};
use snapsheet_core::ScrollLock;
use snapsheet_runtime_std::StdRuntime;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Stand-in for the host's scroll suppression: a real app would stop
/// routing wheel/touch scroll to the content behind the sheet.
struct LoggingScrollLock;

impl ScrollLock for LoggingScrollLock {
    fn enable(&self) {
        log::info!("host scroll locked");
    }

    fn disable(&self) {
        log::info!("host scroll unlocked");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Snapsheet Headless Demo ===");
    println!("A scripted session: open, drag up to the middle snap point,");
    println!("then flick down to dismiss. Run with RUST_LOG=debug to watch");
    println!("release resolution decide between flick and position.");
    println!();

    let runtime = StdRuntime::new();
    let controller = SheetController::new(
        SheetConfig::new(vec![0.3, 0.7, 1.0]),
        runtime.runtime_handle(),
    )
    .expect("demo config is valid");

    controller.set_scroll_lock(Rc::new(LoggingScrollLock));
    controller.on_open_change(|open| log::info!("sheet open: {open}"));
    controller.on_snap_point_change(|fraction| log::info!("snapped to fraction {fraction}"));

    controller.set_container_extent(1000.0);
    log::info!(
        "container measured at 1000 px, snap offsets {:?}",
        controller.snap_offsets()
    );

    controller.open();
    settle(&runtime, &controller);

    // A slow upward drag, well under the flick threshold: the release
    // resolves by position and promotes the sheet to the middle point.
    swipe(&runtime, &controller, 480.0, 12, Duration::from_millis(16));
    settle(&runtime, &controller);

    // A short, fast downward stroke: the flick wins and the sheet closes.
    let flick_target = controller.position() + 200.0;
    swipe(&runtime, &controller, flick_target, 5, Duration::from_millis(8));
    settle(&runtime, &controller);

    println!();
    println!("Session complete.");
}

/// Script one drag from the current position to `target_offset`, feeding
/// wall-clock timestamped samples through the gesture listener.
fn swipe(
    runtime: &StdRuntime,
    controller: &SheetController,
    target_offset: f32,
    steps: usize,
    step_interval: Duration,
) {
    let listener = controller.gesture_listener();
    let mut tracker = DragTracker::new();
    let start = controller.position();
    tracker.begin(now_ms(runtime), start, start);
    for step in 1..=steps {
        thread::sleep(step_interval);
        let progress = step as f32 / steps as f32;
        let finger = start + (target_offset - start) * progress;
        if let Some(sample) = tracker.update(now_ms(runtime), finger) {
            listener.submit(sample);
        }
    }
    if let Some(release) = tracker.finish(now_ms(runtime), target_offset) {
        log::info!(
            "released at {:.0} px with velocity {:.2} px/ms",
            release.offset,
            release.velocity
        );
        listener.submit(release);
    }
}

/// The host frame loop: sleep to the next frame and drain callbacks until
/// the sheet's motion rests.
fn settle(runtime: &StdRuntime, controller: &SheetController) {
    while runtime.runtime_handle().has_frame_callbacks() {
        thread::sleep(FRAME_INTERVAL);
        runtime.take_frame_request();
        runtime.drain_frame_callbacks(runtime.now_nanos());
    }
    log::info!("sheet resting at {:.1} px", controller.position());
}

fn now_ms(runtime: &StdRuntime) -> i64 {
    (runtime.now_nanos() / 1_000_000) as i64
}
