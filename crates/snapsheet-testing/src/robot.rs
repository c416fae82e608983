//! Robot testing harness for scripted sheet sessions.
//!
//! [`SheetRobot`] owns a controller and a manual frame loop, and scripts
//! gestures against it the way a host would deliver them: timestamped
//! move samples interpolated toward a target, a release, then frame
//! pumping until the motion rests.
//!
//! # Example
//!
//! ```
//! use snapsheet::SheetConfig;
//! use snapsheet_testing::SheetRobot;
//!
//! let mut robot = SheetRobot::new(SheetConfig::default(), 1000.0).unwrap();
//! robot.open();
//! robot.swipe_to(480.0, 2000);
//! assert_eq!(robot.controller().active_snap_index(), 1);
//! ```

use snapsheet::{ConfigError, DragTracker, SheetConfig, SheetController};
use snapsheet_core::{DefaultScheduler, Runtime};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Milliseconds between scripted pointer samples.
const STEP_MS: i64 = 16;

/// Nanoseconds between pumped frames, ~60 FPS.
const STEP_NANOS: u64 = 16_666_667;

/// Frames to wait for a settle before declaring the motion stuck.
const IDLE_FRAME_BUDGET: usize = 600;

/// Drives one sheet session with scripted gestures and a manual clock.
pub struct SheetRobot {
    runtime: Runtime,
    controller: SheetController,
    tracker: DragTracker,
    frame_time_nanos: u64,
    clock_ms: i64,
    open_events: Rc<RefCell<Vec<bool>>>,
    snap_events: Rc<RefCell<Vec<f32>>>,
}

impl SheetRobot {
    /// Launch a sheet session with the given config, measured at
    /// `container_extent`.
    pub fn new(config: SheetConfig, container_extent: f32) -> Result<Self, ConfigError> {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let controller = SheetController::new(config, runtime.handle())?;
        controller.set_container_extent(container_extent);

        let open_events: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let open_sink = open_events.clone();
        controller.on_open_change(move |open| open_sink.borrow_mut().push(open));
        let snap_events: Rc<RefCell<Vec<f32>>> = Rc::new(RefCell::new(Vec::new()));
        let snap_sink = snap_events.clone();
        controller.on_snap_point_change(move |fraction| snap_sink.borrow_mut().push(fraction));

        Ok(Self {
            runtime,
            controller,
            tracker: DragTracker::new(),
            frame_time_nanos: 0,
            clock_ms: 0,
            open_events,
            snap_events,
        })
    }

    pub fn controller(&self) -> &SheetController {
        &self.controller
    }

    /// Open the sheet and pump until the settle completes.
    pub fn open(&mut self) {
        self.controller.open();
        self.wait_for_idle();
    }

    /// Close the sheet and pump until the dismissal completes.
    pub fn close(&mut self) {
        self.controller.close();
        self.wait_for_idle();
    }

    /// Resize the container and pump any resulting re-settle.
    pub fn resize(&mut self, container_extent: f32) {
        self.controller.set_container_extent(container_extent);
        self.wait_for_idle();
    }

    /// Script a drag from the current position to `target_offset`, then
    /// release and pump until the sheet rests.
    ///
    /// Samples are interpolated every 16 ms, so `duration_ms` sets the
    /// release velocity: 220 px over 2000 ms releases slow, the same
    /// distance inside 100 ms releases as a flick.
    pub fn swipe_to(&mut self, target_offset: f32, duration_ms: i64) {
        let start = self.controller.position();
        log::debug!("robot swipe {start} -> {target_offset} over {duration_ms} ms");
        let steps = (duration_ms / STEP_MS).max(1);
        self.tracker.begin(self.clock_ms, start, start);
        let mut finger = start;
        for step in 1..=steps {
            self.clock_ms += STEP_MS;
            let progress = step as f32 / steps as f32;
            finger = start + (target_offset - start) * progress;
            if let Some(sample) = self.tracker.update(self.clock_ms, finger) {
                self.controller.handle_gesture(sample);
            }
            self.pump_frames(1);
        }
        if let Some(release) = self.tracker.finish(self.clock_ms, finger) {
            self.controller.handle_gesture(release);
        }
        self.wait_for_idle();
    }

    /// Advance the frame clock without touching the pointer.
    pub fn pump_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame_time_nanos += STEP_NANOS;
            self.runtime
                .handle()
                .drain_frame_callbacks(self.frame_time_nanos);
        }
    }

    /// Pump frames until no motion remains.
    pub fn wait_for_idle(&mut self) {
        for _ in 0..IDLE_FRAME_BUDGET {
            if !self.runtime.handle().has_frame_callbacks() {
                return;
            }
            self.pump_frames(1);
        }
        panic!("sheet did not settle within {IDLE_FRAME_BUDGET} frames");
    }

    /// Every open/closed transition observed, in order.
    pub fn open_events(&self) -> Vec<bool> {
        self.open_events.borrow().clone()
    }

    /// Every snap fraction settled onto, in order.
    pub fn snap_events(&self) -> Vec<f32> {
        self.snap_events.borrow().clone()
    }
}
