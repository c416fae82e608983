//! The animated sheet position.
//!
//! A [`MotionValue`] owns one scalar and accepts two directives: `jump`
//! (immediate, used while a drag tracks the finger) and `ease_to` (spring
//! interpolation, used when the sheet settles or dismisses). Issuing either
//! directive cancels whatever interpolation was in flight; the latest
//! directive always wins and stale frames never land.

use crate::profile::MotionProfile;
use crate::rubber_band::rubber_band;
use snapsheet_core::{FrameCallbackRegistration, RuntimeHandle};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Spring integration timestep in seconds (~60fps substeps for stability).
const SPRING_TIMESTEP: f32 = 0.016;

#[derive(Clone, Copy)]
struct RubberBound {
    limit: f32,
    range: f32,
}

struct Motion {
    /// Bumped by every directive. Frames scheduled under an older epoch
    /// return without touching the value or the live registration.
    epoch: u64,
    easing: bool,
    target: f32,
    /// Spring velocity in px/s. Survives ease-to-ease retargeting, reset
    /// by `jump`.
    velocity: f32,
    profile: MotionProfile,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

struct MotionValueState {
    runtime: RuntimeHandle,
    value: Cell<f32>,
    rubber_bound: Cell<Option<RubberBound>>,
    motion: RefCell<Motion>,
    observers: RefCell<HashMap<u64, Box<dyn Fn(f32)>>>,
}

impl MotionValueState {
    fn constrain(&self, value: f32) -> f32 {
        match self.rubber_bound.get() {
            Some(bound) if value < bound.limit => {
                bound.limit - rubber_band(bound.limit - value, bound.range)
            }
            _ => value,
        }
    }

    fn notify(&self, value: f32) {
        let observers = self.observers.borrow();
        for callback in observers.values() {
            callback(value);
        }
    }
}

/// The single source of truth for the sheet's position.
pub struct MotionValue {
    inner: Rc<MotionValueState>,
}

impl MotionValue {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(MotionValueState {
                runtime,
                value: Cell::new(initial),
                rubber_bound: Cell::new(None),
                motion: RefCell::new(Motion {
                    epoch: 0,
                    easing: false,
                    target: initial,
                    velocity: 0.0,
                    profile: MotionProfile::default(),
                    last_frame_nanos: None,
                    registration: None,
                }),
                observers: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// The current position.
    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    /// The position the value is at or moving toward.
    pub fn target(&self) -> f32 {
        self.inner.motion.borrow().target
    }

    pub fn is_easing(&self) -> bool {
        self.inner.motion.borrow().easing
    }

    /// Values jumped below `limit` are softened with the rubber-band curve
    /// scaled against `range` instead of clamping. Eased targets are applied
    /// verbatim.
    pub fn set_rubber_bound(&self, limit: f32, range: f32) {
        self.inner.rubber_bound.set(Some(RubberBound { limit, range }));
    }

    /// Set the value immediately, discarding any in-flight interpolation
    /// and its remaining frames. Spring velocity resets to zero.
    pub fn jump(&self, value: f32) {
        let applied = self.inner.constrain(value);
        {
            let mut motion = self.inner.motion.borrow_mut();
            motion.epoch = motion.epoch.wrapping_add(1);
            if let Some(registration) = motion.registration.take() {
                registration.cancel();
            }
            motion.easing = false;
            motion.velocity = 0.0;
            motion.target = applied;
            motion.last_frame_nanos = None;
        }
        self.inner.value.set(applied);
        self.inner.notify(applied);
    }

    /// Spring the value toward `target`, preempting any previous directive.
    /// When a prior ease is preempted mid-flight its spring velocity carries
    /// over, so the motion bends toward the new target instead of stopping
    /// dead first.
    pub fn ease_to(&self, target: f32, profile: MotionProfile) {
        {
            let mut motion = self.inner.motion.borrow_mut();
            motion.epoch = motion.epoch.wrapping_add(1);
            if let Some(registration) = motion.registration.take() {
                registration.cancel();
            }
            if !motion.easing {
                // Coming from rest or a drag: the next frame only baselines
                // the clock.
                motion.last_frame_nanos = None;
            }
            motion.easing = true;
            motion.target = target;
            motion.profile = profile;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Observe every applied position, whether jumped or eased. Returns an
    /// id for [`MotionValue::remove_observer`].
    pub fn add_observer(&self, callback: impl Fn(f32) + 'static) -> u64 {
        static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed);
        self.inner.observers.borrow_mut().insert(id, Box::new(callback));
        id
    }

    pub fn remove_observer(&self, id: u64) {
        self.inner.observers.borrow_mut().remove(&id);
    }

    fn schedule_frame(this: &Rc<MotionValueState>) {
        let epoch = {
            let motion = this.motion.borrow();
            if motion.registration.is_some() || !motion.easing {
                return;
            }
            motion.epoch
        };
        let weak = Rc::downgrade(this);
        let registration = this.runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                MotionValue::on_frame(&strong, epoch, time);
            }
        });
        this.motion.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<MotionValueState>, epoch: u64, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut applied = None;
        {
            let mut motion = this.motion.borrow_mut();
            if motion.epoch != epoch || !motion.easing {
                return;
            }
            motion.registration = None;

            let last = motion.last_frame_nanos.replace(frame_time_nanos);
            let dt = match last {
                Some(last) => frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0,
                None => 0.0,
            };
            if dt == 0.0 {
                schedule_next = true;
            } else {
                // Semi-implicit Euler over fixed substeps, in pixel space.
                let stiffness = motion.profile.stiffness;
                let damping = 2.0 * motion.profile.damping_ratio * stiffness.sqrt();
                let mut value = this.value.get();
                let mut prev_time = 0.0f32;
                while prev_time < dt {
                    let step = SPRING_TIMESTEP.min(dt - prev_time);
                    let displacement = value - motion.target;
                    let spring_force = -stiffness * displacement - damping * motion.velocity;
                    motion.velocity += spring_force * step;
                    value += motion.velocity * step;
                    prev_time += step;
                }

                let at_rest = motion.velocity.abs() < motion.profile.velocity_threshold;
                let near_target =
                    (value - motion.target).abs() < motion.profile.position_threshold;
                if at_rest && near_target {
                    value = motion.target;
                    motion.velocity = 0.0;
                    motion.easing = false;
                    motion.last_frame_nanos = None;
                } else {
                    schedule_next = true;
                }
                this.value.set(value);
                applied = Some(value);
            }
        }

        if let Some(value) = applied {
            this.notify(value);
        }
        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

impl Clone for MotionValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/motion_tests.rs"]
mod tests;
