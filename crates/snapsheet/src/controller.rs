//! The sheet state machine.
//!
//! `SheetController` consumes the gesture stream, maintains open/closed
//! state and the active snap index, resolves releases, and drives the
//! animated position. Externals request transitions (`open`, `close`,
//! gesture samples, resizes) and observe the results through listener
//! registries; nothing else mutates sheet state.

use crate::config::SheetConfig;
use crate::gesture::GestureSample;
use crate::resolver::{resolve, SnapOutcome};
use crate::snap_points::{SnapOffsets, SnapPoints};
use crate::ConfigError;
use snapsheet_animation::MotionValue;
use snapsheet_core::{RuntimeHandle, ScrollLock};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStatus {
    Closed,
    Open,
}

fn next_listener_id() -> u64 {
    static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed)
}

struct SheetControllerInner {
    snap_points: SnapPoints,
    config: SheetConfig,
    motion: MotionValue,
    status: Cell<SheetStatus>,
    active_index: Cell<usize>,
    dragging: Cell<bool>,
    container_extent: Cell<f32>,
    /// Derived offsets, memoized on (snap_points, extent). Empty while the
    /// extent is unmeasured.
    offsets: RefCell<SnapOffsets>,
    scroll_lock: RefCell<Option<Rc<dyn ScrollLock>>>,
    /// Last state communicated to the scroll lock, for edge triggering.
    scroll_locked: Cell<bool>,
    open_listeners: RefCell<HashMap<u64, Box<dyn Fn(bool)>>>,
    snap_listeners: RefCell<HashMap<u64, Box<dyn Fn(f32)>>>,
}

impl SheetControllerInner {
    fn extent_measured(&self) -> bool {
        self.container_extent.get() > 0.0
    }

    fn offset_for_index(&self, index: usize) -> Option<f32> {
        self.offsets.borrow().get(index).copied()
    }

    fn notify_open(&self, open: bool) {
        let listeners = self.open_listeners.borrow();
        for callback in listeners.values() {
            callback(open);
        }
    }

    fn notify_snap(&self, fraction: f32) {
        let listeners = self.snap_listeners.borrow();
        for callback in listeners.values() {
            callback(fraction);
        }
    }

    fn sync_scroll_lock(&self) {
        let should_lock = self.dragging.get() || self.status.get() == SheetStatus::Open;
        if should_lock == self.scroll_locked.get() {
            return;
        }
        self.scroll_locked.set(should_lock);
        let lock = self.scroll_lock.borrow();
        if let Some(lock) = lock.as_ref() {
            if should_lock {
                lock.enable();
            } else {
                lock.disable();
            }
        }
    }
}

/// Clonable handle to one sheet session.
#[derive(Clone)]
pub struct SheetController {
    inner: Rc<SheetControllerInner>,
}

impl SheetController {
    pub fn new(config: SheetConfig, runtime: RuntimeHandle) -> Result<Self, ConfigError> {
        let snap_points = config.validate()?;
        let initial_index = config.initial_snap_index;
        Ok(Self {
            inner: Rc::new(SheetControllerInner {
                snap_points,
                motion: MotionValue::new(0.0, runtime),
                config,
                status: Cell::new(SheetStatus::Closed),
                active_index: Cell::new(initial_index),
                dragging: Cell::new(false),
                container_extent: Cell::new(0.0),
                offsets: RefCell::new(SnapOffsets::new()),
                scroll_lock: RefCell::new(None),
                scroll_locked: Cell::new(false),
                open_listeners: RefCell::new(HashMap::new()),
                snap_listeners: RefCell::new(HashMap::new()),
            }),
        })
    }

    /// The animated position, the single value the surface renders.
    pub fn position(&self) -> f32 {
        self.inner.motion.value()
    }

    pub fn status(&self) -> SheetStatus {
        self.inner.status.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.dragging.get()
    }

    pub fn active_snap_index(&self) -> usize {
        self.inner.active_index.get()
    }

    /// The active snap point as a fraction of the container extent.
    pub fn active_snap_point(&self) -> f32 {
        self.inner.snap_points.fractions()[self.inner.active_index.get()]
    }

    pub fn container_extent(&self) -> f32 {
        self.inner.container_extent.get()
    }

    /// Derived snap offsets for the current extent, in fraction order.
    /// Empty while the extent is unmeasured.
    pub fn snap_offsets(&self) -> SnapOffsets {
        self.inner.offsets.borrow().clone()
    }

    /// Install the host's scroll suppression capability. If the sheet is
    /// already open or mid-drag the lock is raised immediately.
    pub fn set_scroll_lock(&self, lock: Rc<dyn ScrollLock>) {
        if self.inner.scroll_locked.get() {
            lock.enable();
        }
        *self.inner.scroll_lock.borrow_mut() = Some(lock);
    }

    /// Observe open/closed transitions. The callback receives `true` when
    /// the sheet opens and `false` when it closes.
    pub fn on_open_change(&self, callback: impl Fn(bool) + 'static) -> u64 {
        let id = next_listener_id();
        self.inner
            .open_listeners
            .borrow_mut()
            .insert(id, Box::new(callback));
        id
    }

    pub fn remove_open_listener(&self, id: u64) {
        self.inner.open_listeners.borrow_mut().remove(&id);
    }

    /// Observe settles onto a different snap point. The callback receives
    /// the new snap fraction.
    pub fn on_snap_point_change(&self, callback: impl Fn(f32) + 'static) -> u64 {
        let id = next_listener_id();
        self.inner
            .snap_listeners
            .borrow_mut()
            .insert(id, Box::new(callback));
        id
    }

    pub fn remove_snap_listener(&self, id: u64) {
        self.inner.snap_listeners.borrow_mut().remove(&id);
    }

    /// Observe every applied position, whether dragged or eased.
    pub fn add_position_observer(&self, callback: impl Fn(f32) + 'static) -> u64 {
        self.inner.motion.add_observer(callback)
    }

    pub fn remove_position_observer(&self, id: u64) {
        self.inner.motion.remove_observer(id)
    }

    /// Handle for the host's gesture pipeline. Holds a weak reference:
    /// samples arriving after the controller is gone are silently dropped.
    pub fn gesture_listener(&self) -> SheetGestureListener {
        SheetGestureListener {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Open the sheet at its active snap point. No-op when already open.
    pub fn open(&self) {
        let inner = &self.inner;
        if inner.status.get() == SheetStatus::Open {
            return;
        }
        log::debug!("sheet opening at snap index {}", inner.active_index.get());
        inner.dragging.set(false);
        inner.status.set(SheetStatus::Open);
        self.settle_to(inner.active_index.get());
        inner.notify_open(true);
        inner.sync_scroll_lock();
    }

    /// Dismiss the sheet from any state, resetting the active snap point
    /// to the smallest one for the next open. Close listeners are always
    /// notified; an explicit close is a command, not an edge observation.
    pub fn close(&self) {
        let inner = &self.inner;
        log::debug!("sheet closing");
        inner.dragging.set(false);
        inner.status.set(SheetStatus::Closed);
        inner.active_index.set(0);
        if inner.extent_measured() {
            inner
                .motion
                .ease_to(inner.container_extent.get(), inner.config.dismiss_profile);
        } else {
            log::debug!("container extent unmeasured; dismiss motion deferred");
        }
        inner.notify_open(false);
        inner.sync_scroll_lock();
    }

    /// Report the container extent (and any later resize). Offsets are
    /// recomputed; an open sheet re-settles so it keeps its relative
    /// height, a closed sheet snaps its hidden position to the new extent.
    pub fn set_container_extent(&self, extent: f32) {
        let inner = &self.inner;
        inner.container_extent.set(extent);
        if extent <= 0.0 {
            inner.offsets.borrow_mut().clear();
            log::debug!("container extent {extent} unmeasured; sheet motion deferred");
            return;
        }

        let first_measurement = inner.offsets.borrow().is_empty();
        *inner.offsets.borrow_mut() = inner.snap_points.offsets_for(extent);
        inner.motion.set_rubber_bound(0.0, extent);

        if inner.dragging.get() {
            return;
        }
        match inner.status.get() {
            SheetStatus::Open => {
                if first_measurement {
                    // Deferred open: place the sheet at the hidden edge so
                    // the settle animates in from off screen.
                    inner.motion.jump(extent);
                }
                self.settle_to(inner.active_index.get());
            }
            SheetStatus::Closed => inner.motion.jump(extent),
        }
    }

    /// Feed one gesture sample. Non-final samples drive the position
    /// directly; the final sample resolves where the sheet goes.
    pub fn handle_gesture(&self, sample: GestureSample) {
        if sample.is_final {
            self.finish_drag(&sample);
        } else {
            self.track_drag(&sample);
        }
    }

    fn track_drag(&self, sample: &GestureSample) {
        let inner = &self.inner;
        if !inner.dragging.replace(true) {
            inner.sync_scroll_lock();
        }
        if inner.extent_measured() {
            inner.motion.jump(sample.offset);
        }
    }

    fn finish_drag(&self, sample: &GestureSample) {
        let inner = &self.inner;
        inner.dragging.set(false);

        let outcome = {
            let offsets = inner.offsets.borrow();
            if offsets.is_empty() {
                drop(offsets);
                log::debug!("release ignored; container extent unmeasured");
                inner.sync_scroll_lock();
                return;
            }
            resolve(
                sample,
                inner.active_index.get(),
                &offsets,
                inner.config.flick_velocity,
            )
        };
        log::debug!(
            "release at offset {} velocity {} resolved to {outcome:?}",
            sample.offset,
            sample.velocity
        );

        match outcome {
            SnapOutcome::Close => self.close(),
            SnapOutcome::Settle(index) => {
                let was_closed = inner.status.get() == SheetStatus::Closed;
                let previous_index = inner.active_index.replace(index);
                inner.status.set(SheetStatus::Open);
                self.settle_to(index);
                if was_closed {
                    inner.notify_open(true);
                }
                if previous_index != index {
                    inner.notify_snap(inner.snap_points.fractions()[index]);
                }
                inner.sync_scroll_lock();
            }
        }
    }

    fn settle_to(&self, index: usize) {
        let inner = &self.inner;
        match inner.offset_for_index(index) {
            Some(offset) => inner.motion.ease_to(offset, inner.config.settle_profile),
            None => log::debug!("container extent unmeasured; settle motion deferred"),
        }
    }
}

/// Weak gesture-stream handle obtained from
/// [`SheetController::gesture_listener`].
#[derive(Clone)]
pub struct SheetGestureListener {
    inner: Weak<SheetControllerInner>,
}

impl SheetGestureListener {
    pub fn submit(&self, sample: GestureSample) {
        if let Some(inner) = self.inner.upgrade() {
            SheetController { inner }.handle_gesture(sample);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
