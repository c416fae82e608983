use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        log::trace!("frame callback {id} registered");
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
            log::trace!("frame callback {id} cancelled");
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    /// Pops every queued callback before invoking any of them, so callbacks
    /// registered during the drain run on the next frame instead of this one.
    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }
}

/// Owns the frame-callback queue. Hosts hold the `Runtime`; engine pieces
/// hold [`RuntimeHandle`]s, which degrade to no-ops once the runtime drops.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn set_needs_frame(&self, value: bool) {
        self.inner.needs_frame.set(value);
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingScheduler {
        frames_requested: AtomicUsize,
    }

    impl CountingScheduler {
        fn new() -> Self {
            Self {
                frames_requested: AtomicUsize::new(0),
            }
        }
    }

    impl RuntimeScheduler for CountingScheduler {
        fn schedule_frame(&self) {
            self.frames_requested.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn drain_invokes_registered_callback_with_frame_time() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let handle = runtime.handle();
        let seen = Rc::new(Cell::new(0u64));
        let seen_in_cb = seen.clone();
        handle
            .register_frame_callback(move |time| seen_in_cb.set(time))
            .unwrap();
        handle.drain_frame_callbacks(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn cancelled_callback_never_fires() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let handle = runtime.handle();
        let fired = Rc::new(Cell::new(false));
        let fired_in_cb = fired.clone();
        let id = handle
            .register_frame_callback(move |_| fired_in_cb.set(true))
            .unwrap();
        handle.cancel_frame_callback(id);
        handle.drain_frame_callbacks(0);
        assert!(!fired.get());
        assert!(!handle.has_frame_callbacks());
    }

    #[test]
    fn callback_registered_during_drain_waits_for_next_frame() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let handle = runtime.handle();
        let times: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

        let inner_times = times.clone();
        let inner_handle = handle.clone();
        handle
            .register_frame_callback(move |time| {
                inner_times.borrow_mut().push(time);
                let nested_times = inner_times.clone();
                inner_handle.register_frame_callback(move |time| {
                    nested_times.borrow_mut().push(time);
                });
            })
            .unwrap();

        handle.drain_frame_callbacks(1);
        assert_eq!(*times.borrow(), vec![1]);
        handle.drain_frame_callbacks(2);
        assert_eq!(*times.borrow(), vec![1, 2]);
    }

    #[test]
    fn registration_requests_a_frame_from_the_scheduler() {
        let scheduler = Arc::new(CountingScheduler::new());
        let runtime = Runtime::new(scheduler.clone());
        assert!(!runtime.needs_frame());
        runtime.handle().register_frame_callback(|_| {}).unwrap();
        assert!(runtime.needs_frame());
        assert_eq!(scheduler.frames_requested.load(Ordering::SeqCst), 1);
        runtime.handle().drain_frame_callbacks(0);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn handle_outliving_runtime_degrades_to_noop() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let handle = runtime.handle();
        drop(runtime);
        assert!(handle.register_frame_callback(|_| {}).is_none());
        assert!(!handle.has_frame_callbacks());
        handle.drain_frame_callbacks(0);
    }
}
