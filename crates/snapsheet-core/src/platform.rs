//! Platform abstraction traits for Snapsheet runtime services.
//!
//! These traits let the sheet engine delegate scheduling, timing, and
//! scroll suppression to the host platform, enabling integration with
//! different environments without depending directly on `std` APIs.

/// Schedules work for the Snapsheet runtime.
///
/// Implementations are responsible for waking the host loop so it drains
/// pending frame callbacks. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Suppresses scrolling of the content behind the sheet.
///
/// The controller raises the lock while the sheet is open or being dragged
/// and releases it once the sheet is closed and idle. Calls are edge
/// triggered; implementations never see the same call twice in a row.
pub trait ScrollLock {
    /// Stop the background surface from scrolling.
    fn enable(&self);

    /// Allow the background surface to scroll again.
    fn disable(&self);
}
