//! Runtime plumbing for Snapsheet: the frame-callback queue, the frame
//! clock, and the platform traits hosts implement to drive the engine.

pub mod frame_clock;
pub mod platform;
pub mod runtime;

/// Identifies a registered frame callback within a runtime.
pub type FrameCallbackId = u64;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler, ScrollLock};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
