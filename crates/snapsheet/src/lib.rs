//! A host-agnostic bottom sheet interaction engine.
//!
//! The crate turns a raw pointer stream into sheet behavior: snap point
//! geometry, release resolution (flick vs. position), and an animated
//! position the host renders. Hosts supply a frame source through
//! `snapsheet-core` and receive state changes through listeners; no
//! windowing or widget assumptions live here.

use std::fmt;

pub mod config;
pub mod constants;
pub mod controller;
pub mod gesture;
pub mod resolver;
pub mod snap_points;
pub mod velocity_tracker;

pub use config::SheetConfig;
pub use controller::{SheetController, SheetGestureListener, SheetStatus};
pub use gesture::{DragTracker, GestureSample};
pub use resolver::{resolve, SnapOutcome};
pub use snap_points::{nearest, SnapOffsets, SnapPoints};
pub use snapsheet_animation::MotionProfile;
pub use velocity_tracker::VelocityTracker;

/// Errors produced when validating a [`SheetConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The snap point list was empty.
    EmptySnapPoints,
    /// A snap fraction fell outside `(0.0, 1.0]`.
    FractionOutOfRange { index: usize, value: f32 },
    /// Snap fractions must strictly increase.
    NotStrictlyIncreasing { index: usize },
    /// The initial snap index pointed past the snap point list.
    InitialIndexOutOfRange { index: usize, len: usize },
    /// The flick velocity threshold must be a positive number.
    NonPositiveFlickVelocity { value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySnapPoints => {
                write!(f, "at least one snap point is required")
            }
            ConfigError::FractionOutOfRange { index, value } => {
                write!(
                    f,
                    "snap fraction {value} at index {index} is outside (0.0, 1.0]"
                )
            }
            ConfigError::NotStrictlyIncreasing { index } => {
                write!(
                    f,
                    "snap fraction at index {index} does not increase over its predecessor"
                )
            }
            ConfigError::InitialIndexOutOfRange { index, len } => {
                write!(
                    f,
                    "initial snap index {index} is out of range for {len} snap points"
                )
            }
            ConfigError::NonPositiveFlickVelocity { value } => {
                write!(f, "flick velocity threshold {value} must be positive")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
