//! Testing utilities and harness for Snapsheet

pub mod robot;
pub mod robot_assertions;

// Re-export testing utilities
pub use robot::*;
pub use robot_assertions::{assert_approx_eq, assert_resting_at};

pub mod prelude {
    pub use crate::robot::*;
    pub use crate::robot_assertions::{assert_approx_eq, assert_resting_at};
}
