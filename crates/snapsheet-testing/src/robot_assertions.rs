//! Assertion utilities for robot testing
//!
//! This module provides assertion helpers specifically designed for
//! validating sheet state in robot tests.

use snapsheet::SheetController;

/// Assert that a value is within an expected range.
///
/// This is useful for fuzzy matching of positions that carry rounding
/// from fraction arithmetic.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a sheet is at rest at the given offset, with no drag in
/// progress.
pub fn assert_resting_at(controller: &SheetController, expected: f32, msg: &str) {
    assert!(!controller.is_dragging(), "{}: still dragging", msg);
    assert_approx_eq(controller.position(), expected, 0.01, msg);
}
