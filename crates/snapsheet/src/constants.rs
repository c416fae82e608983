//! Shared release-resolution constants.
//!
//! These values are deliberately centralized: the resolver, the controller
//! defaults, and the tests all reference the same thresholds, so tuning one
//! place retunes the whole sheet.
//!
//! Velocities are in logical pixels per millisecond, matching the unit the
//! velocity tracker reports at release time.

/// Release speed beyond which position is ignored and the gesture direction
/// alone decides the outcome.
///
/// At 2.0 px/ms a 16ms frame moves the finger a third of a phone screen, so
/// the user is unmistakably throwing the sheet rather than placing it.
/// Below this, resolution falls through to positional snapping.
pub const FLICK_VELOCITY: f32 = 2.0;

/// Fraction of the gap between the active and nearest snap offsets that a
/// slow release must have travelled before the sheet leaves its active
/// snap point.
///
/// 0.4 keeps the sheet sticky around its resting height (small adjustments
/// spring back) while still switching before the halfway mark, so a
/// deliberate pull never feels ignored.
pub const SNAP_HYSTERESIS_RATIO: f32 = 0.4;
