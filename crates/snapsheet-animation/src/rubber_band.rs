//! Elastic response for drags past a hard bound.
//!
//! Instead of clamping, overdrag is reported with diminishing returns so the
//! panel visibly resists: the further past the bound the finger travels, the
//! smaller each additional pixel of displacement becomes. The displacement
//! asymptotically approaches `range`, so the panel can never be dragged a
//! full container height past its bound.

/// Elasticity coefficient for overdrag.
///
/// 0.15 gives roughly one seventh of the raw finger travel at one full
/// `range` of overdrag, which reads as firm resistance without feeling
/// stuck. Shared by touch libraries on several platforms, so sheets feel
/// consistent with native overscroll.
pub const RUBBER_BAND_COEFFICIENT: f32 = 0.15;

/// Maps raw overdrag `distance` past a bound to the damped displacement
/// actually shown, scaled against `range` (typically the container extent).
///
/// Returns 0.0 for non-positive distances. A non-positive `range` degrades
/// to a hard clamp (always 0.0).
pub fn rubber_band(distance: f32, range: f32) -> f32 {
    if distance <= 0.0 || range <= 0.0 {
        return 0.0;
    }
    (distance * range * RUBBER_BAND_COEFFICIENT)
        / (range + RUBBER_BAND_COEFFICIENT * distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_maps_to_zero() {
        assert_eq!(rubber_band(0.0, 1000.0), 0.0);
        assert_eq!(rubber_band(-20.0, 1000.0), 0.0);
    }

    #[test]
    fn displacement_is_damped_and_monotonic() {
        let near = rubber_band(50.0, 1000.0);
        let far = rubber_band(400.0, 1000.0);
        assert!(near > 0.0);
        assert!(near < 50.0);
        assert!(far > near);
        assert!(far < 400.0);
    }

    #[test]
    fn displacement_never_exceeds_range() {
        assert!(rubber_band(1.0e9, 1000.0) < 1000.0);
    }

    #[test]
    fn degenerate_range_clamps_hard() {
        assert_eq!(rubber_band(120.0, 0.0), 0.0);
    }
}
