/// Spring configuration for eased sheet motion.
///
/// The spring integrates in pixel space, so thresholds are pixels and
/// pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Damping ratio. 1.0 = critically damped, < 1.0 overshoots slightly.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values settle faster.
    pub stiffness: f32,
    /// Velocity magnitude (px/s) below which the motion may stop.
    pub velocity_threshold: f32,
    /// Distance from target (px) below which the motion may stop.
    pub position_threshold: f32,
}

impl MotionProfile {
    /// Create a profile with the given spring parameters and the standard
    /// stop thresholds.
    pub fn new(stiffness: f32, damping_ratio: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: 10.0,
            position_threshold: 0.5,
        }
    }

    /// The profile used when the sheet settles into a snap point.
    pub fn settle() -> Self {
        Self::new(200.0, 0.9)
    }

    /// The stiffer profile used when the sheet snaps shut.
    pub fn dismiss() -> Self {
        Self::new(400.0, 1.0)
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::settle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_is_slightly_under_damped() {
        let profile = MotionProfile::settle();
        assert!(profile.damping_ratio < 1.0);
        assert!(profile.damping_ratio > 0.8);
    }

    #[test]
    fn dismiss_is_stiffer_than_settle() {
        let settle = MotionProfile::settle();
        let dismiss = MotionProfile::dismiss();
        assert!(dismiss.stiffness > settle.stiffness);
        assert_eq!(dismiss.damping_ratio, 1.0);
    }

    #[test]
    fn default_profile_is_settle() {
        assert_eq!(MotionProfile::default(), MotionProfile::settle());
    }
}
