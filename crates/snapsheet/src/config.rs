//! Sheet session configuration.

use crate::constants::FLICK_VELOCITY;
use crate::snap_points::SnapPoints;
use crate::ConfigError;
use snapsheet_animation::MotionProfile;

/// Configuration for a sheet session. Validated when the controller is
/// built; invalid configurations never produce a running sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Resting heights as fractions of the container extent, strictly
    /// increasing within (0, 1].
    pub snap_fractions: Vec<f32>,
    /// The snap point the first `open()` settles to. Dismissal always
    /// resets the active index to the smallest snap point.
    pub initial_snap_index: usize,
    /// Release speed (px/ms) beyond which the gesture direction alone
    /// decides the outcome.
    pub flick_velocity: f32,
    /// Spring used when settling into a snap point.
    pub settle_profile: MotionProfile,
    /// Spring used when the sheet snaps shut.
    pub dismiss_profile: MotionProfile,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            snap_fractions: vec![0.3, 0.7, 1.0],
            initial_snap_index: 0,
            flick_velocity: FLICK_VELOCITY,
            settle_profile: MotionProfile::settle(),
            dismiss_profile: MotionProfile::dismiss(),
        }
    }
}

impl SheetConfig {
    pub fn new(snap_fractions: impl Into<Vec<f32>>) -> Self {
        Self {
            snap_fractions: snap_fractions.into(),
            ..Self::default()
        }
    }

    pub fn with_initial_snap_index(mut self, index: usize) -> Self {
        self.initial_snap_index = index;
        self
    }

    pub fn with_flick_velocity(mut self, velocity: f32) -> Self {
        self.flick_velocity = velocity;
        self
    }

    pub fn with_settle_profile(mut self, profile: MotionProfile) -> Self {
        self.settle_profile = profile;
        self
    }

    pub fn with_dismiss_profile(mut self, profile: MotionProfile) -> Self {
        self.dismiss_profile = profile;
        self
    }

    pub(crate) fn validate(&self) -> Result<SnapPoints, ConfigError> {
        let snap_points = SnapPoints::new(self.snap_fractions.iter().copied())?;
        if self.initial_snap_index >= snap_points.len() {
            return Err(ConfigError::InitialIndexOutOfRange {
                index: self.initial_snap_index,
                len: snap_points.len(),
            });
        }
        if self.flick_velocity.is_nan() || self.flick_velocity <= 0.0 {
            return Err(ConfigError::NonPositiveFlickVelocity {
                value: self.flick_velocity,
            });
        }
        Ok(snap_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SheetConfig::default();
        let snap_points = config.validate().unwrap();
        assert_eq!(snap_points.fractions(), &[0.3, 0.7, 1.0]);
        assert_eq!(config.initial_snap_index, 0);
        assert_eq!(config.flick_velocity, FLICK_VELOCITY);
    }

    #[test]
    fn builders_override_fields() {
        let config = SheetConfig::new([0.5, 1.0])
            .with_initial_snap_index(1)
            .with_flick_velocity(1.5);
        assert_eq!(config.snap_fractions, vec![0.5, 1.0]);
        assert_eq!(config.initial_snap_index, 1);
        assert_eq!(config.flick_velocity, 1.5);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_initial_index_outside_snap_list() {
        let config = SheetConfig::new([0.5, 1.0]).with_initial_snap_index(2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn rejects_non_positive_flick_velocity() {
        let config = SheetConfig::default().with_flick_velocity(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveFlickVelocity { value: 0.0 })
        );
        assert!(SheetConfig::default()
            .with_flick_velocity(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn snap_fraction_errors_pass_through() {
        assert_eq!(
            SheetConfig::new(Vec::new()).validate(),
            Err(ConfigError::EmptySnapPoints)
        );
    }
}
