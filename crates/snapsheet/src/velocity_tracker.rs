//! Velocity estimation for release decisions.
//!
//! Impulse-strategy 1D estimator over a short trailing window. Samples
//! older than the horizon, or on the far side of a long idle gap, are
//! ignored, so the reported velocity reflects how the gesture ended rather
//! than how it began. A drag that pauses before lifting therefore releases
//! with zero velocity, which is what keeps slow placements from being
//! mistaken for flicks.

/// Ring buffer size for position samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this many milliseconds of the newest one count.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped;
/// older samples are discarded.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct PositionAtTime {
    time_ms: i64,
    position: f32,
}

/// Tracks absolute positions along the drag axis and estimates the release
/// velocity from the kinetic energy the recent samples imply.
#[derive(Clone)]
pub struct VelocityTracker {
    samples: [Option<PositionAtTime>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record the pointer position at the given time. Times must not go
    /// backwards between calls.
    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(PositionAtTime { time_ms, position });
    }

    /// Signed velocity estimate in px/ms, the unit release resolution
    /// compares against its flick threshold. Returns 0.0 without at least
    /// two recent samples.
    pub fn velocity_per_ms(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut previous_time = newest.time_ms;

        while let Some(sample) = self.samples[current_index] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (previous_time - sample.time_ms).abs() as f32;
            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }
            previous_time = sample.time_ms;

            positions[sample_count] = sample.position;
            times[sample_count] = -age;

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        impulse_velocity(&positions, &times, sample_count)
    }

    /// Signed velocity estimate in px/s.
    pub fn velocity(&self) -> f32 {
        self.velocity_per_ms() * 1000.0
    }

    /// Clears all tracked samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse-strategy estimate: accumulate the work each inter-sample
/// velocity change represents, then convert the kinetic energy back to a
/// velocity. Robust against a single noisy sample in a way a two-point
/// difference is not.
fn impulse_velocity(
    positions: &[f32; HISTORY_SIZE],
    times: &[f32; HISTORY_SIZE],
    sample_count: usize,
) -> f32 {
    if sample_count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = sample_count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zero() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity_per_ms(), 0.0);
    }

    #[test]
    fn single_sample_reports_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 100.0);
        assert_eq!(tracker.velocity_per_ms(), 0.0);
    }

    #[test]
    fn constant_motion_is_estimated_accurately() {
        let mut tracker = VelocityTracker::new();
        // 100 px every 10 ms: 10 px/ms.
        tracker.add_position(0, 0.0);
        tracker.add_position(10, 100.0);
        tracker.add_position(20, 200.0);
        tracker.add_position(30, 300.0);

        let velocity = tracker.velocity_per_ms();
        assert!(
            (velocity - 10.0).abs() < 1.0,
            "expected ~10 px/ms, got {velocity}"
        );
        assert!((tracker.velocity() - 10_000.0).abs() < 1_000.0);
    }

    #[test]
    fn upward_drag_reports_negative_velocity() {
        let mut tracker = VelocityTracker::new();
        // Sheet offsets shrink as the finger moves up.
        tracker.add_position(0, 300.0);
        tracker.add_position(8, 270.0);
        tracker.add_position(16, 240.0);
        tracker.add_position(24, 210.0);

        let velocity = tracker.velocity_per_ms();
        assert!(velocity < -2.0, "expected a flick-grade estimate, got {velocity}");
    }

    #[test]
    fn idle_gap_before_release_reports_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.velocity_per_ms(), 0.0);
    }

    #[test]
    fn samples_beyond_horizon_are_ignored() {
        let mut tracker = VelocityTracker::new();
        // Stale history in the opposite direction.
        tracker.add_position(0, 500.0);
        // Recent, consistent downward motion.
        tracker.add_position(150, 100.0);
        tracker.add_position(160, 200.0);
        tracker.add_position(170, 300.0);

        let velocity = tracker.velocity_per_ms();
        assert!(velocity > 0.0, "stale sample dominated the estimate");
    }

    #[test]
    fn reset_discards_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(10, 100.0);
        tracker.reset();
        assert_eq!(tracker.velocity_per_ms(), 0.0);
    }
}
