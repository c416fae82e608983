//! Release resolution: where the sheet goes when the finger lifts.

use crate::constants::SNAP_HYSTERESIS_RATIO;
use crate::gesture::GestureSample;
use crate::snap_points::nearest;

/// Outcome of resolving a released gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapOutcome {
    /// Settle at the snap point with this index.
    Settle(usize),
    /// Dismiss the sheet entirely.
    Close,
}

/// Decide the sheet's destination from the release sample.
///
/// `offsets` are the derived snap offsets (non-empty, descending) and
/// `active_index` the currently settled snap point. Rules apply in order,
/// first match wins:
///
/// 1. a flick (velocity above `flick_velocity`) follows its direction:
///    down dismisses, up settles at the topmost snap point;
/// 2. at the boundary snap points, direction alone decides: dragging down
///    from the lowest point dismisses, dragging up at the topmost re-settles;
/// 3. a slow release switches to the nearest snap point only after
///    travelling more than the hysteresis share of the gap, and otherwise
///    springs back to the active point.
pub fn resolve(
    sample: &GestureSample,
    active_index: usize,
    offsets: &[f32],
    flick_velocity: f32,
) -> SnapOutcome {
    let last_index = offsets.len() - 1;
    let moving_down = sample.movement_delta > 0.0;

    if sample.velocity > flick_velocity {
        return if moving_down {
            SnapOutcome::Close
        } else {
            SnapOutcome::Settle(last_index)
        };
    }

    if !moving_down && active_index == last_index {
        return SnapOutcome::Settle(last_index);
    }
    if moving_down && active_index == 0 {
        return SnapOutcome::Close;
    }

    let nearest_index = nearest(offsets, sample.offset);
    let active_offset = offsets[active_index];
    let threshold = (active_offset - offsets[nearest_index]).abs() * SNAP_HYSTERESIS_RATIO;
    let delta_from_active = (active_offset - sample.offset).abs();

    if delta_from_active > threshold {
        SnapOutcome::Settle(nearest_index)
    } else {
        SnapOutcome::Settle(active_index)
    }
}
