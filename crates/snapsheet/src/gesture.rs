//! The gesture stream the sheet consumes, and a tracker that produces it
//! from raw pointer data.

use crate::velocity_tracker::VelocityTracker;

/// One observation of an in-progress or ending drag.
///
/// Samples are consumed immediately and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Absolute position along the drag axis: the offset the sheet should
    /// show while tracking the finger.
    pub offset: f32,
    /// Signed displacement since the gesture began. Positive moves toward
    /// the hidden edge. Resolution only consumes the sign.
    pub movement_delta: f32,
    /// Pointer speed in px/ms, non-negative.
    pub velocity: f32,
    /// True exactly once, on the release sample.
    pub is_final: bool,
}

struct DragOrigin {
    /// Sheet offset when the gesture began.
    start_offset: f32,
    /// Pointer position when the gesture began.
    start_position: f32,
}

/// Turns begin/move/end pointer updates into [`GestureSample`]s, for hosts
/// that have raw positions and timestamps but no gesture pipeline of their
/// own.
///
/// No touch slop is applied: the sheet tracks from the first reported
/// delta. Distinguishing a drag from a tap or a scroll is the host's
/// gesture disambiguation, not this tracker's.
pub struct DragTracker {
    origin: Option<DragOrigin>,
    velocity: VelocityTracker,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self {
            origin: None,
            velocity: VelocityTracker::new(),
        }
    }

    /// Begin a drag with the pointer at `position` while the sheet rests
    /// at `sheet_offset`. A gesture already in progress is replaced.
    pub fn begin(&mut self, time_ms: i64, position: f32, sheet_offset: f32) {
        self.velocity.reset();
        self.velocity.add_position(time_ms, position);
        self.origin = Some(DragOrigin {
            start_offset: sheet_offset,
            start_position: position,
        });
    }

    /// Produce the sample for a pointer move. Returns `None` (and warns)
    /// when no gesture is active.
    pub fn update(&mut self, time_ms: i64, position: f32) -> Option<GestureSample> {
        self.sample(time_ms, position, false)
    }

    /// Produce the release sample and end the gesture.
    pub fn finish(&mut self, time_ms: i64, position: f32) -> Option<GestureSample> {
        let sample = self.sample(time_ms, position, true);
        self.origin = None;
        sample
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    fn sample(&mut self, time_ms: i64, position: f32, is_final: bool) -> Option<GestureSample> {
        let origin = match self.origin.as_ref() {
            Some(origin) => origin,
            None => {
                log::warn!("drag sample at {position} ignored; no gesture in progress");
                return None;
            }
        };
        self.velocity.add_position(time_ms, position);
        let movement = position - origin.start_position;
        Some(GestureSample {
            offset: origin.start_offset + movement,
            movement_delta: movement,
            velocity: self.velocity.velocity_per_ms().abs(),
            is_final,
        })
    }
}
