//! The snap-point model: validated resting-height fractions and their
//! derived pixel offsets.

use crate::ConfigError;
use smallvec::SmallVec;

/// Pixel offsets derived from snap fractions, in fraction order.
pub type SnapOffsets = SmallVec<[f32; 4]>;

/// An ordered set of resting heights, as fractions of the container extent.
///
/// Fractions live in (0, 1] and are strictly increasing; 1.0 is the fully
/// extended sheet. Validated once at construction and immutable afterwards;
/// reconfiguration replaces the whole set.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    fractions: SmallVec<[f32; 4]>,
}

impl SnapPoints {
    pub fn new(fractions: impl IntoIterator<Item = f32>) -> Result<Self, ConfigError> {
        let fractions: SmallVec<[f32; 4]> = fractions.into_iter().collect();
        if fractions.is_empty() {
            return Err(ConfigError::EmptySnapPoints);
        }
        for (index, value) in fractions.iter().enumerate() {
            if !(*value > 0.0 && *value <= 1.0) {
                return Err(ConfigError::FractionOutOfRange {
                    index,
                    value: *value,
                });
            }
            if index > 0 && *value <= fractions[index - 1] {
                return Err(ConfigError::NotStrictlyIncreasing { index });
            }
        }
        Ok(Self { fractions })
    }

    pub fn fractions(&self) -> &[f32] {
        &self.fractions
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.fractions.len() - 1
    }

    /// Derive pixel offsets for the given container extent, one per
    /// fraction, in fraction order: offset = extent × (1 − fraction), so
    /// ascending fractions produce strictly descending offsets and 1.0
    /// rests at offset 0.
    pub fn offsets_for(&self, container_extent: f32) -> SnapOffsets {
        self.fractions
            .iter()
            .map(|fraction| container_extent * (1.0 - fraction))
            .collect()
    }
}

/// Index of the offset closest to `target`. An exact midpoint keeps the
/// earlier candidate: a later offset wins only by being strictly closer.
///
/// `offsets` must be non-empty (guaranteed when derived from [`SnapPoints`]).
pub fn nearest(offsets: &[f32], target: f32) -> usize {
    let mut best = 0;
    let mut best_distance = (offsets[0] - target).abs();
    for (index, offset) in offsets.iter().enumerate().skip(1) {
        let distance = (offset - target).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}
