//! Per-clip contributions handed to the mixer each tick.

use serde::{Deserialize, Serialize};

/// One active clip's opinion about a single target slot this tick.
///
/// `target_index` is kept signed because it comes straight from authored
/// content; anything outside `[0, target_count)` is dropped by the mixer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipContribution {
    pub target_index: i32,
    /// Timeline crossfade weight, expected in `[0, 1]`.
    pub weight: f32,
    /// Author-set strength, independent of the crossfade weight.
    pub intensity: f32,
}

impl ClipContribution {
    pub fn new(target_index: i32, weight: f32, intensity: f32) -> Self {
        Self {
            target_index,
            weight,
            intensity,
        }
    }

    /// Resolve the authored index against a target of `target_count` slots.
    #[inline]
    pub fn slot(&self, target_count: usize) -> Option<usize> {
        usize::try_from(self.target_index)
            .ok()
            .filter(|&i| i < target_count)
    }

    /// The additive contribution of this clip.
    #[inline]
    pub fn weighted(&self) -> f32 {
        self.weight * self.intensity
    }
}
