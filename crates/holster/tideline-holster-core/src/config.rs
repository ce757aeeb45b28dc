//! Holster tuning.

use serde::{Deserialize, Serialize};

use crate::error::HolsterError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolsterConfig {
    /// Distance from the rest anchor under which a released prop docks.
    pub dock_distance: f32,
    /// How far below the rest height a loose prop may fall before it is
    /// force-returned.
    pub drop_height: f32,
    /// Maximum distance from the rest anchor before the prop counts as out of range.
    pub range: f32,
    /// Ticks the bodies stay kinematic after a force-return starts.
    pub freeze_frame_count: u32,
}

impl Default for HolsterConfig {
    fn default() -> Self {
        Self {
            dock_distance: 0.1,
            drop_height: 0.15,
            range: 1.0,
            freeze_frame_count: 10,
        }
    }
}

impl HolsterConfig {
    pub fn validate(&self) -> Result<(), HolsterError> {
        let positive = [
            ("dock_distance", self.dock_distance),
            ("drop_height", self.drop_height),
            ("range", self.range),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HolsterError::InvalidConfig { field, value });
            }
        }
        if self.range <= self.dock_distance {
            return Err(HolsterError::RangeInsideDock {
                range: self.range,
                dock_distance: self.dock_distance,
            });
        }
        Ok(())
    }
}
