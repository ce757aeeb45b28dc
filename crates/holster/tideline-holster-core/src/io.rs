//! Per-tick inputs from, and outputs to, the host physics loop.

use serde::{Deserialize, Serialize};

use crate::holster::HolsterPhase;
use crate::joint::JointConstraints;

/// Edge-triggered interaction events from the host's grab system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrabEvent {
    Grab,
    Release,
}

/// Where the holsterable is relative to its rest anchor this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HolsterSample {
    /// Rest-relative position (world axes, y up).
    pub offset: [f32; 3],
    pub distance_from_rest: f32,
    /// Height relative to the rest anchor; negative below it.
    pub vertical_offset: f32,
    pub out_of_range: bool,
}

impl HolsterSample {
    /// Derive distance, height and range status from a rest-relative offset.
    pub fn from_offset(offset: [f32; 3], range: f32) -> Self {
        let distance = offset.iter().map(|c| c * c).sum::<f32>().sqrt();
        Self {
            offset,
            distance_from_rest: distance,
            vertical_offset: offset[1],
            out_of_range: distance > range,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HolsterInput {
    pub sample: HolsterSample,
    #[serde(default)]
    pub event: Option<GrabEvent>,
}

impl HolsterInput {
    pub fn new(sample: HolsterSample) -> Self {
        Self {
            sample,
            event: None,
        }
    }

    pub fn with_event(mut self, event: GrabEvent) -> Self {
        self.event = Some(event);
        self
    }
}

/// Transitions observed during a tick, in the order they happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolsterEvent {
    Grabbed,
    Released,
    Docked,
    ForceReturnStarted,
    FreezeReleased,
}

impl HolsterEvent {
    pub fn name(self) -> &'static str {
        match self {
            HolsterEvent::Grabbed => "grabbed",
            HolsterEvent::Released => "released",
            HolsterEvent::Docked => "docked",
            HolsterEvent::ForceReturnStarted => "force_return_started",
            HolsterEvent::FreezeReleased => "freeze_released",
        }
    }
}

/// What the host applies to its joint and bodies after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HolsterOutput {
    pub phase: HolsterPhase,
    pub joints: JointConstraints,
    pub kinematic: bool,
    /// Rest-relative position to snap the bodies to, while frozen.
    pub reposition: Option<[f32; 3]>,
    pub events: Vec<HolsterEvent>,
}
