use bevy::prelude::*;
use tideline_holster_core::{HolsterPhase, JointConstraints};
use tideline_mixer_core::WheelState;

/// Session binding whose mixed targets this entity receives.
#[derive(Component, Debug, Clone)]
pub struct MixBinding(pub String);

/// Host blend-shape weights. Slots the mix leaves unclaimed keep their value.
#[derive(Component, Debug, Clone, Default)]
pub struct BlendWeights(pub Vec<f32>);

/// Steering wheel fed by a wheel binding's override.
#[derive(Component, Debug, Clone, Default)]
pub struct Steering {
    pub binding: String,
    pub state: WheelState,
}

/// Links a prop body to its session holster and the entity marking its rest pose.
#[derive(Component, Debug, Clone)]
pub struct HolsterLink {
    pub id: String,
    pub anchor: Entity,
}

/// Physics-facing holster state, written back every tick the holster runs.
#[derive(Component, Debug, Clone)]
pub struct HolsterBody {
    pub phase: HolsterPhase,
    pub joints: JointConstraints,
    pub kinematic: bool,
}

impl Default for HolsterBody {
    fn default() -> Self {
        Self {
            phase: HolsterPhase::Holstered,
            joints: JointConstraints::LOCKED,
            kinematic: false,
        }
    }
}
