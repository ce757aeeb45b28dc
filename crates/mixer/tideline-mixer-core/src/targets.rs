//! Host-side objects the mixer writes into.
//!
//! The host resolves what a track is bound to and hands it over directly;
//! there is no lookup by name or type inside the mixer.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::MixerError;

/// Anything with a fixed number of float slots the mixer can override.
pub trait BlendTarget {
    fn target_count(&self) -> usize;
    fn value(&self, index: usize) -> Option<f32>;
    fn set_value(&mut self, index: usize, value: f32);
}

impl BlendTarget for [f32] {
    fn target_count(&self) -> usize {
        self.len()
    }

    fn value(&self, index: usize) -> Option<f32> {
        self.get(index).copied()
    }

    fn set_value(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.get_mut(index) {
            *slot = value;
        }
    }
}

impl BlendTarget for Vec<f32> {
    fn target_count(&self) -> usize {
        self.len()
    }

    fn value(&self, index: usize) -> Option<f32> {
        self.get(index).copied()
    }

    fn set_value(&mut self, index: usize, value: f32) {
        self.as_mut_slice().set_value(index, value);
    }
}

/// Named blend shapes of a skinned mesh. The shape count is only known once
/// the mesh is bound.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BlendShapeSet {
    names: Vec<String>,
    weights: Vec<f32>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl BlendShapeSet {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self, MixerError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(MixerError::DuplicateBlendShape(name.clone()));
            }
        }
        Ok(Self {
            weights: vec![0.0; names.len()],
            names,
            index,
        })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index
            .get(name)
            .copied()
            .or_else(|| self.names.iter().position(|n| n == name))
    }

    pub fn weight(&self, name: &str) -> Option<f32> {
        self.index_of(name)
            .and_then(|i| self.weights.get(i).copied())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl BlendTarget for BlendShapeSet {
    fn target_count(&self) -> usize {
        self.weights.len()
    }

    fn value(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    fn set_value(&mut self, index: usize, value: f32) {
        self.weights.set_value(index, value);
    }
}

/// Constraint slots of the character look-at rig. The ordinal is the clip
/// target index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigSlot {
    Body = 0,
    Head = 1,
    Eyes = 2,
    Aim = 3,
}

impl RigSlot {
    pub const COUNT: usize = 4;
    pub const ALL: [RigSlot; RigSlot::COUNT] =
        [RigSlot::Body, RigSlot::Head, RigSlot::Eyes, RigSlot::Aim];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// IK weights of the look-at rig, one per [`RigSlot`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookAtRig {
    weights: [f32; RigSlot::COUNT],
}

impl LookAtRig {
    pub fn new(weights: [f32; RigSlot::COUNT]) -> Self {
        Self { weights }
    }

    pub fn weight(&self, slot: RigSlot) -> f32 {
        self.weights[slot.index()]
    }

    pub fn set_weight(&mut self, slot: RigSlot, value: f32) {
        self.weights[slot.index()] = value;
    }
}

impl BlendTarget for LookAtRig {
    fn target_count(&self) -> usize {
        RigSlot::COUNT
    }

    fn value(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    fn set_value(&mut self, index: usize, value: f32) {
        self.weights.as_mut_slice().set_value(index, value);
    }
}

/// Authoritative steering signal produced by the winner-take-all mix.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelOverride {
    pub active: bool,
    pub value: f32,
}

impl WheelOverride {
    pub fn new(active: bool, value: f32) -> Self {
        Self { active, value }
    }
}

/// Host steering wheel: player input unless a timeline override is active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    pub input: f32,
    pub override_active: bool,
    pub override_value: f32,
}

impl WheelState {
    pub fn apply_override(&mut self, ov: WheelOverride) {
        self.override_active = ov.active;
        self.override_value = ov.value;
    }

    /// The steering value the boat should use this tick.
    pub fn effective(&self) -> f32 {
        if self.override_active {
            self.override_value
        } else {
            self.input
        }
    }
}
