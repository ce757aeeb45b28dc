//! Declarative session setup, loadable from JSON.

use serde::{Deserialize, Serialize};

use tideline_holster_core::HolsterConfig;
use tideline_mixer_core::{BlendStrategy, BlinkConfig, ClipTrack, WheelTrack};

use crate::error::SessionError;
use crate::tasks::TaskSpec;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub binding: String,
    pub target_count: usize,
    #[serde(default)]
    pub strategy: BlendStrategy,
    #[serde(flatten)]
    pub track: ClipTrack,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelTrackSpec {
    pub binding: String,
    #[serde(flatten)]
    pub track: WheelTrack,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlinkSpec {
    pub binding: String,
    #[serde(flatten)]
    pub config: BlinkConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HolsterSpec {
    pub id: String,
    #[serde(flatten)]
    pub config: HolsterConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub tracks: Vec<TrackSpec>,
    pub wheels: Vec<WheelTrackSpec>,
    pub blinks: Vec<BlinkSpec>,
    pub holsters: Vec<HolsterSpec>,
    pub tasks: Vec<TaskSpec>,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}
