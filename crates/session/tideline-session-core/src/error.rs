use thiserror::Error;

use tideline_holster_core::HolsterError;
use tideline_mixer_core::{BlendStrategy, MixerError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Mixer(#[from] MixerError),
    #[error(transparent)]
    Holster(#[from] HolsterError),
    #[error("unknown binding '{0}'")]
    UnknownBinding(String),
    #[error("unknown holster '{0}'")]
    UnknownHolster(String),
    #[error("id '{0}' registered more than once")]
    DuplicateId(String),
    #[error("binding '{binding}' has {expected} targets, track declares {found}")]
    TargetCountMismatch {
        binding: String,
        expected: usize,
        found: usize,
    },
    #[error("binding '{binding}' blends with {expected:?}, track declares {found:?}")]
    StrategyMismatch {
        binding: String,
        expected: BlendStrategy,
        found: BlendStrategy,
    },
    #[error("invalid task: {0}")]
    InvalidTask(String),
    #[error("dt must be finite and non-negative, got {0}")]
    InvalidDt(f32),
}
