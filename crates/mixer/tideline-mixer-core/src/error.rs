use thiserror::Error;

/// Configuration-time errors. Mixing itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum MixerError {
    #[error("blend shape '{0}' declared more than once")]
    DuplicateBlendShape(String),
    #[error("invalid blink config: {0}")]
    InvalidBlink(String),
    #[error("invalid clip '{field}': {value}")]
    InvalidClip { field: &'static str, value: f32 },
}
