use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum HolsterError {
    #[error("holster config field '{field}' must be positive and finite, got {value}")]
    InvalidConfig { field: &'static str, value: f32 },
    #[error("holster range {range} must exceed dock distance {dock_distance}")]
    RangeInsideDock { range: f32, dock_distance: f32 },
}
