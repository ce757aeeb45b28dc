//! Tideline Holster Core (engine-agnostic)
//!
//! Tracks whether a grabbable prop is docked in its holster, held, or being
//! guided back after it was dropped or carried out of range. The host feeds
//! one [`HolsterInput`] per physics tick and applies the returned
//! [`HolsterOutput`] (joint axis locks, kinematic flag, reposition target) to
//! its own bodies.

pub mod config;
pub mod error;
pub mod holster;
pub mod io;
pub mod joint;

pub use config::HolsterConfig;
pub use error::HolsterError;
pub use holster::{Holster, HolsterPhase};
pub use io::{GrabEvent, HolsterEvent, HolsterInput, HolsterOutput, HolsterSample};
pub use joint::{AxisMotion, JointConstraints};
