//! Tideline Mixer Core (engine-agnostic)
//!
//! Weighted blending of timeline clip contributions into per-target values.
//! One generic pass ([`mixer::mix_slots`]) backs every use site: additive
//! blend-shape and look-at rig weights, per-slot winner-take-all, and the
//! steering-wheel override. Hosts pass the bound target and the active clip
//! list explicitly each tick and apply the resulting [`TargetArray`].

pub mod accumulate;
pub mod blink;
pub mod contribution;
pub mod error;
pub mod mixer;
pub mod target;
pub mod targets;
pub mod timeline;

pub use accumulate::{AdditiveSlot, SlotAccumulator, WinnerSlot};
pub use blink::{BlinkConfig, BlinkController, BlinkPhase};
pub use contribution::ClipContribution;
pub use error::MixerError;
pub use mixer::{mix, mix_slots, mix_wheel_override, BlendStrategy};
pub use target::{TargetArray, UNCLAIMED};
pub use targets::{BlendShapeSet, BlendTarget, LookAtRig, RigSlot, WheelOverride, WheelState};
pub use timeline::{ClipTrack, ClipWindow, TimelineClip, WheelClip, WheelTrack};
