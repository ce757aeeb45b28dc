use bevy::prelude::*;
use tideline_session::Session;

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{BlendWeights, HolsterBody, HolsterLink, MixBinding, Steering};
pub use resources::{FixedDt, GrabQueue, PendingFrame};
pub use systems::{BlinkRequest, GrabInteraction, SessionEvent};

/// The session driven by this app.
#[derive(Resource, Default)]
pub struct TidelineSession(pub Session);

pub struct TidelinePlugin;

impl Plugin for TidelinePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TidelineSession>()
            .init_resource::<FixedDt>()
            .init_resource::<GrabQueue>()
            .init_resource::<PendingFrame>()
            .add_event::<GrabInteraction>()
            .add_event::<BlinkRequest>()
            .add_event::<SessionEvent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::queue_grabs_system,
                    systems::blink_requests_system,
                    systems::step_session_system,
                    systems::apply_frame_system,
                )
                    .chain(),
            );
    }
}
