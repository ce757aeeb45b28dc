use bevy::prelude::*;
use serde_json::Value as JsonValue;
use tideline_holster_core::{GrabEvent, HolsterInput};
use tideline_session::SessionInputs;

use crate::components::{BlendWeights, HolsterBody, HolsterLink, MixBinding, Steering};
use crate::resources::{FixedDt, GrabQueue, PendingFrame};
use crate::TidelineSession;

/// A hand grabbed or released a holstered prop.
#[derive(Event, Debug, Clone)]
pub struct GrabInteraction {
    pub holster_id: String,
    pub kind: GrabEvent,
}

/// Force the blink controllers on a binding to blink next tick.
#[derive(Event, Debug, Clone)]
pub struct BlinkRequest {
    pub binding: String,
}

/// Session event re-broadcast to Bevy systems after each tick.
#[derive(Event, Debug, Clone)]
pub struct SessionEvent {
    pub name: String,
    pub payload: JsonValue,
}

pub fn queue_grabs_system(mut reader: EventReader<GrabInteraction>, mut queue: ResMut<GrabQueue>) {
    for grab in reader.read() {
        queue.push(&grab.holster_id, grab.kind);
    }
}

pub fn blink_requests_system(
    mut reader: EventReader<BlinkRequest>,
    mut session: ResMut<TidelineSession>,
) {
    for req in reader.read() {
        if let Err(err) = session.0.blink(&req.binding) {
            warn!("blink request ignored: {err}");
        }
    }
}

/// Sample every linked holster relative to its anchor, step the session with
/// the fixed dt and stage the frame. Offsets are measured in world space.
pub fn step_session_system(
    mut session: ResMut<TidelineSession>,
    dt: Res<FixedDt>,
    mut grabs: ResMut<GrabQueue>,
    links: Query<(&HolsterLink, &GlobalTransform)>,
    anchors: Query<&GlobalTransform>,
    mut pending: ResMut<PendingFrame>,
) {
    let mut inputs = SessionInputs::default();
    for (link, body) in links.iter() {
        let Some(holster) = session.0.holster(&link.id) else {
            warn!("holster link '{}' has no session holster", link.id);
            grabs.discard(&link.id);
            continue;
        };
        let Ok(anchor) = anchors.get(link.anchor) else {
            warn!("holster '{}' anchor entity has no GlobalTransform", link.id);
            grabs.discard(&link.id);
            continue;
        };
        let offset = (body.translation() - anchor.translation()).to_array();
        let mut input = HolsterInput::new(holster.sample(offset));
        if let Some(kind) = grabs.pop(&link.id) {
            input = input.with_event(kind);
        }
        inputs.holsters.insert(link.id.clone(), input);
    }

    match session.0.step(dt.0, &inputs) {
        Ok(frame) => pending.0 = Some(frame),
        Err(err) => error!("tideline session step failed: {err}"),
    }
}

/// Write the staged frame into components and forward its events.
pub fn apply_frame_system(
    mut pending: ResMut<PendingFrame>,
    mut weights: Query<(&MixBinding, &mut BlendWeights)>,
    mut wheels: Query<&mut Steering>,
    mut bodies: Query<(&HolsterLink, &mut HolsterBody, &mut Transform, Option<&Parent>)>,
    globals: Query<&GlobalTransform>,
    mut out: EventWriter<SessionEvent>,
) {
    let Some(frame) = pending.0.take() else {
        return;
    };

    for (binding, mut w) in weights.iter_mut() {
        if let Some(targets) = frame.targets.get(&binding.0) {
            targets.apply_to_slice(&mut w.0);
        }
    }

    for mut steering in wheels.iter_mut() {
        if let Some(ov) = frame.wheels.get(&steering.binding).copied() {
            steering.state.apply_override(ov);
        }
    }

    for (link, mut body, mut transform, parent) in bodies.iter_mut() {
        let Some(output) = frame.holsters.get(&link.id) else {
            continue;
        };
        body.phase = output.phase;
        body.joints = output.joints;
        body.kinematic = output.kinematic;
        let Some(offset) = output.reposition else {
            continue;
        };
        let Ok(anchor) = globals.get(link.anchor) else {
            continue;
        };
        let target = anchor.translation() + Vec3::from_array(offset);
        // Transform is parent-relative; bring the world target into that space.
        transform.translation = match parent.and_then(|p| globals.get(p.get()).ok()) {
            Some(parent) => parent.affine().inverse().transform_point3(target),
            None => target,
        };
    }

    for record in frame.events {
        let name = record["event"].as_str().unwrap_or_default().to_string();
        out.send(SessionEvent {
            name,
            payload: record["payload"].clone(),
        });
    }
}
