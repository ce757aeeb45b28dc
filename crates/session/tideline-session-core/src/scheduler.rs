use indexmap::IndexMap;
use serde_json::json;

use tideline_mixer_core::{mix, mix_wheel_override, TargetArray, WheelOverride};

use crate::{Session, SessionFrame, SessionInputs};

/// Run one tick:
///   advance time -> mix every binding -> tick holsters -> publish events -> frame
///
/// Every track bound to the same target is gathered first and mixed once, so
/// all weight writes for a binding land together after every clip has been
/// evaluated.
pub(crate) fn run_tick(session: &mut Session, dt: f32, inputs: &SessionInputs) -> SessionFrame {
    session.epoch = session.epoch.wrapping_add(1);
    session.time += dt;
    let time = session.time;

    // Mix phase
    let mut targets: IndexMap<String, TargetArray> = IndexMap::new();
    for (binding, state) in session.bindings.iter_mut() {
        let mut contributions = Vec::new();
        for track in state.tracks.iter() {
            contributions.extend(track.contributions_at(time));
        }
        for blink in state.blinks.iter_mut() {
            contributions.extend(blink.tick(dt));
        }
        targets.insert(
            binding.clone(),
            mix(state.strategy, state.target_count, &contributions),
        );
    }

    let mut wheels: IndexMap<String, WheelOverride> = IndexMap::new();
    for (binding, tracks) in session.wheels.iter() {
        let ov = mix_wheel_override(tracks.iter().flat_map(|t| t.overrides_at(time)));
        wheels.insert(binding.clone(), ov);
    }

    // Holster phase
    let mut holsters = IndexMap::new();
    let mut fired = Vec::new();
    for (id, holster) in session.holsters.iter_mut() {
        let Some(input) = inputs.holsters.get(id) else {
            continue;
        };
        let out = holster.tick(input);
        for ev in out.events.iter() {
            fired.push((format!("holster.{}", ev.name()), json!({ "holster": id })));
        }
        holsters.insert(id.clone(), out);
    }

    // Event phase
    let mut events = std::mem::take(&mut session.pending_events);
    let mut completed_tasks = std::mem::take(&mut session.pending_tasks);
    for (name, payload) in fired {
        let (records, done) = session.emit(&name, payload);
        events.extend(records);
        completed_tasks.extend(done);
    }

    SessionFrame {
        epoch: session.epoch,
        time,
        dt,
        targets,
        wheels,
        holsters,
        events,
        completed_tasks,
    }
}
