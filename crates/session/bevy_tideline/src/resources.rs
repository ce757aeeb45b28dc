use bevy::prelude::*;
use hashbrown::HashMap;
use std::collections::VecDeque;
use tideline_holster_core::GrabEvent;
use tideline_session::SessionFrame;

/// Fixed timestep configuration (seconds per tick).
#[derive(Resource)]
pub struct FixedDt(pub f32);

impl Default for FixedDt {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}

/// Grab transitions waiting for their holster's next tick. A holster consumes
/// one per tick, so a grab and release in the same frame are both seen.
#[derive(Resource, Default)]
pub struct GrabQueue {
    pub by_holster: HashMap<String, VecDeque<GrabEvent>>,
}

impl GrabQueue {
    pub fn push(&mut self, id: &str, event: GrabEvent) {
        self.by_holster
            .entry(id.to_string())
            .or_default()
            .push_back(event);
    }

    pub fn pop(&mut self, id: &str) -> Option<GrabEvent> {
        self.by_holster.get_mut(id).and_then(|q| q.pop_front())
    }

    /// Drop everything queued for a holster that cannot be ticked.
    pub fn discard(&mut self, id: &str) {
        self.by_holster.remove(id);
    }

    pub fn pending(&self, id: &str) -> usize {
        self.by_holster.get(id).map_or(0, |q| q.len())
    }
}

/// Frame staged by the step system and consumed by the apply system
/// (keeps ordering explicit: Step -> Apply).
#[derive(Resource, Default)]
pub struct PendingFrame(pub Option<SessionFrame>);
