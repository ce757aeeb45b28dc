//! tideline-session
//!
//! A session owns everything that runs once per tick for one scene: the
//! blend bindings and their timeline tracks, steering overrides, holsters,
//! the scoped event registry, and narrative task conditions. Hosts register
//! content up front, feed [`SessionInputs`] every tick through
//! [`Session::step`], and apply the returned [`SessionFrame`].

pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod tasks;

use std::collections::VecDeque;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use tideline_holster_core::{Holster, HolsterConfig, HolsterInput, HolsterOutput};
use tideline_mixer_core::{
    BlendStrategy, BlinkConfig, BlinkController, ClipTrack, TargetArray, WheelOverride,
    WheelTrack,
};

pub use crate::config::{BlinkSpec, HolsterSpec, SessionConfig, TrackSpec, WheelTrackSpec};
pub use crate::error::SessionError;
pub use crate::events::{EventCallback, EventRegistry, SubscriptionId};
pub use crate::tasks::{TaskSpec, TaskTracker};

/// Name published when a narrative task completes.
pub const TASK_COMPLETED: &str = "task.completed";

/// Host-provided state for one tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionInputs {
    /// Holster inputs keyed by holster id. Holsters without an entry are not ticked.
    #[serde(default)]
    pub holsters: HashMap<String, HolsterInput>,
}

impl SessionInputs {
    pub fn with_holster(mut self, id: &str, input: HolsterInput) -> Self {
        self.holsters.insert(id.to_string(), input);
        self
    }
}

/// Everything the host applies after a tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionFrame {
    pub epoch: u64,
    /// Timeline time the bindings were evaluated at.
    pub time: f32,
    pub dt: f32,
    /// Mixed target arrays per binding, in registration order.
    pub targets: IndexMap<String, TargetArray>,
    pub wheels: IndexMap<String, WheelOverride>,
    pub holsters: IndexMap<String, HolsterOutput>,
    /// `{ "event": name, "payload": ... }` records published since the last frame.
    pub events: Vec<JsonValue>,
    pub completed_tasks: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct BindingState {
    pub target_count: usize,
    pub strategy: BlendStrategy,
    pub tracks: Vec<ClipTrack>,
    pub blinks: Vec<BlinkController>,
}

#[derive(Debug, Default)]
pub struct Session {
    pub(crate) epoch: u64,
    pub(crate) time: f32,
    pub(crate) bindings: IndexMap<String, BindingState>,
    pub(crate) wheels: IndexMap<String, Vec<WheelTrack>>,
    pub(crate) holsters: IndexMap<String, Holster>,
    pub(crate) registry: EventRegistry,
    pub(crate) tasks: TaskTracker,
    pub(crate) pending_events: Vec<JsonValue>,
    pub(crate) pending_tasks: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a declarative config, validating every entry.
    pub fn from_config(cfg: SessionConfig) -> Result<Self, SessionError> {
        let mut session = Self::new();
        for spec in cfg.tracks {
            session.add_track(&spec.binding, spec.target_count, spec.strategy, spec.track)?;
        }
        for spec in cfg.wheels {
            session.add_wheel_track(&spec.binding, spec.track)?;
        }
        for spec in cfg.blinks {
            session.add_blink(&spec.binding, spec.config)?;
        }
        for spec in cfg.holsters {
            session.add_holster(&spec.id, spec.config)?;
        }
        for spec in cfg.tasks {
            session.add_task(spec)?;
        }
        Ok(session)
    }

    /// Convenience for hosts loading scene content from JSON.
    pub fn from_config_json(json: &str) -> Result<Self> {
        let cfg = SessionConfig::from_json(json).context("parse session config")?;
        Self::from_config(cfg).context("build session from config")
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Attach a clip track to `binding`, declaring the binding on first use.
    pub fn add_track(
        &mut self,
        binding: &str,
        target_count: usize,
        strategy: BlendStrategy,
        track: ClipTrack,
    ) -> Result<(), SessionError> {
        track.validate()?;
        match self.bindings.get_mut(binding) {
            Some(state) => {
                if state.target_count != target_count {
                    return Err(SessionError::TargetCountMismatch {
                        binding: binding.to_string(),
                        expected: state.target_count,
                        found: target_count,
                    });
                }
                if state.strategy != strategy {
                    return Err(SessionError::StrategyMismatch {
                        binding: binding.to_string(),
                        expected: state.strategy,
                        found: strategy,
                    });
                }
                state.tracks.push(track);
            }
            None => {
                self.bindings.insert(
                    binding.to_string(),
                    BindingState {
                        target_count,
                        strategy,
                        tracks: vec![track],
                        blinks: Vec::new(),
                    },
                );
            }
        }
        Ok(())
    }

    pub fn add_wheel_track(
        &mut self,
        binding: &str,
        track: WheelTrack,
    ) -> Result<(), SessionError> {
        track.validate()?;
        self.wheels
            .entry(binding.to_string())
            .or_default()
            .push(track);
        Ok(())
    }

    /// Attach a blink controller to an already declared binding.
    pub fn add_blink(&mut self, binding: &str, cfg: BlinkConfig) -> Result<(), SessionError> {
        let controller = BlinkController::new(cfg)?;
        let state = self
            .bindings
            .get_mut(binding)
            .ok_or_else(|| SessionError::UnknownBinding(binding.to_string()))?;
        state.blinks.push(controller);
        Ok(())
    }

    pub fn add_holster(&mut self, id: &str, cfg: HolsterConfig) -> Result<(), SessionError> {
        if self.holsters.contains_key(id) {
            return Err(SessionError::DuplicateId(id.to_string()));
        }
        let holster = Holster::new(cfg)?;
        self.holsters.insert(id.to_string(), holster);
        Ok(())
    }

    /// Register a narrative task. Events published before the task was added
    /// still count; a task satisfied on arrival completes in the next frame.
    pub fn add_task(&mut self, spec: TaskSpec) -> Result<(), SessionError> {
        let id = spec.id.clone();
        let registry = &self.registry;
        let done = self
            .tasks
            .add(spec, |name| registry.publish_count(name) > 0)?;
        if done {
            debug!("task '{id}' already satisfied when added");
            self.pending_tasks.push(id.clone());
            self.publish(TASK_COMPLETED, json!({ "task": id }));
        }
        Ok(())
    }

    pub fn holster(&self, id: &str) -> Option<&Holster> {
        self.holsters.get(id)
    }

    pub fn task_completed(&self, id: &str) -> Option<bool> {
        self.tasks.is_completed(id)
    }

    pub fn events(&self) -> &EventRegistry {
        &self.registry
    }

    /// Subscribe to a session event.
    pub fn subscribe<F>(&mut self, name: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&str, &JsonValue) + Send + Sync + 'static,
    {
        self.registry.subscribe(name, callback)
    }

    /// Publish a host event. Records are reported in the next frame.
    pub fn publish(&mut self, name: &str, payload: JsonValue) {
        let (records, done) = self.emit(name, payload);
        self.pending_events.extend(records);
        self.pending_tasks.extend(done);
    }

    /// Force every blink controller on `binding` to start a blink next tick.
    pub fn blink(&mut self, binding: &str) -> Result<(), SessionError> {
        let state = self
            .bindings
            .get_mut(binding)
            .filter(|s| !s.blinks.is_empty())
            .ok_or_else(|| SessionError::UnknownBinding(binding.to_string()))?;
        for b in state.blinks.iter_mut() {
            b.blink();
        }
        Ok(())
    }

    /// Scripted snap of a holstered prop back into place.
    pub fn force_dock(&mut self, id: &str) -> Result<HolsterOutput, SessionError> {
        let holster = self
            .holsters
            .get_mut(id)
            .ok_or_else(|| SessionError::UnknownHolster(id.to_string()))?;
        let out = holster.force_dock();
        let id = id.to_string();
        for ev in out.events.clone() {
            self.publish(&format!("holster.{}", ev.name()), json!({ "holster": id }));
        }
        Ok(out)
    }

    /// Advance the session by `dt` seconds.
    pub fn step(&mut self, dt: f32, inputs: &SessionInputs) -> Result<SessionFrame, SessionError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SessionError::InvalidDt(dt));
        }
        Ok(scheduler::run_tick(self, dt, inputs))
    }

    /// Publish `name`, then any task completions it causes. Returns the event
    /// records and the completed task ids.
    pub(crate) fn emit(
        &mut self,
        name: &str,
        payload: JsonValue,
    ) -> (Vec<JsonValue>, Vec<String>) {
        let mut records = Vec::new();
        let mut completed = Vec::new();
        let mut queue = VecDeque::from([(name.to_string(), payload)]);
        while let Some((name, payload)) = queue.pop_front() {
            self.registry.publish(&name, &payload);
            records.push(json!({ "event": name, "payload": payload }));
            for task in self.tasks.observe(&name) {
                debug!("task '{task}' completed by '{name}'");
                queue.push_back((TASK_COMPLETED.to_string(), json!({ "task": task })));
                completed.push(task);
            }
        }
        (records, completed)
    }
}
