//! Holster attachment state machine.
//!
//! States: `Holstered`, `Free` (held or loose), plus the `ForceReturning`
//! flag and a `Frozen` sub-state while the freeze counter runs. A grab always
//! wins: it frees the joint and cancels any return or freeze in progress.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::HolsterConfig;
use crate::error::HolsterError;
use crate::io::{GrabEvent, HolsterEvent, HolsterInput, HolsterOutput, HolsterSample};
use crate::joint::JointConstraints;

/// Highest grab count that can happen with two hands.
const MAX_GRABS: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolsterPhase {
    Holstered,
    Free,
    ForceReturning,
    Frozen,
}

#[derive(Clone, Debug)]
pub struct Holster {
    cfg: HolsterConfig,
    is_holstered: bool,
    grab_count: u32,
    force_return: bool,
    freeze_counter: u32,
    kinematic: bool,
    joints: JointConstraints,
    /// Last rest-relative position recorded while docked.
    rest_offset: [f32; 3],
}

impl Holster {
    /// A holster with its prop docked, as at scene load.
    pub fn new(cfg: HolsterConfig) -> Result<Self, HolsterError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            is_holstered: true,
            grab_count: 0,
            force_return: false,
            freeze_counter: 0,
            kinematic: false,
            joints: JointConstraints::LOCKED,
            rest_offset: [0.0; 3],
        })
    }

    pub fn config(&self) -> &HolsterConfig {
        &self.cfg
    }

    pub fn phase(&self) -> HolsterPhase {
        if self.is_holstered {
            HolsterPhase::Holstered
        } else if self.freeze_counter > 0 {
            HolsterPhase::Frozen
        } else if self.force_return {
            HolsterPhase::ForceReturning
        } else {
            HolsterPhase::Free
        }
    }

    pub fn is_holstered(&self) -> bool {
        self.is_holstered
    }

    pub fn grab_count(&self) -> u32 {
        self.grab_count
    }

    pub fn is_force_returning(&self) -> bool {
        self.force_return
    }

    pub fn freeze_counter(&self) -> u32 {
        self.freeze_counter
    }

    pub fn joints(&self) -> JointConstraints {
        self.joints
    }

    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    /// Build a sample from a rest-relative offset using this holster's range.
    pub fn sample(&self, offset: [f32; 3]) -> HolsterSample {
        HolsterSample::from_offset(offset, self.cfg.range)
    }

    /// Advance one physics tick.
    pub fn tick(&mut self, input: &HolsterInput) -> HolsterOutput {
        let sample = &input.sample;
        let mut events = Vec::new();
        let mut reposition = None;

        // Recorded before the event: a grab on a docked prop keeps its rest pose.
        if self.is_holstered {
            self.rest_offset = sample.offset;
        }

        match input.event {
            Some(GrabEvent::Grab) => self.on_grab(&mut events),
            Some(GrabEvent::Release) => self.on_release(sample, &mut events),
            None => {}
        }

        // A held prop is left alone wherever the hand takes it, range included.
        if self.is_holstered {
            self.rest_offset = sample.offset;
        } else if self.grab_count == 0 {
            if self.freeze_counter > 0 {
                self.freeze_counter -= 1;
                self.joints = JointConstraints::LOCKED;
                if self.freeze_counter == 0 {
                    self.kinematic = false;
                    debug!("holster freeze released, guiding prop back");
                    events.push(HolsterEvent::FreezeReleased);
                } else {
                    self.kinematic = true;
                    reposition = Some(self.rest_offset);
                }
            } else if self.can_dock(sample) {
                self.dock(&mut events);
            } else if self.force_return {
                self.joints = JointConstraints::LOCKED;
            } else if sample.vertical_offset < -self.cfg.drop_height || sample.out_of_range {
                self.start_force_return(sample, &mut events);
                reposition = Some(self.rest_offset);
            }
        }

        HolsterOutput {
            phase: self.phase(),
            joints: self.joints,
            kinematic: self.kinematic,
            reposition,
            events,
        }
    }

    /// Scripted snap into the holster, regardless of current state.
    pub fn force_dock(&mut self) -> HolsterOutput {
        if self.grab_count > 0 {
            warn!(
                "holster force-docked while held by {} hand(s)",
                self.grab_count
            );
            self.grab_count = 0;
        }
        let mut events = Vec::new();
        self.dock(&mut events);
        HolsterOutput {
            phase: self.phase(),
            joints: self.joints,
            kinematic: self.kinematic,
            reposition: Some(self.rest_offset),
            events,
        }
    }

    fn can_dock(&self, sample: &HolsterSample) -> bool {
        sample.distance_from_rest < self.cfg.dock_distance && !sample.out_of_range
    }

    fn on_grab(&mut self, events: &mut Vec<HolsterEvent>) {
        self.grab_count += 1;
        if self.grab_count > MAX_GRABS {
            warn!(
                "holster grab count {} exceeds {MAX_GRABS}; grab bookkeeping is out of sync",
                self.grab_count
            );
        }
        self.is_holstered = false;
        self.force_return = false;
        self.freeze_counter = 0;
        self.kinematic = false;
        self.joints = JointConstraints::FREE;
        events.push(HolsterEvent::Grabbed);
    }

    fn on_release(&mut self, sample: &HolsterSample, events: &mut Vec<HolsterEvent>) {
        if self.grab_count == 0 {
            warn!("holster release without a matching grab");
            return;
        }
        self.grab_count -= 1;
        events.push(HolsterEvent::Released);
        if self.grab_count == 0 && self.can_dock(sample) {
            self.dock(events);
        }
    }

    fn dock(&mut self, events: &mut Vec<HolsterEvent>) {
        debug!("holster docked");
        self.is_holstered = true;
        self.force_return = false;
        self.freeze_counter = 0;
        self.kinematic = false;
        self.joints = JointConstraints::LOCKED;
        events.push(HolsterEvent::Docked);
    }

    fn start_force_return(&mut self, sample: &HolsterSample, events: &mut Vec<HolsterEvent>) {
        debug!(
            "holster force-return: distance {:.3}, height {:.3}, out of range {}",
            sample.distance_from_rest, sample.vertical_offset, sample.out_of_range
        );
        self.force_return = true;
        self.freeze_counter = self.cfg.freeze_frame_count;
        self.kinematic = self.freeze_counter > 0;
        self.joints = JointConstraints::LOCKED;
        events.push(HolsterEvent::ForceReturnStarted);
    }
}
