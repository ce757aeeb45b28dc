//! Timeline clips and the crossfade weights they produce over time.
//!
//! A track reports every one of its clips each tick, including clips that are
//! not playing (weight `0`). This matches how a timeline mixer sees its inputs:
//! a target referenced anywhere on the track is claimed for as long as the
//! track is evaluated, so a silent clip resolves to an authoritative zero
//! rather than leaving the host value alone.

use serde::{Deserialize, Serialize};

use crate::contribution::ClipContribution;
use crate::error::MixerError;
use crate::targets::WheelOverride;

/// Placement of a clip on the timeline with linear ease-in/ease-out.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub start: f32,
    pub duration: f32,
    #[serde(default)]
    pub ease_in: f32,
    #[serde(default)]
    pub ease_out: f32,
}

impl ClipWindow {
    pub fn new(start: f32, duration: f32) -> Self {
        Self {
            start,
            duration,
            ease_in: 0.0,
            ease_out: 0.0,
        }
    }

    pub fn with_ease(mut self, ease_in: f32, ease_out: f32) -> Self {
        self.ease_in = ease_in;
        self.ease_out = ease_out;
        self
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Crossfade weight at `time`, in `[0, 1]`; zero outside `[start, end)`.
    pub fn weight_at(&self, time: f32) -> f32 {
        if time < self.start || time >= self.end() {
            return 0.0;
        }
        let local = time - self.start;
        let mut w: f32 = 1.0;
        if self.ease_in > 0.0 {
            w = w.min(local / self.ease_in);
        }
        if self.ease_out > 0.0 {
            w = w.min((self.duration - local) / self.ease_out);
        }
        w.clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> Result<(), MixerError> {
        if !self.start.is_finite() {
            return Err(MixerError::InvalidClip {
                field: "start",
                value: self.start,
            });
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(MixerError::InvalidClip {
                field: "duration",
                value: self.duration,
            });
        }
        for (field, value) in [("ease_in", self.ease_in), ("ease_out", self.ease_out)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MixerError::InvalidClip { field, value });
            }
        }
        Ok(())
    }
}

/// A clip driving one blend-shape or rig slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineClip {
    #[serde(flatten)]
    pub window: ClipWindow,
    pub target_index: i32,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    1.0
}

impl TimelineClip {
    pub fn new(window: ClipWindow, target_index: i32, intensity: f32) -> Self {
        Self {
            window,
            target_index,
            intensity,
        }
    }

    pub fn contribution_at(&self, time: f32) -> ClipContribution {
        ClipContribution::new(self.target_index, self.window.weight_at(time), self.intensity)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipTrack {
    pub clips: Vec<TimelineClip>,
}

impl ClipTrack {
    pub fn new(clips: Vec<TimelineClip>) -> Self {
        Self { clips }
    }

    /// One contribution per clip, in clip order.
    pub fn contributions_at(&self, time: f32) -> Vec<ClipContribution> {
        self.clips.iter().map(|c| c.contribution_at(time)).collect()
    }

    pub fn duration(&self) -> f32 {
        self.clips
            .iter()
            .map(|c| c.window.end())
            .fold(0.0, f32::max)
    }

    pub fn validate(&self) -> Result<(), MixerError> {
        self.clips.iter().try_for_each(|c| c.window.validate())
    }
}

/// A clip that takes over the steering wheel.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelClip {
    #[serde(flatten)]
    pub window: ClipWindow,
    #[serde(default = "default_active")]
    pub active: bool,
    pub value: f32,
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelTrack {
    pub clips: Vec<WheelClip>,
}

impl WheelTrack {
    pub fn new(clips: Vec<WheelClip>) -> Self {
        Self { clips }
    }

    /// `(weight, override)` per clip, in clip order.
    pub fn overrides_at(&self, time: f32) -> Vec<(f32, WheelOverride)> {
        self.clips
            .iter()
            .map(|c| {
                (
                    c.window.weight_at(time),
                    WheelOverride::new(c.active, c.value),
                )
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), MixerError> {
        self.clips.iter().try_for_each(|c| c.window.validate())
    }
}
