//! Periodic eyelid blink driven by a countdown.
//!
//! While waiting, the controller has no opinion about its blend shape. When
//! the countdown reaches zero it plays a close/open envelope on the shape and
//! then rearms. [`BlinkController::blink`] forces the countdown to its edge so
//! scripted sequences can trigger a blink on cue.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::contribution::ClipContribution;
use crate::error::MixerError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Seconds between blinks.
    pub interval: f32,
    pub close_duration: f32,
    pub open_duration: f32,
    /// Blend-shape index of the eyelid shape.
    pub target_index: i32,
    pub intensity: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            interval: 4.0,
            close_duration: 0.06,
            open_duration: 0.12,
            target_index: 0,
            intensity: 1.0,
        }
    }
}

impl BlinkConfig {
    pub fn validate(&self) -> Result<(), MixerError> {
        let positive = [
            ("interval", self.interval),
            ("close_duration", self.close_duration),
            ("open_duration", self.open_duration),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(MixerError::InvalidBlink(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BlinkPhase {
    Waiting,
    Closing { elapsed: f32 },
    Opening { elapsed: f32 },
}

#[derive(Clone, Debug)]
pub struct BlinkController {
    cfg: BlinkConfig,
    countdown: f32,
    phase: BlinkPhase,
}

impl BlinkController {
    pub fn new(cfg: BlinkConfig) -> Result<Self, MixerError> {
        cfg.validate()?;
        Ok(Self {
            countdown: cfg.interval,
            cfg,
            phase: BlinkPhase::Waiting,
        })
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.cfg
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Seconds left before the next blink starts.
    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Force the countdown to its edge; the next tick starts a blink.
    /// Has no effect while a blink is already playing.
    pub fn blink(&mut self) {
        if self.phase == BlinkPhase::Waiting {
            debug!("blink forced with {:.3}s remaining", self.countdown);
            self.countdown = 0.0;
        }
    }

    /// Advance by `dt` seconds. Returns the eyelid contribution while a blink
    /// is playing, `None` while waiting.
    pub fn tick(&mut self, dt: f32) -> Option<ClipContribution> {
        let dt = dt.max(0.0);
        match self.phase {
            BlinkPhase::Waiting => {
                self.countdown -= dt;
                if self.countdown > 0.0 {
                    return None;
                }
                self.phase = BlinkPhase::Closing { elapsed: 0.0 };
                Some(self.contribution(0.0))
            }
            BlinkPhase::Closing { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.cfg.close_duration {
                    self.phase = BlinkPhase::Opening { elapsed: 0.0 };
                    Some(self.contribution(1.0))
                } else {
                    self.phase = BlinkPhase::Closing { elapsed };
                    Some(self.contribution(elapsed / self.cfg.close_duration))
                }
            }
            BlinkPhase::Opening { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.cfg.open_duration {
                    self.phase = BlinkPhase::Waiting;
                    self.countdown = self.cfg.interval;
                    Some(self.contribution(0.0))
                } else {
                    self.phase = BlinkPhase::Opening { elapsed };
                    Some(self.contribution(1.0 - elapsed / self.cfg.open_duration))
                }
            }
        }
    }

    fn contribution(&self, weight: f32) -> ClipContribution {
        ClipContribution::new(self.cfg.target_index, weight, self.cfg.intensity)
    }
}
