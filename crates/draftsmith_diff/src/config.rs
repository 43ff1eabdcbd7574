//! Animation timing.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays between frames.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct AnimationConfig {
    /// Per-character delay in fallback mode (milliseconds)
    #[serde(default = "default_step_delay_ms")]
    #[builder(default = "default_step_delay_ms()")]
    step_delay_ms: u64,
    /// Per-segment delay in structured mode (milliseconds)
    #[serde(default = "default_segment_delay_ms")]
    #[builder(default = "default_segment_delay_ms()")]
    segment_delay_ms: u64,
}

fn default_step_delay_ms() -> u64 {
    20
}

fn default_segment_delay_ms() -> u64 {
    150
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            segment_delay_ms: default_segment_delay_ms(),
        }
    }
}

impl AnimationConfig {
    /// Zero delays, for tests and non-interactive output.
    pub fn instant() -> Self {
        Self {
            step_delay_ms: 0,
            segment_delay_ms: 0,
        }
    }

    pub(crate) fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub(crate) fn segment_delay(&self) -> Duration {
        Duration::from_millis(self.segment_delay_ms)
    }
}
