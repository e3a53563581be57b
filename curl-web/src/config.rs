//! Session configuration
//!
//! Thresholds are not configurable; only input handling and feedback
//! delivery are.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counter::KeypointLayout;
use crate::error::{CurlError, CurlResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Keypoint ordering of the pose estimator
    pub layout: KeypointLayout,
    /// Keypoints below this confidence count as missing
    pub min_confidence: f32,
    /// Undelivered feedback events kept before new ones are dropped
    pub feedback_capacity: usize,
    /// Spoken once when the session starts
    pub greeting: String,
    /// Speech rate hint for the sink (words per minute)
    pub speech_rate: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            layout: KeypointLayout::Coco17,
            min_confidence: 0.5,
            feedback_capacity: 8,
            greeting: "Let's count your bicep curls and check your form.".to_string(),
            speech_rate: 150,
        }
    }
}

impl CounterConfig {
    pub fn load(path: impl AsRef<Path>) -> CurlResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CurlResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml(content: &str) -> CurlResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> CurlResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CurlResult<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CurlError::Configuration {
                message: format!("min_confidence must be within 0..=1, got {}", self.min_confidence),
            });
        }
        Ok(())
    }
}
