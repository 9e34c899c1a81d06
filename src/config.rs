//! Configuration types for alexnet-viz.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Viewer configuration.
///
/// Every field has a default, so a config file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Fixed height of the stage canvas.
    pub canvas_height: f64,
    /// Horizontal padding subtracted from the container width.
    pub container_padding: f64,
    /// Initial width of the containing layout box.
    pub container_width: f64,
    /// Duration of the stage cross-fade.
    pub transition_ms: f64,
    /// Frames each demo step is held for.
    pub frames_per_step: u32,
    /// Delay between frames when the host drives animations itself.
    pub frame_interval_ms: u64,
    /// Sample image shown on the output stage until another is selected.
    pub default_sample: String,
    /// Seed for the decorative filter swatch. `None` draws from entropy.
    pub filter_seed: Option<u64>,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            canvas_height: 500.0,
            container_padding: 64.0,
            container_width: 960.0,
            transition_ms: 500.0,
            frames_per_step: 90,
            frame_interval_ms: 16,
            default_sample: crate::model::DEFAULT_SAMPLE.to_string(),
            filter_seed: None,
        }
    }
}

impl VizConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no surface can be sized or animated with.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_height <= 0.0 {
            return Err(Error::Config("canvas_height must be positive".into()));
        }
        if self.transition_ms <= 0.0 {
            return Err(Error::Config("transition_ms must be positive".into()));
        }
        if self.frames_per_step == 0 {
            return Err(Error::Config("frames_per_step must be at least 1".into()));
        }
        Ok(())
    }

    /// Set the container width.
    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    /// Set the default sample key.
    pub fn with_default_sample(mut self, sample: &str) -> Self {
        self.default_sample = sample.to_string();
        self
    }

    /// Seed the decorative filter swatch.
    pub fn with_filter_seed(mut self, seed: u64) -> Self {
        self.filter_seed = Some(seed);
        self
    }

    /// Canvas width derived from the container width.
    pub fn canvas_width(&self) -> f64 {
        (self.container_width - self.container_padding).max(0.0)
    }
}
