//! Emitter configuration.
//!
//! Settings come either from the CLI (see [`crate::args::EmitterArgs`]) or
//! from a YAML file. Keys missing from the file take the built-in defaults:
//!
//! ```yaml
//! streams: [main-stream, other-stream, group-stream]
//! iterations: 50
//! interval_secs: 0.2
//! malformed_probability: 0.05
//! seed: 42
//! max_len: 100000
//! approx_trim: true
//! stream_ttl_ms: 5000
//! ```

use crate::args::EmitterArgs;
use crate::error::EmitError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_STREAMS: [&str; 3] = ["main-stream", "other-stream", "group-stream"];
pub const DEFAULT_ITERATIONS: u64 = 50;
pub const DEFAULT_INTERVAL_SECS: f64 = 0.2;
pub const DEFAULT_MALFORMED_PROBABILITY: f64 = 0.05;

/// Stream length cap applied on every append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamTrim {
    pub max_len: u64,
    /// `MAXLEN ~` instead of an exact cap
    pub approximate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub streams: Vec<String>,
    pub iterations: u64,
    pub interval_secs: f64,
    pub malformed_probability: f64,
    pub seed: Option<u64>,
    pub max_len: Option<u64>,
    pub approx_trim: bool,
    pub stream_ttl_ms: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            streams: DEFAULT_STREAMS.iter().map(|s| s.to_string()).collect(),
            iterations: DEFAULT_ITERATIONS,
            interval_secs: DEFAULT_INTERVAL_SECS,
            malformed_probability: DEFAULT_MALFORMED_PROBABILITY,
            seed: None,
            max_len: None,
            approx_trim: false,
            stream_ttl_ms: None,
        }
    }
}

impl From<&EmitterArgs> for EmitterConfig {
    fn from(args: &EmitterArgs) -> Self {
        Self {
            streams: args.streams.clone(),
            iterations: args.iterations,
            interval_secs: args.interval_secs,
            malformed_probability: args.malformed_probability,
            seed: args.seed,
            max_len: args.max_len,
            approx_trim: args.approx_trim,
            stream_ttl_ms: args.stream_ttl_ms,
        }
    }
}

impl EmitterConfig {
    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EmitError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, EmitError> {
        let config: EmitterConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Check the settings before anything connects to the broker.
    pub fn validate(&self) -> Result<(), EmitError> {
        if self.streams.is_empty() {
            return Err(EmitError::Config(
                "at least one stream name is required".to_string(),
            ));
        }
        if let Some(position) = self.streams.iter().position(|s| s.trim().is_empty()) {
            return Err(EmitError::Config(format!(
                "stream name at position {position} is blank"
            )));
        }
        if !(0.0..=1.0).contains(&self.malformed_probability) {
            return Err(EmitError::Config(format!(
                "malformed_probability must be within [0, 1], got {}",
                self.malformed_probability
            )));
        }
        self.interval()?;
        if self.max_len == Some(0) {
            return Err(EmitError::Config("max_len must be positive".to_string()));
        }
        if self.stream_ttl_ms == Some(0) {
            return Err(EmitError::Config(
                "stream_ttl_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Pause between two appends.
    pub fn interval(&self) -> Result<Duration, EmitError> {
        Duration::try_from_secs_f64(self.interval_secs).map_err(|_| {
            EmitError::Config(format!(
                "interval_secs must be a finite, non-negative number, got {}",
                self.interval_secs
            ))
        })
    }

    pub fn trim(&self) -> Option<StreamTrim> {
        self.max_len.map(|max_len| StreamTrim {
            max_len,
            approximate: self.approx_trim,
        })
    }

    pub fn stream_ttl(&self) -> Option<Duration> {
        self.stream_ttl_ms.map(Duration::from_millis)
    }
}
