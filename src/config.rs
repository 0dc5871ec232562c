// Configuration module for reading Gamer.toml
// This module provides the tunable parameters of the player

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub timing: TimingConfig,
    pub search: SearchConfig,
    pub debug: DebugConfig,
}

/// Timing constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Time reserved before the host's timeout for sending the move
    pub safety_margin_ms: u64,
}

impl TimingConfig {
    pub fn safety_margin(&self) -> Duration {
        Duration::from_millis(self.safety_margin_ms)
    }
}

/// Search constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of Maximize/Minimize steps below the root; omit for unbounded
    #[serde(default)]
    pub depth_limit: Option<u32>,
    #[serde(default)]
    pub heuristic: Heuristic,
    /// Stop enumerating root moves once one scores 100
    #[serde(default = "default_true")]
    pub stop_on_perfect_score: bool,
}

impl SearchConfig {
    /// True if a node at `depth` must be scored by the heuristic
    pub fn is_depth_cutoff(&self, depth: u32) -> bool {
        self.depth_limit.map_or(false, |limit| depth >= limit)
    }
}

fn default_true() -> bool {
    true
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Gamer.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("read config file {}", path.as_ref().display()),
            source,
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }

    /// Loads default configuration from Gamer.toml in the project root
    pub fn load_default() -> Result<Self> {
        Self::from_file("Gamer.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Gamer.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                safety_margin_ms: 1000,
            },
            search: SearchConfig {
                depth_limit: Some(6),
                heuristic: Heuristic::GoalProximity,
                stop_on_perfect_score: true,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "gamer_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Gamer.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
