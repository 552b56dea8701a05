//! Engine configuration with documented rule constants
//!
//! The few numbers the resolution rules leave open are collected here, along
//! with the policy for inputs the rules never define (negative points).

use crate::core::error::{ProficiencyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What to do with a negative point investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePointPolicy {
    /// Fail with `ProficiencyError::InvalidInput`
    #[default]
    Reject,
    /// Treat the investment as zero points
    Clamp,
}

/// Configuration for level resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policy applied to every point investment before it reaches the point curve
    pub negative_points: NegativePointPolicy,

    /// Extra penalty of the generic Ritual Magic default
    ///
    /// A Ritual Magic spell may default from the base skill specialized in its
    /// college at -(prerequisites), or from the unspecialized base skill at
    /// -(this + prerequisites). The rules fix this at 6.
    pub generic_default_penalty: i32,

    /// Cap of a Ritual Magic spell relative to the skill it defaults from
    ///
    /// At 0 a spell can never exceed its base skill, no matter how many
    /// points are spent on it.
    pub ritual_level_limit: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            negative_points: NegativePointPolicy::Reject,
            generic_default_penalty: 6,
            ritual_level_limit: 0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.generic_default_penalty < 0 {
            return Err(ProficiencyError::InvalidConfig(format!(
                "generic_default_penalty ({}) must not be negative",
                self.generic_default_penalty
            )));
        }

        // A positive limit would let a spell outgrow the skill it is learned from
        if self.ritual_level_limit > 0 {
            return Err(ProficiencyError::InvalidConfig(format!(
                "ritual_level_limit ({}) must be <= 0",
                self.ritual_level_limit
            )));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}
