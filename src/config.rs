//! Tunable game parameters, loaded from TOML.
//!
//! Every section carries `#[serde(default)]` so a file only needs the keys it
//! changes. `validate` is always run after parsing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Playfield;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 480.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketConfig {
    pub width: f32,
    pub height: f32,
    /// Distance of the bucket's bottom edge from the playfield floor.
    pub baseline: f32,
    /// Horizontal speed under the directional keys, units per second.
    pub key_speed: f32,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self { width: 64.0, height: 64.0, baseline: 20.0, key_speed: 200.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    pub width: f32,
    pub height: f32,
    /// Fall speed at the start of every run.
    pub base_speed: f32,
    /// Added to the fall speed on every catch.
    pub speed_step: f32,
    pub spawn_interval_ms: u64,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            base_speed: 200.0,
            speed_step: 10.0,
            spawn_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_lives: u32,
    pub playfield: PlayfieldConfig,
    pub bucket: BucketConfig,
    pub drops: DropConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            playfield: PlayfieldConfig::default(),
            bucket: BucketConfig::default(),
            drops: DropConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield.width", self.playfield.width),
            ("playfield.height", self.playfield.height),
            ("bucket.width", self.bucket.width),
            ("bucket.height", self.bucket.height),
            ("bucket.key_speed", self.bucket.key_speed),
            ("drops.width", self.drops.width),
            ("drops.height", self.drops.height),
            ("drops.base_speed", self.drops.base_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !self.bucket.baseline.is_finite() || self.bucket.baseline < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bucket.baseline must be >= 0, got {}",
                self.bucket.baseline
            )));
        }
        if !self.drops.speed_step.is_finite() || self.drops.speed_step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "drops.speed_step must be >= 0, got {}",
                self.drops.speed_step
            )));
        }
        if self.bucket.width > self.playfield.width {
            return Err(ConfigError::Invalid(
                "bucket.width exceeds playfield.width".to_string(),
            ));
        }
        if self.drops.width > self.playfield.width {
            return Err(ConfigError::Invalid(
                "drops.width exceeds playfield.width".to_string(),
            ));
        }
        if self.drops.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "drops.spawn_interval_ms must be > 0".to_string(),
            ));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid(
                "starting_lives must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn playfield(&self) -> Playfield {
        Playfield { width: self.playfield.width, height: self.playfield.height }
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.drops.spawn_interval_ms)
    }
}
