//! Tuning for a simulation run.
//!
//! Every field has a default taken from `blaster_core::constants`, so a
//! config file only needs to name what it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use blaster_core::constants::*;
use blaster_core::errors::ConfigError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for target placement. Same seed = same layout.
    pub seed: u64,
    pub projectile_lifetime_ms: u64,
    /// Per-tick displacement of a projectile.
    pub projectile_speed: f64,
    pub hit_radius: f64,
    /// Per-tick yaw while turning (radians).
    pub turn_step: f64,
    /// Per-tick distance while moving or strafing.
    pub move_step: f64,
    pub muzzle_height: f64,
    pub muzzle_forward_offset: f64,
    pub target_bounds: TargetBounds,
    /// Random targets added by the opening scene and by each restart.
    pub random_target_batch: u32,
    /// Stop checking targets for a projectile once it has hit one this tick.
    /// Off by default: overlapping targets can all fall to a single dart.
    pub single_hit_per_projectile: bool,
    /// Remove knocked-down targets and release their visuals instead of
    /// keeping them around hidden.
    pub evict_hidden_targets: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,
            projectile_speed: PROJECTILE_SPEED,
            hit_radius: HIT_RADIUS,
            turn_step: TURN_STEP,
            move_step: MOVE_STEP,
            muzzle_height: MUZZLE_HEIGHT,
            muzzle_forward_offset: MUZZLE_FORWARD_OFFSET,
            target_bounds: TargetBounds::default(),
            random_target_batch: RANDOM_TARGET_BATCH,
            single_hit_per_projectile: false,
            evict_hidden_targets: false,
        }
    }
}

/// Box random targets are dropped into. x and z are drawn uniformly,
/// y is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    pub height: f64,
}

impl Default for TargetBounds {
    fn default() -> Self {
        Self {
            min_x: TARGET_MIN_X,
            max_x: TARGET_MAX_X,
            min_z: TARGET_MIN_Z,
            max_z: TARGET_MAX_Z,
            height: TARGET_HEIGHT,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projectile_lifetime_ms == 0 {
            return Err(invalid("projectile_lifetime_ms must be greater than zero"));
        }
        if !(self.hit_radius.is_finite() && self.hit_radius > 0.0) {
            return Err(invalid("hit_radius must be a positive number"));
        }
        for (name, value) in [
            ("projectile_speed", self.projectile_speed),
            ("turn_step", self.turn_step),
            ("move_step", self.move_step),
            ("muzzle_height", self.muzzle_height),
            ("muzzle_forward_offset", self.muzzle_forward_offset),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
        }
        let b = &self.target_bounds;
        if !(b.min_x.is_finite() && b.max_x.is_finite() && b.min_x < b.max_x) {
            return Err(invalid("target_bounds: min_x must be below max_x"));
        }
        if !(b.min_z.is_finite() && b.max_z.is_finite() && b.min_z < b.max_z) {
            return Err(invalid("target_bounds: min_z must be below max_z"));
        }
        if !b.height.is_finite() {
            return Err(invalid("target_bounds: height must be finite"));
        }
        Ok(())
    }

    pub fn projectile_lifetime(&self) -> Duration {
        Duration::from_millis(self.projectile_lifetime_ms)
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.projectile_lifetime(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = SimConfig::from_json_str(
            r#"{"seed": 7, "evict_hidden_targets": true, "target_bounds": {"max_x": 2.0}}"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert!(config.evict_hidden_targets);
        assert_eq!(config.target_bounds.max_x, 2.0);
        assert_eq!(config.target_bounds.min_x, TARGET_MIN_X);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = SimConfig::from_json_str(r#"{"target_bounds": {"min_z": -5.0, "max_z": -10.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_hit_radius() {
        let config = SimConfig {
            hit_radius: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = SimConfig::from_file("/nonexistent/blaster.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/blaster.json"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimConfig::from_json_str("{seed: nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
