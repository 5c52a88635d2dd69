//! Tunable engine configuration.
//!
//! Every field has a default taken from `core::constants`, so a JSON config
//! only needs to name the values it overrides.

use super::constants::*;
use super::error::{ConfigError, FishingError};
use crate::fish::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive-exclusive range of seconds, stored as `[min, max]` in JSON.
pub type SecondsRange = (f64, f64);

/// Pull-engine resistance constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistanceConfig {
    /// Divisor weight: `adjusted = base / (1 + resistance * slowdown_factor)`.
    pub slowdown_factor: f64,
    /// Chance per tick that the fish resists, per unit of resistance.
    pub resist_chance_factor: f64,
    /// Pull progress kept during a resisting tick.
    pub resist_pull_multiplier: f64,
    /// Chance that a resisting fish drags the line back out.
    pub pull_back_chance: f64,
    /// Fraction of the adjusted pull lost to a pull-back.
    pub pull_back_multiplier: f64,
}

impl Default for ResistanceConfig {
    fn default() -> Self {
        Self {
            slowdown_factor: RESISTANCE_SLOWDOWN_FACTOR,
            resist_chance_factor: RESIST_CHANCE_FACTOR,
            resist_pull_multiplier: RESIST_PULL_MULTIPLIER,
            pull_back_chance: PULL_BACK_CHANCE,
            pull_back_multiplier: PULL_BACK_MULTIPLIER,
        }
    }
}

/// Spawn delay tiers keyed by how the previous encounter ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnDelays {
    pub default: SecondsRange,
    pub after_failure: SecondsRange,
    pub after_missed_bite: SecondsRange,
    pub after_premature_hook: SecondsRange,
}

impl Default for SpawnDelays {
    fn default() -> Self {
        Self {
            default: SPAWN_DELAY_DEFAULT,
            after_failure: SPAWN_DELAY_AFTER_FAILURE,
            after_missed_bite: SPAWN_DELAY_AFTER_MISSED_BITE,
            after_premature_hook: SPAWN_DELAY_AFTER_PREMATURE_HOOK,
        }
    }
}

/// Relative spawn weight of one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesWeight {
    pub species: Species,
    pub weight: f64,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingConfig {
    /// Distance units reeled per second at zero resistance.
    pub pull_speed: f64,
    /// Starting distance between the hooked fish and the shore.
    pub cast_distance: f64,
    /// Distance at or below which the fish is landed.
    pub catch_epsilon: f64,
    /// Seconds without pull input before a hooked fish is lost.
    pub idle_timeout: f64,
    /// Pause between a finished encounter and the return to Waiting.
    pub completion_cooldown: f64,
    /// Upper bound on a single tick's delta time.
    pub max_tick: f64,
    pub resistance: ResistanceConfig,
    pub spawn_delays: SpawnDelays,
    pub species_weights: Vec<SpeciesWeight>,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            pull_speed: DEFAULT_PULL_SPEED,
            cast_distance: DEFAULT_CAST_DISTANCE,
            catch_epsilon: CATCH_DISTANCE_EPSILON,
            idle_timeout: IDLE_PULL_TIMEOUT_SECONDS,
            completion_cooldown: COMPLETION_COOLDOWN_SECONDS,
            max_tick: MAX_TICK_SECONDS,
            resistance: ResistanceConfig::default(),
            spawn_delays: SpawnDelays::default(),
            species_weights: vec![
                SpeciesWeight {
                    species: Species::Carp,
                    weight: CARP_SPAWN_WEIGHT,
                },
                SpeciesWeight {
                    species: Species::Perch,
                    weight: PERCH_SPAWN_WEIGHT,
                },
            ],
        }
    }
}

impl FishingConfig {
    /// Parses a JSON config and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: FishingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that every tunable is usable by the engine.
    pub fn validate(&self) -> Result<(), FishingError> {
        let positive = [
            ("pull_speed", self.pull_speed),
            ("cast_distance", self.cast_distance),
            ("idle_timeout", self.idle_timeout),
            ("max_tick", self.max_tick),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(FishingError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.catch_epsilon < 0.0 || self.catch_epsilon >= self.cast_distance {
            return Err(FishingError::InvalidConfig(format!(
                "catch_epsilon must be in [0, cast_distance), got {}",
                self.catch_epsilon
            )));
        }
        if self.completion_cooldown < 0.0 {
            return Err(FishingError::InvalidConfig(
                "completion_cooldown must not be negative".to_string(),
            ));
        }

        let tiers = [
            ("default", self.spawn_delays.default),
            ("after_failure", self.spawn_delays.after_failure),
            ("after_missed_bite", self.spawn_delays.after_missed_bite),
            ("after_premature_hook", self.spawn_delays.after_premature_hook),
        ];
        for (name, (min, max)) in tiers {
            if min < 0.0 || max < min {
                return Err(FishingError::InvalidConfig(format!(
                    "spawn delay {name} must satisfy 0 <= min <= max, got [{min}, {max}]"
                )));
            }
        }

        if self.species_weights.is_empty() {
            return Err(FishingError::InvalidConfig(
                "species_weights must not be empty".to_string(),
            ));
        }
        if self.species_weights.iter().any(|w| w.weight < 0.0)
            || self.species_weights.iter().all(|w| w.weight <= 0.0)
        {
            return Err(FishingError::InvalidConfig(
                "species weights must be non-negative with a positive total".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FishingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FishingConfig::from_json_str(r#"{ "pull_speed": 35.0 }"#).unwrap();
        assert!((config.pull_speed - 35.0).abs() < f64::EPSILON);
        assert!((config.cast_distance - DEFAULT_CAST_DISTANCE).abs() < f64::EPSILON);
        assert_eq!(config.species_weights.len(), 2);
    }

    #[test]
    fn test_spawn_tier_parsed_from_array() {
        let config =
            FishingConfig::from_json_str(r#"{ "spawn_delays": { "default": [1.0, 2.0] } }"#)
                .unwrap();
        assert_eq!(config.spawn_delays.default, (1.0, 2.0));
        assert_eq!(
            config.spawn_delays.after_failure,
            SPAWN_DELAY_AFTER_FAILURE
        );
    }

    #[test]
    fn test_species_weights_parsed() {
        let config = FishingConfig::from_json_str(
            r#"{ "species_weights": [ { "species": "Perch", "weight": 1.0 } ] }"#,
        )
        .unwrap();
        assert_eq!(config.species_weights.len(), 1);
        assert_eq!(config.species_weights[0].species, Species::Perch);
    }

    #[test]
    fn test_rejects_inverted_spawn_range() {
        let mut config = FishingConfig::default();
        config.spawn_delays.after_failure = (10.0, 5.0);
        assert!(matches!(
            config.validate(),
            Err(FishingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_pull_speed() {
        let mut config = FishingConfig::default();
        config.pull_speed = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let mut config = FishingConfig::default();
        for w in &mut config.species_weights {
            w.weight = 0.0;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = FishingConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected_on_parse() {
        let err = FishingConfig::from_json_str(r#"{ "cast_distance": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
