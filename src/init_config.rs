// init_config.rs
// Handles loading and parsing the initial scene from a TOML file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::charge::{ChargeSpec, Polarity};
use crate::config::{self, EngineConfig};
use crate::error::{ConfigError, EngineError};
use crate::particle::ParticleLaunch;
use crate::vector::Vector2D;

pub const DEFAULT_PATH: &str = "init_config.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InitConfig {
    /// Overrides for the engine parameters. Missing keys keep their defaults.
    #[serde(default)]
    pub engine: Option<EngineConfig>,
    #[serde(default)]
    pub charges: Vec<ChargeConfig>,
    #[serde(default)]
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub random_charges: Vec<RandomChargesConfig>,
}

/// A charge given either as a signed `value` or as `magnitude` plus `polarity`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChargeConfig {
    pub x: f64,
    pub y: f64,
    pub value: Option<f64>,
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub polarity: Polarity,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ParticleConfig {
    /// Launch position; the canvas centre when either coordinate is omitted.
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default = "default_particle_charge")]
    pub charge: f64,
    #[serde(default = "default_particle_mass")]
    pub mass: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RandomChargesConfig {
    pub count: usize,
    /// Fixed seed for reproducible layouts.
    pub seed: Option<u64>,
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: f64,
    #[serde(default = "default_max_magnitude")]
    pub max_magnitude: f64,
    /// When false every generated charge is positive.
    #[serde(default = "default_true")]
    pub mixed_polarity: bool,
}

fn default_particle_charge() -> f64 {
    config::DEFAULT_PARTICLE_CHARGE
}

fn default_particle_mass() -> f64 {
    config::DEFAULT_PARTICLE_MASS
}

fn default_min_magnitude() -> f64 {
    config::DEFAULT_CHARGE_VALUE * 0.5
}

fn default_max_magnitude() -> f64 {
    config::DEFAULT_CHARGE_VALUE * 2.0
}

fn default_true() -> bool {
    true
}

impl InitConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_file(DEFAULT_PATH)
    }

    /// Engine parameters with the file's overrides applied, already validated.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let cfg = self.engine.clone().unwrap_or_default();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every entry so a scene is applied whole or not at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine_config()?;
        for charge in &self.charges {
            charge.to_spec()?;
        }
        for particle in &self.particles {
            particle.to_launch()?;
        }
        for random in &self.random_charges {
            random.validate()?;
        }
        Ok(())
    }
}

impl std::str::FromStr for InitConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: InitConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl ChargeConfig {
    pub fn to_spec(&self) -> Result<ChargeSpec, ConfigError> {
        let pos = Vector2D::new(self.x, self.y);
        let value = match (self.value, self.magnitude) {
            (Some(value), None) => value,
            (None, Some(magnitude)) => self.polarity.apply(magnitude),
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid(format!(
                    "charge at ({}, {}) sets both value and magnitude",
                    self.x, self.y
                )))
            }
            (None, None) => self.polarity.apply(config::DEFAULT_CHARGE_VALUE),
        };
        Ok(ChargeSpec::new(pos, value)?)
    }
}

impl ParticleConfig {
    pub fn to_launch(&self) -> Result<ParticleLaunch, EngineError> {
        let pos = match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Vector2D::new(x, y)),
            _ => None,
        };
        ParticleLaunch::new(pos, self.charge, self.mass, Vector2D::new(self.vx, self.vy))
    }
}

impl RandomChargesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.min_magnitude.is_finite()
            && self.max_magnitude.is_finite()
            && self.min_magnitude >= 0.0
            && self.min_magnitude <= self.max_magnitude;
        if !ok {
            return Err(ConfigError::Invalid(format!(
                "random charge magnitudes must satisfy 0 <= min <= max, got {}..{}",
                self.min_magnitude, self.max_magnitude
            )));
        }
        Ok(())
    }
}
