// Centralized configuration for engine parameters

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ====================
// Canvas
// ====================
pub const CANVAS_WIDTH: f64 = 800.0; // Default canvas width in world units
pub const CANVAS_HEIGHT: f64 = 600.0; // Default canvas height in world units

// ====================
// Electrostatics
// ====================
/// Coulomb's constant (N·m²/C²).
pub const COULOMB_CONSTANT: f64 = 8.99e9;
/// Lower bound on squared distance used for every field and force evaluation.
pub const MIN_DISTANCE_SQ: f64 = 1.0;

// ====================
// Field Lines
// ====================
pub const FIELD_LINE_COUNT: usize = 8; // Lines seeded around each charge
pub const FIELD_LINE_LENGTH: usize = 100; // Max steps per line
pub const FIELD_LINE_STEP_SIZE: f64 = 5.0; // Distance advanced per step
/// Radius around a charge at which its field lines start.
pub const FIELD_LINE_SEED_RADIUS: f64 = 15.0;
/// A line stops once it comes this close to any charge.
pub const FIELD_LINE_STOP_DISTANCE: f64 = 10.0;
/// Fields weaker than this are not followed.
pub const MIN_TRACEABLE_FIELD: f64 = 1e-10;

// ====================
// Field Vector Grid
// ====================
pub const FIELD_GRID_SPACING: f64 = 40.0;
pub const FIELD_GRID_EXCLUSION_RADIUS: f64 = 20.0; // Skip samples this close to a charge

// ====================
// Particle Motion
// ====================
/// Default integration time step in seconds. Also the tick period of the engine loop.
pub const TIME_STEP: f64 = 0.01;
/// Velocity factor applied on a wall bounce (sign flip plus 20% loss).
pub const REFLECTION_COEFFICIENT: f64 = -0.8;

// ====================
// Input Defaults
// ====================
pub const CHARGE_PICK_RADIUS: f64 = 12.0; // Drawn radius of a charge, used for picking
pub const DEFAULT_CHARGE_VALUE: f64 = 1.0e-9;
pub const DEFAULT_PARTICLE_CHARGE: f64 = 1.0e-10;
pub const DEFAULT_PARTICLE_MASS: f64 = 1.0e-15;

// ====================
// Threading
// ====================
pub const MIN_THREADS: usize = 3; // Rayon pool floor
pub const THREADS_LEAVE_FREE: usize = 2; // Cores left for the rest of the system

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: f64,
    pub height: f64,
    pub coulomb_constant: f64,
    pub min_distance_sq: f64,
    pub field_line_count: usize,
    /// Max steps per traced field line
    pub field_line_length: usize,
    pub field_line_step_size: f64,
    pub field_line_seed_radius: f64,
    pub field_line_stop_distance: f64,
    pub min_traceable_field: f64,
    pub time_step: f64,
    pub reflection_coefficient: f64,
    pub charge_pick_radius: f64,
    /// Keep at most this many trajectory points per particle. `None` keeps everything,
    /// so each published snapshot grows with the run; long realtime runs should set it.
    pub trajectory_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            coulomb_constant: COULOMB_CONSTANT,
            min_distance_sq: MIN_DISTANCE_SQ,
            field_line_count: FIELD_LINE_COUNT,
            field_line_length: FIELD_LINE_LENGTH,
            field_line_step_size: FIELD_LINE_STEP_SIZE,
            field_line_seed_radius: FIELD_LINE_SEED_RADIUS,
            field_line_stop_distance: FIELD_LINE_STOP_DISTANCE,
            min_traceable_field: MIN_TRACEABLE_FIELD,
            time_step: TIME_STEP,
            reflection_coefficient: REFLECTION_COEFFICIENT,
            charge_pick_radius: CHARGE_PICK_RADIUS,
            trajectory_limit: None,
        }
    }
}

impl EngineConfig {
    /// Check every override for sane values before the engine accepts it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("coulomb_constant", self.coulomb_constant),
            ("min_distance_sq", self.min_distance_sq),
            ("field_line_step_size", self.field_line_step_size),
            ("field_line_seed_radius", self.field_line_seed_radius),
            ("time_step", self.time_step),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        let non_negative = [
            ("field_line_stop_distance", self.field_line_stop_distance),
            ("min_traceable_field", self.min_traceable_field),
            ("charge_pick_radius", self.charge_pick_radius),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        if !self.reflection_coefficient.is_finite() || self.reflection_coefficient.abs() > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "reflection_coefficient must lie in [-1, 1], got {}",
                self.reflection_coefficient
            )));
        }
        if self.field_line_count == 0 {
            return Err(ConfigError::Invalid("field_line_count must be at least 1".into()));
        }
        if self.trajectory_limit == Some(0) {
            return Err(ConfigError::Invalid("trajectory_limit must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg: EngineConfig = toml::from_str("width = 1024.0\nfield_line_count = 12").unwrap();
        assert_eq!(cfg.width, 1024.0);
        assert_eq!(cfg.field_line_count, 12);
        assert_eq!(cfg.height, CANVAS_HEIGHT);
        assert_eq!(cfg.reflection_coefficient, REFLECTION_COEFFICIENT);
    }

    #[test]
    fn rejects_zero_time_step() {
        let cfg = EngineConfig { time_step: 0.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_amplifying_reflection() {
        let cfg = EngineConfig { reflection_coefficient: -1.5, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
