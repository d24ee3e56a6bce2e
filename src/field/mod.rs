// field/mod.rs
// Electrostatics: superposed field, pairwise force and field-line tracing over a charge snapshot.

mod force;
mod lines;
mod solver;

pub use force::net_force_on;
pub use lines::{seed_point, trace, trace_all, trace_charge_line, FieldLine, TraceParams};
pub use solver::{field_at, field_grid, FieldSample};

use crate::config::{self, EngineConfig};

/// Constants shared by every field and force evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub k_e: f64,
    /// Squared distances below this are clamped up to it.
    pub min_distance_sq: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            k_e: config::COULOMB_CONSTANT,
            min_distance_sq: config::MIN_DISTANCE_SQ,
        }
    }
}

impl From<&EngineConfig> for FieldParams {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            k_e: cfg.coulomb_constant,
            min_distance_sq: cfg.min_distance_sq,
        }
    }
}
