// engine/snapshot.rs
// Read-only copies of engine state handed to presentation and report writers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Engine;
use crate::canvas::Canvas;
use crate::charge::{Charge, ChargeId};
use crate::field::FieldLine;
use crate::particle::TestParticle;
use crate::vector::{Vector2D, VectorExt};

/// Net force on a charge split into the magnitude and heading shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForceReadout {
    pub force: Vector2D,
    pub magnitude: f64,
    /// Degrees counter-clockwise from +x, in `[0, 360)`.
    pub direction_degrees: f64,
}

impl ForceReadout {
    pub fn from_force(force: Vector2D) -> Self {
        Self {
            force,
            magnitude: force.mag(),
            direction_degrees: force.direction_degrees(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: usize,
    pub time: f64,
    pub canvas: Canvas,
    pub paused: bool,
    pub charges: Vec<Charge>,
    pub particles: Vec<TestParticle>,
    pub selected: Option<ChargeId>,
    pub selected_force: Option<ForceReadout>,
    /// Only filled when the caller asks for field lines. Shared, not copied, between snapshots.
    #[serde(default = "no_field_lines", skip_serializing_if = "has_no_lines")]
    pub field_lines: Arc<[FieldLine]>,
    /// Charge-set version the field lines were traced against.
    pub charges_version: u64,
}

fn no_field_lines() -> Arc<[FieldLine]> {
    Arc::from(Vec::new())
}

fn has_no_lines(lines: &Arc<[FieldLine]>) -> bool {
    lines.is_empty()
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            frame: 0,
            time: 0.0,
            canvas: Canvas::default(),
            paused: false,
            charges: Vec::new(),
            particles: Vec::new(),
            selected: None,
            selected_force: None,
            field_lines: no_field_lines(),
            charges_version: 0,
        }
    }
}

impl Snapshot {
    /// Copy the current state. Field lines are left empty; see [`Snapshot::with_field_lines`].
    pub fn capture(engine: &Engine) -> Self {
        let selected_force = engine
            .selected()
            .and_then(|id| engine.force_readout(id).ok());
        Self {
            frame: engine.frame,
            time: engine.time,
            canvas: *engine.canvas(),
            paused: engine.is_paused(),
            charges: engine.charges().to_vec(),
            particles: engine.particles().to_vec(),
            selected: engine.selected(),
            selected_force,
            field_lines: no_field_lines(),
            charges_version: engine.charges_version(),
        }
    }

    pub fn with_field_lines(mut self, lines: impl Into<Arc<[FieldLine]>>) -> Self {
        self.field_lines = lines.into();
        self
    }
}
