// field/lines.rs
// Streamline tracing: fixed-length steps along (or against) the local field direction.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{field_at, FieldParams};
use crate::canvas::Canvas;
use crate::charge::{Charge, ChargeId};
use crate::config::EngineConfig;
use crate::vector::{Vector2D, VectorExt};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceParams {
    pub field: FieldParams,
    pub step_size: f64,
    pub max_steps: usize,
    /// Stop once a point comes closer than this to any charge.
    pub stop_distance: f64,
    /// Stop when the local field is weaker than this.
    pub min_field: f64,
    pub seed_radius: f64,
    pub line_count: usize,
}

impl From<&EngineConfig> for TraceParams {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            field: FieldParams::from(cfg),
            step_size: cfg.field_line_step_size,
            max_steps: cfg.field_line_length,
            stop_distance: cfg.field_line_stop_distance,
            min_field: cfg.min_traceable_field,
            seed_radius: cfg.field_line_seed_radius,
            line_count: cfg.field_line_count,
        }
    }
}

impl Default for TraceParams {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// One traced line, tagged with the charge and seed index it came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldLine {
    pub charge: ChargeId,
    pub index: usize,
    pub points: Vec<Vector2D>,
}

/// Walk from `start` and return the polyline, `start` first.
///
/// Each step evaluates the field, stops if it is weaker than `min_field`, and
/// otherwise moves `step_size` along the field (against it when `outward` is
/// false). After moving, the new point is recorded and the walk ends if it left
/// the canvas or came within `stop_distance` of a charge. At most `max_steps`
/// points follow the start point.
pub fn trace(
    start: Vector2D,
    outward: bool,
    charges: &[Charge],
    canvas: &Canvas,
    params: &TraceParams,
) -> Vec<Vector2D> {
    let mut line = Vec::with_capacity(params.max_steps + 1);
    line.push(start);

    let mut pos = start;
    for _ in 0..params.max_steps {
        let e = field_at(pos, charges, &params.field);
        let mag = e.mag();
        if !(mag >= params.min_field) {
            break;
        }

        let mut step = e.normalized_or_zero() * params.step_size;
        if !outward {
            step = -step;
        }
        pos += step;
        line.push(pos);

        if !canvas.contains(pos) {
            break;
        }
        if charges.iter().any(|c| c.distance_to(pos) < params.stop_distance) {
            break;
        }
    }

    line
}

/// Start point of line `index` around `charge`, evenly spaced on the seed circle.
#[inline]
pub fn seed_point(charge: &Charge, index: usize, params: &TraceParams) -> Vector2D {
    let angle = index as f64 * std::f64::consts::TAU / params.line_count as f64;
    charge.pos + Vector2D::unit_at_angle(angle) * params.seed_radius
}

/// Trace line `index` of `charge`: outward from positive charges, inward into negative ones.
/// Neutral charges have no lines and yield an empty polyline.
pub fn trace_charge_line(
    charge: &Charge,
    index: usize,
    charges: &[Charge],
    canvas: &Canvas,
    params: &TraceParams,
) -> Vec<Vector2D> {
    if charge.is_neutral() {
        return Vec::new();
    }
    let start = seed_point(charge, index, params);
    trace(start, charge.is_positive(), charges, canvas, params)
}

/// Every line of every non-neutral charge, traced in parallel over the same snapshot.
pub fn trace_all(charges: &[Charge], canvas: &Canvas, params: &TraceParams) -> Vec<FieldLine> {
    let seeds: Vec<(&Charge, usize)> = charges
        .iter()
        .filter(|c| !c.is_neutral())
        .flat_map(|c| (0..params.line_count).map(move |i| (c, i)))
        .collect();

    seeds
        .into_par_iter()
        .map(|(charge, index)| FieldLine {
            charge: charge.id,
            index,
            points: trace_charge_line(charge, index, charges, canvas, params),
        })
        .collect()
}
