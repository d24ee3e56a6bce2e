// field/solver.rs
// Superposed point-charge field with a squared-distance clamp near each source.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::FieldParams;
use crate::canvas::Canvas;
use crate::charge::Charge;
use crate::vector::Vector2D;

/// Field value at a grid position, for vector overlays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub pos: Vector2D,
    pub field: Vector2D,
}

/// Contribution of a single charge at `point`.
///
/// `k|q|/r²` along the charge-to-point direction, reversed for negative charges.
/// `r²` is clamped to `min_distance_sq`; the direction vector is divided by the
/// clamped distance, so a point exactly on the charge receives nothing.
#[inline]
fn contribution(point: Vector2D, charge: &Charge, params: &FieldParams) -> Vector2D {
    let d = point - charge.pos;
    let dist_sq = d.mag_sq().max(params.min_distance_sq);
    let dist = dist_sq.sqrt();
    // k*value carries the sign, so negative sources point inward and zero sources vanish.
    d * (params.k_e * charge.value / (dist_sq * dist))
}

/// Total electric field at `point`. An empty charge set yields the zero vector.
pub fn field_at(point: Vector2D, charges: &[Charge], params: &FieldParams) -> Vector2D {
    charges
        .iter()
        .fold(Vector2D::zero(), |acc, c| acc + contribution(point, c, params))
}

/// Sample the field on a regular grid starting at `spacing` from the origin.
///
/// Points within `exclusion_radius` of a charge and points where the field
/// vanishes are skipped. Samples come back in x-major order.
pub fn field_grid(
    charges: &[Charge],
    canvas: &Canvas,
    spacing: f64,
    exclusion_radius: f64,
    params: &FieldParams,
) -> Vec<FieldSample> {
    if !(spacing > 0.0) {
        return Vec::new();
    }
    let cols = (canvas.width / spacing).ceil() as usize;
    let rows = (canvas.height / spacing).ceil() as usize;

    let mut points = Vec::with_capacity(cols * rows);
    for i in 1..=cols {
        let x = i as f64 * spacing;
        if x >= canvas.width {
            break;
        }
        for j in 1..=rows {
            let y = j as f64 * spacing;
            if y >= canvas.height {
                break;
            }
            points.push(Vector2D::new(x, y));
        }
    }

    points
        .into_par_iter()
        .filter(|p| charges.iter().all(|c| c.distance_to(*p) >= exclusion_radius))
        .filter_map(|pos| {
            let field = field_at(pos, charges, params);
            (field.mag() > 0.0).then_some(FieldSample { pos, field })
        })
        .collect()
}
