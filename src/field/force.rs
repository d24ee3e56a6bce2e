// field/force.rs
// Net Coulomb force on one charge from every other charge in the set.

use super::FieldParams;
use crate::charge::Charge;
use crate::vector::{Vector2D, VectorExt};

/// Net force on `target`. Like signs push the target away from the other charge,
/// opposite signs pull it towards it. The target is excluded by id, so passing
/// the full set (target included) is the normal call.
pub fn net_force_on(target: &Charge, charges: &[Charge], params: &FieldParams) -> Vector2D {
    let mut net = Vector2D::zero();
    for other in charges.iter().filter(|c| c.id != target.id) {
        let d = target.pos - other.pos;
        let dist_sq = d.mag_sq().max(params.min_distance_sq);
        // Signed product: positive means repulsion along other -> target.
        let strength = params.k_e * target.value * other.value / dist_sq;
        net += d.normalized_or_zero() * strength;
    }
    net
}
