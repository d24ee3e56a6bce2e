// particle/integrator.rs
// Semi-implicit Euler step with inelastic wall reflection.

use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::charge::Charge;
use crate::field::{field_at, FieldParams};
use crate::particle::TestParticle;
use crate::vector::Vector2D;

/// Advance one particle by `dt` under a field sampled at its current position.
///
/// Velocity is updated first and the new velocity moves the position. The new
/// position is appended to the trajectory, then each axis is checked on its own:
/// a coordinate outside the canvas has its velocity component multiplied by
/// `reflection` and is clamped back onto the edge.
pub fn step(particle: &mut TestParticle, field: Vector2D, dt: f64, canvas: &Canvas, reflection: f64) {
    let acc = field * (particle.charge / particle.mass);
    particle.vel += acc * dt;
    particle.pos += particle.vel * dt;
    particle.trajectory.push(particle.pos);

    reflect_axis(&mut particle.pos.x, &mut particle.vel.x, canvas.width, reflection);
    reflect_axis(&mut particle.pos.y, &mut particle.vel.y, canvas.height, reflection);
}

/// Bounce one coordinate off `[0, max]`.
#[inline]
pub fn reflect_axis(pos: &mut f64, vel: &mut f64, max: f64, reflection: f64) {
    if *pos < 0.0 || *pos > max {
        *vel *= reflection;
        *pos = pos.clamp(0.0, max);
    }
}

/// Step every particle once against the same charge snapshot.
pub fn advance_all(
    particles: &mut [TestParticle],
    charges: &[Charge],
    canvas: &Canvas,
    dt: f64,
    reflection: f64,
    params: &FieldParams,
) {
    particles.par_iter_mut().for_each(|p| {
        let field = field_at(p.pos, charges, params);
        step(p, field, dt, canvas, reflection);
    });
}
