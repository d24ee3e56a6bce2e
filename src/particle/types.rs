// particle/types.rs
// Test particle state, its id, and the validated launch request that creates it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::charge::Polarity;
use crate::error::{ensure_finite, parse_real, EngineError};
use crate::vector::Vector2D;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Launch parameters, checked once so the integrator never sees a bad mass.
/// Only the constructors can build one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleLaunch {
    /// `None` launches from the canvas centre.
    pos: Option<Vector2D>,
    vel: Vector2D,
    charge: f64,
    mass: f64,
}

impl ParticleLaunch {
    pub fn new(pos: Option<Vector2D>, charge: f64, mass: f64, vel: Vector2D) -> Result<Self, EngineError> {
        if let Some(p) = pos {
            ensure_finite("particle x", p.x)?;
            ensure_finite("particle y", p.y)?;
        }
        ensure_finite("particle charge", charge)?;
        ensure_finite("velocity x", vel.x)?;
        ensure_finite("velocity y", vel.y)?;
        let mass = ensure_finite("particle mass", mass)?;
        if mass <= 0.0 {
            return Err(EngineError::NonPositiveMass(mass));
        }
        Ok(Self { pos, vel, charge, mass })
    }

    /// Parse the launch form: charge magnitude with polarity, mass and velocity components.
    pub fn from_text(
        pos: Option<Vector2D>,
        charge: &str,
        polarity: Polarity,
        mass: &str,
        vx: &str,
        vy: &str,
    ) -> Result<Self, EngineError> {
        let charge = polarity.apply(parse_real("particle charge", charge)?);
        let mass = parse_real("particle mass", mass)?;
        let vel = Vector2D::new(parse_real("velocity x", vx)?, parse_real("velocity y", vy)?);
        Self::new(pos, charge, mass, vel)
    }

    #[inline]
    pub fn pos(&self) -> Option<Vector2D> {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> Vector2D {
        self.vel
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestParticle {
    pub id: ParticleId,
    pub pos: Vector2D,
    pub vel: Vector2D,
    pub charge: f64,
    pub mass: f64,
    /// Positions oldest first, starting with the launch point.
    pub trajectory: Vec<Vector2D>,
}

impl TestParticle {
    pub(crate) fn launch(id: ParticleId, pos: Vector2D, launch: &ParticleLaunch) -> Self {
        Self {
            id,
            pos,
            vel: launch.vel,
            charge: launch.charge,
            mass: launch.mass,
            trajectory: vec![pos],
        }
    }

    /// Drop the oldest trajectory points so at most `max` remain.
    pub fn retain_recent(&mut self, max: usize) {
        let len = self.trajectory.len();
        if len > max {
            self.trajectory.drain(..len - max);
        }
    }
}
