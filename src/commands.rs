// commands.rs
// Messages sent to the engine thread, and what each one produced.

use crate::charge::ChargeId;
use crate::particle::ParticleId;
use crate::vector::Vector2D;

mod charge;
mod dispatcher;
mod particle;
mod state;

pub use dispatcher::process_command;

#[derive(Clone, Debug, PartialEq)]
pub enum EngineCommand {
    AddCharge { pos: Vector2D, value: f64 },
    RemoveCharge { id: ChargeId },
    SetChargeValue { id: ChargeId, value: f64 },
    SetChargePosition { id: ChargeId, pos: Vector2D },
    ClearCharges,
    Select { id: Option<ChargeId> },
    SelectAt { pos: Vector2D },
    /// Validated on the engine thread; `pos: None` launches from the canvas centre.
    LaunchParticle { pos: Option<Vector2D>, charge: f64, mass: f64, vel: Vector2D },
    ClearParticles,
    SetBounds { width: f64, height: f64 },
    SetPaused { paused: bool },
    /// Stop ticking once the frame counter reaches `limit`.
    SetFrameLimit { limit: Option<usize> },
    /// Advance one configured time step, then pause.
    StepOnce,
    Advance { dt: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandOutcome {
    Done,
    ChargeAdded(ChargeId),
    ParticleLaunched(ParticleId),
    Selected(Option<ChargeId>),
}
