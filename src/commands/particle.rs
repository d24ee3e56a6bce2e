use super::CommandOutcome;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::vector::Vector2D;

pub fn handle_launch_particle(
    engine: &mut Engine,
    pos: Option<Vector2D>,
    charge: f64,
    mass: f64,
    vel: Vector2D,
) -> Result<CommandOutcome, EngineError> {
    engine
        .launch_particle_with(pos, charge, mass, vel)
        .map(CommandOutcome::ParticleLaunched)
}

pub fn handle_clear_particles(engine: &mut Engine) -> Result<CommandOutcome, EngineError> {
    engine.clear_particles();
    Ok(CommandOutcome::Done)
}
