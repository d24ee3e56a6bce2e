use super::CommandOutcome;
use crate::engine::Engine;
use crate::error::EngineError;

pub fn handle_set_bounds(engine: &mut Engine, width: f64, height: f64) -> Result<CommandOutcome, EngineError> {
    engine.set_bounds(width, height)?;
    Ok(CommandOutcome::Done)
}

pub fn handle_set_paused(engine: &mut Engine, paused: bool) -> Result<CommandOutcome, EngineError> {
    engine.set_paused(paused);
    Ok(CommandOutcome::Done)
}

pub fn handle_set_frame_limit(engine: &mut Engine, limit: Option<usize>) -> Result<CommandOutcome, EngineError> {
    engine.set_frame_limit(limit);
    Ok(CommandOutcome::Done)
}

/// Manually step the engine once and leave it paused.
pub fn handle_step_once(engine: &mut Engine) -> Result<CommandOutcome, EngineError> {
    let dt = engine.config().time_step;
    engine.advance(dt)?;
    engine.set_paused(true);
    Ok(CommandOutcome::Done)
}

pub fn handle_advance(engine: &mut Engine, dt: f64) -> Result<CommandOutcome, EngineError> {
    engine.advance(dt)?;
    Ok(CommandOutcome::Done)
}
