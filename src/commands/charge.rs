use super::CommandOutcome;
use crate::charge::ChargeId;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::vector::Vector2D;

pub fn handle_add_charge(engine: &mut Engine, pos: Vector2D, value: f64) -> Result<CommandOutcome, EngineError> {
    engine.add_charge(pos, value).map(CommandOutcome::ChargeAdded)
}

pub fn handle_remove_charge(engine: &mut Engine, id: ChargeId) -> Result<CommandOutcome, EngineError> {
    engine.remove_charge(id)?;
    Ok(CommandOutcome::Done)
}

pub fn handle_set_charge_value(engine: &mut Engine, id: ChargeId, value: f64) -> Result<CommandOutcome, EngineError> {
    engine.set_charge_value(id, value)?;
    Ok(CommandOutcome::Done)
}

pub fn handle_set_charge_position(
    engine: &mut Engine,
    id: ChargeId,
    pos: Vector2D,
) -> Result<CommandOutcome, EngineError> {
    engine.set_charge_position(id, pos)?;
    Ok(CommandOutcome::Done)
}

pub fn handle_clear_charges(engine: &mut Engine) -> Result<CommandOutcome, EngineError> {
    engine.clear_charges();
    Ok(CommandOutcome::Done)
}

pub fn handle_select(engine: &mut Engine, id: Option<ChargeId>) -> Result<CommandOutcome, EngineError> {
    engine.select(id)?;
    Ok(CommandOutcome::Selected(id))
}

pub fn handle_select_at(engine: &mut Engine, pos: Vector2D) -> Result<CommandOutcome, EngineError> {
    Ok(CommandOutcome::Selected(engine.select_at(pos)))
}
