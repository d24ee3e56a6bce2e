use log::warn;

use super::{charge, particle, state, CommandOutcome, EngineCommand};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::profile_scope;

/// Process a single `EngineCommand` by delegating to the appropriate handler.
///
/// Handlers validate before mutating, so an `Err` means the engine is unchanged.
pub fn process_command(cmd: EngineCommand, engine: &mut Engine) -> Result<CommandOutcome, EngineError> {
    profile_scope!("command_handling");
    let result = match cmd {
        EngineCommand::AddCharge { pos, value } => charge::handle_add_charge(engine, pos, value),
        EngineCommand::RemoveCharge { id } => charge::handle_remove_charge(engine, id),
        EngineCommand::SetChargeValue { id, value } => charge::handle_set_charge_value(engine, id, value),
        EngineCommand::SetChargePosition { id, pos } => charge::handle_set_charge_position(engine, id, pos),
        EngineCommand::ClearCharges => charge::handle_clear_charges(engine),
        EngineCommand::Select { id } => charge::handle_select(engine, id),
        EngineCommand::SelectAt { pos } => charge::handle_select_at(engine, pos),
        EngineCommand::LaunchParticle { pos, charge, mass, vel } => {
            particle::handle_launch_particle(engine, pos, charge, mass, vel)
        }
        EngineCommand::ClearParticles => particle::handle_clear_particles(engine),
        EngineCommand::SetBounds { width, height } => state::handle_set_bounds(engine, width, height),
        EngineCommand::SetPaused { paused } => state::handle_set_paused(engine, paused),
        EngineCommand::SetFrameLimit { limit } => state::handle_set_frame_limit(engine, limit),
        EngineCommand::StepOnce => state::handle_step_once(engine),
        EngineCommand::Advance { dt } => state::handle_advance(engine, dt),
    };
    if let Err(e) = &result {
        warn!("command rejected: {e}");
    }
    result
}
