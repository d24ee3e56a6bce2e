// engine/engine.rs
// The single owned state object: charges, particles, canvas and configuration.
// Every mutation and query goes through here so a field, force or trace pass
// always sees a stable charge set.

use log::debug;

use super::snapshot::ForceReadout;
use crate::canvas::Canvas;
use crate::charge::{Charge, ChargeId, ChargeRegistry, ChargeSpec};
use crate::config::{self, EngineConfig};
use crate::error::{ConfigError, EngineError};
use crate::field::{self, FieldLine, FieldParams, FieldSample, TraceParams};
use crate::particle::{self, ParticleId, ParticleLaunch, TestParticle};
use crate::profile_scope;
use crate::vector::Vector2D;

pub struct Engine {
    config: EngineConfig,
    canvas: Canvas,
    charges: ChargeRegistry,
    particles: Vec<TestParticle>,
    next_particle_id: u64,
    selected: Option<ChargeId>,
    paused: bool,
    /// Ticks stop being taken once `frame` reaches this.
    frame_limit: Option<usize>,
    pub frame: usize,
    pub time: f64,
    /// Bumped on every charge mutation, so cached field lines know when to recompute.
    charges_version: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let canvas = Canvas::new(config.width, config.height)?;
        Ok(Self {
            config,
            canvas,
            charges: ChargeRegistry::new(),
            particles: Vec::new(),
            next_particle_id: 0,
            selected: None,
            paused: false,
            frame_limit: None,
            frame: 0,
            time: 0.0,
            charges_version: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    #[inline]
    fn field_params(&self) -> FieldParams {
        FieldParams::from(&self.config)
    }

    #[inline]
    fn trace_params(&self) -> TraceParams {
        TraceParams::from(&self.config)
    }

    /// Resize the canvas. Particles outside the new bounds are pulled back in on their next step.
    pub fn set_bounds(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        self.canvas = Canvas::new(width, height)?;
        self.config.width = width;
        self.config.height = height;
        self.charges_version += 1;
        Ok(())
    }

    // ====================
    // Charges
    // ====================

    pub fn add_charge(&mut self, pos: Vector2D, value: f64) -> Result<ChargeId, EngineError> {
        let spec = ChargeSpec::new(pos, value)?;
        Ok(self.add_charge_spec(spec))
    }

    pub fn add_charge_spec(&mut self, spec: ChargeSpec) -> ChargeId {
        self.charges_version += 1;
        self.charges.add(spec)
    }

    pub fn remove_charge(&mut self, id: ChargeId) -> Result<(), EngineError> {
        self.charges.remove(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.charges_version += 1;
        Ok(())
    }

    pub fn set_charge_value(&mut self, id: ChargeId, value: f64) -> Result<(), EngineError> {
        self.charges.set_value(id, value)?;
        self.charges_version += 1;
        Ok(())
    }

    pub fn set_charge_position(&mut self, id: ChargeId, pos: Vector2D) -> Result<(), EngineError> {
        self.charges.set_position(id, pos)?;
        self.charges_version += 1;
        Ok(())
    }

    pub fn clear_charges(&mut self) {
        debug!("clearing {} charges", self.charges.len());
        self.charges.clear();
        self.selected = None;
        self.charges_version += 1;
    }

    #[inline]
    pub fn charges(&self) -> &[Charge] {
        self.charges.all()
    }

    pub fn charge(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.get(id)
    }

    #[inline]
    pub fn charges_version(&self) -> u64 {
        self.charges_version
    }

    /// Charge under `point`, using the configured pick radius.
    pub fn charge_at(&self, point: Vector2D) -> Option<ChargeId> {
        self.charges.find_at(point, self.config.charge_pick_radius)
    }

    // ====================
    // Selection
    // ====================

    pub fn select(&mut self, id: Option<ChargeId>) -> Result<(), EngineError> {
        if let Some(id) = id {
            if !self.charges.contains(id) {
                return Err(EngineError::UnknownCharge(id));
            }
        }
        self.selected = id;
        Ok(())
    }

    /// Select the charge under `point`, or clear the selection when there is none.
    pub fn select_at(&mut self, point: Vector2D) -> Option<ChargeId> {
        self.selected = self.charge_at(point);
        self.selected
    }

    #[inline]
    pub fn selected(&self) -> Option<ChargeId> {
        self.selected
    }

    // ====================
    // Particles
    // ====================

    pub fn launch_particle(&mut self, launch: ParticleLaunch) -> ParticleId {
        let id = ParticleId(self.next_particle_id);
        self.next_particle_id += 1;
        let pos = launch.pos().unwrap_or_else(|| self.canvas.center());
        debug!("launching {id} q={:e} m={:e} at ({}, {})", launch.charge(), launch.mass(), pos.x, pos.y);
        self.particles.push(TestParticle::launch(id, pos, &launch));
        id
    }

    /// Validate and launch in one call. Nothing is created when validation fails.
    pub fn launch_particle_with(
        &mut self,
        pos: Option<Vector2D>,
        charge: f64,
        mass: f64,
        vel: Vector2D,
    ) -> Result<ParticleId, EngineError> {
        let launch = ParticleLaunch::new(pos, charge, mass, vel)?;
        Ok(self.launch_particle(launch))
    }

    pub fn clear_particles(&mut self) {
        debug!("clearing {} particles", self.particles.len());
        self.particles.clear();
    }

    #[inline]
    pub fn particles(&self) -> &[TestParticle] {
        &self.particles
    }

    pub fn trajectories(&self) -> impl Iterator<Item = (ParticleId, &[Vector2D])> + '_ {
        self.particles.iter().map(|p| (p.id, p.trajectory.as_slice()))
    }

    /// Caller-side retention: keep at most `max` points per trajectory.
    pub fn trim_trajectories(&mut self, max: usize) {
        for p in &mut self.particles {
            p.retain_recent(max);
        }
    }

    // ====================
    // Queries
    // ====================

    pub fn field_at(&self, point: Vector2D) -> Vector2D {
        field::field_at(point, self.charges.all(), &self.field_params())
    }

    pub fn net_force_on(&self, id: ChargeId) -> Result<Vector2D, EngineError> {
        let target = self.charges.get(id).ok_or(EngineError::UnknownCharge(id))?;
        Ok(field::net_force_on(target, self.charges.all(), &self.field_params()))
    }

    pub fn force_readout(&self, id: ChargeId) -> Result<ForceReadout, EngineError> {
        self.net_force_on(id).map(ForceReadout::from_force)
    }

    pub fn trace_field_line(&self, id: ChargeId, index: usize) -> Result<Vec<Vector2D>, EngineError> {
        let charge = self.charges.get(id).ok_or(EngineError::UnknownCharge(id))?;
        let count = self.config.field_line_count;
        if index >= count {
            return Err(EngineError::LineIndexOutOfRange { index, count });
        }
        Ok(field::trace_charge_line(
            charge,
            index,
            self.charges.all(),
            &self.canvas,
            &self.trace_params(),
        ))
    }

    pub fn field_lines_for(&self, id: ChargeId) -> Result<Vec<FieldLine>, EngineError> {
        (0..self.config.field_line_count)
            .map(|index| {
                Ok(FieldLine {
                    charge: id,
                    index,
                    points: self.trace_field_line(id, index)?,
                })
            })
            .collect()
    }

    pub fn all_field_lines(&self) -> Vec<FieldLine> {
        profile_scope!("field_lines");
        field::trace_all(self.charges.all(), &self.canvas, &self.trace_params())
    }

    /// Field samples for a vector overlay on the default grid.
    pub fn field_grid(&self) -> Vec<FieldSample> {
        field::field_grid(
            self.charges.all(),
            &self.canvas,
            config::FIELD_GRID_SPACING,
            config::FIELD_GRID_EXCLUSION_RADIUS,
            &self.field_params(),
        )
    }

    // ====================
    // Time stepping
    // ====================

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop the driving loop once `frame` reaches `limit`. `None` runs without end.
    pub fn set_frame_limit(&mut self, limit: Option<usize>) {
        self.frame_limit = limit;
    }

    #[inline]
    pub fn frame_limit(&self) -> Option<usize> {
        self.frame_limit
    }

    /// True when a tick would do any work.
    pub fn is_running(&self) -> bool {
        !self.paused
            && !self.particles.is_empty()
            && self.frame_limit.map_or(true, |limit| self.frame < limit)
    }

    /// Integrate every current particle exactly once.
    pub fn advance(&mut self, dt: f64) -> Result<(), EngineError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::InvalidTimeStep(dt));
        }
        profile_scope!("advance");
        let params = self.field_params();
        particle::advance_all(
            &mut self.particles,
            self.charges.all(),
            &self.canvas,
            dt,
            self.config.reflection_coefficient,
            &params,
        );
        self.frame += 1;
        self.time += dt;
        Ok(())
    }

    /// Change the step used by [`Engine::step`] and the engine thread's tick.
    pub fn set_time_step(&mut self, dt: f64) -> Result<(), EngineError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EngineError::InvalidTimeStep(dt));
        }
        self.config.time_step = dt;
        Ok(())
    }

    /// Advance by the configured time step.
    pub fn step(&mut self) -> Result<(), EngineError> {
        self.advance(self.config.time_step)
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let canvas = Canvas::default();
        Self {
            config,
            canvas,
            charges: ChargeRegistry::new(),
            particles: Vec::new(),
            next_particle_id: 0,
            selected: None,
            paused: false,
            frame_limit: None,
            frame: 0,
            time: 0.0,
            charges_version: 0,
        }
    }
}
