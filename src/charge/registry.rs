// charge/registry.rs
// Owns the charge set: insertion-ordered storage plus a monotonically increasing id counter.

use log::debug;

use super::types::{Charge, ChargeId, ChargeSpec};
use crate::error::{ensure_finite, EngineError};
use crate::vector::Vector2D;

#[derive(Clone, Debug, Default)]
pub struct ChargeRegistry {
    charges: Vec<Charge>,
    next_id: u64,
}

impl ChargeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: ChargeSpec) -> ChargeId {
        let id = ChargeId(self.next_id);
        self.next_id += 1;
        self.charges.push(Charge::new(id, spec.pos(), spec.value()));
        debug!("added charge {id} value={:e} at ({}, {})", spec.value(), spec.pos().x, spec.pos().y);
        id
    }

    pub fn remove(&mut self, id: ChargeId) -> Result<Charge, EngineError> {
        let idx = self.index_of(id)?;
        debug!("removed charge {id}");
        Ok(self.charges.remove(idx))
    }

    pub fn set_value(&mut self, id: ChargeId, value: f64) -> Result<(), EngineError> {
        let value = ensure_finite("charge value", value)?;
        let charge = self.get_mut(id)?;
        charge.value = value;
        Ok(())
    }

    pub fn set_position(&mut self, id: ChargeId, pos: Vector2D) -> Result<(), EngineError> {
        ensure_finite("charge x", pos.x)?;
        ensure_finite("charge y", pos.y)?;
        let charge = self.get_mut(id)?;
        charge.pos = pos;
        Ok(())
    }

    /// First charge, in insertion order, whose centre lies within `radius` of `point`.
    pub fn find_at(&self, point: Vector2D, radius: f64) -> Option<ChargeId> {
        self.charges
            .iter()
            .find(|c| c.distance_to(point) <= radius)
            .map(|c| c.id)
    }

    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ChargeId) -> bool {
        self.get(id).is_some()
    }

    /// Read-only view in insertion order.
    #[inline]
    pub fn all(&self) -> &[Charge] {
        &self.charges
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Drop every charge. Ids keep counting up so stale handles never alias new charges.
    pub fn clear(&mut self) {
        self.charges.clear();
    }

    fn index_of(&self, id: ChargeId) -> Result<usize, EngineError> {
        self.charges
            .iter()
            .position(|c| c.id == id)
            .ok_or(EngineError::UnknownCharge(id))
    }

    fn get_mut(&mut self, id: ChargeId) -> Result<&mut Charge, EngineError> {
        self.charges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(EngineError::UnknownCharge(id))
    }
}
