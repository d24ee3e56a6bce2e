// charge/types.rs
// Point charge value type, its stable id and the polarity used by input forms.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, parse_real, EngineError};
use crate::vector::Vector2D;

/// Stable identifier of a charge, never reused within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChargeId(pub u64);

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub id: ChargeId,
    pub pos: Vector2D,
    /// Signed charge in coulombs.
    pub value: f64,
}

impl Charge {
    /// Only the registry hands out ids, so construction stays crate-private.
    pub(crate) fn new(id: ChargeId, pos: Vector2D, value: f64) -> Self {
        Self { id, pos, value }
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }

    /// Exactly-zero charges produce no field and get no field lines.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.value == 0.0
    }

    #[inline]
    pub fn distance_to(&self, point: Vector2D) -> f64 {
        (point - self.pos).mag()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

impl Polarity {
    /// Signed value for a magnitude entered alongside this polarity.
    #[inline]
    pub fn apply(self, magnitude: f64) -> f64 {
        match self {
            Polarity::Positive => magnitude,
            Polarity::Negative => -magnitude,
        }
    }
}

/// A validated request to place a charge. Only the constructors can build one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChargeSpec {
    pos: Vector2D,
    value: f64,
}

impl ChargeSpec {
    pub fn new(pos: Vector2D, value: f64) -> Result<Self, EngineError> {
        ensure_finite("charge x", pos.x)?;
        ensure_finite("charge y", pos.y)?;
        let value = ensure_finite("charge value", value)?;
        Ok(Self { pos, value })
    }

    /// Build from a text magnitude and a polarity, the way the input panel supplies them.
    pub fn from_text(pos: Vector2D, magnitude: &str, polarity: Polarity) -> Result<Self, EngineError> {
        let magnitude = parse_real("charge value", magnitude)?;
        Self::new(pos, polarity.apply(magnitude))
    }

    #[inline]
    pub fn pos(&self) -> Vector2D {
        self.pos
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}
