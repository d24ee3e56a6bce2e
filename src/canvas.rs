// canvas.rs
// Rectangular world bounds shared by the integrator and the field-line tracer.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::vector::Vector2D;

/// The region `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(EngineError::InvalidBounds { width, height })
        }
    }

    /// Closed-interval containment; points on the edge are inside.
    #[inline]
    pub fn contains(&self, p: Vector2D) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    #[inline]
    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: crate::config::CANVAS_WIDTH,
            height: crate::config::CANVAS_HEIGHT,
        }
    }
}
