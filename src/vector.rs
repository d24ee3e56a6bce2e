// vector.rs
// 2D vector type used throughout the engine, plus the few helpers ultraviolet does not provide.

pub use ultraviolet::DVec2 as Vector2D;

/// Extra operations on [`Vector2D`] needed by the field and particle code.
pub trait VectorExt {
    /// Unit vector in the same direction, or the zero vector when the magnitude is zero.
    fn normalized_or_zero(&self) -> Self;
    /// Unit vector pointing at `angle` radians from the +x axis.
    fn unit_at_angle(angle: f64) -> Self;
    /// Direction in degrees, normalised into `[0, 360)`.
    fn direction_degrees(&self) -> f64;
}

impl VectorExt for Vector2D {
    #[inline]
    fn normalized_or_zero(&self) -> Self {
        let mag = self.mag();
        if mag > 0.0 {
            *self / mag
        } else {
            Vector2D::zero()
        }
    }

    #[inline]
    fn unit_at_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vector2D::new(cos, sin)
    }

    fn direction_degrees(&self) -> f64 {
        let deg = self.y.atan2(self.x).to_degrees();
        if deg < 0.0 {
            deg + 360.0
        } else {
            deg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizing_zero_gives_zero() {
        let v = Vector2D::zero().normalized_or_zero();
        assert_eq!(v, Vector2D::zero());
    }

    #[test]
    fn normalized_vector_has_unit_length() {
        let v = Vector2D::new(3.0, 4.0).normalized_or_zero();
        assert!((v.mag() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12 && (v.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn add_and_scale_are_closed() {
        let a = Vector2D::new(1.0, -2.0);
        let b = Vector2D::new(0.5, 4.0);
        let c = (a + b) * 2.0;
        assert_eq!(c, Vector2D::new(3.0, 4.0));
        assert!((c.mag() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn direction_degrees_wraps_into_positive_range() {
        assert!((Vector2D::new(1.0, 0.0).direction_degrees()).abs() < 1e-12);
        assert!((Vector2D::new(0.0, -1.0).direction_degrees() - 270.0).abs() < 1e-9);
        assert!((Vector2D::new(-1.0, 0.0).direction_degrees() - 180.0).abs() < 1e-9);
    }
}
