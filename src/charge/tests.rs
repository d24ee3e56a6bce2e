// charge/tests.rs
// Registry bookkeeping and input validation tests

#[cfg(test)]
mod registry {
    use crate::charge::{ChargeId, ChargeRegistry, ChargeSpec, Polarity};
    use crate::error::EngineError;
    use crate::vector::Vector2D;

    fn spec(x: f64, y: f64, value: f64) -> ChargeSpec {
        ChargeSpec::new(Vector2D::new(x, y), value).unwrap()
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut reg = ChargeRegistry::new();
        let a = reg.add(spec(0.0, 0.0, 1e-9));
        let b = reg.add(spec(10.0, 0.0, -1e-9));
        assert_ne!(a, b);
        reg.remove(a).unwrap();
        reg.clear();
        let c = reg.add(spec(0.0, 0.0, 1e-9));
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn coincident_charges_are_allowed() {
        let mut reg = ChargeRegistry::new();
        reg.add(spec(5.0, 5.0, 1e-9));
        reg.add(spec(5.0, 5.0, -1e-9));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn find_at_returns_first_in_insertion_order() {
        let mut reg = ChargeRegistry::new();
        let first = reg.add(spec(100.0, 100.0, 1e-9));
        reg.add(spec(104.0, 100.0, 1e-9));
        assert_eq!(reg.find_at(Vector2D::new(102.0, 100.0), 12.0), Some(first));
        assert_eq!(reg.find_at(Vector2D::new(300.0, 300.0), 12.0), None);
    }

    #[test]
    fn find_at_includes_the_rim() {
        let mut reg = ChargeRegistry::new();
        let id = reg.add(spec(0.0, 0.0, 1e-9));
        assert_eq!(reg.find_at(Vector2D::new(12.0, 0.0), 12.0), Some(id));
        assert_eq!(reg.find_at(Vector2D::new(12.01, 0.0), 12.0), None);
    }

    #[test]
    fn updates_change_only_the_target() {
        let mut reg = ChargeRegistry::new();
        let a = reg.add(spec(0.0, 0.0, 1e-9));
        let b = reg.add(spec(50.0, 0.0, 1e-9));
        reg.set_value(a, -2e-9).unwrap();
        reg.set_position(a, Vector2D::new(20.0, 30.0)).unwrap();
        let ca = reg.get(a).unwrap();
        assert_eq!(ca.value, -2e-9);
        assert_eq!(ca.pos, Vector2D::new(20.0, 30.0));
        assert_eq!(reg.get(b).unwrap().value, 1e-9);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut reg = ChargeRegistry::new();
        let missing = ChargeId(42);
        assert_eq!(reg.remove(missing).unwrap_err(), EngineError::UnknownCharge(missing));
        assert!(reg.set_value(missing, 1.0).is_err());
    }

    #[test]
    fn rejected_update_leaves_state_unchanged() {
        let mut reg = ChargeRegistry::new();
        let a = reg.add(spec(1.0, 2.0, 3e-9));
        assert!(reg.set_value(a, f64::NAN).is_err());
        assert!(reg.set_position(a, Vector2D::new(f64::INFINITY, 0.0)).is_err());
        let c = reg.get(a).unwrap();
        assert_eq!(c.value, 3e-9);
        assert_eq!(c.pos, Vector2D::new(1.0, 2.0));
    }

    #[test]
    fn spec_from_text_applies_polarity() {
        let s = ChargeSpec::from_text(Vector2D::zero(), "2.5e-9", Polarity::Negative).unwrap();
        assert_eq!(s.value(), -2.5e-9);
        assert!(ChargeSpec::from_text(Vector2D::zero(), "abc", Polarity::Positive).is_err());
    }
}
