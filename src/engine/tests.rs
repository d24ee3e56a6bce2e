// engine/tests.rs
// End-to-end behaviour of the engine facade: mutations, selection, queries and ticks

#[cfg(test)]
mod mutations {
    use crate::charge::ChargeId;
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::error::EngineError;
    use crate::vector::Vector2D;

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EngineConfig { width: -1.0, ..Default::default() };
        assert!(Engine::new(cfg).is_err());
    }

    #[test]
    fn add_rejects_non_finite_value_without_side_effects() {
        let mut engine = Engine::default();
        let version = engine.charges_version();
        let err = engine.add_charge(Vector2D::new(10.0, 10.0), f64::NAN).unwrap_err();
        assert!(matches!(err, EngineError::NonFinite { .. }));
        assert!(engine.charges().is_empty());
        assert_eq!(engine.charges_version(), version);
    }

    #[test]
    fn nan_charge_request_never_reaches_the_engine() {
        use crate::charge::{ChargeSpec, Polarity};
        assert!(ChargeSpec::new(Vector2D::new(1.0, 1.0), f64::NAN).is_err());
        assert!(ChargeSpec::from_text(Vector2D::new(1.0, 1.0), "NaN", Polarity::Positive).is_err());

        let mut engine = Engine::default();
        let spec = ChargeSpec::new(Vector2D::new(1.0, 1.0), 1.0e-9).unwrap();
        engine.add_charge_spec(spec);
        let e = engine.field_at(Vector2D::new(100.0, 100.0));
        assert!(e.x.is_finite() && e.y.is_finite());
    }

    #[test]
    fn removing_the_selected_charge_clears_selection() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(100.0, 100.0), 1.0e-9).unwrap();
        let b = engine.add_charge(Vector2D::new(300.0, 100.0), -1.0e-9).unwrap();
        engine.select(Some(a)).unwrap();
        engine.remove_charge(b).unwrap();
        assert_eq!(engine.selected(), Some(a));
        engine.remove_charge(a).unwrap();
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn clear_charges_drops_selection() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(100.0, 100.0), 1.0e-9).unwrap();
        engine.select(Some(a)).unwrap();
        engine.clear_charges();
        assert!(engine.charges().is_empty());
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn selecting_an_unknown_charge_fails() {
        let mut engine = Engine::default();
        assert_eq!(
            engine.select(Some(ChargeId(7))).unwrap_err(),
            EngineError::UnknownCharge(ChargeId(7))
        );
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn select_at_picks_or_clears() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(100.0, 100.0), 1.0e-9).unwrap();
        assert_eq!(engine.select_at(Vector2D::new(108.0, 100.0)), Some(a));
        assert_eq!(engine.select_at(Vector2D::new(400.0, 400.0)), None);
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn every_charge_mutation_bumps_the_version() {
        let mut engine = Engine::default();
        let v0 = engine.charges_version();
        let a = engine.add_charge(Vector2D::new(1.0, 1.0), 1.0e-9).unwrap();
        engine.set_charge_value(a, 2.0e-9).unwrap();
        engine.set_charge_position(a, Vector2D::new(2.0, 2.0)).unwrap();
        engine.remove_charge(a).unwrap();
        assert_eq!(engine.charges_version(), v0 + 4);
    }

    #[test]
    fn bounds_must_be_positive() {
        let mut engine = Engine::default();
        assert!(engine.set_bounds(0.0, 100.0).is_err());
        assert_eq!(engine.canvas().width, 800.0);
        engine.set_bounds(1024.0, 768.0).unwrap();
        assert_eq!(engine.canvas().center(), Vector2D::new(512.0, 384.0));
    }
}

#[cfg(test)]
mod queries {
    use crate::charge::ChargeId;
    use crate::engine::{Engine, Snapshot};
    use crate::error::EngineError;
    use crate::vector::Vector2D;

    #[test]
    fn field_at_uses_the_current_charge_set() {
        let mut engine = Engine::default();
        engine.add_charge(Vector2D::new(100.0, 100.0), 1.0e-9).unwrap();
        let e = engine.field_at(Vector2D::new(110.0, 100.0));
        assert!((e.x - 0.0899).abs() < 1e-6 && e.y.abs() < 1e-12);
    }

    #[test]
    fn force_readout_reports_heading() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(100.0, 100.0), 1.0e-9).unwrap();
        engine.add_charge(Vector2D::new(100.0, 110.0), 1.0e-9).unwrap();
        // B sits at +y, so like-sign repulsion pushes A towards -y.
        let r = engine.force_readout(a).unwrap();
        assert!((r.direction_degrees - 270.0).abs() < 1e-9);
        assert!((r.magnitude - 8.99e9 * 1.0e-18 / 100.0).abs() < 1e-20);
    }

    #[test]
    fn net_force_on_unknown_charge_is_an_error() {
        let engine = Engine::default();
        assert_eq!(
            engine.net_force_on(ChargeId(3)).unwrap_err(),
            EngineError::UnknownCharge(ChargeId(3))
        );
    }

    #[test]
    fn trace_field_line_checks_the_index() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(400.0, 300.0), 1.0e-9).unwrap();
        let count = engine.config().field_line_count;
        assert!(engine.trace_field_line(a, count - 1).is_ok());
        assert_eq!(
            engine.trace_field_line(a, count).unwrap_err(),
            EngineError::LineIndexOutOfRange { index: count, count }
        );
    }

    #[test]
    fn field_lines_for_matches_all_field_lines() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(300.0, 300.0), 1.0e-9).unwrap();
        engine.add_charge(Vector2D::new(500.0, 300.0), -1.0e-9).unwrap();
        let mine = engine.field_lines_for(a).unwrap();
        let all = engine.all_field_lines();
        assert_eq!(all.len(), 2 * engine.config().field_line_count);
        for line in &mine {
            let twin = all
                .iter()
                .find(|l| l.charge == a && l.index == line.index)
                .unwrap();
            assert_eq!(twin.points, line.points);
        }
    }

    #[test]
    fn snapshot_carries_selected_force() {
        let mut engine = Engine::default();
        let a = engine.add_charge(Vector2D::new(100.0, 100.0), 1.0e-9).unwrap();
        engine.add_charge(Vector2D::new(120.0, 100.0), -1.0e-9).unwrap();
        engine.select(Some(a)).unwrap();
        let snap = Snapshot::capture(&engine);
        assert_eq!(snap.charges.len(), 2);
        let force = snap.selected_force.unwrap();
        assert!(force.force.x > 0.0, "attraction towards +x expected");
        assert!(snap.field_lines.is_empty());
    }
}

#[cfg(test)]
mod ticks {
    use crate::engine::Engine;
    use crate::error::EngineError;
    use crate::vector::Vector2D;

    #[test]
    fn launch_defaults_to_canvas_centre() {
        let mut engine = Engine::default();
        let id = engine
            .launch_particle_with(None, 1.0e-10, 1.0e-15, Vector2D::zero())
            .unwrap();
        let p = engine.particles().iter().find(|p| p.id == id).unwrap();
        assert_eq!(p.pos, Vector2D::new(400.0, 300.0));
        assert_eq!(p.trajectory, vec![p.pos]);
    }

    #[test]
    fn rejected_launch_creates_nothing() {
        let mut engine = Engine::default();
        let err = engine
            .launch_particle_with(None, 1.0e-10, 0.0, Vector2D::zero())
            .unwrap_err();
        assert_eq!(err, EngineError::NonPositiveMass(0.0));
        assert!(engine.particles().is_empty());
        assert!(!engine.is_running());
    }

    #[test]
    fn advance_steps_each_particle_once() {
        let mut engine = Engine::default();
        engine.add_charge(Vector2D::new(200.0, 300.0), 1.0e-9).unwrap();
        engine.launch_particle_with(None, 1.0e-10, 1.0e-15, Vector2D::zero()).unwrap();
        engine
            .launch_particle_with(Some(Vector2D::new(100.0, 100.0)), -1.0e-10, 1.0e-15, Vector2D::new(5.0, 0.0))
            .unwrap();
        for _ in 0..3 {
            engine.advance(0.001).unwrap();
        }
        assert_eq!(engine.frame, 3);
        assert!(engine.trajectories().all(|(_, t)| t.len() == 4));
    }

    #[test]
    fn advance_rejects_bad_time_step() {
        let mut engine = Engine::default();
        assert_eq!(engine.advance(0.0).unwrap_err(), EngineError::InvalidTimeStep(0.0));
        assert!(engine.advance(f64::NAN).is_err());
        assert_eq!(engine.frame, 0);
    }

    #[test]
    fn particles_stay_inside_the_canvas() {
        let mut engine = Engine::default();
        engine.add_charge(Vector2D::new(400.0, 300.0), 5.0e-9).unwrap();
        engine
            .launch_particle_with(Some(Vector2D::new(420.0, 310.0)), 1.0e-10, 1.0e-15, Vector2D::new(-300.0, 200.0))
            .unwrap();
        for _ in 0..200 {
            engine.step().unwrap();
            let p = &engine.particles()[0];
            assert!(engine.canvas().contains(p.pos), "escaped to {:?}", p.pos);
        }
    }

    #[test]
    fn pause_and_clear_stop_the_loop() {
        let mut engine = Engine::default();
        engine.launch_particle_with(None, 1.0e-10, 1.0e-15, Vector2D::zero()).unwrap();
        assert!(engine.is_running());
        engine.set_paused(true);
        assert!(!engine.is_running());
        engine.set_paused(false);
        engine.clear_particles();
        assert!(!engine.is_running());
    }

    #[test]
    fn trim_trajectories_keeps_the_newest_points() {
        let mut engine = Engine::default();
        engine.launch_particle_with(None, 0.0, 1.0, Vector2D::new(10.0, 0.0)).unwrap();
        for _ in 0..10 {
            engine.step().unwrap();
        }
        engine.trim_trajectories(3);
        let t = &engine.particles()[0].trajectory;
        assert_eq!(t.len(), 3);
        assert_eq!(*t.last().unwrap(), engine.particles()[0].pos);
    }

    #[test]
    fn set_time_step_changes_step_size() {
        let mut engine = Engine::default();
        assert!(engine.set_time_step(-0.1).is_err());
        engine.set_time_step(0.5).unwrap();
        engine.step().unwrap();
        assert_eq!(engine.time, 0.5);
    }

    #[test]
    fn frame_limit_ends_the_run() {
        let mut engine = Engine::default();
        engine.launch_particle_with(None, 1.0e-10, 1.0e-15, Vector2D::zero()).unwrap();
        engine.set_frame_limit(Some(2));
        while engine.is_running() {
            engine.step().unwrap();
        }
        assert_eq!(engine.frame, 2);
        engine.set_frame_limit(None);
        assert!(engine.is_running());
    }
}
