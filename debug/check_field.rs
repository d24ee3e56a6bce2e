// Prints field, force and field-line numbers for a few hand-checkable layouts.

use efield_sim::engine::Engine;
use efield_sim::vector::Vector2D;

fn main() {
    let mut engine = Engine::default();

    println!("Single +1nC charge at (400, 300):");
    let q = engine
        .add_charge(Vector2D::new(400.0, 300.0), 1.0e-9)
        .expect("valid charge");
    for d in [10.0, 50.0, 100.0] {
        let e = engine.field_at(Vector2D::new(400.0 + d, 300.0));
        println!("  E at +{d:>5} px: {:.4e} (expected {:.4e})", e.x, 8.99e9 * 1.0e-9 / (d * d));
    }

    println!("\nDipole: add -1nC at (600, 300)");
    let neg = engine
        .add_charge(Vector2D::new(600.0, 300.0), -1.0e-9)
        .expect("valid charge");
    for id in [q, neg] {
        let f = engine.force_readout(id).expect("known charge");
        println!("  force on {id}: {:.4e} N at {:.1} deg", f.magnitude, f.direction_degrees);
    }

    let line = engine.trace_field_line(q, 0).expect("line 0");
    let end = line.last().copied().unwrap_or(Vector2D::zero());
    println!("  line 0 from {q}: {} points, ends at ({:.1}, {:.1})", line.len(), end.x, end.y);

    println!("\nParticle released at rest from (500, 250):");
    engine
        .launch_particle_with(Some(Vector2D::new(500.0, 250.0)), 1.0e-10, 1.0e-15, Vector2D::zero())
        .expect("valid launch");
    for _ in 0..5 {
        engine.step().expect("configured time step");
        let p = &engine.particles()[0];
        println!(
            "  t={:.2}s pos=({:.3}, {:.3}) vel=({:.3e}, {:.3e})",
            engine.time, p.pos.x, p.pos.y, p.vel.x, p.vel.y
        );
    }
}
