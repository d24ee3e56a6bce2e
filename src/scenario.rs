// scenario.rs
// Builds an engine from a loaded scene description

use log::info;

use crate::charge::ChargeSpec;
use crate::engine::Engine;
use crate::error::ConfigError;
use crate::init_config::{InitConfig, RandomChargesConfig};
use crate::vector::Vector2D;

/// Create an engine sized and tuned by `init`, then populate it.
pub fn build_engine(init: &InitConfig) -> Result<Engine, ConfigError> {
    let mut engine = Engine::new(init.engine_config()?)?;
    apply_configuration(init, &mut engine)?;
    Ok(engine)
}

/// Add the scene's charges and particles to an existing engine.
///
/// Every entry is validated first, so on error the engine is untouched.
pub fn apply_configuration(init: &InitConfig, engine: &mut Engine) -> Result<(), ConfigError> {
    let charges = init
        .charges
        .iter()
        .map(|c| c.to_spec())
        .collect::<Result<Vec<_>, _>>()?;
    let launches = init
        .particles
        .iter()
        .map(|p| p.to_launch())
        .collect::<Result<Vec<_>, _>>()?;
    let mut random = Vec::new();
    for cfg in &init.random_charges {
        random.extend(random_charges(cfg, engine.canvas().width, engine.canvas().height)?);
    }

    for spec in charges.into_iter().chain(random) {
        engine.add_charge_spec(spec);
    }
    for launch in launches {
        engine.launch_particle(launch);
    }
    info!(
        "scene applied: {} charges, {} particles on a {}x{} canvas",
        engine.charges().len(),
        engine.particles().len(),
        engine.canvas().width,
        engine.canvas().height
    );
    Ok(())
}

/// Uniformly scattered charges inside the canvas.
pub fn random_charges(cfg: &RandomChargesConfig, width: f64, height: f64) -> Result<Vec<ChargeSpec>, ConfigError> {
    cfg.validate()?;
    let mut rng = match cfg.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    (0..cfg.count)
        .map(|_| {
            let pos = Vector2D::new(rng.f64() * width, rng.f64() * height);
            let magnitude = cfg.min_magnitude + rng.f64() * (cfg.max_magnitude - cfg.min_magnitude);
            let value = if cfg.mixed_polarity && rng.bool() { -magnitude } else { magnitude };
            Ok(ChargeSpec::new(pos, value)?)
        })
        .collect()
}
