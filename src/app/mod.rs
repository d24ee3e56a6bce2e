// app/mod.rs
// Command-line entry: load a scene, run it, write a JSON report.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::charge::ChargeId;
use crate::engine::{Engine, ForceReadout, Snapshot};
use crate::field::FieldSample;
use crate::init_config::{self, InitConfig};
use crate::scenario;

pub mod engine_loop;

pub use engine_loop::{EngineHandle, FieldLineCache};

#[derive(Parser, Debug)]
#[command(name = "efield_sim", version, about = "2D electrostatics: fields, forces, particles and field lines")]
pub struct Args {
    /// Scene file. Falls back to init_config.toml when present, else an empty scene.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Number of time steps to run.
    #[arg(short, long, default_value_t = 100)]
    pub steps: usize,
    /// Override the configured time step.
    #[arg(long)]
    pub dt: Option<f64>,
    /// Report destination; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Include traced field lines in the report.
    #[arg(long)]
    pub field_lines: bool,
    /// Include the field vector grid in the report.
    #[arg(long)]
    pub grid: bool,
    /// Drive the engine on its own thread at wall-clock pace instead of stepping directly.
    #[arg(long)]
    pub realtime: bool,
    /// Rayon worker threads.
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Final state plus the derived quantities a viewer would show.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Frames the engine actually advanced.
    pub steps: usize,
    pub snapshot: Snapshot,
    pub forces: Vec<(ChargeId, ForceReadout)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_grid: Vec<FieldSample>,
}

impl RunReport {
    pub fn collect(engine: &Engine, field_lines: bool, grid: bool) -> Self {
        let mut snapshot = Snapshot::capture(engine);
        if field_lines {
            snapshot = snapshot.with_field_lines(engine.all_field_lines());
        }
        let forces = engine
            .charges()
            .iter()
            .filter_map(|c| engine.force_readout(c.id).ok().map(|f| (c.id, f)))
            .collect();
        let field_grid = if grid { engine.field_grid() } else { Vec::new() };
        Self { steps: engine.frame, snapshot, forces, field_grid }
    }
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(crate::config::MIN_THREADS)
            .max(crate::config::MIN_THREADS)
            - crate::config::THREADS_LEAVE_FREE
    });
    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        warn!("could not size the rayon pool: {e}");
    }

    let init = load_scene(args.config.as_deref())?;
    let mut engine = scenario::build_engine(&init).context("failed to build the scene")?;

    let dt = args.dt.unwrap_or(engine.config().time_step);
    if !(dt.is_finite() && dt > 0.0) {
        bail!("--dt must be positive and finite, got {dt}");
    }

    info!("running {} steps with dt = {dt}", args.steps);
    let engine = if args.realtime {
        run_realtime(engine, args.steps, dt)?
    } else {
        run_headless(&mut engine, args.steps, dt)?;
        engine
    };

    let report = RunReport::collect(&engine, args.field_lines, args.grid);
    write_report(&report, args.output.as_deref())?;
    #[cfg(feature = "profiling")]
    crate::PROFILER.lock().log_and_clear(engine.frame);
    Ok(())
}

fn load_scene(path: Option<&Path>) -> Result<InitConfig> {
    match path {
        Some(path) => InitConfig::load_from_file(path)
            .with_context(|| format!("failed to load scene {}", path.display())),
        None if Path::new(init_config::DEFAULT_PATH).exists() => {
            info!("loading {}", init_config::DEFAULT_PATH);
            InitConfig::load_default().context("failed to load the default scene")
        }
        None => {
            info!("no scene file, starting empty");
            Ok(InitConfig::default())
        }
    }
}

/// Step directly on this thread, applying the trajectory limit like the engine thread does.
pub fn run_headless(engine: &mut Engine, steps: usize, dt: f64) -> Result<()> {
    let limit = engine.config().trajectory_limit;
    for _ in 0..steps {
        engine.advance(dt)?;
        if let Some(limit) = limit {
            engine.trim_trajectories(limit);
        }
    }
    Ok(())
}

fn run_realtime(mut engine: Engine, steps: usize, dt: f64) -> Result<Engine> {
    if engine.particles().is_empty() {
        warn!("no particles to move; the engine thread idles while there is nothing to advance");
        return Ok(engine);
    }
    engine.set_time_step(dt)?;
    let target = engine.frame + steps;
    // The engine thread stops itself at the target frame.
    engine.set_frame_limit(Some(target));
    let handle = EngineHandle::spawn_realtime(engine);
    while handle.snapshot().frame < target {
        if handle.is_finished() {
            bail!("engine thread stopped before frame {target}");
        }
        std::thread::sleep(Duration::from_secs_f64(dt));
    }
    let mut engine = handle.shutdown().context("engine thread panicked")?;
    engine.set_frame_limit(None);
    Ok(engine)
}

fn write_report(report: &RunReport, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.flush()?;
            info!("report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, report)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}
