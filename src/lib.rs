pub mod app;
pub mod canvas;
pub mod charge;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod init_config;
pub mod particle;
pub mod profiler;
pub mod scenario;
pub mod vector;

pub use engine::{Engine, ForceReadout, Snapshot};
pub use error::{ConfigError, EngineError};
pub use vector::{Vector2D, VectorExt};

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
