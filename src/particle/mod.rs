// particle/mod.rs
// Re-exports for test particles and their integrator

mod integrator;
mod types;

pub use integrator::{advance_all, reflect_axis, step};
pub use types::*;
