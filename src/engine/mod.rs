// engine/mod.rs
// Re-exports for the engine state object and its read-only snapshot

mod engine;
mod snapshot;

pub use engine::Engine;
pub use snapshot::{ForceReadout, Snapshot};

#[cfg(test)]
mod tests;
