// charge/mod.rs
// Re-exports for the charge module

mod registry;
mod types;

pub use registry::ChargeRegistry;
pub use types::*;

#[cfg(test)]
mod tests;
