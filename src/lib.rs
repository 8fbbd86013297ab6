pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::SettlementError;
pub use crate::core::optimizer::{OptimizerConfig, SettlementOptimizer};
pub use crate::core::services::SettlementService;
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;

#[cfg(test)]
mod tests;
