pub mod constants;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod optimizer;
pub mod services;
pub mod strategies;
