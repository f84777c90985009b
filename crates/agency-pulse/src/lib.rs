pub mod config;
pub mod error;
pub mod performance;
pub mod telemetry;
