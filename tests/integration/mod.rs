//! Integration tests with mock HTTP server

pub mod synthesize;
pub mod telemetry;
