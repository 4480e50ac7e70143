//! Observability
//!
//! Structured logging setup and the helpers that keep user text and
//! credentials out of log lines.

pub mod telemetry;
