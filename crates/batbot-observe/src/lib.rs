//! Observability setup for batbot: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
