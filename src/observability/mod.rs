//! Observability: structured logging lives in `tracing` spans emitted at the
//! call sites; this module owns the metric surface.

pub mod metrics;
