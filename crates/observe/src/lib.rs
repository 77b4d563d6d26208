//! Observability plumbing shared by the workspace: initialization logic for
//! logging and for the global metrics registry.
pub mod metrics;
pub mod tracing;
