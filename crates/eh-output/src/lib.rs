//! `eh-output` — drive-trace persistence and summary metrics.
//!
//! [`TraceWriter`] writes the GNSS-like CSV trace consumed by downstream
//! map-engine tooling; [`RouteMetrics`]/[`DriveMetrics`] summarize a run
//! the way operators read it (vertex counts, route length, inferred sample
//! rate, duration).

pub mod error;
pub mod metrics;
pub mod trace;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{OutputError, OutputResult};
pub use metrics::{DriveMetrics, RouteMetrics, subsample};
pub use trace::{TRACE_HEADER, TraceWriter, save_trace};
