//! `eh-route` — from waypoints to a continuous polyline to a virtual drive.
//!
//! Two stages:
//!
//! 1. [`RouteBuilder`] stitches per-leg provider polylines into one
//!    [`Route`] with attached elevations, de-duplicating the join vertex
//!    between consecutive legs.
//! 2. [`DriveSampler`] walks the polyline at a constant ground speed and
//!    sampling frequency, yielding uniformly time-spaced [`DriveSample`]s
//!    and carrying leftover arc length across polyline vertices.
//!
//! The sampler is a lazy pull iterator — nothing is materialized until the
//! caller drains it, so arbitrarily long drives stream in constant memory.

pub mod builder;
pub mod error;
pub mod resample;
pub mod route;
pub mod sample;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::RouteBuilder;
pub use error::{RouteError, RouteResult};
pub use resample::DriveSampler;
pub use route::Route;
pub use sample::{DEFAULT_EPOCH_S, DriveConfig, DriveSample};
