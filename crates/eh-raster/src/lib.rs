//! `eh-raster` — deterministic tile-mosaic assembly.
//!
//! Given a bounding box and a zoom level (caller-supplied or
//! auto-selected), compute the rectangle of slippy tiles covering the box,
//! fetch each tile through the cache-backed provider, and paste them into
//! one RGB raster.  The mosaic's geographic extent is the union of the
//! tile extents, which always contains the requested box.

pub mod error;
pub mod mosaic;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RasterError, RasterResult};
pub use mosaic::{Mosaic, MosaicAssembler};
