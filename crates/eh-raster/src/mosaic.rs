//! Tile-range computation and raster stitching.

use image::RgbImage;

use eh_core::{BoundingBox, TILE_SIZE, TileCoord, auto_zoom};
use eh_provider::TileBackend;

use crate::error::RasterResult;

// ── Mosaic ────────────────────────────────────────────────────────────────────

/// A stitched raster covering a rectangular tile range at one zoom level.
pub struct Mosaic {
    pub image: RgbImage,
    pub zoom: u8,
    /// Inclusive tile-index range along x.
    pub x_range: (u32, u32),
    /// Inclusive tile-index range along y.
    pub y_range: (u32, u32),
}

impl Mosaic {
    pub fn width_px(&self) -> u32 {
        self.image.width()
    }

    pub fn height_px(&self) -> u32 {
        self.image.height()
    }

    /// Geographic extent of the raster: the union of its tile extents.
    /// Always contains the bounding box the mosaic was assembled for.
    pub fn extent(&self) -> BoundingBox {
        let nw = TileCoord { zoom: self.zoom, x: self.x_range.0, y: self.y_range.0 }.nw_corner();
        let se = TileCoord { zoom: self.zoom, x: self.x_range.1, y: self.y_range.1 }.se_corner();
        BoundingBox {
            min_lat: se.lat,
            min_lon: nw.lon,
            max_lat: nw.lat,
            max_lon: se.lon,
        }
    }
}

// ── Assembler ─────────────────────────────────────────────────────────────────

/// Assembles mosaics from any [`TileBackend`] (the cache-backed provider
/// client in production, canned tiles in tests).
pub struct MosaicAssembler<'t, T> {
    tiles: &'t T,
}

impl<'t, T: TileBackend> MosaicAssembler<'t, T> {
    pub fn new(tiles: &'t T) -> Self {
        Self { tiles }
    }

    /// Stitch the mosaic covering `bbox`.
    ///
    /// `zoom` is validated against the tile pyramid's maximum when given;
    /// otherwise it is auto-selected from the box extent.  Tiles are
    /// fetched in row-major order and pasted at
    /// `((x − x_min)·256, (y − y_min)·256)`; fetch order is irrelevant to
    /// the result, the paste offsets are.
    ///
    /// # Errors
    ///
    /// [`RasterError::Invalid`](crate::RasterError::Invalid) for zoom > 19;
    /// [`RasterError::Provider`](crate::RasterError::Provider) when any
    /// tile fetch fails (the whole mosaic is abandoned).
    pub fn assemble(&self, bbox: &BoundingBox, zoom: Option<u8>) -> RasterResult<Mosaic> {
        let zoom = match zoom {
            Some(z) => TileCoord::validate_zoom(z)?,
            None => auto_zoom(bbox),
        };

        let nw = bbox.top_left();
        let se = bbox.bottom_right();
        let t_nw = TileCoord::from_deg(nw.lat, nw.lon, zoom);
        let t_se = TileCoord::from_deg(se.lat, se.lon, zoom);
        let (x_min, x_max) = (t_nw.x, t_se.x);
        let (y_min, y_max) = (t_nw.y, t_se.y);

        let width = (x_max - x_min + 1) * TILE_SIZE;
        let height = (y_max - y_min + 1) * TILE_SIZE;
        let mut image = RgbImage::new(width, height);

        for x in x_min..=x_max {
            for y in y_min..=y_max {
                let tile = self.tiles.tile(TileCoord { zoom, x, y })?;
                image::imageops::replace(
                    &mut image,
                    &tile,
                    ((x - x_min) * TILE_SIZE) as i64,
                    ((y - y_min) * TILE_SIZE) as i64,
                );
            }
        }

        Ok(Mosaic {
            image,
            zoom,
            x_range: (x_min, x_max),
            y_range: (y_min, y_max),
        })
    }
}
