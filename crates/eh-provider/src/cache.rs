//! Content-addressed disk cache for raster tiles.
//!
//! One file per tile at `{root}/{zoom}_{x}_{y}.png`, byte-identical to the
//! provider response.  The first fetch populates an entry; subsequent reads
//! return the stored bytes without touching the network.  Entries live for
//! the directory's filesystem lifetime — there is no eviction.
//!
//! Writes go to a temp file in the same directory and are renamed into
//! place, so concurrent writers racing on one coordinate each produce a
//! complete file and the survivor is valid.

use std::fs;
use std::path::{Path, PathBuf};

use eh_core::TileCoord;

use crate::error::{CacheError, ProviderResult};

/// Filesystem-backed mapping `TileCoord → raster bytes`.
pub struct TileCache {
    root: PathBuf,
}

impl TileCache {
    /// Open the cache rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry for `coord`, whether or not it exists yet.
    pub fn path_for(&self, coord: TileCoord) -> PathBuf {
        self.root.join(coord.cache_file_name())
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.path_for(coord).is_file()
    }

    /// Stored bytes for `coord`, or `None` when the entry is absent.
    pub fn load(&self, coord: TileCoord) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(coord);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist `bytes` for `coord` atomically (write-temp-then-rename).
    pub fn store(&self, coord: TileCoord, bytes: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(coord);
        let tmp = self
            .root
            .join(format!("{}.tmp-{}", coord.cache_file_name(), std::process::id()));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Read-through access: return the cached bytes for `coord`, calling
    /// `fetch` and persisting its result only on a miss.
    pub fn get_or_fetch<F>(&self, coord: TileCoord, fetch: F) -> ProviderResult<Vec<u8>>
    where
        F: FnOnce() -> ProviderResult<Vec<u8>>,
    {
        if let Some(bytes) = self.load(coord)? {
            return Ok(bytes);
        }
        let bytes = fetch()?;
        self.store(coord, &bytes)?;
        Ok(bytes)
    }
}
