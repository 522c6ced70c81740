//! Loader seam between the import pipeline and the on-disk format.
//!
//! The proprietary binary format is owned by an external, version-locked
//! decoder; this crate only consumes the [`Geometry`] it produces. The
//! [`GeometryCodec`] trait is that seam. [`JsonCodec`] is the bundled
//! implementation over the serde interchange form of [`Geometry`], used by
//! the CLI and by tests.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::geometry::Geometry;

/// Errors that can occur while loading a geometry source file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A decoder that turns a file path into an in-memory [`Geometry`].
pub trait GeometryCodec {
    fn load(&self, path: &Path) -> LoadResult<Geometry>;
}

/// JSON interchange codec over the serde form of [`Geometry`].
pub struct JsonCodec;

impl GeometryCodec for JsonCodec {
    fn load(&self, path: &Path) -> LoadResult<Geometry> {
        let content = fs::read_to_string(path)?;
        let geo: Geometry = serde_json::from_str(&content)?;

        log::debug!(
            "loaded {} points, {} primitives from {}",
            geo.point_count(),
            geo.prim_count(),
            path.display()
        );

        Ok(geo)
    }
}
