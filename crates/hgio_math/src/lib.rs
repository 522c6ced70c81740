//! Math types for the geometry import pipeline.
//!
//! Re-exports [`glam`] and adds the fixed source-to-host coordinate
//! conversion applied to every imported artifact.

pub use glam::*;

mod convert;
pub use convert::{source_to_host, to_host_point};
