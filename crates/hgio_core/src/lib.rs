//! HGIO Core - procedural geometry import for a host 3D application.
//!
//! This crate converts an attribute-based scene-geometry description (points
//! plus loosely-typed named attributes across corner, point, and primitive
//! domains) into concrete polygon-mesh and curve artifacts:
//!
//! - **Geometry source model**: [`Geometry`], [`Attribute`], [`PrimitiveBlock`]
//! - **Codec seam**: [`GeometryCodec`] standing in for the native decoder,
//!   with [`JsonCodec`] as the bundled interchange implementation
//! - **Assemblers**: [`assemble_mesh`] and [`assemble_curves`]
//! - **Import coordinator**: [`import_geometry`]
//! - **Host-side glue**: [`SceneObject`] data-slot swap and the
//!   [`SequenceRegistry`] for frame-sequence playback
//!
//! # Example
//!
//! ```ignore
//! use hgio_core::{import_geometry, ImportOptions, JsonCodec, TargetKind};
//!
//! let artifact = import_geometry(
//!     &JsonCodec,
//!     "geo/geo.0001.json".as_ref(),
//!     TargetKind::Mesh,
//!     &ImportOptions::default(),
//! )?;
//! ```

pub mod attrib;
pub mod codec;
pub mod curve;
pub mod geometry;
pub mod import;
pub mod layers;
pub mod mesh;
pub mod scene;
pub mod sequence;

// Re-export commonly used types
pub use attrib::{AttribData, AttribDomain, AttribStore, Attribute, TypeInfo};
pub use codec::{GeometryCodec, JsonCodec, LoadError};
pub use curve::{assemble_curves, BezierPoint, CurveData, CurveError, Spline};
pub use geometry::{Geometry, PrimKind, Primitive, PrimitiveBlock};
pub use import::{import_geometry, Artifact, ImportError, ImportOptions, TargetKind};
pub use layers::{map_attribute, MapOutcome, SkipReason};
pub use mesh::{assemble_mesh, AttributeLayer, LayerType, MeshData, PolygonRange};
pub use scene::{ObjectData, SceneObject};
pub use sequence::{SequencePath, SequenceRegistry, TemplateError};
