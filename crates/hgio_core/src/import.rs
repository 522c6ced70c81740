//! Import coordinator: the single entry point of the pipeline.
//!
//! Loads the geometry source through a codec, dispatches to the mesh or
//! curve assembler based on the target's structural kind, applies the fixed
//! coordinate-system conversion, and returns a fully detached artifact.
//! One call processes one file on the caller's thread; failures are explicit
//! result values and never leave a half-built artifact behind.

use std::path::Path;

use thiserror::Error;

use crate::codec::{GeometryCodec, LoadError};
use crate::curve::{assemble_curves, CurveData, CurveError};
use crate::mesh::{assemble_mesh, MeshData};

/// Per-call import options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Bypass custom-normal reconstruction entirely (neither read nor
    /// installed). A cost-saving toggle for repeated sequence imports;
    /// never alters topology or non-normal layers.
    pub skip_normals: bool,
}

impl ImportOptions {
    /// Defaults used for frame-sequence playback.
    pub fn sequence_playback() -> Self {
        Self { skip_normals: true }
    }
}

/// Structural kind of the target object's data slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Mesh,
    Curve,
    /// Anything that is neither mesh- nor curve-compatible.
    Other,
}

/// A finished, detached import artifact.
#[derive(Clone, Debug)]
pub enum Artifact {
    Mesh(MeshData),
    Curve(CurveData),
}

impl Artifact {
    pub fn kind(&self) -> TargetKind {
        match self {
            Artifact::Mesh(_) => TargetKind::Mesh,
            Artifact::Curve(_) => TargetKind::Curve,
        }
    }

    fn to_host_space(&mut self) {
        let m = hgio_math::source_to_host();
        match self {
            Artifact::Mesh(mesh) => mesh.transform(m),
            Artifact::Curve(curves) => curves.transform(m),
        }
    }
}

/// Errors returned by [`import_geometry`].
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to load geometry source: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("target kind {0:?} is neither mesh- nor curve-compatible")]
    UnsupportedTarget(TargetKind),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Import one geometry file into a detached artifact for `target`.
///
/// The load is the only external I/O; on failure nothing else happens and
/// the caller's existing geometry stays untouched. An unsupported target
/// kind produces no artifact and is meant to be treated as a no-op.
pub fn import_geometry(
    codec: &dyn GeometryCodec,
    path: &Path,
    target: TargetKind,
    options: &ImportOptions,
) -> ImportResult<Artifact> {
    let geo = codec.load(path)?;

    let mut artifact = match target {
        TargetKind::Mesh => Artifact::Mesh(assemble_mesh(&geo, options)),
        TargetKind::Curve => Artifact::Curve(assemble_curves(&geo)?),
        TargetKind::Other => return Err(ImportError::UnsupportedTarget(target)),
    };

    artifact.to_host_space();

    log::info!("imported {} as {:?}", path.display(), artifact.kind());

    Ok(artifact)
}
