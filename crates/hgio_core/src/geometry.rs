//! In-memory geometry source model.
//!
//! A [`Geometry`] is what the external decoder hands us: point positions,
//! per-domain attribute lists in declaration order, and a primitive table.
//! It is loaded once per import call and discarded after assembly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::attrib::{AttribDomain, Attribute};

/// Primitive kinds understood by the assemblers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimKind {
    Poly,
    NurbsCurve,
    BezierCurve,
}

/// A single primitive: a contiguous run of vertices into the point array.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimKind,
    /// Indices into [`Geometry::points`].
    pub vertices: Vec<u32>,
    pub closed: bool,
}

/// Attribute-based scene geometry as produced by the decoder.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub points: Vec<Vec3>,
    pub prims: Vec<Primitive>,
    pub corner_attribs: Vec<Attribute>,
    pub point_attribs: Vec<Attribute>,
    pub prim_attribs: Vec<Attribute>,
}

/// Restricted, flattened view over primitives of requested kinds.
///
/// Parallel arrays: `vertex_start[i]..vertex_start[i] + vertex_count[i]`
/// indexes into `vertex_indices` for primitive `i`.
#[derive(Clone, Debug, Default)]
pub struct PrimitiveBlock {
    pub vertex_indices: Vec<u32>,
    pub vertex_start: Vec<usize>,
    pub vertex_count: Vec<usize>,
    pub kinds: Vec<PrimKind>,
    pub closed: Vec<bool>,
}

impl PrimitiveBlock {
    pub fn prim_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Vertex indices of primitive `i`.
    pub fn vertex_slice(&self, i: usize) -> &[u32] {
        let start = self.vertex_start[i];
        &self.vertex_indices[start..start + self.vertex_count[i]]
    }
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }

    /// Total vertex (corner) count across all primitives.
    pub fn corner_count(&self) -> usize {
        self.prims.iter().map(|p| p.vertices.len()).sum()
    }

    /// Append a primitive and return its index.
    pub fn add_prim(&mut self, kind: PrimKind, vertices: Vec<u32>, closed: bool) -> usize {
        self.prims.push(Primitive {
            kind,
            vertices,
            closed,
        });
        self.prims.len() - 1
    }

    /// Append an attribute to the given domain, preserving declaration order.
    pub fn add_attrib(&mut self, domain: AttribDomain, attr: Attribute) {
        match domain {
            AttribDomain::Corner => self.corner_attribs.push(attr),
            AttribDomain::Point => self.point_attribs.push(attr),
            AttribDomain::Primitive => self.prim_attribs.push(attr),
        }
    }

    /// Attributes declared on the given domain, in declaration order.
    pub fn attribs(&self, domain: AttribDomain) -> &[Attribute] {
        match domain {
            AttribDomain::Corner => &self.corner_attribs,
            AttribDomain::Point => &self.point_attribs,
            AttribDomain::Primitive => &self.prim_attribs,
        }
    }

    /// Flattened view over primitives whose kind is in `kinds`, in source
    /// primitive order.
    pub fn primitives_by_kind(&self, kinds: &[PrimKind]) -> PrimitiveBlock {
        let mut block = PrimitiveBlock::default();

        for prim in &self.prims {
            if !kinds.contains(&prim.kind) {
                continue;
            }

            block.vertex_start.push(block.vertex_indices.len());
            block.vertex_count.push(prim.vertices.len());
            block.vertex_indices.extend_from_slice(&prim.vertices);
            block.kinds.push(prim.kind);
            block.closed.push(prim.closed);
        }

        block
    }
}
