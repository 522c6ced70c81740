//! Polygon-mesh artifact and assembler.
//!
//! [`MeshData`] is a fully detached data object: the caller attaches it to
//! the host scene graph and disposes of whatever it replaces. Nothing here
//! mutates a live object.

use std::ops::Range;

use glam::{Mat3, Vec3};

use crate::attrib::AttribDomain;
use crate::geometry::{Geometry, PrimKind};
use crate::import::ImportOptions;
use crate::layers::map_attribute;

/// Output layer value shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerType {
    Float,
    FloatVector,
    FloatColor,
    Float2,
}

impl LayerType {
    /// Channels per element in the flattened layer buffer.
    pub fn channels(&self) -> usize {
        match self {
            LayerType::Float => 1,
            LayerType::FloatVector => 3,
            LayerType::FloatColor => 4,
            LayerType::Float2 => 2,
        }
    }
}

/// A typed output layer keyed by (domain, name).
#[derive(Clone, Debug)]
pub struct AttributeLayer {
    pub name: String,
    pub domain: AttribDomain,
    pub ty: LayerType,
    /// Flattened values, `ty.channels()` per element.
    pub data: Vec<f32>,
}

/// Loop range of one polygon into [`MeshData::loops`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolygonRange {
    pub loop_start: usize,
    pub loop_total: usize,
}

impl PolygonRange {
    fn loops(&self) -> Range<usize> {
        self.loop_start..self.loop_start + self.loop_total
    }
}

/// A detached polygon-mesh artifact.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Point positions, copied 1:1 from the source.
    pub points: Vec<Vec3>,

    /// Corner array: one point index per polygon-loop entry.
    pub loops: Vec<u32>,

    /// One loop range per polygon, in source primitive order.
    pub polygons: Vec<PolygonRange>,

    /// Attribute layers in creation order, keyed by (domain, name).
    pub layers: Vec<AttributeLayer>,

    /// Custom split normals, one per corner.
    pub split_normals: Option<Vec<Vec3>>,

    /// Material slot per polygon.
    pub material_index: Option<Vec<i32>>,

    /// Material slot names, copied across on data-slot swap.
    pub material_slots: Vec<String>,

    /// Smooth-shading flag per polygon.
    pub smooth: Vec<bool>,
}

impl MeshData {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Look up a layer by domain and name.
    pub fn layer(&self, domain: AttribDomain, name: &str) -> Option<&AttributeLayer> {
        self.layers
            .iter()
            .find(|l| l.domain == domain && l.name == name)
    }

    /// Enable smooth shading on every polygon. Prerequisite for installing
    /// custom split normals.
    pub fn set_smooth_all(&mut self) {
        self.smooth = vec![true; self.polygons.len()];
    }

    /// Install per-corner split normals.
    pub fn set_split_normals(&mut self, normals: Vec<Vec3>) {
        self.split_normals = Some(normals);
    }

    /// Install split normals given one normal per point, expanded to
    /// corners through the loop array.
    pub fn set_split_normals_from_points(&mut self, normals: &[Vec3]) {
        let per_corner = self
            .loops
            .iter()
            .map(|&p| normals[p as usize])
            .collect();
        self.split_normals = Some(per_corner);
    }

    /// Flip polygon winding globally.
    ///
    /// Reverses each polygon's loop slice and applies the same reversal to
    /// every corner-domain layer and to split normals, so corner data stays
    /// attached to its corner. Must run after split-normal installation.
    pub fn flip_winding(&mut self) {
        for i in 0..self.polygons.len() {
            let range = self.polygons[i].loops();

            self.loops[range.clone()].reverse();

            if let Some(normals) = &mut self.split_normals {
                normals[range.clone()].reverse();
            }

            for layer in &mut self.layers {
                if layer.domain == AttribDomain::Corner {
                    reverse_rows(&mut layer.data, range.clone(), layer.ty.channels());
                }
            }
        }
    }

    /// Apply the coordinate-system remap to every point position.
    pub fn transform(&mut self, m: Mat3) {
        for p in &mut self.points {
            *p = m * *p;
        }
    }
}

/// Reverse whole rows of `channels` values within `rows`, keeping channel
/// order inside each row.
fn reverse_rows(data: &mut [f32], rows: Range<usize>, channels: usize) {
    let mut lo = rows.start;
    let mut hi = rows.end;

    while hi - lo >= 2 {
        hi -= 1;
        for c in 0..channels {
            data.swap(lo * channels + c, hi * channels + c);
        }
        lo += 1;
    }
}

/// Build a [`MeshData`] from the polygon primitives of `geo`.
///
/// Points are copied 1:1; the corner array comes straight from the polygon
/// block's flattened vertex indices; attributes are mapped per domain in
/// declaration order; winding is flipped last to correct the handedness
/// mismatch between source and host conventions.
pub fn assemble_mesh(geo: &Geometry, options: &ImportOptions) -> MeshData {
    let block = geo.primitives_by_kind(&[PrimKind::Poly]);

    let mut mesh = MeshData {
        points: geo.points.clone(),
        loops: block.vertex_indices.clone(),
        ..Default::default()
    };

    mesh.polygons = block
        .vertex_start
        .iter()
        .zip(&block.vertex_count)
        .map(|(&loop_start, &loop_total)| PolygonRange {
            loop_start,
            loop_total,
        })
        .collect();
    mesh.smooth = vec![false; mesh.polygons.len()];

    for domain in [
        AttribDomain::Corner,
        AttribDomain::Point,
        AttribDomain::Primitive,
    ] {
        for attr in geo.attribs(domain) {
            // Skips are diagnostics, never fatal; no placeholder layer is
            // created for them.
            let _ = map_attribute(&mut mesh, domain, attr, options);
        }
    }

    mesh.flip_winding();

    log::debug!(
        "assembled mesh: {} points, {} loops, {} polygons, {} layers",
        mesh.point_count(),
        mesh.loop_count(),
        mesh.polygon_count(),
        mesh.layers.len()
    );

    mesh
}
