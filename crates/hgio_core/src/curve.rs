//! Curve artifact and assembler.
//!
//! One output spline per NURBS or Bezier primitive. NURBS control points
//! carry a homogeneous weight; Bezier control points are decoded from a
//! flattened triple encoding (left-handle, anchor, right-handle per logical
//! point, with the first left and last right handle omitted on open curves).

use glam::{Mat3, Vec3, Vec4};
use thiserror::Error;

use crate::geometry::{Geometry, PrimKind};

/// Fixed spline order (cubic).
pub const CURVE_ORDER: u32 = 4;

/// Errors from curve assembly.
#[derive(Error, Debug)]
pub enum CurveError {
    #[error(
        "bezier primitive {prim} has {vertex_count} vertices, \
         which is not a valid triple encoding"
    )]
    MalformedBezier { prim: usize, vertex_count: usize },
}

/// One Bezier control point: anchor plus two handle positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierPoint {
    pub left: Vec3,
    pub co: Vec3,
    pub right: Vec3,
}

/// An output spline.
#[derive(Clone, Debug)]
pub enum Spline {
    Nurbs {
        /// Control points, xyz plus homogeneous weight.
        points: Vec<Vec4>,
        closed: bool,
        order: u32,
    },
    Bezier {
        points: Vec<BezierPoint>,
        closed: bool,
        order: u32,
    },
}

impl Spline {
    pub fn closed(&self) -> bool {
        match self {
            Spline::Nurbs { closed, .. } | Spline::Bezier { closed, .. } => *closed,
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Spline::Nurbs { points, .. } => points.len(),
            Spline::Bezier { points, .. } => points.len(),
        }
    }

    /// Whether the spline parameterization interpolates its endpoints.
    /// Closed NURBS curves are cyclic (no endpoint clamping); everything
    /// else interpolates.
    pub fn endpoint_interpolation(&self) -> bool {
        match self {
            Spline::Nurbs { closed, .. } => !closed,
            Spline::Bezier { .. } => true,
        }
    }
}

/// A detached curve artifact: ordered splines.
#[derive(Clone, Debug, Default)]
pub struct CurveData {
    pub splines: Vec<Spline>,
}

impl CurveData {
    pub fn spline_count(&self) -> usize {
        self.splines.len()
    }

    /// Apply the coordinate-system remap to every control point and handle
    /// position. NURBS weights are untouched.
    pub fn transform(&mut self, m: Mat3) {
        for spline in &mut self.splines {
            match spline {
                Spline::Nurbs { points, .. } => {
                    for p in points {
                        let pos = m * p.truncate();
                        *p = pos.extend(p.w);
                    }
                }
                Spline::Bezier { points, .. } => {
                    for p in points {
                        p.left = m * p.left;
                        p.co = m * p.co;
                        p.right = m * p.right;
                    }
                }
            }
        }
    }
}

/// Build a [`CurveData`] from the NURBS and Bezier primitives of `geo`,
/// one spline per primitive in source order.
pub fn assemble_curves(geo: &Geometry) -> Result<CurveData, CurveError> {
    let block = geo.primitives_by_kind(&[PrimKind::NurbsCurve, PrimKind::BezierCurve]);

    let mut splines = Vec::with_capacity(block.prim_count());

    for i in 0..block.prim_count() {
        let closed = block.closed[i];

        // Resolve the raw position slice through the shared index buffer.
        let pos: Vec<Vec3> = block
            .vertex_slice(i)
            .iter()
            .map(|&ix| geo.points[ix as usize])
            .collect();

        match block.kinds[i] {
            PrimKind::NurbsCurve => {
                let points = pos.iter().map(|p| p.extend(1.0)).collect();
                splines.push(Spline::Nurbs {
                    points,
                    closed,
                    order: CURVE_ORDER,
                });
            }
            PrimKind::BezierCurve => {
                let points = decode_bezier(&pos, closed).ok_or(CurveError::MalformedBezier {
                    prim: i,
                    vertex_count: pos.len(),
                })?;
                splines.push(Spline::Bezier {
                    points,
                    closed,
                    order: CURVE_ORDER,
                });
            }
            PrimKind::Poly => continue,
        }
    }

    log::debug!("assembled {} splines", splines.len());

    Ok(CurveData { splines })
}

/// Decode the flattened Bezier triple encoding.
///
/// Closed curves carry the full `3N` positions and wrap; open curves omit
/// the very first left handle and very last right handle (`3N - 2`
/// positions), so the end anchors get degenerate zero-length handles.
/// Returns `None` when the vertex count fits neither encoding.
fn decode_bezier(pos: &[Vec3], closed: bool) -> Option<Vec<BezierPoint>> {
    let vc = pos.len();

    if closed {
        if vc == 0 || vc % 3 != 0 {
            return None;
        }
        let count = vc / 3;
        let points = (0..count)
            .map(|n| BezierPoint {
                left: pos[(3 * n + vc - 1) % vc],
                co: pos[3 * n],
                right: pos[(3 * n + 1) % vc],
            })
            .collect();
        return Some(points);
    }

    if vc % 3 != 1 {
        return None;
    }
    let count = (vc + 2) / 3;

    let points = (0..count)
        .map(|n| {
            if count == 1 {
                // A single anchor with no encoded handles at all
                BezierPoint {
                    left: pos[0],
                    co: pos[0],
                    right: pos[0],
                }
            } else if n == 0 {
                BezierPoint {
                    left: pos[0],
                    co: pos[0],
                    right: pos[1],
                }
            } else if n == count - 1 {
                BezierPoint {
                    left: pos[3 * n - 1],
                    co: pos[3 * n],
                    right: pos[3 * n],
                }
            } else {
                BezierPoint {
                    left: pos[3 * n - 1],
                    co: pos[3 * n],
                    right: pos[3 * n + 1],
                }
            }
        })
        .collect();

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_geometry(kind: PrimKind, count: usize, closed: bool) -> Geometry {
        let mut geo = Geometry::new();
        geo.points = (0..count)
            .map(|i| Vec3::new(i as f32, 0.0, 0.0))
            .collect();
        geo.add_prim(kind, (0..count as u32).collect(), closed);
        geo
    }

    #[test]
    fn test_nurbs_control_points_and_weights() {
        let geo = curve_geometry(PrimKind::NurbsCurve, 7, false);
        let curves = assemble_curves(&geo).unwrap();

        assert_eq!(curves.spline_count(), 1);
        let Spline::Nurbs {
            points,
            closed,
            order,
        } = &curves.splines[0]
        else {
            panic!("expected a NURBS spline");
        };

        assert_eq!(points.len(), 7);
        assert!(!closed);
        assert_eq!(*order, CURVE_ORDER);
        for (k, p) in points.iter().enumerate() {
            assert_eq!(p.x, k as f32);
            assert_eq!(p.w, 1.0);
        }
        assert!(curves.splines[0].endpoint_interpolation());
    }

    #[test]
    fn test_closed_nurbs_is_cyclic() {
        let geo = curve_geometry(PrimKind::NurbsCurve, 5, true);
        let curves = assemble_curves(&geo).unwrap();

        assert!(curves.splines[0].closed());
        assert!(!curves.splines[0].endpoint_interpolation());
    }

    #[test]
    fn test_open_bezier_endpoint_handles_degenerate() {
        // vertex_count = 4 -> N = 2
        let geo = curve_geometry(PrimKind::BezierCurve, 4, false);
        let pos = geo.points.clone();
        let curves = assemble_curves(&geo).unwrap();

        let Spline::Bezier { points, .. } = &curves.splines[0] else {
            panic!("expected a Bezier spline");
        };
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].left, pos[0]);
        assert_eq!(points[0].co, pos[0]);
        assert_eq!(points[0].right, pos[1]);

        assert_eq!(points[1].left, pos[2]);
        assert_eq!(points[1].co, pos[3]);
        assert_eq!(points[1].right, pos[3]);
    }

    #[test]
    fn test_open_bezier_interior_point() {
        // vertex_count = 7 -> N = 3, point 1 is interior
        let geo = curve_geometry(PrimKind::BezierCurve, 7, false);
        let pos = geo.points.clone();
        let curves = assemble_curves(&geo).unwrap();

        let Spline::Bezier { points, .. } = &curves.splines[0] else {
            panic!("expected a Bezier spline");
        };
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].left, pos[2]);
        assert_eq!(points[1].co, pos[3]);
        assert_eq!(points[1].right, pos[4]);
    }

    #[test]
    fn test_closed_bezier_wraps() {
        // vertex_count = 6 -> N = 2, left handle of point 0 wraps to the end
        let geo = curve_geometry(PrimKind::BezierCurve, 6, true);
        let pos = geo.points.clone();
        let curves = assemble_curves(&geo).unwrap();

        let Spline::Bezier { points, .. } = &curves.splines[0] else {
            panic!("expected a Bezier spline");
        };
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].left, pos[5]);
        assert_eq!(points[0].co, pos[0]);
        assert_eq!(points[0].right, pos[1]);

        assert_eq!(points[1].left, pos[2]);
        assert_eq!(points[1].co, pos[3]);
        assert_eq!(points[1].right, pos[4]);
    }

    #[test]
    fn test_malformed_open_bezier_fails() {
        // 5 is not congruent to 1 mod 3: no silent truncation
        let geo = curve_geometry(PrimKind::BezierCurve, 5, false);
        let err = assemble_curves(&geo).unwrap_err();

        let CurveError::MalformedBezier { prim, vertex_count } = err;
        assert_eq!(prim, 0);
        assert_eq!(vertex_count, 5);
    }

    #[test]
    fn test_malformed_closed_bezier_fails() {
        let geo = curve_geometry(PrimKind::BezierCurve, 7, true);
        assert!(assemble_curves(&geo).is_err());
    }

    #[test]
    fn test_splines_in_source_order() {
        let mut geo = Geometry::new();
        geo.points = (0..11).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        geo.add_prim(PrimKind::BezierCurve, vec![0, 1, 2, 3], false);
        geo.add_prim(PrimKind::NurbsCurve, vec![4, 5, 6], false);
        geo.add_prim(PrimKind::BezierCurve, vec![7, 8, 9, 10], false);

        let curves = assemble_curves(&geo).unwrap();
        assert_eq!(curves.spline_count(), 3);
        assert!(matches!(curves.splines[0], Spline::Bezier { .. }));
        assert!(matches!(curves.splines[1], Spline::Nurbs { .. }));
        assert!(matches!(curves.splines[2], Spline::Bezier { .. }));
    }
}
