//! Coordinate-system conversion between the source geometry convention
//! and the host application convention.
//!
//! The source format is Y-up with -Z forward; the host is Z-up with
//! Y forward. The conversion is a pure rotation: `(x, y, z) -> (x, -z, y)`.

use glam::{Mat3, Vec3};

/// The fixed axis-conversion matrix from source space to host space.
///
/// Columns are the images of the source basis vectors:
/// X stays X, Y becomes Z, Z becomes -Y.
pub fn source_to_host() -> Mat3 {
    Mat3::from_cols(Vec3::X, Vec3::Z, -Vec3::Y)
}

/// Convert a single point or handle position from source to host space.
pub fn to_host_point(p: Vec3) -> Vec3 {
    source_to_host() * p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_vector_maps_to_host_up() {
        // Source Y-up becomes host Z-up
        let up = to_host_point(Vec3::new(0.0, 1.0, 0.0));
        assert!((up - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_forward_vector_maps_to_host_forward() {
        // Source -Z forward becomes host +Y forward
        let fwd = to_host_point(Vec3::new(0.0, 0.0, -1.0));
        assert!((fwd - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_conversion_is_a_rotation() {
        let m = source_to_host();
        assert!((m.determinant() - 1.0).abs() < 1e-6);

        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(((m * v).length() - v.length()).abs() < 1e-5);
    }
}
