//! Host-side scene objects and the geometry data-slot swap.
//!
//! The pipeline never mutates a live object's data in place. It builds a
//! detached artifact, then the caller performs a single swap here: attach
//! the new data, carry slot-level associations (material slots) across, and
//! get the retired data back for disposal. No reader ever observes a
//! half-built mesh or spline set.

use crate::curve::CurveData;
use crate::import::{Artifact, TargetKind};
use crate::mesh::MeshData;

/// The geometry data slot of a scene object: an explicit tagged union over
/// the finite set of target kinds.
#[derive(Clone, Debug)]
pub enum ObjectData {
    Mesh(MeshData),
    Curve(CurveData),
    /// An object whose data is neither mesh- nor curve-compatible.
    Empty,
}

impl ObjectData {
    pub fn target_kind(&self) -> TargetKind {
        match self {
            ObjectData::Mesh(_) => TargetKind::Mesh,
            ObjectData::Curve(_) => TargetKind::Curve,
            ObjectData::Empty => TargetKind::Other,
        }
    }

    /// Material slot names associated with this data block.
    pub fn material_slots(&self) -> &[String] {
        match self {
            ObjectData::Mesh(mesh) => &mesh.material_slots,
            _ => &[],
        }
    }
}

/// A scene object owning one geometry data slot.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Structural kind of the current data slot.
    pub fn target_kind(&self) -> TargetKind {
        self.data.target_kind()
    }

    /// Atomically swap a finished artifact into the data slot.
    ///
    /// Material-slot associations are copied from the outgoing data onto the
    /// incoming mesh before the swap. Returns the retired data; the caller
    /// disposes of it.
    pub fn replace_data(&mut self, artifact: Artifact) -> ObjectData {
        let new_data = match artifact {
            Artifact::Mesh(mut mesh) => {
                mesh.material_slots = self.data.material_slots().to_vec();
                ObjectData::Mesh(mesh)
            }
            Artifact::Curve(curves) => ObjectData::Curve(curves),
        };

        std::mem::replace(&mut self.data, new_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_with_slots(point_count: usize, slots: &[&str]) -> MeshData {
        MeshData {
            points: vec![glam::Vec3::ZERO; point_count],
            material_slots: slots.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_swap_copies_material_slots_to_new_mesh() {
        let old = mesh_with_slots(3, &["clay", "chrome"]);
        let mut object = SceneObject::new("geo", ObjectData::Mesh(old));

        let new = mesh_with_slots(10, &[]);
        let retired = object.replace_data(Artifact::Mesh(new));

        let ObjectData::Mesh(current) = &object.data else {
            panic!("expected mesh data");
        };
        assert_eq!(current.point_count(), 10);
        assert_eq!(current.material_slots, vec!["clay", "chrome"]);

        let ObjectData::Mesh(retired) = retired else {
            panic!("expected retired mesh data");
        };
        assert_eq!(retired.point_count(), 3);
    }

    #[test]
    fn test_swap_to_curve_returns_retired_data() {
        let mut object = SceneObject::new("crv", ObjectData::Curve(CurveData::default()));
        assert_eq!(object.target_kind(), TargetKind::Curve);

        let retired = object.replace_data(Artifact::Curve(CurveData::default()));
        assert!(matches!(retired, ObjectData::Curve(_)));
    }

    #[test]
    fn test_empty_slot_is_not_importable() {
        let object = SceneObject::new("cam", ObjectData::Empty);
        assert_eq!(object.target_kind(), TargetKind::Other);
    }
}
