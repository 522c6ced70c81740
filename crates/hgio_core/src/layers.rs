//! Domain attribute mapper.
//!
//! Converts one source attribute, given its domain and declared tags, into
//! either a typed output layer, a special-cased mutation of the in-progress
//! mesh (split normals, uv, material index), or a skip decision. Skips are
//! diagnostics, never fatal: a partially-unsupported import still succeeds
//! with the supported subset.

use glam::Vec3;

use crate::attrib::{AttribData, AttribDomain, Attribute, TypeInfo};
use crate::import::ImportOptions;
use crate::mesh::{AttributeLayer, LayerType, MeshData};

/// Why an attribute was not mapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The point-position attribute is already consumed as topology.
    PositionAttribute,
    /// Normal reconstruction disabled by the caller for this import.
    NormalsDisabled,
    /// Storage kind is not numeric.
    UnsupportedData(AttribData),
    /// (type_info, data_kind) is not one of the recognized mappings.
    UnsupportedType(TypeInfo),
}

/// Result of mapping one attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapOutcome {
    /// A generic typed layer was created.
    Layer,
    /// Custom split normals were installed.
    SplitNormals,
    /// Per-polygon material slots were assigned.
    MaterialIndex,
    Skipped(SkipReason),
}

/// How one (domain, name, type_info, data_kind) combination is handled.
/// Adding a new special-cased name is an edit to [`classify`], nothing else.
enum Mapping {
    SplitNormals,
    UvLayer,
    MaterialIndex,
    Generic(LayerType),
    SkipPosition,
    SkipData,
    SkipType,
}

fn classify(domain: AttribDomain, attr: &Attribute) -> Mapping {
    use AttribDomain::{Corner, Point, Primitive};

    match (domain, attr.name.as_str(), attr.type_info, attr.data_type()) {
        // Non-numeric storage is never mappable, whatever the name says.
        (_, _, _, AttribData::String) => Mapping::SkipData,

        // Special-cased names, checked before generic mapping regardless of
        // the declared type_info.
        (Corner | Point, "N", _, _) => Mapping::SplitNormals,
        (Corner, "uv", _, _) => Mapping::UvLayer,
        (Primitive, "material_index", _, _) => Mapping::MaterialIndex,

        // Point positions are already topology.
        (Point, "P", TypeInfo::Point, _) => Mapping::SkipPosition,

        // Generic mapping.
        (_, _, TypeInfo::Value, _) => Mapping::Generic(LayerType::Float),
        (_, _, TypeInfo::Vector, _) => Mapping::Generic(LayerType::FloatVector),
        (_, _, TypeInfo::Color, _) => Mapping::Generic(LayerType::FloatColor),
        (Corner | Point, _, TypeInfo::TextureCoord, _) => Mapping::Generic(LayerType::Float2),

        _ => Mapping::SkipType,
    }
}

/// Map one attribute onto the in-progress mesh.
pub fn map_attribute(
    mesh: &mut MeshData,
    domain: AttribDomain,
    attr: &Attribute,
    options: &ImportOptions,
) -> MapOutcome {
    match classify(domain, attr) {
        Mapping::SplitNormals => {
            if options.skip_normals {
                // Sequence playback toggle: neither read nor install.
                return MapOutcome::Skipped(SkipReason::NormalsDisabled);
            }
            let Some(values) = attr.values_f32() else {
                return MapOutcome::Skipped(SkipReason::UnsupportedData(attr.data_type()));
            };

            // Smoothing everywhere is a prerequisite for split normals.
            mesh.set_smooth_all();

            // Source and host use opposite handedness: negate every
            // component, then regroup into 3-tuples in source order.
            let normals: Vec<Vec3> = values
                .chunks_exact(3)
                .map(|n| Vec3::new(-n[0], -n[1], -n[2]))
                .collect();

            match domain {
                AttribDomain::Corner => mesh.set_split_normals(normals),
                AttribDomain::Point => mesh.set_split_normals_from_points(&normals),
                AttribDomain::Primitive => unreachable!("classified on corner or point"),
            }

            MapOutcome::SplitNormals
        }

        Mapping::UvLayer => {
            let Some(values) = attr.values_f32() else {
                return MapOutcome::Skipped(SkipReason::UnsupportedData(attr.data_type()));
            };
            // Always a 2-channel corner layer, whatever the declared
            // type_info; only the first two raw channels are used.
            let data = take_channels(&values, attr.tuple_size, 2);
            mesh.layers.push(AttributeLayer {
                name: attr.name.clone(),
                domain,
                ty: LayerType::Float2,
                data,
            });
            MapOutcome::Layer
        }

        Mapping::MaterialIndex => {
            let Some(values) = attr.values_i32() else {
                return MapOutcome::Skipped(SkipReason::UnsupportedData(attr.data_type()));
            };
            // Applied directly as material slots, no layer is created.
            mesh.material_index = Some(values);
            MapOutcome::MaterialIndex
        }

        Mapping::Generic(ty) => {
            let Some(values) = attr.values_f32() else {
                return MapOutcome::Skipped(SkipReason::UnsupportedData(attr.data_type()));
            };

            let data = match ty {
                // 3-channel color sources get a constant alpha of 1.0.
                LayerType::FloatColor => pad_channels(&values, attr.tuple_size, 4, 1.0),
                other => take_channels(&values, attr.tuple_size, other.channels()),
            };

            mesh.layers.push(AttributeLayer {
                name: attr.name.clone(),
                domain,
                ty,
                data,
            });
            MapOutcome::Layer
        }

        Mapping::SkipPosition => MapOutcome::Skipped(SkipReason::PositionAttribute),

        Mapping::SkipData => {
            log::warn!(
                "unsupported attribute data type: {:?} ({:?} '{}')",
                attr.data_type(),
                domain,
                attr.name
            );
            MapOutcome::Skipped(SkipReason::UnsupportedData(attr.data_type()))
        }

        Mapping::SkipType => {
            log::warn!(
                "unsupported attribute type: {:?} ({:?} '{}')",
                attr.type_info,
                domain,
                attr.name
            );
            MapOutcome::Skipped(SkipReason::UnsupportedType(attr.type_info))
        }
    }
}

/// Take the first `take` channels of every row.
fn take_channels(values: &[f32], tuple_size: usize, take: usize) -> Vec<f32> {
    if tuple_size == take {
        return values.to_vec();
    }
    values
        .chunks_exact(tuple_size)
        .flat_map(|row| row[..take].iter().copied())
        .collect()
}

/// Take up to `width` channels of every row, padding short rows with `fill`.
fn pad_channels(values: &[f32], tuple_size: usize, width: usize, fill: f32) -> Vec<f32> {
    if tuple_size == width {
        return values.to_vec();
    }
    let rows = values.chunks_exact(tuple_size);
    let mut out = Vec::with_capacity(rows.len() * width);
    for row in rows {
        let n = tuple_size.min(width);
        out.extend_from_slice(&row[..n]);
        out.extend(std::iter::repeat(fill).take(width - n));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, PrimKind};
    use crate::mesh::assemble_mesh;

    fn quad() -> Geometry {
        let mut geo = Geometry::new();
        geo.points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        geo.add_prim(PrimKind::Poly, vec![0, 1, 2, 3], true);
        geo
    }

    fn bare_mesh(geo: &Geometry) -> MeshData {
        // Topology only, mapper exercised directly by each test
        assemble_mesh(geo, &ImportOptions::default())
    }

    #[test]
    fn test_color_gets_constant_alpha() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::float(
            "Cd",
            TypeInfo::Color,
            3,
            vec![
                0.1, 0.2, 0.3, //
                0.4, 0.5, 0.6, //
                0.7, 0.8, 0.9, //
                1.0, 0.0, 0.5,
            ],
        );
        let outcome = map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());
        assert_eq!(outcome, MapOutcome::Layer);

        let layer = mesh.layer(AttribDomain::Point, "Cd").unwrap();
        assert_eq!(layer.ty, LayerType::FloatColor);
        assert_eq!(layer.data.len(), 16);
        for row in layer.data.chunks_exact(4) {
            assert_eq!(row[3], 1.0);
        }
        assert_eq!(&layer.data[0..3], &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_four_channel_color_passes_through() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let values = vec![0.1, 0.2, 0.3, 0.4];
        let attr = Attribute::float("Cd", TypeInfo::Color, 4, values.repeat(4));
        map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());

        let layer = mesh.layer(AttribDomain::Point, "Cd").unwrap();
        assert_eq!(&layer.data[0..4], &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_texture_coord_truncates_to_two_channels() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::float(
            "st",
            TypeInfo::TextureCoord,
            3,
            vec![
                0.0, 0.1, 9.0, //
                0.2, 0.3, 9.0, //
                0.4, 0.5, 9.0, //
                0.6, 0.7, 9.0,
            ],
        );
        map_attribute(&mut mesh, AttribDomain::Corner, &attr, &Default::default());

        let layer = mesh.layer(AttribDomain::Corner, "st").unwrap();
        assert_eq!(layer.ty, LayerType::Float2);
        assert_eq!(layer.data, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
    }

    #[test]
    fn test_uv_name_wins_over_declared_type() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        // Declared as a plain vector, still becomes a 2-channel corner layer
        let attr = Attribute::float("uv", TypeInfo::Vector, 3, vec![0.5; 12]);
        let outcome = map_attribute(&mut mesh, AttribDomain::Corner, &attr, &Default::default());

        assert_eq!(outcome, MapOutcome::Layer);
        let layer = mesh.layer(AttribDomain::Corner, "uv").unwrap();
        assert_eq!(layer.ty, LayerType::Float2);
        assert_eq!(layer.data.len(), 8);
    }

    #[test]
    fn test_corner_normals_negated_in_source_order() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::float(
            "N",
            TypeInfo::Normal,
            3,
            vec![
                1.0, 0.0, 0.0, //
                0.0, 2.0, 0.0, //
                0.0, 0.0, 3.0, //
                4.0, 4.0, 4.0,
            ],
        );
        let outcome = map_attribute(&mut mesh, AttribDomain::Corner, &attr, &Default::default());
        assert_eq!(outcome, MapOutcome::SplitNormals);

        let normals = mesh.split_normals.as_ref().unwrap();
        assert_eq!(normals[0], Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(normals[1], Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(normals[2], Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(normals[3], Vec3::new(-4.0, -4.0, -4.0));
        assert!(mesh.smooth.iter().all(|&s| s));
    }

    #[test]
    fn test_skip_normals_option_bypasses_reconstruction() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);
        let smooth_before = mesh.smooth.clone();

        let attr = Attribute::float("N", TypeInfo::Normal, 3, vec![1.0; 12]);
        let opts = ImportOptions { skip_normals: true };
        let outcome = map_attribute(&mut mesh, AttribDomain::Corner, &attr, &opts);

        assert_eq!(outcome, MapOutcome::Skipped(SkipReason::NormalsDisabled));
        assert!(mesh.split_normals.is_none());
        assert_eq!(mesh.smooth, smooth_before);
    }

    #[test]
    fn test_position_attribute_is_consumed_as_topology() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::float("P", TypeInfo::Point, 3, vec![0.0; 12]);
        let outcome = map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());

        assert_eq!(outcome, MapOutcome::Skipped(SkipReason::PositionAttribute));
        assert!(mesh.layer(AttribDomain::Point, "P").is_none());
    }

    #[test]
    fn test_string_attribute_skipped_without_side_effects() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);
        let layers_before = mesh.layers.len();

        let attr = Attribute::string("path", vec!["/obj/geo".to_string(); 4]);
        let outcome = map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());

        assert_eq!(
            outcome,
            MapOutcome::Skipped(SkipReason::UnsupportedData(AttribData::String))
        );
        assert_eq!(mesh.layers.len(), layers_before);
    }

    #[test]
    fn test_string_named_n_does_not_trigger_normals() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::string("N", vec!["x".to_string(); 4]);
        let outcome = map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());

        assert!(matches!(
            outcome,
            MapOutcome::Skipped(SkipReason::UnsupportedData(_))
        ));
        assert!(mesh.split_normals.is_none());
    }

    #[test]
    fn test_primitive_texture_coord_falls_to_default_skip() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::float("st", TypeInfo::TextureCoord, 3, vec![0.0; 3]);
        let outcome =
            map_attribute(&mut mesh, AttribDomain::Primitive, &attr, &Default::default());

        assert_eq!(
            outcome,
            MapOutcome::Skipped(SkipReason::UnsupportedType(TypeInfo::TextureCoord))
        );
    }

    #[test]
    fn test_quaternion_attribute_skipped() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::float("orient", TypeInfo::Quaternion, 4, vec![0.0; 16]);
        let outcome = map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());

        assert_eq!(
            outcome,
            MapOutcome::Skipped(SkipReason::UnsupportedType(TypeInfo::Quaternion))
        );
    }

    #[test]
    fn test_int_scalar_maps_to_float_layer() {
        let geo = quad();
        let mut mesh = bare_mesh(&geo);

        let attr = Attribute::int("id", TypeInfo::Value, 1, vec![7, 8, 9, 10]);
        let outcome = map_attribute(&mut mesh, AttribDomain::Point, &attr, &Default::default());

        assert_eq!(outcome, MapOutcome::Layer);
        let layer = mesh.layer(AttribDomain::Point, "id").unwrap();
        assert_eq!(layer.ty, LayerType::Float);
        assert_eq!(layer.data, vec![7.0, 8.0, 9.0, 10.0]);
    }
}
