//! Attribute model for the geometry source.
//!
//! An attribute is a named, typed data channel attached to one element
//! domain of a geometry. Values are stored as a flattened 2D buffer:
//! one row per domain element, `tuple_size` channels per row.

use serde::{Deserialize, Serialize};

/// The element kind an attribute is indexed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttribDomain {
    /// One value per polygon-loop entry (curve vertex for curve primitives).
    Corner,
    /// One value per point position.
    Point,
    /// One value per polygon or curve primitive.
    Primitive,
}

/// Semantic shape tag of an attribute's values.
///
/// Only `Value`, `Vector`, `Color`, `TextureCoord`, and `Point` participate
/// in mapping; the remaining tags exist in source files and fall through to
/// the default skip arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeInfo {
    Point,
    Vector,
    Normal,
    Color,
    Matrix,
    Quaternion,
    TextureCoord,
    Value,
}

/// Storage kind of an attribute's values. Only numeric kinds are mappable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttribData {
    Float,
    Int,
    String,
}

/// Raw attribute storage, flattened row-major.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AttribStore {
    Float(Vec<f32>),
    Int(Vec<i32>),
    Str(Vec<String>),
}

/// A named, typed data channel on one geometry domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub type_info: TypeInfo,
    /// Channel count per row.
    pub tuple_size: usize,
    pub data: AttribStore,
}

impl Attribute {
    /// Create a float attribute from flattened values.
    pub fn float(
        name: impl Into<String>,
        type_info: TypeInfo,
        tuple_size: usize,
        values: Vec<f32>,
    ) -> Self {
        Self {
            name: name.into(),
            type_info,
            tuple_size,
            data: AttribStore::Float(values),
        }
    }

    /// Create an integer attribute from flattened values.
    pub fn int(
        name: impl Into<String>,
        type_info: TypeInfo,
        tuple_size: usize,
        values: Vec<i32>,
    ) -> Self {
        Self {
            name: name.into(),
            type_info,
            tuple_size,
            data: AttribStore::Int(values),
        }
    }

    /// Create a string attribute (never mappable, always skipped).
    pub fn string(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            type_info: TypeInfo::Value,
            tuple_size: 1,
            data: AttribStore::Str(values),
        }
    }

    /// Storage kind tag for this attribute.
    pub fn data_type(&self) -> AttribData {
        match self.data {
            AttribStore::Float(_) => AttribData::Float,
            AttribStore::Int(_) => AttribData::Int,
            AttribStore::Str(_) => AttribData::String,
        }
    }

    /// Number of rows (domain elements) covered by this attribute.
    pub fn row_count(&self) -> usize {
        match &self.data {
            AttribStore::Float(v) => v.len() / self.tuple_size.max(1),
            AttribStore::Int(v) => v.len() / self.tuple_size.max(1),
            AttribStore::Str(v) => v.len(),
        }
    }

    /// Flattened numeric values as f32, integers widened. `None` for
    /// string storage.
    pub fn values_f32(&self) -> Option<Vec<f32>> {
        match &self.data {
            AttribStore::Float(v) => Some(v.clone()),
            AttribStore::Int(v) => Some(v.iter().map(|&x| x as f32).collect()),
            AttribStore::Str(_) => None,
        }
    }

    /// Flattened values as i32, floats truncated. `None` for string storage.
    pub fn values_i32(&self) -> Option<Vec<i32>> {
        match &self.data {
            AttribStore::Float(v) => Some(v.iter().map(|&x| x as i32).collect()),
            AttribStore::Int(v) => Some(v.clone()),
            AttribStore::Str(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count() {
        let attr = Attribute::float("Cd", TypeInfo::Color, 3, vec![0.0; 12]);
        assert_eq!(attr.row_count(), 4);
        assert_eq!(attr.data_type(), AttribData::Float);
    }

    #[test]
    fn test_int_values_widen_to_f32() {
        let attr = Attribute::int("id", TypeInfo::Value, 1, vec![1, 2, 3]);
        assert_eq!(attr.values_f32(), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_string_values_are_not_numeric() {
        let attr = Attribute::string("name", vec!["a".to_string()]);
        assert_eq!(attr.data_type(), AttribData::String);
        assert!(attr.values_f32().is_none());
        assert!(attr.values_i32().is_none());
    }
}
