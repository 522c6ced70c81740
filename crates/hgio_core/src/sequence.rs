//! Frame-sequence playback support.
//!
//! Objects driven by a file sequence are held in an explicit registry; a
//! per-tick scheduler iterates only registered entries instead of scanning
//! the whole scene for a flag. Each tick resolves the entry's path template
//! for the current frame, skips missing frames, imports, and swaps the
//! artifact into the owning object.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::GeometryCodec;
use crate::import::{import_geometry, ImportError, ImportOptions};
use crate::scene::SceneObject;

/// Template validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}' in sequence template")]
    UnknownPlaceholder(String),

    #[error("unterminated placeholder in sequence template")]
    Unterminated,

    #[error("invalid pad width in placeholder '{{{0}}}'")]
    InvalidWidth(String),

    #[error("sequence template has no '{{frame}}' placeholder")]
    MissingFrame,
}

/// One parsed template segment.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Frame number, zero-padded to the given width.
    Frame { width: usize },
}

/// A file-path template with `{frame}` / `{frame:04}` placeholders.
#[derive(Clone, Debug)]
pub struct SequencePath {
    segments: Vec<Segment>,
}

impl SequencePath {
    /// Parse and validate a template such as `geo/geo.{frame:04}.json`.
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();
        let mut has_frame = false;

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let mut spec = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => spec.push(c),
                    None => return Err(TemplateError::Unterminated),
                }
            }

            let (name, width) = match spec.split_once(':') {
                Some((name, pad)) => {
                    let width = pad
                        .parse::<usize>()
                        .map_err(|_| TemplateError::InvalidWidth(spec.clone()))?;
                    (name, width)
                }
                None => (spec.as_str(), 0),
            };
            if name != "frame" {
                return Err(TemplateError::UnknownPlaceholder(spec));
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Frame { width });
            has_frame = true;
        }

        if !has_frame {
            return Err(TemplateError::MissingFrame);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Resolve the template for one frame number.
    pub fn resolve(&self, frame: i64) -> PathBuf {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Frame { width } => {
                    out.push_str(&format!("{:0width$}", frame, width = *width));
                }
            }
        }
        PathBuf::from(out)
    }
}

struct SequenceEntry {
    object_id: usize,
    path: SequencePath,
    options: ImportOptions,
}

/// Registry of sequence-driven objects, populated explicitly when an object
/// is marked as sequence-driven.
#[derive(Default)]
pub struct SequenceRegistry {
    entries: Vec<SequenceEntry>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object (by its index in the scene's object list),
    /// replacing any previous registration for the same object.
    pub fn register(&mut self, object_id: usize, path: SequencePath, options: ImportOptions) {
        self.unregister(object_id);
        self.entries.push(SequenceEntry {
            object_id,
            path,
            options,
        });
    }

    pub fn unregister(&mut self, object_id: usize) {
        self.entries.retain(|e| e.object_id != object_id);
    }

    pub fn is_registered(&self, object_id: usize) -> bool {
        self.entries.iter().any(|e| e.object_id == object_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Update every registered object for `frame`. Missing frames and
    /// per-object failures are logged and skipped; returns how many objects
    /// were updated.
    pub fn tick(
        &self,
        frame: i64,
        codec: &dyn GeometryCodec,
        objects: &mut [SceneObject],
    ) -> usize {
        let mut updated = 0;

        for entry in &self.entries {
            let Some(object) = objects.get_mut(entry.object_id) else {
                log::warn!("sequence entry {} has no scene object", entry.object_id);
                continue;
            };

            let path = entry.path.resolve(frame);
            if !path.exists() {
                log::warn!("sequence frame missing: {}", path.display());
                continue;
            }

            match import_geometry(codec, &path, object.target_kind(), &entry.options) {
                Ok(artifact) => {
                    let _retired = object.replace_data(artifact);
                    updated += 1;
                }
                // Objects without a geometry-compatible slot are a no-op
                Err(ImportError::UnsupportedTarget(_)) => {}
                Err(err) => {
                    log::warn!("sequence update failed for '{}': {}", object.name, err);
                }
            }
        }

        updated
    }
}
