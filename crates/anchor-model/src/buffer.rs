//! World-space geometry buffers derived from anchors.

use glam::{Mat4, Vec2, Vec3};

use crate::anchor::{FaceAnchor, MeshAnchor, PlaneAnchor};
use crate::classification::MeshClassification;

/// Vertex, index, and attribute arrays for one or more anchors.
///
/// Positions are in world space. Optional attribute arrays, when present,
/// hold exactly one entry per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    pub positions: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
    pub texture_coordinates: Option<Vec<Vec2>>,
    pub classifications: Option<Vec<MeshClassification>>,
}

/// Structural problems detected by [`GeometryBuffer::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("face {face} references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("{attribute} has {actual} entries, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl GeometryBuffer {
    pub fn from_mesh_anchor(anchor: &MeshAnchor) -> Self {
        Self {
            positions: to_world(anchor.transform, &anchor.geometry.vertices),
            faces: anchor.geometry.faces.clone(),
            texture_coordinates: None,
            classifications: anchor.geometry.classifications.clone(),
        }
    }

    /// Plane vertices are all labelled with the plane's classification.
    pub fn from_plane_anchor(anchor: &PlaneAnchor) -> Self {
        let vertex_count = anchor.geometry.vertices.len();
        Self {
            positions: to_world(anchor.transform, &anchor.geometry.vertices),
            faces: anchor.geometry.triangle_indices.clone(),
            texture_coordinates: None,
            classifications: Some(vec![anchor.classification.into(); vertex_count]),
        }
    }

    pub fn from_face_anchor(anchor: &FaceAnchor) -> Self {
        let uvs = &anchor.geometry.texture_coordinates;
        Self {
            positions: to_world(anchor.transform, &anchor.geometry.vertices),
            faces: anchor.geometry.triangle_indices.clone(),
            texture_coordinates: (!uvs.is_empty()).then(|| uvs.clone()),
            classifications: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.faces.is_empty()
    }

    /// Check that every face index is in range and attribute arrays match
    /// the vertex count.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.positions.len();

        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        if let Some(uvs) = &self.texture_coordinates {
            check_len("texture_coordinates", vertex_count, uvs.len())?;
        }
        if let Some(labels) = &self.classifications {
            check_len("classifications", vertex_count, labels.len())?;
        }

        Ok(())
    }

    /// Append another buffer, offsetting its face indices.
    ///
    /// If only one side carries an optional attribute, the other side is
    /// padded with defaults so the attribute stays one-per-vertex.
    pub fn merge(&mut self, other: &GeometryBuffer) {
        let offset = self.positions.len() as u32;
        let own_count = self.positions.len();
        let other_count = other.positions.len();

        merge_attribute(
            &mut self.texture_coordinates,
            other.texture_coordinates.as_deref(),
            own_count,
            other_count,
        );
        merge_attribute(
            &mut self.classifications,
            other.classifications.as_deref(),
            own_count,
            other_count,
        );

        self.positions.extend_from_slice(&other.positions);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }
}

fn to_world(transform: Mat4, vertices: &[Vec3]) -> Vec<Vec3> {
    vertices
        .iter()
        .map(|v| transform.transform_point3(*v))
        .collect()
}

fn check_len(attribute: &'static str, expected: usize, actual: usize) -> Result<(), GeometryError> {
    if expected == actual {
        Ok(())
    } else {
        Err(GeometryError::AttributeLength {
            attribute,
            expected,
            actual,
        })
    }
}

fn merge_attribute<T: Clone + Default>(
    own: &mut Option<Vec<T>>,
    other: Option<&[T]>,
    own_count: usize,
    other_count: usize,
) {
    match (own.as_mut(), other) {
        (None, None) => {}
        (Some(values), Some(more)) => values.extend_from_slice(more),
        (Some(values), None) => values.resize(values.len() + other_count, T::default()),
        (None, Some(more)) => {
            let mut values = vec![T::default(); own_count];
            values.extend_from_slice(more);
            *own = Some(values);
        }
    }
}
