//! Tracked anchors.
//!
//! An anchor is a real-world surface (or a face) the tracking session is
//! following. The three kinds carry differently shaped geometry, so they are
//! modelled as a closed tagged union rather than a trait object.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::classification::{MeshClassification, PlaneAlignment, PlaneClassification};

/// Stable identifier assigned by the tracking session.
pub type AnchorId = String;

/// Discriminant of [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Mesh,
    Plane,
    Face,
}

impl AnchorKind {
    /// All anchor kinds, in export order.
    pub const ALL: [AnchorKind; 3] = [AnchorKind::Mesh, AnchorKind::Plane, AnchorKind::Face];

    /// Export role name, used as the base name of exported files.
    pub fn role(self) -> &'static str {
        match self {
            AnchorKind::Mesh => "mesh-anchors",
            AnchorKind::Plane => "plane-anchors",
            AnchorKind::Face => "face-anchors",
        }
    }
}

impl std::fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.role())
    }
}

/// Reconstructed environment mesh geometry (anchor-local coordinates).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshGeometry {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,

    /// Triangles as vertex index triples.
    pub faces: Vec<[u32; 3]>,

    /// Optional per-vertex semantic labels.
    #[serde(default)]
    pub classifications: Option<Vec<MeshClassification>>,
}

/// Estimated plane shape (anchor-local coordinates).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaneGeometry {
    /// Triangulated plane vertices.
    pub vertices: Vec<Vec3>,

    /// Triangles as vertex index triples.
    pub triangle_indices: Vec<[u32; 3]>,

    /// Ordered outline of the plane.
    #[serde(default)]
    pub boundary_vertices: Vec<Vec3>,
}

/// Tracked face topology (anchor-local coordinates).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceGeometry {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,

    /// Per-vertex texture coordinates.
    #[serde(default)]
    pub texture_coordinates: Vec<Vec2>,

    /// Triangles as vertex index triples.
    pub triangle_indices: Vec<[u32; 3]>,
}

/// A chunk of reconstructed environment mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAnchor {
    pub id: AnchorId,

    /// Anchor-to-world transform.
    #[serde(default)]
    pub transform: Mat4,

    pub geometry: MeshGeometry,
}

/// A detected planar surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    pub id: AnchorId,

    /// Anchor-to-world transform.
    #[serde(default)]
    pub transform: Mat4,

    #[serde(default)]
    pub alignment: PlaneAlignment,

    #[serde(default)]
    pub classification: PlaneClassification,

    /// Plane center in anchor-local coordinates.
    #[serde(default)]
    pub center: Vec3,

    /// Plane width (x) and length (z).
    #[serde(default)]
    pub extent: Vec3,

    pub geometry: PlaneGeometry,
}

/// A tracked human face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAnchor {
    pub id: AnchorId,

    /// Anchor-to-world transform.
    #[serde(default)]
    pub transform: Mat4,

    /// Whether the face was being tracked when the snapshot was taken.
    #[serde(default = "default_tracked")]
    pub is_tracked: bool,

    pub geometry: FaceGeometry,
}

fn default_tracked() -> bool {
    true
}

/// Any anchor the tracking session can report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anchor {
    Mesh(MeshAnchor),
    Plane(PlaneAnchor),
    Face(FaceAnchor),
}

impl Anchor {
    pub fn kind(&self) -> AnchorKind {
        match self {
            Anchor::Mesh(_) => AnchorKind::Mesh,
            Anchor::Plane(_) => AnchorKind::Plane,
            Anchor::Face(_) => AnchorKind::Face,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Anchor::Mesh(a) => &a.id,
            Anchor::Plane(a) => &a.id,
            Anchor::Face(a) => &a.id,
        }
    }

    pub fn transform(&self) -> Mat4 {
        match self {
            Anchor::Mesh(a) => a.transform,
            Anchor::Plane(a) => a.transform,
            Anchor::Face(a) => a.transform,
        }
    }

    /// Number of triangles in the anchor's geometry.
    pub fn face_count(&self) -> usize {
        match self {
            Anchor::Mesh(a) => a.face_count(),
            Anchor::Plane(a) => a.geometry.triangle_indices.len(),
            Anchor::Face(a) => a.geometry.triangle_indices.len(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Anchor::Mesh(a) => a.geometry.vertices.len(),
            Anchor::Plane(a) => a.geometry.vertices.len(),
            Anchor::Face(a) => a.geometry.vertices.len(),
        }
    }
}

impl MeshAnchor {
    pub fn face_count(&self) -> usize {
        self.geometry.faces.len()
    }
}

impl From<MeshAnchor> for Anchor {
    fn from(anchor: MeshAnchor) -> Self {
        Anchor::Mesh(anchor)
    }
}

impl From<PlaneAnchor> for Anchor {
    fn from(anchor: PlaneAnchor) -> Self {
        Anchor::Plane(anchor)
    }
}

impl From<FaceAnchor> for Anchor {
    fn from(anchor: FaceAnchor) -> Self {
        Anchor::Face(anchor)
    }
}
