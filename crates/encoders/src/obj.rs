//! Wavefront OBJ export.
//!
//! Each anchor becomes a named object (`o anchor-<id>`). OBJ keeps one
//! global vertex pool, so face indices are 1-based and offset by the
//! vertices of all preceding anchors. Classified geometry carries per-vertex
//! colors as `v x y z r g b`.

use std::fmt::Write;
use std::ops::Range;

use landon_anchor_model::{FaceAnchor, GeometryBuffer, MeshAnchor, PlaneAnchor};

use crate::coloring::{ClassificationColoring, DefaultClassificationColoring};
use crate::text::TextMeshEncoder;

/// Plain-text mesh encoder producing Wavefront OBJ.
#[derive(Debug, Clone)]
pub struct ObjEncoder<C = DefaultClassificationColoring> {
    coloring: C,
    vertex_colors: bool,
}

impl ObjEncoder {
    pub fn new() -> Self {
        Self::with_coloring(DefaultClassificationColoring)
    }
}

impl Default for ObjEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClassificationColoring> ObjEncoder<C> {
    pub fn with_coloring(coloring: C) -> Self {
        Self {
            coloring,
            vertex_colors: true,
        }
    }

    /// Enable or disable per-vertex classification colors.
    pub fn vertex_colors(mut self, enabled: bool) -> Self {
        self.vertex_colors = enabled;
        self
    }

    /// Encode named buffers into one OBJ document.
    ///
    /// Buffers that are empty or structurally invalid are skipped. The rest
    /// are merged into one buffer, so vertex and texture-coordinate indices
    /// share one global numbering. Returns `None` if nothing was left to
    /// write.
    fn encode_buffers(&self, buffers: Vec<(&str, GeometryBuffer)>) -> Option<Vec<u8>> {
        let mut combined = GeometryBuffer::default();
        let mut objects = Vec::new();

        for (id, buffer) in buffers {
            if buffer.is_empty() {
                tracing::debug!(anchor = %id, "Skipping anchor without geometry");
                continue;
            }
            if let Err(e) = buffer.validate() {
                tracing::warn!(anchor = %id, error = %e, "Skipping anchor with invalid geometry");
                continue;
            }

            let vertices = combined.vertex_count()..combined.vertex_count() + buffer.vertex_count();
            let faces = combined.face_count()..combined.face_count() + buffer.face_count();
            combined.merge(&buffer);
            objects.push(ObjObject { id, vertices, faces });
        }

        if objects.is_empty() {
            return None;
        }

        let mut obj = String::new();
        self.write_document(&mut obj, &combined, &objects).ok()?;
        Some(obj.into_bytes())
    }

    fn write_document(
        &self,
        obj: &mut String,
        combined: &GeometryBuffer,
        objects: &[ObjObject<'_>],
    ) -> std::fmt::Result {
        writeln!(obj, "# Landon OBJ Export")?;
        writeln!(obj, "# Anchors: {}", objects.len())?;
        writeln!(obj, "# Vertices: {}", combined.vertex_count())?;
        writeln!(obj, "# Triangles: {}", combined.face_count())?;

        let uvs = combined.texture_coordinates.as_deref();
        for object in objects {
            writeln!(obj)?;
            writeln!(obj, "o anchor-{}", object.id)?;
            self.write_vertices(obj, combined, object.vertices.clone())?;

            if let Some(uvs) = uvs {
                for uv in &uvs[object.vertices.clone()] {
                    writeln!(obj, "vt {} {}", uv.x, uv.y)?;
                }
            }

            for [a, b, c] in &combined.faces[object.faces.clone()] {
                let (i0, i1, i2) = (a + 1, b + 1, c + 1);
                if uvs.is_some() {
                    writeln!(obj, "f {i0}/{i0} {i1}/{i1} {i2}/{i2}")?;
                } else {
                    writeln!(obj, "f {i0} {i1} {i2}")?;
                }
            }
        }

        Ok(())
    }

    fn write_vertices(
        &self,
        obj: &mut String,
        combined: &GeometryBuffer,
        range: Range<usize>,
    ) -> std::fmt::Result {
        let positions = &combined.positions[range.clone()];
        match (&combined.classifications, self.vertex_colors) {
            (Some(labels), true) => {
                for (p, label) in positions.iter().zip(&labels[range]) {
                    let [r, g, b] = self.coloring.color_for_mesh(*label).to_unit();
                    writeln!(obj, "v {} {} {} {} {} {}", p.x, p.y, p.z, r, g, b)?;
                }
            }
            _ => {
                for p in positions {
                    writeln!(obj, "v {} {} {}", p.x, p.y, p.z)?;
                }
            }
        }
        Ok(())
    }
}

/// One anchor's slice of the merged buffer.
struct ObjObject<'a> {
    id: &'a str,
    vertices: Range<usize>,
    faces: Range<usize>,
}

impl<C: ClassificationColoring> TextMeshEncoder for ObjEncoder<C> {
    fn name(&self) -> &str {
        "obj"
    }

    fn encode_mesh_anchors(&self, anchors: &[&MeshAnchor]) -> Option<Vec<u8>> {
        self.encode_buffers(
            anchors
                .iter()
                .map(|a| (a.id.as_str(), GeometryBuffer::from_mesh_anchor(a)))
                .collect(),
        )
    }

    fn encode_plane_anchors(&self, anchors: &[&PlaneAnchor]) -> Option<Vec<u8>> {
        self.encode_buffers(
            anchors
                .iter()
                .map(|a| (a.id.as_str(), GeometryBuffer::from_plane_anchor(a)))
                .collect(),
        )
    }

    fn encode_face_anchors(&self, anchors: &[&FaceAnchor]) -> Option<Vec<u8>> {
        self.encode_buffers(
            anchors
                .iter()
                .map(|a| (a.id.as_str(), GeometryBuffer::from_face_anchor(a)))
                .collect(),
        )
    }
}
