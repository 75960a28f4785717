//! Compressed-binary codec contract.

use landon_anchor_model::{FaceAnchor, MeshAnchor, PlaneAnchor};

use crate::status::{BinaryEncodeResult, EncoderOptions, EncoderStatusCode};

/// A compressed-binary geometry codec.
///
/// Each anchor type has its own entry point because the codec consumes a
/// differently shaped geometry per type. Group entry points produce one
/// combined payload for all anchors passed in.
pub trait BinaryGeometryEncoder: Send + Sync {
    /// Codec name for logging.
    fn name(&self) -> &str;

    /// Whether the codec can produce payloads at all in this build.
    fn is_available(&self) -> bool {
        true
    }

    fn encode_mesh_anchors(
        &self,
        anchors: &[&MeshAnchor],
        options: &EncoderOptions,
    ) -> BinaryEncodeResult;

    fn encode_plane_anchors(
        &self,
        anchors: &[&PlaneAnchor],
        options: &EncoderOptions,
    ) -> BinaryEncodeResult;

    fn encode_face_anchors(
        &self,
        anchors: &[&FaceAnchor],
        options: &EncoderOptions,
    ) -> BinaryEncodeResult;

    /// Encode a single mesh anchor.
    fn encode_mesh_anchor(&self, anchor: &MeshAnchor, options: &EncoderOptions) -> BinaryEncodeResult {
        self.encode_mesh_anchors(&[anchor], options)
    }
}

/// Stand-in used when no compressed-binary codec is linked into the build.
/// Every entry point reports [`EncoderStatusCode::UnsupportedFeature`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlinkedBinaryEncoder;

impl UnlinkedBinaryEncoder {
    fn unavailable(&self) -> BinaryEncodeResult {
        BinaryEncodeResult::failure(
            EncoderStatusCode::UnsupportedFeature,
            "no compressed-binary codec is linked into this build",
        )
    }
}

impl BinaryGeometryEncoder for UnlinkedBinaryEncoder {
    fn name(&self) -> &str {
        "unlinked"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn encode_mesh_anchors(&self, _: &[&MeshAnchor], _: &EncoderOptions) -> BinaryEncodeResult {
        self.unavailable()
    }

    fn encode_plane_anchors(&self, _: &[&PlaneAnchor], _: &EncoderOptions) -> BinaryEncodeResult {
        self.unavailable()
    }

    fn encode_face_anchors(&self, _: &[&FaceAnchor], _: &EncoderOptions) -> BinaryEncodeResult {
        self.unavailable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landon_anchor_model::MeshGeometry;

    #[test]
    fn test_unlinked_encoder_never_returns_data() {
        let anchor = MeshAnchor {
            id: "m".to_string(),
            transform: glam::Mat4::IDENTITY,
            geometry: MeshGeometry::default(),
        };
        let result = UnlinkedBinaryEncoder.encode_mesh_anchor(&anchor, &EncoderOptions::default());
        assert_eq!(result.status.code, EncoderStatusCode::UnsupportedFeature);
        assert!(result.data.is_none());
        assert!(!UnlinkedBinaryEncoder.is_available());
    }
}
