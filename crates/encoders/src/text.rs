//! Plain-text mesh codec contract.

use landon_anchor_model::{FaceAnchor, MeshAnchor, PlaneAnchor};

/// A plain-text mesh codec. Entry points return the encoded payload, or
/// `None` if the anchors could not be encoded.
pub trait TextMeshEncoder: Send + Sync {
    /// Codec name for logging.
    fn name(&self) -> &str;

    fn encode_mesh_anchors(&self, anchors: &[&MeshAnchor]) -> Option<Vec<u8>>;

    fn encode_plane_anchors(&self, anchors: &[&PlaneAnchor]) -> Option<Vec<u8>>;

    fn encode_face_anchors(&self, anchors: &[&FaceAnchor]) -> Option<Vec<u8>>;
}
