//! Routing anchor groups to the codec for the active format.

use std::sync::Arc;

use landon_anchor_model::MeshAnchor;
use landon_encoders::{BinaryEncodeResult, BinaryGeometryEncoder, EncoderOptions, TextMeshEncoder};

use crate::classifier::AnchorGroup;
use crate::format::ExportFormat;

/// Normalized outcome of one codec invocation.
///
/// Produced only by [`EncoderDispatch`], which guarantees a `Success`
/// payload is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeResult {
    Success(Vec<u8>),
    Failure(String),
}

impl EncodeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EncodeResult::Success(_))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            EncodeResult::Success(bytes) => Some(bytes),
            EncodeResult::Failure(_) => None,
        }
    }

    /// Only an `Ok` status with a non-empty payload counts as success.
    pub(crate) fn from_binary(result: BinaryEncodeResult) -> Self {
        if !result.status.is_ok() {
            return EncodeResult::Failure(result.status.to_string());
        }
        match result.data {
            Some(data) if !data.is_empty() => EncodeResult::Success(data),
            _ => EncodeResult::Failure("codec reported Ok without a payload".to_string()),
        }
    }

    pub(crate) fn from_text(payload: Option<Vec<u8>>) -> Self {
        match payload {
            Some(data) if !data.is_empty() => EncodeResult::Success(data),
            _ => EncodeResult::Failure("text encoder produced no payload".to_string()),
        }
    }
}

/// Picks the codec path for a format and normalizes its result.
#[derive(Clone)]
pub struct EncoderDispatch {
    binary: Arc<dyn BinaryGeometryEncoder>,
    text: Arc<dyn TextMeshEncoder>,
    options: EncoderOptions,
}

impl EncoderDispatch {
    pub fn new(
        binary: Arc<dyn BinaryGeometryEncoder>,
        text: Arc<dyn TextMeshEncoder>,
        options: EncoderOptions,
    ) -> Self {
        Self {
            binary,
            text,
            options,
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Whether `format` has a codec that can produce payloads.
    pub fn supports(&self, format: ExportFormat) -> bool {
        match format {
            ExportFormat::Draco => self.binary.is_available(),
            ExportFormat::Obj => true,
        }
    }

    /// Name of the codec behind `format`.
    pub fn codec_name(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::Draco => self.binary.name(),
            ExportFormat::Obj => self.text.name(),
        }
    }

    /// Encode a whole group as one combined payload.
    ///
    /// The group must be non-empty; callers filter empty groups out first.
    pub fn encode(&self, group: &AnchorGroup<'_>, format: ExportFormat) -> EncodeResult {
        debug_assert!(!group.is_empty(), "empty anchor groups are never dispatched");

        let _span = tracing::debug_span!(
            "encode",
            role = group.kind().role(),
            %format,
            anchors = group.len()
        )
        .entered();

        let result = match format {
            ExportFormat::Draco => EncodeResult::from_binary(match group {
                AnchorGroup::Mesh(a) => self.binary.encode_mesh_anchors(a, &self.options),
                AnchorGroup::Plane(a) => self.binary.encode_plane_anchors(a, &self.options),
                AnchorGroup::Face(a) => self.binary.encode_face_anchors(a, &self.options),
            }),
            ExportFormat::Obj => EncodeResult::from_text(match group {
                AnchorGroup::Mesh(a) => self.text.encode_mesh_anchors(a),
                AnchorGroup::Plane(a) => self.text.encode_plane_anchors(a),
                AnchorGroup::Face(a) => self.text.encode_face_anchors(a),
            }),
        };

        if let EncodeResult::Success(bytes) = &result {
            tracing::debug!(bytes = bytes.len(), "Group encoded");
        }
        result
    }

    /// Encode one mesh anchor on its own.
    pub fn encode_mesh_anchor(&self, anchor: &MeshAnchor, format: ExportFormat) -> EncodeResult {
        let _span = tracing::debug_span!("encode", anchor = %anchor.id, %format).entered();

        match format {
            ExportFormat::Draco => {
                EncodeResult::from_binary(self.binary.encode_mesh_anchor(anchor, &self.options))
            }
            ExportFormat::Obj => EncodeResult::from_text(self.text.encode_mesh_anchors(&[anchor])),
        }
    }
}

impl std::fmt::Debug for EncoderDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderDispatch")
            .field("binary", &self.binary.name())
            .field("text", &self.text.name())
            .field("options", &self.options)
            .finish()
    }
}
