//! One capture run: classify, encode per group, write per group.

use std::path::PathBuf;
use std::sync::Arc;

use landon_anchor_model::{AnchorKind, SessionSnapshot};
use landon_common::config::ExportMode;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::classifier::{classify, largest_mesh_anchor, AnchorGroup};
use crate::dispatch::{EncodeResult, EncoderDispatch};
use crate::format::{ExportFormat, FormatRegistry};
use crate::writer::ExportWriter;

const EVENT_CAPACITY: usize = 64;

/// Diagnostic event emitted while a capture runs.
///
/// Nothing in the pipeline depends on anyone listening.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CaptureEvent {
    Exported {
        capture_id: u64,
        role: &'static str,
        format: ExportFormat,
        path: PathBuf,
    },
    Skipped {
        capture_id: u64,
        role: &'static str,
        format: ExportFormat,
        reason: String,
    },
    Completed {
        capture_id: u64,
        exported: usize,
    },
}

/// What one capture run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureSummary {
    pub capture_id: u64,

    /// Format read from the registry when the run started.
    pub format: ExportFormat,

    /// Files written, in mesh, plane, face order.
    pub exported: Vec<PathBuf>,

    /// Non-empty groups that failed to encode or write.
    pub skipped: Vec<AnchorKind>,
}

impl CaptureSummary {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Capture export pipeline.
///
/// Groups are independent: a failure in one never prevents another from
/// being exported, and no failure is returned to the caller.
pub struct ExportPipeline {
    registry: Arc<FormatRegistry>,
    dispatch: EncoderDispatch,
    writer: ExportWriter,
    mode: ExportMode,
    events: broadcast::Sender<CaptureEvent>,
}

impl ExportPipeline {
    pub fn new(
        registry: Arc<FormatRegistry>,
        dispatch: EncoderDispatch,
        writer: ExportWriter,
        mode: ExportMode,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            registry,
            dispatch,
            writer,
            mode,
            events,
        }
    }

    pub fn registry(&self) -> &Arc<FormatRegistry> {
        &self.registry
    }

    pub fn dispatch(&self) -> &EncoderDispatch {
        &self.dispatch
    }

    pub fn writer(&self) -> &ExportWriter {
        &self.writer
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CaptureEvent> {
        self.events.subscribe()
    }

    /// Export every non-empty group of `snapshot` in the active format.
    pub fn run(&self, capture_id: u64, snapshot: &SessionSnapshot) -> CaptureSummary {
        let format = self.registry.active();
        let target = self.writer.resolve_target();
        let _span = tracing::info_span!("capture", id = capture_id, %format).entered();

        if !self.dispatch.supports(format) {
            tracing::warn!(
                codec = self.dispatch.codec_name(format),
                "Active format has no linked codec"
            );
        }
        tracing::debug!(dir = %target.dir().display(), "Export target resolved");

        let mut summary = CaptureSummary {
            capture_id,
            format,
            exported: Vec::new(),
            skipped: Vec::new(),
        };

        let groups = classify(snapshot).into_groups();
        tracing::debug!(
            anchors = snapshot.len(),
            groups = groups.len(),
            mode = ?self.mode,
            "Snapshot classified"
        );

        for group in &groups {
            let kind = group.kind();
            let role = kind.role();

            let encoded = self.encode_group(group, format);
            let outcome = match encoded {
                EncodeResult::Success(bytes) => self
                    .writer
                    .write(&target, &bytes, role, format)
                    .map_err(|e| format!("write failed: {e}")),
                EncodeResult::Failure(reason) => Err(format!("encode failed: {reason}")),
            };

            match outcome {
                Ok(path) => {
                    tracing::info!(role, path = %path.display(), "Group exported");
                    self.emit(CaptureEvent::Exported {
                        capture_id,
                        role,
                        format,
                        path: path.clone(),
                    });
                    summary.exported.push(path);
                }
                Err(reason) => {
                    tracing::warn!(role, %reason, "Group skipped");
                    self.emit(CaptureEvent::Skipped {
                        capture_id,
                        role,
                        format,
                        reason,
                    });
                    summary.skipped.push(kind);
                }
            }
        }

        self.emit(CaptureEvent::Completed {
            capture_id,
            exported: summary.exported.len(),
        });
        summary
    }

    fn encode_group(&self, group: &AnchorGroup<'_>, format: ExportFormat) -> EncodeResult {
        match (self.mode, group) {
            (ExportMode::LargestMesh, AnchorGroup::Mesh(anchors)) => {
                match largest_mesh_anchor(anchors) {
                    Some(anchor) => {
                        tracing::debug!(
                            anchor = %anchor.id,
                            faces = anchor.face_count(),
                            "Largest mesh anchor selected"
                        );
                        self.dispatch.encode_mesh_anchor(anchor, format)
                    }
                    None => EncodeResult::Failure("no mesh anchor to select".to_string()),
                }
            }
            _ => self.dispatch.encode(group, format),
        }
    }

    fn emit(&self, event: CaptureEvent) {
        // No receivers is the normal case.
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("registry", &self.registry)
            .field("dispatch", &self.dispatch)
            .field("writer", &self.writer)
            .field("mode", &self.mode)
            .finish()
    }
}
