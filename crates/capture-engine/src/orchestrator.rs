//! Capture entry point shared by every trigger surface.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use landon_anchor_model::SessionSnapshot;
use landon_common::LandonResult;
use tokio::sync::broadcast;

use crate::format::ExportFormat;
use crate::pipeline::{CaptureEvent, ExportPipeline};
use crate::worker::CaptureWorker;

/// Something that can hand out the current set of tracked anchors.
///
/// Returns `None` when no session is running or its state can't be read.
pub trait SnapshotSource: Send + Sync {
    fn current_snapshot(&self) -> Option<SessionSnapshot>;
}

impl<F> SnapshotSource for F
where
    F: Fn() -> Option<SessionSnapshot> + Send + Sync,
{
    fn current_snapshot(&self) -> Option<SessionSnapshot> {
        self()
    }
}

/// Receives user actions and turns capture requests into background jobs.
///
/// The snapshot is taken on the calling thread; everything after that runs
/// on the capture worker, one capture at a time.
pub struct CaptureOrchestrator {
    source: Arc<dyn SnapshotSource>,
    pipeline: Arc<ExportPipeline>,
    worker: CaptureWorker,
    next_id: AtomicU64,
}

impl CaptureOrchestrator {
    /// Must be called from within a tokio runtime.
    pub fn new(source: Arc<dyn SnapshotSource>, pipeline: Arc<ExportPipeline>) -> Self {
        Self {
            source,
            pipeline,
            worker: CaptureWorker::spawn(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn pipeline(&self) -> &Arc<ExportPipeline> {
        &self.pipeline
    }

    /// Request a capture. Returns the capture id if a job was queued.
    ///
    /// A missing or empty snapshot is a silent no-op.
    pub fn capture(&self) -> Option<u64> {
        let Some(snapshot) = self.source.current_snapshot() else {
            tracing::debug!("No snapshot available, capture ignored");
            return None;
        };
        if snapshot.is_empty() {
            tracing::debug!("Snapshot has no anchors, capture ignored");
            return None;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pipeline = Arc::clone(&self.pipeline);
        tracing::info!(id, anchors = snapshot.len(), "Capture queued");

        let queued = self.worker.enqueue(move || {
            pipeline.run(id, &snapshot);
        });
        if !queued {
            tracing::warn!(id, "Capture worker has stopped, capture dropped");
            return None;
        }
        Some(id)
    }

    /// Advance to the next export format.
    pub fn rotate_format(&self) -> ExportFormat {
        let format = self.pipeline.registry().rotate();
        tracing::info!(%format, "Export format rotated");
        format
    }

    pub fn active_format(&self) -> ExportFormat {
        self.pipeline.registry().active()
    }

    /// Store `location` as the export destination.
    pub fn select_destination(&self, location: &Path) -> LandonResult<()> {
        self.pipeline.writer().resolver().select(location)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CaptureEvent> {
        self.pipeline.subscribe()
    }

    /// Wait for every capture queued so far.
    pub async fn flush(&self) {
        self.worker.flush().await;
    }

    /// Finish queued captures and stop the worker.
    pub async fn shutdown(self) {
        self.worker.shutdown().await;
        tracing::debug!("Capture orchestrator shut down");
    }
}

impl std::fmt::Debug for CaptureOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureOrchestrator")
            .field("pipeline", &self.pipeline)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
