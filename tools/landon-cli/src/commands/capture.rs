//! Export a saved snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use landon_anchor_model::{AnchorKind, SessionSnapshot};
use landon_capture_engine::{
    CaptureEvent, CaptureOrchestrator, EncoderDispatch, ExportFormat, FormatRegistry,
};
use landon_common::config::{AppConfig, ExportMode};

use crate::context;

pub async fn run(
    config: &AppConfig,
    snapshot_path: PathBuf,
    format: Option<ExportFormat>,
    mode: Option<ExportMode>,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = SessionSnapshot::load(&snapshot_path)
        .map_err(|e| anyhow::anyhow!("Failed to load snapshot: {e}"))?;
    tracing::debug!(
        path = %snapshot_path.display(),
        anchors = snapshot.len(),
        "Snapshot loaded"
    );

    let registry = FormatRegistry::new();
    if let Some(format) = format {
        registry.activate(format);
    }
    let mode = mode.unwrap_or(config.capture.export_mode);

    let dispatch = context::encoder_dispatch(config);
    ensure_codec(&dispatch, registry.active())?;

    if !json {
        println!("Snapshot: {}", snapshot_path.display());
        for kind in AnchorKind::ALL {
            println!("  {kind}: {}", snapshot.count_of(kind));
        }
        println!("Format: {}", registry.active());
        println!("Mode: {mode:?}");
        println!();
    }

    let pipeline = context::export_pipeline(config, registry, dispatch, mode)?;
    let orchestrator = CaptureOrchestrator::new(
        Arc::new(move || Some(snapshot.clone())),
        Arc::new(pipeline),
    );
    let mut events = orchestrator.subscribe();

    let queued = orchestrator.capture();
    orchestrator.shutdown().await;

    if queued.is_none() {
        if !json {
            println!("Snapshot has no anchors; nothing exported.");
        }
        return Ok(());
    }

    while let Ok(event) = events.try_recv() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
            continue;
        }
        match event {
            CaptureEvent::Exported { role, path, .. } => {
                println!("[OK]   {role} -> {}", path.display());
            }
            CaptureEvent::Skipped { role, reason, .. } => {
                println!("[SKIP] {role}: {reason}");
            }
            CaptureEvent::Completed { exported, .. } => {
                println!();
                println!("{exported} file(s) exported.");
            }
        }
    }

    Ok(())
}

/// Refuse to run when the chosen format has no codec in this build.
fn ensure_codec(dispatch: &EncoderDispatch, format: ExportFormat) -> anyhow::Result<()> {
    if dispatch.supports(format) {
        return Ok(());
    }
    let alternatives: Vec<&str> = ExportFormat::ALL
        .into_iter()
        .filter(|f| dispatch.supports(*f))
        .map(|f| f.extension())
        .collect();
    anyhow::bail!(
        "No {format} codec is linked into this build; nothing would be exported. \
         Use --format {}",
        alternatives.join("|")
    )
}
