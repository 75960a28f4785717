//! Landon Capture Engine
//!
//! Turns a snapshot of tracked anchors into exported geometry files.
//! A capture request is observed on the caller's thread, which takes the
//! snapshot and hands it to a single background worker. The worker
//! classifies the anchors, encodes each non-empty group in the active
//! format, and writes the payload to the resolved export destination.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  CaptureOrchestrator                     │
//! │  capture() ──▶ SnapshotSource ──▶ CaptureWorker (FIFO)   │
//! │                                          │               │
//! │                                          ▼               │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                  ExportPipeline                    │  │
//! │  │  classify ──▶ EncoderDispatch ──▶ ExportWriter     │  │
//! │  │      (mesh / plane / face)  │           │          │  │
//! │  │                FormatRegistry  DestinationResolver │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                          │               │
//! │                                          ▼               │
//! │      mesh-anchors.drc  plane-anchors.obj  face-anchors…  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure below the orchestrator degrades to "that file was not
//! exported": it is logged and reported on the optional event channel,
//! never returned to the caller.

pub mod classifier;
pub mod destination;
pub mod dispatch;
pub mod format;
pub mod orchestrator;
pub mod pipeline;
pub mod worker;
pub mod writer;

pub use classifier::{classify, largest_mesh_anchor, AnchorGroup, ClassifiedAnchors};
pub use destination::DestinationResolver;
pub use dispatch::{EncodeResult, EncoderDispatch};
pub use format::{ExportFormat, FormatRegistry};
pub use orchestrator::{CaptureOrchestrator, SnapshotSource};
pub use pipeline::{CaptureEvent, CaptureSummary, ExportPipeline};
pub use worker::CaptureWorker;
pub use writer::{ExportTarget, ExportWriter};
