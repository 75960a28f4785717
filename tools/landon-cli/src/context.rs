//! Wiring the capture engine from application config.

use std::sync::Arc;

use landon_capture_engine::{
    DestinationResolver, EncoderDispatch, ExportPipeline, ExportWriter, FormatRegistry,
};
use landon_common::config::{AppConfig, ExportMode};
use landon_common::LandonResult;
use landon_encoders::{EncoderOptions, ObjEncoder, UnlinkedBinaryEncoder};
use landon_platform_linux::{FileReferenceStore, FsBookmarker};

pub fn destination_resolver(config: &AppConfig) -> DestinationResolver {
    DestinationResolver::new(
        Arc::new(FileReferenceStore::new(&config.preferences_file)),
        Arc::new(FsBookmarker::new()),
    )
}

/// Codecs linked into this build. No compressed-binary codec ships yet.
pub fn encoder_dispatch(config: &AppConfig) -> EncoderDispatch {
    EncoderDispatch::new(
        Arc::new(UnlinkedBinaryEncoder),
        Arc::new(ObjEncoder::new()),
        EncoderOptions::from(config.capture.encoder),
    )
}

pub fn export_pipeline(
    config: &AppConfig,
    registry: FormatRegistry,
    dispatch: EncoderDispatch,
    mode: ExportMode,
) -> LandonResult<ExportPipeline> {
    let writer = ExportWriter::new(Arc::new(destination_resolver(config)), &config.exports_dir)?;
    Ok(ExportPipeline::new(Arc::new(registry), dispatch, writer, mode))
}
