//! List export formats.

use landon_capture_engine::FormatRegistry;
use landon_common::config::AppConfig;

use crate::context;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let registry = FormatRegistry::new();
    let dispatch = context::encoder_dispatch(config);
    let active = registry.active();

    println!("Export formats (rotation order):");
    for format in registry.formats() {
        let marker = if *format == active { "*" } else { " " };
        let status = if dispatch.supports(*format) {
            "ready"
        } else {
            "no codec linked"
        };
        println!(
            "  {marker} {:<6} .{:<4} codec: {} ({status})",
            format.label(),
            format.extension(),
            dispatch.codec_name(*format)
        );
    }

    let rotation: Vec<String> = (0..=registry.formats().len())
        .map(|step| {
            let format = if step == 0 { active } else { registry.rotate() };
            format.label().to_string()
        })
        .collect();
    println!();
    println!("Rotation: {}", rotation.join(" -> "));

    Ok(())
}
