//! Manage the export destination.

use std::path::PathBuf;

use landon_common::config::AppConfig;

use crate::context;

pub fn select(config: &AppConfig, path: PathBuf) -> anyhow::Result<()> {
    let resolver = context::destination_resolver(config);
    resolver
        .select(&path)
        .map_err(|e| anyhow::anyhow!("Failed to select destination: {e}"))?;
    println!("Exports will be written to: {}", path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    let resolver = context::destination_resolver(config);

    match resolver.resolve() {
        Some(path) => println!("Export destination: {}", path.display()),
        None if resolver.has_selection() => {
            println!("Selected destination is stale or inaccessible; select it again.");
            println!("Exports go to: {}", config.exports_dir.display());
        }
        None => println!(
            "No destination selected. Exports go to: {}",
            config.exports_dir.display()
        ),
    }
    Ok(())
}

pub fn clear(config: &AppConfig) -> anyhow::Result<()> {
    context::destination_resolver(config).clear()?;
    println!(
        "Destination cleared. Exports go to: {}",
        config.exports_dir.display()
    );
    Ok(())
}
