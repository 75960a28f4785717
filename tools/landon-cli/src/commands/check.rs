//! Check export directories.

use landon_common::config::AppConfig;
use landon_platform_linux::permissions::{check_directory, print_capability_report};

use crate::context;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Landon System Check");
    println!("{}", "=".repeat(50));

    let mut capabilities = vec![check_directory("Default exports", &config.exports_dir, true)];

    let resolver = context::destination_resolver(config);
    match resolver.resolve() {
        Some(path) => capabilities.push(check_directory("Selected destination", &path, false)),
        None if resolver.has_selection() => {
            println!("[WARN] Selected destination is stale; exports fall back to the default.");
        }
        None => println!("[OK] No destination selected; using the default."),
    }

    println!();
    print_capability_report(&capabilities);

    let all_required_ok = capabilities
        .iter()
        .filter(|c| c.required)
        .all(|c| c.available);

    println!();
    if all_required_ok {
        println!("All required capabilities are available. Landon is ready.");
    } else {
        println!("Some required capabilities are missing. See above for fixes.");
    }

    Ok(())
}
