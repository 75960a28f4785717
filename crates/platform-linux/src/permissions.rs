//! Directory capability detection and guidance.
//!
//! Exports land either in the user-selected destination or in the
//! application's private exports directory. Both need to be writable.

use std::path::Path;

use crate::bookmark::can_read_write;

/// A system capability that Landon may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check that a directory exists and accepts new files.
pub fn check_directory(name: &str, path: &Path, required: bool) -> Capability {
    let exists = path.is_dir();
    let available = exists && can_read_write(path);

    let fix_instructions = if !exists {
        Some(format!("Create the directory: mkdir -p {}", path.display()))
    } else if !available {
        Some(format!(
            "Grant write access: chmod u+rwx {}",
            path.display()
        ))
    } else {
        None
    };

    Capability {
        name: name.to_string(),
        description: path.display().to_string(),
        available,
        required,
        fix_instructions,
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("Landon Export Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_suggests_mkdir() {
        let dir = tempfile::tempdir().unwrap();
        let cap = check_directory("Exports", &dir.path().join("missing"), true);
        assert!(!cap.available);
        assert!(cap.fix_instructions.unwrap().starts_with("Create the directory"));
    }

    #[test]
    fn test_writable_directory_is_available() {
        let dir = tempfile::tempdir().unwrap();
        let cap = check_directory("Exports", dir.path(), true);
        assert!(cap.available);
        assert!(cap.fix_instructions.is_none());
    }
}
