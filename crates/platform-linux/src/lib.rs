//! Landon Linux Platform Integration
//!
//! Platform-specific implementations for Linux:
//! - **Bookmarks:** Inode-pinned directory references that detect replacement
//! - **Preferences:** JSON-file persistence for the export destination
//! - **Permissions:** Directory capability checks and user guidance

pub mod bookmark;
pub mod permissions;
pub mod preferences;

pub use bookmark::*;
pub use preferences::*;
