//! Landon Anchor Model
//!
//! Defines the core data contracts for captured tracking data:
//! - **Anchors:** Mesh, plane, and face anchors reported by the tracking session
//! - **Snapshots:** The immutable set of anchors known at one instant
//! - **Geometry buffers:** World-space vertex/face arrays derived from anchors
//!
//! Anchors store geometry in anchor-local coordinates together with the
//! anchor's transform. Geometry buffers apply the transform so every
//! exported vertex is in world space.

pub mod anchor;
pub mod buffer;
pub mod classification;
pub mod snapshot;

pub use anchor::*;
pub use buffer::*;
pub use classification::*;
pub use snapshot::*;
