//! Landon Encoders
//!
//! Contracts for the geometry codecs used by capture export, plus the
//! text encoder that ships with Landon:
//!
//! - **Binary:** A compressed-binary codec with per-anchor-type entry points
//!   that reports an explicit status code alongside its payload.
//! - **Text:** A plain-text mesh codec whose entry points return the payload
//!   directly, or nothing on failure. [`ObjEncoder`] implements it.
//!
//! ```text
//!   &[&MeshAnchor] ──┐
//!   &[&PlaneAnchor] ─┼──▶ BinaryGeometryEncoder ──▶ BinaryEncodeResult { status, data }
//!   &[&FaceAnchor] ──┘
//!                    └──▶ TextMeshEncoder       ──▶ Option<Vec<u8>>
//! ```

pub mod binary;
pub mod coloring;
pub mod obj;
pub mod status;
pub mod text;

pub use binary::*;
pub use coloring::*;
pub use obj::ObjEncoder;
pub use status::*;
pub use text::*;
