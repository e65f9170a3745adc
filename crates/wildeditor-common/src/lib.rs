//! # Wildeditor Common
//!
//! Common types shared by every part of the wilderness map editor core.
//!
//! This crate provides:
//! - Coordinates and bounding boxes on the `[-1024, 1024]` grid
//! - ID types (region, path and zone vnums)
//! - The sector table (ids 0-36 and their names)
//! - Validation, parse and range-warning types plus the diagnostics channel
//! - Schema versions for stored snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;
pub mod sector;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::sector::*;
    pub use crate::version::*;
}

pub use prelude::*;
