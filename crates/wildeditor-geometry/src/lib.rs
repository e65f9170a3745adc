//! # Wildeditor Geometry
//!
//! Geometry primitives for the wilderness map editor.
//!
//! This crate handles:
//! - The WKT codec for region polygons and path linestrings
//! - Landmark detection (collapsing tiny stored squares back to points)
//! - Planar distance and point-in-polygon tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod landmark;
pub mod planar;
pub mod wkt;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::landmark::*;
    pub use crate::planar::*;
    pub use crate::wkt::*;
}

pub use prelude::*;
