//! # Wildeditor Terrain
//!
//! Map model and terrain resolution for the wilderness editor.
//!
//! This crate provides:
//! - Validated regions and paths with their stored record shapes
//! - Spatial queries over candidate sets
//! - Layered terrain resolution over a pluggable elevation function
//! - Path orientation glyphs for display
//! - The persistence port implemented by stores

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod elevation;
pub mod glyph;
pub mod path;
pub mod port;
pub mod query;
pub mod region;
pub mod resolve;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::elevation::*;
    pub use crate::glyph::*;
    pub use crate::path::*;
    pub use crate::port::*;
    pub use crate::query::*;
    pub use crate::region::*;
    pub use crate::resolve::*;
}

pub use prelude::*;
