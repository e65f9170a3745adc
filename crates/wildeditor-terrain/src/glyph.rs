//! Display orientation of a path at a point.
//!
//! The glyph only affects rendering; it never changes the resolved sector.

use glam::DVec2;
use serde::Serialize;
use wildeditor_common::Coordinate;
use wildeditor_geometry::{direction, nearest_vertex};

use crate::path::Path;

/// How a path runs through a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathGlyph {
    /// Runs north-south
    NorthSouth,
    /// Runs east-west
    EastWest,
    /// Turns, crosses or meets another path
    Intersection,
}

impl PathGlyph {
    /// Map symbol for the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::NorthSouth => '|',
            Self::EastWest => '-',
            Self::Intersection => '+',
        }
    }
}

fn axis(dir: DVec2) -> Option<PathGlyph> {
    if dir == DVec2::ZERO {
        None
    } else if dir.x.abs() >= dir.y.abs() {
        Some(PathGlyph::EastWest)
    } else {
        Some(PathGlyph::NorthSouth)
    }
}

/// Axis towards the first vertex distinct from `line[index]`, walking
/// backwards or forwards.
fn neighbor_axis(line: &[Coordinate], index: usize, forward: bool) -> Option<PathGlyph> {
    let here = line[index];
    let found = if forward {
        line[index + 1..].iter().find(|v| **v != here)
    } else {
        line[..index].iter().rev().find(|v| **v != here)
    };
    found.and_then(|v| axis(direction(here, *v)))
}

/// Orientation of a line at one of its vertices.
#[must_use]
pub fn orientation_at(line: &[Coordinate], index: usize) -> Option<PathGlyph> {
    if index >= line.len() {
        return None;
    }
    match (
        neighbor_axis(line, index, false),
        neighbor_axis(line, index, true),
    ) {
        (Some(a), Some(b)) if a == b => Some(a),
        (Some(_), Some(_)) => Some(PathGlyph::Intersection),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Glyph for a point given the paths matching it.
///
/// More than one path meeting at the point is always an intersection.
#[must_use]
pub fn glyph_at(paths: &[&Path], p: Coordinate) -> Option<PathGlyph> {
    match paths {
        [] => None,
        [path] => {
            let (index, _) = nearest_vertex(p, path.line())?;
            orientation_at(path.line(), index)
        },
        _ => Some(PathGlyph::Intersection),
    }
}
