//! Recovery of point landmarks from degenerate polygons.
//!
//! Landmarks are stored as tiny squares around a point (see
//! [`crate::wkt::landmark_ring`]). Decoding such a square yields four
//! nearly identical corners; this module collapses them back to the point.

use wildeditor_common::{Bounds, Coordinate, ParseError};

use crate::wkt::decode_polygon_closed;

/// Per-axis distance below which two vertices are the same.
pub const DEDUP_TOLERANCE: f64 = 0.001;

/// Width and height below which a small polygon is a landmark.
pub const LANDMARK_EXTENT: f64 = 0.01;

/// Maximum unique vertex count of a landmark square.
pub const MAX_LANDMARK_VERTICES: usize = 4;

/// Removes vertices lying within [`DEDUP_TOLERANCE`] of an earlier one.
#[must_use]
pub fn dedup_vertices(vertices: &[Coordinate]) -> Vec<Coordinate> {
    let mut unique: Vec<Coordinate> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !unique.iter().any(|u| u.approx_eq(*v, DEDUP_TOLERANCE)) {
            unique.push(*v);
        }
    }
    unique
}

/// Collapses a degenerate polygon to its landmark point.
///
/// Sequences shorter than three vertices are returned unchanged. Otherwise
/// the vertices are deduplicated; a single survivor or a tiny cluster of at
/// most four becomes one point (the survivor or the centroid), anything else
/// is returned deduplicated. Applying this twice gives the same result.
#[must_use]
pub fn detect_landmark(vertices: &[Coordinate]) -> Vec<Coordinate> {
    if vertices.len() < 3 {
        return vertices.to_vec();
    }

    let unique = dedup_vertices(vertices);
    if unique.len() == 1 {
        return unique;
    }

    if unique.len() <= MAX_LANDMARK_VERTICES {
        if let Some(bounds) = Bounds::from_points(&unique) {
            if bounds.width() < LANDMARK_EXTENT && bounds.height() < LANDMARK_EXTENT {
                return vec![centroid(&unique)];
            }
        }
    }

    unique
}

/// Decodes region polygon text and applies landmark detection.
///
/// Detection runs on the ring as stored so that a three-copy point such as
/// `POLYGON((-57 89,-57 89,-57 89))` still collapses. A genuine polygon comes
/// back as an open ring.
pub fn decode_region_polygon(text: &str) -> Result<Vec<Coordinate>, ParseError> {
    let ring = decode_polygon_closed(text)?;
    if ring.len() >= 3 {
        return Ok(detect_landmark(&ring));
    }
    Ok(dedup_vertices(&ring))
}

fn centroid(points: &[Coordinate]) -> Coordinate {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Coordinate::new(sx / n, sy / n)
}
