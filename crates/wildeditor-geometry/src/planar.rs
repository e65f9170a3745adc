//! Planar distance and containment primitives.

use glam::DVec2;
use wildeditor_common::Coordinate;

/// Distances below this are treated as lying on a segment.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Euclidean distance from `p` to the segment `a`-`b`.
#[must_use]
pub fn distance_to_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    let (p, a, b) = (p.to_vec(), a.to_vec(), b.to_vec());
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Iterates the edges of a ring, including the closing edge.
pub fn ring_edges(ring: &[Coordinate]) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Minimum distance from `p` to the boundary of a ring.
///
/// The ring may be open or closed. Returns `f64::INFINITY` for an empty ring.
#[must_use]
pub fn distance_to_ring(p: Coordinate, ring: &[Coordinate]) -> f64 {
    match ring {
        [] => f64::INFINITY,
        [only] => p.distance(*only),
        _ => ring_edges(ring)
            .map(|(a, b)| distance_to_segment(p, a, b))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Ray-casting containment test; points on the boundary count as inside.
#[must_use]
pub fn point_in_ring(p: Coordinate, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 {
        return distance_to_ring(p, ring) <= BOUNDARY_EPSILON;
    }
    if distance_to_ring(p, ring) <= BOUNDARY_EPSILON {
        return true;
    }

    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Index and distance of the vertex of `line` closest to `p`.
#[must_use]
pub fn nearest_vertex(p: Coordinate, line: &[Coordinate]) -> Option<(usize, f64)> {
    line.iter()
        .enumerate()
        .map(|(i, v)| (i, p.distance(*v)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Returns true if any vertex of `line` lies within `radius` of `p`.
#[must_use]
pub fn any_vertex_within(p: Coordinate, line: &[Coordinate], radius: f64) -> bool {
    line.iter().any(|v| p.distance(*v) <= radius)
}

/// Unit direction from `from` towards `to`, or zero if they coincide.
#[must_use]
pub fn direction(from: Coordinate, to: Coordinate) -> DVec2 {
    (to.to_vec() - from.to_vec()).normalize_or_zero()
}
