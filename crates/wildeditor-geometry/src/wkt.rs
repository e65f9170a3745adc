//! Well-known-text codec for polygon rings and linestrings.
//!
//! Regions are stored as `POLYGON((x1 y1, x2 y2, ..., x1 y1))` (one closed
//! ring, no holes) and paths as `LINESTRING(x1 y1, x2 y2, ...)`. Numbers are
//! written with Rust's shortest round-trip float formatting, so
//! encode → decode → encode never drifts.

use tracing::warn;
use wildeditor_common::{Coordinate, ParseError, RangeWarning, ValidationError};

/// Half-width of the square written for a single-point polygon.
pub const DEFAULT_LANDMARK_RADIUS: f64 = 0.001;

const POLYGON: &str = "POLYGON";
const LINESTRING: &str = "LINESTRING";

/// Encodes a polygon ring using [`DEFAULT_LANDMARK_RADIUS`] for single points.
pub fn encode_polygon(coords: &[Coordinate]) -> Result<String, ValidationError> {
    encode_polygon_with_radius(coords, DEFAULT_LANDMARK_RADIUS)
}

/// Encodes a polygon ring.
///
/// A single coordinate becomes a closed square of half-width `radius` around
/// it. Otherwise the ring is closed by repeating the first vertex unless the
/// caller already did.
pub fn encode_polygon_with_radius(
    coords: &[Coordinate],
    radius: f64,
) -> Result<String, ValidationError> {
    match coords {
        [] => Err(ValidationError::TooFewVertices {
            required: 1,
            found: 0,
        }),
        [center] => Ok(format_polygon(&landmark_ring(*center, radius))),
        [first, .., last] => {
            if first == last {
                Ok(format_polygon(coords))
            } else {
                let mut ring = coords.to_vec();
                ring.push(*first);
                Ok(format_polygon(&ring))
            }
        },
    }
}

/// Builds the closed 5-vertex square stored for a landmark.
pub fn landmark_ring(center: Coordinate, radius: f64) -> [Coordinate; 5] {
    if let Some(warning) = check_landmark_radius(radius) {
        warn!("{warning}");
    }
    let Coordinate { x, y } = center;
    [
        Coordinate::new(x - radius, y - radius),
        Coordinate::new(x + radius, y - radius),
        Coordinate::new(x + radius, y + radius),
        Coordinate::new(x - radius, y + radius),
        Coordinate::new(x - radius, y - radius),
    ]
}

/// Returns a warning if `radius` would produce a zero-size landmark square.
#[must_use]
pub fn check_landmark_radius(radius: f64) -> Option<RangeWarning> {
    (!(radius.is_finite() && radius > 0.0)).then_some(RangeWarning::DegenerateLandmark { radius })
}

/// Decodes a polygon into an open ring (closing duplicate removed).
pub fn decode_polygon(text: &str) -> Result<Vec<Coordinate>, ParseError> {
    let mut ring = decode_polygon_closed(text)?;
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    Ok(ring)
}

/// Decodes a polygon ring exactly as stored, closing vertex included.
pub fn decode_polygon_closed(text: &str) -> Result<Vec<Coordinate>, ParseError> {
    let body = strip_keyword(text, POLYGON)?;
    let rings = strip_parens(body)?;
    let ring = strip_parens(rings)?;
    if ring.contains(['(', ')']) {
        return Err(ParseError::MultipleRings);
    }
    parse_vertices(ring)
}

/// Encodes a linestring. Vertices are written verbatim, never closed.
pub fn encode_linestring(coords: &[Coordinate]) -> Result<String, ValidationError> {
    if coords.is_empty() {
        return Err(ValidationError::TooFewVertices {
            required: 1,
            found: 0,
        });
    }
    Ok(format!("{LINESTRING}({})", format_vertices(coords)))
}

/// Decodes a linestring, keeping duplicates and order.
pub fn decode_linestring(text: &str) -> Result<Vec<Coordinate>, ParseError> {
    let body = strip_keyword(text, LINESTRING)?;
    parse_vertices(strip_parens(body)?)
}

fn format_polygon(ring: &[Coordinate]) -> String {
    format!("{POLYGON}(({}))", format_vertices(ring))
}

fn format_vertices(coords: &[Coordinate]) -> String {
    coords
        .iter()
        .map(|c| format!("{} {}", c.x, c.y))
        .collect::<Vec<_>>()
        .join(", ")
}

fn strip_keyword<'a>(text: &'a str, keyword: &'static str) -> Result<&'a str, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    match text.get(..keyword.len()) {
        Some(head) if head.eq_ignore_ascii_case(keyword) => Ok(&text[keyword.len()..]),
        _ => Err(ParseError::UnexpectedKeyword { expected: keyword }),
    }
}

/// Strips one level of parentheses and returns the trimmed inside.
fn strip_parens(text: &str) -> Result<&str, ParseError> {
    let text = text.trim();
    let inner = text
        .strip_prefix('(')
        .ok_or(ParseError::MissingDelimiter('('))?;
    let close = inner.rfind(')').ok_or(ParseError::MissingDelimiter(')'))?;
    let trailing = inner[close + 1..].trim();
    if !trailing.is_empty() {
        return Err(ParseError::TrailingInput(trailing.to_string()));
    }
    Ok(inner[..close].trim())
}

fn parse_vertices(body: &str) -> Result<Vec<Coordinate>, ParseError> {
    if body.is_empty() {
        return Err(ParseError::NoVertices);
    }
    body.split(',')
        .enumerate()
        .map(|(index, vertex)| parse_vertex(index, vertex))
        .collect()
}

fn parse_vertex(index: usize, text: &str) -> Result<Coordinate, ParseError> {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(x), Some(y), None) => Ok(Coordinate::new(parse_number(x)?, parse_number(y)?)),
        _ => Err(ParseError::InvalidVertex {
            index,
            text: text.trim().to_string(),
        }),
    }
}

fn parse_number(token: &str) -> Result<f64, ParseError> {
    let value: f64 = token
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFiniteNumber(token.to_string()))
    }
}
