//! Error, warning and diagnostic types for the wilderness editor core.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::ids::RecordKind;

/// Errors raised by a persistence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Actual version found
        actual: String,
    },

    /// Two records of the same kind share a vnum
    #[error("Duplicate {kind} vnum {vnum}")]
    DuplicateVnum {
        /// Kind of record
        kind: RecordKind,
        /// The repeated vnum
        vnum: i32,
    },
}

/// A region or path that does not satisfy the data model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Coordinate outside `[-1024, 1024]`
    #[error("Coordinate ({x}, {y}) is outside the world")]
    CoordinateOutOfBounds {
        /// X value
        x: f64,
        /// Y value
        y: f64,
    },

    /// NaN or infinite coordinate
    #[error("Coordinate is not a finite number")]
    NonFiniteCoordinate,

    /// Not enough distinct vertices for the geometry kind
    #[error("Geometry needs at least {required} distinct vertices, found {found}")]
    TooFewVertices {
        /// Minimum distinct vertex count
        required: usize,
        /// Distinct vertices found
        found: usize,
    },

    /// Region type code outside the known set
    #[error("Unknown region type code {0}")]
    UnknownRegionType(i32),

    /// Path type code outside the known set
    #[error("Unknown path type code {0}")]
    UnknownPathType(i32),

    /// Record has no geometry column value
    #[error("Record has no geometry")]
    MissingGeometry,

    /// Sector override region stored without a sector
    #[error("Sector override region has no sector value")]
    MissingSector,

    /// Empty name where one is required
    #[error("Name must not be empty")]
    EmptyName,

    /// Name longer than the storage column allows
    #[error("Name is {len} characters, maximum is {max}")]
    NameTooLong {
        /// Name length in characters
        len: usize,
        /// Maximum allowed
        max: usize,
    },
}

/// Malformed geometry text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or whitespace
    #[error("Geometry text is empty")]
    Empty,

    /// Input did not start with the expected keyword
    #[error("Expected {expected} geometry")]
    UnexpectedKeyword {
        /// Keyword that was expected
        expected: &'static str,
    },

    /// A parenthesis is missing
    #[error("Missing '{0}'")]
    MissingDelimiter(char),

    /// Polygon text carries more than one ring
    #[error("Polygon holes and multiple rings are not supported")]
    MultipleRings,

    /// Text found after the closing parenthesis
    #[error("Unexpected trailing text: {0}")]
    TrailingInput(String),

    /// Vertex without exactly two members
    #[error("Vertex {index} is malformed: '{text}'")]
    InvalidVertex {
        /// Position of the vertex in the list
        index: usize,
        /// The offending vertex text
        text: String,
    },

    /// Token that is not a number
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// NaN or infinity token
    #[error("Number '{0}' is not finite")]
    NonFiniteNumber(String),

    /// Geometry without any vertex
    #[error("Geometry has no vertices")]
    NoVertices,
}

/// Reason a stored record could not be turned into an entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Geometry text did not parse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Decoded record is not a valid entity
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Out-of-range value that is accepted but reported.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum RangeWarning {
    /// Sector identifier outside 0-36
    #[error("{kind} {vnum} uses sector {value}, outside 0-36")]
    SectorOutOfRange {
        /// Kind of record carrying the value
        kind: RecordKind,
        /// Record vnum
        vnum: i32,
        /// The raw sector value
        value: i32,
    },

    /// Landmark radius that yields a zero-size square
    #[error("Landmark radius {radius} produces a degenerate polygon")]
    DegenerateLandmark {
        /// The requested radius
        radius: f64,
    },
}

/// An observable event raised while processing a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A record was skipped
    #[error("Skipped {kind} {vnum}: {reason}")]
    Skipped {
        /// Kind of record
        kind: RecordKind,
        /// Record vnum
        vnum: i32,
        /// Why it was skipped
        reason: RecordError,
    },

    /// A value was accepted but is out of range
    #[error("{0}")]
    Range(#[from] RangeWarning),
}

/// Collects diagnostics raised while processing a batch.
///
/// Every diagnostic is logged when pushed, so skipped records are never
/// silently lost even if the caller ignores the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Records a skipped record.
    pub fn skip(&mut self, kind: RecordKind, vnum: i32, reason: impl Into<RecordError>) {
        self.push(Diagnostic::Skipped {
            kind,
            vnum,
            reason: reason.into(),
        });
    }

    /// Appends all entries of another collection.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the diagnostics in the order they were raised.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Vnums of skipped records of the given kind.
    pub fn skipped(&self, kind: RecordKind) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().filter_map(move |d| match d {
            Diagnostic::Skipped { kind: k, vnum, .. } if *k == kind => Some(*vnum),
            _ => None,
        })
    }

    /// Consumes the collection.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Serialize for Diagnostics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter().map(ToString::to_string))
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
