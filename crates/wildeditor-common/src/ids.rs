//! ID types for regions, paths and zones.

use serde::{Deserialize, Serialize};

/// Unique identifier (vnum) of a region record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionVnum(i32);

impl RegionVnum {
    /// Creates a region vnum from a raw value.
    #[must_use]
    pub const fn new(vnum: i32) -> Self {
        Self(vnum)
    }

    /// Returns the raw vnum.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Unique identifier (vnum) of a path record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathVnum(i32);

impl PathVnum {
    /// Creates a path vnum from a raw value.
    #[must_use]
    pub const fn new(vnum: i32) -> Self {
        Self(vnum)
    }

    /// Returns the raw vnum.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Identifier of the zone that owns a region or path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneVnum(i32);

impl ZoneVnum {
    /// Creates a zone vnum from a raw value.
    #[must_use]
    pub const fn new(vnum: i32) -> Self {
        Self(vnum)
    }

    /// Returns the raw vnum.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Zone assigned to paths created without an explicit zone.
    pub const WILDERNESS: Self = Self(10000);
}

impl Default for ZoneVnum {
    fn default() -> Self {
        Self::WILDERNESS
    }
}

macro_rules! impl_vnum_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

impl_vnum_display!(RegionVnum, PathVnum, ZoneVnum);

/// Kind of record a vnum refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A polygonal region
    Region,
    /// A linear path
    Path,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Region => f.write_str("region"),
            Self::Path => f.write_str("path"),
        }
    }
}
