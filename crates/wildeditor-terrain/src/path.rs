//! Linear features (roads, rivers) that override terrain along their route.

use serde::{Deserialize, Serialize};
use wildeditor_common::{
    Bounds, Coordinate, PathVnum, RangeWarning, RecordError, RecordKind, SectorId,
    ValidationError, ZoneVnum,
};
use wildeditor_geometry::{any_vertex_within, decode_linestring, encode_linestring};

use crate::region::check_name_length;

/// Path type codes as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum PathType {
    /// Paved road
    Road = 1,
    /// Dirt road
    DirtRoad = 2,
    /// Descriptive line (ridge, border)
    Geographic = 3,
    /// River
    River = 4,
    /// Stream
    Stream = 5,
}

impl PathType {
    /// All path types in code order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Road,
            Self::DirtRoad,
            Self::Geographic,
            Self::River,
            Self::Stream,
        ]
    }

    /// Looks up a path type by its stored code.
    pub fn from_code(code: i32) -> Result<Self, ValidationError> {
        Self::all()
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(ValidationError::UnknownPathType(code))
    }

    /// Stored code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Display name used by the editor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::DirtRoad => "Dirt Road",
            Self::Geographic => "Geographic",
            Self::River => "River",
            Self::Stream => "Stream",
        }
    }
}

impl std::fmt::Display for PathType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    vnum: PathVnum,
    zone: ZoneVnum,
    name: String,
    path_type: PathType,
    sector: Option<SectorId>,
    line: Vec<Coordinate>,
}

impl Path {
    /// Creates a path. The line needs at least two distinct points and is
    /// kept verbatim, duplicates included.
    pub fn new(
        vnum: PathVnum,
        zone: ZoneVnum,
        name: impl Into<String>,
        path_type: PathType,
        sector: Option<SectorId>,
        line: Vec<Coordinate>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        check_name_length(&name)?;
        for v in &line {
            v.validate()?;
        }
        let distinct = exact_distinct_count(&line);
        if distinct < 2 {
            return Err(ValidationError::TooFewVertices {
                required: 2,
                found: distinct,
            });
        }
        Ok(Self {
            vnum,
            zone,
            name,
            path_type,
            sector,
            line,
        })
    }

    /// Builds a path from its stored record.
    pub fn from_record(record: &PathRecord) -> Result<Self, RecordError> {
        let path_type = PathType::from_code(record.path_type)?;
        let text = record
            .path_linestring
            .as_deref()
            .ok_or(ValidationError::MissingGeometry)?;
        let line = decode_linestring(text)?;
        Ok(Self::new(
            PathVnum::new(record.vnum),
            ZoneVnum::new(record.zone_vnum),
            record.name.clone(),
            path_type,
            record.path_props.map(SectorId::new),
            line,
        )?)
    }

    /// Converts to the stored record shape.
    pub fn to_record(&self) -> Result<PathRecord, ValidationError> {
        Ok(PathRecord {
            vnum: self.vnum.raw(),
            zone_vnum: self.zone.raw(),
            path_type: self.path_type.code(),
            name: self.name.clone(),
            path_props: self.sector.map(SectorId::raw),
            path_linestring: Some(encode_linestring(&self.line)?),
        })
    }

    /// Path vnum.
    #[must_use]
    pub const fn vnum(&self) -> PathVnum {
        self.vnum
    }

    /// Owning zone.
    #[must_use]
    pub const fn zone(&self) -> ZoneVnum {
        self.zone
    }

    /// Name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag.
    #[must_use]
    pub const fn path_type(&self) -> PathType {
        self.path_type
    }

    /// Sector imposed along the route, if any.
    #[must_use]
    pub const fn sector(&self) -> Option<SectorId> {
        self.sector
    }

    /// Vertices in stored order.
    #[must_use]
    pub fn line(&self) -> &[Coordinate] {
        &self.line
    }

    /// Bounding box of the line.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.line)
    }

    /// Returns true if any vertex lies within `radius` of `p`.
    ///
    /// Only vertices are tested, not the segments between them: a point
    /// midway along a long segment does not match.
    #[must_use]
    pub fn is_near(&self, p: Coordinate, radius: f64) -> bool {
        any_vertex_within(p, &self.line, radius)
    }

    /// Warning for a sector outside 0-36.
    #[must_use]
    pub fn range_warning(&self) -> Option<RangeWarning> {
        self.sector
            .and_then(|s| s.check(RecordKind::Path, self.vnum.raw()))
    }
}

/// Distinct vertices by exact equality; lines are never snapped.
fn exact_distinct_count(line: &[Coordinate]) -> usize {
    let mut seen: Vec<Coordinate> = Vec::with_capacity(line.len());
    for v in line {
        if !seen.contains(v) {
            seen.push(*v);
        }
    }
    seen.len()
}

fn default_zone() -> i32 {
    ZoneVnum::WILDERNESS.raw()
}

/// Path as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Path vnum
    pub vnum: i32,
    /// Owning zone
    #[serde(default = "default_zone")]
    pub zone_vnum: i32,
    /// Path type code (1-5)
    pub path_type: i32,
    /// Name
    pub name: String,
    /// Sector imposed along the route
    #[serde(default)]
    pub path_props: Option<i32>,
    /// Linestring WKT text
    #[serde(default)]
    pub path_linestring: Option<String>,
}
