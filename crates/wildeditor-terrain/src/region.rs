//! Polygonal regions and their type-specific terrain effects.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use wildeditor_common::{
    Bounds, Coordinate, RangeWarning, RecordError, RecordKind, RegionVnum, SectorId,
    ValidationError, ZoneVnum,
};
use wildeditor_geometry::{
    decode_region_polygon, dedup_vertices, detect_landmark, distance_to_ring,
    encode_polygon_with_radius, point_in_ring,
};

/// Longest name the storage column accepts.
pub const MAX_NAME_LEN: usize = 50;

/// Region type codes as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum RegionType {
    /// Named area, no terrain effect
    Geographic = 1,
    /// Encounter spawn area, no terrain effect
    Encounter = 2,
    /// Shifts elevation before the sector is derived
    SectorTransform = 3,
    /// Replaces the sector outright
    SectorOverride = 4,
}

impl RegionType {
    /// All region types in code order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Geographic,
            Self::Encounter,
            Self::SectorTransform,
            Self::SectorOverride,
        ]
    }

    /// Looks up a region type by its stored code.
    pub fn from_code(code: i32) -> Result<Self, ValidationError> {
        Self::all()
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(ValidationError::UnknownRegionType(code))
    }

    /// Stored code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Zero-based position in [`RegionType::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        (self as i32 - 1) as usize
    }

    /// Display name used by the editor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Geographic => "Geographic",
            Self::Encounter => "Encounter",
            Self::SectorTransform => "Sector Transform",
            Self::SectorOverride => "Sector Override",
        }
    }
}

impl std::fmt::Display for RegionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Region type together with its type-specific payload.
///
/// Replaces the stored `(region_type, region_props)` pair, where the meaning
/// of `props` depends on the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegionKind {
    /// Descriptive area
    Geographic,
    /// Encounter area
    Encounter,
    /// Elevation delta applied before sector recomputation
    SectorTransform {
        /// Signed elevation adjustment
        delta: i32,
    },
    /// Sector that replaces the terrain
    SectorOverride {
        /// Sector imposed by the region
        sector: SectorId,
    },
}

impl RegionKind {
    /// Builds the kind from a type and its raw props.
    ///
    /// Props are ignored for descriptive types and default to a zero delta
    /// for transforms. An override without a sector is invalid.
    pub fn from_props(region_type: RegionType, props: Option<i32>) -> Result<Self, ValidationError> {
        match region_type {
            RegionType::Geographic => Ok(Self::Geographic),
            RegionType::Encounter => Ok(Self::Encounter),
            RegionType::SectorTransform => Ok(Self::SectorTransform {
                delta: props.unwrap_or(0),
            }),
            RegionType::SectorOverride => props
                .map(|raw| Self::SectorOverride {
                    sector: SectorId::new(raw),
                })
                .ok_or(ValidationError::MissingSector),
        }
    }

    /// The type tag.
    #[must_use]
    pub const fn region_type(self) -> RegionType {
        match self {
            Self::Geographic => RegionType::Geographic,
            Self::Encounter => RegionType::Encounter,
            Self::SectorTransform { .. } => RegionType::SectorTransform,
            Self::SectorOverride { .. } => RegionType::SectorOverride,
        }
    }

    /// Raw props value for storage.
    #[must_use]
    pub const fn props(self) -> Option<i32> {
        match self {
            Self::Geographic | Self::Encounter => None,
            Self::SectorTransform { delta } => Some(delta),
            Self::SectorOverride { sector } => Some(sector.raw()),
        }
    }

    /// Elevation delta of a transform region.
    #[must_use]
    pub const fn elevation_delta(self) -> Option<i32> {
        match self {
            Self::SectorTransform { delta } => Some(delta),
            _ => None,
        }
    }

    /// Sector of an override region.
    #[must_use]
    pub const fn sector(self) -> Option<SectorId> {
        match self {
            Self::SectorOverride { sector } => Some(sector),
            _ => None,
        }
    }
}

/// Decoded region shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "coordinates", rename_all = "snake_case")]
pub enum RegionGeometry {
    /// A single point stored as a tiny square
    Landmark(Coordinate),
    /// Open ring of at least three distinct vertices
    Polygon(Vec<Coordinate>),
}

impl RegionGeometry {
    /// Builds a geometry from caller-supplied vertices.
    ///
    /// A single vertex, or a cluster recognised by landmark detection,
    /// becomes a landmark. Anything else needs three distinct vertices.
    pub fn from_vertices(vertices: &[Coordinate]) -> Result<Self, ValidationError> {
        for v in vertices {
            v.validate()?;
        }
        let shape = if vertices.len() >= 3 {
            detect_landmark(vertices)
        } else {
            dedup_vertices(vertices)
        };
        match shape.len() {
            1 => Ok(Self::Landmark(shape[0])),
            n if n >= 3 => Ok(Self::Polygon(shape)),
            n => Err(ValidationError::TooFewVertices {
                required: 3,
                found: n,
            }),
        }
    }

    /// Decodes stored polygon text.
    pub fn from_wkt(text: &str) -> Result<Self, RecordError> {
        let vertices = decode_region_polygon(text)?;
        Ok(Self::from_vertices(&vertices)?)
    }

    /// Encodes to polygon text; landmarks become squares of `landmark_radius`.
    pub fn to_wkt(&self, landmark_radius: f64) -> Result<String, ValidationError> {
        encode_polygon_with_radius(self.vertices(), landmark_radius)
    }

    /// Vertices of the shape (one for a landmark).
    #[must_use]
    pub fn vertices(&self) -> &[Coordinate] {
        match self {
            Self::Landmark(point) => std::slice::from_ref(point),
            Self::Polygon(ring) => ring,
        }
    }

    /// Returns true for a single-point landmark.
    #[must_use]
    pub const fn is_landmark(&self) -> bool {
        matches!(self, Self::Landmark(_))
    }

    /// Bounding box of the shape.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices())
    }

    /// Containment with a distance fallback.
    ///
    /// True when `p` is inside or on the ring, or within `radius` of its
    /// boundary. A landmark matches when `p` is within `radius` of it.
    #[must_use]
    pub fn contains_or_near(&self, p: Coordinate, radius: f64) -> bool {
        let ring = self.vertices();
        point_in_ring(p, ring) || distance_to_ring(p, ring) <= radius
    }
}

/// Reset metadata used by encounter regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetInfo {
    /// Opaque reset script data
    pub data: String,
    /// Time of the last reset
    pub time: NaiveDateTime,
}

impl ResetInfo {
    /// Creates reset info, normalizing zero dates.
    #[must_use]
    pub fn new(data: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            data: data.into(),
            time: normalize_reset_time(time),
        }
    }
}

impl Default for ResetInfo {
    fn default() -> Self {
        Self {
            data: String::new(),
            time: reset_epoch(),
        }
    }
}

/// Timestamp substituted for the database's zero date.
#[must_use]
pub fn reset_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Maps timestamps before 1900 (zero dates) to [`reset_epoch`].
#[must_use]
pub fn normalize_reset_time(time: NaiveDateTime) -> NaiveDateTime {
    if time.year() < 1900 {
        reset_epoch()
    } else {
        time
    }
}

/// A validated region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    vnum: RegionVnum,
    zone: ZoneVnum,
    name: Option<String>,
    kind: RegionKind,
    geometry: RegionGeometry,
    reset: ResetInfo,
}

impl Region {
    /// Creates a region from caller-supplied vertices.
    pub fn new(
        vnum: RegionVnum,
        zone: ZoneVnum,
        name: Option<String>,
        kind: RegionKind,
        vertices: &[Coordinate],
    ) -> Result<Self, ValidationError> {
        if let Some(name) = &name {
            check_name_length(name)?;
        }
        Ok(Self {
            vnum,
            zone,
            name,
            kind,
            geometry: RegionGeometry::from_vertices(vertices)?,
            reset: ResetInfo::default(),
        })
    }

    /// Creates a single-point landmark region.
    pub fn landmark(
        vnum: RegionVnum,
        zone: ZoneVnum,
        name: impl Into<String>,
        kind: RegionKind,
        at: Coordinate,
    ) -> Result<Self, ValidationError> {
        Self::new(vnum, zone, Some(name.into()), kind, &[at])
    }

    /// Replaces the reset metadata.
    #[must_use]
    pub fn with_reset(mut self, reset: ResetInfo) -> Self {
        self.reset = reset;
        self
    }

    /// Builds a region from its stored record.
    pub fn from_record(record: &RegionRecord) -> Result<Self, RecordError> {
        let region_type = RegionType::from_code(record.region_type)?;
        let kind = RegionKind::from_props(region_type, record.region_props)?;
        let text = record
            .region_polygon
            .as_deref()
            .ok_or(ValidationError::MissingGeometry)?;
        let geometry = RegionGeometry::from_wkt(text)?;
        if let Some(name) = &record.name {
            check_name_length(name)?;
        }
        Ok(Self {
            vnum: RegionVnum::new(record.vnum),
            zone: ZoneVnum::new(record.zone_vnum),
            name: record.name.clone(),
            kind,
            geometry,
            reset: ResetInfo::new(record.region_reset_data.clone(), record.region_reset_time),
        })
    }

    /// Converts to the stored record shape.
    pub fn to_record(&self, landmark_radius: f64) -> Result<RegionRecord, ValidationError> {
        Ok(RegionRecord {
            vnum: self.vnum.raw(),
            zone_vnum: self.zone.raw(),
            name: self.name.clone(),
            region_type: self.kind.region_type().code(),
            region_polygon: Some(self.geometry.to_wkt(landmark_radius)?),
            region_props: self.kind.props(),
            region_reset_data: self.reset.data.clone(),
            region_reset_time: self.reset.time,
        })
    }

    /// Region vnum.
    #[must_use]
    pub const fn vnum(&self) -> RegionVnum {
        self.vnum
    }

    /// Owning zone.
    #[must_use]
    pub const fn zone(&self) -> ZoneVnum {
        self.zone
    }

    /// Optional name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Type and payload.
    #[must_use]
    pub const fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Type tag.
    #[must_use]
    pub const fn region_type(&self) -> RegionType {
        self.kind.region_type()
    }

    /// Decoded shape.
    #[must_use]
    pub const fn geometry(&self) -> &RegionGeometry {
        &self.geometry
    }

    /// Reset metadata.
    #[must_use]
    pub const fn reset(&self) -> &ResetInfo {
        &self.reset
    }

    /// Warning for an override sector outside 0-36.
    #[must_use]
    pub fn range_warning(&self) -> Option<RangeWarning> {
        self.kind
            .sector()
            .and_then(|s| s.check(RecordKind::Region, self.vnum.raw()))
    }
}

/// Region as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Region vnum
    pub vnum: i32,
    /// Owning zone
    pub zone_vnum: i32,
    /// Optional name
    #[serde(default)]
    pub name: Option<String>,
    /// Region type code (1-4)
    pub region_type: i32,
    /// Polygon WKT text
    #[serde(default)]
    pub region_polygon: Option<String>,
    /// Type-dependent props
    #[serde(default)]
    pub region_props: Option<i32>,
    /// Reset script data
    #[serde(default)]
    pub region_reset_data: String,
    /// Last reset time
    #[serde(default = "reset_epoch")]
    pub region_reset_time: NaiveDateTime,
}

pub(crate) fn check_name_length(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}
