//! Persistence port.
//!
//! The editor core never talks to a database directly. Stores hand back raw
//! records; validation and decoding happen on this side so that a single
//! bad row is skipped instead of failing the whole query.

use wildeditor_common::{Bounds, PathVnum, RegionVnum, StoreResult, ZoneVnum};
use wildeditor_geometry::{decode_linestring, decode_polygon};

use crate::path::{PathRecord, PathType};
use crate::region::{RegionRecord, RegionType};

/// Selects region records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionFilter {
    /// Only this zone
    pub zone: Option<ZoneVnum>,
    /// Only this type
    pub region_type: Option<RegionType>,
    /// Only records whose bounding box meets this area
    pub area: Option<Bounds>,
}

impl RegionFilter {
    /// Matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to a zone.
    #[must_use]
    pub const fn in_zone(mut self, zone: ZoneVnum) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Restricts to a region type.
    #[must_use]
    pub const fn of_type(mut self, region_type: RegionType) -> Self {
        self.region_type = Some(region_type);
        self
    }

    /// Restricts to records near an area.
    #[must_use]
    pub const fn within(mut self, area: Bounds) -> Self {
        self.area = Some(area);
        self
    }

    /// Tests a stored record.
    ///
    /// Records whose polygon cannot be decoded pass the area test, so they
    /// reach validation and get reported.
    #[must_use]
    pub fn matches(&self, record: &RegionRecord) -> bool {
        if self.zone.is_some_and(|z| z.raw() != record.zone_vnum) {
            return false;
        }
        if self
            .region_type
            .is_some_and(|t| t.code() != record.region_type)
        {
            return false;
        }
        let Some(area) = self.area else {
            return true;
        };
        record
            .region_polygon
            .as_deref()
            .and_then(|text| decode_polygon(text).ok())
            .and_then(|ring| Bounds::from_points(&ring))
            .map_or(true, |b| b.intersects(&area))
    }
}

/// Selects path records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathFilter {
    /// Only this zone
    pub zone: Option<ZoneVnum>,
    /// Only this type
    pub path_type: Option<PathType>,
    /// Only records whose bounding box meets this area
    pub area: Option<Bounds>,
}

impl PathFilter {
    /// Matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to a zone.
    #[must_use]
    pub const fn in_zone(mut self, zone: ZoneVnum) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Restricts to a path type.
    #[must_use]
    pub const fn of_type(mut self, path_type: PathType) -> Self {
        self.path_type = Some(path_type);
        self
    }

    /// Restricts to records near an area.
    #[must_use]
    pub const fn within(mut self, area: Bounds) -> Self {
        self.area = Some(area);
        self
    }

    /// Tests a stored record. Undecodable lines pass the area test.
    #[must_use]
    pub fn matches(&self, record: &PathRecord) -> bool {
        if self.zone.is_some_and(|z| z.raw() != record.zone_vnum) {
            return false;
        }
        if self.path_type.is_some_and(|t| t.code() != record.path_type) {
            return false;
        }
        let Some(area) = self.area else {
            return true;
        };
        record
            .path_linestring
            .as_deref()
            .and_then(|text| decode_linestring(text).ok())
            .and_then(|line| Bounds::from_points(&line))
            .map_or(true, |b| b.intersects(&area))
    }
}

/// Storage for region and path records.
///
/// Loads return records in persisted order; resolution depends on it.
pub trait MapStore: Send + Sync {
    /// Loads region records matching the filter.
    fn load_regions(&self, filter: &RegionFilter) -> StoreResult<Vec<RegionRecord>>;

    /// Loads path records matching the filter.
    fn load_paths(&self, filter: &PathFilter) -> StoreResult<Vec<PathRecord>>;

    /// Inserts or replaces a region by vnum.
    fn save_region(&self, record: RegionRecord) -> StoreResult<()>;

    /// Inserts or replaces a path by vnum.
    fn save_path(&self, record: PathRecord) -> StoreResult<()>;

    /// Deletes a region. Returns false if it did not exist.
    fn delete_region(&self, vnum: RegionVnum) -> StoreResult<bool>;

    /// Deletes a path. Returns false if it did not exist.
    fn delete_path(&self, vnum: PathVnum) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::reset_epoch;
    use wildeditor_common::Coordinate;

    fn region_record(zone: i32, region_type: i32, polygon: Option<&str>) -> RegionRecord {
        RegionRecord {
            vnum: 1,
            zone_vnum: zone,
            name: None,
            region_type,
            region_polygon: polygon.map(str::to_string),
            region_props: None,
            region_reset_data: String::new(),
            region_reset_time: reset_epoch(),
        }
    }

    fn path_record(zone: i32, path_type: i32, line: &str) -> PathRecord {
        PathRecord {
            vnum: 1,
            zone_vnum: zone,
            path_type,
            name: "Track".to_string(),
            path_props: None,
            path_linestring: Some(line.to_string()),
        }
    }

    fn area(x: f64, y: f64, r: f64) -> Bounds {
        Bounds::around(Coordinate::new(x, y), r)
    }

    #[test]
    fn test_region_filter_fields() {
        let rec = region_record(100, 1, Some("POLYGON((0 0, 4 0, 4 4, 0 4, 0 0))"));
        assert!(RegionFilter::all().matches(&rec));
        assert!(RegionFilter::all().in_zone(ZoneVnum::new(100)).matches(&rec));
        assert!(!RegionFilter::all().in_zone(ZoneVnum::new(101)).matches(&rec));
        assert!(RegionFilter::all().of_type(RegionType::Geographic).matches(&rec));
        assert!(!RegionFilter::all().of_type(RegionType::Encounter).matches(&rec));
    }

    #[test]
    fn test_region_filter_area() {
        let rec = region_record(100, 1, Some("POLYGON((0 0, 4 0, 4 4, 0 4, 0 0))"));
        assert!(RegionFilter::all().within(area(2.0, 2.0, 0.1)).matches(&rec));
        assert!(RegionFilter::all().within(area(4.05, 2.0, 0.1)).matches(&rec));
        assert!(!RegionFilter::all().within(area(9.0, 9.0, 0.1)).matches(&rec));
    }

    #[test]
    fn test_undecodable_records_pass_area() {
        let broken = region_record(100, 1, Some("POLYGON((garbage))"));
        assert!(RegionFilter::all().within(area(500.0, 500.0, 0.1)).matches(&broken));
        let missing = region_record(100, 1, None);
        assert!(RegionFilter::all().within(area(500.0, 500.0, 0.1)).matches(&missing));
    }

    #[test]
    fn test_path_filter() {
        let rec = path_record(10000, 4, "LINESTRING(0 0, 10 0)");
        assert!(PathFilter::all().of_type(PathType::River).matches(&rec));
        assert!(!PathFilter::all().of_type(PathType::Road).matches(&rec));
        assert!(PathFilter::all().in_zone(ZoneVnum::WILDERNESS).matches(&rec));
        assert!(PathFilter::all().within(area(5.0, 0.0, 0.1)).matches(&rec));
        assert!(!PathFilter::all().within(area(5.0, 3.0, 0.1)).matches(&rec));
    }
}
