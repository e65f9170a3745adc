//! Spatial queries over candidate regions and paths.
//!
//! Both queries are linear scans over whatever the caller supplies; there is
//! no spatial index here. Results keep the supplied order.

use serde::Serialize;
use tracing::debug;
use wildeditor_common::{Bounds, Coordinate, Diagnostics, RecordKind, StoreResult};

use crate::elevation::ElevationSource;
use crate::glyph::{glyph_at, PathGlyph};
use crate::path::{Path, PathRecord};
use crate::port::{MapStore, PathFilter, RegionFilter};
use crate::region::{Region, RegionRecord};
use crate::resolve::{Resolution, TerrainResolver};

/// Default radius for near-path queries.
pub const DEFAULT_PATH_RADIUS: f64 = 0.1;

/// Default radius for combined point queries.
pub const DEFAULT_POINT_RADIUS: f64 = 0.1;

/// Regions containing `(x, y)` or within `radius` of their boundary.
///
/// A radius of zero is exact containment, boundary included.
#[must_use]
pub fn point_in_regions(regions: &[Region], x: f64, y: f64, radius: f64) -> Vec<&Region> {
    let p = Coordinate::new(x, y);
    let radius = radius.max(0.0);
    regions
        .iter()
        .filter(|r| r.geometry().contains_or_near(p, radius))
        .collect()
}

/// Paths with at least one vertex within `radius` of `(x, y)`.
///
/// Segments are not tested; a point halfway along a long straight stretch
/// does not match.
#[must_use]
pub fn point_near_paths(paths: &[Path], x: f64, y: f64, radius: f64) -> Vec<&Path> {
    let p = Coordinate::new(x, y);
    let radius = radius.max(0.0);
    paths.iter().filter(|path| path.is_near(p, radius)).collect()
}

/// Decoded candidate set.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    /// Valid regions, in record order
    pub regions: Vec<Region>,
    /// Valid paths, in record order
    pub paths: Vec<Path>,
    /// Records that were skipped
    pub diagnostics: Diagnostics,
}

impl Candidates {
    /// Decodes a batch of records, skipping the ones that fail.
    #[must_use]
    pub fn from_records(regions: &[RegionRecord], paths: &[PathRecord]) -> Self {
        let mut out = Self::default();
        for record in regions {
            match Region::from_record(record) {
                Ok(region) => out.regions.push(region),
                Err(e) => out.diagnostics.skip(RecordKind::Region, record.vnum, e),
            }
        }
        for record in paths {
            match Path::from_record(record) {
                Ok(path) => out.paths.push(path),
                Err(e) => out.diagnostics.skip(RecordKind::Path, record.vnum, e),
            }
        }
        out
    }
}

/// Everything known about a single coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct PointInfo {
    /// Queried coordinate
    pub coordinate: Coordinate,
    /// Matching regions, in persisted order
    pub regions: Vec<Region>,
    /// Matching paths, in persisted order
    pub paths: Vec<Path>,
    /// Resolved terrain
    pub resolution: Resolution,
    /// Display glyph if a path passes here
    pub glyph: Option<PathGlyph>,
    /// Skipped records and range warnings
    pub diagnostics: Diagnostics,
}

/// Answers "what is at this coordinate" against a store.
///
/// Candidates are pre-filtered by the query box before decoding.
pub fn point_info<S>(
    store: &S,
    elevation: &dyn ElevationSource,
    at: Coordinate,
    radius: f64,
) -> StoreResult<PointInfo>
where
    S: MapStore + ?Sized,
{
    let radius = radius.max(0.0);
    let area = Bounds::around(at, radius);
    let region_records = store.load_regions(&RegionFilter::all().within(area))?;
    let path_records = store.load_paths(&PathFilter::all().within(area))?;

    let Candidates {
        regions,
        paths,
        mut diagnostics,
    } = Candidates::from_records(&region_records, &path_records);

    let matched_regions = point_in_regions(&regions, at.x, at.y, radius);
    let matched_paths = point_near_paths(&paths, at.x, at.y, radius);
    debug!(
        "Point {at}: {} of {} regions, {} of {} paths",
        matched_regions.len(),
        regions.len(),
        matched_paths.len(),
        paths.len()
    );

    let resolution = TerrainResolver::new(elevation).resolve(
        at.x,
        at.y,
        matched_regions.iter().copied(),
        matched_paths.iter().copied(),
    );
    for warning in &resolution.warnings {
        diagnostics.push(warning.clone());
    }
    let glyph = glyph_at(&matched_paths, at);

    Ok(PointInfo {
        coordinate: at,
        regions: matched_regions.into_iter().cloned().collect(),
        paths: matched_paths.into_iter().cloned().collect(),
        resolution,
        glyph,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation::FlatElevation;
    use crate::path::PathType;
    use crate::region::{reset_epoch, RegionKind};
    use crate::tests::FixedStore;
    use wildeditor_common::{PathVnum, RegionVnum, SectorType, ZoneVnum};

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn unit_square() -> Region {
        Region::new(
            RegionVnum::new(1),
            ZoneVnum::new(100),
            Some("Square".to_string()),
            RegionKind::Geographic,
            &[c(-1.0, -1.0), c(1.0, -1.0), c(1.0, 1.0), c(-1.0, 1.0)],
        )
        .expect("valid region")
    }

    fn road(vnum: i32, line: Vec<Coordinate>) -> Path {
        Path::new(
            PathVnum::new(vnum),
            ZoneVnum::WILDERNESS,
            "Road",
            PathType::Road,
            Some(SectorType::RoadNorthSouth.into()),
            line,
        )
        .expect("valid path")
    }

    #[test]
    fn test_square_containment_and_fallback() {
        let regions = vec![unit_square()];
        assert_eq!(point_in_regions(&regions, 0.0, 0.0, 0.0).len(), 1);
        assert!(point_in_regions(&regions, 5.0, 5.0, 0.0).is_empty());
        assert_eq!(point_in_regions(&regions, 5.0, 5.0, 10.0).len(), 1);
    }

    #[test]
    fn test_boundary_is_contained() {
        let regions = vec![unit_square()];
        assert_eq!(point_in_regions(&regions, 1.0, 0.0, 0.0).len(), 1);
        assert_eq!(point_in_regions(&regions, -1.0, -1.0, 0.0).len(), 1);
    }

    #[test]
    fn test_landmark_matches_within_radius() {
        let lm = Region::landmark(
            RegionVnum::new(2),
            ZoneVnum::new(100),
            "Ashenport",
            RegionKind::Geographic,
            c(-59.0, 91.0),
        )
        .expect("valid landmark");
        let regions = vec![lm];
        assert_eq!(point_in_regions(&regions, -59.0, 91.0, 0.0).len(), 1);
        assert_eq!(point_in_regions(&regions, -59.05, 91.0, 0.1).len(), 1);
        assert!(point_in_regions(&regions, -58.0, 91.0, 0.1).is_empty());
    }

    #[test]
    fn test_path_vertex_proximity() {
        let paths = vec![road(1, vec![c(0.0, 0.0), c(0.0, 10.0)])];
        assert_eq!(point_near_paths(&paths, 0.05, 0.0, DEFAULT_PATH_RADIUS).len(), 1);
        assert!(point_near_paths(&paths, 0.0, 5.0, DEFAULT_PATH_RADIUS).is_empty());
        assert!(point_near_paths(&paths, 0.05, 0.0, -1.0).is_empty());
    }

    #[test]
    fn test_results_keep_order() {
        let paths = vec![
            road(3, vec![c(0.0, 0.0), c(1.0, 0.0)]),
            road(1, vec![c(0.0, 0.0), c(0.0, 1.0)]),
            road(2, vec![c(9.0, 9.0), c(9.0, 8.0)]),
        ];
        let vnums: Vec<i32> = point_near_paths(&paths, 0.0, 0.0, 0.1)
            .iter()
            .map(|p| p.vnum().raw())
            .collect();
        assert_eq!(vnums, vec![3, 1]);
    }

    #[test]
    fn test_candidates_skip_bad_records() {
        let good = RegionRecord {
            vnum: 10,
            zone_vnum: 100,
            name: Some("Lake".to_string()),
            region_type: 1,
            region_polygon: Some("POLYGON((0 0, 2 0, 2 2, 0 2, 0 0))".to_string()),
            region_props: None,
            region_reset_data: String::new(),
            region_reset_time: reset_epoch(),
        };
        let bad_type = RegionRecord {
            vnum: 11,
            region_type: 9,
            ..good.clone()
        };
        let no_geometry = RegionRecord {
            vnum: 12,
            region_polygon: None,
            ..good.clone()
        };
        let bad_path = PathRecord {
            vnum: 20,
            zone_vnum: 10000,
            path_type: 1,
            name: "Broken".to_string(),
            path_props: Some(11),
            path_linestring: Some("LINESTRING(0 0, 0 x)".to_string()),
        };

        let candidates =
            Candidates::from_records(&[good, bad_type, no_geometry], &[bad_path]);
        assert_eq!(candidates.regions.len(), 1);
        assert!(candidates.paths.is_empty());
        assert_eq!(
            candidates
                .diagnostics
                .skipped(RecordKind::Region)
                .collect::<Vec<_>>(),
            vec![11, 12]
        );
        assert_eq!(
            candidates.diagnostics.skipped(RecordKind::Path).collect::<Vec<_>>(),
            vec![20]
        );
    }

    #[test]
    fn test_point_info_resolves_through_store() {
        let override_region = Region::new(
            RegionVnum::new(5),
            ZoneVnum::new(100),
            Some("Marsh".to_string()),
            RegionKind::SectorOverride {
                sector: SectorType::Marshland.into(),
            },
            &[c(-5.0, -5.0), c(5.0, -5.0), c(5.0, 5.0), c(-5.0, 5.0)],
        )
        .expect("valid region");
        let far_region = Region::new(
            RegionVnum::new(6),
            ZoneVnum::new(100),
            None,
            RegionKind::SectorOverride { sector: SectorType::Desert.into() },
            &[c(100.0, 100.0), c(110.0, 100.0), c(110.0, 110.0)],
        )
        .expect("valid region");
        let store = FixedStore {
            regions: vec![
                override_region.to_record(0.001).expect("encodable"),
                far_region.to_record(0.001).expect("encodable"),
            ],
            paths: vec![road(7, vec![c(0.0, -3.0), c(0.0, 0.0), c(0.0, 3.0)])
                .to_record()
                .expect("encodable")],
        };

        let flat = FlatElevation::new(140);
        let info = point_info(&store, &flat, c(0.0, 0.05), DEFAULT_POINT_RADIUS)
            .expect("query failed");

        assert_eq!(info.regions.len(), 1);
        assert_eq!(info.regions[0].vnum(), RegionVnum::new(5));
        assert_eq!(info.paths.len(), 1);
        assert_eq!(info.resolution.sector, SectorType::RoadNorthSouth.into());
        assert_eq!(info.resolution.applied.len(), 2);
        assert_eq!(info.glyph, Some(PathGlyph::NorthSouth));
        assert!(info.diagnostics.is_empty());
    }
}
