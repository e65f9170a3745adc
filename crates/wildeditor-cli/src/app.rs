//! Command execution.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};
use wildeditor_common::{
    Coordinate, Diagnostics, PathVnum, RegionVnum, SectorType, ZoneVnum,
};
use wildeditor_geometry::{
    decode_linestring, decode_region_polygon, encode_linestring, encode_polygon_with_radius,
};
use wildeditor_store::MemoryStore;
use wildeditor_terrain::{
    point_in_regions, point_info, point_near_paths, Candidates, MapStore, NoiseElevation,
    Path as MapPath, PathFilter, PathType, Region, RegionFilter, RegionKind, RegionType,
};

use crate::cli::{Cli, Command, GeometryKind};
use crate::config::EditorConfig;

/// Runs a parsed command line and prints the result.
pub fn run(cli: Cli, config: &EditorConfig) -> Result<()> {
    if matches!(cli.command, Command::InitConfig) {
        config
            .save_to(&cli.config)
            .with_context(|| format!("writing config {}", cli.config.display()))?;
        println!("Wrote {}", cli.config.display());
        return Ok(());
    }

    let store_path = cli.store.unwrap_or_else(|| config.store_path.clone());
    let store = MemoryStore::open(&store_path)
        .with_context(|| format!("opening map snapshot {}", store_path.display()))?;

    let output = execute(&cli.command, config, &store, &store_path)?;
    println!("{output}");
    Ok(())
}

#[derive(Serialize)]
struct DecodedGeometry {
    kind: &'static str,
    landmark: bool,
    vertices: Vec<Coordinate>,
}

#[derive(Serialize)]
struct RegionListing<'a> {
    regions: Vec<&'a Region>,
    diagnostics: &'a Diagnostics,
}

#[derive(Serialize)]
struct PathListing<'a> {
    paths: Vec<&'a MapPath>,
    diagnostics: &'a Diagnostics,
}

/// Executes a command against a store and returns what to print.
///
/// Commands that change the store write it back to `store_path`.
pub fn execute(
    command: &Command,
    config: &EditorConfig,
    store: &MemoryStore,
    store_path: &Path,
) -> Result<String> {
    match command {
        Command::Point { x, y, radius } => {
            let at = Coordinate::checked(*x, *y)?;
            let elevation = NoiseElevation::new(config.elevation.clone());
            let radius = radius.unwrap_or(config.point_radius);
            let info = point_info(store, &elevation, at, radius)?;
            Ok(serde_json::to_string_pretty(&info)?)
        },
        Command::Decode { wkt } => to_json(&decode(wkt)?),
        Command::Encode { kind, vertices } => match kind {
            GeometryKind::Polygon => Ok(encode_polygon_with_radius(vertices, config.landmark_radius)?),
            GeometryKind::Linestring => Ok(encode_linestring(vertices)?),
        },
        Command::Sectors => Ok(sector_table()),
        Command::Regions {
            zone,
            region_type,
            at,
        } => {
            let mut filter = RegionFilter::all();
            if let Some(zone) = zone {
                filter = filter.in_zone(ZoneVnum::new(*zone));
            }
            if let Some(code) = region_type {
                filter = filter.of_type(RegionType::from_code(*code)?);
            }
            let records = store.load_regions(&filter)?;
            let candidates = Candidates::from_records(&records, &[]);
            let regions = match at {
                Some(p) => point_in_regions(&candidates.regions, p.x, p.y, config.point_radius),
                None => candidates.regions.iter().collect(),
            };
            to_json(&RegionListing {
                regions,
                diagnostics: &candidates.diagnostics,
            })
        },
        Command::Paths {
            zone,
            path_type,
            near,
        } => {
            let mut filter = PathFilter::all();
            if let Some(zone) = zone {
                filter = filter.in_zone(ZoneVnum::new(*zone));
            }
            if let Some(code) = path_type {
                filter = filter.of_type(PathType::from_code(*code)?);
            }
            let records = store.load_paths(&filter)?;
            let candidates = Candidates::from_records(&[], &records);
            let paths = match near {
                Some(p) => point_near_paths(&candidates.paths, p.x, p.y, config.path_radius),
                None => candidates.paths.iter().collect(),
            };
            to_json(&PathListing {
                paths,
                diagnostics: &candidates.diagnostics,
            })
        },
        Command::AddLandmark {
            vnum,
            zone,
            name,
            x,
            y,
            region_type,
            props,
        } => {
            let kind = RegionKind::from_props(RegionType::from_code(*region_type)?, *props)?;
            let region = Region::landmark(
                RegionVnum::new(*vnum),
                ZoneVnum::new(*zone),
                name.as_str(),
                kind,
                Coordinate::checked(*x, *y)?,
            )?;
            if let Some(w) = region.range_warning() {
                warn!("{w}");
            }
            store.save_region(region.to_record(config.landmark_radius)?)?;
            store.persist(store_path)?;
            info!("Saved landmark region {vnum}");
            Ok(format!("Saved landmark region {vnum} at ({x}, {y})"))
        },
        Command::DeleteRegion { vnum } => {
            if !store.delete_region(RegionVnum::new(*vnum))? {
                bail!("No region with vnum {vnum}");
            }
            store.persist(store_path)?;
            Ok(format!("Deleted region {vnum}"))
        },
        Command::DeletePath { vnum } => {
            if !store.delete_path(PathVnum::new(*vnum))? {
                bail!("No path with vnum {vnum}");
            }
            store.persist(store_path)?;
            Ok(format!("Deleted path {vnum}"))
        },
        Command::InitConfig => bail!("init-config does not use the map store"),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn decode(text: &str) -> Result<DecodedGeometry> {
    let is_line = text
        .trim_start()
        .get(..10)
        .is_some_and(|head| head.eq_ignore_ascii_case("LINESTRING"));
    if is_line {
        return Ok(DecodedGeometry {
            kind: "linestring",
            landmark: false,
            vertices: decode_linestring(text)?,
        });
    }
    let vertices = decode_region_polygon(text)?;
    Ok(DecodedGeometry {
        kind: "polygon",
        landmark: vertices.len() == 1,
        vertices,
    })
}

fn sector_table() -> String {
    SectorType::all()
        .iter()
        .map(|s| format!("{:>2}  {}", s.id(), s.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf, EditorConfig, MemoryStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("wild.json");
        (dir, path, EditorConfig::default(), MemoryStore::new())
    }

    #[test]
    fn test_decode_landmark_and_line() {
        let (_dir, path, config, store) = setup();
        let out = execute(
            &Command::Decode {
                wkt: "POLYGON((-57 89,-57 89,-57 89))".to_string(),
            },
            &config,
            &store,
            &path,
        )
        .expect("decode failed");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["kind"], "polygon");
        assert_eq!(json["landmark"], true);
        assert_eq!(json["vertices"][0]["x"], -57.0);

        let out = execute(
            &Command::Decode {
                wkt: "linestring(0 0, 1 1)".to_string(),
            },
            &config,
            &store,
            &path,
        )
        .expect("decode failed");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["kind"], "linestring");
        assert_eq!(json["vertices"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_decode_error() {
        let (_dir, path, config, store) = setup();
        let result = execute(
            &Command::Decode {
                wkt: "POLYGON((1 2, 3".to_string(),
            },
            &config,
            &store,
            &path,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_encode() {
        let (_dir, path, config, store) = setup();
        let out = execute(
            &Command::Encode {
                kind: GeometryKind::Linestring,
                vertices: vec![Coordinate::new(0.0, 0.0), Coordinate::new(2.5, -1.0)],
            },
            &config,
            &store,
            &path,
        )
        .expect("encode failed");
        assert_eq!(out, "LINESTRING(0 0, 2.5 -1)");

        let out = execute(
            &Command::Encode {
                kind: GeometryKind::Polygon,
                vertices: vec![
                    Coordinate::new(0.0, 0.0),
                    Coordinate::new(1.0, 0.0),
                    Coordinate::new(1.0, 1.0),
                ],
            },
            &config,
            &store,
            &path,
        )
        .expect("encode failed");
        assert_eq!(out, "POLYGON((0 0, 1 0, 1 1, 0 0))");
    }

    #[test]
    fn test_sector_table() {
        let table = sector_table();
        assert_eq!(table.lines().count(), 37);
        assert!(table.lines().any(|l| l.trim() == "11  Road North-South"));
    }

    #[test]
    fn test_add_list_delete_landmark() {
        let (_dir, path, config, store) = setup();
        let add = Command::AddLandmark {
            vnum: 1001,
            zone: 100,
            name: "Ashenport".to_string(),
            x: -59.0,
            y: 91.0,
            region_type: 1,
            props: None,
        };
        execute(&add, &config, &store, &path).expect("add failed");
        assert!(path.exists());
        assert_eq!(MemoryStore::open(&path).expect("reopen").region_count(), 1);

        let list = Command::Regions {
            zone: Some(100),
            region_type: None,
            at: Some(Coordinate::new(-59.0, 91.0)),
        };
        let out = execute(&list, &config, &store, &path).expect("list failed");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["regions"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["regions"][0]["geometry"]["shape"], "landmark");

        let other_zone = Command::Regions {
            zone: Some(200),
            region_type: None,
            at: None,
        };
        let out = execute(&other_zone, &config, &store, &path).expect("list failed");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["regions"].as_array().map(Vec::len), Some(0));

        execute(&Command::DeleteRegion { vnum: 1001 }, &config, &store, &path)
            .expect("delete failed");
        assert!(execute(&Command::DeleteRegion { vnum: 1001 }, &config, &store, &path).is_err());
        assert_eq!(MemoryStore::open(&path).expect("reopen").region_count(), 0);
    }

    #[test]
    fn test_add_override_without_sector_fails() {
        let (_dir, path, config, store) = setup();
        let add = Command::AddLandmark {
            vnum: 5,
            zone: 100,
            name: "Shrine".to_string(),
            x: 0.0,
            y: 0.0,
            region_type: 4,
            props: None,
        };
        assert!(execute(&add, &config, &store, &path).is_err());
        assert_eq!(store.region_count(), 0);
    }

    #[test]
    fn test_point_and_paths() {
        let (_dir, path, config, store) = setup();
        let road = MapPath::new(
            PathVnum::new(3),
            ZoneVnum::WILDERNESS,
            "King's Road",
            PathType::Road,
            Some(SectorType::RoadEastWest.into()),
            vec![Coordinate::new(-1.0, 0.0), Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)],
        )
        .expect("valid path");
        store.save_path(road.to_record().expect("encodable")).expect("save failed");

        let out = execute(
            &Command::Point {
                x: 0.0,
                y: 0.0,
                radius: None,
            },
            &config,
            &store,
            &path,
        )
        .expect("point failed");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["resolution"]["sector"], 12);
        assert_eq!(json["glyph"], "east_west");

        let out = execute(
            &Command::Paths {
                zone: None,
                path_type: Some(1),
                near: Some(Coordinate::new(0.5, 0.0)),
            },
            &config,
            &store,
            &path,
        )
        .expect("paths failed");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(json["paths"].as_array().map(Vec::len), Some(0));

        assert!(execute(
            &Command::Paths {
                zone: None,
                path_type: Some(9),
                near: None,
            },
            &config,
            &store,
            &path,
        )
        .is_err());
    }
}
