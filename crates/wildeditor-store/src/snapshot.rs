//! JSON snapshot files.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use wildeditor_common::{RecordKind, SchemaVersion, StoreError, StoreResult};
use wildeditor_terrain::{PathRecord, RegionRecord};

/// Every record of a map at one point in time.
///
/// Record order is the persisted order and is preserved through a save and
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version the file was written with
    pub version: SchemaVersion,
    /// Region records
    #[serde(default)]
    pub regions: Vec<RegionRecord>,
    /// Path records
    #[serde(default)]
    pub paths: Vec<PathRecord>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Snapshot {
    /// Creates a snapshot at the current schema version.
    #[must_use]
    pub fn new(regions: Vec<RegionRecord>, paths: Vec<PathRecord>) -> Self {
        Self {
            version: SchemaVersion::SNAPSHOT,
            regions,
            paths,
        }
    }

    /// Checks the schema version and vnum uniqueness.
    pub fn check(&self) -> StoreResult<()> {
        if !SchemaVersion::SNAPSHOT.can_read(&self.version) {
            return Err(StoreError::VersionMismatch {
                expected: SchemaVersion::SNAPSHOT.to_string(),
                actual: self.version.to_string(),
            });
        }
        check_unique(RecordKind::Region, self.regions.iter().map(|r| r.vnum))?;
        check_unique(RecordKind::Path, self.paths.iter().map(|p| p.vnum))?;
        Ok(())
    }

    /// Parses and checks a snapshot.
    pub fn from_json(text: &str) -> StoreResult<Self> {
        let snapshot: Self =
            serde_json::from_str(text).map_err(|e| StoreError::Serialization(e.to_string()))?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Reads a snapshot file.
    pub fn read_from(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&text)?;
        info!(
            "Loaded {} regions and {} paths from {}",
            snapshot.regions.len(),
            snapshot.paths.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Writes a snapshot file, creating parent directories.
    pub fn write_to(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        info!(
            "Saved {} regions and {} paths to {}",
            self.regions.len(),
            self.paths.len(),
            path.display()
        );
        Ok(())
    }
}

fn check_unique(kind: RecordKind, vnums: impl Iterator<Item = i32>) -> StoreResult<()> {
    let mut seen = AHashSet::new();
    for vnum in vnums {
        if !seen.insert(vnum) {
            return Err(StoreError::DuplicateVnum { kind, vnum });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildeditor_terrain::reset_epoch;

    fn region(vnum: i32) -> RegionRecord {
        RegionRecord {
            vnum,
            zone_vnum: 100,
            name: Some(format!("Region {vnum}")),
            region_type: 1,
            region_polygon: Some("POLYGON((0 0, 1 0, 1 1, 0 0))".to_string()),
            region_props: None,
            region_reset_data: String::new(),
            region_reset_time: reset_epoch(),
        }
    }

    fn path(vnum: i32) -> PathRecord {
        PathRecord {
            vnum,
            zone_vnum: 10000,
            path_type: 1,
            name: format!("Path {vnum}"),
            path_props: Some(11),
            path_linestring: Some("LINESTRING(0 0, 1 1)".to_string()),
        }
    }

    #[test]
    fn test_duplicate_vnums_rejected() {
        let snapshot = Snapshot::new(vec![region(1), region(2), region(1)], vec![]);
        match snapshot.check() {
            Err(StoreError::DuplicateVnum { kind, vnum }) => {
                assert_eq!(kind, RecordKind::Region);
                assert_eq!(vnum, 1);
            },
            other => panic!("expected duplicate error, got {other:?}"),
        }

        let snapshot = Snapshot::new(vec![region(1)], vec![path(4), path(4)]);
        assert!(matches!(
            snapshot.check(),
            Err(StoreError::DuplicateVnum {
                kind: RecordKind::Path,
                vnum: 4
            })
        ));
    }

    #[test]
    fn test_region_and_path_vnums_are_separate() {
        let snapshot = Snapshot::new(vec![region(1)], vec![path(1)]);
        assert!(snapshot.check().is_ok());
    }

    #[test]
    fn test_newer_major_version_rejected() {
        let mut snapshot = Snapshot::default();
        snapshot.version = SchemaVersion::new(2, 0, 0);
        let json = snapshot.to_json().expect("serialize failed");
        assert!(matches!(
            Snapshot::from_json(&json),
            Err(StoreError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_file_round_trip_keeps_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("maps").join("wild.json");
        let snapshot = Snapshot::new(vec![region(9), region(3), region(5)], vec![path(2)]);
        snapshot.write_to(&file).expect("write failed");

        let loaded = Snapshot::read_from(&file).expect("read failed");
        assert_eq!(loaded, snapshot);
        let order: Vec<i32> = loaded.regions.iter().map(|r| r.vnum).collect();
        assert_eq!(order, vec![9, 3, 5]);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Snapshot::from_json("{ not json"),
            Err(StoreError::Serialization(_))
        ));
    }
}
