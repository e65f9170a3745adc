//! In-memory record store.

use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, info};
use wildeditor_common::{PathVnum, RegionVnum, StoreResult};
use wildeditor_terrain::{MapStore, PathFilter, PathRecord, RegionFilter, RegionRecord};

use crate::snapshot::Snapshot;

/// Records held in persisted order.
///
/// Saving an existing vnum overwrites the whole record in place, so the
/// order that resolution depends on is stable across edits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    regions: RwLock<Vec<RegionRecord>>,
    paths: RwLock<Vec<PathRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from a checked snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> StoreResult<Self> {
        snapshot.check()?;
        Ok(Self {
            regions: RwLock::new(snapshot.regions),
            paths: RwLock::new(snapshot.paths),
        })
    }

    /// Copies the current records into a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.regions.read().clone(), self.paths.read().clone())
    }

    /// Opens a snapshot file. A missing file gives an empty store.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            info!("No snapshot at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        Self::from_snapshot(Snapshot::read_from(path)?)
    }

    /// Writes the current records to a snapshot file.
    pub fn persist(&self, path: &Path) -> StoreResult<()> {
        self.snapshot().write_to(path)
    }

    /// Number of region records.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.read().len()
    }

    /// Number of path records.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.read().len()
    }
}

fn upsert<T>(records: &mut Vec<T>, record: T, vnum: impl Fn(&T) -> i32) {
    let key = vnum(&record);
    match records.iter_mut().find(|r| vnum(r) == key) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

fn remove<T>(records: &mut Vec<T>, key: i32, vnum: impl Fn(&T) -> i32) -> bool {
    let before = records.len();
    records.retain(|r| vnum(r) != key);
    records.len() != before
}

impl MapStore for MemoryStore {
    fn load_regions(&self, filter: &RegionFilter) -> StoreResult<Vec<RegionRecord>> {
        let records: Vec<_> = self
            .regions
            .read()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        debug!("Loaded {} region records", records.len());
        Ok(records)
    }

    fn load_paths(&self, filter: &PathFilter) -> StoreResult<Vec<PathRecord>> {
        let records: Vec<_> = self
            .paths
            .read()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        debug!("Loaded {} path records", records.len());
        Ok(records)
    }

    fn save_region(&self, record: RegionRecord) -> StoreResult<()> {
        debug!("Saving region {}", record.vnum);
        upsert(&mut self.regions.write(), record, |r| r.vnum);
        Ok(())
    }

    fn save_path(&self, record: PathRecord) -> StoreResult<()> {
        debug!("Saving path {}", record.vnum);
        upsert(&mut self.paths.write(), record, |p| p.vnum);
        Ok(())
    }

    fn delete_region(&self, vnum: RegionVnum) -> StoreResult<bool> {
        Ok(remove(&mut self.regions.write(), vnum.raw(), |r| r.vnum))
    }

    fn delete_path(&self, vnum: PathVnum) -> StoreResult<bool> {
        Ok(remove(&mut self.paths.write(), vnum.raw(), |p| p.vnum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildeditor_common::ZoneVnum;
    use wildeditor_terrain::{reset_epoch, RegionType};

    fn region(vnum: i32, zone: i32, region_type: i32, name: &str) -> RegionRecord {
        RegionRecord {
            vnum,
            zone_vnum: zone,
            name: Some(name.to_string()),
            region_type,
            region_polygon: Some("POLYGON((0 0, 3 0, 3 3, 0 3, 0 0))".to_string()),
            region_props: None,
            region_reset_data: String::new(),
            region_reset_time: reset_epoch(),
        }
    }

    fn path(vnum: i32) -> PathRecord {
        PathRecord {
            vnum,
            zone_vnum: 10000,
            path_type: 4,
            name: "Silverrun".to_string(),
            path_props: Some(36),
            path_linestring: Some("LINESTRING(0 0, 0 9)".to_string()),
        }
    }

    #[test]
    fn test_upsert_preserves_position() {
        let store = MemoryStore::new();
        for vnum in [5, 2, 8] {
            store
                .save_region(region(vnum, 100, 1, "Before"))
                .expect("save failed");
        }
        store
            .save_region(region(2, 100, 2, "After"))
            .expect("save failed");

        let loaded = store.load_regions(&RegionFilter::all()).expect("load failed");
        let order: Vec<i32> = loaded.iter().map(|r| r.vnum).collect();
        assert_eq!(order, vec![5, 2, 8]);
        assert_eq!(loaded[1].name.as_deref(), Some("After"));
        assert_eq!(loaded[1].region_type, 2);
    }

    #[test]
    fn test_filters_apply() {
        let store = MemoryStore::new();
        store.save_region(region(1, 100, 1, "A")).expect("save failed");
        store.save_region(region(2, 200, 3, "B")).expect("save failed");

        let zone = store
            .load_regions(&RegionFilter::all().in_zone(ZoneVnum::new(200)))
            .expect("load failed");
        assert_eq!(zone.len(), 1);
        assert_eq!(zone[0].vnum, 2);

        let typed = store
            .load_regions(&RegionFilter::all().of_type(RegionType::Geographic))
            .expect("load failed");
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].vnum, 1);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        store.save_path(path(3)).expect("save failed");
        assert_eq!(store.path_count(), 1);
        assert!(store.delete_path(PathVnum::new(3)).expect("delete failed"));
        assert!(!store.delete_path(PathVnum::new(3)).expect("delete failed"));
        assert!(!store.delete_region(RegionVnum::new(3)).expect("delete failed"));
        assert_eq!(store.path_count(), 0);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MemoryStore::open(&dir.path().join("absent.json")).expect("open failed");
        assert_eq!(store.region_count(), 0);
        assert_eq!(store.path_count(), 0);
    }

    #[test]
    fn test_persist_and_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("wild.json");
        let store = MemoryStore::new();
        store.save_region(region(7, 100, 1, "Hardbuckler")).expect("save failed");
        store.save_path(path(1)).expect("save failed");
        store.persist(&file).expect("persist failed");

        let reopened = MemoryStore::open(&file).expect("open failed");
        assert_eq!(reopened.snapshot(), store.snapshot());
    }
}
