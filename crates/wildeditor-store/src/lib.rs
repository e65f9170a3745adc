//! # Wildeditor Store
//!
//! Persistence for wilderness map records.
//!
//! This crate provides:
//! - An in-memory [`MapStore`](wildeditor_terrain::MapStore) keeping records
//!   in persisted order
//! - JSON snapshot files with schema versioning

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod memory;
pub mod snapshot;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::memory::*;
    pub use crate::snapshot::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use wildeditor_common::{Coordinate, RegionVnum, ZoneVnum};
    use wildeditor_terrain::{point_info, FlatElevation, MapStore, Region, RegionKind};

    #[test]
    fn test_landmark_survives_store_round_trip() {
        let store = MemoryStore::new();
        let landmark = Region::landmark(
            RegionVnum::new(1001),
            ZoneVnum::new(100),
            "Ashenport",
            RegionKind::Geographic,
            Coordinate::new(-59.0, 91.0),
        )
        .expect("valid landmark");
        store
            .save_region(landmark.to_record(0.001).expect("encodable"))
            .expect("save failed");

        let info = point_info(&store, &FlatElevation::new(140), Coordinate::new(-59.0, 91.0), 0.1)
            .expect("query failed");
        assert_eq!(info.regions.len(), 1);
        assert!(info.regions[0].geometry().is_landmark());
        let vertices = info.regions[0].geometry().vertices();
        assert_eq!(vertices.len(), 1);
        assert!(vertices[0].approx_eq(Coordinate::new(-59.0, 91.0), 1e-9));
    }
}
