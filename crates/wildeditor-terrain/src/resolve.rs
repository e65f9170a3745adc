//! Layering of region and path effects into a final sector.
//!
//! Regions are applied first, in the order supplied, then paths in the order
//! supplied. Later entries win over earlier ones; there is no spatial
//! priority, so callers must pass records in their persisted order.

use serde::Serialize;
use tracing::{debug, warn};
use wildeditor_common::{PathVnum, RangeWarning, RegionVnum, SectorId};

use crate::elevation::ElevationSource;
use crate::path::{Path, PathType};
use crate::region::{Region, RegionType};

/// Record that contributed to a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ModifierSource {
    /// A region
    Region {
        /// Region vnum
        vnum: RegionVnum,
        /// Region type
        region_type: RegionType,
    },
    /// A path
    Path {
        /// Path vnum
        vnum: PathVnum,
        /// Path type
        path_type: PathType,
    },
}

/// What a modifier did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ModifierEffect {
    /// Matched but has no terrain effect
    Descriptive,
    /// Elevation shifted and the sector recomputed
    ElevationShift {
        /// Delta applied
        delta: i32,
        /// Elevation after the shift
        elevation: i32,
        /// Sector derived from the new elevation
        sector: SectorId,
    },
    /// Sector replaced
    SectorReplaced {
        /// Sector before
        from: SectorId,
        /// Sector after
        to: SectorId,
    },
}

/// One step of the resolution trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedModifier {
    /// Contributing record
    pub source: ModifierSource,
    /// Its effect
    pub effect: ModifierEffect,
}

/// Final terrain at a coordinate plus how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Elevation from the elevation function
    pub base_elevation: i32,
    /// Elevation after transforms
    pub elevation: i32,
    /// Sector derived from the base elevation
    pub base_sector: SectorId,
    /// Final sector
    pub sector: SectorId,
    /// Modifiers in application order
    pub applied: Vec<AppliedModifier>,
    /// Out-of-range values that were accepted
    pub warnings: Vec<RangeWarning>,
}

struct ResolveState<'a> {
    x: f64,
    y: f64,
    source: &'a dyn ElevationSource,
    elevation: i32,
    sector: SectorId,
    applied: Vec<AppliedModifier>,
    warnings: Vec<RangeWarning>,
}

impl ResolveState<'_> {
    fn record(&mut self, source: ModifierSource, effect: ModifierEffect) {
        self.applied.push(AppliedModifier { source, effect });
    }

    fn flag(&mut self, warning: Option<RangeWarning>) {
        if let Some(w) = warning {
            warn!("{w}");
            self.warnings.push(w);
        }
    }

    fn replace_sector(&mut self, source: ModifierSource, to: SectorId) {
        let from = self.sector;
        self.sector = to;
        self.record(source, ModifierEffect::SectorReplaced { from, to });
    }
}

type RegionHandler = fn(&mut ResolveState<'_>, &Region);

/// Handlers indexed by [`RegionType::index`].
const REGION_HANDLERS: [RegionHandler; 4] = [
    apply_descriptive,
    apply_descriptive,
    apply_elevation_delta,
    apply_sector_override,
];

fn region_handler(region_type: RegionType) -> RegionHandler {
    REGION_HANDLERS[region_type.index()]
}

fn region_source(region: &Region) -> ModifierSource {
    ModifierSource::Region {
        vnum: region.vnum(),
        region_type: region.region_type(),
    }
}

fn apply_descriptive(state: &mut ResolveState<'_>, region: &Region) {
    state.record(region_source(region), ModifierEffect::Descriptive);
}

fn apply_elevation_delta(state: &mut ResolveState<'_>, region: &Region) {
    let delta = region.kind().elevation_delta().unwrap_or(0);
    state.elevation = state.elevation.saturating_add(delta);
    state.sector = state.source.sector_for(state.x, state.y, state.elevation);
    let effect = ModifierEffect::ElevationShift {
        delta,
        elevation: state.elevation,
        sector: state.sector,
    };
    state.record(region_source(region), effect);
}

fn apply_sector_override(state: &mut ResolveState<'_>, region: &Region) {
    let Some(sector) = region.kind().sector() else {
        return;
    };
    state.flag(region.range_warning());
    state.replace_sector(region_source(region), sector);
}

fn apply_path(state: &mut ResolveState<'_>, path: &Path) {
    let source = ModifierSource::Path {
        vnum: path.vnum(),
        path_type: path.path_type(),
    };
    match path.sector() {
        Some(sector) => {
            state.flag(path.range_warning());
            state.replace_sector(source, sector);
        },
        None => state.record(source, ModifierEffect::Descriptive),
    }
}

/// Resolves the sector at a coordinate from matching regions and paths.
#[derive(Clone, Copy)]
pub struct TerrainResolver<'a> {
    elevation: &'a dyn ElevationSource,
}

impl<'a> TerrainResolver<'a> {
    /// Creates a resolver backed by the given elevation function.
    #[must_use]
    pub fn new(elevation: &'a dyn ElevationSource) -> Self {
        Self { elevation }
    }

    /// Resolves the sector at `(x, y)`.
    ///
    /// `regions` and `paths` must already be the records matching the
    /// coordinate, in persisted order.
    pub fn resolve<'r, R, P>(&self, x: f64, y: f64, regions: R, paths: P) -> Resolution
    where
        R: IntoIterator<Item = &'r Region>,
        P: IntoIterator<Item = &'r Path>,
    {
        let base_elevation = self.elevation.elevation(x, y);
        let base_sector = self.elevation.sector_for(x, y, base_elevation);

        let mut state = ResolveState {
            x,
            y,
            source: self.elevation,
            elevation: base_elevation,
            sector: base_sector,
            applied: Vec::new(),
            warnings: Vec::new(),
        };

        for region in regions {
            region_handler(region.region_type())(&mut state, region);
        }
        for path in paths {
            apply_path(&mut state, path);
        }

        debug!(
            "Resolved ({x}, {y}): elevation {base_elevation} -> {}, sector {base_sector} -> {} via {} modifiers",
            state.elevation,
            state.sector,
            state.applied.len()
        );

        Resolution {
            base_elevation,
            elevation: state.elevation,
            base_sector,
            sector: state.sector,
            applied: state.applied,
            warnings: state.warnings,
        }
    }
}

impl std::fmt::Debug for TerrainResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainResolver").finish_non_exhaustive()
    }
}
