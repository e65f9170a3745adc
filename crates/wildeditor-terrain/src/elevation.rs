//! Base elevation and elevation-to-sector mapping.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use wildeditor_common::{SectorId, SectorType};

/// Computes base terrain for a world position.
///
/// Implementations must be deterministic for a given position so that
/// resolution is repeatable.
pub trait ElevationSource: Send + Sync {
    /// Base elevation at `(x, y)`.
    fn elevation(&self, x: f64, y: f64) -> i32;

    /// Sector for `elevation` at `(x, y)`.
    fn sector_for(&self, x: f64, y: f64, elevation: i32) -> SectorId;
}

/// Elevation thresholds, each the exclusive upper bound of its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationBands {
    /// Below this is open ocean
    pub deep_water: i32,
    /// Below this is shallow water
    pub waterline: i32,
    /// Below this is beach
    pub beach: i32,
    /// Below this is open field
    pub plains: i32,
    /// Below this is forest
    pub forest: i32,
    /// Below this is hills
    pub hills: i32,
    /// Below this is mountains; anything higher is high mountain
    pub mountains: i32,
}

impl Default for ElevationBands {
    fn default() -> Self {
        Self {
            deep_water: 96,
            waterline: 128,
            beach: 134,
            plains: 160,
            forest: 185,
            hills: 210,
            mountains: 235,
        }
    }
}

impl ElevationBands {
    /// Maps an elevation to its sector.
    #[must_use]
    pub fn sector(&self, elevation: i32) -> SectorId {
        let sector = match elevation {
            e if e < self.deep_water => SectorType::Ocean,
            e if e < self.waterline => SectorType::WaterSwim,
            e if e < self.beach => SectorType::Beach,
            e if e < self.plains => SectorType::Field,
            e if e < self.forest => SectorType::Forest,
            e if e < self.hills => SectorType::Hills,
            e if e < self.mountains => SectorType::Mountains,
            _ => SectorType::HighMountain,
        };
        sector.into()
    }
}

/// Noise elevation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationConfig {
    /// World seed
    pub seed: u32,
    /// Terrain scale (larger = smoother)
    pub terrain_scale: f64,
    /// Weight of the high-frequency detail layer
    pub detail_weight: f64,
    /// Elevation at the highest peak
    pub max_elevation: i32,
    /// Sector bands
    pub bands: ElevationBands,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            terrain_scale: 100.0,
            detail_weight: 0.1,
            max_elevation: 255,
            bands: ElevationBands::default(),
        }
    }
}

/// Perlin-noise elevation over the whole wilderness.
pub struct NoiseElevation {
    /// Configuration
    config: ElevationConfig,
    /// Terrain noise
    terrain_noise: Perlin,
    /// Detail noise
    detail_noise: Perlin,
}

impl NoiseElevation {
    /// Creates a generator with the given config.
    #[must_use]
    pub fn new(config: ElevationConfig) -> Self {
        let terrain_noise = Perlin::new(config.seed);
        let detail_noise = Perlin::new(config.seed.wrapping_add(1));

        Self {
            config,
            terrain_noise,
            detail_noise,
        }
    }

    /// Creates a generator with default config and the given seed.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(ElevationConfig {
            seed,
            ..Default::default()
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ElevationConfig {
        &self.config
    }
}

impl ElevationSource for NoiseElevation {
    fn elevation(&self, x: f64, y: f64) -> i32 {
        let scale = self.config.terrain_scale.max(f64::EPSILON);
        let wx = x / scale;
        let wy = y / scale;

        let height = self.terrain_noise.get([wx, wy]);
        let detail = self.detail_noise.get([wx * 4.0, wy * 4.0]) * self.config.detail_weight;
        let normalized = ((height + detail + 1.0) / 2.0).clamp(0.0, 1.0);

        (normalized * f64::from(self.config.max_elevation)).round() as i32
    }

    fn sector_for(&self, _x: f64, _y: f64, elevation: i32) -> SectorId {
        self.config.bands.sector(elevation)
    }
}

impl std::fmt::Debug for NoiseElevation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseElevation")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Uniform elevation everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlatElevation {
    /// Elevation reported for every position
    pub elevation: i32,
    /// Sector bands
    pub bands: ElevationBands,
}

impl FlatElevation {
    /// Flat terrain at the given elevation with default bands.
    #[must_use]
    pub fn new(elevation: i32) -> Self {
        Self {
            elevation,
            bands: ElevationBands::default(),
        }
    }
}

impl ElevationSource for FlatElevation {
    fn elevation(&self, _x: f64, _y: f64) -> i32 {
        self.elevation
    }

    fn sector_for(&self, _x: f64, _y: f64, elevation: i32) -> SectorId {
        self.bands.sector(elevation)
    }
}
