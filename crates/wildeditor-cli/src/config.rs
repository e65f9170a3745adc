//! Editor configuration.
//!
//! Loaded from `wildeditor.toml`. Missing or invalid files fall back to the
//! defaults so the tool always starts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wildeditor_geometry::{DEFAULT_LANDMARK_RADIUS, LANDMARK_EXTENT};
use wildeditor_terrain::{ElevationConfig, DEFAULT_PATH_RADIUS, DEFAULT_POINT_RADIUS};

/// Largest landmark half-width whose square still decodes as a landmark.
///
/// The detector collapses clusters narrower than [`LANDMARK_EXTENT`], so the
/// full square width must stay below it.
const MAX_LANDMARK_RADIUS: f64 = LANDMARK_EXTENT * 0.4;

/// Editor configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Map snapshot file
    pub store_path: PathBuf,
    /// Radius for point queries
    pub point_radius: f64,
    /// Radius for near-path queries
    pub path_radius: f64,
    /// Half-width of the square written for landmarks
    pub landmark_radius: f64,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Base terrain
    pub elevation: ElevationConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("wildeditor.json"),
            point_radius: DEFAULT_POINT_RADIUS,
            path_radius: DEFAULT_PATH_RADIUS,
            landmark_radius: DEFAULT_LANDMARK_RADIUS,
            log_filter: "wildeditor=info".to_string(),
            elevation: ElevationConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                config.validate();
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values to usable ranges.
    pub fn validate(&mut self) {
        self.point_radius = sanitize(self.point_radius, DEFAULT_POINT_RADIUS);
        self.path_radius = sanitize(self.path_radius, DEFAULT_PATH_RADIUS);
        let landmark_radius = sanitize(self.landmark_radius, DEFAULT_LANDMARK_RADIUS);
        self.landmark_radius = landmark_radius.clamp(DEFAULT_LANDMARK_RADIUS, MAX_LANDMARK_RADIUS);
        if self.landmark_radius != landmark_radius {
            warn!(
                "landmark_radius {landmark_radius} is outside the landmark range, using {}",
                self.landmark_radius
            );
        }
        self.elevation.terrain_scale = sanitize(self.elevation.terrain_scale, 100.0).max(1.0);
    }
}

fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wildeditor_common::{Coordinate, RegionVnum, ZoneVnum};
    use wildeditor_terrain::{Region, RegionKind};

    #[test]
    fn test_config_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.point_radius, 0.1);
        assert_eq!(config.path_radius, 0.1);
        assert_eq!(config.landmark_radius, 0.001);
        assert_eq!(config.elevation.seed, 12345);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("wildeditor.toml");

        let mut config = EditorConfig::default();
        config.store_path = PathBuf::from("maps/wild.json");
        config.point_radius = 2.5;
        config.elevation.seed = 99;
        config.save_to(&config_path).expect("Failed to save config");

        let loaded = EditorConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EditorConfig::load_from("/nonexistent/path/wildeditor.toml");
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_config_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("wildeditor.toml");
        fs::write(&config_path, "path_radius = 0.5\n[elevation]\nseed = 7\n")
            .expect("write failed");

        let config = EditorConfig::load_from(&config_path);
        assert_eq!(config.path_radius, 0.5);
        assert_eq!(config.point_radius, 0.1);
        assert_eq!(config.elevation.seed, 7);
        assert_eq!(config.elevation.max_elevation, 255);
    }

    #[test]
    fn test_config_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("wildeditor.toml");
        fs::write(&config_path, "point_radius = \"wide\"").expect("write failed");
        assert_eq!(EditorConfig::load_from(&config_path), EditorConfig::default());
    }

    #[test]
    fn test_config_validate_clamps() {
        let mut config = EditorConfig::default();
        config.point_radius = -3.0;
        config.path_radius = f64::NAN;
        config.landmark_radius = 5.0;
        config.validate();
        assert_eq!(config.point_radius, 0.0);
        assert_eq!(config.path_radius, 0.1);
        assert_eq!(config.landmark_radius, MAX_LANDMARK_RADIUS);
    }

    #[test]
    fn test_clamped_landmark_radius_round_trips() {
        let mut config = EditorConfig::default();
        config.landmark_radius = 0.1;
        config.validate();
        assert!(config.landmark_radius * 2.0 < LANDMARK_EXTENT);

        let region = Region::landmark(
            RegionVnum::new(1000001),
            ZoneVnum::new(100),
            "Ashenport",
            RegionKind::Geographic,
            Coordinate::new(-59.0, 91.0),
        )
        .expect("valid landmark");
        let stored = region
            .to_record(config.landmark_radius)
            .expect("encodable");
        let back = Region::from_record(&stored).expect("valid record");
        assert!(back.geometry().is_landmark());
        assert!(back.geometry().vertices()[0].approx_eq(Coordinate::new(-59.0, 91.0), 1e-9));
    }
}
