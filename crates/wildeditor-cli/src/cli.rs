//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wildeditor_common::Coordinate;

/// `wildeditor` - inspect and edit wilderness regions and paths.
///
/// Reads and writes a JSON map snapshot. Query commands print JSON on
/// stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "WILDEDITOR_CONFIG", default_value = "wildeditor.toml")]
    pub config: PathBuf,

    /// Map snapshot to use instead of the configured one.
    #[arg(long, global = true, env = "WILDEDITOR_STORE")]
    pub store: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Geometry kind for `encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeometryKind {
    /// Region polygon
    Polygon,
    /// Path linestring
    Linestring,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show regions, paths and resolved terrain at a coordinate.
    Point {
        /// X coordinate
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y coordinate
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Match radius (defaults to the configured point radius)
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Decode polygon or linestring text.
    Decode {
        /// Geometry text
        wkt: String,
    },

    /// Encode vertices given as `x,y`.
    Encode {
        /// Output geometry
        #[arg(long, value_enum, default_value_t = GeometryKind::Polygon)]
        kind: GeometryKind,
        /// Vertices
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_coordinate)]
        vertices: Vec<Coordinate>,
    },

    /// List the sector table.
    Sectors,

    /// List regions.
    Regions {
        /// Only this zone
        #[arg(long)]
        zone: Option<i32>,
        /// Only this region type code
        #[arg(long = "type")]
        region_type: Option<i32>,
        /// Only regions containing or near `x,y`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        at: Option<Coordinate>,
    },

    /// List paths.
    Paths {
        /// Only this zone
        #[arg(long)]
        zone: Option<i32>,
        /// Only this path type code
        #[arg(long = "type")]
        path_type: Option<i32>,
        /// Only paths with a vertex near `x,y`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        near: Option<Coordinate>,
    },

    /// Add a single-point landmark region.
    AddLandmark {
        /// Region vnum
        #[arg(long)]
        vnum: i32,
        /// Owning zone
        #[arg(long)]
        zone: i32,
        /// Name
        #[arg(long)]
        name: String,
        /// X coordinate
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y coordinate
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Region type code
        #[arg(long = "type", default_value_t = 1)]
        region_type: i32,
        /// Type-specific value (sector or elevation delta)
        #[arg(long, allow_negative_numbers = true)]
        props: Option<i32>,
    },

    /// Delete a region by vnum.
    DeleteRegion {
        /// Region vnum
        vnum: i32,
    },

    /// Delete a path by vnum.
    DeletePath {
        /// Path vnum
        vnum: i32,
    },

    /// Write the effective configuration to the config path.
    InitConfig,
}

/// Parses `x,y` into a coordinate inside the world bounds.
pub fn parse_coordinate(text: &str) -> Result<Coordinate, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{text}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Coordinate::checked(x, y).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("-59,91.5"), Ok(Coordinate::new(-59.0, 91.5)));
        assert_eq!(parse_coordinate(" 3 , 4 "), Ok(Coordinate::new(3.0, 4.0)));
        assert!(parse_coordinate("3").is_err());
        assert!(parse_coordinate("3,y").is_err());
        assert!(parse_coordinate("2000,0").is_err());
    }

    #[test]
    fn test_negative_arguments() {
        let cli = Cli::try_parse_from(["wildeditor", "point", "--x", "-59", "--y", "91"])
            .expect("parse failed");
        match cli.command {
            Command::Point { x, y, radius } => {
                assert_eq!((x, y), (-59.0, 91.0));
                assert_eq!(radius, None);
            },
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "wildeditor",
            "encode",
            "--kind",
            "linestring",
            "-1,-1",
            "2,3",
        ])
        .expect("parse failed");
        match cli.command {
            Command::Encode { kind, vertices } => {
                assert_eq!(kind, GeometryKind::Linestring);
                assert_eq!(vertices, vec![Coordinate::new(-1.0, -1.0), Coordinate::new(2.0, 3.0)]);
            },
            other => panic!("unexpected command {other:?}"),
        }
    }
}
