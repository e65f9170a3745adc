//! # Wildeditor
//!
//! Command-line front end for the wilderness map editor core.
//!
//! This binary ties together:
//! - Geometry: WKT codec and landmark detection
//! - Terrain: spatial queries and sector resolution
//! - Store: JSON map snapshots

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use crate::cli::Cli;
use crate::config::EditorConfig;

/// Filter used until the config file has been read.
const DEFAULT_LOG_FILTER: &str = "wildeditor=info";

/// Main entry point.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the config file's filter
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, filter_handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER)),
    );
    let fmt_layer = if cli.log_json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    let config = EditorConfig::load_from(&cli.config);
    if !from_env && config.log_filter != DEFAULT_LOG_FILTER {
        filter_handle.reload(EnvFilter::new(&config.log_filter))?;
        debug!("Log filter set to {}", config.log_filter);
    }

    info!("Wildeditor {}", env!("CARGO_PKG_VERSION"));
    app::run(cli, &config)
}
