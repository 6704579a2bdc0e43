//! # RapidPath
//!
//! Travel-move optimizer for G-code programs. Given a program, RapidPath
//! reports:
//! - every height the program uses, sorted, and the safe travel height
//!   (the highest of them)
//! - the distinct XY targets of its rapid moves
//! - a short visiting order for those targets (Christofides with 2-opt)
//!
//! ## Architecture
//!
//! RapidPath is organized as a workspace with multiple crates:
//!
//! 1. **rapidpath-core** - Point type and error taxonomy
//! 2. **rapidpath-reader** - Program scanning (heights, rapid targets)
//! 3. **rapidpath-optimizer** - Height resolution, deduplication, tour construction
//! 4. **rapidpath-settings** - TOML/JSON configuration
//! 5. **rapidpath** - Pipeline, command-line tool and logging setup

pub mod cli;
pub mod report;

pub use cli::{run, Cli};
pub use report::{analyze, TravelReport};

pub use rapidpath_core::{Error, GeometryError, OptimizerError, Point2D, Result};
pub use rapidpath_optimizer::{OptimizerSettings, Tour, TourKind, UniquePoints};
pub use rapidpath_reader::{ProgramFileReader, ProgramReader, ProgramScan, ReaderSettings};
pub use rapidpath_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for the report
/// - RUST_LOG environment variable support
/// - `info` by default, `debug` when `verbose` is set
/// - Human-readable or JSON lines
pub fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let result = if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
