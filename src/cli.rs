//! Command-line interface

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rapidpath_optimizer::TourKind;
use rapidpath_reader::{ProgramFileReader, ProgramReader};
use rapidpath_settings::Config;
use tracing::{debug, info};

use crate::report::{analyze, TravelReport};

#[derive(Debug, Parser)]
#[command(name = "rapidpath", version)]
#[command(about = "Report safe travel height and a short rapid-move order for a G-code program")]
pub struct Cli {
    /// G-code program to analyze
    pub program: PathBuf,

    /// Config file (.toml or .json); defaults to the user config file if present
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report an open path instead of a closed cycle
    #[arg(long)]
    pub open: bool,

    /// Skip the 2-opt refinement pass
    #[arg(long)]
    pub no_refine: bool,

    /// Maximum number of unique rapid targets
    #[arg(long, value_name = "N")]
    pub max_points: Option<usize>,

    /// Count coordinate-only lines as rapids while G0 is active
    #[arg(long)]
    pub modal_rapids: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Load the configuration file and apply command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load_or_default().context("Failed to load default config")?,
        };

        self.apply_overrides(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Apply flags on top of file values
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.open {
            config.optimizer.tour_kind = TourKind::Open;
        }
        if self.no_refine {
            config.optimizer.refine = false;
        }
        if let Some(max_points) = self.max_points {
            config.optimizer.max_points = max_points;
        }
        if self.modal_rapids {
            config.reader.modal_rapids = true;
        }
    }
}

/// Read the program named on the command line and build its report
pub fn run(cli: &Cli) -> Result<TravelReport> {
    let config = cli.load_config()?;
    debug!("Using config: {:?}", config);

    let program = ProgramFileReader::new(&cli.program)?;
    info!(
        "Reading {} ({} bytes)",
        program.path().display(),
        program.file_size()
    );
    let scan = program.scan(&ProgramReader::new(config.reader.clone()))?;

    analyze(&scan, &config.optimizer)
        .with_context(|| format!("Failed to optimize {}", cli.program.display()))
}
