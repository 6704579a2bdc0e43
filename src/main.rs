use anyhow::Context;
use clap::Parser;
use rapidpath::{init_logging, run, Cli, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json)?;
    tracing::debug!("rapidpath {} (built {})", VERSION, BUILD_DATE);

    let report = run(&cli)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;
    println!("{}", json);

    Ok(())
}
