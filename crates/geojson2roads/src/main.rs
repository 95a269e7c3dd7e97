mod args;
mod dump;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use roadnet::{GeoJsonSource, NetworkManager, TagAttributes};

use crate::args::Args;
use crate::dump::{CliDisplay, JsonDump};

fn main() -> Result<()> {
    // Default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.network_config()?;
    info!("Configuration: {:?}", config);

    let attributes = TagAttributes {
        strict: args.strict_tags,
    };

    let display = CliDisplay {
        dump: args
            .output
            .clone()
            .map(|path| JsonDump::new(path, args.pretty)),
        ..CliDisplay::default()
    };

    let mut manager = NetworkManager::new(
        config,
        GeoJsonSource::from_path(&args.input),
        attributes,
        display,
    );

    // Build, then hand the finished network to the display.
    manager
        .setup()
        .with_context(|| format!("Building road network from {}", args.input.display()))?;
    manager.refresh();

    let report = *manager.network().report();
    info!(
        "{} of {} features selected, {} vertices sampled, {} clipped",
        report.features_selected,
        report.features_total,
        report.vertices_sampled,
        report.vertices_clipped
    );

    if let Some(dump) = manager.display_mut().dump.as_mut() {
        dump.finish()?;
    }

    Ok(())
}
