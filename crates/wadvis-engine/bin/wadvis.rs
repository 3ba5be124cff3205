//! `wadvis` binary entry point.
//!
//! This is a thin wrapper around the wadvis-engine library that:
//! 1. Parses command-line arguments
//! 2. Initializes logging
//! 3. Validates configuration
//! 4. Runs the selected subcommand

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;
use wadvis_engine::{
    CliConfig, Command, ExtractArgs, ListArgs, PlaceholderVisEngine, Session, VisArgs,
};
use wadvis_formats::{WadReader, WadStack};

fn main() -> Result<()> {
    let config = CliConfig::from_args();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    config.validate()?;

    match &config.command {
        Command::Vis(args) => vis(args),
        Command::List(args) => list(args),
        Command::Extract(args) => extract(args),
    }
}

fn vis(args: &VisArgs) -> Result<()> {
    let (Some(gwa_path), Some(output_path)) = (args.gwa_path(), args.output_path()) else {
        bail!("--wad or --gwa must be given");
    };

    let nodes = fs::read(&gwa_path)
        .with_context(|| format!("could not load GWA file {}", gwa_path.display()))?;
    let source = args
        .wad
        .as_ref()
        .map(|wad| {
            fs::read(wad).with_context(|| format!("could not load WAD file {}", wad.display()))
        })
        .transpose()?;

    info!("Building visibility for {}", gwa_path.display());
    let mut session = Session::new(PlaceholderVisEngine::new(), args.session_config());
    match &source {
        Some(source) => session.run_with_source(source, &nodes)?,
        None => session.run(&nodes)?,
    }

    fs::write(&output_path, session.output_bytes()?)
        .with_context(|| format!("could not write {}", output_path.display()))?;
    info!(
        "Wrote {} bytes to {}",
        session.output_size()?,
        output_path.display()
    );
    session.destroy();
    Ok(())
}

fn list(args: &ListArgs) -> Result<()> {
    let data =
        fs::read(&args.file).with_context(|| format!("could not read {}", args.file.display()))?;
    let reader = WadReader::open(&data)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{} {} lumps", reader.kind(), reader.lump_count())?;
    for (index, record) in reader.iter().enumerate() {
        writeln!(
            out,
            "{:>5}  {:<8}  {:>10}  {:>10}",
            index,
            record.name.to_string_lossy(),
            record.offset,
            record.size
        )?;
    }
    Ok(())
}

fn extract(args: &ExtractArgs) -> Result<()> {
    let paths: Vec<&PathBuf> = std::iter::once(&args.file).chain(&args.patches).collect();
    let files = paths
        .iter()
        .map(|path| fs::read(path).with_context(|| format!("could not read {}", path.display())))
        .collect::<Result<Vec<_>>>()?;

    let mut stack = WadStack::new();
    for (path, data) in paths.iter().zip(&files) {
        stack
            .load(data)
            .with_context(|| format!("could not open {}", path.display()))?;
    }
    let location = stack.find_lump_by_name(&args.lump)?;
    let lump = stack.lump_data(location)?;

    fs::write(&args.output, lump)
        .with_context(|| format!("could not write {}", args.output.display()))?;
    info!(
        "Extracted {} ({} bytes) from {} to {}",
        stack.archives()[location.archive].lump_name(location.index),
        lump.len(),
        paths[location.archive].display(),
        args.output.display()
    );
    Ok(())
}
