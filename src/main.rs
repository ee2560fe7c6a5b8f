use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use itunes_xspf::{BatchConverter, ConvertConfig, PathStyle};
use std::path::PathBuf;

/// Separator convention for rewritten locations
#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    /// Detect from the base path
    Auto,
    Windows,
    Unix,
}

#[derive(Parser, Debug)]
#[command(name = "itunes-xspf")]
#[command(about = "Convert iTunes playlist exports to XSPF playlists", long_about = None)]
struct Args {
    /// Directory containing exported iTunes playlists (*.xml)
    #[arg(short = 'i', long, default_value = "to_convert")]
    input: String,

    /// Directory for the generated .xspf files (created if missing)
    #[arg(short = 'o', long, default_value = "converted")]
    output: String,

    /// Music folder on the destination machine, without a trailing separator
    #[arg(short = 'b', long)]
    base: String,

    /// Path separator style for rewritten locations
    #[arg(short = 's', long, value_enum, default_value = "auto")]
    style: StyleArg,

    /// Convert files in parallel
    #[arg(short = 'j', long)]
    parallel: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Validate before touching any file
    let config = ConvertConfig::new(args.base.as_str()).context("Invalid --base path")?;
    let config = match args.style {
        StyleArg::Auto => config,
        StyleArg::Windows => config.with_style(PathStyle::Windows),
        StyleArg::Unix => config.with_style(PathStyle::Unix),
    };

    log::info!(
        "Rewriting locations under {} ({:?} separators)",
        config.base_path(),
        config.style()
    );

    // Expand ~ in local directories; the base path belongs to another machine
    let input = shellexpand::tilde(&args.input);
    let output = shellexpand::tilde(&args.output);

    let report = BatchConverter::new(
        config,
        PathBuf::from(input.as_ref()),
        PathBuf::from(output.as_ref()),
    )
    .with_parallel(args.parallel)
    .run()?;

    if report.failed.is_empty() {
        log::info!("✅ {} playlist(s) converted", report.converted.len());
    } else {
        log::warn!(
            "{} playlist(s) converted, {} skipped:",
            report.converted.len(),
            report.failed.len()
        );
        for failed in &report.failed {
            log::warn!("  {:?}: {}", failed.source, failed.error);
        }
    }

    Ok(())
}
