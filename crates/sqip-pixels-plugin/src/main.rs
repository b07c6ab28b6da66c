#![warn(missing_docs)]
//! # sqip-pixels binary
//!
//! Command-line entry point: reads an image, runs the pixels plugin, and
//! writes the SVG placeholder to a file or stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sqip_pixels_plugin::{
    PIXELS_OPTION, PLUGIN_NAME, PixelsOptions, PixelsPlugin, SqipPlugin, declared_metadata,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Converts a raster image into a pixel mosaic SVG placeholder.
#[derive(Parser, Debug)]
#[command(name = "sqip-pixels", version)]
struct Args {
    /// Input raster image.
    input: PathBuf,

    /// Output SVG path (stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(
        short,
        long,
        env = "SQIP_PIXELS",
        default_value_t = PIXELS_OPTION.default_value,
        help = PIXELS_OPTION.description
    )]
    pixels: u32,

    /// Plugin options as a JSON object; takes precedence over `--pixels`.
    #[arg(long)]
    options: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let options = PixelsOptions::merged(args.options.as_deref(), args.pixels)?;
    let config = <PixelsPlugin as SqipPlugin>::configure(options)?;
    let plugin = PixelsPlugin::new(config);

    let buffer = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read input: {}", args.input.display()))?;
    let metadata = declared_metadata(&args.input, &buffer)
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;
    info!(
        plugin = PLUGIN_NAME,
        width = metadata.width,
        height = metadata.height,
        image_type = %metadata.image_type,
        pixels = config.pixels(),
        "transforming image"
    );

    let output = plugin
        .transform(&buffer, &metadata)
        .with_context(|| format!("Failed to transform {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output.payload)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(
                path = %path.display(),
                mime_type = output.mime_type,
                bytes = output.payload.len(),
                "wrote placeholder"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output.payload)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let max_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}
