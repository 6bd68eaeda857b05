//! framegrid - compose directories of frames into stack grids
//!
//! Loads a directory of equally sized frames once, then writes one grid per
//! requested `(stack length, axis)` combination.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use framegrid_core::Format;
use framegrid_io::Filter;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use config::AxisChoice;

#[derive(Parser)]
#[command(name = "framegrid")]
#[command(author, version, about = "Compose image frame sequences into stack grids")]
#[command(long_about = "
Loads every frame of a directory in file name order, groups consecutive
frames into stacks and lays the stacks out side by side as one grid image.

Examples:
  framegrid grid render/peach -s 10                 # vertical stacks of 10
  framegrid grid render/peach -s 10 -s 12 -a both   # four grids
  framegrid grid render/peach -s 8 --scale 50 -f png -f webp -o sheets
  framegrid plan render/peach -s 10 -a both         # sizes and names only
  framegrid frames render/peach --pattern 'frame*.png'
  framegrid grid --config job.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write the log to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose and write grids
    #[command(visible_alias = "g")]
    Grid(GridArgs),

    /// Print grid layouts and output names without decoding pixels
    #[command(visible_alias = "p")]
    Plan(PlanArgs),

    /// List frames in load order
    #[command(visible_alias = "ls")]
    Frames(FramesArgs),
}

/// Frame selection, shared by all commands.
#[derive(Args)]
struct LoadArgs {
    /// Input directory
    input: Option<PathBuf>,

    /// YAML job file; command line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accepted extensions (default: all decodable formats)
    #[arg(long = "ext")]
    ext: Vec<String>,

    /// Only file names matching this glob (e.g. 'frame*.png')
    #[arg(long)]
    pattern: Option<String>,

    /// Use at most this many frames
    #[arg(long)]
    limit: Option<usize>,

    /// Trim uniform borders from every frame
    #[arg(long)]
    trim: bool,

    /// Skip frames that fail to decode instead of aborting
    #[arg(long)]
    skip_bad: bool,
}

/// Tiling parameters.
#[derive(Args)]
struct TilingArgs {
    /// Frames per stack (repeat for several grids)
    #[arg(short = 's', long = "stack")]
    stack: Vec<usize>,

    /// Stack axis: vertical, horizontal or both [default: vertical]
    #[arg(short = 'a', long, value_enum)]
    axis: Option<AxisChoice>,

    /// Scale the final grid, in percent
    #[arg(long)]
    scale: Option<f64>,

    /// Output name prefix [default: input directory name and frame size]
    #[arg(long)]
    prefix: Option<String>,
}

/// Output settings.
#[derive(Args)]
struct OutputArgs {
    /// Output directory [default: current directory]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (repeat for several) [default: png]
    #[arg(short = 'f', long = "format")]
    format: Vec<Format>,

    /// Resampling filter for --scale: nearest, bilinear, bicubic, gaussian, lanczos3
    #[arg(long)]
    filter: Option<Filter>,

    /// Replace existing files instead of appending _1, _2, ...
    #[arg(long)]
    overwrite: bool,

    /// Compose combinations in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct GridArgs {
    #[command(flatten)]
    load: LoadArgs,

    #[command(flatten)]
    tiling: TilingArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct PlanArgs {
    #[command(flatten)]
    load: LoadArgs,

    #[command(flatten)]
    tiling: TilingArgs,

    /// Output format used for the printed names (repeat for several)
    #[arg(short = 'f', long = "format")]
    format: Vec<Format>,
}

#[derive(Args)]
struct FramesArgs {
    #[command(flatten)]
    load: LoadArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::setup_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Frames(args) => commands::frames::run(args),
    }
}
