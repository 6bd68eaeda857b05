//! Grid command
//!
//! Loads the frames once, then composes and writes one grid per
//! combination, optionally in parallel.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use framegrid_io::{OutputWriter, RasterBackend};
use framegrid_ops::{GridComposer, TilingConfig};
use rayon::prelude::*;
use tracing::{info, trace};

use crate::GridArgs;
use crate::config::JobConfig;

pub fn run(args: GridArgs) -> Result<()> {
    let job = JobConfig::load(args.load.config.as_deref())?;
    let selection = job.selection(&args.load)?;
    let tiling = job.tiling(&args.tiling)?;
    let output = job.output(&args.output);
    trace!(input = %selection.input.display(), output = %output.dir.display(), "grid::run");

    let backend = RasterBackend::new().with_filter(output.filter);
    let loaded = super::load_frames(&backend, &selection)?;
    let frames = &loaded.sequence;
    println!("Loaded {} frames from {}", frames.len(), selection.input.display());

    let configs = tiling.configs(&selection.input, frames.frame_size());
    let composer = GridComposer::new(&backend);
    let writer = OutputWriter::new(&backend, &output.dir).overwrite(output.overwrite);

    let compose_and_write = |config: &TilingConfig| -> Result<Vec<PathBuf>> {
        let grid = composer
            .compose(frames, config)
            .with_context(|| format!("Composition failed ({})", super::describe(config)))?;
        let layout = grid.layout();
        output
            .formats
            .iter()
            .map(|&format| {
                let name = layout.file_name(format.extension());
                writer
                    .write(grid.bitmap(), &name, format)
                    .with_context(|| format!("Failed to write {name}"))
            })
            .collect()
    };

    let results: Vec<Result<Vec<PathBuf>>> = if output.parallel {
        configs.par_iter().map(compose_and_write).collect()
    } else {
        configs.iter().map(compose_and_write).collect()
    };

    let mut written = 0;
    let mut failed = 0;
    for (config, result) in configs.iter().zip(results) {
        match result {
            Ok(paths) => {
                for path in paths {
                    println!("{}: {}", super::describe(config), path.display());
                    written += 1;
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error: {e:#}");
            }
        }
    }

    info!(written, failed, "grid run complete");
    if failed > 0 {
        bail!("{} of {} combinations failed", failed, configs.len());
    }
    Ok(())
}
