//! Plan command
//!
//! Same selection as `grid`, but nothing is written. Frames are only probed
//! for their size unless they are trimmed, since trimmed sizes depend on
//! pixel content.

use anyhow::{Result, bail};
use framegrid_core::{ImageBackend, Size};
use framegrid_io::{ProbeBackend, RasterBackend};
use framegrid_ops::{CompositionResult, GridComposer, GridLayout, TilingConfig};
use tracing::trace;

use crate::PlanArgs;
use crate::config::{JobConfig, Selection, Tiling};

/// Loaded frame summary and one plan per combination.
pub struct Planned {
    pub frames: usize,
    pub frame_size: Option<Size>,
    pub plans: Vec<(TilingConfig, CompositionResult<GridLayout>)>,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let job = JobConfig::load(args.load.config.as_deref())?;
    let selection = job.selection(&args.load)?;
    let tiling = job.tiling(&args.tiling)?;
    let formats = job.formats(&args.format);
    trace!(input = %selection.input.display(), trim = selection.options.trims(), "plan::run");

    let planned = plan_selection(&selection, &tiling)?;
    match planned.frame_size {
        Some(size) => println!("{} frames of {}", planned.frames, size),
        None => println!("0 frames"),
    }

    let mut failed = 0;
    for (config, result) in &planned.plans {
        match result {
            Ok(layout) => {
                print_layout(layout);
                for format in &formats {
                    println!("    {}", layout.file_name(format.extension()));
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error ({}): {e}", super::describe(config));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} combinations are invalid", failed, planned.plans.len());
    }
    Ok(())
}

/// Plans every combination of `tiling` over the selected frames.
pub fn plan_selection(selection: &Selection, tiling: &Tiling) -> Result<Planned> {
    if selection.options.trims() {
        plan_with(&RasterBackend::new(), selection, tiling)
    } else {
        plan_with(&ProbeBackend::new(), selection, tiling)
    }
}

fn plan_with<B: ImageBackend>(backend: &B, selection: &Selection, tiling: &Tiling) -> Result<Planned> {
    let loaded = super::load_frames(backend, selection)?;
    let frames = &loaded.sequence;
    let frame_size = frames.frame_size();
    let composer = GridComposer::new(backend);
    let plans = tiling
        .configs(&selection.input, frame_size)
        .into_iter()
        .map(|config| {
            let layout = composer.plan(frames, &config);
            (config, layout)
        })
        .collect();
    Ok(Planned {
        frames: frames.len(),
        frame_size,
        plans,
    })
}

fn print_layout(layout: &GridLayout) {
    println!(
        "{} x{}: {} stacks of {} -> grid {} ({}x{} frames)",
        layout.stack_axis,
        layout.stack_length,
        layout.stack_count,
        layout.stack_size,
        layout.grid_size,
        layout.columns(),
        layout.rows()
    );
    if let Some(pct) = layout.scale_percent {
        println!("    scaled {}% -> {}", pct, layout.output_size());
    }
    if layout.dropped > 0 {
        println!("    {} trailing frames dropped", layout.dropped);
    }
}
