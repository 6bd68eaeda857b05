//! Frames command
//!
//! Lists what the loader would feed to the composer, in order. Headers are
//! enough unless frames are trimmed.

use anyhow::Result;
use framegrid_core::ImageBackend;
use framegrid_io::{ProbeBackend, RasterBackend};
use tracing::trace;

use crate::FramesArgs;
use crate::config::{JobConfig, Selection};

pub fn run(args: FramesArgs) -> Result<()> {
    let job = JobConfig::load(args.load.config.as_deref())?;
    let selection = job.selection(&args.load)?;
    trace!(input = %selection.input.display(), trim = selection.options.trims(), "frames::run");

    if selection.options.trims() {
        list_with(&RasterBackend::new(), &selection)
    } else {
        list_with(&ProbeBackend::new(), &selection)
    }
}

fn list_with<B: ImageBackend>(backend: &B, selection: &Selection) -> Result<()> {
    let loaded = super::load_frames(backend, selection)?;
    for frame in &loaded.sequence {
        let name = frame
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{:>5}  {:<12} {}", frame.index(), frame.size().to_string(), name);
    }

    let frames = &loaded.sequence;
    match frames.uniform_size() {
        Ok(Some(size)) => println!("{} frames, all {}", frames.len(), size),
        Ok(None) => println!("No frames"),
        Err(m) => println!(
            "{} frames, NOT uniform: frame {} is {}, expected {}",
            frames.len(),
            m.index,
            m.actual,
            m.expected
        ),
    }
    if !loaded.skipped.is_empty() {
        println!("{} skipped", loaded.skipped.len());
    }
    Ok(())
}
