//! CLI command implementations

pub mod frames;
pub mod grid;
pub mod plan;

use anyhow::{Context, Result};
use framegrid_core::ImageBackend;
use framegrid_io::{FrameLoader, LoadedFrames};
use framegrid_ops::TilingConfig;

use crate::config::Selection;

/// Loads the selected frames, reporting skipped files on stderr.
pub fn load_frames<B: ImageBackend>(
    backend: &B,
    selection: &Selection,
) -> Result<LoadedFrames<B::Bitmap>> {
    let loaded = FrameLoader::new(backend, selection.options.clone())
        .load(&selection.input)
        .with_context(|| format!("Failed to load frames from: {}", selection.input.display()))?;
    for skipped in &loaded.skipped {
        eprintln!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    Ok(loaded)
}

/// Short label for one combination, e.g. `vertical x10`.
pub fn describe(config: &TilingConfig) -> String {
    format!("{} x{}", config.stack_axis, config.stack_length)
}
