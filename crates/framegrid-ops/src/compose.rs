//! The grid composer.
//!
//! Composition runs in fixed passes over a borrowed [`FrameSequence`]:
//!
//! 1. plan and validate ([`GridLayout::plan`] plus a size check of every frame)
//! 2. drop the tail frames that do not fill a whole stack
//! 3. concatenate each window of `stack_length` frames into a stack
//! 4. paste each stack into a blank grid, dropping it right away
//! 5. scale the grid (only the grid, never stacks)
//! 6. reset the page so the geometry equals the pixel bounds
//!
//! At most one stack is alive next to the grid at any time.
//!
//! # Example
//!
//! ```rust,ignore
//! use framegrid_core::Axis;
//! use framegrid_ops::{GridComposer, TilingConfig};
//!
//! let composer = GridComposer::new(&backend);
//! let grid = composer.compose(&frames, &TilingConfig::new(10, Axis::Vertical))?;
//! println!("{}", grid.layout().file_name("png"));
//! ```

use framegrid_core::{Bitmap, FrameSequence, ImageBackend};
use tracing::{debug, info, warn};

use crate::config::TilingConfig;
use crate::error::{CompositionError, CompositionResult};
use crate::layout::GridLayout;

/// A composed grid and the plan it was built from.
#[derive(Debug)]
pub struct Grid<B> {
    bitmap: B,
    layout: GridLayout,
}

impl<B: Bitmap> Grid<B> {
    /// The composite bitmap.
    pub fn bitmap(&self) -> &B {
        &self.bitmap
    }

    /// The plan.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Splits into bitmap and plan.
    pub fn into_parts(self) -> (B, GridLayout) {
        (self.bitmap, self.layout)
    }
}

/// Composes frame sequences into grids through a backend.
pub struct GridComposer<'a, B: ImageBackend> {
    backend: &'a B,
}

impl<B: ImageBackend> Clone for GridComposer<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ImageBackend> Copy for GridComposer<'_, B> {}

impl<'a, B: ImageBackend> GridComposer<'a, B> {
    /// Creates a composer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Validates `frames` against `config` and returns the plan.
    pub fn plan(
        &self,
        frames: &FrameSequence<B::Bitmap>,
        config: &TilingConfig,
    ) -> CompositionResult<GridLayout> {
        let frame_size = frames.frame_size().unwrap_or_default();
        let layout = GridLayout::plan(frames.len(), frame_size, config)?;
        frames.uniform_size()?;
        Ok(layout)
    }

    /// Builds the grid.
    pub fn compose(
        &self,
        frames: &FrameSequence<B::Bitmap>,
        config: &TilingConfig,
    ) -> CompositionResult<Grid<B::Bitmap>> {
        let layout = self.plan(frames, config)?;
        if layout.dropped > 0 {
            warn!(
                frames = layout.frames,
                stack_length = layout.stack_length,
                dropped = layout.dropped,
                "frame count is not a multiple of the stack length, dropping tail frames"
            );
        }

        let backend = self.backend;
        let mut grid = backend.blank(layout.grid_size)?;

        let used = &frames.frames()[..layout.used];
        for (index, window) in used.chunks(layout.stack_length).enumerate() {
            let parts: Vec<&B::Bitmap> = window.iter().map(|f| f.bitmap()).collect();
            let stack = backend.concatenate(&parts, layout.stack_axis)?;
            if stack.size() != layout.stack_size {
                return Err(CompositionError::unexpected_size("stack", layout.stack_size, stack.size()));
            }
            let origin = layout.stack_origin(index);
            debug!(stack = index, x = origin.0, y = origin.1, "paste stack");
            backend.paste(&mut grid, &stack, origin)?;
        }

        if let Some(percent) = layout.scale_percent {
            grid = backend.scale(grid, percent)?;
        }
        let grid = backend.reset_page(grid);

        let expected = layout.output_size();
        if grid.size() != expected || !grid.page().matches(expected) {
            return Err(CompositionError::unexpected_size("grid", expected, grid.size()));
        }

        info!(
            axis = %layout.stack_axis,
            stack_length = layout.stack_length,
            used = layout.used,
            size = %expected,
            "grid composed"
        );
        Ok(Grid {
            bitmap: grid,
            layout,
        })
    }
}
