//! Grid geometry, computed before any pixel is touched.
//!
//! Frames are grouped into stacks of `stack_length` along the stack axis;
//! stacks are then laid side by side along the perpendicular axis:
//!
//! ```text
//! vertical stacks (stack_length = 3)     horizontal stacks (stack_length = 3)
//!
//! +---+---+---+---+                      +---+---+---+
//! | 0 | 3 | 6 | 9 |                      | 0 | 1 | 2 |
//! +---+---+---+---+                      +---+---+---+
//! | 1 | 4 | 7 |10 |                      | 3 | 4 | 5 |
//! +---+---+---+---+                      +---+---+---+
//! | 2 | 5 | 8 |11 |                      | 6 | 7 | 8 |
//! +---+---+---+---+                      +---+---+---+
//!  4 columns x 3 rows                     3 columns x 3 rows
//! ```
//!
//! Frames past the last full stack are dropped.

use framegrid_core::{Axis, BackendError, Size};

use crate::config::TilingConfig;
use crate::error::{CompositionError, CompositionResult};

/// Pixel-free plan of one composition.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Frames offered to the composer
    pub frames: usize,
    /// Frames that end up in the grid
    pub used: usize,
    /// Frames dropped from the tail
    pub dropped: usize,
    /// Frames per stack
    pub stack_length: usize,
    /// Number of stacks
    pub stack_count: usize,
    /// Stack direction
    pub stack_axis: Axis,
    /// Size of every frame
    pub frame_size: Size,
    /// Size of every stack
    pub stack_size: Size,
    /// Size of the assembled grid before scaling
    pub grid_size: Size,
    /// Scale applied to the grid, if any
    pub scale_percent: Option<f64>,
    /// Output name prefix
    pub prefix: Option<String>,
}

fn too_large(size: Size, what: &str) -> CompositionError {
    CompositionError::BackendFailure(BackendError::invalid_dimensions(
        size,
        format!("{what} exceeds u32 pixel range"),
    ))
}

/// `extent * count`, or `None` on overflow.
fn multiply(extent: u32, count: usize) -> Option<u32> {
    u32::try_from(count).ok()?.checked_mul(extent)
}

impl GridLayout {
    /// Validates the request and computes the geometry.
    ///
    /// Checks run in a fixed order: zero stack length, no frames, stack
    /// length above the frame count, bad scale. Frame uniformity needs the
    /// frames themselves and is checked by the composer.
    pub fn plan(frame_count: usize, frame_size: Size, config: &TilingConfig) -> CompositionResult<Self> {
        let stack_length = config.stack_length;
        if stack_length == 0 {
            return Err(CompositionError::invalid_stack_length(0, frame_count));
        }
        if frame_count == 0 {
            return Err(CompositionError::EmptyInput);
        }
        if stack_length > frame_count {
            return Err(CompositionError::invalid_stack_length(stack_length, frame_count));
        }
        if let Some(p) = config.scale_percent.filter(|p| !(p.is_finite() && *p > 0.0)) {
            return Err(CompositionError::InvalidScale(p));
        }
        if frame_size.is_empty() {
            return Err(CompositionError::BackendFailure(BackendError::invalid_dimensions(
                frame_size,
                "zero-sized frame",
            )));
        }

        let stack_count = frame_count / stack_length;
        let used = stack_count * stack_length;
        let axis = config.stack_axis;
        let across = axis.perpendicular();

        let stack_size = multiply(axis.extent(frame_size), stack_length)
            .map(|along| axis.size(along, axis.cross_extent(frame_size)))
            .ok_or_else(|| too_large(frame_size, "stack"))?;
        let grid_size = multiply(across.extent(stack_size), stack_count)
            .map(|along| across.size(along, across.cross_extent(stack_size)))
            .ok_or_else(|| too_large(stack_size, "grid"))?;

        Ok(Self {
            frames: frame_count,
            used,
            dropped: frame_count - used,
            stack_length,
            stack_count,
            stack_axis: axis,
            frame_size,
            stack_size,
            grid_size,
            scale_percent: config.effective_scale(),
            prefix: config.prefix.clone(),
        })
    }

    /// Grid width in frames.
    pub fn columns(&self) -> usize {
        match self.stack_axis {
            Axis::Vertical => self.stack_count,
            Axis::Horizontal => self.stack_length,
        }
    }

    /// Grid height in frames.
    pub fn rows(&self) -> usize {
        match self.stack_axis {
            Axis::Vertical => self.stack_length,
            Axis::Horizontal => self.stack_count,
        }
    }

    /// Top-left pixel of stack `index` in the grid.
    pub fn stack_origin(&self, index: usize) -> (u32, u32) {
        let across = self.stack_axis.perpendicular();
        // Cannot overflow: index < stack_count and the grid size was checked.
        let offset = across.extent(self.stack_size) * index as u32;
        across.origin(offset)
    }

    /// Size of the written image, after scaling.
    pub fn output_size(&self) -> Size {
        match self.scale_percent {
            Some(p) => self.grid_size.scaled(p),
            None => self.grid_size,
        }
    }

    /// Deterministic output file name.
    ///
    /// ```rust
    /// use framegrid_core::{Axis, Size};
    /// use framegrid_ops::{GridLayout, TilingConfig};
    ///
    /// let config = TilingConfig::new(10, Axis::Vertical).with_prefix("peach[420x640]");
    /// let layout = GridLayout::plan(360, Size::new(420, 640), &config).unwrap();
    /// assert_eq!(layout.file_name("png"), "peach[420x640]_V360_image_grid_[36x10].png");
    /// ```
    pub fn file_name(&self, extension: &str) -> String {
        let mut name = String::new();
        if let Some(prefix) = &self.prefix {
            name.push_str(prefix);
            name.push('_');
        }
        name.push_str(&format!(
            "{}{}_image_grid_[{}x{}]",
            self.stack_axis.letter(),
            self.used,
            self.columns(),
            self.rows()
        ));
        if let Some(p) = self.scale_percent {
            name.push_str(&format!("_scale{p}"));
        }
        name.push('.');
        name.push_str(extension);
        name
    }
}
