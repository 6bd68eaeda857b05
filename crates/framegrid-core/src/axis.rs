//! Concatenation axes.
//!
//! A stack is built by concatenating frames along the *stack axis*; the grid
//! is built by placing stacks along the perpendicular axis.
//!
//! ```text
//! Vertical stack axis        Horizontal stack axis
//! (stacks side by side)      (stacks on top of each other)
//!
//!  ┌──┬──┬──┐                ┌──┬──┬──┐
//!  │ 0│ 3│ 6│                │ 0│ 1│ 2│
//!  ├──┼──┼──┤                ├──┼──┼──┤
//!  │ 1│ 4│ 7│                │ 3│ 4│ 5│
//!  ├──┼──┼──┤                ├──┼──┼──┤
//!  │ 2│ 5│ 8│                │ 6│ 7│ 8│
//!  └──┴──┴──┘                └──┴──┴──┘
//! ```

use std::fmt;

use crate::rect::Size;

/// Direction in which bitmaps are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

impl Axis {
    /// Both axes, vertical first.
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// Returns the other axis.
    #[inline]
    pub const fn perpendicular(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Single-letter tag used in output names (`V` / `H`).
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Axis::Vertical => 'V',
            Axis::Horizontal => 'H',
        }
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub const fn extent(self, size: Size) -> u32 {
        match self {
            Axis::Vertical => size.height,
            Axis::Horizontal => size.width,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub const fn cross_extent(self, size: Size) -> u32 {
        match self {
            Axis::Vertical => size.width,
            Axis::Horizontal => size.height,
        }
    }

    /// Pixel origin of a part that starts `offset` pixels along this axis.
    #[inline]
    pub const fn origin(self, offset: u32) -> (u32, u32) {
        match self {
            Axis::Vertical => (0, offset),
            Axis::Horizontal => (offset, 0),
        }
    }

    /// Builds a size from an extent along and an extent across this axis.
    #[inline]
    pub const fn size(self, along: u32, across: u32) -> Size {
        match self {
            Axis::Vertical => Size::new(across, along),
            Axis::Horizontal => Size::new(along, across),
        }
    }

    /// Size of the bitmap obtained by joining parts of the given sizes.
    ///
    /// Extents add up along the axis; across it the widest part wins.
    /// Returns `None` when the sum overflows `u32`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use framegrid_core::{Axis, Size};
    ///
    /// let parts = [Size::new(64, 64); 10];
    /// assert_eq!(Axis::Vertical.joined(parts), Some(Size::new(64, 640)));
    /// assert_eq!(Axis::Horizontal.joined(parts), Some(Size::new(640, 64)));
    /// ```
    pub fn joined<I>(self, parts: I) -> Option<Size>
    where
        I: IntoIterator<Item = Size>,
    {
        let mut along = 0u32;
        let mut across = 0u32;
        for part in parts {
            along = along.checked_add(self.extent(part))?;
            across = across.max(self.cross_extent(part));
        }
        Some(self.size(along, across))
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Vertical => write!(f, "vertical"),
            Axis::Horizontal => write!(f, "horizontal"),
        }
    }
}
