//! Pixel and canvas geometry.
//!
//! - [`Size`] - Pixel dimensions of a bitmap
//! - [`Rect`] - Rectangular region (used for trim bounding boxes)
//! - [`Page`] - Logical canvas a bitmap claims to live on
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! # Pages
//!
//! Imaging libraries keep a "page" (virtual canvas) next to the pixel
//! bounds. Trimming a frame shrinks its pixels but keeps the original canvas
//! and records where the pixels sat on it; concatenating keeps the largest
//! source canvas. After a composition the page must be reset to the pixel
//! bounds, otherwise the composite reports the size of a source frame.
//!
//! ```text
//!  page (canvas) 64x64
//! ┌──────────────────┐
//! │   (x,y)          │
//! │     ┌────────┐   │
//! │     │ pixels │   │
//! │     └────────┘   │
//! └──────────────────┘
//! ```

use std::fmt;

/// Pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the number of pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the size with width and height swapped.
    #[inline]
    pub const fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Scales both dimensions by a percentage, rounding to the nearest pixel.
    ///
    /// Dimensions never drop below one pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use framegrid_core::Size;
    ///
    /// assert_eq!(Size::new(640, 576).scaled(50.0), Size::new(320, 288));
    /// assert_eq!(Size::new(3, 3).scaled(10.0), Size::new(1, 1));
    /// ```
    pub fn scaled(&self, percent: f64) -> Self {
        let factor = percent / 100.0;
        let scale = |v: u32| ((v as f64 * factor).round() as u32).max(1);
        Self::new(scale(self.width), scale(self.height))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// # Example
///
/// ```rust
/// use framegrid_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// assert_eq!(rect.area(), 5000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Creates a rectangle spanning two inclusive corner points.
    ///
    /// If coordinates are swapped, they will be normalized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use framegrid_core::Rect;
    ///
    /// let rect = Rect::from_corners(10, 20, 19, 29);
    /// assert_eq!((rect.width, rect.height), (10, 10));
    /// ```
    #[inline]
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        let (min_x, max_x) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (min_y, max_y) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    /// Returns the X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns the area of the rectangle in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns the dimensions of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns `true` if this rectangle fully contains another.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the bounding box that contains both rectangles.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Logical canvas geometry carried next to a bitmap's pixels.
///
/// `width`/`height` describe the virtual canvas; `x`/`y` is where the
/// bitmap's top-left pixel sits on that canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Page {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Horizontal offset of the pixels on the canvas
    pub x: u32,
    /// Vertical offset of the pixels on the canvas
    pub y: u32,
}

impl Page {
    /// A page that matches the pixel bounds exactly.
    #[inline]
    pub const fn exact(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            x: 0,
            y: 0,
        }
    }

    /// A canvas of `canvas` size with the pixels placed at `region`.
    #[inline]
    pub const fn with_offset(canvas: Size, region: Rect) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            x: region.x,
            y: region.y,
        }
    }

    /// Returns the canvas dimensions.
    #[inline]
    pub const fn canvas(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns `true` if the page describes exactly the given pixel bounds.
    #[inline]
    pub fn matches(&self, size: Size) -> bool {
        *self == Self::exact(size)
    }

    /// Keeps the larger canvas of two pages, with no offset.
    ///
    /// This is what concatenation does with the pages of its sources.
    #[inline]
    pub fn largest(&self, other: &Page) -> Page {
        Page::exact(Size::new(
            self.width.max(other.width),
            self.height.max(other.height),
        ))
    }

    /// Extends the canvas so that a page placed at `(ox, oy)` fits on it.
    #[inline]
    pub fn cover(&self, other: &Page, ox: u32, oy: u32) -> Page {
        let own = Rect::new(0, 0, self.width, self.height);
        let placed = Rect::new(ox, oy, other.width, other.height);
        let bounds = own.union(&placed);
        Page {
            width: bounds.right(),
            height: bounds.bottom(),
            x: self.x,
            y: self.y,
        }
    }

    /// Scales the page like its bitmap, see [`Size::scaled`].
    pub fn scaled(&self, percent: f64) -> Page {
        let canvas = self.canvas().scaled(percent);
        let factor = percent / 100.0;
        Page {
            width: canvas.width,
            height: canvas.height,
            x: (self.x as f64 * factor).round() as u32,
            y: (self.y as f64 * factor).round() as u32,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_scaled() {
        assert_eq!(Size::new(640, 640).scaled(100.0), Size::new(640, 640));
        assert_eq!(Size::new(640, 640).scaled(25.0), Size::new(160, 160));
        assert_eq!(Size::new(101, 3).scaled(50.0), Size::new(51, 2));
    }

    #[test]
    fn test_size_transposed() {
        assert_eq!(Size::new(576, 640).transposed(), Size::new(640, 576));
    }

    #[test]
    fn test_rect_from_corners() {
        let rect = Rect::from_corners(5, 7, 2, 3);
        assert_eq!(rect, Rect::new(2, 3, 4, 5));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0, 0, 50, 50);
        let b = Rect::new(100, 100, 50, 50);
        assert_eq!(a.union(&b), Rect::new(0, 0, 150, 150));
    }

    #[test]
    fn test_page_largest() {
        let a = Page::with_offset(Size::new(64, 64), Rect::new(4, 4, 50, 50));
        let b = Page::exact(Size::new(40, 80));
        assert_eq!(a.largest(&b), Page::exact(Size::new(64, 80)));
    }

    #[test]
    fn test_page_cover() {
        let grid = Page::exact(Size::new(128, 64));
        let stale = Page::exact(Size::new(80, 80));
        let covered = grid.cover(&stale, 64, 0);
        assert_eq!(covered.canvas(), Size::new(144, 80));
        assert!(!covered.matches(Size::new(128, 64)));
    }

    #[test]
    fn test_page_matches() {
        assert!(Page::exact(Size::new(3, 4)).matches(Size::new(3, 4)));
        let offset = Page::with_offset(Size::new(3, 4), Rect::new(1, 0, 2, 4));
        assert!(!offset.matches(Size::new(3, 4)));
    }
}
