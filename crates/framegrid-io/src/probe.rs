//! Geometry-only backend.
//!
//! [`ProbeBackend`] reads image headers instead of pixels and tracks only
//! sizes and pages. It answers "what would the grid look like" for large
//! sequences without decoding a single frame, and is what the `plan`
//! command and the layout tests run on. It cannot trim: callers that trim
//! need a pixel backend.

use std::path::Path;

use framegrid_core::{
    Axis, BackendError, BackendResult, Bitmap, Format, ImageBackend, Page, Rect, Size,
};

/// A bitmap without pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: Size,
    page: Page,
}

impl Shape {
    /// Shape with a page matching its bounds.
    pub fn new(width: u32, height: u32) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            page: Page::exact(size),
        }
    }

    /// Shape that sits at an offset on a larger canvas, as after a trim.
    pub fn with_page(size: Size, page: Page) -> Self {
        Self { size, page }
    }
}

impl Bitmap for Shape {
    fn size(&self) -> Size {
        self.size
    }

    fn page(&self) -> Page {
        self.page
    }
}

/// [`ImageBackend`] that works on [`Shape`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeBackend;

impl ProbeBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for ProbeBackend {
    type Bitmap = Shape;

    fn decode(&self, path: &Path) -> BackendResult<Shape> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::decode(path, e))?;
        Ok(Shape::new(width, height))
    }

    /// Trimming depends on pixel content, which shapes do not have.
    fn trim(&self, bitmap: Shape) -> BackendResult<Shape> {
        Err(BackendError::unsupported(format!(
            "probe backend cannot trim a {} shape without pixels",
            bitmap.size
        )))
    }

    fn concatenate(&self, parts: &[&Shape], axis: Axis) -> BackendResult<Shape> {
        let Some(first) = parts.first() else {
            return Err(BackendError::invalid_dimensions(Size::default(), "nothing to concatenate"));
        };
        let size = axis
            .joined(parts.iter().map(|p| p.size))
            .ok_or_else(|| BackendError::invalid_dimensions(first.size, "concatenation overflows"))?;
        let page = parts
            .iter()
            .fold(first.page, |page, part| page.largest(&part.page));
        Ok(Shape { size, page })
    }

    fn blank(&self, size: Size) -> BackendResult<Shape> {
        if size.is_empty() {
            return Err(BackendError::invalid_dimensions(size, "zero-sized bitmap"));
        }
        Ok(Shape::new(size.width, size.height))
    }

    fn paste(&self, target: &mut Shape, part: &Shape, origin: (u32, u32)) -> BackendResult<()> {
        let (x, y) = origin;
        let placed = Rect::new(x, y, part.size.width, part.size.height);
        if !Rect::from_size(target.size).contains_rect(&placed) {
            return Err(BackendError::invalid_dimensions(
                part.size,
                format!("paste at ({x}, {y}) exceeds target {}", target.size),
            ));
        }
        target.page = target.page.cover(&part.page, x, y);
        Ok(())
    }

    fn scale(&self, bitmap: Shape, percent: f64) -> BackendResult<Shape> {
        if !(percent.is_finite() && percent > 0.0) {
            return Err(BackendError::invalid_dimensions(
                bitmap.size,
                format!("invalid scale {percent}%"),
            ));
        }
        Ok(Shape {
            size: bitmap.size.scaled(percent),
            page: bitmap.page.scaled(percent),
        })
    }

    fn reset_page(&self, bitmap: Shape) -> Shape {
        Shape::new(bitmap.size.width, bitmap.size.height)
    }

    fn write(&self, _bitmap: &Shape, _path: &Path, format: Format) -> BackendResult<()> {
        Err(BackendError::unsupported(format!(
            "probe backend holds no pixels to encode as {format}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenate_takes_largest_page() {
        let backend = ProbeBackend::new();
        let a = Shape::with_page(Size::new(2, 2), Page::with_offset(Size::new(10, 10), Rect::new(4, 4, 2, 2)));
        let b = Shape::new(2, 2);
        let joined = backend.concatenate(&[&a, &b], Axis::Horizontal).unwrap();
        assert_eq!(joined.size(), Size::new(4, 2));
        assert_eq!(joined.page(), Page::exact(Size::new(10, 10)));
    }

    #[test]
    fn test_paste_checks_bounds() {
        let backend = ProbeBackend::new();
        let mut grid = backend.blank(Size::new(8, 4)).unwrap();
        backend.paste(&mut grid, &Shape::new(4, 4), (4, 0)).unwrap();
        assert!(backend.paste(&mut grid, &Shape::new(4, 4), (5, 0)).is_err());
    }

    #[test]
    fn test_write_unsupported() {
        let err = ProbeBackend
            .write(&Shape::new(1, 1), Path::new("x.png"), Format::Png)
            .unwrap_err();
        assert!(matches!(err, BackendError::Unsupported(_)));
    }

    #[test]
    fn test_trim_unsupported() {
        let err = ProbeBackend.trim(Shape::new(20, 20)).unwrap_err();
        assert!(matches!(err, BackendError::Unsupported(_)));
    }

    #[test]
    fn test_decode_reads_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.png");
        image::RgbaImage::new(7, 3).save(&path).unwrap();
        let shape = ProbeBackend.decode(&path).unwrap();
        assert_eq!(shape.size(), Size::new(7, 3));
    }
}
