//! Pixel backend built on the `image` crate.
//!
//! Every frame is held as 8-bit RGBA. Concatenation and pasting are plain
//! pixel copies; scaling uses the resampling [`Filter`] chosen at
//! construction.
//!
//! # Example
//!
//! ```rust,ignore
//! use framegrid_io::raster::{Filter, RasterBackend};
//!
//! let backend = RasterBackend::new().with_filter(Filter::Bicubic);
//! let frame = backend.decode(Path::new("frames/frame000.png"))?;
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use framegrid_core::{
    Axis, BackendError, BackendResult, Bitmap, Format, ImageBackend, Page, Rect, Size,
};
use image::buffer::ConvertBuffer;
use image::imageops::{self, FilterType};
use image::{ImageFormat, ImageReader, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Resampling filter for scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Nearest-neighbor (fastest, blocky).
    Nearest,
    /// Bilinear (triangle) interpolation.
    Bilinear,
    /// Catmull-Rom cubic interpolation.
    Bicubic,
    /// Gaussian (soft).
    Gaussian,
    /// Lanczos with window 3 (best for downscaling).
    #[default]
    Lanczos3,
}

impl Filter {
    fn filter_type(self) -> FilterType {
        match self {
            Filter::Nearest => FilterType::Nearest,
            Filter::Bilinear => FilterType::Triangle,
            Filter::Bicubic => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Gaussian => "gaussian",
            Filter::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "bilinear" | "linear" | "triangle" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" | "catmullrom" => Ok(Filter::Bicubic),
            "gaussian" => Ok(Filter::Gaussian),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

/// RGBA8 pixels plus page geometry.
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: RgbaImage,
    page: Page,
}

impl Raster {
    /// Wraps pixels with a page matching their bounds.
    pub fn new(pixels: RgbaImage) -> Self {
        let page = Page::exact(Size::new(pixels.width(), pixels.height()));
        Self { pixels, page }
    }

    /// Returns the pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consumes the raster, returning the pixels.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

impl Bitmap for Raster {
    fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    fn page(&self) -> Page {
        self.page
    }
}

/// [`ImageBackend`] over the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterBackend {
    filter: Filter,
}

impl RasterBackend {
    /// Creates a backend with the default (Lanczos3) filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resampling filter used by [`ImageBackend::scale`].
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the resampling filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }
}

/// Rejects sizes that cannot back an RGBA8 buffer.
fn ensure_allocatable(size: Size) -> BackendResult<()> {
    if size.is_empty() {
        return Err(BackendError::invalid_dimensions(size, "zero-sized bitmap"));
    }
    let bytes = size.area().checked_mul(4);
    match bytes {
        Some(b) if b <= isize::MAX as u64 => Ok(()),
        _ => Err(BackendError::invalid_dimensions(size, "bitmap too large to allocate")),
    }
}

fn image_format(format: Format) -> ImageFormat {
    match format {
        Format::Png => ImageFormat::Png,
        Format::Jpeg => ImageFormat::Jpeg,
        Format::Bmp => ImageFormat::Bmp,
        Format::Gif => ImageFormat::Gif,
        Format::Tiff => ImageFormat::Tiff,
        Format::WebP => ImageFormat::WebP,
        Format::Tga => ImageFormat::Tga,
    }
}

/// Bounding box of the pixels that differ from the top-left corner.
fn content_bounds(pixels: &RgbaImage) -> Option<Rect> {
    let border = *pixels.get_pixel(0, 0);
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in pixels.enumerate_pixels() {
        if *px == border {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| Rect::from_corners(x0, y0, x1, y1))
}

impl ImageBackend for RasterBackend {
    type Bitmap = Raster;

    fn decode(&self, path: &Path) -> BackendResult<Raster> {
        let reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| BackendError::decode(path, e))?;
        let image = reader.decode().map_err(|e| BackendError::decode(path, e))?;
        Ok(Raster::new(image.into_rgba8()))
    }

    fn trim(&self, bitmap: Raster) -> BackendResult<Raster> {
        let full = bitmap.size();
        // A frame made only of border colour keeps its pixels.
        let Some(region) = content_bounds(&bitmap.pixels) else {
            return Ok(bitmap);
        };
        if region.size() == full {
            return Ok(bitmap);
        }
        trace!(from = %full, to = %region, "trim");
        let pixels =
            imageops::crop_imm(&bitmap.pixels, region.x, region.y, region.width, region.height)
                .to_image();
        // Offsets accumulate if the bitmap was already trimmed.
        let page = Page {
            x: bitmap.page.x + region.x,
            y: bitmap.page.y + region.y,
            ..bitmap.page
        };
        Ok(Raster { pixels, page })
    }

    fn concatenate(&self, parts: &[&Raster], axis: Axis) -> BackendResult<Raster> {
        let Some(first) = parts.first() else {
            return Err(BackendError::invalid_dimensions(Size::default(), "nothing to concatenate"));
        };
        let size = axis
            .joined(parts.iter().map(|p| p.size()))
            .ok_or_else(|| BackendError::invalid_dimensions(first.size(), "concatenation overflows"))?;
        ensure_allocatable(size)?;

        let mut pixels = RgbaImage::new(size.width, size.height);
        let mut page = first.page;
        let mut offset = 0u32;
        for part in parts {
            let (x, y) = axis.origin(offset);
            imageops::replace(&mut pixels, &part.pixels, x as i64, y as i64);
            page = page.largest(&part.page);
            offset += axis.extent(part.size());
        }
        Ok(Raster { pixels, page })
    }

    fn blank(&self, size: Size) -> BackendResult<Raster> {
        ensure_allocatable(size)?;
        Ok(Raster::new(RgbaImage::new(size.width, size.height)))
    }

    fn paste(&self, target: &mut Raster, part: &Raster, origin: (u32, u32)) -> BackendResult<()> {
        let (x, y) = origin;
        let placed = Rect::new(x, y, part.width(), part.height());
        if !Rect::from_size(target.size()).contains_rect(&placed) {
            return Err(BackendError::invalid_dimensions(
                part.size(),
                format!("paste at ({x}, {y}) exceeds target {}", target.size()),
            ));
        }
        imageops::replace(&mut target.pixels, &part.pixels, x as i64, y as i64);
        target.page = target.page.cover(&part.page, x, y);
        Ok(())
    }

    fn scale(&self, bitmap: Raster, percent: f64) -> BackendResult<Raster> {
        if !(percent.is_finite() && percent > 0.0) {
            return Err(BackendError::invalid_dimensions(
                bitmap.size(),
                format!("invalid scale {percent}%"),
            ));
        }
        let size = bitmap.size().scaled(percent);
        if size == bitmap.size() {
            return Ok(bitmap);
        }
        ensure_allocatable(size)?;
        trace!(from = %bitmap.size(), to = %size, filter = %self.filter, "scale");
        let pixels = imageops::resize(&bitmap.pixels, size.width, size.height, self.filter.filter_type());
        Ok(Raster {
            pixels,
            page: bitmap.page.scaled(percent),
        })
    }

    fn reset_page(&self, mut bitmap: Raster) -> Raster {
        bitmap.page = Page::exact(bitmap.size());
        bitmap
    }

    fn write(&self, bitmap: &Raster, path: &Path, format: Format) -> BackendResult<()> {
        let result = if format.has_alpha() {
            bitmap.pixels.save_with_format(path, image_format(format))
        } else {
            let rgb: RgbImage = bitmap.pixels.convert();
            rgb.save_with_format(path, image_format(format))
        };
        result.map_err(|e| BackendError::encode(path, e))
    }
}
