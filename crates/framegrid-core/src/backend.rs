//! The image backend contract.
//!
//! Frame loading and grid composition never reach into pixel data. They
//! drive an [`ImageBackend`], which owns every pixel operation: decode,
//! trim, concatenate, allocate, paste, scale, page reset and encode.
//!
//! Bitmaps are owned values. Operations that transform a bitmap take it by
//! value and return the result, so a handle is never aliased across a
//! stacking boundary.
//!
//! # Implementing a backend
//!
//! ```rust,ignore
//! impl ImageBackend for MyBackend {
//!     type Bitmap = MyBitmap;
//!
//!     fn decode(&self, path: &Path) -> BackendResult<MyBitmap> { ... }
//!     fn concatenate(&self, parts: &[&MyBitmap], axis: Axis) -> BackendResult<MyBitmap> { ... }
//!     // ...
//! }
//! ```

use std::path::Path;

use crate::axis::Axis;
use crate::error::BackendResult;
use crate::format::Format;
use crate::rect::{Page, Size};

/// An owned, decoded bitmap handle.
pub trait Bitmap: Send + Sync {
    /// Pixel dimensions.
    fn size(&self) -> Size;

    /// Logical canvas geometry, see [`Page`].
    fn page(&self) -> Page;

    /// Pixel width.
    #[inline]
    fn width(&self) -> u32 {
        self.size().width
    }

    /// Pixel height.
    #[inline]
    fn height(&self) -> u32 {
        self.size().height
    }
}

/// Pixel operations required by the frame loader and the grid composer.
///
/// Implementations must be shareable between threads: several compositions
/// over one frame sequence may run concurrently against the same backend.
pub trait ImageBackend: Send + Sync {
    /// Bitmap handle produced by this backend.
    type Bitmap: Bitmap;

    /// Decodes a file into a bitmap whose page matches its pixels.
    fn decode(&self, path: &Path) -> BackendResult<Self::Bitmap>;

    /// Removes uniform borders.
    ///
    /// The result keeps the original canvas as its page and records the
    /// offset of the remaining pixels on it.
    fn trim(&self, bitmap: Self::Bitmap) -> BackendResult<Self::Bitmap>;

    /// Joins bitmaps along `axis`, in slice order.
    ///
    /// Parts are aligned to the top (vertical) or left (horizontal) edge. The
    /// result's page is the largest source page, as with common imaging
    /// libraries; call [`reset_page`](Self::reset_page) to fix it.
    fn concatenate(&self, parts: &[&Self::Bitmap], axis: Axis) -> BackendResult<Self::Bitmap>;

    /// Allocates a transparent bitmap.
    fn blank(&self, size: Size) -> BackendResult<Self::Bitmap>;

    /// Copies `part` into `target` with its top-left pixel at `origin`.
    ///
    /// The part must fit inside the target. The target's page grows to cover
    /// the part's page placed at `origin`.
    fn paste(
        &self,
        target: &mut Self::Bitmap,
        part: &Self::Bitmap,
        origin: (u32, u32),
    ) -> BackendResult<()>;

    /// Resamples a bitmap by `percent` (100 keeps the size).
    fn scale(&self, bitmap: Self::Bitmap, percent: f64) -> BackendResult<Self::Bitmap>;

    /// Sets the page to the pixel bounds with no offset.
    fn reset_page(&self, bitmap: Self::Bitmap) -> Self::Bitmap;

    /// Encodes a bitmap to `path` in `format`.
    fn write(&self, bitmap: &Self::Bitmap, path: &Path, format: Format) -> BackendResult<()>;
}
