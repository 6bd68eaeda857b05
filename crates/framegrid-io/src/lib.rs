//! # framegrid-io
//!
//! Getting frames in and grids out.
//!
//! - [`FrameLoader`] - Lists, sorts, decodes (and optionally trims) a
//!   directory of frames into a [`FrameSequence`](framegrid_core::FrameSequence)
//! - [`RasterBackend`] - Pixel backend over the `image` crate
//! - [`ProbeBackend`] - Header-only backend for planning and fast tests
//! - [`OutputWriter`] - Writes composites, renaming on collision
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use framegrid_io::{FrameLoader, LoadOptions, OutputWriter, RasterBackend};
//! use framegrid_core::Format;
//!
//! let backend = RasterBackend::new();
//! let loaded = FrameLoader::new(&backend, LoadOptions::new()).load("frames".as_ref())?;
//! // ... compose ...
//! OutputWriter::new(&backend, "out").write(&grid, "grid.png", Format::Png)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Extensions | Alpha on write |
//! |--------|------------|----------------|
//! | PNG | png | Yes |
//! | JPEG | jpg, jpeg | No |
//! | BMP | bmp | Yes |
//! | GIF | gif | Yes |
//! | TIFF | tif, tiff | Yes |
//! | WebP | webp | Yes (lossless) |
//! | TGA | tga | Yes |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod loader;
pub mod output;
pub mod probe;
pub mod raster;

pub use error::{LoadError, LoadResult, WriteError, WriteResult};
pub use loader::{
    DecodePolicy, FrameLoader, FrameProgress, LoadOptions, LoadedFrames, SkippedFrame,
    default_extensions,
};
pub use output::{MAX_RENAME_ATTEMPTS, OutputWriter};
pub use probe::{ProbeBackend, Shape};
pub use raster::{Filter, Raster, RasterBackend};
