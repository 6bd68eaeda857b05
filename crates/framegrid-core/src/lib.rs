//! # framegrid-core
//!
//! Core types for composing image frames into stacks and grids.
//!
//! This crate provides the shared contract used throughout the framegrid
//! workspace:
//!
//! - [`Size`], [`Rect`], [`Page`] - Pixel geometry and logical canvas geometry
//! - [`Axis`] - Concatenation direction (vertical or horizontal)
//! - [`Format`] - Image file formats, detected by extension
//! - [`Bitmap`], [`ImageBackend`] - The capability every pixel backend provides
//! - [`Frame`], [`FrameSequence`] - Decoded frames in tiling order
//!
//! ## Crate Structure
//!
//! The core never touches pixel data. Everything that decodes, blits,
//! resamples or encodes lives behind [`ImageBackend`]:
//!
//! ```text
//! framegrid-core (this crate)
//!    ^
//!    |
//!    +-- framegrid-io  (frame loader, raster + probe backends, output writer)
//!    +-- framegrid-ops (grid composer, layout planning, output naming)
//!    +-- framegrid-cli (the `framegrid` binary)
//! ```
//!
//! ## Ownership
//!
//! Bitmaps are owned handles. A [`Frame`] owns its bitmap for as long as the
//! [`FrameSequence`] lives; composition borrows frames to build a stack, and
//! the stack is moved into the grid assembly and dropped there. No handle is
//! ever shared or reference counted.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod axis;
pub mod backend;
pub mod error;
pub mod format;
pub mod frame;
pub mod rect;

pub use axis::Axis;
pub use backend::{Bitmap, ImageBackend};
pub use error::{BackendError, BackendResult};
pub use format::Format;
pub use frame::{Frame, FrameSequence, SizeMismatch};
pub use rect::{Page, Rect, Size};
