//! # framegrid-ops
//!
//! Stack-then-grid composition of frame sequences.
//!
//! A sequence of equally sized frames is cut into windows of
//! `stack_length` frames. Each window is concatenated along the stack axis
//! into a stack, and the stacks are laid out along the perpendicular axis
//! into one grid.
//!
//! # Modules
//!
//! - [`config`] - [`TilingConfig`], the parameters of one composition
//! - [`layout`] - [`GridLayout`], validation and geometry without pixels
//! - [`compose`] - [`GridComposer`], the pixel passes through an
//!   [`ImageBackend`](framegrid_core::ImageBackend)
//!
//! # Example
//!
//! ```rust,ignore
//! use framegrid_core::Axis;
//! use framegrid_ops::{GridComposer, TilingConfig};
//!
//! let config = TilingConfig::new(10, Axis::Vertical).with_prefix("peach[420x640]");
//! let grid = GridComposer::new(&backend).compose(&frames, &config)?;
//! assert_eq!(grid.layout().file_name("png"), "peach[420x640]_V360_image_grid_[36x10].png");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compose;
pub mod config;
mod error;
pub mod layout;

pub use compose::{Grid, GridComposer};
pub use config::TilingConfig;
pub use error::{CompositionError, CompositionResult};
pub use layout::GridLayout;
