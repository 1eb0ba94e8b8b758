//! Foundational types for turning glyph bitmaps into outlines.
//!
//! ## Coordinates
//! Pixel `(x, y)` covers the unit cell whose top-left corner is the lattice
//! point `(x, y)` and whose bottom-right corner is `(x + 1, y + 1)`. The y axis
//! points down, matching bitmap row order. Flipping to a y-up design space is
//! left to the glyph stage.
//!
//! Decoded tiles arrive as [`Image<u8>`] and are thresholded into a
//! [`PixelGrid`] through a borrowed [`ImageView`].

mod error;
mod geom;
mod grid;
mod image;

pub use error::Error;
pub use geom::{LatticePoint, Offset};
pub use grid::PixelGrid;
pub use image::{Image, ImageView};
