//! Glyph outlines from traced pixel contours.
//!
//! Contours from `tf-contour` live in pixel space with y pointing down.
//! [`normalize_contour`] classifies each one as an outer boundary or a hole,
//! flips it into a y-up design space scaled so the bitmap height spans one
//! em, and fixes its winding:
//! - outer contours have negative signed area (clockwise, y up);
//! - holes have positive signed area (counter-clockwise, y up).
//!
//! [`glyph_from_grid`] runs the whole pipeline for one bitmap and
//! [`GlyphSet`] collects glyphs for a character set in font order. A bitmap
//! with no on-pixels produces [`Outline::Empty`], which is distinct from an
//! outline that happens to have no paths.
//!
//! [`raster`] renders outlines back to pixels under the nonzero fill rule to
//! check that an outline covers exactly the pixels it was traced from.

mod assemble;
mod glyph_set;
pub mod raster;
mod winding;

pub use assemble::{
    DEFAULT_UNITS_PER_EM, Glyph, GlyphConfig, Outline, assemble_glyph, glyph_from_grid,
    path_points, path_signed_area,
};
pub use glyph_set::{GlyphRecord, GlyphSet, NOTDEF, glyph_name, unique_chars};
pub use winding::{
    ContourRole, OrientedContour, classify, lattice_signed_area, normalize_contour, signed_area,
};
