//! Closed boundary contours of binary pixel grids.
//!
//! Extraction runs in two passes:
//! - [`build_edge_set`] adds the four directed unit edges of every on-pixel
//!   with symmetric-difference insertion, so edges shared by two on-pixels
//!   cancel and only region boundaries survive.
//! - [`trace_contours`] walks the surviving edges through an
//!   [`AdjacencyIndex`], removing each edge as it is taken, until every edge
//!   belongs to exactly one closed loop.
//!
//! Solid regions come out clockwise on screen (y down) and holes counter
//! clockwise. Classifying and reorienting loops for a y-up outline is left to
//! the glyph stage.
//!
//! Tracing is deterministic: walks start at the smallest remaining edge and
//! junctions (pixels touching only diagonally) take the smallest destination.

mod contour;
mod edges;
mod trace;

pub use contour::{Contour, MIN_CONTOUR_POINTS};
pub use edges::{Edge, EdgeSet, build_edge_set, cell_edges};
pub use trace::{AdjacencyIndex, TraceConfig, TraceOutput, trace_contours};
