//! Umbrella crate for the `tilefont` workspace.
//!
//! Re-exports the pixel grid types, contour tracing and glyph assembly.
//! Loading tiles from disk lives in `tf-tiles`.

pub use tf_contour::*;
pub use tf_core::*;
pub use tf_glyph::*;
pub use tf_morph::{dilate_binary_u8, normalize_kernel_size};
