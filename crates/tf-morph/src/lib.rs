//! Minimal binary morphology helpers.
//!
//! Pixels are treated as binary with threshold `> 0`.
//! Outputs are `0` or `255` in `u8`.
//!
//! Dilation uses a square structuring element of odd size `k`, centered on
//! the output pixel. Samples outside the image are skipped, which is the
//! same as replicating the border for a max filter.

use tf_core::{Image, ImageView};

/// Coerces a requested kernel size to the odd size actually applied.
///
/// Even sizes round up to the next odd size and `0` becomes `1`.
pub fn normalize_kernel_size(size: usize) -> usize {
    if size == 0 {
        1
    } else if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Square max filter over a binary image.
///
/// `size` is normalized with [`normalize_kernel_size`]; a size of `1` only
/// binarizes the input.
pub fn dilate_binary_u8(src: &ImageView<'_, u8>, size: usize) -> Image<u8> {
    let mut out = Image::new_fill(src.width(), src.height(), 0u8);
    if src.width() == 0 || src.height() == 0 {
        return out;
    }

    let radius = (normalize_kernel_size(size) / 2) as isize;
    let width = src.width();

    for y in 0..src.height() {
        for x in 0..width {
            let mut any_set = false;
            for dy in -radius..=radius {
                let ny = y as isize + dy;
                if ny < 0 || ny >= src.height() as isize {
                    continue;
                }

                let row = src.row(ny as usize);
                for dx in -radius..=radius {
                    let nx = x as isize + dx;
                    if nx < 0 || nx >= width as isize {
                        continue;
                    }

                    if row[nx as usize] != 0 {
                        any_set = true;
                        break;
                    }
                }

                if any_set {
                    break;
                }
            }

            if any_set {
                out.data_mut()[y * width + x] = 255;
            }
        }
    }

    out
}
