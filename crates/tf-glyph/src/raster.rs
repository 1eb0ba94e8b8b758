//! Point-sampled nonzero rasterization of glyph outlines.
//!
//! Used to check that an outline reproduces the bitmap it was traced from:
//! each pixel is sampled once at its center, so there is no coverage or
//! anti-aliasing.

use kurbo::Point;
use tf_core::{Error, PixelGrid};

use crate::assemble::{Glyph, path_points};

/// Winding number of the closed polygon `poly` around `p`.
///
/// Counter-clockwise loops (y up) count `+1`, clockwise loops `-1`.
pub fn winding_number(poly: &[Point], p: Point) -> i32 {
    let n = poly.len();
    let mut wn = 0;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Renders `glyph` back onto a `width`×`height` bitmap.
///
/// Pixel `(x, y)` is sampled at design point
/// `((x + 0.5) * scale, (height - y - 0.5) * scale)` and is on iff the summed
/// winding number of all contours there is non-zero.
pub fn rasterize_nonzero(
    glyph: &Glyph,
    width: usize,
    height: usize,
    scale: f64,
) -> Result<PixelGrid, Error> {
    let mut grid = PixelGrid::blank(width, height)?;
    let polys: Vec<Vec<Point>> = glyph.paths().iter().map(path_points).collect();
    if polys.is_empty() {
        return Ok(grid);
    }

    let h = height as f64;
    for y in 0..height {
        for x in 0..width {
            let sample = Point::new((x as f64 + 0.5) * scale, (h - y as f64 - 0.5) * scale);
            let wn: i32 = polys.iter().map(|poly| winding_number(poly, sample)).sum();
            if wn != 0 {
                grid.set(x, y, true);
            }
        }
    }

    Ok(grid)
}

/// Pixels where the rasterized outline disagrees with `grid`, in row-major
/// order.
pub fn mismatched_pixels(
    grid: &PixelGrid,
    glyph: &Glyph,
    scale: f64,
) -> Result<Vec<(usize, usize)>, Error> {
    let rendered = rasterize_nonzero(glyph, grid.width(), grid.height(), scale)?;

    let mut out = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.is_on(x, y) != rendered.is_on(x, y) {
                out.push((x, y));
            }
        }
    }
    Ok(out)
}
