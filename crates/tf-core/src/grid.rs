use crate::{Error, Image, ImageView};

/// Boolean on/off mask of one glyph cell.
///
/// Rows run top to bottom, so `y = 0` is the first row of the source
/// bitmap. Both dimensions are positive and fit in `i32`, which keeps every
/// pixel corner addressable as a [`crate::LatticePoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    mask: Image<bool>,
}

impl PixelGrid {
    pub fn blank(width: usize, height: usize) -> Result<Self, Error> {
        let max = i32::MAX as usize;
        if width == 0 || height == 0 || width >= max || height >= max {
            return Err(Error::InvalidDimensions { width, height });
        }

        let len = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })?;
        Ok(Self {
            mask: Image::from_vec(width, height, vec![false; len])?,
        })
    }

    /// Builds a grid from on-pixel coordinates. Coordinates outside the grid
    /// are ignored.
    pub fn from_on_pixels<I>(width: usize, height: usize, pixels: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::blank(width, height)?;
        for (x, y) in pixels {
            grid.set(x, y, true);
        }
        Ok(grid)
    }

    /// Pixel is on iff its luma value is `> 0`.
    pub fn from_luma(img: &ImageView<'_, u8>) -> Result<Self, Error> {
        let mut grid = Self::blank(img.width(), img.height())?;
        let width = img.width();
        let data = grid.mask.data_mut();
        for y in 0..img.height() {
            for (x, &v) in img.row(y).iter().enumerate() {
                data[y * width + x] = v > 0;
            }
        }
        Ok(grid)
    }

    /// Parses rows of text art: `#` marks an on-pixel, anything else is off.
    /// All rows must have the same length.
    pub fn from_rows(rows: &[&str]) -> Result<Self, Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::blank(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(Error::SizeMismatch {
                    expected: width,
                    actual: len,
                });
            }
            for (x, c) in row.chars().enumerate() {
                grid.set(x, y, c == '#');
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.mask.width()
    }

    pub fn height(&self) -> usize {
        self.mask.height()
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.mask.as_view().get(x, y).copied().unwrap_or(false)
    }

    /// Returns `false` when `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        let idx = y * self.width() + x;
        self.mask.data_mut()[idx] = on;
        true
    }

    /// On-pixels in row-major order.
    pub fn on_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        self.mask
            .data()
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn count_on(&self) -> usize {
        self.mask.data().iter().filter(|on| **on).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.mask.data().iter().any(|on| *on)
    }

    /// On-pixels become `255`, off-pixels `0`.
    pub fn to_luma(&self) -> Image<u8> {
        let mut out = Image::new_fill(self.width(), self.height(), 0u8);
        for (dst, &on) in out.data_mut().iter_mut().zip(self.mask.data()) {
            if on {
                *dst = 255;
            }
        }
        out
    }
}
