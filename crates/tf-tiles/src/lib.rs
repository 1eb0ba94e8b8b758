//! Glyph bitmaps from a directory of PNG tiles.
//!
//! Each character maps to a tile code (see [`tile_code`]). The loader looks
//! for `tile_{CODE}_layer3.png`, then `tile_{CODE}_layer1.png`, and falls
//! back to a blank grid when neither exists. Any pixel with a luma value
//! above zero is on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use tf_core::{Image, PixelGrid};
use tf_morph::{dilate_binary_u8, normalize_kernel_size};

/// Layers tried in order for every tile.
pub const TILE_LAYERS: [u32; 2] = [3, 1];

pub const DEFAULT_FALLBACK_SIZE: (usize, usize) = (16, 16);

/// Tile code for `c`: a few punctuation characters live at fixed slots,
/// everything else uses its code point as upper-case hex.
pub fn tile_code(c: char) -> String {
    match c {
        ' ' => "40".to_string(),
        '/' => "3A".to_string(),
        '-' => "3B".to_string(),
        '"' => "38".to_string(),
        '!' => "5A".to_string(),
        _ => format!("{:02X}", u32::from(c)),
    }
}

pub fn tile_file_name(code: &str, layer: u32) -> String {
    format!("tile_{code}_layer{layer}.png")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSourceConfig {
    pub tiles_dir: PathBuf,
    /// Square dilation kernel size. Even sizes round up; 0 and 1 disable it.
    pub dilate: usize,
    /// `(width, height)` of the blank grid used for missing tiles.
    pub fallback_size: (usize, usize),
}

impl Default for TileSourceConfig {
    fn default() -> Self {
        Self {
            tiles_dir: PathBuf::from("tiles"),
            dilate: 1,
            fallback_size: DEFAULT_FALLBACK_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TileSource {
    cfg: TileSourceConfig,
}

impl TileSource {
    pub fn new(cfg: TileSourceConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &TileSourceConfig {
        &self.cfg
    }

    /// First existing tile file for `c`, if any.
    pub fn tile_path(&self, c: char) -> Option<PathBuf> {
        let code = tile_code(c);
        TILE_LAYERS
            .iter()
            .map(|&layer| self.cfg.tiles_dir.join(tile_file_name(&code, layer)))
            .find(|path| path.is_file())
    }

    /// Bitmap for `c`. A missing tile is not an error: it yields a blank grid.
    pub fn load(&self, c: char) -> Result<PixelGrid> {
        let Some(path) = self.tile_path(c) else {
            warn!(
                "no tile for {c:?} (code {}) in {}, using a blank {}x{} grid",
                tile_code(c),
                self.cfg.tiles_dir.display(),
                self.cfg.fallback_size.0,
                self.cfg.fallback_size.1
            );
            let (w, h) = self.cfg.fallback_size;
            return PixelGrid::blank(w, h).context("constructing fallback grid");
        };

        let grid = load_grid(&path, self.cfg.dilate)?;
        if grid.is_blank() {
            warn!("tile {} for {c:?} has no on-pixels", path.display());
        } else {
            debug!(
                "loaded {} ({}x{}, {} on)",
                path.display(),
                grid.width(),
                grid.height(),
                grid.count_on()
            );
        }
        Ok(grid)
    }
}

/// Decodes `path` to luma, dilates with a square kernel of `dilate` pixels
/// and thresholds at `> 0`.
pub fn load_grid(path: &Path, dilate: usize) -> Result<PixelGrid> {
    let img = load_luma(path)?;
    let size = normalize_kernel_size(dilate);
    let img = if size > 1 {
        dilate_binary_u8(&img.as_view(), size)
    } else {
        img
    };

    PixelGrid::from_luma(&img.as_view())
        .with_context(|| format!("building pixel grid from {}", path.display()))
}

fn load_luma(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening tile image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}
