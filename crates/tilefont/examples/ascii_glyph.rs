//! Example: trace a glyph drawn as text art and print its outline.
//!
//! Each contour is printed with its role and signed area, followed by the
//! whole glyph as SVG path data (y up, so flip it when viewing).
//!
//! Run from the workspace root:
//!   cargo run -p tilefont --example ascii_glyph

use anyhow::{Context, Result};
use tilefont::raster::mismatched_pixels;
use tilefont::{GlyphConfig, PixelGrid, glyph_from_grid, path_points, path_signed_area};

const LETTER_A: [&str; 8] = [
    "..###...",
    ".##.##..",
    "##...##.",
    "##...##.",
    "#######.",
    "##...##.",
    "##...##.",
    "........",
];

fn main() -> Result<()> {
    let grid = PixelGrid::from_rows(&LETTER_A).context("parsing text art")?;
    let cfg = GlyphConfig {
        units_per_em: 800,
        ..GlyphConfig::default()
    };
    let glyph = glyph_from_grid(&grid, &cfg).context("tracing glyph")?;

    println!(
        "{}x{} bitmap, advance width {}",
        grid.width(),
        grid.height(),
        glyph.advance_width
    );
    for (i, path) in glyph.paths().iter().enumerate() {
        let area = path_signed_area(path);
        let role = if area < 0.0 { "outer" } else { "hole" };
        println!(
            "contour {i}: {role}, area {area}, {} points",
            path_points(path).len()
        );
    }

    let bad = mismatched_pixels(&grid, &glyph, cfg.scale_for(grid.height()))?;
    println!("mismatched pixels: {}", bad.len());
    println!("{}", glyph.to_bez_path().to_svg());

    Ok(())
}
