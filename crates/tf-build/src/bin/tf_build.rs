use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::GrayImage;
use log::{info, warn};
use serde::Serialize;
use tf_core::PixelGrid;
use tf_glyph::raster::{mismatched_pixels, rasterize_nonzero};
use tf_glyph::{
    DEFAULT_UNITS_PER_EM, Glyph, GlyphConfig, GlyphSet, path_points, path_signed_area,
    unique_chars,
};
use tf_tiles::{TileSource, TileSourceConfig, load_grid};

#[derive(Parser, Debug)]
#[command(name = "tf_build")]
#[command(about = "Trace tile bitmaps into polygon glyph outlines")]
struct Cli {
    /// Log per-glyph details.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build outlines for a whole charset and write them as JSON.
    #[command(name = "font")]
    Font(FontArgs),
    /// Trace a single PNG.
    #[command(name = "trace")]
    Trace(TraceArgs),
    /// Check that every outline renders back to its bitmap.
    #[command(name = "verify")]
    Verify(VerifyArgs),
}

const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ!";

#[derive(Args, Debug, Clone)]
struct CharsetArgs {
    #[arg(long, conflicts_with = "charset_file", default_value = DEFAULT_CHARSET)]
    charset: String,
    /// Read the charset from a file instead of `--charset`.
    #[arg(long)]
    charset_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct TileArgs {
    #[arg(long, required = true)]
    tiles: PathBuf,
    #[arg(long, default_value_t = DEFAULT_UNITS_PER_EM)]
    upem: u32,
    /// Square dilation kernel applied before tracing (1 disables it).
    #[arg(long, default_value_t = 1)]
    dilate: usize,
}

#[derive(Args, Debug, Clone)]
struct FontArgs {
    #[command(flatten)]
    tiles: TileArgs,
    #[command(flatten)]
    charset: CharsetArgs,
    #[arg(long, default_value = "Tilefont")]
    family: String,
    #[arg(long, default_value = "Regular")]
    style: String,
    #[arg(long, required = true)]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct TraceArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value_t = DEFAULT_UNITS_PER_EM)]
    upem: u32,
    #[arg(long, default_value_t = 1)]
    dilate: usize,
    #[arg(long, default_value = "out/trace")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct VerifyArgs {
    #[command(flatten)]
    tiles: TileArgs,
    #[command(flatten)]
    charset: CharsetArgs,
}

#[derive(Debug, Clone, Serialize)]
struct FontDto {
    family: String,
    style: String,
    units_per_em: u32,
    glyph_order: Vec<String>,
    cmap: Vec<CmapEntryDto>,
    glyphs: Vec<GlyphDto>,
}

#[derive(Debug, Clone, Serialize)]
struct CmapEntryDto {
    codepoint: u32,
    glyph: String,
}

#[derive(Debug, Clone, Serialize)]
struct GlyphDto {
    name: String,
    codepoint: Option<u32>,
    advance_width: u32,
    left_side_bearing: i32,
    empty: bool,
    contours: Vec<ContourDto>,
}

#[derive(Debug, Clone, Serialize)]
struct ContourDto {
    signed_area: f64,
    points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaTrace {
    input: String,
    width: usize,
    height: usize,
    units_per_em: u32,
    scale: f64,
    dilate: usize,
    on_pixels: usize,
    outer_contours: usize,
    hole_contours: usize,
    fill_rule: &'static str,
    mismatched_pixels: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.cmd {
        Command::Font(args) => run_font(args),
        Command::Trace(args) => run_trace(args),
        Command::Verify(args) => run_verify(args),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run_font(args: FontArgs) -> Result<()> {
    let chars = read_charset(&args.charset)?;
    let cfg = glyph_config(args.tiles.upem)?;
    let source = tile_source(&args.tiles);

    let set = GlyphSet::build_parallel(chars.iter().copied(), &cfg, |c| source.load(c))?;

    let empty = set
        .records()
        .iter()
        .skip(1)
        .filter(|r| r.glyph.is_empty())
        .count();
    info!(
        "built {} glyphs ({} empty) at {} units per em",
        set.len(),
        empty,
        set.units_per_em()
    );

    let font = FontDto {
        family: args.family,
        style: args.style,
        units_per_em: set.units_per_em(),
        glyph_order: set.glyph_order().map(str::to_string).collect(),
        cmap: set
            .char_map()
            .map(|(c, name)| CmapEntryDto {
                codepoint: u32::from(c),
                glyph: name.to_string(),
            })
            .collect(),
        glyphs: set
            .records()
            .iter()
            .map(|r| glyph_dto(&r.name, r.codepoint, &r.glyph))
            .collect(),
    };

    ensure_parent_dir(&args.out)?;
    write_json(args.out.clone(), &font)?;
    println!(
        "wrote {} glyphs to {}",
        font.glyphs.len(),
        args.out.display()
    );

    Ok(())
}

fn run_trace(args: TraceArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let cfg = glyph_config(args.upem)?;

    let grid = load_grid(&args.input, args.dilate)?;
    let glyph = tf_glyph::glyph_from_grid(&grid, &cfg)
        .with_context(|| format!("tracing {}", args.input.display()))?;
    let scale = cfg.scale_for(grid.height());

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let name = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "glyph".to_string());
    write_json(args.out.join("contours.json"), &glyph_dto(&name, None, &glyph))?;

    let preview = rasterize_nonzero(&glyph, grid.width(), grid.height(), scale)
        .context("rasterizing outline preview")?;
    save_grid(args.out.join("preview.png"), &preview)?;

    let mismatched = mismatched_pixels(&grid, &glyph, scale)?.len();
    let outer = glyph
        .paths()
        .iter()
        .filter(|p| path_signed_area(p) < 0.0)
        .count();

    write_json(
        args.out.join("meta.json"),
        &MetaTrace {
            input: args.input.display().to_string(),
            width: grid.width(),
            height: grid.height(),
            units_per_em: cfg.units_per_em,
            scale,
            dilate: args.dilate,
            on_pixels: grid.count_on(),
            outer_contours: outer,
            hole_contours: glyph.paths().len() - outer,
            fill_rule: "nonzero, sampled at pixel centers",
            mismatched_pixels: mismatched,
        },
    )?;

    if mismatched > 0 {
        warn!(
            "{} pixel(s) of {} differ from the traced outline",
            mismatched,
            args.input.display()
        );
    }

    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let chars = read_charset(&args.charset)?;
    let cfg = glyph_config(args.tiles.upem)?;
    let source = tile_source(&args.tiles);

    let mut failed = Vec::new();
    for &c in &chars {
        let grid = source.load(c)?;
        let glyph = tf_glyph::glyph_from_grid(&grid, &cfg)?;
        let bad = mismatched_pixels(&grid, &glyph, cfg.scale_for(grid.height()))?;
        if !bad.is_empty() {
            warn!(
                "{c:?}: {} mismatched pixel(s), first at {:?}",
                bad.len(),
                bad[0]
            );
            failed.push(c);
        }
    }

    if !failed.is_empty() {
        let list: String = failed.iter().collect();
        bail!(
            "{} of {} glyph(s) do not reproduce their bitmap: {:?}",
            failed.len(),
            chars.len(),
            list
        );
    }

    println!("all {} glyph(s) reproduce their bitmap", chars.len());
    Ok(())
}

fn read_charset(args: &CharsetArgs) -> Result<Vec<char>> {
    let text = match &args.charset_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading charset file {}", path.display()))?,
        None => args.charset.clone(),
    };

    let chars = unique_chars(text.chars());
    if chars.is_empty() {
        bail!("charset is empty.");
    }
    Ok(chars)
}

fn glyph_config(upem: u32) -> Result<GlyphConfig> {
    let cfg = GlyphConfig {
        units_per_em: upem,
        ..GlyphConfig::default()
    };
    cfg.validate().context("validating glyph config")?;
    Ok(cfg)
}

fn tile_source(args: &TileArgs) -> TileSource {
    TileSource::new(TileSourceConfig {
        tiles_dir: args.tiles.clone(),
        dilate: args.dilate,
        ..TileSourceConfig::default()
    })
}

fn glyph_dto(name: &str, codepoint: Option<char>, glyph: &Glyph) -> GlyphDto {
    GlyphDto {
        name: name.to_string(),
        codepoint: codepoint.map(u32::from),
        advance_width: glyph.advance_width,
        left_side_bearing: 0,
        empty: glyph.is_empty(),
        contours: glyph
            .paths()
            .iter()
            .map(|path| ContourDto {
                signed_area: path_signed_area(path),
                points: path_points(path).iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect(),
    }
}

fn save_grid(path: PathBuf, grid: &PixelGrid) -> Result<()> {
    let luma = grid.to_luma();
    let gray = GrayImage::from_raw(luma.width() as u32, luma.height() as u32, luma.into_raw())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, read_charset};

    fn verify_charset(args: &[&str]) -> Vec<char> {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        let Command::Verify(verify) = cli.cmd else {
            panic!("expected the verify subcommand");
        };
        read_charset(&verify.charset).expect("charset resolves")
    }

    #[test]
    fn charset_defaults_to_uppercase_and_bang() {
        let chars = verify_charset(&["tf_build", "verify", "--tiles", "tiles"]);
        assert_eq!(chars.len(), 27);
        assert_eq!(chars.first(), Some(&'A'));
        assert_eq!(chars.last(), Some(&'!'));
    }

    #[test]
    fn explicit_charset_replaces_default() {
        let chars = verify_charset(&["tf_build", "verify", "--tiles", "t", "--charset", "abba"]);
        assert_eq!(chars, vec!['a', 'b']);
    }

    #[test]
    fn charset_file_replaces_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chars.txt");
        std::fs::write(&path, "XY\nZ\n").expect("charset written");
        let path = path.to_string_lossy().into_owned();

        let chars = verify_charset(&["tf_build", "verify", "--tiles", "t", "--charset-file", &path]);
        assert_eq!(chars, vec!['X', 'Y', 'Z']);
    }

    #[test]
    fn empty_charset_is_rejected() {
        let cli = Cli::try_parse_from(["tf_build", "verify", "--tiles", "t", "--charset", "\n"])
            .expect("valid arguments");
        let Command::Verify(verify) = cli.cmd else {
            panic!("expected the verify subcommand");
        };
        assert!(read_charset(&verify.charset).is_err());
    }

    #[test]
    fn charset_options_conflict() {
        let out = Cli::try_parse_from([
            "tf_build",
            "verify",
            "--tiles",
            "t",
            "--charset",
            "A",
            "--charset-file",
            "chars.txt",
        ]);
        assert!(out.is_err());
    }
}
