use kurbo::{BezPath, PathEl, Point};
use log::{debug, warn};
use tf_contour::{TraceConfig, build_edge_set, trace_contours};
use tf_core::{Error, PixelGrid};

use crate::winding::{OrientedContour, normalize_contour, signed_area};

pub const DEFAULT_UNITS_PER_EM: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphConfig {
    pub units_per_em: u32,
    pub trace: TraceConfig,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            units_per_em: DEFAULT_UNITS_PER_EM,
            trace: TraceConfig::default(),
        }
    }
}

impl GlyphConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.units_per_em == 0 {
            return Err(Error::InvalidUnitsPerEm(self.units_per_em));
        }
        Ok(())
    }

    /// Design units per pixel for a bitmap `bitmap_height` rows tall.
    pub fn scale_for(&self, bitmap_height: usize) -> f64 {
        if bitmap_height == 0 {
            return 1.0;
        }
        f64::from(self.units_per_em) / bitmap_height as f64
    }
}

/// Glyph outline: either explicitly empty or closed polygon paths.
///
/// `Empty` marks an intentional blank (a space, a missing tile). It is never
/// represented as a path list with nothing in it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Empty,
    Paths(Vec<BezPath>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub advance_width: u32,
    pub outline: Outline,
}

impl Glyph {
    pub fn empty(advance_width: u32) -> Self {
        Self {
            advance_width,
            outline: Outline::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.outline, Outline::Empty)
    }

    pub fn paths(&self) -> &[BezPath] {
        match &self.outline {
            Outline::Empty => &[],
            Outline::Paths(paths) => paths,
        }
    }

    /// All contours as subpaths of a single path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut out = BezPath::new();
        for path in self.paths() {
            for el in path.elements() {
                out.push(*el);
            }
        }
        out
    }
}

/// On-curve points of a polygon path, without the implied closing point.
pub fn path_points(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::MoveTo(p)
            | PathEl::LineTo(p)
            | PathEl::QuadTo(_, p)
            | PathEl::CurveTo(_, _, p) => Some(p),
            PathEl::ClosePath => None,
        })
        .collect()
}

pub fn path_signed_area(path: &BezPath) -> f64 {
    signed_area(&path_points(path))
}

/// Builds a glyph record from design-space contours.
///
/// Every contour with at least one point becomes one move/line/close path,
/// in input order. If none does, the outline is [`Outline::Empty`].
pub fn assemble_glyph(contours: &[OrientedContour], bitmap_width: usize, scale: f64) -> Glyph {
    let advance_width = (bitmap_width as f64 * scale).round() as u32;

    let mut paths = Vec::with_capacity(contours.len());
    for contour in contours {
        let Some((first, rest)) = contour.points.split_first() else {
            continue;
        };

        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        paths.push(path);
    }

    let outline = if paths.is_empty() {
        Outline::Empty
    } else {
        Outline::Paths(paths)
    };

    Glyph {
        advance_width,
        outline,
    }
}

/// Traces `grid` into a glyph scaled so the bitmap height spans one em.
pub fn glyph_from_grid(grid: &PixelGrid, cfg: &GlyphConfig) -> Result<Glyph, Error> {
    cfg.validate()?;
    let scale = cfg.scale_for(grid.height());

    let edges = build_edge_set(grid);
    let edge_count = edges.len();
    let traced = trace_contours(edges, &cfg.trace);

    if traced.dropped_open > 0 {
        warn!(
            "dropped {} unterminated boundary walk(s) in {}x{} bitmap",
            traced.dropped_open,
            grid.width(),
            grid.height()
        );
    }
    if traced.dropped_short > 0 {
        debug!("dropped {} degenerate contour(s)", traced.dropped_short);
    }

    let oriented: Vec<OrientedContour> = traced
        .contours
        .iter()
        .map(|c| normalize_contour(c, grid.height(), scale))
        .collect();

    debug!(
        "traced {} contour(s) from {} boundary edges ({} on-pixels)",
        oriented.len(),
        edge_count,
        grid.count_on()
    );

    Ok(assemble_glyph(&oriented, grid.width(), scale))
}
