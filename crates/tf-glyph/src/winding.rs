use kurbo::Point;
use tf_contour::Contour;
use tf_core::LatticePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourRole {
    Outer,
    Hole,
}

/// Contour in design space (y up) with its winding fixed for its role.
///
/// Points form an open cycle; the closing segment is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedContour {
    pub role: ContourRole,
    pub points: Vec<Point>,
}

impl OrientedContour {
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }
}

/// Shoelace area `0.5 * Σ(x_i * y_{i+1} - x_{i+1} * y_i)` of an open cycle.
///
/// Returns `0.0` for fewer than three points.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area * 0.5
}

/// Shoelace area of an open lattice cycle, taken as written (y down).
pub fn lattice_signed_area(points: &[LatticePoint]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice: i64 = 0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y);
    }
    twice as f64 * 0.5
}

/// Classifies an open pixel-space cycle by the sign of its area measured
/// with the y axis pointing up.
///
/// Traced solid boundaries run clockwise on screen, which is negative in a
/// y-up frame. Negative is outer; zero or positive is a hole.
pub fn classify(points: &[LatticePoint]) -> ContourRole {
    let upright_area = -lattice_signed_area(points);
    if upright_area < 0.0 {
        ContourRole::Outer
    } else {
        ContourRole::Hole
    }
}

/// Moves a traced contour into design space and fixes its winding.
///
/// Holes are reversed before the transform
/// `(x, y) -> (x * scale, (bitmap_height - y) * scale)`. The area is then
/// measured again and the points reversed once more if the flip left an
/// outer contour non-negative or a hole negative. Outer contours end with
/// negative design-space area, holes with positive (zero-area holes stay at
/// zero).
pub fn normalize_contour(contour: &Contour, bitmap_height: usize, scale: f64) -> OrientedContour {
    let mut cycle = contour.open_points().to_vec();
    let role = classify(&cycle);
    if role == ContourRole::Hole {
        cycle.reverse();
    }

    let h = bitmap_height as f64;
    let mut points: Vec<Point> = cycle
        .iter()
        .map(|p| Point::new(f64::from(p.x) * scale, (h - f64::from(p.y)) * scale))
        .collect();

    let area = signed_area(&points);
    let misoriented = match role {
        ContourRole::Outer => area >= 0.0,
        ContourRole::Hole => area < 0.0,
    };
    if misoriented {
        points.reverse();
    }

    OrientedContour { role, points }
}
