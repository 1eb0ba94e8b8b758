use core::ops::Sub;

/// Integer pixel-corner coordinate.
///
/// Ordering is lexicographic on `(x, y)`; tracing relies on it to make
/// choices between otherwise equivalent edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LatticePoint {
    pub x: i32,
    pub y: i32,
}

impl LatticePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for LatticePoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// Manhattan length.
    pub fn length(self) -> i32 {
        self.dx.abs() + self.dy.abs()
    }

    /// Reduces to a unit axis step, or zero.
    pub fn signum(self) -> Self {
        Self {
            dx: self.dx.signum(),
            dy: self.dy.signum(),
        }
    }
}

impl Sub<LatticePoint> for LatticePoint {
    type Output = Offset;

    fn sub(self, rhs: LatticePoint) -> Self::Output {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}
