use tf_core::LatticePoint;

/// Fewest points a closed contour may have, counting the closing point.
pub const MIN_CONTOUR_POINTS: usize = 4;

/// Closed polygon on the pixel lattice, in pixel space (y down).
///
/// The first point is repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<LatticePoint>,
}

impl Contour {
    /// Returns `None` unless `points` is closed and has at least
    /// [`MIN_CONTOUR_POINTS`] points.
    pub fn new(points: Vec<LatticePoint>) -> Option<Self> {
        if points.len() < MIN_CONTOUR_POINTS || points.first() != points.last() {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// Points without the repeated closing point.
    pub fn open_points(&self) -> &[LatticePoint] {
        &self.points[..self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total number of unit lattice steps along the contour.
    pub fn unit_length(&self) -> usize {
        self.points
            .windows(2)
            .map(|w| (w[1] - w[0]).length() as usize)
            .sum()
    }

    pub fn into_points(self) -> Vec<LatticePoint> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use tf_core::LatticePoint;

    use super::Contour;

    fn pts(raw: &[(i32, i32)]) -> Vec<LatticePoint> {
        raw.iter().map(|&p| LatticePoint::from(p)).collect()
    }

    #[test]
    fn rejects_open_or_short_polylines() {
        assert!(Contour::new(pts(&[(0, 0), (1, 0), (0, 0)])).is_none());
        assert!(Contour::new(pts(&[(0, 0), (1, 0), (1, 1), (0, 1)])).is_none());
        assert!(Contour::new(Vec::new()).is_none());
    }

    #[test]
    fn closed_square_metrics() {
        let c = Contour::new(pts(&[(0, 0), (2, 0), (2, 1), (0, 1), (0, 0)]))
            .expect("closed contour");

        assert_eq!(c.len(), 5);
        assert_eq!(c.open_points().len(), 4);
        assert_eq!(c.unit_length(), 6);
    }
}
