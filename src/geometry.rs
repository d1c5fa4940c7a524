//! Discretization of the bar into material points.

/// A single material point in the reference configuration.
///
/// Points are immutable after discretization: the bond-based formulation
/// measures every bond against the fixed reference geometry, so a point is
/// never moved or destroyed during a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialPoint {
    /// Zero-based identifier, unique and assigned in coordinate order.
    pub id: usize,
    /// Reference position along the bar axis in metres.
    pub coordinate: f64,
    /// Nominal volume associated with the point (uniformly 1 by convention).
    pub volume: f64,
}

/// The ordered set of material points discretizing the bar.
#[derive(Clone, Debug)]
pub struct BarGrid {
    /// Material points in coordinate order.
    points: Vec<MaterialPoint>,
    /// Length of the bar in metres.
    length: f64,
    /// Distance between adjacent points in metres.
    spacing: f64,
}

impl BarGrid {
    /// Discretize a bar of the given length into evenly spaced points.
    ///
    /// Points span `[-length/2, length/2]` with both endpoints included, so
    /// adjacent points sit `length / (point_count - 1)` apart. Ids run
    /// `0..point_count` in coordinate order.
    ///
    /// # Panics
    ///
    /// Panics when `point_count < 2`: a bar needs both endpoints, and fewer
    /// points would leave the spacing undefined.
    ///
    /// # Examples
    /// ```
    /// use peribar::BarGrid;
    ///
    /// let grid = BarGrid::discretize(15.0, 7);
    /// assert_eq!(grid.point_count(), 7);
    /// assert_eq!(grid.coordinate(0), -7.5);
    /// assert_eq!(grid.coordinate(6), 7.5);
    /// ```
    #[must_use]
    pub fn discretize(length: f64, point_count: usize) -> Self {
        assert!(
            point_count >= 2,
            "a bar grid requires at least two material points (received {point_count})"
        );
        let spacing = length / (point_count as f64 - 1.0);
        let points = (0..point_count)
            .map(|id| MaterialPoint {
                id,
                coordinate: -length / 2.0 + id as f64 * spacing,
                volume: 1.0,
            })
            .collect();
        Self {
            points,
            length,
            spacing,
        }
    }

    /// All material points in coordinate order.
    #[must_use]
    pub fn points(&self) -> &[MaterialPoint] {
        &self.points
    }

    /// Number of material points in the grid.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Length of the bar in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Distance between adjacent points in metres.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Reference coordinate of the point with the given id.
    ///
    /// # Panics
    ///
    /// Panics when `id` is out of range.
    #[must_use]
    pub fn coordinate(&self, id: usize) -> f64 {
        self.points[id].coordinate
    }

    /// Ids of the points whose reference distance to either bar end is at
    /// most `horizon` (closed ball), in ascending order.
    ///
    /// These points form the Dirichlet boundary layers that receive the
    /// prescribed displacement each step; every other point responds freely.
    #[must_use]
    pub fn boundary_layer(&self, horizon: f64) -> Vec<usize> {
        let half = self.length / 2.0;
        self.points
            .iter()
            .filter(|point| {
                (point.coordinate + half).abs() <= horizon
                    || (half - point.coordinate).abs() <= horizon
            })
            .map(|point| point.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn points_are_evenly_spaced_and_ordered() {
        let grid = BarGrid::discretize(15.0, 7);
        assert_eq!(grid.point_count(), 7);
        assert_relative_eq!(grid.spacing(), 2.5);
        for (id, point) in grid.points().iter().enumerate() {
            assert_eq!(point.id, id);
            assert_relative_eq!(point.coordinate, -7.5 + 2.5 * id as f64);
            assert_relative_eq!(point.volume, 1.0);
        }
    }

    #[test]
    fn boundary_layer_contains_exactly_the_points_within_one_horizon() {
        let grid = BarGrid::discretize(15.0, 31);
        // spacing 0.5; horizon derived from the L/N convention
        let horizon = 3.014 * 15.0 / 31.0;
        let layer = grid.boundary_layer(horizon);
        // 1.4584 covers coordinates within {0, 0.5, 1.0} of either end
        assert_eq!(layer, vec![0, 1, 2, 28, 29, 30]);
        for point in grid.points() {
            let near_end = (7.5 - point.coordinate.abs()).abs() <= horizon;
            assert_eq!(layer.contains(&point.id), near_end);
        }
    }

    #[test]
    #[should_panic(expected = "at least two material points")]
    fn single_point_grid_is_rejected() {
        let _ = BarGrid::discretize(15.0, 1);
    }

    #[test]
    #[should_panic(expected = "at least two material points")]
    fn empty_grid_is_rejected() {
        let _ = BarGrid::discretize(15.0, 0);
    }

    #[test]
    fn boundary_layer_uses_a_closed_ball() {
        let grid = BarGrid::discretize(10.0, 11);
        // point 2 sits exactly 2.0 from the left end
        let layer = grid.boundary_layer(2.0);
        assert!(layer.contains(&2));
        assert!(!layer.contains(&3));
    }
}
