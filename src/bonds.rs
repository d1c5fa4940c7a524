//! Bond network construction and pairwise force evaluation.

use nalgebra::DVector;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::config::BarConfig;
use crate::errors::SimulationError;
use crate::geometry::BarGrid;

/// State carried by a single peridynamic bond.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bond {
    /// Distance between the two endpoints in the reference configuration.
    reference_length: f64,
    /// Permanent damage flag; once set it never clears.
    broken: bool,
}

/// Undirected network of bonds between material points within the horizon.
///
/// One node per material point, added in id order so that node indices and
/// point ids coincide, and one edge per unordered pair of distinct points
/// whose reference distance is at most the horizon (closed ball). Built once
/// against the fixed reference geometry; only the per-bond damage flags
/// change during a run.
#[derive(Clone, Debug)]
pub struct BondNetwork {
    /// Graph storage for points and bonds.
    graph: UnGraph<usize, Bond>,
}

impl BondNetwork {
    /// Build the bond network for a grid and interaction radius.
    ///
    /// Neighbor symmetry and self-pair exclusion hold by construction: each
    /// unordered pair of distinct ids is examined exactly once and stored as
    /// a single undirected edge.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ZeroLengthBond`] when two material points
    /// coincide inside the horizon; the stretch of such a bond is undefined.
    pub fn build(grid: &BarGrid, horizon: f64) -> Result<Self, SimulationError> {
        let mut graph = UnGraph::with_capacity(grid.point_count(), 0);
        for point in grid.points() {
            graph.add_node(point.id);
        }
        for (i, first) in grid.points().iter().enumerate() {
            for (j, second) in grid.points().iter().enumerate().skip(i + 1) {
                let reference_length = (second.coordinate - first.coordinate).abs();
                if reference_length > horizon {
                    continue;
                }
                if reference_length == 0.0 {
                    return Err(SimulationError::ZeroLengthBond { i, j });
                }
                graph.add_edge(
                    NodeIndex::new(i),
                    NodeIndex::new(j),
                    Bond {
                        reference_length,
                        broken: false,
                    },
                );
            }
        }
        Ok(Self { graph })
    }

    /// Ids of the points bonded to `id`, in ascending order.
    #[must_use]
    pub fn neighbors(&self, id: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(id))
            .map(NodeIndex::index)
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Total number of bonds in the network.
    #[must_use]
    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of bonds whose damage flag is set.
    #[must_use]
    pub fn broken_bond_count(&self) -> usize {
        self.graph.edge_weights().filter(|bond| bond.broken).count()
    }

    /// Local damage index of a point: the fraction of its bonds that are
    /// broken, or zero when the point has no bonds.
    #[must_use]
    pub fn damage(&self, id: usize) -> f64 {
        let node = NodeIndex::new(id);
        let total = self.graph.edges(node).count();
        if total == 0 {
            return 0.0;
        }
        let broken = self
            .graph
            .edges(node)
            .filter(|edge| edge.weight().broken)
            .count();
        broken as f64 / total as f64
    }

    /// Largest stable explicit time step for this network.
    ///
    /// Uses the Silling–Askari bound `sqrt(2 rho / sum_j c V_j / ksi_ij)`
    /// minimized over all points, so callers can verify a configured time
    /// step instead of discovering divergence empirically.
    #[must_use]
    pub fn critical_time_step(&self, grid: &BarGrid, config: &BarConfig) -> f64 {
        let micro_modulus = config.micro_modulus();
        let mut limit = f64::INFINITY;
        for node in self.graph.node_indices() {
            let mut stiffness_sum = 0.0;
            for edge in self.graph.edges(node) {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                let volume = grid.points()[other.index()].volume;
                stiffness_sum += micro_modulus * volume / edge.weight().reference_length;
            }
            if stiffness_sum > 0.0 {
                limit = limit.min((2.0 * config.density / stiffness_sum).sqrt());
            }
        }
        limit
    }

    /// Evaluate the net peridynamic force density at every point.
    ///
    /// Each intact bond contributes `sign(ksi + eta) * c * s * volume` to one
    /// endpoint and the opposite to the other, where the stretch `s` is
    /// measured against the fixed reference length. A bond whose stretch
    /// exceeds the critical value is marked broken permanently and
    /// contributes nothing from that evaluation onward, regardless of later
    /// stretch values. The constant body-force density is added exactly once
    /// per point after the pair sweep.
    pub fn accumulate_forces(
        &mut self,
        grid: &BarGrid,
        displacement: &DVector<f64>,
        config: &BarConfig,
    ) -> DVector<f64> {
        let micro_modulus = config.micro_modulus();
        let critical_stretch = config.critical_stretch;
        let mut force = DVector::zeros(grid.point_count());
        for edge in self.graph.edge_indices() {
            let (a, b) = self.graph.edge_endpoints(edge).expect("valid edge");
            let (i, j) = (a.index(), b.index());
            let bond = self.graph.edge_weight_mut(edge).expect("valid edge");
            if bond.broken {
                continue;
            }
            let ksi = grid.coordinate(j) - grid.coordinate(i);
            let eta = displacement[j] - displacement[i];
            let deformed = ksi + eta;
            let stretch = (deformed.abs() - bond.reference_length) / bond.reference_length;
            if stretch > critical_stretch {
                bond.broken = true;
                continue;
            }
            let pair_density = deformed.signum() * micro_modulus * stretch;
            force[i] += pair_density * grid.points()[j].volume;
            force[j] -= pair_density * grid.points()[i].volume;
        }
        if config.body_force_density != 0.0 {
            force.add_scalar_mut(config.body_force_density);
        }
        force
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn small_config(critical_stretch: f64) -> BarConfig {
        BarConfig {
            bar_length: 10.0,
            point_count: 11,
            critical_stretch,
            ..BarConfig::default()
        }
    }

    #[test]
    fn neighbor_sets_are_symmetric() {
        let grid = BarGrid::discretize(15.0, 7);
        let network = BondNetwork::build(&grid, 3.014 * 15.0 / 7.0).expect("network builds");
        for i in 0..grid.point_count() {
            for j in network.neighbors(i) {
                assert_ne!(i, j, "self-pairs are excluded");
                assert!(
                    network.neighbors(j).contains(&i),
                    "neighbor sets must be symmetric ({i} <-> {j})"
                );
            }
        }
    }

    #[test]
    fn rebuilding_yields_identical_neighbor_sets() {
        let grid = BarGrid::discretize(15.0, 7);
        let horizon = 3.014 * 15.0 / 7.0;
        let first = BondNetwork::build(&grid, horizon).expect("network builds");
        let second = BondNetwork::build(&grid, horizon).expect("network builds");
        assert_eq!(first.bond_count(), second.bond_count());
        for i in 0..grid.point_count() {
            assert_eq!(first.neighbors(i), second.neighbors(i));
        }
    }

    #[test]
    fn points_exactly_at_the_horizon_are_bonded() {
        let grid = BarGrid::discretize(10.0, 11);
        // spacing 1.0; a horizon of exactly 2.0 keeps both first and second
        // nearest points (closed ball)
        let network = BondNetwork::build(&grid, 2.0).expect("network builds");
        assert_eq!(network.neighbors(5), vec![3, 4, 6, 7]);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let grid = BarGrid::discretize(0.0, 3);
        let error = BondNetwork::build(&grid, 1.0).expect_err("degenerate geometry detected");
        assert_eq!(error, SimulationError::ZeroLengthBond { i: 0, j: 1 });
    }

    #[test]
    fn opposing_forces_balance_for_a_stretched_pair() {
        let grid = BarGrid::discretize(2.0, 3);
        let config = small_config(10.0);
        let mut network = BondNetwork::build(&grid, 1.0).expect("network builds");
        // stretch only the left bond
        let displacement = DVector::from_vec(vec![-0.01, 0.0, 0.0]);
        let force = network.accumulate_forces(&grid, &displacement, &config);
        let c = config.micro_modulus();
        // bond (0, 1): ksi = 1, eta = 0.01, s = 0.01, pulling 0 right and 1 left
        assert_relative_eq!(force[0], c * 0.01, epsilon = 1.0e-12);
        assert_relative_eq!(force[1], -c * 0.01, epsilon = 1.0e-12);
        assert_relative_eq!(force[2], 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn bond_breakage_is_permanent() {
        let grid = BarGrid::discretize(1.0, 2);
        let config = small_config(0.02);
        let mut network = BondNetwork::build(&grid, 1.5).expect("network builds");
        assert_eq!(network.bond_count(), 1);

        // exceed the critical stretch once
        let overload = DVector::from_vec(vec![0.0, 0.05]);
        let force = network.accumulate_forces(&grid, &overload, &config);
        assert_eq!(network.broken_bond_count(), 1);
        assert_relative_eq!(force[0], 0.0);
        assert_relative_eq!(force[1], 0.0);

        // stretch well below the threshold afterwards; the bond must not heal
        let relaxed = DVector::from_vec(vec![0.0, 0.001]);
        let force = network.accumulate_forces(&grid, &relaxed, &config);
        assert_eq!(network.broken_bond_count(), 1);
        assert_relative_eq!(force[0], 0.0);
        assert_relative_eq!(force[1], 0.0);
        assert_relative_eq!(network.damage(0), 1.0);
    }

    #[test]
    fn body_force_is_added_once_per_point() {
        let grid = BarGrid::discretize(10.0, 11);
        let config = BarConfig {
            body_force_density: -9.81,
            ..small_config(10.0)
        };
        let mut network = BondNetwork::build(&grid, 3.5).expect("network builds");
        // zero displacement: every bond force vanishes, leaving only gravity,
        // independent of how many neighbors each point has
        let displacement = DVector::zeros(grid.point_count());
        let force = network.accumulate_forces(&grid, &displacement, &config);
        for i in 0..grid.point_count() {
            assert_relative_eq!(force[i], -9.81, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn critical_time_step_is_finite_and_positive() {
        let grid = BarGrid::discretize(15.0, 7);
        let config = BarConfig::default();
        let network = BondNetwork::build(&grid, config.horizon()).expect("network builds");
        let limit = network.critical_time_step(&grid, &config);
        assert!(limit.is_finite());
        assert!(limit > 0.0);
        // the default scenario time step sits well inside the stable region
        assert!(config.time_step < limit);
    }
}
