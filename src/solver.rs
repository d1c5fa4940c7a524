//! Explicit time integration and solution recording.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::bonds::BondNetwork;
use crate::config::BarConfig;
use crate::errors::SimulationError;
use crate::geometry::BarGrid;
use crate::loading::BoundaryCondition;

/// Append-only record of the displacement field over the whole run.
///
/// One snapshot per time step, indexed by step number and node id. Written
/// once per step by the solver and read-only afterwards; downstream
/// consumers such as animation tooling take it as a `steps x points` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionHistory {
    /// Displacement snapshots in step order.
    snapshots: Vec<Vec<f64>>,
}

impl SolutionHistory {
    /// Create an empty history with room for the expected number of steps.
    fn with_capacity(steps: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(steps),
        }
    }

    /// Append the snapshot for the next step.
    fn record(&mut self, displacement: &DVector<f64>) {
        self.snapshots.push(displacement.iter().copied().collect());
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.snapshots.len()
    }

    /// Displacement snapshot for a step, indexed by node id.
    #[must_use]
    pub fn snapshot(&self, step: usize) -> &[f64] {
        &self.snapshots[step]
    }

    /// Largest absolute displacement anywhere in the history.
    ///
    /// Useful as a post-hoc sanity probe: an explicit run with a time step
    /// past the stability limit shows up as an absurdly large value here.
    #[must_use]
    pub fn max_abs_displacement(&self) -> f64 {
        self.snapshots
            .iter()
            .flatten()
            .fold(0.0, |max, value| max.max(value.abs()))
    }
}

/// A configured bar simulation ready to run.
///
/// Construction validates the configuration, discretizes the bar and builds
/// the bond network once against the fixed reference geometry; [`run`]
/// advances the displacement field step by step.
///
/// [`run`]: Simulation::run
///
/// # Examples
/// ```
/// use peribar::{BarConfig, Simulation};
///
/// let mut simulation = Simulation::new(BarConfig::default()).expect("valid configuration");
/// let history = simulation.run().expect("simulation completes");
/// assert_eq!(history.steps(), 150);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    /// Parameters the run was built from.
    config: BarConfig,
    /// Fixed reference discretization.
    grid: BarGrid,
    /// Bond network; damage flags mutate during the run.
    bonds: BondNetwork,
    /// Ids of the points inside either boundary layer.
    boundary_ids: Vec<usize>,
    /// Prescribed displacement per step.
    condition: BoundaryCondition,
}

impl Simulation {
    /// Build a simulation from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`] when a parameter bound is
    /// violated and [`SimulationError::ZeroLengthBond`] when the geometry is
    /// degenerate.
    pub fn new(config: BarConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let grid = BarGrid::discretize(config.bar_length, config.point_count);
        let horizon = config.horizon();
        let bonds = BondNetwork::build(&grid, horizon)?;
        let boundary_ids = grid.boundary_layer(horizon);
        let condition =
            BoundaryCondition::three_phase(config.time_steps(), config.applied_displacement)?;
        Ok(Self {
            config,
            grid,
            bonds,
            boundary_ids,
            condition,
        })
    }

    /// The configuration this simulation was built from.
    #[must_use]
    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// The reference discretization.
    #[must_use]
    pub fn grid(&self) -> &BarGrid {
        &self.grid
    }

    /// The bond network, including any damage accumulated so far.
    #[must_use]
    pub fn bonds(&self) -> &BondNetwork {
        &self.bonds
    }

    /// Ids of the points that receive the prescribed displacement.
    #[must_use]
    pub fn boundary_layer(&self) -> &[usize] {
        &self.boundary_ids
    }

    /// Largest stable explicit time step for this discretization.
    #[must_use]
    pub fn critical_time_step(&self) -> f64 {
        self.bonds.critical_time_step(&self.grid, &self.config)
    }

    /// Local damage index per point, in id order.
    #[must_use]
    pub fn damage(&self) -> Vec<f64> {
        (0..self.grid.point_count())
            .map(|id| self.bonds.damage(id))
            .collect()
    }

    /// Advance the displacement field through every time step.
    ///
    /// The scheme is the explicit second-order central difference
    /// `u_future = a * dt^2 + 2 u_current - u_previous` with both persistent
    /// buffers seeded at zero. Each step prescribes the boundary value on
    /// the current field, evaluates bond forces against that prescribed
    /// state, records the current field under the step index and only then
    /// projects the future field, so every recorded snapshot is the
    /// pre-update state for its step. The loop runs exactly once per entry
    /// of the loading sequence; there is no early termination.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Diverged`] when a divergence limit is
    /// configured and the displacement magnitude exceeds it.
    pub fn run(&mut self) -> Result<SolutionHistory, SimulationError> {
        let point_count = self.grid.point_count();
        let dt_squared = self.config.time_step * self.config.time_step;
        let inverse_density = 1.0 / self.config.density;

        let mut previous = DVector::<f64>::zeros(point_count);
        let mut current = DVector::<f64>::zeros(point_count);
        let mut history = SolutionHistory::with_capacity(self.condition.len());

        for step in 0..self.condition.len() {
            self.condition.apply(step, &self.boundary_ids, &mut current);
            let force = self
                .bonds
                .accumulate_forces(&self.grid, &current, &self.config);
            history.record(&current);

            let mut future = DVector::<f64>::zeros(point_count);
            for i in 0..point_count {
                let acceleration = force[i] * inverse_density;
                future[i] = acceleration * dt_squared + 2.0 * current[i] - previous[i];
            }

            if let Some(limit) = self.config.divergence_limit {
                let magnitude = future.amax();
                if magnitude > limit {
                    return Err(SimulationError::Diverged {
                        step,
                        magnitude,
                        limit,
                    });
                }
            }

            previous = std::mem::replace(&mut current, future);
        }

        Ok(history)
    }
}
