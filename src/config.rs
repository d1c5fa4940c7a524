//! Material, geometric and temporal parameters for a bar simulation.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Complete parameter set for a one-dimensional peridynamic bar run.
///
/// All quantities are plain scalars; derived constants such as the horizon
/// and the micro-modulus are computed on demand rather than stored, so a
/// config can never hold internally inconsistent values.
///
/// # Examples
/// ```
/// use peribar::BarConfig;
///
/// let config = BarConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.time_steps(), 150);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Mass density in kilograms per cubic metre.
    pub density: f64,
    /// Young's modulus in pascals.
    pub elastic_modulus: f64,
    /// Poisson ratio, used only to derive the bulk modulus.
    pub poisson_ratio: f64,
    /// Horizon expressed as a multiple of the mesh spacing.
    pub horizon_multiplier: f64,
    /// Relative bond elongation beyond which a bond breaks.
    pub critical_stretch: f64,
    /// Length of the bar in metres.
    pub bar_length: f64,
    /// Number of material points along the bar.
    pub point_count: usize,
    /// Magnitude of the prescribed boundary displacement in metres.
    pub applied_displacement: f64,
    /// Size of one explicit time step in seconds.
    pub time_step: f64,
    /// Total simulated time in seconds.
    pub total_time: f64,
    /// Constant body-force density applied once per point per step.
    pub body_force_density: f64,
    /// Optional bound on the displacement magnitude; exceeding it aborts
    /// the run with a divergence error. `None` disables the check.
    pub divergence_limit: Option<f64>,
}

impl Default for BarConfig {
    /// The standard demonstration scenario: a 15 m bar with 7 points,
    /// Silling–Askari horizon, and 150 steps of three-phase loading.
    fn default() -> Self {
        Self {
            density: 1.0,
            elastic_modulus: 1.0,
            poisson_ratio: 0.25,
            horizon_multiplier: 3.014,
            critical_stretch: 0.02,
            bar_length: 15.0,
            point_count: 7,
            applied_displacement: 0.02,
            time_step: 0.1,
            total_time: 15.0,
            body_force_density: 0.0,
            divergence_limit: None,
        }
    }
}

impl BarConfig {
    /// Bulk modulus `K = E / (3 (1 - 2nu))` in pascals.
    #[must_use]
    pub fn bulk_modulus(&self) -> f64 {
        self.elastic_modulus / (3.0 * (1.0 - 2.0 * self.poisson_ratio))
    }

    /// Element width `L / N` used to derive the horizon.
    ///
    /// This deliberately differs from [`node_spacing`](Self::node_spacing):
    /// the horizon convention divides the bar into `N` equal cells, while the
    /// lattice itself places `N` points with both endpoints included.
    #[must_use]
    pub fn mesh_spacing(&self) -> f64 {
        self.bar_length / self.point_count as f64
    }

    /// True distance between adjacent material points, `L / (N - 1)`.
    #[must_use]
    pub fn node_spacing(&self) -> f64 {
        self.bar_length / (self.point_count as f64 - 1.0)
    }

    /// Interaction radius `delta = multiplier * mesh_spacing`.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.horizon_multiplier * self.mesh_spacing()
    }

    /// Bond micro-modulus `c = 18 K / (pi * delta^4)`.
    #[must_use]
    pub fn micro_modulus(&self) -> f64 {
        18.0 * self.bulk_modulus() / (PI * self.horizon().powi(4))
    }

    /// Number of discrete time steps implied by the configuration.
    #[must_use]
    pub fn time_steps(&self) -> usize {
        (self.total_time / self.time_step).round() as usize
    }

    /// Check every parameter bound before a run starts.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] variant describing the first violated
    /// bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density <= 0.0 {
            return Err(ConfigError::NonPositiveDensity(self.density));
        }
        if self.elastic_modulus <= 0.0 {
            return Err(ConfigError::NonPositiveElasticModulus(
                self.elastic_modulus,
            ));
        }
        if self.poisson_ratio <= -1.0 || self.poisson_ratio >= 0.5 {
            return Err(ConfigError::PoissonRatioOutOfRange(self.poisson_ratio));
        }
        if self.horizon_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveHorizonMultiplier(
                self.horizon_multiplier,
            ));
        }
        if self.critical_stretch <= 0.0 {
            return Err(ConfigError::NonPositiveCriticalStretch(
                self.critical_stretch,
            ));
        }
        if self.bar_length <= 0.0 {
            return Err(ConfigError::NonPositiveBarLength(self.bar_length));
        }
        if self.point_count < 2 {
            return Err(ConfigError::TooFewPoints(self.point_count));
        }
        if self.applied_displacement < 0.0 {
            return Err(ConfigError::NegativeAppliedDisplacement(
                self.applied_displacement,
            ));
        }
        if self.time_step <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep(self.time_step));
        }
        if self.total_time <= 0.0 {
            return Err(ConfigError::NonPositiveTotalTime(self.total_time));
        }
        let time_steps = self.time_steps();
        if time_steps / 3 == 0 {
            return Err(ConfigError::EmptyLoadPhase { time_steps });
        }
        Ok(())
    }
}
