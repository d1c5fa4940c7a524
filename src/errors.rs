//! Error types produced while configuring or running a simulation.

use thiserror::Error;

/// Error returned when a [`BarConfig`](crate::BarConfig) fails validation.
///
/// Each variant carries the rejected value so callers can present actionable
/// feedback before the time-stepping loop ever starts.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Returned when the mass density is zero or negative.
    #[error("density must be positive (received {0})")]
    NonPositiveDensity(f64),
    /// Returned when the elastic modulus is zero or negative.
    #[error("elastic modulus must be positive (received {0})")]
    NonPositiveElasticModulus(f64),
    /// Returned when the Poisson ratio falls outside the physical range.
    #[error("poisson ratio must lie in (-1, 0.5) (received {0})")]
    PoissonRatioOutOfRange(f64),
    /// Returned when the horizon multiplier is zero or negative.
    #[error("horizon multiplier must be positive (received {0})")]
    NonPositiveHorizonMultiplier(f64),
    /// Returned when the critical stretch is zero or negative.
    #[error("critical stretch must be positive (received {0})")]
    NonPositiveCriticalStretch(f64),
    /// Returned when the bar length is zero or negative.
    #[error("bar length must be positive (received {0})")]
    NonPositiveBarLength(f64),
    /// Returned when the bar holds fewer than two material points.
    #[error("at least two material points are required (received {0})")]
    TooFewPoints(usize),
    /// Returned when the applied displacement magnitude is negative.
    #[error("applied displacement must be non-negative (received {0})")]
    NegativeAppliedDisplacement(f64),
    /// Returned when the time step is zero or negative.
    #[error("time step must be positive (received {0})")]
    NonPositiveTimeStep(f64),
    /// Returned when the total simulated time is zero or negative.
    #[error("total time must be positive (received {0})")]
    NonPositiveTotalTime(f64),
    /// Returned when the step count leaves a loading phase with zero steps.
    #[error("{time_steps} time steps yield an empty loading phase; at least 3 are required")]
    EmptyLoadPhase {
        /// Total number of discrete time steps implied by the configuration.
        time_steps: usize,
    },
}

/// Error returned when constructing or running a
/// [`Simulation`](crate::Simulation) fails.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// Returned when two material points coincide inside the horizon.
    ///
    /// A zero-length bond has no defined stretch, so the degenerate geometry
    /// is rejected when the bond network is built rather than mid-step.
    #[error("points {i} and {j} coincide; a zero-length bond has no defined stretch")]
    ZeroLengthBond {
        /// Identifier of the first material point.
        i: usize,
        /// Identifier of the second material point.
        j: usize,
    },
    /// Returned when the displacement field exceeds the configured bound.
    ///
    /// The central-difference scheme does not police its own stability limit;
    /// this check is opt-in via the `divergence_limit` field of
    /// [`BarConfig`](crate::BarConfig).
    #[error("displacement diverged at step {step}: |u| = {magnitude} exceeds limit {limit}")]
    Diverged {
        /// Step index at which the bound was first exceeded.
        step: usize,
        /// Largest absolute displacement observed at that step.
        magnitude: f64,
        /// Configured divergence limit.
        limit: f64,
    },
    /// Returned when the supplied configuration is invalid.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
