//! Time-varying displacement boundary conditions.

use nalgebra::DVector;

use crate::errors::ConfigError;

/// Prescribed boundary displacement, one scalar value per time step.
///
/// The loading program has three equal phases: hold at `+u0`, hold at `-u0`,
/// then hold at zero. When the requested step count is not divisible by
/// three, the remainder steps are dropped rather than padded, so the
/// sequence length is always `3 * (time_steps / 3)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryCondition {
    /// Applied displacement per step, immutable once generated.
    values: Vec<f64>,
}

impl BoundaryCondition {
    /// Generate the three-phase loading sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLoadPhase`] when fewer than three steps
    /// are requested, since each phase must contain at least one step.
    ///
    /// # Examples
    /// ```
    /// use peribar::BoundaryCondition;
    ///
    /// let condition = BoundaryCondition::three_phase(150, 0.02).expect("valid phase length");
    /// assert_eq!(condition.len(), 150);
    /// assert_eq!(condition.value(0), 0.02);
    /// assert_eq!(condition.value(50), -0.02);
    /// assert_eq!(condition.value(100), 0.0);
    /// ```
    pub fn three_phase(time_steps: usize, magnitude: f64) -> Result<Self, ConfigError> {
        let phase = time_steps / 3;
        if phase == 0 {
            return Err(ConfigError::EmptyLoadPhase { time_steps });
        }
        let mut values = Vec::with_capacity(3 * phase);
        values.extend(std::iter::repeat(magnitude).take(phase));
        values.extend(std::iter::repeat(-magnitude).take(phase));
        values.extend(std::iter::repeat(0.0).take(phase));
        Ok(Self { values })
    }

    /// Number of steps covered by the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty (never true for a generated sequence).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applied displacement for the given step.
    ///
    /// # Panics
    ///
    /// Panics when `step` is past the end of the sequence.
    #[must_use]
    pub fn value(&self, step: usize) -> f64 {
        self.values[step]
    }

    /// Overwrite the current displacement at every boundary-layer point with
    /// the value prescribed for `step`.
    ///
    /// The prescription happens before force evaluation, so bond forces see
    /// the prescribed rather than the free displacement at these points.
    pub fn apply(&self, step: usize, boundary_ids: &[usize], current: &mut DVector<f64>) {
        let value = self.value(step);
        for &id in boundary_ids {
            current[id] = value;
        }
    }
}
