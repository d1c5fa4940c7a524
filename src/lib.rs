#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod bonds;
mod config;
mod errors;
mod geometry;
mod loading;
mod solver;

pub use bonds::BondNetwork;
pub use config::BarConfig;
pub use errors::{ConfigError, SimulationError};
pub use geometry::{BarGrid, MaterialPoint};
pub use loading::BoundaryCondition;
pub use solver::{Simulation, SolutionHistory};
