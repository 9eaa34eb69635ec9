pub mod comparison;
pub mod ode;
pub mod utils;

pub use comparison::{
  run_comparison, ComparisonParams, Problem, Run, Series,
};
pub use ode::{
  Euler, ImprovedEuler, IntegrationError, Integrator, IntegratorType, Point,
  Trajectory, RK4,
};
