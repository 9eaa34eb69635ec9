use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
  #[error("step size must be non-zero")]
  InvalidStep,

  /// `target / delta_x` is NaN, infinite or too large to count steps with.
  #[error("target / delta_x = {quotient} is not a usable step count")]
  UnboundedStepCount { quotient: f64 },
}
