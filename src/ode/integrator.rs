use crate::ode::{IntegrationError, Point, Scalar, Trajectory};
use alga::general::SupersetOf;
use log::debug;

/// Number of steps of size `delta_x` needed to reach `target`, truncated
/// toward zero. A negative quotient gives zero steps.
pub fn step_count<S: Scalar>(
  delta_x: S,
  target: S,
) -> Result<usize, IntegrationError> {
  let zero: S = 0.0.into();
  if delta_x == zero {
    return Err(IntegrationError::InvalidStep);
  }

  let quotient = <S as SupersetOf<f64>>::to_subset(&(target / delta_x))
    .unwrap_or(std::f64::NAN);
  let steps = quotient.trunc();

  if !quotient.is_finite() || steps >= usize::MAX as f64 {
    return Err(IntegrationError::UnboundedStepCount { quotient });
  }

  Ok(if steps > 0.0 { steps as usize } else { 0 })
}

pub trait Integrator {
  type Settings: Clone;

  fn new(settings: Self::Settings) -> Self;

  fn name(&self) -> &'static str;

  /// y after a single step of `delta_x` from `point`.
  fn step_internal<S, E, F>(
    &mut self,
    derv: &mut F,
    point: &Point<S>,
    delta_x: &S,
  ) -> Result<S, E>
  where
    S: Scalar,
    F: FnMut(S, S) -> Result<S, E>;

  fn step<S, E, F>(
    &mut self,
    derv: &mut F,
    point: &mut Point<S>,
    delta_x: &S,
  ) -> Result<(), E>
  where
    S: Scalar,
    F: FnMut(S, S) -> Result<S, E>,
  {
    point.y = self.step_internal(derv, point, delta_x)?;

    point.x += *delta_x;

    Ok(())
  }

  /// Appends `steps` points to `trajectory`, continuing from its last one.
  fn n_steps<S, E, F>(
    &mut self,
    derv: &mut F,
    trajectory: &mut Trajectory<S>,
    delta_x: &S,
    steps: usize,
  ) -> Result<(), E>
  where
    S: Scalar,
    F: FnMut(S, S) -> Result<S, E>,
  {
    let mut point = trajectory.last();

    for _ in 0..steps {
      self.step(derv, &mut point, delta_x)?;
      trajectory.push(point);
    }

    Ok(())
  }

  /// Integrates with a fallible derivative. The first error returned by
  /// `derv` aborts the run and is handed back unchanged.
  fn try_integrate<S, E, F>(
    &mut self,
    initial: Point<S>,
    delta_x: S,
    target: S,
    mut derv: F,
  ) -> Result<Trajectory<S>, E>
  where
    S: Scalar,
    E: From<IntegrationError>,
    F: FnMut(S, S) -> Result<S, E>,
  {
    let steps = step_count(delta_x, target)?;

    debug!(
      "{}: {} steps of {} from {:?} toward x = {}",
      self.name(),
      steps,
      delta_x,
      initial,
      target
    );

    let mut trajectory = Trajectory::with_initial(initial, steps)?;
    self.n_steps(&mut derv, &mut trajectory, &delta_x, steps)?;

    debug!(
      "{}: last sample at x = {} for target {}",
      self.name(),
      trajectory.last().x,
      target
    );

    Ok(trajectory)
  }

  fn integrate<S, F>(
    &mut self,
    initial: Point<S>,
    delta_x: S,
    target: S,
    mut derv: F,
  ) -> Result<Trajectory<S>, IntegrationError>
  where
    S: Scalar,
    F: FnMut(S, S) -> S,
  {
    self.try_integrate(initial, delta_x, target, |x, y| Ok(derv(x, y)))
  }
}

#[test]
fn step_count_truncates() {
  assert_eq!(step_count(0.2, 1.0), Ok(5));
  assert_eq!(step_count(0.3, 1.0), Ok(3));
  assert_eq!(step_count(0.4f32, 1.0), Ok(2));
  assert_eq!(step_count(-0.25, -1.0), Ok(4));
}

#[test]
fn step_count_negative_quotient_is_empty() {
  assert_eq!(step_count(0.1, -1.0), Ok(0));
  assert_eq!(step_count(-0.1, 0.35), Ok(0));
  assert_eq!(step_count(0.5, 0.0), Ok(0));
}

#[test]
fn step_count_rejects_zero_step() {
  assert_eq!(step_count(0.0, 1.0), Err(IntegrationError::InvalidStep));
  assert_eq!(step_count(-0.0, 1.0), Err(IntegrationError::InvalidStep));
}

#[test]
fn step_count_rejects_unbounded() {
  assert!(matches!(
    step_count(std::f64::NAN, 1.0),
    Err(IntegrationError::UnboundedStepCount { .. })
  ));
  assert!(matches!(
    step_count(1.0, std::f64::INFINITY),
    Err(IntegrationError::UnboundedStepCount { .. })
  ));
  assert!(matches!(
    step_count(1e-300, 1e300),
    Err(IntegrationError::UnboundedStepCount { .. })
  ));
}
