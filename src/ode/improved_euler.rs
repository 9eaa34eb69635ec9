use crate::ode::{Integrator, NullSettings, Point, Scalar};

pub type ImprovedEulerSettings = NullSettings;

/// Heun's method: an Euler predictor followed by a trapezoidal corrector.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImprovedEuler;

impl Integrator for ImprovedEuler {
  type Settings = ImprovedEulerSettings;

  fn new(_: Self::Settings) -> Self {
    Self
  }

  fn name(&self) -> &'static str {
    "improved-euler"
  }

  fn step_internal<S, E, F>(
    &mut self,
    derv: &mut F,
    point: &Point<S>,
    delta_x: &S,
  ) -> Result<S, E>
  where
    S: Scalar,
    F: FnMut(S, S) -> Result<S, E>,
  {
    let k_0 = derv(point.x, point.y)?;

    let predicted_y = point.y + k_0 * *delta_x;
    let predicted_x = point.x + *delta_x;

    let k_1 = derv(predicted_x, predicted_y)?;

    let two: S = 2.0.into();

    Ok(point.y + *delta_x * (k_0 + k_1) / two)
  }
}

#[cfg(test)]
use crate::assert_float_eq;

#[test]
fn improved_euler_single_step() {
  let mut method = ImprovedEuler::new(ImprovedEulerSettings {});
  let mut derv = |_: f64, y: f64| Ok::<_, ()>(y * y);

  // predictor 1.2, corrector slope 1.44
  let y = method
    .step_internal(&mut derv, &Point::new(0.0, 1.0), &0.2)
    .unwrap();

  assert_float_eq!(y, 1.0 + 0.2 * (1.0 + 1.44) / 2.0);
}

#[test]
fn improved_euler_evaluates_twice_per_step() {
  let mut calls = Vec::new();
  let trajectory = ImprovedEuler::new(ImprovedEulerSettings {})
    .integrate(Point::new(0.0, 1.0), 0.5, 1.0, |x: f64, y: f64| {
      calls.push((x, y));
      y
    })
    .unwrap();

  assert_eq!(trajectory.len(), 3);
  assert_eq!(calls.len(), 4);
  assert_eq!(calls[0], (0.0, 1.0));
  assert_eq!(calls[1], (0.5, 1.5));
  assert_eq!(calls[2], (0.5, trajectory[1].y));
}

#[test]
fn improved_euler_exact_for_linear_slope() {
  // trapezoid rule integrates dy/dx = x exactly
  let trajectory = ImprovedEuler::new(ImprovedEulerSettings {})
    .integrate(Point::new(0.0, 0.0), 0.25, 2.0, |x: f64, _| x)
    .unwrap();

  for point in &trajectory {
    assert_float_eq!(point.y, 0.5 * point.x * point.x);
  }
}
