use crate::ode::{Integrator, NullSettings, Point, Scalar};

pub type EulerSettings = NullSettings;

#[derive(Clone, Copy, Debug, Default)]
pub struct Euler;

impl Integrator for Euler {
  type Settings = EulerSettings;

  fn new(_: Self::Settings) -> Self {
    Self
  }

  fn name(&self) -> &'static str {
    "euler"
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
    let dydx = derv(point.x, point.y)?;

    Ok(point.y + *delta_x * dydx)
  }
}

#[cfg(test)]
use crate::assert_float_eq;

#[test]
fn euler_single_step() {
  let mut euler = Euler::new(EulerSettings {});
  let mut derv = |_: f64, y: f64| Ok::<_, ()>(y * y);

  let y = euler
    .step_internal(&mut derv, &Point::new(0.0, 1.0), &0.2)
    .unwrap();

  assert_float_eq!(y, 1.2);
}

#[test]
fn euler_square_problem() {
  let trajectory = Euler::new(EulerSettings {})
    .integrate(Point::new(0.0, 1.0), 0.5, 1.0, |_, y: f64| y * y)
    .unwrap();

  // 1 + 0.5 * 1 = 1.5, then 1.5 + 0.5 * 2.25 = 2.625
  assert_eq!(trajectory.len(), 3);
  assert_float_eq!(trajectory[1].y, 1.5);
  assert_float_eq!(trajectory[2].y, 2.625);
  assert_float_eq!(trajectory[2].x, 1.0);
}

#[test]
fn euler_uses_current_x() {
  let mut seen = Vec::new();
  Euler::new(EulerSettings {})
    .integrate(Point::new(1.0, 0.0), 0.25, 1.5, |x: f64, _| {
      seen.push(x);
      x
    })
    .unwrap();

  assert_eq!(seen, vec![1.0, 1.25, 1.5, 1.75, 2.0, 2.25]);
}
