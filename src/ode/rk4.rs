use crate::ode::{Integrator, NullSettings, Point, Scalar};

pub type RK4Settings = NullSettings;

#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
  type Settings = RK4Settings;

  fn new(_: Self::Settings) -> Self {
    Self
  }

  fn name(&self) -> &'static str {
    "rk4"
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
    let Point { x, y } = *point;

    let two: S = 2.0.into();
    let six: S = 6.0.into();
    let half_step = *delta_x / two;

    let k_1 = derv(x, y)?;
    let k_2 = derv(x + half_step, y + half_step * k_1)?;
    let k_3 = derv(x + half_step, y + half_step * k_2)?;
    let k_4 = derv(x + *delta_x, y + *delta_x * k_3)?;

    Ok(y + (*delta_x / six) * (k_1 + two * k_2 + two * k_3 + k_4))
  }
}

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use proptest::prelude::*;

#[test]
fn rk4_single_step_exponential() {
  let mut method = RK4::new(RK4Settings {});
  let mut derv = |_: f64, y: f64| Ok::<_, ()>(y);

  let h: f64 = 0.1;
  let y = method
    .step_internal(&mut derv, &Point::new(0.0, 1.0), &h)
    .unwrap();

  // one RK4 step of y' = y is the degree 4 Taylor polynomial of e^h
  let taylor = 1.0 + h + h * h / 2.0 + h.powi(3) / 6.0 + h.powi(4) / 24.0;
  assert_float_eq!(y, taylor);
}

#[test]
fn rk4_stage_points() {
  let mut calls = Vec::new();
  RK4::new(RK4Settings {})
    .integrate(Point::new(1.0, 2.0), 0.5, 0.5, |x: f64, y: f64| {
      calls.push((x, y));
      1.0
    })
    .unwrap();

  assert_eq!(calls, vec![(1.0, 2.0), (1.25, 2.25), (1.25, 2.25), (1.5, 2.5)]);
}

#[cfg(test)]
proptest! {
#[test]
fn rk4_exact_for_cubic_slope(
  a in -2.0f64..2.0,
  b in -2.0f64..2.0,
  c in -2.0f64..2.0,
  y0 in -10.0f64..10.0,
) {
  // Simpson's rule, which RK4 reduces to here, is exact for cubics
  let slope = |x: f64| a * x * x * x + b * x * x + c;
  let exact = |x: f64| y0 + a * x.powi(4) / 4.0 + b * x.powi(3) / 3.0 + c * x;

  let trajectory = RK4::new(RK4Settings {})
    .integrate(Point::new(0.0, y0), 0.125, 1.0, |x, _| slope(x))
    .unwrap();

  for point in &trajectory {
    assert_float_eq!(point.y, exact(point.x));
  }
}
}
