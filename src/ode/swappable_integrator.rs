use crate::ode::{
  Euler, EulerSettings, ImprovedEuler, ImprovedEulerSettings, Integrator,
  Point, RK4Settings, Scalar, RK4,
};
use clap::Subcommand;

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum IntegratorType {
  Euler(EulerSettings),
  ImprovedEuler(ImprovedEulerSettings),
  #[clap(name = "rk4")]
  RK4(RK4Settings),
}

impl IntegratorType {
  pub fn all() -> Vec<IntegratorType> {
    vec![
      IntegratorType::Euler(EulerSettings {}),
      IntegratorType::ImprovedEuler(ImprovedEulerSettings {}),
      IntegratorType::RK4(RK4Settings {}),
    ]
  }

  pub fn label(&self) -> &'static str {
    match self {
      IntegratorType::Euler(_) => "Euler's method",
      IntegratorType::ImprovedEuler(_) => "Euler's improved method",
      IntegratorType::RK4(_) => "Runge Kutta 4th order",
    }
  }

  /// Derivative evaluations per step.
  pub fn stages(&self) -> usize {
    match self {
      IntegratorType::Euler(_) => 1,
      IntegratorType::ImprovedEuler(_) => 2,
      IntegratorType::RK4(_) => 4,
    }
  }
}

pub enum SwappableIntegrator {
  Euler(Euler),
  ImprovedEuler(ImprovedEuler),
  RK4(RK4),
}

impl Integrator for SwappableIntegrator {
  type Settings = IntegratorType;

  fn new(t: IntegratorType) -> Self {
    match t {
      IntegratorType::Euler(settings) => Self::Euler(Euler::new(settings)),
      IntegratorType::ImprovedEuler(settings) => {
        Self::ImprovedEuler(ImprovedEuler::new(settings))
      }
      IntegratorType::RK4(settings) => Self::RK4(RK4::new(settings)),
    }
  }

  fn name(&self) -> &'static str {
    match self {
      Self::Euler(method) => method.name(),
      Self::ImprovedEuler(method) => method.name(),
      Self::RK4(method) => method.name(),
    }
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
    match self {
      Self::Euler(method) => method.step_internal(derv, point, delta_x),
      Self::ImprovedEuler(method) => {
        method.step_internal(derv, point, delta_x)
      }
      Self::RK4(method) => method.step_internal(derv, point, delta_x),
    }
  }
}

#[test]
fn swappable_matches_concrete() {
  let derv = |x: f64, y: f64| y * y - x;
  let initial = Point::new(0.0, 0.5);

  let euler = Euler::new(EulerSettings {})
    .integrate(initial, 0.1, 1.0, derv)
    .unwrap();
  let improved = ImprovedEuler::new(ImprovedEulerSettings {})
    .integrate(initial, 0.1, 1.0, derv)
    .unwrap();
  let rk4 = RK4::new(RK4Settings {})
    .integrate(initial, 0.1, 1.0, derv)
    .unwrap();

  for (integrator_type, expected) in
    IntegratorType::all().into_iter().zip(&[euler, improved, rk4])
  {
    let trajectory = SwappableIntegrator::new(integrator_type)
      .integrate(initial, 0.1, 1.0, derv)
      .unwrap();

    assert_eq!(&trajectory, expected);
  }
}

#[test]
fn stages_match_evaluations() {
  for integrator_type in IntegratorType::all() {
    let mut calls = 0;
    SwappableIntegrator::new(integrator_type.clone())
      .integrate(Point::new(0.0, 1.0), 0.25, 1.0, |_, y: f64| {
        calls += 1;
        y
      })
      .unwrap();

    assert_eq!(calls, 4 * integrator_type.stages());
  }
}
