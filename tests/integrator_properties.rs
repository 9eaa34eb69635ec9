use ode_methods::ode::{
  Euler, EulerSettings, ImprovedEuler, ImprovedEulerSettings,
  IntegrationError, Integrator, IntegratorType, Point, RK4Settings,
  SwappableIntegrator, Trajectory, RK4,
};
use proptest::prelude::*;

fn square(_: f64, y: f64) -> f64 {
  y * y
}

fn square_exact(x: f64) -> f64 {
  1.0 / (1.0 - x)
}

fn run(
  integrator_type: &IntegratorType,
  initial: Point<f64>,
  delta_x: f64,
  target: f64,
  derv: impl FnMut(f64, f64) -> f64,
) -> Result<Trajectory<f64>, IntegrationError> {
  SwappableIntegrator::new(integrator_type.clone())
    .integrate(initial, delta_x, target, derv)
}

fn final_error(integrator_type: &IntegratorType, delta_x: f64, target: f64) -> f64 {
  let last = run(integrator_type, Point::new(0.0, 1.0), delta_x, target, square)
    .unwrap()
    .last();

  (last.y - square_exact(last.x)).abs()
}

#[test]
fn matches_reference_values() {
  let initial = Point::new(0.0, 1.0);

  let euler = Euler::new(EulerSettings {})
    .integrate(initial, 0.2, 1.0, square)
    .unwrap();
  let improved = ImprovedEuler::new(ImprovedEulerSettings {})
    .integrate(initial, 0.2, 1.0, square)
    .unwrap();
  let rk4 = RK4::new(RK4Settings {})
    .integrate(initial, 0.2, 1.0, square)
    .unwrap();

  assert_eq!(
    euler.ys(),
    vec![1.0, 1.2, 1.488, 1.9308288, 2.676448770981888, 4.109124375719979]
  );
  assert_eq!(
    improved.ys(),
    vec![
      1.0,
      1.244,
      1.640092062045184,
      2.3834822217946354,
      4.190395506583801,
      11.878846222488523
    ]
  );
  assert_eq!(
    rk4.ys(),
    vec![
      1.0,
      1.2499701421371747,
      1.6664730685304812,
      2.4984285292178363,
      4.965008042275121,
      41.01625818812066
    ]
  );
}

#[test]
fn constant_slope_is_exact_for_all_methods() {
  let expected = vec![
    Point::new(0.0, 0.0),
    Point::new(0.5, 0.5),
    Point::new(1.0, 1.0),
  ];

  for integrator_type in IntegratorType::all() {
    let trajectory =
      run(&integrator_type, Point::new(0.0, 0.0), 0.5, 1.0, |_, _| 1.0)
        .unwrap();

    assert_eq!(trajectory.points(), &expected[..]);
  }
}

#[test]
fn zero_step_is_rejected() {
  for integrator_type in IntegratorType::all() {
    let mut calls = 0;
    let result = run(&integrator_type, Point::new(0.0, 1.0), 0.0, 1.0, |_, y| {
      calls += 1;
      y
    });

    assert_eq!(result, Err(IntegrationError::InvalidStep));
    assert_eq!(calls, 0);
  }
}

#[test]
fn oversized_step_count_is_rejected() {
  for integrator_type in IntegratorType::all() {
    let mut calls = 0;
    let result = run(&integrator_type, Point::new(0.0, 1.0), 1e-18, 1.0, |_, y| {
      calls += 1;
      y
    });

    assert!(matches!(
      result,
      Err(IntegrationError::UnboundedStepCount { .. })
    ));
    assert_eq!(calls, 0);
  }
}

#[test]
fn negative_quotient_keeps_only_initial_point() {
  for integrator_type in IntegratorType::all() {
    let trajectory =
      run(&integrator_type, Point::new(0.0, 1.0), 0.1, -1.0, square).unwrap();

    assert_eq!(trajectory.points(), &[Point::new(0.0, 1.0)]);
  }
}

#[test]
fn higher_order_methods_are_more_accurate() {
  let [euler, improved, rk4] = [
    IntegratorType::Euler(EulerSettings {}),
    IntegratorType::ImprovedEuler(ImprovedEulerSettings {}),
    IntegratorType::RK4(RK4Settings {}),
  ];

  for &delta_x in &[0.2, 0.1, 0.05] {
    let euler_error = final_error(&euler, delta_x, 0.8);
    let improved_error = final_error(&improved, delta_x, 0.8);
    let rk4_error = final_error(&rk4, delta_x, 0.8);

    assert!(
      rk4_error < improved_error && improved_error < euler_error,
      "delta_x = {}: {} {} {}",
      delta_x,
      euler_error,
      improved_error,
      rk4_error
    );
  }
}

#[test]
fn halving_step_reduces_error() {
  for integrator_type in IntegratorType::all() {
    let errors: Vec<f64> = [0.25, 0.125, 0.0625, 0.03125]
      .iter()
      .map(|&delta_x| final_error(&integrator_type, delta_x, 0.75))
      .collect();

    for pair in errors.windows(2) {
      assert!(pair[1] < pair[0], "{:?}: {:?}", integrator_type, errors);
    }
  }
}

#[derive(Debug)]
enum DerivativeError {
  Integration(IntegrationError),
  Singular { x: f64 },
}

impl From<IntegrationError> for DerivativeError {
  fn from(err: IntegrationError) -> Self {
    DerivativeError::Integration(err)
  }
}

#[test]
fn derivative_error_aborts_run() {
  for integrator_type in IntegratorType::all() {
    let mut calls = 0;
    let result: Result<_, DerivativeError> =
      SwappableIntegrator::new(integrator_type.clone()).try_integrate(
        Point::new(0.0, 1.0),
        0.25,
        2.0,
        |x: f64, y: f64| {
          calls += 1;
          if x >= 1.0 {
            Err(DerivativeError::Singular { x })
          } else {
            Ok(y * y)
          }
        },
      );

    match result {
      Err(DerivativeError::Singular { x }) => assert!(x >= 1.0),
      other => panic!("{:?}: unexpected {:?}", integrator_type, other),
    }
    assert!(calls < 8 * integrator_type.stages());
  }
}

#[test]
fn zero_step_reported_through_caller_error() {
  let result: Result<_, DerivativeError> = RK4::new(RK4Settings {})
    .try_integrate(Point::new(0.0, 1.0), 0.0, 1.0, |_, y: f64| Ok(y));

  assert!(matches!(
    result,
    Err(DerivativeError::Integration(IntegrationError::InvalidStep))
  ));
}

#[test]
fn non_finite_values_pass_through() {
  for integrator_type in IntegratorType::all() {
    let trajectory = run(&integrator_type, Point::new(0.0, 1.0), 0.5, 1.0, |_, _| {
      std::f64::NAN
    })
    .unwrap();

    assert_eq!(trajectory.len(), 3);
    assert!(trajectory[1].y.is_nan());
    assert!(trajectory[2].y.is_nan());
  }
}

proptest! {
#[test]
fn trajectory_shape(
  method in 0usize..3,
  x_0 in -5.0f64..5.0,
  y_0 in -5.0f64..5.0,
  delta_x in prop_oneof![-1.0f64..-0.01, 0.01f64..1.0],
  target in -10.0f64..10.0,
) {
  let integrator_type = IntegratorType::all().swap_remove(method);
  let initial = Point::new(x_0, y_0);
  let derv = |x: f64, y: f64| (x - y).sin();

  let trajectory = run(&integrator_type, initial, delta_x, target, derv).unwrap();
  let again = run(&integrator_type, initial, delta_x, target, derv).unwrap();

  let steps = (target / delta_x).trunc().max(0.0) as usize;
  prop_assert_eq!(trajectory.len(), steps + 1);
  prop_assert_eq!(trajectory.first(), initial);
  prop_assert_eq!(&trajectory, &again);

  for pair in trajectory.points().windows(2) {
    prop_assert!((pair[1].x - pair[0].x) * delta_x.signum() > 0.0);
  }
}
}
