use crate::ode::{
  IntegrationError, Integrator, IntegratorType, Point, Scalar,
  SwappableIntegrator, Trajectory,
};
use clap::ValueEnum;
use rayon::prelude::*;

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

/// Built in right hand sides with known closed form solutions.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Problem {
  /// dy/dx = y^2
  Square,
  /// dy/dx = y
  Exponential,
  /// dy/dx = 1
  Constant,
}

impl Problem {
  pub fn derivative<S: Scalar>(&self, _x: S, y: S) -> S {
    match self {
      Problem::Square => y * y,
      Problem::Exponential => y,
      Problem::Constant => 1.0.into(),
    }
  }

  /// Closed form y(x) through `initial`, or `None` once the solution has
  /// blown up.
  pub fn exact<S: Scalar>(&self, initial: Point<S>, x: S) -> Option<S> {
    let zero: S = 0.0.into();
    let one: S = 1.0.into();
    let Point { x: x_0, y: y_0 } = initial;

    match self {
      Problem::Square => {
        if y_0 == zero {
          return Some(zero);
        }
        let start = one / y_0;
        let remaining = start - (x - x_0);
        if remaining * start > zero {
          Some(one / remaining)
        } else {
          None
        }
      }
      Problem::Exponential => Some(y_0 * (x - x_0).exp()),
      Problem::Constant => Some(y_0 + (x - x_0)),
    }
  }
}

#[derive(Clone, Debug)]
pub struct ComparisonParams<S> {
  pub problem: Problem,
  pub initial: Point<S>,
  pub target: S,
  pub step_sizes: Vec<S>,
  pub methods: Vec<IntegratorType>,
}

impl Default for ComparisonParams<f64> {
  fn default() -> Self {
    Self {
      problem: Problem::Square,
      initial: Point::new(0.0, 1.0),
      target: 1.0,
      step_sizes: vec![0.2, 0.1, 0.05],
      methods: IntegratorType::all(),
    }
  }
}

/// x and y components of one trajectory, ready to be drawn as a curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Series<S> {
  pub label: &'static str,
  pub delta_x: S,
  pub xs: Vec<S>,
  pub ys: Vec<S>,
}

#[derive(Clone, Debug)]
pub struct Run<S> {
  pub method: IntegratorType,
  pub delta_x: S,
  pub trajectory: Trajectory<S>,
  exact_final: Option<S>,
}

impl<S: Scalar> Run<S> {
  /// Absolute error of the last sample against the closed form.
  pub fn final_error(&self) -> Option<S> {
    self
      .exact_final
      .map(|exact| (self.trajectory.last().y - exact).abs())
  }

  pub fn series(&self) -> Series<S> {
    Series {
      label: self.method.label(),
      delta_x: self.delta_x,
      xs: self.trajectory.xs(),
      ys: self.trajectory.ys(),
    }
  }
}

/// Integrates `params.problem` with every method at every step size.
///
/// Runs are computed in parallel and returned ordered by step size, then by
/// method. `on_done` is called once per finished run, from whichever thread
/// finished it.
pub fn run_comparison<S, C>(
  params: &ComparisonParams<S>,
  on_done: C,
) -> Result<Vec<Run<S>>, IntegrationError>
where
  S: Scalar,
  C: Fn(&Run<S>) + Sync,
{
  let problem = params.problem;

  let jobs: Vec<(S, IntegratorType)> = params
    .step_sizes
    .iter()
    .flat_map(|delta_x| {
      params
        .methods
        .iter()
        .map(move |method| (*delta_x, method.clone()))
    })
    .collect();

  jobs
    .into_par_iter()
    .map(|(delta_x, method)| -> Result<Run<S>, IntegrationError> {
      let trajectory = SwappableIntegrator::new(method.clone()).integrate(
        params.initial,
        delta_x,
        params.target,
        |x, y| problem.derivative(x, y),
      )?;

      let exact_final = problem.exact(params.initial, trajectory.last().x);

      let run = Run {
        method,
        delta_x,
        trajectory,
        exact_final,
      };
      on_done(&run);

      Ok(run)
    })
    .collect()
}

#[test]
fn square_exact_blows_up() {
  let initial: Point<f64> = Point::new(0.0, 1.0);

  assert_float_eq!(Problem::Square.exact(initial, 0.5).unwrap(), 2.0);
  assert_float_eq!(Problem::Square.exact(initial, 0.9).unwrap(), 10.0);
  assert_eq!(Problem::Square.exact(initial, 1.0), None);
  assert_eq!(Problem::Square.exact(initial, 1.5), None);
  assert_eq!(Problem::Square.exact(Point::new(0.0, 0.0), 7.0), Some(0.0));
}

#[test]
fn default_comparison_layout() {
  let params = ComparisonParams::default();
  let runs = run_comparison(&params, |_| {}).unwrap();

  assert_eq!(runs.len(), 9);
  for (run, (delta_x, method)) in runs.iter().zip(
    [0.2, 0.1, 0.05]
      .iter()
      .flat_map(|dx| IntegratorType::all().into_iter().map(move |m| (*dx, m))),
  ) {
    assert_eq!(run.delta_x, delta_x);
    assert_eq!(run.method, method);
    assert_eq!(run.trajectory.first(), params.initial);
    assert_eq!(run.trajectory.len(), run.trajectory.xs().len());
  }
}

#[test]
fn on_done_sees_every_run() {
  use std::sync::atomic::{AtomicUsize, Ordering};

  let params = ComparisonParams {
    target: 0.8,
    ..ComparisonParams::default()
  };
  let done = AtomicUsize::new(0);
  let runs = run_comparison(&params, |_| {
    done.fetch_add(1, Ordering::SeqCst);
  })
  .unwrap();

  assert_eq!(done.load(Ordering::SeqCst), runs.len());
}

#[test]
fn comparison_propagates_invalid_step() {
  let params = ComparisonParams {
    step_sizes: vec![0.1, 0.0],
    ..ComparisonParams::default()
  };

  assert_eq!(
    run_comparison(&params, |_| {}).unwrap_err(),
    IntegrationError::InvalidStep
  );
}

#[test]
fn series_components() {
  let params = ComparisonParams {
    problem: Problem::Constant,
    initial: Point::new(0.0, 0.0),
    step_sizes: vec![0.5],
    ..ComparisonParams::default()
  };
  let runs = run_comparison(&params, |_| {}).unwrap();

  for run in &runs {
    let series = run.series();
    assert_eq!(series.label, run.method.label());
    assert_eq!(series.xs, vec![0.0, 0.5, 1.0]);
    assert_eq!(series.ys, vec![0.0, 0.5, 1.0]);
    assert_eq!(run.final_error(), Some(0.0));
  }
}

#[cfg(test)]
proptest! {
#[test]
fn higher_order_is_more_accurate(
  problem : Problem,
  y_0 in 0.2f64..0.9,
  target in 0.3f64..0.6,
) {
  let params = ComparisonParams {
    problem,
    initial: Point::new(0.0, y_0),
    target,
    step_sizes: vec![0.05],
    methods: IntegratorType::all(),
  };
  let runs = run_comparison(&params, |_| {}).unwrap();
  let errors: Vec<f64> =
    runs.iter().map(|run| run.final_error().unwrap()).collect();

  if problem == Problem::Constant {
    for error in errors {
      assert_float_eq!(error, 0.0);
    }
  } else {
    prop_assert!(errors[2] < errors[1]);
    prop_assert!(errors[1] < errors[0]);
  }
}
}
