use crate::ode::IntegrationError;
use alga::general::RealField;
use std::ops::Index;
use std::slice::Iter;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S> {
  pub x: S,
  pub y: S,
}

impl<S> Point<S> {
  pub fn new(x: S, y: S) -> Self {
    Self { x, y }
  }
}

impl<S> From<(S, S)> for Point<S> {
  fn from((x, y): (S, S)) -> Self {
    Self { x, y }
  }
}

impl<S> From<Point<S>> for (S, S) {
  fn from(point: Point<S>) -> Self {
    (point.x, point.y)
  }
}

/// Samples of one integration run, in order of increasing step index.
///
/// Always holds at least the initial point.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<S> {
  points: Vec<Point<S>>,
}

impl<S: RealField> Trajectory<S> {
  /// Reserves room for `steps` more points up front, failing instead of
  /// aborting when that much memory cannot be had.
  pub(crate) fn with_initial(
    initial: Point<S>,
    steps: usize,
  ) -> Result<Self, IntegrationError> {
    let mut points = Vec::new();
    points
      .try_reserve_exact(steps.saturating_add(1))
      .map_err(|_| IntegrationError::UnboundedStepCount {
        quotient: steps as f64,
      })?;
    points.push(initial);

    Ok(Self { points })
  }

  pub(crate) fn push(&mut self, point: Point<S>) {
    self.points.push(point);
  }

  pub fn points(&self) -> &[Point<S>] {
    &self.points
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  // always false, the initial point is never removed
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn first(&self) -> Point<S> {
    self.points[0]
  }

  pub fn last(&self) -> Point<S> {
    self.points[self.points.len() - 1]
  }

  pub fn xs(&self) -> Vec<S> {
    self.points.iter().map(|p| p.x).collect()
  }

  pub fn ys(&self) -> Vec<S> {
    self.points.iter().map(|p| p.y).collect()
  }
}

impl<S> Index<usize> for Trajectory<S> {
  type Output = Point<S>;

  fn index(&self, idx: usize) -> &Self::Output {
    &self.points[idx]
  }
}

impl<'a, S> IntoIterator for &'a Trajectory<S> {
  type Item = &'a Point<S>;

  type IntoIter = Iter<'a, Point<S>>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.points.iter()
  }
}

#[cfg(test)]
use crate::assert_float_eq;

#[test]
fn trajectory_components() {
  let mut trajectory: Trajectory<f64> =
    Trajectory::with_initial(Point::new(0.0, 1.0), 2).unwrap();
  trajectory.push(Point::new(0.5, 2.0));
  trajectory.push((1.0, 4.0).into());

  assert_eq!(trajectory.len(), 3);
  assert_eq!(trajectory.xs(), vec![0.0, 0.5, 1.0]);
  assert_eq!(trajectory.ys(), vec![1.0, 2.0, 4.0]);
  assert_eq!(trajectory.first(), Point::new(0.0, 1.0));
  assert_float_eq!(trajectory.last().y, 4.0);
  assert_eq!(<(f64, f64)>::from(trajectory[1]), (0.5, 2.0));
}

#[test]
fn trajectory_refuses_unreservable_length() {
  assert!(matches!(
    Trajectory::with_initial(Point::new(0.0, 1.0), usize::MAX / 2),
    Err(IntegrationError::UnboundedStepCount { .. })
  ));
}
