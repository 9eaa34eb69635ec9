use alga::general::{RealField, SupersetOf};
use std::fmt::{Debug, Display};

/// Floating point type the integrators are generic over.
pub trait Scalar:
  RealField + From<f32> + SupersetOf<f64> + Debug + Display + Send + Sync
{
}

impl<T> Scalar for T where
  T: RealField + From<f32> + SupersetOf<f64> + Debug + Display + Send + Sync
{
}
