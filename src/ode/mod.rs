pub mod error;
pub mod euler;
pub mod improved_euler;
pub mod integrator;
pub mod model;
pub mod null_settings;
pub mod point;
pub mod rk4;
pub mod swappable_integrator;

pub use error::IntegrationError;
pub use euler::{Euler, EulerSettings};
pub use improved_euler::{ImprovedEuler, ImprovedEulerSettings};
pub use integrator::{step_count, Integrator};
pub use model::Scalar;
pub use null_settings::NullSettings;
pub use point::{Point, Trajectory};
pub use rk4::{RK4Settings, RK4};
pub use swappable_integrator::{IntegratorType, SwappableIntegrator};
