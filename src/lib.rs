//! Bead on a circular wire, simulated two ways and compared.
//!
//! - **math**: `Vector2` with in-place arithmetic
//! - **bead**: constrained integrator (step, project onto the wire, fix velocity)
//! - **analytic**: pendulum integrator on angle and angular velocity
//! - **state**: `PhysicsScene` holding the wire, gravity and both beads
//! - **config**: command line arguments and validated scene parameters
//! - **graphics** / **widget**: terminal rendering and the interactive loop

pub mod analytic;
pub mod bead;
pub mod config;
pub mod error;
pub mod graphics;
pub mod math;
pub mod state;
pub mod widget;

pub use analytic::AnalyticBead;
pub use bead::Bead;
pub use config::{Args, SceneConfig};
pub use error::{Error, Result};
pub use math::Vector2;
pub use state::{PhysicsScene, Readout};
