//! # curlshell
//!
//! A cloud of particles swirling over a breathing spherical shell.
//!
//! The simulation derives a divergence-free velocity field from seeded
//! gradient noise (curl noise), advects every particle along it, and
//! re-projects each one onto a noise-perturbed sphere radius every frame.
//! The curl supplies turbulent tangential motion; the re-projection keeps
//! the cloud a stable, organically deforming shell.
//!
//! ## Quick Start
//!
//! ```no_run
//! use curlshell::{run, ShellConfig};
//!
//! fn main() -> Result<(), curlshell::error::RunError> {
//!     run(ShellConfig::default()
//!         .with_particle_count(30_000)
//!         .with_base_radius(1.5))
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Simulation core
//!
//! [`ShellSim`] owns the particles, the noise field, and the clock. It has
//! exactly one mutating operation, [`ShellSim::step`], which runs the
//! per-frame cycle and refreshes the flat position buffer returned by
//! [`ShellSim::positions`]. The core is a pure numeric pipeline: no I/O,
//! no failure modes, fully deterministic for a given [`ShellConfig`].
//!
//! ### Render bridge
//!
//! [`run`] opens a window, steps the simulation once per redraw, uploads
//! the published buffer, and draws each particle as a soft point sprite.
//! Headless hosts can skip it entirely and drive [`ShellSim::step`]
//! themselves:
//!
//! ```
//! use curlshell::{ShellConfig, ShellSim};
//!
//! let mut sim = ShellSim::new(ShellConfig::default().with_particle_count(100));
//! sim.step();
//! assert_eq!(sim.positions().len(), 300);
//! ```
//!
//! ### Determinism
//!
//! Everything random flows from `ShellConfig::seed`: the noise permutation
//! table and the initial placement. Two simulations with the same config
//! publish bit-identical buffers frame for frame.
//!
//! ## Known limits
//!
//! The time accumulator grows without bound and slowly loses float
//! precision on very long runs; normalizing a particle at the exact origin
//! is undefined (unreachable under this flow). Neither is guarded.

mod config;
mod curl;
pub mod error;
mod gpu;
mod noise;
mod shader;
mod sim;
mod spawn;
pub mod time;
mod window;

pub use config::ShellConfig;
pub use curl::CurlField;
pub use glam::{DVec3, Vec3};
pub use noise::NoiseField;
pub use sim::ShellSim;
pub use spawn::SpawnContext;
pub use window::run;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::ShellConfig;
    pub use crate::curl::CurlField;
    pub use crate::noise::NoiseField;
    pub use crate::sim::ShellSim;
    pub use crate::spawn::SpawnContext;
    pub use crate::time::SimClock;
    pub use crate::window::run;
    pub use crate::{DVec3, Vec3};
}
