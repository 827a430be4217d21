//! Host-facing configuration.
//!
//! All values are fixed before the simulation is built; nothing here is
//! hot-reloadable.

/// Configuration for a [`ShellSim`](crate::ShellSim).
///
/// Defaults give the stock look: 30 000 particles on a shell of radius
/// 1.5, advancing 0.005 per frame.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Number of particles, fixed for the life of the simulation.
    pub particle_count: u32,
    /// Rest radius of the shell.
    pub base_radius: f64,
    /// Per-frame time increment.
    pub time_step: f64,
    /// Scale applied to the curl velocity before the Euler step.
    pub step_scale: f64,
    /// Amplitude of the radial shell perturbation.
    pub offset_scale: f64,
    /// Finite-difference step for curl derivatives.
    pub epsilon: f64,
    /// Seed for the noise permutation table and initial placement.
    pub seed: u64,
}

impl ShellConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the rest radius of the shell.
    pub fn with_base_radius(mut self, radius: f64) -> Self {
        self.base_radius = radius;
        self
    }

    /// Set the per-frame time increment.
    pub fn with_time_step(mut self, dt: f64) -> Self {
        self.time_step = dt;
        self
    }

    /// Set the curl velocity scale.
    pub fn with_step_scale(mut self, scale: f64) -> Self {
        self.step_scale = scale;
        self
    }

    /// Set the radial perturbation amplitude.
    pub fn with_offset_scale(mut self, scale: f64) -> Self {
        self.offset_scale = scale;
        self
    }

    /// Set the finite-difference step for curl derivatives.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Set the seed for the noise table and initial placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            particle_count: 30_000,
            base_radius: 1.5,
            time_step: 0.005,
            step_scale: 0.02,
            offset_scale: 0.3,
            epsilon: 1e-4,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.particle_count, 30_000);
        assert_eq!(config.base_radius, 1.5);
        assert_eq!(config.time_step, 0.005);
        assert_eq!(config.step_scale, 0.02);
        assert_eq!(config.offset_scale, 0.3);
        assert_eq!(config.epsilon, 1e-4);
    }

    #[test]
    fn test_builder_chain() {
        let config = ShellConfig::default()
            .with_particle_count(100)
            .with_base_radius(2.0)
            .with_seed(9);
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.base_radius, 2.0);
        assert_eq!(config.seed, 9);
    }
}
