//! Shell simulation state and the per-frame update.

use glam::DVec3;

use crate::config::ShellConfig;
use crate::curl::CurlField;
use crate::noise::NoiseField;
use crate::spawn::SpawnContext;
use crate::time::SimClock;

/// Angular frequency of the radial perturbation over the unit direction.
const RADIAL_FREQUENCY: f64 = 5.0;
/// How fast the radial perturbation pattern drifts with time.
const RADIAL_DRIFT: f64 = 2.0;

/// Placement draws from its own RNG stream so it never aliases the noise
/// table shuffle.
const SPAWN_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// A cloud of particles swirling on a noise-deformed spherical shell.
///
/// Owns the noise field, the particle positions, the clock, and the
/// published flat buffer. The per-frame cycle in [`step`](Self::step):
/// advance time, advect every particle along the curl field, re-project
/// onto the perturbed shell, publish.
///
/// Particles are index-stable: slot `i` refers to the same logical
/// particle for the life of the simulation.
pub struct ShellSim {
    config: ShellConfig,
    noise: NoiseField,
    clock: SimClock,
    particles: Vec<DVec3>,
    positions: Vec<f32>,
}

impl ShellSim {
    /// Build a simulation with particles placed uniformly on the rest
    /// sphere.
    pub fn new(config: ShellConfig) -> Self {
        let mut spawn = SpawnContext::new(config.seed ^ SPAWN_STREAM);
        let particles: Vec<DVec3> = (0..config.particle_count)
            .map(|_| spawn.uniform_on_sphere(config.base_radius))
            .collect();
        Self::from_positions(config, particles)
    }

    /// Build a simulation from explicit starting positions.
    ///
    /// The length of `particles` overrides `config.particle_count`. Useful
    /// for hosts that want their own placement; [`new`](Self::new) is the
    /// uniform-shell default.
    pub fn from_positions(mut config: ShellConfig, particles: Vec<DVec3>) -> Self {
        config.particle_count = particles.len() as u32;
        let mut sim = Self {
            noise: NoiseField::new(config.seed),
            clock: SimClock::new(config.time_step),
            positions: vec![0.0; particles.len() * 3],
            particles,
            config,
        };
        sim.publish();
        sim
    }

    /// Advance one frame.
    ///
    /// The curl field is sampled at each particle's position shifted by
    /// the current time along all three axes, which is what slides the
    /// whole flow pattern through noise space and animates it. The
    /// curl-driven Euler step supplies tangential motion only; the radial
    /// component is overridden every frame by re-projection onto the
    /// perturbed shell, so particles can neither drift off nor collapse
    /// inward.
    pub fn step(&mut self) {
        let time = self.clock.advance();
        let curl = CurlField::new(&self.noise, self.config.epsilon);
        let drift = DVec3::splat(time);

        for p in &mut self.particles {
            let velocity = curl.curl(*p + drift) * self.config.step_scale;
            let moved = *p + velocity;

            // Normalize is undefined at the exact origin. Particles never
            // reach it under this flow (the shell keeps |p| near
            // base_radius), so the case is left unguarded.
            let dir = moved.normalize();

            let radial = self.noise.noise3(
                dir.x * RADIAL_FREQUENCY + time * RADIAL_DRIFT,
                dir.y * RADIAL_FREQUENCY + time * RADIAL_DRIFT,
                dir.z * RADIAL_FREQUENCY + time * RADIAL_DRIFT,
            ) * self.config.offset_scale;

            *p = dir * (self.config.base_radius + radial);
        }

        self.publish();
    }

    /// Rewrite the flat f32 view from the particle array.
    fn publish(&mut self) {
        for (dst, p) in self.positions.chunks_exact_mut(3).zip(&self.particles) {
            dst[0] = p.x as f32;
            dst[1] = p.y as f32;
            dst[2] = p.z as f32;
        }
    }

    /// Flat x,y,z-interleaved positions, refreshed by every [`step`](Self::step).
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Full-precision particle positions.
    #[inline]
    pub fn particles(&self) -> &[DVec3] {
        &self.particles
    }

    /// The radial offset the shell imposes at unit direction `dir` for the
    /// current time. After a `step`, every particle satisfies
    /// `|p| == base_radius + radial_offset(p / |p|)` up to float rounding.
    pub fn radial_offset(&self, dir: DVec3) -> f64 {
        let time = self.clock.time();
        self.noise.noise3(
            dir.x * RADIAL_FREQUENCY + time * RADIAL_DRIFT,
            dir.y * RADIAL_FREQUENCY + time * RADIAL_DRIFT,
            dir.z * RADIAL_FREQUENCY + time * RADIAL_DRIFT,
        ) * self.config.offset_scale
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    #[inline]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ShellConfig {
        ShellConfig::default().with_particle_count(64)
    }

    #[test]
    fn test_initial_placement_on_rest_sphere() {
        let sim = ShellSim::new(small_config());
        for p in sim.particles() {
            assert!((p.length() - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_published_buffer_mirrors_particles() {
        let mut sim = ShellSim::new(small_config());
        sim.step();
        assert_eq!(sim.positions().len(), 64 * 3);
        for (i, p) in sim.particles().iter().enumerate() {
            assert_eq!(sim.positions()[i * 3], p.x as f32);
            assert_eq!(sim.positions()[i * 3 + 1], p.y as f32);
            assert_eq!(sim.positions()[i * 3 + 2], p.z as f32);
        }
    }

    #[test]
    fn test_shell_invariant_after_steps() {
        let mut sim = ShellSim::new(small_config());
        for _ in 0..20 {
            sim.step();
        }
        for p in sim.particles() {
            let r = p.length();
            assert!(r > 1.5 - 0.3 - 1e-9 && r < 1.5 + 0.3 + 1e-9);
            let expected = 1.5 + sim.radial_offset(*p / r);
            assert!((r - expected).abs() < 1e-9, "r={} expected={}", r, expected);
        }
    }

    #[test]
    fn test_clock_advances_per_step() {
        let mut sim = ShellSim::new(small_config());
        sim.step();
        sim.step();
        assert_eq!(sim.frame(), 2);
        assert!((sim.time() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_from_positions_overrides_count() {
        let sim = ShellSim::from_positions(
            ShellConfig::default().with_particle_count(999),
            vec![DVec3::new(1.5, 0.0, 0.0); 3],
        );
        assert_eq!(sim.config().particle_count, 3);
        assert_eq!(sim.positions().len(), 9);
    }
}
