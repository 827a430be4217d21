//! Seeded helpers for initial particle placement.

use glam::DVec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Deterministic spawn helper.
///
/// One context drives an entire placement pass, so a given seed always
/// produces the same cloud.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f64 in [0, 1).
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Random f64 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// Random point on the surface of a sphere, uniform in area.
    ///
    /// The polar angle comes from `acos(2u - 1)`, the inverse-CDF form. A
    /// uniform angle in [0, pi] would crowd samples toward the poles.
    pub fn uniform_on_sphere(&mut self, radius: f64) -> DVec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = (2.0 * self.rng.gen::<f64>() - 1.0).acos();

        DVec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_sphere_radius_exact() {
        let mut ctx = SpawnContext::new(0);
        for _ in 0..200 {
            let p = ctx.uniform_on_sphere(1.5);
            assert!((p.length() - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let mut a = SpawnContext::new(77);
        let mut b = SpawnContext::new(77);
        for _ in 0..50 {
            assert_eq!(a.uniform_on_sphere(1.0), b.uniform_on_sphere(1.0));
        }
    }

    /// z/r of a uniform-area sample is uniform on [-1, 1]; a naive uniform
    /// polar angle fails this by a wide margin at the poles.
    #[test]
    fn test_z_over_r_uniform() {
        let mut ctx = SpawnContext::new(3);
        let n = 10_000;
        let mut bins = [0u32; 10];
        for _ in 0..n {
            let p = ctx.uniform_on_sphere(2.0);
            let t = (p.z / 2.0 + 1.0) / 2.0; // [0, 1)
            let idx = ((t * 10.0) as usize).min(9);
            bins[idx] += 1;
        }
        let expected = n as f64 / 10.0;
        for (i, &count) in bins.iter().enumerate() {
            let dev = (count as f64 - expected).abs() / expected;
            assert!(dev < 0.15, "bin {} off by {:.1}%", i, dev * 100.0);
        }
    }
}
