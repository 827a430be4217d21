//! Deterministic 3D gradient noise.
//!
//! Classic improved Perlin noise over a seeded permutation table: quintic
//! fade, hashed gradient selection, trilinear interpolation across the unit
//! lattice. The table tiles with period 256, so the field is defined over
//! all of R^3.
//!
//! # Example
//!
//! ```
//! use curlshell::NoiseField;
//!
//! let field = NoiseField::new(42);
//! let v = field.noise3(0.4, 1.7, -2.3);
//! assert!(v.abs() <= 1.2);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Smooth, deterministic scalar noise field.
///
/// Immutable after construction; two fields built from the same seed return
/// identical values for every input. Output is roughly in [-1, 1] and is
/// exactly zero at integer lattice coordinates.
///
/// Values must be finite; NaN or infinite inputs are the caller's problem.
pub struct NoiseField {
    /// Doubled permutation table so lattice hashing never wraps mid-lookup.
    perm: [u8; 512],
}

impl NoiseField {
    /// Build a field from a seed by Fisher-Yates shuffling the 0..=255
    /// table.
    pub fn new(seed: u64) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = SmallRng::seed_from_u64(seed);
        for i in (1..table.len()).rev() {
            let j = rng.gen_range(0..=i);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Sample the field at a point.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, x) = split(x);
        let (yi, y) = split(y);
        let (zi, z) = split(z);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

/// Lattice cell (wrapped to the table period) and fractional offset.
#[inline]
fn split(v: f64) -> (usize, f64) {
    let floor = v.floor();
    ((floor as i64 & 255) as usize, v - floor)
}

/// Quintic smoothstep: zero first and second derivative at the lattice.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of the twelve edge gradients, picked by hash.
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_per_seed() {
        let a = NoiseField::new(7);
        let b = NoiseField::new(7);
        for i in 0..50 {
            let t = i as f64 * 0.37;
            assert_eq!(a.noise3(t, -t, t * 2.0), b.noise3(t, -t, t * 2.0));
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let mut any_diff = false;
        for i in 0..50 {
            let t = 0.5 + i as f64 * 0.73;
            if a.noise3(t, t, t) != b.noise3(t, t, t) {
                any_diff = true;
                break;
            }
        }
        assert!(any_diff, "different seeds should produce different fields");
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let field = NoiseField::new(99);
        for x in -3i32..4 {
            for y in -3i32..4 {
                assert!(field.noise3(x as f64, y as f64, 5.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_bounded_output() {
        let field = NoiseField::new(123);
        for i in 0..2000 {
            let t = i as f64 * 0.119;
            let v = field.noise3(t, t * 0.7 - 3.0, 11.0 - t * 0.3);
            assert!(v.abs() <= 1.2, "noise out of range: {}", v);
        }
    }

    #[test]
    fn test_smooth_over_small_offsets() {
        let field = NoiseField::new(5);
        for i in 0..200 {
            let t = 0.3 + i as f64 * 0.41;
            let a = field.noise3(t, 1.3, -0.8);
            let b = field.noise3(t + 1e-4, 1.3, -0.8);
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn test_tiles_at_table_period() {
        let field = NoiseField::new(31);
        let v = field.noise3(0.43, 1.21, 2.75);
        let w = field.noise3(0.43 + 256.0, 1.21 + 256.0, 2.75 - 256.0);
        assert!((v - w).abs() < 1e-9);
    }
}
