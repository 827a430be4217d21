//! Divergence-free velocity field derived from scalar noise.
//!
//! Three decorrelated noise channels form a vector field; taking its curl
//! by central differences yields a flow with (numerically) zero divergence.
//! Particles carried by it swirl instead of piling up at sinks, which is
//! what makes the motion read as fluid.

use glam::DVec3;

use crate::noise::NoiseField;

/// Input offsets decorrelating the second and third channel drawn from the
/// shared permutation table. Changing these changes the field family, so
/// they are fixed.
const CHANNEL_B_OFFSET: f64 = 100.0;
const CHANNEL_C_OFFSET: f64 = 200.0;

/// Curl-of-noise sampler borrowing a [`NoiseField`].
///
/// One `curl` query costs six vector-noise evaluations (a symmetric pair
/// per axis), i.e. eighteen scalar noise calls.
pub struct CurlField<'a> {
    field: &'a NoiseField,
    eps: f64,
}

impl<'a> CurlField<'a> {
    /// `eps` is the finite-difference step. It must be nonzero and small
    /// against the noise wavelength or the derivative estimate degrades;
    /// this is a design constraint, not a runtime check.
    pub fn new(field: &'a NoiseField, eps: f64) -> Self {
        Self { field, eps }
    }

    /// Vector-valued noise: channel A samples the point as-is, channels B
    /// and C rotate the axes and shift them by a fixed offset.
    fn sample_vector(&self, p: DVec3) -> DVec3 {
        let n = self.field;
        DVec3::new(
            n.noise3(p.x, p.y, p.z),
            n.noise3(
                p.y + CHANNEL_B_OFFSET,
                p.z + CHANNEL_B_OFFSET,
                p.x + CHANNEL_B_OFFSET,
            ),
            n.noise3(
                p.z + CHANNEL_C_OFFSET,
                p.x + CHANNEL_C_OFFSET,
                p.y + CHANNEL_C_OFFSET,
            ),
        )
    }

    /// Curl of the vector noise at `p` via symmetric finite differences:
    ///
    /// ```text
    /// curl = ( dNz/dy - dNy/dz , dNx/dz - dNz/dx , dNy/dx - dNx/dy )
    /// ```
    ///
    /// All six sample points are stack temporaries; no allocation in the
    /// hot path.
    pub fn curl(&self, p: DVec3) -> DVec3 {
        let e = self.eps;
        let inv = 1.0 / (2.0 * e);

        let y1 = self.sample_vector(p + DVec3::new(0.0, e, 0.0));
        let y0 = self.sample_vector(p - DVec3::new(0.0, e, 0.0));
        let z1 = self.sample_vector(p + DVec3::new(0.0, 0.0, e));
        let z0 = self.sample_vector(p - DVec3::new(0.0, 0.0, e));
        let x1 = self.sample_vector(p + DVec3::new(e, 0.0, 0.0));
        let x0 = self.sample_vector(p - DVec3::new(e, 0.0, 0.0));

        let dz_dy = (y1.z - y0.z) * inv;
        let dx_dy = (y1.x - y0.x) * inv;
        let dy_dz = (z1.y - z0.y) * inv;
        let dx_dz = (z1.x - z0.x) * inv;
        let dy_dx = (x1.y - x0.y) * inv;
        let dz_dx = (x1.z - x0.z) * inv;

        DVec3::new(dz_dy - dy_dz, dx_dz - dz_dx, dy_dx - dx_dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_decorrelated() {
        let field = NoiseField::new(11);
        let curl = CurlField::new(&field, 1e-4);
        let v = curl.sample_vector(DVec3::new(0.37, 1.91, -2.53));
        assert!(v.x != v.y && v.y != v.z);
    }

    #[test]
    fn test_curl_deterministic() {
        let field = NoiseField::new(11);
        let curl = CurlField::new(&field, 1e-4);
        let p = DVec3::new(0.7, -1.1, 2.3);
        assert_eq!(curl.curl(p), curl.curl(p));
    }

    #[test]
    fn test_curl_nonzero_on_average() {
        let field = NoiseField::new(11);
        let curl = CurlField::new(&field, 1e-4);
        let mut total = 0.0;
        for i in 0..20 {
            let t = 0.3 + i as f64 * 0.61;
            total += curl.curl(DVec3::new(t, -t * 0.7, t * 1.3)).length();
        }
        assert!(total / 20.0 > 1e-2, "curl field is degenerate");
    }

    #[test]
    fn test_divergence_near_zero() {
        let field = NoiseField::new(11);
        let curl = CurlField::new(&field, 1e-4);
        let h = 1e-3;

        for i in 0..20 {
            let t = 0.3 + i as f64 * 0.57;
            let p = DVec3::new(t, 1.0 - t * 0.8, t * 1.7 - 2.0);

            let div = (curl.curl(p + DVec3::new(h, 0.0, 0.0)).x
                - curl.curl(p - DVec3::new(h, 0.0, 0.0)).x
                + curl.curl(p + DVec3::new(0.0, h, 0.0)).y
                - curl.curl(p - DVec3::new(0.0, h, 0.0)).y
                + curl.curl(p + DVec3::new(0.0, 0.0, h)).z
                - curl.curl(p - DVec3::new(0.0, 0.0, h)).z)
                / (2.0 * h);

            assert!(div.abs() < 1e-3, "divergence {} at {:?}", div, p);
        }
    }

    /// The raw (non-curl) vector noise fails the divergence bound above,
    /// so the test actually distinguishes curl output from an arbitrary
    /// smooth field.
    #[test]
    fn test_raw_field_is_not_divergence_free() {
        let field = NoiseField::new(11);
        let curl = CurlField::new(&field, 1e-4);
        let h = 1e-3;

        let mut max_div: f64 = 0.0;
        for i in 0..20 {
            let t = 0.3 + i as f64 * 0.57;
            let p = DVec3::new(t, 1.0 - t * 0.8, t * 1.7 - 2.0);

            let div = (curl.sample_vector(p + DVec3::new(h, 0.0, 0.0)).x
                - curl.sample_vector(p - DVec3::new(h, 0.0, 0.0)).x
                + curl.sample_vector(p + DVec3::new(0.0, h, 0.0)).y
                - curl.sample_vector(p - DVec3::new(0.0, h, 0.0)).y
                + curl.sample_vector(p + DVec3::new(0.0, 0.0, h)).z
                - curl.sample_vector(p - DVec3::new(0.0, 0.0, h)).z)
                / (2.0 * h);

            max_div = max_div.max(div.abs());
        }
        assert!(max_div > 1e-2, "raw noise unexpectedly divergence-free");
    }
}
