use crate::NoiseSampler;

// The twelve gradient directions of the classic 3D lattice with only
// the xy components used; indexed by `perm[...] % 12`.
pub(crate) const GRAD3: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

// 2D Perlin gradient noise over a seeded permutation table.
// A single octave in [0, 1]; fractal accumulation lives in fractal2.
pub struct Perlin2D {
    perm: [u8; 512],
    // Optional tiling periods: lattice cells wrap modulo the period
    // instead of modulo 256, making the pattern seamless
    repeat: Option<(i64, i64)>,
}

impl Perlin2D {
    pub fn new(perm: [u8; 512], repeat: Option<(u32, u32)>) -> Self {
        Self {
            perm,
            repeat: sanitize_repeat(repeat),
        }
    }

    // Fade curve as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3.
    // First and second derivatives are zero at t=0 and t=1, which
    // removes the visible grid artifacts of plain linear blending.
    #[inline]
    pub(crate) fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    #[inline]
    fn wrap_x(&self, i: i64) -> usize {
        wrap_lattice(i, self.repeat.map(|(rx, _)| rx))
    }

    #[inline]
    fn wrap_y(&self, i: i64) -> usize {
        wrap_lattice(i, self.repeat.map(|(_, ry)| ry))
    }

    // Gradient at a wrapped lattice corner, selected from GRAD3.
    #[inline]
    fn grad_at(&self, xw: usize, yw: usize) -> (f64, f64) {
        let gi = (self.perm[xw + self.perm[yw] as usize] as usize) % 12;
        GRAD3[gi]
    }
}

impl NoiseSampler for Perlin2D {
    fn eval(&self, x: f64, y: f64) -> f64 {
        // Unit square containing the point, and the offset within it
        let xi = x.floor() as i64;
        let yi = y.floor() as i64;
        let xf = x - x.floor();
        let yf = y - y.floor();
        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let x0 = self.wrap_x(xi);
        let x1 = self.wrap_x(xi + 1);
        let y0 = self.wrap_y(yi);
        let y1 = self.wrap_y(yi + 1);

        // Dot product of each corner gradient with the offset vector
        let (gx, gy) = self.grad_at(x0, y0);
        let n00 = gx * xf + gy * yf;
        let (gx, gy) = self.grad_at(x1, y0);
        let n10 = gx * (xf - 1.0) + gy * yf;
        let (gx, gy) = self.grad_at(x0, y1);
        let n01 = gx * xf + gy * (yf - 1.0);
        let (gx, gy) = self.grad_at(x1, y1);
        let n11 = gx * (xf - 1.0) + gy * (yf - 1.0);

        let n = Self::lerp(Self::lerp(n00, n10, u), Self::lerp(n01, n11, u), v);
        // Map the signed result into [0, 1]
        ((n + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

// Reject degenerate zero periods so the modulo below is always valid.
pub(crate) fn sanitize_repeat(repeat: Option<(u32, u32)>) -> Option<(i64, i64)> {
    match repeat {
        Some((rx, ry)) if rx > 0 && ry > 0 => Some((rx as i64, ry as i64)),
        _ => None,
    }
}

// Wrap a lattice index: modulo the tiling period when set, otherwise
// modulo 256; the result always fits the 512-entry table.
#[inline]
pub(crate) fn wrap_lattice(i: i64, period: Option<i64>) -> usize {
    match period {
        Some(p) => (i.rem_euclid(p) as usize) & 255,
        None => (i & 255) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::Perlin2D;
    use crate::NoiseSampler;
    use crate::rng::build_permutation;

    #[test]
    fn perlin2_determinism() {
        let p1 = Perlin2D::new(build_permutation(1234), None);
        let p2 = Perlin2D::new(build_permutation(1234), None);
        // Same seed ⇒ bit-identical output
        assert_eq!(p1.eval(10.5, -3.7), p2.eval(10.5, -3.7));
    }

    #[test]
    fn perlin2_range() {
        let p = Perlin2D::new(build_permutation(7), None);
        for &(x, y) in &[(0.0, 0.0), (5.3, -1.2), (100.1, 200.2), (0.5, 0.5)] {
            let v = p.eval(x, y);
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn perlin2_lattice_points_are_midpoint() {
        // At integer lattice points every offset is zero, so the
        // signed value is 0 and the remapped value is exactly 0.5
        let p = Perlin2D::new(build_permutation(3), None);
        assert_eq!(p.eval(4.0, 9.0), 0.5);
    }

    #[test]
    fn perlin2_tiling_periodicity() {
        let p = Perlin2D::new(build_permutation(2025), Some((8, 8)));
        // dyadic coordinates keep `x + 8.0` exact in floating point
        for &(x, y) in &[(0.5, 1.75), (2.25, 5.5), (7.75, 0.125)] {
            assert_eq!(p.eval(x, y), p.eval(x + 8.0, y));
            assert_eq!(p.eval(x, y), p.eval(x, y + 8.0));
            // negative side wraps too
            assert_eq!(p.eval(x, y), p.eval(x - 8.0, y - 8.0));
        }
    }

    #[test]
    fn perlin2_seam_continuity() {
        // Crossing the wrap boundary must be as smooth as any other
        // lattice boundary
        let p = Perlin2D::new(build_permutation(11), Some((16, 16)));
        let before = p.eval(15.999, 3.5);
        let after = p.eval(16.001, 3.5);
        assert!((before - after).abs() < 0.05);
    }
}
