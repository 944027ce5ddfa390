use crate::NoiseSampler;
use crate::perlin2::{Perlin2D, sanitize_repeat, wrap_lattice};

// 2D value noise: scalar lattice-corner values from the permutation
// table, bilinearly interpolated with the Perlin fade curve. Cheaper
// than gradient noise; only C1 continuity from the fade curve.
pub struct Value2D {
    perm: [u8; 512],
    repeat: Option<(i64, i64)>,
}

impl Value2D {
    pub fn new(perm: [u8; 512], repeat: Option<(u32, u32)>) -> Self {
        Self {
            perm,
            repeat: sanitize_repeat(repeat),
        }
    }

    #[inline]
    fn wrap_x(&self, i: i64) -> usize {
        wrap_lattice(i, self.repeat.map(|(rx, _)| rx))
    }

    #[inline]
    fn wrap_y(&self, i: i64) -> usize {
        wrap_lattice(i, self.repeat.map(|(_, ry)| ry))
    }

    // Corner scalar in [0, 1]: perm[i + perm[j]] / 255
    #[inline]
    fn corner(&self, xw: usize, yw: usize) -> f64 {
        self.perm[xw + self.perm[yw] as usize] as f64 / 255.0
    }
}

impl NoiseSampler for Value2D {
    fn eval(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor() as i64;
        let yi = y.floor() as i64;
        let xf = x - x.floor();
        let yf = y - y.floor();
        let u = Perlin2D::fade(xf);
        let v = Perlin2D::fade(yf);

        let x0 = self.wrap_x(xi);
        let x1 = self.wrap_x(xi + 1);
        let y0 = self.wrap_y(yi);
        let y1 = self.wrap_y(yi + 1);

        let c00 = self.corner(x0, y0);
        let c10 = self.corner(x1, y0);
        let c01 = self.corner(x0, y1);
        let c11 = self.corner(x1, y1);

        let top = Perlin2D::lerp(c00, c10, u);
        let bottom = Perlin2D::lerp(c01, c11, u);
        Perlin2D::lerp(top, bottom, v)
    }
}

#[cfg(test)]
mod tests {
    use super::Value2D;
    use crate::NoiseSampler;
    use crate::rng::build_permutation;

    #[test]
    fn value2_lattice_points_match_corner_formula() {
        let perm = build_permutation(1);
        let v = Value2D::new(perm, None);
        for &(i, j) in &[(0i64, 0i64), (1, 0), (3, 7), (255, 255), (256, 1)] {
            let expected =
                perm[(i & 255) as usize + perm[(j & 255) as usize] as usize] as f64 / 255.0;
            assert_eq!(v.eval(i as f64, j as f64), expected);
        }
    }

    #[test]
    fn value2_range_and_determinism() {
        let a = Value2D::new(build_permutation(12), None);
        let b = Value2D::new(build_permutation(12), None);
        for &(x, y) in &[(0.25, 0.75), (10.1, -4.9), (0.5, 0.5)] {
            let v = a.eval(x, y);
            assert_eq!(v, b.eval(x, y));
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn value2_tiling_periodicity() {
        let v = Value2D::new(build_permutation(4), Some((4, 4)));
        // dyadic coordinates keep the shifted samples exact
        assert_eq!(v.eval(0.5, 1.25), v.eval(4.5, 1.25));
        assert_eq!(v.eval(0.5, 1.25), v.eval(0.5, 5.25));
    }
}
