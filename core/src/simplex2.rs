use crate::NoiseSampler;
use crate::perlin2::{GRAD3, sanitize_repeat, wrap_lattice};

// Approximate value of sqrt(3)
const SQRT_3: f64 = 1.732_050_807_568_877_3;
// Skewing/unskewing factors for 2D simplex (Gustavson)
const F2: f64 = 0.5 * (SQRT_3 - 1.0); // compresses the square grid into equilateral triangles
const G2: f64 = (3.0 - SQRT_3) / 6.0; // reverses the skewing

// 2D Simplex noise over a seeded permutation table.
// Simplex divides space into triangles rather than squares, which
// gives better isotropy than Perlin's square lattice.
pub struct Simplex2D {
    perm: [u8; 512],
    repeat: Option<(i64, i64)>,
}

impl Simplex2D {
    pub fn new(perm: [u8; 512], repeat: Option<(u32, u32)>) -> Self {
        Self {
            perm,
            repeat: sanitize_repeat(repeat),
        }
    }

    #[inline]
    fn dot(g: (f64, f64), x: f64, y: f64) -> f64 {
        g.0 * x + g.1 * y
    }

    #[inline]
    fn wrap_x(&self, i: i64) -> usize {
        wrap_lattice(i, self.repeat.map(|(rx, _)| rx))
    }

    #[inline]
    fn wrap_y(&self, i: i64) -> usize {
        wrap_lattice(i, self.repeat.map(|(_, ry)| ry))
    }

    // Raw 2D simplex noise at (xin, yin), roughly in [-1, 1].
    fn raw(&self, xin: f64, yin: f64) -> f64 {
        // Skew input space to determine which simplex cell we are in
        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        // Unskew back to get the offset from the cell origin
        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle of the skewed square
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        // Offsets for the two remaining corners
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Hash the three simplex corners; the double lookup mixes both
        // lattice coordinates into the gradient index
        let gi0 =
            (self.perm[self.wrap_x(i) + self.perm[self.wrap_y(j)] as usize] as usize) % 12;
        let gi1 = (self.perm
            [self.wrap_x(i + i1) + self.perm[self.wrap_y(j + j1)] as usize] as usize)
            % 12;
        let gi2 =
            (self.perm[self.wrap_x(i + 1) + self.perm[self.wrap_y(j + 1)] as usize] as usize) % 12;

        // Corner kernels: (0.5 − d²)⁴ · gradient·offset
        let mut n = 0.0;
        for &(gi, x, y) in &[(gi0, x0, y0), (gi1, x1, y1), (gi2, x2, y2)] {
            let t = 0.5 - x * x - y * y; // circular radius of influence
            if t > 0.0 {
                let t2 = t * t;
                n += t2 * t2 * Self::dot(GRAD3[gi], x, y);
            }
        }

        // Scale so the sum lands roughly in [-1, 1]
        70.0 * n
    }
}

impl NoiseSampler for Simplex2D {
    fn eval(&self, x: f64, y: f64) -> f64 {
        ((self.raw(x, y) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

// Fixed rotation angles used by the OpenSimplex approximations below.
const OPEN_SIMPLEX_ANGLE: f64 = std::f64::consts::TAU / 5.0;
const OPEN_SIMPLEX_2S_ANGLE_A: f64 = std::f64::consts::TAU / 9.0;
const OPEN_SIMPLEX_2S_ANGLE_B: f64 = 2.0 * std::f64::consts::TAU / 9.0;

#[inline]
fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

// Approximation of OpenSimplex: simplex noise sampled through a fixed
// 2π/5 rotation, which breaks the axis alignment of the skewed
// lattice. Not a reference OpenSimplex implementation.
pub struct OpenSimplex2D {
    inner: Simplex2D,
}

impl OpenSimplex2D {
    pub fn new(perm: [u8; 512], repeat: Option<(u32, u32)>) -> Self {
        Self {
            inner: Simplex2D::new(perm, repeat),
        }
    }
}

impl NoiseSampler for OpenSimplex2D {
    fn eval(&self, x: f64, y: f64) -> f64 {
        let (rx, ry) = rotate(x, y, OPEN_SIMPLEX_ANGLE);
        self.inner.eval(rx, ry)
    }
}

// Approximation of the "smooth" OpenSimplex variant: the average of
// two simplex evaluations at 2π/9 and 4π/9 rotations. Averaging two
// decorrelated lattices softens directional artifacts further.
// Not a reference OpenSimplex implementation.
pub struct OpenSimplex2S {
    inner: Simplex2D,
}

impl OpenSimplex2S {
    pub fn new(perm: [u8; 512], repeat: Option<(u32, u32)>) -> Self {
        Self {
            inner: Simplex2D::new(perm, repeat),
        }
    }
}

impl NoiseSampler for OpenSimplex2S {
    fn eval(&self, x: f64, y: f64) -> f64 {
        let (ax, ay) = rotate(x, y, OPEN_SIMPLEX_2S_ANGLE_A);
        let (bx, by) = rotate(x, y, OPEN_SIMPLEX_2S_ANGLE_B);
        0.5 * (self.inner.eval(ax, ay) + self.inner.eval(bx, by))
    }
}

#[cfg(test)]
mod tests {
    use super::{OpenSimplex2D, OpenSimplex2S, Simplex2D};
    use crate::NoiseSampler;
    use crate::rng::build_permutation;

    #[test]
    fn simplex2_determinism() {
        let s1 = Simplex2D::new(build_permutation(9999), None);
        let s2 = Simplex2D::new(build_permutation(9999), None);
        assert_eq!(s1.eval(1.23, 4.56), s2.eval(1.23, 4.56));
    }

    #[test]
    fn simplex2_range() {
        let s = Simplex2D::new(build_permutation(0), None);
        for &(x, y) in &[(0.0, 0.0), (5.5, -5.5), (100.1, 100.1), (0.33, 0.77)] {
            let v = s.eval(x, y);
            assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn open_simplex_is_rotated_simplex() {
        // The approximation must agree with the underlying simplex
        // kernel sampled at the rotated coordinate
        let os = OpenSimplex2D::new(build_permutation(5), None);
        let s = Simplex2D::new(build_permutation(5), None);
        let angle = std::f64::consts::TAU / 5.0;
        let (sin, cos) = angle.sin_cos();
        let (x, y) = (2.3, -1.1);
        assert_eq!(os.eval(x, y), s.eval(x * cos - y * sin, x * sin + y * cos));
    }

    #[test]
    fn open_simplex_2s_range_and_determinism() {
        let a = OpenSimplex2S::new(build_permutation(77), None);
        let b = OpenSimplex2S::new(build_permutation(77), None);
        for &(x, y) in &[(0.1, 0.9), (-4.2, 3.3), (50.5, -50.5)] {
            let v = a.eval(x, y);
            assert_eq!(v, b.eval(x, y));
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
