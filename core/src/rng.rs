// Seeded PRNG and permutation-table construction shared by every
// noise kernel. The generator is an explicit value type: advancing
// returns the successor state instead of mutating in place, so the
// caller threads the state and nothing hides behind `&mut self`.

// A zero state would lock xorshift into an all-zero stream, so a zero
// seed is remapped to this fixed constant (the golden ratio in 32-bit
// fixed point, an arbitrary but well-mixed choice).
const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

// 32-bit xorshift generator (shift triple 13/17/5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    // Advance one step: returns the successor generator and a uniform
    // sample in [0, 1).
    #[must_use]
    pub fn next(self) -> (Self, f64) {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        (Self { state: x }, x as f64 / 4_294_967_296.0)
    }
}

// Build the 512-entry permutation table for a seed: a Fisher–Yates
// shuffle of the identity sequence 0..=255, duplicated into the upper
// half so lattice lookups can index `perm[a + perm[b]]` without a
// second modulo.
pub fn build_permutation(seed: u32) -> [u8; 512] {
    let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut rng = Xorshift32::new(seed);
    for i in (1..256).rev() {
        let (next, r) = rng.next();
        rng = next;
        // r < 1.0, so j lands in [0, i]
        let j = (r * (i + 1) as f64) as usize;
        p.swap(i, j);
    }
    let mut perm = [0u8; 512];
    for i in 0..512 {
        perm[i] = p[i & 255];
    }
    perm
}

#[cfg(test)]
mod tests {
    use super::{Xorshift32, build_permutation};

    #[test]
    fn xorshift_determinism() {
        let a = Xorshift32::new(1234);
        let b = Xorshift32::new(1234);
        let (a1, va) = a.next();
        let (b1, vb) = b.next();
        assert_eq!(va, vb);
        assert_eq!(a1.next().1, b1.next().1);
    }

    #[test]
    fn xorshift_zero_seed_is_remapped() {
        // Seed 0 must not produce the degenerate all-zero stream
        let (_, v) = Xorshift32::new(0).next();
        assert!(v != 0.0);
        // and must match the stream of the replacement constant
        let (_, w) = Xorshift32::new(0x9E37_79B9).next();
        assert_eq!(v, w);
    }

    #[test]
    fn xorshift_output_in_unit_interval() {
        let mut rng = Xorshift32::new(42);
        for _ in 0..1000 {
            let (next, v) = rng.next();
            rng = next;
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn permutation_is_a_bijection() {
        let perm = build_permutation(2025);
        let mut seen = [false; 256];
        for &v in &perm[..256] {
            assert!(!seen[v as usize], "duplicate entry {}", v);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn permutation_upper_half_duplicates_lower() {
        let perm = build_permutation(7);
        for i in 0..256 {
            assert_eq!(perm[i], perm[i + 256]);
        }
    }

    #[test]
    fn permutation_determinism() {
        assert_eq!(build_permutation(99), build_permutation(99));
        // different seeds should not collide on the full table
        assert_ne!(&build_permutation(99)[..256], &build_permutation(100)[..256]);
    }
}
