// core holds the deterministic heightmap engine:
// seeded PRNG, noise kernels, fractal synthesis, domain warping,
// masking, erosion and the cellular-automaton pipeline
pub mod cellular;
pub mod config;
pub mod domain_warp;
pub mod erosion2;
pub mod fractal2;
pub mod generate;
pub mod mask;
pub mod perlin2;
pub mod rng;
pub mod simplex2;
pub mod utils;
pub mod value2;
pub mod worley2;

pub use cellular::CellularAutomata2D;
pub use erosion2::{HydraulicErosion2D, ThermalErosion2D};
pub use fractal2::Fractal2D;
pub use generate::{generate_cellular_map, generate_noise_map};
pub use mask::compute_mask;
pub use perlin2::Perlin2D;
pub use rng::{Xorshift32, build_permutation};
pub use simplex2::{OpenSimplex2D, OpenSimplex2S, Simplex2D};
pub use value2::Value2D;
pub use worley2::Worley2D;

// A noise sampler maps a 2D coordinate to a value in [0, 1].
// Samplers are immutable after construction: the same coordinate
// always yields a bit-identical result, regardless of call order.
pub trait NoiseSampler {
    fn eval(&self, x: f64, y: f64) -> f64;
}
