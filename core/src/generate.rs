// The two public entry points of the engine. Everything they touch is
// built fresh per call and dropped afterwards, so concurrent calls
// with independent configs never share mutable state.

use crate::NoiseSampler;
use crate::cellular::{CellularAutomata2D, smooth};
use crate::config::{
    CellularMapConfig, DistanceMetric, FractalMode, KernelType, NoiseMapConfig, SpectralConfig,
    WarpLayerConfig, WorleyFeature,
};
use crate::domain_warp::{DomainTransform2D, WarpLayer2D};
use crate::erosion2::{HydraulicErosion2D, ThermalErosion2D};
use crate::fractal2::Fractal2D;
use crate::mask::apply_mask;
use crate::perlin2::Perlin2D;
use crate::rng::build_permutation;
use crate::simplex2::{OpenSimplex2D, OpenSimplex2S, Simplex2D};
use crate::value2::Value2D;
use crate::worley2::Worley2D;

// Floor for the pixels-per-lattice-unit scale; a zero scale would
// otherwise blow up the base frequency.
const MIN_SCALE: f64 = 1e-6;

// Build a kernel for a seed: the permutation table is constructed
// here and handed over to the sampler, which owns it from then on.
fn build_kernel(
    kernel: KernelType,
    seed: u32,
    repeat: Option<(u32, u32)>,
    metric: DistanceMetric,
    feature: WorleyFeature,
) -> Box<dyn NoiseSampler> {
    let perm = build_permutation(seed);
    match kernel {
        KernelType::Perlin => Box::new(Perlin2D::new(perm, repeat)),
        KernelType::Simplex => Box::new(Simplex2D::new(perm, repeat)),
        KernelType::OpenSimplex2 => Box::new(OpenSimplex2D::new(perm, repeat)),
        KernelType::OpenSimplex2s => Box::new(OpenSimplex2S::new(perm, repeat)),
        KernelType::Value => Box::new(Value2D::new(perm, repeat)),
        KernelType::Worley => Box::new(Worley2D::new(perm, repeat, metric, feature)),
    }
}

// Integer tiling periods for one noise layer. The period is chosen so
// the highest-frequency octave's lattice period divides the image
// dimension, which is what makes the wraparound seamless.
fn repeat_periods(
    width: usize,
    height: usize,
    scale: f64,
    octaves: u32,
    lacunarity: f64,
    fractal: FractalMode,
    tileable: bool,
) -> Option<(u32, u32)> {
    if !tileable {
        return None;
    }
    let base_frequency = 1.0 / scale.max(MIN_SCALE);
    let top_ratio = if fractal == FractalMode::None {
        1.0
    } else {
        lacunarity.powi(octaves.max(1) as i32 - 1)
    };
    let period = |dimension: usize| {
        (dimension as f64 * base_frequency * top_ratio)
            .round()
            .max(1.0) as u32
    };
    Some((period(width), period(height)))
}

// Assemble one warp layer from its config. Displacement accumulation
// is always FBM-style signed averaging, whatever fractal mode the
// layer asks for; `None` still means a single base sample.
fn build_warp_layer(layer: &WarpLayerConfig, width: usize, height: usize, tileable: bool) -> WarpLayer2D {
    let octaves = layer.octaves.max(1);
    let mode = if layer.fractal == FractalMode::None {
        FractalMode::None
    } else {
        FractalMode::Fbm
    };
    let repeat = repeat_periods(
        width,
        height,
        layer.scale,
        octaves,
        layer.lacunarity,
        mode,
        tileable,
    );
    let kernel = build_kernel(
        layer.kernel,
        layer.seed,
        repeat,
        DistanceMetric::Euclidean,
        WorleyFeature::F1,
    );
    WarpLayer2D {
        fractal: Fractal2D::new(
            kernel,
            mode,
            octaves,
            layer.persistence,
            layer.lacunarity,
            1.0 / layer.scale.max(MIN_SCALE),
            SpectralConfig::default(),
        ),
        amplitude_x: layer.amplitude_x,
        amplitude_y: layer.amplitude_y,
        offset_x: layer.offset_x,
        offset_y: layer.offset_y,
    }
}

// Generate a heightmap from the noise pipeline: domain transform,
// stacked warps, fractal sampling, erosion, mask. Returns a row-major
// array of `width*height` floats in [0, 1].
pub fn generate_noise_map(config: &NoiseMapConfig) -> Vec<f32> {
    let width = config.width.max(1);
    let height = config.height.max(1);
    let octaves = config.octaves.max(1);
    log::debug!(
        "noise map {}x{} seed={} kernel={:?} fractal={:?} octaves={}",
        width,
        height,
        config.seed,
        config.kernel,
        config.fractal,
        octaves
    );

    let repeat = repeat_periods(
        width,
        height,
        config.scale,
        octaves,
        config.lacunarity,
        config.fractal,
        config.tileable,
    );
    let kernel = build_kernel(
        config.kernel,
        config.seed,
        repeat,
        config.worley_metric,
        config.worley_feature,
    );
    let fractal = Fractal2D::new(
        kernel,
        config.fractal,
        octaves,
        config.persistence,
        config.lacunarity,
        1.0 / config.scale.max(MIN_SCALE),
        config.spectral,
    );

    let transform = DomainTransform2D {
        scale_x: config.transform.scale_x,
        scale_y: config.transform.scale_y,
        rotate_deg: config.transform.rotate_deg,
        pivot: (width as f64 * 0.5, height as f64 * 0.5),
    };
    let warps: Vec<WarpLayer2D> = config
        .warp_layers
        .iter()
        .filter(|l| l.enabled)
        .map(|l| build_warp_layer(l, width, height, config.tileable))
        .collect();
    if !warps.is_empty() {
        log::trace!("{} warp layer(s) enabled", warps.len());
    }

    let mut map = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let (tx, ty) = transform.apply(x as f64, y as f64);
            // stacked displacements sum onto the transformed coordinate
            let (mut wx, mut wy) = (tx, ty);
            for layer in &warps {
                let (dx, dy) = layer.displace(tx, ty);
                wx += dx;
                wy += dy;
            }
            let v = fractal.eval(wx + config.offset_x, wy + config.offset_y);
            // coordinate math runs in f64; storage truncates to f32
            map[y * width + x] = v as f32;
        }
    }

    if config.erosion.thermal.enabled {
        let t = &config.erosion.thermal;
        log::trace!("thermal erosion: {} iteration(s)", t.iterations);
        ThermalErosion2D::new(t.iterations, t.talus, t.rate, config.tileable)
            .apply(&mut map, width, height);
    }
    if config.erosion.hydraulic.enabled {
        let h = &config.erosion.hydraulic;
        log::trace!("hydraulic erosion: {} iteration(s)", h.iterations);
        HydraulicErosion2D::new(h.iterations, h.rate, h.deposit, config.tileable)
            .apply(&mut map, width, height);
    }

    apply_mask(&mut map, width, height, &config.mask);
    map
}

// Generate a heightmap from the cellular-automaton pipeline: random
// fill, birth/death generations, optional smoothing, mask. Returns a
// row-major array of `width*height` floats in [0, 1].
pub fn generate_cellular_map(config: &CellularMapConfig) -> Vec<f32> {
    let width = config.width.max(1);
    let height = config.height.max(1);
    log::debug!(
        "cellular map {}x{} seed={} fill={} iterations={}",
        width,
        height,
        config.seed,
        config.initial_fill,
        config.iterations
    );

    let ca = CellularAutomata2D::new(
        width,
        height,
        config.birth_limit,
        config.death_limit,
        config.wrap,
    );
    let mut grid = ca.seed_grid(config.seed, config.initial_fill);
    ca.run(&mut grid, config.iterations);

    let mut map: Vec<f32> = grid.iter().map(|&c| c as f32).collect();
    if config.smoothing > 0 {
        smooth(&mut map, width, height, config.smoothing, config.wrap);
    }
    apply_mask(&mut map, width, height, &config.mask);
    map
}
