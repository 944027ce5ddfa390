// Configuration model for both pipelines. Everything is a plain
// serde-derivable value type so presets can be stored and reloaded by
// callers; the engine itself never touches I/O.
//
// The engine clamps out-of-domain values instead of failing:
// dimensions floor to 1, probabilities clamp into [0, 1], neighbor
// limits into [0, 8]. Stricter validation is the caller's business.

use serde::{Deserialize, Serialize};

// Which noise basis a layer samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelType {
    #[default]
    Perlin,
    Simplex,
    // Fixed-rotation approximations of OpenSimplex, not reference
    // implementations (see simplex2.rs)
    OpenSimplex2,
    OpenSimplex2s,
    Value,
    Worley,
}

// How octaves are accumulated. `None` bypasses accumulation and takes
// a single base sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    None,
    #[default]
    Fbm,
    Ridged,
    Billow,
}

// Distance metric for the Worley family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

// Which Worley feature distance is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorleyFeature {
    #[default]
    F1,
    F2,
    // F2 − F1: a ridge/edge detector, always >= 0
    F2MinusF1,
}

// Hard spectral gate applied per octave on its absolute frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    None,
    Lowpass,
    Highpass,
    Bandpass,
}

// Spectral shaping: each octave's contribution is weighted by
// frequency_ratio^(-target_beta) and optionally gated to zero by the
// hard filter. Filtered octaves still advance amplitude/frequency
// bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralConfig {
    pub enabled: bool,
    pub target_beta: f64,
    pub filter: FilterKind,
    pub cutoff_low: f64,
    pub cutoff_high: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_beta: 1.0,
            filter: FilterKind::None,
            cutoff_low: 0.0,
            cutoff_high: f64::INFINITY,
        }
    }
}

// Anisotropic scale then rotation of the sampling coordinate, applied
// about the grid center before warping and sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainTransformConfig {
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotate_deg: f64,
}

impl Default for DomainTransformConfig {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotate_deg: 0.0,
        }
    }
}

// One stacked displacement layer: an independent noise/fractal
// sub-pipeline whose signed output displaces the sampling coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpLayerConfig {
    pub enabled: bool,
    pub seed: u32,
    pub kernel: KernelType,
    pub fractal: FractalMode,
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub amplitude_x: f64,
    pub amplitude_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for WarpLayerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: 1,
            kernel: KernelType::Perlin,
            fractal: FractalMode::Fbm,
            scale: 64.0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            amplitude_x: 16.0,
            amplitude_y: 16.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

// Shape of the multiplicative mask, one variant per supported SDF.
// All coordinates live in the unit square.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaskShape {
    #[default]
    None,
    Circle {
        center_x: f64,
        center_y: f64,
        radius: f64,
    },
    Superellipse {
        center_x: f64,
        center_y: f64,
        radius_x: f64,
        radius_y: f64,
        exponent: f64,
        rotate_deg: f64,
    },
    Flower {
        center_x: f64,
        center_y: f64,
        radius: f64,
        petals: u32,
        amplitude: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
    Voronoi {
        seed: u32,
        sites: u32,
        // Carried for preset compatibility; the approximation derives
        // its cell density purely from `sites` and ignores both.
        jitter: f64,
        relax_iterations: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    pub enabled: bool,
    pub shape: MaskShape,
    pub invert: bool,
    pub falloff: f64,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            shape: MaskShape::None,
            invert: false,
            falloff: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    pub enabled: bool,
    pub iterations: u32,
    // Minimum height difference before material moves
    pub talus: f32,
    // Fraction of the excess difference transferred per pass
    pub rate: f32,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            iterations: 10,
            talus: 0.01,
            rate: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicConfig {
    pub enabled: bool,
    pub iterations: u32,
    pub rate: f32,
    // Fraction of eroded material re-deposited downhill; the rest is
    // discarded, modelling sediment leaving the local domain
    pub deposit: f32,
}

impl Default for HydraulicConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            iterations: 10,
            rate: 0.1,
            deposit: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ErosionConfig {
    pub thermal: ThermalConfig,
    pub hydraulic: HydraulicConfig,
}

// Full configuration for the noise pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseMapConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub kernel: KernelType,
    pub fractal: FractalMode,
    // Pixels per base lattice unit; base frequency is 1/scale
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub tileable: bool,
    pub worley_metric: DistanceMetric,
    pub worley_feature: WorleyFeature,
    pub transform: DomainTransformConfig,
    pub spectral: SpectralConfig,
    pub warp_layers: Vec<WarpLayerConfig>,
    pub erosion: ErosionConfig,
    pub mask: MaskConfig,
}

impl Default for NoiseMapConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 1,
            kernel: KernelType::Perlin,
            fractal: FractalMode::Fbm,
            scale: 64.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset_x: 0.0,
            offset_y: 0.0,
            tileable: false,
            worley_metric: DistanceMetric::Euclidean,
            worley_feature: WorleyFeature::F1,
            transform: DomainTransformConfig::default(),
            spectral: SpectralConfig::default(),
            warp_layers: Vec::new(),
            erosion: ErosionConfig::default(),
            mask: MaskConfig::default(),
        }
    }
}

// Full configuration for the cellular-automaton pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellularMapConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    // Probability that a cell starts as a wall
    pub initial_fill: f64,
    pub iterations: u32,
    // Moore-neighborhood thresholds, clamped into [0, 8]
    pub birth_limit: u32,
    pub death_limit: u32,
    pub wrap: bool,
    // Box-blur passes applied to the binary result
    pub smoothing: u32,
    pub mask: MaskConfig,
}

impl Default for CellularMapConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 1,
            initial_fill: 0.45,
            iterations: 5,
            birth_limit: 5,
            death_limit: 4,
            wrap: false,
            smoothing: 0,
            mask: MaskConfig::default(),
        }
    }
}
