use crate::NoiseSampler;
use crate::config::{FilterKind, FractalMode, SpectralConfig};

// Fractal compositor: accumulates octaves of a base kernel.
// Amplitude starts at 1 and is multiplied by `persistence` each
// octave; the frequency ratio starts at 1 and is multiplied by
// `lacunarity`. The absolute frequency of an octave is
// `base_frequency * frequency_ratio`.
pub struct Fractal2D {
    kernel: Box<dyn NoiseSampler>,
    mode: FractalMode,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    base_frequency: f64,
    spectral: SpectralConfig,
}

impl Fractal2D {
    pub fn new(
        kernel: Box<dyn NoiseSampler>,
        mode: FractalMode,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        base_frequency: f64,
        spectral: SpectralConfig,
    ) -> Self {
        Self {
            kernel,
            mode,
            octaves: octaves.max(1),
            persistence,
            lacunarity,
            base_frequency,
            spectral,
        }
    }

    // Spectral weight of one octave. The shaping term pulls each
    // octave toward a target power-law slope; the hard filter zeroes
    // octaves whose absolute frequency falls outside the band.
    fn octave_weight(&self, frequency_ratio: f64) -> f64 {
        let mut w = if self.spectral.enabled {
            frequency_ratio.powf(-self.spectral.target_beta)
        } else {
            1.0
        };
        let abs_frequency = self.base_frequency * frequency_ratio;
        let passes = match self.spectral.filter {
            FilterKind::None => true,
            FilterKind::Lowpass => abs_frequency <= self.spectral.cutoff_high,
            FilterKind::Highpass => abs_frequency >= self.spectral.cutoff_low,
            FilterKind::Bandpass => {
                abs_frequency >= self.spectral.cutoff_low
                    && abs_frequency <= self.spectral.cutoff_high
            }
        };
        if !passes {
            w = 0.0;
        }
        w
    }

    // Shape one signed base sample n in [-1, 1] for the current mode.
    #[inline]
    fn shape(&self, n: f64) -> f64 {
        match self.mode {
            // plain fractal Brownian motion
            FractalMode::None | FractalMode::Fbm => n,
            // emphasizes ridgelines: sharp creases where |n| is small
            FractalMode::Ridged => {
                let r = 1.0 - n.abs();
                r * r
            }
            // rounded, billowy forms from the folded magnitude
            FractalMode::Billow => n.abs() * 2.0 - 1.0,
        }
    }
}

impl NoiseSampler for Fractal2D {
    fn eval(&self, x: f64, y: f64) -> f64 {
        // `None` bypasses accumulation: one base sample at base frequency
        if self.mode == FractalMode::None {
            return self
                .kernel
                .eval(x * self.base_frequency, y * self.base_frequency);
        }

        let mut amplitude = 1.0;
        let mut frequency_ratio = 1.0;
        let mut total = 0.0;
        let mut weight_sum = 0.0;

        for _ in 0..self.octaves {
            let w = self.octave_weight(frequency_ratio);
            if w > 0.0 {
                let frequency = self.base_frequency * frequency_ratio;
                // signed base sample
                let n = self.kernel.eval(x * frequency, y * frequency) * 2.0 - 1.0;
                total += self.shape(n) * amplitude * w;
                weight_sum += amplitude * w;
            }
            // filtered octaves still advance the bookkeeping
            amplitude *= self.persistence;
            frequency_ratio *= self.lacunarity;
        }

        let v = if weight_sum == 0.0 {
            0.0
        } else {
            total / weight_sum
        };
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
