use crate::NoiseSampler;
use crate::fractal2::Fractal2D;

// Fixed decorrelation offset between the x and y displacement
// samples: one kernel evaluated at two far-apart points behaves like
// two independent channels.
pub const WARP_DECORRELATION: (f64, f64) = (19.19, 19.19);

// Anisotropic scale followed by rotation of the sampling coordinate,
// both about a fixed pivot (the grid center in the pipeline).
pub struct DomainTransform2D {
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotate_deg: f64,
    pub pivot: (f64, f64),
}

impl DomainTransform2D {
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = (x - self.pivot.0) * self.scale_x;
        let dy = (y - self.pivot.1) * self.scale_y;
        // skip the trig entirely for the common unrotated case, which
        // also keeps the identity transform bit-exact
        if self.rotate_deg == 0.0 {
            return (self.pivot.0 + dx, self.pivot.1 + dy);
        }
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        (
            self.pivot.0 + dx * cos - dy * sin,
            self.pivot.1 + dx * sin + dy * cos,
        )
    }
}

// One displacement layer: an independent noise/fractal sub-pipeline
// whose signed output shifts the coordinate used for the final
// sampling. Layers stack additively.
pub struct WarpLayer2D {
    pub fractal: Fractal2D,
    pub amplitude_x: f64,
    pub amplitude_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl WarpLayer2D {
    // Displacement (dx, dy) at a coordinate: the layer's fractal is
    // sampled twice, once at the coordinate and once decorrelated,
    // both remapped to [-1, 1] and scaled per axis.
    pub fn displace(&self, x: f64, y: f64) -> (f64, f64) {
        let sx = x + self.offset_x;
        let sy = y + self.offset_y;
        let nx = self.fractal.eval(sx, sy) * 2.0 - 1.0;
        let ny = self
            .fractal
            .eval(sx + WARP_DECORRELATION.0, sy + WARP_DECORRELATION.1)
            * 2.0
            - 1.0;
        (nx * self.amplitude_x, ny * self.amplitude_y)
    }
}
