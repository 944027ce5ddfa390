use crate::NoiseSampler;
use crate::config::{DistanceMetric, MaskConfig, MaskShape, WorleyFeature};
use crate::rng::build_permutation;
use crate::worley2::Worley2D;

// Floor for falloff widths, radii and edge-projection denominators;
// anything smaller falls back to a permissive default instead of
// dividing by zero.
const EPSILON: f64 = 1e-6;

// Multiplicative shape mask for one cell, in [0, 1]. Operates in
// unit-square coordinates: a pixel maps to the center of its cell,
// fx = (x + 0.5) / width. Both pipelines share this compositor.
pub fn compute_mask(x: usize, y: usize, width: usize, height: usize, config: &MaskConfig) -> f64 {
    if !config.enabled {
        return 1.0;
    }
    // the null shape is a no-op regardless of invert, matching apply_mask
    if config.shape == MaskShape::None {
        return 1.0;
    }
    let fx = (x as f64 + 0.5) / width.max(1) as f64;
    let fy = (y as f64 + 0.5) / height.max(1) as f64;
    let falloff = config.falloff.max(EPSILON);

    let m = match &config.shape {
        MaskShape::None => 1.0,
        MaskShape::Circle {
            center_x,
            center_y,
            radius,
        } => {
            let r = radius.max(EPSILON);
            let d = ((fx - center_x).powi(2) + (fy - center_y).powi(2)).sqrt();
            (r - d) / (r * falloff)
        }
        MaskShape::Superellipse {
            center_x,
            center_y,
            radius_x,
            radius_y,
            exponent,
            rotate_deg,
        } => {
            // rotate the offset into the shape's frame, then take the
            // Lp-norm of the per-axis normalized coordinates
            let (sin, cos) = (-rotate_deg.to_radians()).sin_cos();
            let ox = fx - center_x;
            let oy = fy - center_y;
            let rx_off = ox * cos - oy * sin;
            let ry_off = ox * sin + oy * cos;
            let n = exponent.max(EPSILON);
            let lx = (rx_off / radius_x.max(EPSILON)).abs().powf(n);
            let ly = (ry_off / radius_y.max(EPSILON)).abs().powf(n);
            let v = (lx + ly).powf(1.0 / n);
            (1.0 - v) / falloff
        }
        MaskShape::Flower {
            center_x,
            center_y,
            radius,
            petals,
            amplitude,
        } => {
            let r = radius.max(EPSILON);
            let ox = fx - center_x;
            let oy = fy - center_y;
            let d = (ox * ox + oy * oy).sqrt();
            let theta = oy.atan2(ox);
            // polar radius modulated by the petal count
            let petal_r = r * (1.0 + amplitude * (*petals as f64 * theta).cos());
            (petal_r - d) / (r * falloff)
        }
        MaskShape::Polygon { points } => polygon_mask(fx, fy, points, falloff),
        MaskShape::Voronoi { seed, sites, .. } => {
            // density derived purely from the site count; jitter and
            // relax_iterations are carried but unused (see config.rs)
            let density = (*sites as f64).sqrt().max(1.0);
            let worley = Worley2D::new(
                build_permutation(*seed),
                None,
                DistanceMetric::Euclidean,
                WorleyFeature::F1,
            );
            let d = worley.eval(fx * density, fy * density);
            (1.0 - d - (1.0 - falloff)) / falloff
        }
    };

    let m = m.clamp(0.0, 1.0);
    if config.invert { 1.0 - m } else { m }
}

// Apply the mask multiplicatively over a row-major heightmap.
pub fn apply_mask(map: &mut [f32], width: usize, height: usize, config: &MaskConfig) {
    if !config.enabled || config.shape == MaskShape::None {
        return;
    }
    for y in 0..height {
        for x in 0..width {
            let m = compute_mask(x, y, width, height, config) as f32;
            map[y * width + x] *= m;
        }
    }
}

// Point-in-polygon by edge-crossing parity, softened by the distance
// to the nearest edge. Fewer than three points cannot enclose area,
// so the mask degrades to a no-op.
fn polygon_mask(fx: f64, fy: f64, points: &[(f64, f64)], falloff: f64) -> f64 {
    if points.len() < 3 {
        return 1.0;
    }
    let mut inside = false;
    let mut min_d = f64::MAX;
    let n = points.len();
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        // crossing parity: does the horizontal ray at fy cross edge (i, j)?
        if (yi > fy) != (yj > fy) {
            let xc = xi + (fy - yi) / (yj - yi) * (xj - xi);
            if fx < xc {
                inside = !inside;
            }
        }
        min_d = min_d.min(segment_distance(fx, fy, xi, yi, xj, yj));
        j = i;
    }
    if inside { min_d / falloff } else { 0.0 }
}

// Distance from a point to a segment; degenerate edges collapse to
// point distance instead of dividing by a vanishing length.
fn segment_distance(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let vx = bx - ax;
    let vy = by - ay;
    let len2 = vx * vx + vy * vy;
    if len2 < EPSILON * EPSILON {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * vx + (py - ay) * vy) / len2).clamp(0.0, 1.0);
    let cx = ax + t * vx;
    let cy = ay + t * vy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
