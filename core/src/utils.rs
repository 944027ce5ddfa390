// Demo-facing glue over the flat heightmap model. The engine's
// contract is configuration in, row-major [0, 1] floats out; turning
// those floats into pictures is the demos' business.

const GAMMA_CORRECTION: f32 = 1.2;
const WATER_THRESHOLD: f32 = 0.3;
const SAND_THRESHOLD: f32 = 0.4;
const GRASS_THRESHOLD: f32 = 0.6;
const ROCK_THRESHOLD: f32 = 0.8;

// Linearly interpolate between two RGB triples
fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

// Map a height in [0, 1] to a banded terrain color
fn height_to_rgb(h: f32) -> [u8; 3] {
    match h {
        x if x < WATER_THRESHOLD => {
            let t = x / WATER_THRESHOLD;
            lerp_color([0, 0, 128], [0, 128, 255], t) // deep to shallow water
        }
        x if x < SAND_THRESHOLD => {
            let t = (x - WATER_THRESHOLD) / (SAND_THRESHOLD - WATER_THRESHOLD);
            lerp_color([194, 178, 128], [220, 200, 160], t) // sand
        }
        x if x < GRASS_THRESHOLD => {
            let t = (x - SAND_THRESHOLD) / (GRASS_THRESHOLD - SAND_THRESHOLD);
            lerp_color([34, 139, 34], [50, 205, 50], t) // grass
        }
        x if x < ROCK_THRESHOLD => {
            let t = (x - GRASS_THRESHOLD) / (ROCK_THRESHOLD - GRASS_THRESHOLD);
            lerp_color([128, 128, 128], [192, 192, 192], t) // rock
        }
        x => {
            let t = (x - ROCK_THRESHOLD) / (1.0 - ROCK_THRESHOLD);
            lerp_color([220, 220, 220], [255, 255, 255], t) // snow
        }
    }
}

// Convert a flat row-major heightmap into an RGB byte buffer
pub fn to_terrain_image(map: &[f32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(map.len() * 3);
    for &h in map {
        let [r, g, b] = height_to_rgb(h);
        buf.extend_from_slice(&[r, g, b]);
    }
    buf
}

// Stretch a heightmap to span the full [0, 1] range, with a gamma
// curve for contrast. Useful before rendering; the pipeline itself
// already produces values at rest in [0, 1].
pub fn normalize2(map: &mut [f32]) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &v in map.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    let range = (max - min).max(0.001); // prevent zero-division
    for v in map.iter_mut() {
        *v = ((*v - min) / range).powf(GAMMA_CORRECTION);
    }
}
