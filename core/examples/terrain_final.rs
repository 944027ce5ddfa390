use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use std::path::Path;
use terragen_core::config::{
    ErosionConfig, FractalMode, MaskConfig, MaskShape, NoiseMapConfig, ThermalConfig,
    WarpLayerConfig,
};
use terragen_core::generate_noise_map;

// Compute simple hillshade for a flat row-major height-map
// `z_scale` adjusts vertical exaggeration
fn hillshade(map: &[f32], width: usize, height: usize, z_scale: f32) -> Vec<f32> {
    let mut shade = vec![0.0f32; map.len()];
    let azimuth = std::f32::consts::PI / 4.0; // 45°
    let altitude = std::f32::consts::PI / 4.0; // 45°
    let (sin_alt, cos_alt) = altitude.sin_cos();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            // 3×3 neighborhood finite differences
            let dzdx = ((map[y * width + x + 1] - map[y * width + x - 1]) / 2.0) * z_scale;
            let dzdy = ((map[(y + 1) * width + x] - map[(y - 1) * width + x]) / 2.0) * z_scale;
            // Surface normal
            let nx = -dzdx;
            let ny = -dzdy;
            let nz = 1.0;
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let (nx, ny, nz) = (nx / len, ny / len, nz / len);
            // Light vector from azimuth/altitude
            let lx = azimuth.cos() * cos_alt;
            let ly = azimuth.sin() * cos_alt;
            let lz = sin_alt;
            // Lambertian dot
            shade[y * width + x] = (nx * lx + ny * ly + nz * lz).max(0.0);
        }
    }
    shade
}

fn main() {
    env_logger::init();

    let size = 512usize;
    let config = NoiseMapConfig {
        width: size,
        height: size,
        seed: 2025,
        fractal: FractalMode::Ridged,
        scale: 128.0,
        octaves: 6,
        warp_layers: vec![WarpLayerConfig {
            seed: 4242,
            scale: 192.0,
            amplitude_x: 48.0,
            amplitude_y: 48.0,
            ..WarpLayerConfig::default()
        }],
        erosion: ErosionConfig {
            thermal: ThermalConfig {
                enabled: true,
                iterations: 20,
                talus: 0.005,
                rate: 0.25,
            },
            ..ErosionConfig::default()
        },
        mask: MaskConfig {
            enabled: true,
            shape: MaskShape::Circle {
                center_x: 0.5,
                center_y: 0.5,
                radius: 0.48,
            },
            invert: false,
            falloff: 0.6,
        },
        ..NoiseMapConfig::default()
    };
    let terrain = generate_noise_map(&config);

    // Compute hillshade
    let shade = hillshade(&terrain, size, size, 4.0);

    // Color gradient - deep water to beach to grass to rock to snow
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)), // deep blue
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)), // sand
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)), // green
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)), // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)), // snow
    ]);

    // Build final image: gradient color modulated by the hillshade
    let mut img = RgbImage::new(size as u32, size as u32);
    for y in 0..size {
        for x in 0..size {
            let h = terrain[y * size + x];
            let col: LinSrgb = gradient.get(h);
            let light = 0.4 + 0.6 * shade[y * size + x];
            let rgb = LinSrgb::new(col.red * light, col.green * light, col.blue * light)
                .into_format::<u8>();
            img.put_pixel(x as u32, y as u32, Rgb([rgb.red, rgb.green, rgb.blue]));
        }
    }

    let path = Path::new("terrain_final.png");
    img.save(path).expect("failed to write terrain_final.png");
    println!("wrote {}", path.display());
}
