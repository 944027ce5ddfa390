use terragen_core::config::{ErosionConfig, NoiseMapConfig, ThermalConfig};
use terragen_core::generate_noise_map;
use terragen_core::utils::normalize2;

fn main() {
    env_logger::init();

    // A 129×129 FBM map with 5 thermal erosion passes
    let config = NoiseMapConfig {
        width: 129,
        height: 129,
        seed: 2025,
        scale: 48.0,
        octaves: 5,
        erosion: ErosionConfig {
            thermal: ThermalConfig {
                enabled: true,
                iterations: 5,
                talus: 0.01,
                rate: 0.25,
            },
            ..ErosionConfig::default()
        },
        ..NoiseMapConfig::default()
    };
    let mut map = generate_noise_map(&config);
    // Stretch the contrast so the printed corner spans the full range
    normalize2(&mut map);

    // Print the top-left 16×16 corner of the map
    for y in 0..16 {
        for x in 0..16 {
            print!("{:>6.3} ", map[y * 129 + x]);
        }
        println!();
    }
}
