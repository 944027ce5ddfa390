use image::{ImageBuffer, Luma};
use terragen_core::config::CellularMapConfig;
use terragen_core::generate_cellular_map;

fn main() {
    env_logger::init();

    // Classic cave parameters: 45% fill, birth 5 / death 4
    let size = 256usize;
    let config = CellularMapConfig {
        width: size,
        height: size,
        seed: 1337,
        initial_fill: 0.45,
        iterations: 6,
        birth_limit: 5,
        death_limit: 4,
        wrap: false,
        smoothing: 1,
        ..CellularMapConfig::default()
    };
    let map = generate_cellular_map(&config);

    let img = ImageBuffer::from_fn(size as u32, size as u32, |x, y| {
        let v = map[y as usize * size + x as usize];
        Luma([(v * 255.0) as u8])
    });
    img.save("cellular_caves.png")
        .expect("failed to write cellular_caves.png");
    println!("wrote cellular_caves.png");
}
