use crate::rng::Xorshift32;

// Moore neighborhood: all eight cells around a grid cell.
const NEIGHBORS8: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// Cave-style binary grid generator: a random fill followed by
// birth/death generations of an 8-neighborhood rule. Cells are 0
// (empty) or 1 (wall).
//
// Boundary convention: out-of-bounds neighbors count as walls unless
// `wrap` is set, in which case lookups wrap around. This is the
// opposite of the erosion passes, where out-of-bounds neighbors
// contribute nothing.
pub struct CellularAutomata2D {
    width: usize,
    height: usize,
    birth_limit: u32,
    death_limit: u32,
    wrap: bool,
}

impl CellularAutomata2D {
    pub fn new(width: usize, height: usize, birth_limit: u32, death_limit: u32, wrap: bool) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            // a cell has at most 8 neighbors
            birth_limit: birth_limit.min(8),
            death_limit: death_limit.min(8),
            wrap,
        }
    }

    // Random initial grid: each cell independently becomes a wall
    // with probability `fill`.
    pub fn seed_grid(&self, seed: u32, fill: f64) -> Vec<u8> {
        let fill = fill.clamp(0.0, 1.0);
        let mut rng = Xorshift32::new(seed);
        let mut grid = Vec::with_capacity(self.width * self.height);
        for _ in 0..self.width * self.height {
            let (next, r) = rng.next();
            rng = next;
            grid.push(u8::from(r < fill));
        }
        grid
    }

    // Run the birth/death rule for `iterations` generations.
    // Double-buffered: every generation reads one grid and writes the
    // other, so in-generation updates never feed back on themselves.
    pub fn run(&self, grid: &mut Vec<u8>, iterations: u32) {
        let mut back = vec![0u8; grid.len()];
        for _ in 0..iterations {
            self.step(grid, &mut back);
            std::mem::swap(grid, &mut back);
        }
    }

    fn step(&self, curr: &[u8], next: &mut [u8]) {
        for y in 0..self.height {
            for x in 0..self.width {
                let walls = self.wall_neighbors(curr, x, y);
                let idx = y * self.width + x;
                next[idx] = if curr[idx] == 1 {
                    // a wall survives with enough wall support
                    u8::from(walls >= self.death_limit)
                } else {
                    // an empty cell fills in when surrounded
                    u8::from(walls >= self.birth_limit)
                };
            }
        }
    }

    fn wall_neighbors(&self, grid: &[u8], x: usize, y: usize) -> u32 {
        let mut walls = 0;
        for &(dx, dy) in &NEIGHBORS8 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if self.wrap {
                let nx = nx.rem_euclid(self.width as i64) as usize;
                let ny = ny.rem_euclid(self.height as i64) as usize;
                walls += grid[ny * self.width + nx] as u32;
            } else if nx >= 0 && nx < self.width as i64 && ny >= 0 && ny < self.height as i64 {
                walls += grid[ny as usize * self.width + nx as usize] as u32;
            } else {
                // off-grid counts as solid wall
                walls += 1;
            }
        }
        walls
    }
}

// N passes of a 3×3 box blur over a row-major float map, used to
// soften the hard binary edges of the automaton output. With `wrap`
// the kernel wraps around; otherwise edge cells average over the
// in-bounds samples only.
pub fn smooth(map: &mut Vec<f32>, width: usize, height: usize, passes: u32, wrap: bool) {
    for _ in 0..passes {
        let mut out = vec![0.0f32; map.len()];
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0.0f32;
                let mut count = 0u32;
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if wrap {
                            let nx = nx.rem_euclid(width as i64) as usize;
                            let ny = ny.rem_euclid(height as i64) as usize;
                            sum += map[ny * width + nx];
                            count += 1;
                        } else if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
                            sum += map[ny as usize * width + nx as usize];
                            count += 1;
                        }
                    }
                }
                out[y * width + x] = sum / count as f32;
            }
        }
        *map = out;
    }
}

#[cfg(test)]
mod tests {
    use super::{CellularAutomata2D, smooth};

    #[test]
    fn seed_grid_determinism() {
        let ca = CellularAutomata2D::new(16, 16, 5, 4, false);
        assert_eq!(ca.seed_grid(42, 0.45), ca.seed_grid(42, 0.45));
    }

    #[test]
    fn seed_grid_fill_extremes() {
        let ca = CellularAutomata2D::new(8, 8, 5, 4, false);
        assert!(ca.seed_grid(1, 0.0).iter().all(|&c| c == 0));
        assert!(ca.seed_grid(1, 1.0).iter().all(|&c| c == 1));
        // out-of-domain probabilities clamp instead of failing
        assert!(ca.seed_grid(1, 2.5).iter().all(|&c| c == 1));
    }

    #[test]
    fn out_of_bounds_counts_as_wall() {
        // a 1×1 grid: all 8 neighbors are off-grid, so without wrap
        // the lone empty cell sees 8 walls and is born
        let ca = CellularAutomata2D::new(1, 1, 8, 4, false);
        let mut grid = vec![0u8];
        ca.run(&mut grid, 1);
        assert_eq!(grid, vec![1]);
    }

    #[test]
    fn wrap_turns_the_border_into_itself() {
        // the same 1×1 grid with wrap: every neighbor lookup lands on
        // the cell itself, which is empty, so nothing is born
        let ca = CellularAutomata2D::new(1, 1, 8, 4, true);
        let mut grid = vec![0u8];
        ca.run(&mut grid, 1);
        assert_eq!(grid, vec![0]);
    }

    #[test]
    fn isolated_wall_dies() {
        // a single wall with zero wall neighbors cannot survive a
        // death limit above zero
        let ca = CellularAutomata2D::new(5, 5, 5, 4, true);
        let mut grid = vec![0u8; 25];
        grid[12] = 1;
        ca.run(&mut grid, 1);
        assert_eq!(grid[12], 0);
    }

    #[test]
    fn full_grid_is_stable() {
        let ca = CellularAutomata2D::new(6, 6, 5, 4, true);
        let mut grid = vec![1u8; 36];
        ca.run(&mut grid, 3);
        assert!(grid.iter().all(|&c| c == 1));
    }

    #[test]
    fn run_determinism() {
        let ca = CellularAutomata2D::new(20, 20, 5, 4, false);
        let mut a = ca.seed_grid(7, 0.45);
        let mut b = ca.seed_grid(7, 0.45);
        ca.run(&mut a, 6);
        ca.run(&mut b, 6);
        assert_eq!(a, b);
    }

    #[test]
    fn smooth_preserves_uniform_fields() {
        let mut map = vec![0.25f32; 64];
        smooth(&mut map, 8, 8, 3, false);
        for &v in &map {
            assert!((v - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn smooth_stays_in_range() {
        let mut map: Vec<f32> = (0..64).map(|i| (i % 2) as f32).collect();
        smooth(&mut map, 8, 8, 2, true);
        assert!(map.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
