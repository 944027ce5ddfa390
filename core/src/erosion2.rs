// Iterative erosion over a finished row-major heightmap. Both passes
// accumulate transfers into a separate delta buffer and apply them at
// the end of the pass, so the result never depends on the order cells
// are visited within one pass.
//
// Boundary convention: with `wrap` set, neighbor lookups wrap around
// both axes; otherwise out-of-bounds neighbors simply contribute
// nothing. This differs from the cellular automaton, where
// out-of-bounds neighbors count as walls.

const NEIGHBORS4: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// Index of the neighbor at (x+dx, y+dy), or None when it falls off a
// non-wrapping edge.
#[inline]
fn neighbor_index(
    x: usize,
    y: usize,
    dx: i64,
    dy: i64,
    width: usize,
    height: usize,
    wrap: bool,
) -> Option<usize> {
    let nx = x as i64 + dx;
    let ny = y as i64 + dy;
    if wrap {
        let nx = nx.rem_euclid(width as i64) as usize;
        let ny = ny.rem_euclid(height as i64) as usize;
        Some(ny * width + nx)
    } else if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
        Some(ny as usize * width + nx as usize)
    } else {
        None
    }
}

// Thermal erosion: material slides off slopes steeper than the talus
// threshold toward each lower 4-neighbor.
pub struct ThermalErosion2D {
    iterations: u32,
    // minimum height difference before material moves
    talus: f32,
    // fraction of the difference transferred per pass
    rate: f32,
    wrap: bool,
}

impl ThermalErosion2D {
    pub fn new(iterations: u32, talus: f32, rate: f32, wrap: bool) -> Self {
        Self {
            iterations,
            talus,
            rate,
            wrap,
        }
    }

    pub fn apply(&self, map: &mut [f32], width: usize, height: usize) {
        for _ in 0..self.iterations {
            let mut delta = vec![0.0f32; map.len()];
            for y in 0..height {
                for x in 0..width {
                    let idx = y * width + x;
                    let curr = map[idx];
                    for &(dx, dy) in &NEIGHBORS4 {
                        let Some(n) = neighbor_index(x, y, dx, dy, width, height, self.wrap)
                        else {
                            continue;
                        };
                        // only the higher side of a pair schedules a
                        // transfer, so each slope is handled once
                        let diff = curr - map[n];
                        if diff > self.talus {
                            let amount = diff * self.rate;
                            delta[idx] -= amount;
                            delta[n] += amount;
                        }
                    }
                }
            }
            apply_deltas(map, &delta);
        }
    }
}

// Hydraulic erosion: each cell erodes in proportion to its total
// downhill drop and re-deposits a fraction to its downhill neighbors
// according to their share of the drop. The remaining material is
// discarded, modelling sediment leaving the local domain; the pass
// does not conserve mass.
pub struct HydraulicErosion2D {
    iterations: u32,
    rate: f32,
    deposit: f32,
    wrap: bool,
}

impl HydraulicErosion2D {
    pub fn new(iterations: u32, rate: f32, deposit: f32, wrap: bool) -> Self {
        Self {
            iterations,
            rate,
            deposit,
            wrap,
        }
    }

    pub fn apply(&self, map: &mut [f32], width: usize, height: usize) {
        for _ in 0..self.iterations {
            let mut delta = vec![0.0f32; map.len()];
            for y in 0..height {
                for x in 0..width {
                    let idx = y * width + x;
                    let curr = map[idx];

                    // collect the downhill drops to the 4-neighborhood
                    let mut drops: [(usize, f32); 4] = [(0, 0.0); 4];
                    let mut count = 0;
                    let mut total = 0.0f32;
                    for &(dx, dy) in &NEIGHBORS4 {
                        let Some(n) = neighbor_index(x, y, dx, dy, width, height, self.wrap)
                        else {
                            continue;
                        };
                        let dh = curr - map[n];
                        if dh > 0.0 {
                            drops[count] = (n, dh);
                            count += 1;
                            total += dh;
                        }
                    }
                    if total <= 0.0 {
                        continue;
                    }

                    // never erode below zero height
                    let eroded = (total * self.rate).min(curr);
                    delta[idx] -= eroded;
                    let deposited = eroded * self.deposit;
                    for &(n, dh) in &drops[..count] {
                        delta[n] += deposited * (dh / total);
                    }
                }
            }
            apply_deltas(map, &delta);
        }
    }
}

// Apply a pass's accumulated transfers atomically and keep every cell
// inside the resting [0, 1] range.
fn apply_deltas(map: &mut [f32], delta: &[f32]) {
    for (cell, d) in map.iter_mut().zip(delta) {
        *cell = (*cell + d).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::{HydraulicErosion2D, ThermalErosion2D};

    #[test]
    fn thermal_flat_field_is_unchanged() {
        // diff = 0 everywhere, never above the talus threshold
        let mut map = vec![0.5f32; 25];
        ThermalErosion2D::new(3, 0.0, 1.0, false).apply(&mut map, 5, 5);
        assert!(map.iter().all(|&v| v == 0.5));
    }

    #[test]
    fn thermal_peak_spreads_to_neighbors() {
        let mut map = vec![0.0f32; 9];
        map[4] = 1.0; // peak at the center of a 3×3 map
        ThermalErosion2D::new(1, 0.1, 0.2, false).apply(&mut map, 3, 3);
        assert!(map[4] < 1.0);
        // the four cardinal neighbors each received material
        for &n in &[1usize, 3, 5, 7] {
            assert!(map[n] > 0.0);
        }
        // the diagonals are untouched by a 4-neighborhood pass
        for &n in &[0usize, 2, 6, 8] {
            assert_eq!(map[n], 0.0);
        }
    }

    #[test]
    fn thermal_determinism() {
        let base: Vec<f32> = (0..25).map(|i| (i as f32 * 0.07) % 1.0).collect();
        let mut m1 = base.clone();
        let mut m2 = base;
        ThermalErosion2D::new(4, 0.05, 0.3, false).apply(&mut m1, 5, 5);
        ThermalErosion2D::new(4, 0.05, 0.3, false).apply(&mut m2, 5, 5);
        assert_eq!(m1, m2);
    }

    #[test]
    fn thermal_wrap_reaches_across_the_seam() {
        // a single high column on the left edge: with wrap the right
        // edge is its neighbor and receives material
        let mut map = vec![0.0f32; 16];
        for y in 0..4 {
            map[y * 4] = 1.0;
        }
        ThermalErosion2D::new(1, 0.1, 0.2, true).apply(&mut map, 4, 4);
        for y in 0..4 {
            assert!(map[y * 4 + 3] > 0.0, "row {} right edge untouched", y);
        }
    }

    #[test]
    fn thermal_output_stays_in_range() {
        let mut map: Vec<f32> = (0..64).map(|i| ((i * 37) % 64) as f32 / 63.0).collect();
        ThermalErosion2D::new(10, 0.0, 0.9, false).apply(&mut map, 8, 8);
        assert!(map.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn hydraulic_flat_field_is_unchanged() {
        let mut map = vec![0.3f32; 25];
        HydraulicErosion2D::new(5, 0.5, 0.5, false).apply(&mut map, 5, 5);
        assert!(map.iter().all(|&v| v == 0.3));
    }

    #[test]
    fn hydraulic_discards_part_of_the_eroded_mass() {
        // deposit < 1 leaks mass out of the domain
        let mut map = vec![0.0f32; 9];
        map[4] = 1.0;
        let before: f32 = map.iter().sum();
        HydraulicErosion2D::new(1, 0.1, 0.5, false).apply(&mut map, 3, 3);
        let after: f32 = map.iter().sum();
        assert!(after < before);
        assert!(map[4] < 1.0);
        assert!(map[1] > 0.0);
    }

    #[test]
    fn hydraulic_never_erodes_below_zero() {
        let mut map = vec![0.0f32; 9];
        map[4] = 0.01;
        // an aggressive rate is capped by the available height
        HydraulicErosion2D::new(3, 100.0, 0.0, false).apply(&mut map, 3, 3);
        assert!(map.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn hydraulic_determinism() {
        let base: Vec<f32> = (0..36).map(|i| ((i * 13) % 36) as f32 / 35.0).collect();
        let mut m1 = base.clone();
        let mut m2 = base;
        HydraulicErosion2D::new(4, 0.2, 0.6, true).apply(&mut m1, 6, 6);
        HydraulicErosion2D::new(4, 0.2, 0.6, true).apply(&mut m2, 6, 6);
        assert_eq!(m1, m2);
    }
}
