//! Fractal elevation synthesis
//!
//! Diamond-square midpoint displacement on a toroidal grid. Two phases: a
//! coarse initialization that seeds independent random values at widening
//! intervals, then the classic refinement that averages square and diamond
//! corners with a shrinking random offset. Elevations are normalized to
//! [0, 1] and squared to flatten the lowlands.
//!
//! Every random draw comes from the one generator passed in, in the exact
//! nested-loop order below; reordering draws changes the map for a given
//! seed.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::MapParams;
use crate::error::MapError;
use crate::grid::Grid;

/// Synthesize the elevation field for the whole grid.
pub fn generate(grid: &mut Grid, params: &MapParams, rng: &mut ChaCha8Rng) -> Result<(), MapError> {
    let dim = grid.dimension();

    // Initial amplitude covers [-1, 1].
    let mut amplitude = 2.0f64;
    let mut step = dim >> 1;
    let mut iterations = params.iterations;

    set(grid, 0, 0, draw(rng, amplitude));

    // Coarse phase: independent random values at both the square and diamond
    // sample points, no averaging, amplitude held fixed.
    while iterations > 0 && step > 0 {
        let mut y = step;
        while y < dim {
            let mut x = step;
            while x < dim {
                set(grid, x, y, draw(rng, amplitude));
                set(grid, x, (y + step) % dim, draw(rng, amplitude));
                x += step << 1;
            }
            y += step << 1;
        }
        step >>= 1;
        iterations -= 1;
    }

    // Refinement: diamond step then square step at each remaining scale,
    // shrinking the random amplitude by 2^-roughness after each.
    while step > 0 {
        let mut y = step;
        while y < dim {
            let mut x = step;
            while x < dim {
                let avg = square_average(grid, x, y, step) + draw(rng, amplitude);
                set(grid, x, y, avg);
                x += step << 1;
            }
            y += step << 1;
        }

        let mut y = step;
        while y < dim {
            let mut x = step;
            while x < dim {
                let avg = diamond_average(grid, x, y - step, step) + draw(rng, amplitude);
                set(grid, x, y - step, avg);

                let avg = diamond_average(grid, x - step, y, step) + draw(rng, amplitude);
                set(grid, x - step, y, avg);

                let xe = (x + step) % dim;
                let avg = diamond_average(grid, xe, y, step) + draw(rng, amplitude);
                set(grid, xe, y, avg);

                let ys = (y + step) % dim;
                let avg = diamond_average(grid, x, ys, step) + draw(rng, amplitude);
                set(grid, x, ys, avg);

                x += step << 1;
            }
            y += step << 1;
        }

        amplitude *= 2f64.powf(-params.roughness as f64);
        step >>= 1;
    }

    normalize(grid)
}

/// One random offset in [-amplitude/2, +amplitude/2).
fn draw(rng: &mut ChaCha8Rng, amplitude: f64) -> f32 {
    (rng.gen::<f64>() * amplitude - amplitude / 2.0) as f32
}

fn set(grid: &mut Grid, x: usize, y: usize, elevation: f32) {
    grid.at_mut(x, y).elevation = elevation;
}

fn elevation(grid: &Grid, x: usize, y: usize) -> f32 {
    grid.at(x, y).elevation
}

/// Average of the four diagonal corners at distance `step`.
///
/// The two negative offsets are always in range because callers only pass
/// centers at least `step` from the origin; the positive offsets wrap.
fn square_average(grid: &Grid, x: usize, y: usize, step: usize) -> f32 {
    let dim = grid.dimension();
    let sum = elevation(grid, x - step, y - step)
        + elevation(grid, (x + step) % dim, y - step)
        + elevation(grid, (x + step) % dim, (y + step) % dim)
        + elevation(grid, x - step, (y + step) % dim);
    sum / 4.0
}

/// Average of the four orthogonal corners at distance `step`, wrapping both
/// axes toroidally.
fn diamond_average(grid: &Grid, x: usize, y: usize, step: usize) -> f32 {
    let dim = grid.dimension();
    let sum = elevation(grid, x, (y + dim - step) % dim)
        + elevation(grid, (x + dim - step) % dim, y)
        + elevation(grid, (x + step) % dim, y)
        + elevation(grid, x, (y + step) % dim);
    sum / 4.0
}

/// Shift the field so the minimum is zero, divide by the new maximum, then
/// square, pushing low terrain down. Fails if the field is flat.
fn normalize(grid: &mut Grid) -> Result<(), MapError> {
    let (lowest, highest) = elevation_bounds(grid);
    let span = highest - lowest;
    if !(span > 0.0) {
        return Err(MapError::DegenerateInput { phase: "elevation" });
    }
    for id in 0..grid.len() {
        let cell = grid.cell_mut(id);
        let normalized = (cell.elevation - lowest) / span;
        cell.elevation = normalized * normalized;
    }
    Ok(())
}

/// Current (lowest, highest) elevation over the whole grid.
pub fn elevation_bounds(grid: &Grid) -> (f32, f32) {
    let mut lowest = f32::MAX;
    let mut highest = f32::MIN;
    for cell in grid.cells() {
        if cell.elevation < lowest {
            lowest = cell.elevation;
        }
        if cell.elevation > highest {
            highest = cell.elevation;
        }
    }
    (lowest, highest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generated_grid(dim: usize, seed: u64) -> Grid {
        let mut params = MapParams::default();
        params.dimension = dim;
        let mut grid = Grid::build(dim, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate(&mut grid, &params, &mut rng).unwrap();
        grid
    }

    #[test]
    fn test_same_seed_reproduces_field() {
        let a = generated_grid(16, 99);
        let b = generated_grid(16, 99);
        for (ca, cb) in a.cells().iter().zip(b.cells()) {
            assert_eq!(ca.elevation.to_bits(), cb.elevation.to_bits());
        }
    }

    #[test]
    fn test_different_seed_changes_field() {
        let a = generated_grid(16, 99);
        let b = generated_grid(16, 100);
        let differs = a
            .cells()
            .iter()
            .zip(b.cells())
            .any(|(ca, cb)| ca.elevation != cb.elevation);
        assert!(differs);
    }

    #[test]
    fn test_normalized_range_is_exactly_zero_to_one() {
        let grid = generated_grid(32, 7);
        let (lowest, highest) = elevation_bounds(&grid);
        assert_eq!(lowest, 0.0);
        assert_eq!(highest, 1.0);
        for cell in grid.cells() {
            assert!(cell.elevation.is_finite());
        }
    }

    #[test]
    fn test_diamond_average_wraps_left_edge() {
        // A spike in the last column must show up when averaging around the
        // first column.
        let dim = 8;
        let mut grid = Grid::build(dim, 1);
        set(&mut grid, dim - 1, 3, 8.0);
        let avg = diamond_average(&grid, 0, 3, 1);
        assert!((avg - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_square_average_wraps_both_axes() {
        let dim = 8;
        let mut grid = Grid::build(dim, 1);
        // Corner spike: from center (dim-1, dim-1) with step 1 the wrapped
        // corner (0, 0) participates.
        set(&mut grid, 0, 0, 4.0);
        let avg = square_average(&grid, dim - 1, dim - 1, 1);
        assert!((avg - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_flat_field_is_rejected() {
        // Roughness high enough that amplitudes vanish instantly would still
        // draw distinct values, so force flatness directly.
        let mut grid = Grid::build(8, 1);
        let result = normalize(&mut grid);
        assert_eq!(result, Err(MapError::DegenerateInput { phase: "elevation" }));
    }
}
