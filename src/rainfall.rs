//! Seasonal rainfall from wind fetch
//!
//! Fetch measures how far wind has travelled over water, and so how moist it
//! is. The walk runs on two alternating marker buffers: every ocean cell
//! starts marked, and each step every marked cell passes its marker one cell
//! downwind, bumping a persistent per-cell fetch counter. Mountains absorb
//! the marker instead and collect bonus rainfall, which is what casts a rain
//! shadow behind them.
//!
//! Rainfall is then a weighted sum of the cell's own fetch and its four
//! rectangular neighbors', plus flat adjustments for land, the heat equator,
//! heat-equator adjacency, and the dry flank of circular wind systems.

use crate::cell::{Pressure, WIND_E, WIND_N, WIND_S, WIND_W};
use crate::config::MapParams;
use crate::grid::Grid;

const WIND_NE: u8 = WIND_N | WIND_E;
const WIND_NW: u8 = WIND_N | WIND_W;
const WIND_SE: u8 = WIND_S | WIND_E;
const WIND_SW: u8 = WIND_S | WIND_W;

/// Compute per-season rainfall for every cell, clamped to 0..255.
pub fn compute(grid: &mut Grid, params: &MapParams) {
    let dim = grid.dimension();
    let seasons = grid.num_seasons();
    let cell_count = dim * dim;

    let mut marked = vec![0u8; cell_count];
    let mut next_marked = vec![0u8; cell_count];
    let mut fetch = vec![0i32; cell_count];
    // Accumulates mountain rainfall during the walk; the final pass starts
    // from it.
    let mut rain = vec![0i32; cell_count];

    for season in 0..seasons {
        for id in 0..cell_count {
            marked[id] = if grid.cell(id).is_water() { 1 } else { 0 };
            next_marked[id] = 0;
            fetch[id] = 0;
            rain[id] = 0;
        }

        for _ in 0..params.max_fetch {
            for x in 0..dim {
                for y in 0..dim {
                    let idx = y * dim + x;
                    if marked[idx] == 0 {
                        continue;
                    }
                    marked[idx] = 0;

                    let cell = grid.at(x, y);
                    if cell.terrain.is_mountain() {
                        rain[idx] += params.mountain_delta;
                        continue;
                    }

                    let (ix, iy) = (x as i32, y as i32);
                    match cell.wind[season] {
                        WIND_NE => carry(ix + 1, iy - 1, dim, &mut next_marked, &mut fetch),
                        WIND_NW => carry(ix - 1, iy - 1, dim, &mut next_marked, &mut fetch),
                        WIND_SE => carry(ix + 1, iy + 1, dim, &mut next_marked, &mut fetch),
                        WIND_SW => carry(ix - 1, iy + 1, dim, &mut next_marked, &mut fetch),
                        WIND_N => carry(ix, iy - 1, dim, &mut next_marked, &mut fetch),
                        WIND_S => carry(ix, iy + 1, dim, &mut next_marked, &mut fetch),
                        WIND_E => carry(ix + 1, iy, dim, &mut next_marked, &mut fetch),
                        WIND_W => carry(ix - 1, iy, dim, &mut next_marked, &mut fetch),
                        _ => {}
                    }
                }
            }
            std::mem::swap(&mut marked, &mut next_marked);
        }

        for x in 0..dim {
            for y in 0..dim {
                let idx = y * dim + x;
                let mut total = rain[idx];
                let mut near_heq = false;
                let mut on_flank = false;

                // The cell itself and its four rectangular neighbors all
                // contribute fetch and flag heat-equator or flank adjacency.
                let mut spots = grid.rect_neighbors(x, y);
                spots.push((x, y));
                for (nx, ny) in spots {
                    let neighbor = grid.at(nx, ny);
                    if neighbor.pressure[season] == Pressure::HeatEquator {
                        near_heq = true;
                    }
                    if neighbor.wind[season] & WIND_S != 0 {
                        on_flank = true;
                    }
                    total += fetch[ny * dim + nx] + params.near_fetch_delta;
                }

                total += params.rain_const + params.fetch_delta * fetch[idx];

                let cell = grid.at(x, y);
                if !cell.is_water() {
                    total += params.land_delta;
                }
                if cell.pressure[season] == Pressure::HeatEquator {
                    total += params.heq_delta;
                }
                if near_heq {
                    total += params.near_heq_delta;
                }
                if on_flank {
                    total += params.flank_delta;
                }

                grid.at_mut(x, y).rainfall[season] = total.clamp(0, 255) as u8;
            }
        }
    }
}

/// Drop a marker one cell downwind. X wraps around the seam; a step past the
/// top or bottom row falls off the map.
fn carry(x: i32, y: i32, dim: usize, next_marked: &mut [u8], fetch: &mut [i32]) {
    let x = if x == -1 {
        dim - 1
    } else if x == dim as i32 {
        0
    } else {
        x as usize
    };
    if y == -1 || y == dim as i32 {
        return;
    }
    let idx = y as usize * dim + x;
    next_marked[idx] = 1;
    fetch[idx] += 1;
}
