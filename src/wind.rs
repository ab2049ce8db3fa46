//! Seasonal wind from isobars
//!
//! Builds a smoothed pressure field from the distance to the nearest low and
//! high, then traces isobar crossings between adjacent cells. Crossings set
//! wind bits whose orientation flips south of the heat equator, producing
//! cyclonic flow around lows in the north and the mirror image in the south.
//! Contradictory bits are resolved at the end: north beats south, east beats
//! west.

use crate::cell::{Pressure, WIND_E, WIND_N, WIND_S, WIND_W};
use crate::config::MapParams;
use crate::grid::Grid;
use crate::range::compute_range;

/// Compute per-season wind bitmasks for every cell.
pub fn compute(grid: &mut Grid, params: &MapParams) {
    let dim = grid.dimension();
    let seasons = grid.num_seasons();
    let cell_count = dim * dim;

    let mut to_low = vec![0i32; cell_count];
    let mut to_high = vec![0i32; cell_count];
    let mut pressure_field = vec![0i32; cell_count];

    for season in 0..seasons {
        // Lows (and the heat equator, which behaves as a low) seed one
        // distance field, highs the other.
        for id in 0..cell_count {
            let cell = grid.cell_mut(id);
            cell.wind[season] = 0;
            to_low[id] = 0;
            to_high[id] = 0;
            match cell.pressure[season] {
                Pressure::Low | Pressure::HeatEquator => to_low[id] = -1,
                Pressure::High => to_high[id] = -1,
                Pressure::None => {}
            }
        }
        compute_range(&mut to_low, dim, params.max_range);
        compute_range(&mut to_high, dim, params.max_range);

        // Interpolate: 0 at a low, max_pressure at a high, proportional to
        // the distance ratio everywhere else.
        for id in 0..cell_count {
            pressure_field[id] = if to_high[id] == -1 {
                params.max_pressure
            } else if to_low[id] == -1 {
                0
            } else {
                params.max_pressure * to_low[id] / (to_low[id] + to_high[id])
            };
        }

        // Trace one isobar per bar_sep of pressure. Scanning each column
        // top to bottom, the orientation flag latches once the scan passes
        // the heat equator.
        let mut bar = params.bar_sep;
        while bar <= params.max_pressure {
            for x in 0..dim {
                let mut south_of_heq = false;
                for y in 0..dim {
                    let here = pressure_field[y * dim + x];
                    if grid.at(x, y).pressure[season] == Pressure::HeatEquator {
                        south_of_heq = true;
                    }

                    // Crossing against the cell one row up: east/west flow.
                    if y != 0 {
                        let up = pressure_field[(y - 1) * dim + x];
                        if here < bar && up >= bar {
                            let bit = if south_of_heq { WIND_E } else { WIND_W };
                            grid.at_mut(x, y).wind[season] |= bit;
                        }
                        if here >= bar && up < bar {
                            let bit = if south_of_heq { WIND_W } else { WIND_E };
                            grid.at_mut(x, y).wind[season] |= bit;
                        }
                    }

                    // Crossing against the cell one column left, wrapping
                    // around the seam: north/south flow.
                    let left_x = if x == 0 { dim - 1 } else { x - 1 };
                    let left = pressure_field[y * dim + left_x];
                    if here < bar && left >= bar {
                        let bit = if south_of_heq { WIND_N } else { WIND_S };
                        grid.at_mut(x, y).wind[season] |= bit;
                    }
                    if here >= bar && left < bar {
                        let bit = if south_of_heq { WIND_S } else { WIND_N };
                        grid.at_mut(x, y).wind[season] |= bit;
                    }
                }
            }
            bar += params.bar_sep;
        }

        // Resolve contradictions accumulated across isobars.
        for id in 0..cell_count {
            let cell = grid.cell_mut(id);
            let mut wind = cell.wind[season];
            if wind & WIND_N != 0 {
                wind &= !WIND_S;
            }
            if wind & WIND_E != 0 {
                wind &= !WIND_W;
            }
            cell.wind[season] = wind;
        }
    }
}
