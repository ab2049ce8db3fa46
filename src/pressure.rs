//! Seasonal pressure zones and the heat equator
//!
//! Ocean highs and lows must sit over ocean far from any major landmass;
//! land highs and lows mirror that over land far from any major ocean. Both
//! are found with two passes of the bounded distance transform: the first
//! measures distance from the coast, the second measures distance from the
//! "big" blobs that survive an ignore threshold (islands and lakes drop
//! out). Scaled-temperature bands then pick the actual zones.
//!
//! The heat equator is marked per column at the row where the cumulative
//! scaled temperature crosses half the column total, and consecutive columns
//! are joined with a vertical run so the line stays connected. There is no
//! such join between the last and first column, so the line may break at the
//! horizontal seam.

use crate::cell::Pressure;
use crate::config::MapParams;
use crate::grid::Grid;
use crate::range::compute_range;

/// Compute per-season pressure states for every cell.
pub fn compute(grid: &mut Grid, params: &MapParams) {
    let dim = grid.dimension();
    let seasons = grid.num_seasons();
    let mut scratch = vec![0i32; dim * dim];

    // Carried across seasons on purpose: the first column of a season joins
    // to wherever the previous season's last column ended.
    let mut previous_row = 0usize;

    for season in 0..seasons {
        ocean_zones(grid, params, season, &mut scratch);
        land_zones(grid, params, season, &mut scratch);
        previous_row = heat_equator(grid, season, previous_row);
    }
}

/// Ocean pressure zones. Also clears every cell's pressure for the season.
fn ocean_zones(grid: &mut Grid, params: &MapParams, season: usize, scratch: &mut [i32]) {
    let dim = grid.dimension();

    // Distance over land from the coast; ocean cells are the sources.
    for id in 0..grid.len() {
        scratch[id] = if grid.cell(id).is_water() { -1 } else { 0 };
    }
    compute_range(scratch, dim, params.max_range);

    // Keep only land well clear of the coast, then measure distance from
    // those blobs. Islands thinner than the ignore radius vanish here.
    for value in scratch.iter_mut() {
        *value = if *value > params.ocean_land_ignore { -1 } else { 0 };
    }
    compute_range(scratch, dim, params.max_range);

    for id in 0..grid.len() {
        let far_from_land = scratch[id] > params.ocean_land_dist;
        let cell = grid.cell_mut(id);
        cell.pressure[season] = Pressure::None;
        let t = cell.scaled_temperature[season] as i32;
        if far_from_land {
            if t >= params.ocean_low_min && t <= params.ocean_low_max {
                cell.pressure[season] = Pressure::Low;
            }
            if t >= params.ocean_high_min && t <= params.ocean_high_max {
                cell.pressure[season] = Pressure::High;
            }
        }
    }
}

/// Land pressure zones, the mirror of `ocean_zones`; lakes below the ignore
/// radius do not count as ocean.
fn land_zones(grid: &mut Grid, params: &MapParams, season: usize, scratch: &mut [i32]) {
    let dim = grid.dimension();

    for id in 0..grid.len() {
        scratch[id] = if grid.cell(id).is_water() { 0 } else { -1 };
    }
    compute_range(scratch, dim, params.max_range);

    for value in scratch.iter_mut() {
        *value = if *value > params.land_ocean_ignore { -1 } else { 0 };
    }
    compute_range(scratch, dim, params.max_range);

    for id in 0..grid.len() {
        if scratch[id] > params.land_ocean_dist {
            let cell = grid.cell_mut(id);
            let t = cell.scaled_temperature[season] as i32;
            if t >= params.land_low_min && t <= params.land_low_max {
                cell.pressure[season] = Pressure::Low;
            }
            if t >= params.land_high_min && t <= params.land_high_max {
                cell.pressure[season] = Pressure::High;
            }
        }
    }
}

/// Mark the heat equator for one season and return the row it ended on in
/// the last column.
fn heat_equator(grid: &mut Grid, season: usize, mut previous_row: usize) -> usize {
    let dim = grid.dimension();

    for x in 0..dim {
        let mut total: i64 = 0;
        for y in 0..dim {
            total += grid.at(x, y).scaled_temperature[season] as i64;
        }

        // Walk down the column until the running sum crosses half the total.
        let mut remaining = total >> 1;
        let mut row = 0usize;
        while row < dim && remaining > 0 {
            remaining -= grid.at(x, row).scaled_temperature[season] as i64;
            row += 1;
        }
        let row = row.min(dim - 1);

        grid.at_mut(x, row).pressure[season] = Pressure::HeatEquator;

        // Join to the previous column's row with a vertical run. Columns 0
        // never joins backwards, so the seam between the last and first
        // column can stay discontinuous.
        if x != 0 && row > previous_row {
            for y in (previous_row..=row).rev() {
                grid.at_mut(x, y).pressure[season] = Pressure::HeatEquator;
            }
        } else if x != 0 && row < previous_row {
            for y in row..=previous_row {
                grid.at_mut(x, y).pressure[season] = Pressure::HeatEquator;
            }
        }

        previous_row = row;
    }

    previous_row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Terrain;

    /// Ocean everywhere, with scaled temperatures set uniformly.
    fn ocean_grid(dim: usize, scaled_temp: f32) -> Grid {
        let mut grid = Grid::build(dim, 1);
        for id in 0..grid.len() {
            let cell = grid.cell_mut(id);
            cell.terrain = Terrain::Ocean;
            cell.scaled_temperature[0] = scaled_temp;
        }
        grid
    }

    #[test]
    fn test_open_ocean_low_in_band() {
        // 50 sits inside the default ocean-low band of 40..65.
        let mut grid = ocean_grid(32, 50.0);
        let params = MapParams::default();
        compute(&mut grid, &params);

        // Any cell away from the heat equator should be a low: there is no
        // land anywhere, so every ocean cell qualifies by distance.
        let found_low = grid
            .cells()
            .iter()
            .any(|c| c.pressure[0] == Pressure::Low);
        assert!(found_low);
    }

    #[test]
    fn test_cold_ocean_gets_no_zone() {
        // 10 is outside both ocean bands.
        let mut grid = ocean_grid(32, 10.0);
        compute(&mut grid, &MapParams::default());
        let zoned = grid
            .cells()
            .iter()
            .any(|c| matches!(c.pressure[0], Pressure::Low | Pressure::High));
        assert!(!zoned);
    }

    #[test]
    fn test_land_near_coast_is_never_a_zone() {
        let mut grid = ocean_grid(32, 240.0);
        // A small island: too close to the coast everywhere for land zones,
        // too land-adjacent for ocean zones nearby.
        for y in 14..18 {
            for x in 14..18 {
                grid.at_mut(x, y).terrain = Terrain::Steppe;
            }
        }
        for id in 0..grid.len() {
            grid.cell_mut(id).scaled_temperature[0] = 240.0;
        }
        compute(&mut grid, &MapParams::default());
        for y in 14..18 {
            for x in 14..18 {
                assert_ne!(grid.at(x, y).pressure[0], Pressure::Low);
                assert_ne!(grid.at(x, y).pressure[0], Pressure::High);
            }
        }
    }

    #[test]
    fn test_heat_equator_is_column_connected() {
        let dim = 16;
        let mut grid = Grid::build(dim, 1);
        for id in 0..grid.len() {
            let cell = grid.cell_mut(id);
            cell.terrain = Terrain::Steppe;
            // Hotter toward the vertical center.
            let distance = (cell.y as f32 - dim as f32 / 2.0).abs();
            cell.scaled_temperature[0] = 200.0 - distance * 10.0;
        }
        compute(&mut grid, &MapParams::default());

        // Every column carries at least one heat-equator mark.
        for x in 0..dim {
            let marked = (0..dim).any(|y| grid.at(x, y).pressure[0] == Pressure::HeatEquator);
            assert!(marked, "column {x} has no heat equator");
        }
    }
}
