//! Seasonal temperature model
//!
//! Per latitude row, land and sea baseline temperatures follow a sinusoidal
//! orbital model driven by axial tilt, orbital eccentricity and its phase.
//! Each cell then blends the two baselines by how much land sits in an
//! 11-wide, 5-high window around it, with separate smoothing constants for
//! land and ocean cells. Finally every temperature is rescaled into 0..254
//! from the global extremes, giving the dimensionless scale the pressure and
//! climate passes work with.

use std::f64::consts::PI;

use crate::cell::Terrain;
use crate::config::MapParams;
use crate::error::MapError;
use crate::grid::Grid;

/// Compute raw and scaled temperatures for every cell and season.
pub fn compute(grid: &mut Grid, params: &MapParams) -> Result<(), MapError> {
    let dim = grid.dimension();
    let seasons = grid.num_seasons();
    let deg2rad = PI / 180.0;

    let land_scale = deg2rad * 180.0 / (90.0 + params.land_temp_tilt * params.axial_tilt);
    let sea_scale = deg2rad * 180.0 / (90.0 + params.ocean_temp_tilt * params.axial_tilt);
    let season_arc = 2.0 * PI / seasons as f64;

    let mut land_baseline = vec![0.0f64; seasons];
    let mut sea_baseline = vec![0.0f64; seasons];

    let mut coldest = f32::MAX;
    let mut hottest = f32::MIN;

    for y in 0..dim {
        let latitude = 90.0 - 180.0 * y as f64 / dim as f64;

        let mut theta = 0.0f64;
        for season in 0..seasons {
            let mut phase = theta + params.eccentricity_phase;
            if phase > 2.0 * PI {
                phase -= 2.0 * PI;
            }
            let orbit = (1.0 + params.orbital_eccentricity * phase.cos()) * params.temp_scale as f64;

            let angle = (latitude + theta.cos() * params.axial_tilt * params.land_temp_tilt)
                * land_scale;
            land_baseline[season] =
                (params.base_land_temp + params.land_temp_variance * angle.cos()) * orbit;

            let angle = (latitude + theta.cos() * params.axial_tilt * params.ocean_temp_tilt)
                * sea_scale;
            sea_baseline[season] =
                (params.base_ocean_temp + params.ocean_temp_variance * angle.cos()) * orbit;

            theta += season_arc;
        }

        for x in 0..dim {
            let nearby_land = count_land(grid, x, y) as f64;
            let blend = if grid.at(x, y).is_water() {
                params.ocean_smooth + nearby_land / params.ocean_div
            } else {
                params.land_smooth + nearby_land / params.land_div
            };

            for season in 0..seasons {
                let temp = (sea_baseline[season]
                    + (land_baseline[season] - sea_baseline[season]) * blend)
                    as f32;
                grid.at_mut(x, y).temperature[season] = temp;
                if temp < coldest {
                    coldest = temp;
                }
                if temp > hottest {
                    hottest = temp;
                }
            }
        }
    }

    if !(hottest > coldest) {
        return Err(MapError::DegenerateInput { phase: "temperature" });
    }

    // Rescale all temperatures into 0..254 from the global range.
    let scale = 254.0 / (hottest - coldest);
    for id in 0..grid.len() {
        let cell = grid.cell_mut(id);
        for season in 0..seasons {
            cell.scaled_temperature[season] = (cell.temperature[season] - coldest) * scale;
        }
    }

    Ok(())
}

/// Weighted land count in the 11x5 window around a cell: ordinary land
/// counts once, mountains three times, ocean not at all. X wraps around the
/// map, the window is clipped at the top and bottom rows.
fn count_land(grid: &Grid, x: usize, y: usize) -> i32 {
    let dim = grid.dimension();
    let y_min = y.saturating_sub(2);
    let y_max = (y + 2).min(dim - 1);

    let mut sum = 0;
    for ny in y_min..=y_max {
        for dx in -5i32..6 {
            let mut nx = x as i32 + dx;
            if nx < 0 {
                nx += dim as i32;
            }
            if nx >= dim as i32 {
                nx -= dim as i32;
            }
            match grid.at(nx as usize, ny).terrain {
                Terrain::DeepOcean | Terrain::Ocean => {}
                Terrain::Mountains | Terrain::ImpassableMountains => sum += 3,
                _ => sum += 1,
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_land_grid(dim: usize, seasons: usize) -> Grid {
        let mut grid = Grid::build(dim, seasons);
        for id in 0..grid.len() {
            grid.cell_mut(id).terrain = Terrain::Steppe;
        }
        grid
    }

    #[test]
    fn test_scaled_temperatures_span_zero_to_254() {
        let mut grid = all_land_grid(16, 4);
        compute(&mut grid, &MapParams::default()).unwrap();

        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for cell in grid.cells() {
            for season in 0..4 {
                let t = cell.scaled_temperature[season];
                // The rescale can overshoot 254 by an ulp.
                assert!(t >= 0.0 && t <= 254.0 + 1e-3);
                lowest = lowest.min(t);
                highest = highest.max(t);
            }
        }
        assert!(lowest.abs() < 1e-3);
        assert!((highest - 254.0).abs() < 1e-3);
    }

    #[test]
    fn test_equator_warmer_than_pole() {
        let mut grid = all_land_grid(16, 1);
        compute(&mut grid, &MapParams::default()).unwrap();
        let pole = grid.at(4, 0).temperature[0];
        let equator = grid.at(4, 8).temperature[0];
        assert!(equator > pole);
    }

    #[test]
    fn test_flat_temperature_field_is_degenerate() {
        let mut grid = all_land_grid(8, 1);
        let mut params = MapParams::default();
        // No pole-to-equator swing and no seasonality: every cell computes
        // the same temperature.
        params.land_temp_variance = 0.0;
        params.ocean_temp_variance = 0.0;
        params.base_ocean_temp = params.base_land_temp;
        params.orbital_eccentricity = 0.0;

        let result = compute(&mut grid, &params);
        assert_eq!(
            result,
            Err(MapError::DegenerateInput { phase: "temperature" })
        );
    }

    #[test]
    fn test_mountains_weigh_three_times_in_land_count() {
        let mut grid = Grid::build(16, 1);
        for id in 0..grid.len() {
            grid.cell_mut(id).terrain = Terrain::Ocean;
        }
        grid.at_mut(8, 8).terrain = Terrain::Mountains;
        assert_eq!(count_land(&grid, 8, 8), 3);
        grid.at_mut(8, 8).terrain = Terrain::Steppe;
        assert_eq!(count_land(&grid, 8, 8), 1);
    }

    #[test]
    fn test_land_count_window_wraps_horizontally() {
        let mut grid = Grid::build(16, 1);
        for id in 0..grid.len() {
            grid.cell_mut(id).terrain = Terrain::Ocean;
        }
        // Land five columns to the west across the seam.
        grid.at_mut(13, 8).terrain = Terrain::Steppe;
        assert_eq!(count_land(&grid, 2, 8), 1);
        // Six columns away falls outside the window.
        assert_eq!(count_land(&grid, 3, 8), 0);
    }
}
