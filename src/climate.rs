//! Climate classification and the terrain merge
//!
//! Ocean cells freeze into ice climate when no season ever gets them above
//! the iceberg temperature. Land cells average their annual rainfall and
//! temperature (mountains run colder) and look their climate up in a fixed
//! table: temperature picks the row, rainfall the column. The merge step
//! then turns climate into terrain for every cell the elevation pass left
//! unassigned.

use crate::cell::{Climate, Terrain};
use crate::config::MapParams;
use crate::grid::Grid;

/// Temperature increases going down the table, rainfall going right.
const CLIMATE_TABLE: [[Climate; 5]; 4] = [
    [
        Climate::Tundra,
        Climate::Tundra,
        Climate::Tundra,
        Climate::Tundra,
        Climate::Tundra,
    ],
    [
        Climate::Steppe,
        Climate::Steppe,
        Climate::Deciduous,
        Climate::Deciduous,
        Climate::Deciduous,
    ],
    [
        Climate::Desert,
        Climate::Prairie,
        Climate::Deciduous,
        Climate::Jungle,
        Climate::Swamp,
    ],
    [
        Climate::Desert,
        Climate::Savannah,
        Climate::Jungle,
        Climate::Swamp,
        Climate::Swamp,
    ],
];

/// Assign a climate to every cell.
pub fn compute(grid: &mut Grid, params: &MapParams) {
    let seasons = grid.num_seasons();
    let ice_limit = (params.temp_scale * params.iceberg_temp) as f32;

    for id in 0..grid.len() {
        let cell = grid.cell_mut(id);

        if cell.terrain.is_water() {
            let thaws = (0..seasons).any(|s| cell.temperature[s] > ice_limit);
            cell.climate = if thaws { Climate::Ocean } else { Climate::OceanIce };
            continue;
        }

        let rain_total: i32 = cell.rainfall.iter().map(|&r| r as i32).sum();
        let avg_rain = rain_total / seasons as i32;

        let temp_total: f64 = cell.temperature.iter().map(|&t| t as f64).sum();
        let avg_temp = temp_total / seasons as f64;
        let mut temp_f = (avg_temp / params.temp_scale as f64 - 273.0) * 1.8 + 32.0;
        if cell.terrain.is_mountain() {
            temp_f -= params.mountain_cooling as f64;
        }

        let mut row = 0;
        while row < 3 && temp_f > params.temp_cuts[row] as f64 {
            row += 1;
        }
        let mut col = 0;
        while col < 4 && avg_rain > params.rain_cuts[col] {
            col += 1;
        }

        cell.climate = CLIMATE_TABLE[row][col];
    }
}

/// Give every still-unassigned cell a terrain from its climate, and freeze
/// ice-climate water. The ocean climates map to their terrains too, so every
/// climate the table can produce has a terrain and no cell stays unassigned.
pub fn merge_terrain(grid: &mut Grid) {
    for id in 0..grid.len() {
        let cell = grid.cell_mut(id);
        match cell.terrain {
            Terrain::Unassigned => {
                cell.terrain = match cell.climate {
                    Climate::Tundra => Terrain::Tundra,
                    Climate::Steppe => Terrain::Steppe,
                    Climate::Deciduous => Terrain::Forest,
                    Climate::Desert => Terrain::Desert,
                    Climate::Savannah => Terrain::Savannah,
                    Climate::Prairie => Terrain::Prairie,
                    Climate::Jungle => Terrain::Jungle,
                    Climate::Swamp => Terrain::Swamp,
                    Climate::Ocean => Terrain::Ocean,
                    Climate::OceanIce => Terrain::Ice,
                    // Only possible if the climate pass never ran.
                    Climate::None => Terrain::Unassigned,
                };
            }
            Terrain::Ocean | Terrain::DeepOcean => {
                if cell.climate == Climate::OceanIce {
                    cell.terrain = Terrain::Ice;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_grid(dim: usize, terrain: Terrain, temp: f32, rain: u8) -> Grid {
        let mut grid = Grid::build(dim, 4);
        for id in 0..grid.len() {
            let cell = grid.cell_mut(id);
            cell.terrain = terrain;
            cell.temperature = vec![temp; 4];
            cell.rainfall = vec![rain; 4];
        }
        grid
    }

    #[test]
    fn test_frozen_ocean_becomes_ice_climate() {
        let params = MapParams::default();
        // Just below the iceberg limit all year round.
        let cold = (params.temp_scale * params.iceberg_temp) as f32 - 1.0;
        let mut grid = uniform_grid(8, Terrain::Ocean, cold, 0);
        compute(&mut grid, &params);
        assert!(grid.cells().iter().all(|c| c.climate == Climate::OceanIce));

        // One warm season is enough to stay open water.
        grid.at_mut(3, 3).temperature[2] = cold + 2.0;
        compute(&mut grid, &params);
        assert_eq!(grid.at(3, 3).climate, Climate::Ocean);
    }

    #[test]
    fn test_cold_land_is_tundra() {
        let params = MapParams::default();
        // 2500 at scale 10 is 250 K, well below 0 F.
        let mut grid = uniform_grid(8, Terrain::Steppe, 2500.0, 100);
        compute(&mut grid, &params);
        assert!(grid.cells().iter().all(|c| c.climate == Climate::Tundra));
    }

    #[test]
    fn test_hot_wet_land_is_swamp_hot_dry_is_desert() {
        let params = MapParams::default();
        // 310 K is roughly 98 F, the hottest table row.
        let mut wet = uniform_grid(8, Terrain::Steppe, 3100.0, 200);
        compute(&mut wet, &params);
        assert!(wet.cells().iter().all(|c| c.climate == Climate::Swamp));

        let mut dry = uniform_grid(8, Terrain::Steppe, 3100.0, 10);
        compute(&mut dry, &params);
        assert!(dry.cells().iter().all(|c| c.climate == Climate::Desert));
    }

    #[test]
    fn test_mountain_cooling_shifts_table_row() {
        let params = MapParams::default();
        // 295 K is about 71 F: the third table row for plain land, while
        // mountains drop 20 F into the second.
        let mut plain = uniform_grid(8, Terrain::Steppe, 2950.0, 70);
        compute(&mut plain, &params);
        let mut peaks = uniform_grid(8, Terrain::Mountains, 2950.0, 70);
        compute(&mut peaks, &params);
        assert_eq!(plain.at(2, 2).climate, Climate::Deciduous);
        assert_eq!(peaks.at(2, 2).climate, Climate::Deciduous);
        // Near 261 K land reads 10 F: above the first cutoff, but the
        // mountain correction drops below it into tundra.
        let mut cold_peaks = uniform_grid(8, Terrain::Mountains, 2608.0, 70);
        compute(&mut cold_peaks, &params);
        let mut cold_plain = uniform_grid(8, Terrain::Steppe, 2608.0, 70);
        compute(&mut cold_plain, &params);
        assert_eq!(cold_peaks.at(2, 2).climate, Climate::Tundra);
        assert_ne!(cold_plain.at(2, 2).climate, Climate::Tundra);
    }

    #[test]
    fn test_merge_fills_every_unassigned_cell() {
        let params = MapParams::default();
        let mut grid = uniform_grid(8, Terrain::Unassigned, 2950.0, 100);
        compute(&mut grid, &params);
        merge_terrain(&mut grid);
        assert!(grid
            .cells()
            .iter()
            .all(|c| c.terrain != Terrain::Unassigned));
    }

    #[test]
    fn test_merge_freezes_icy_ocean() {
        let params = MapParams::default();
        let cold = (params.temp_scale * params.iceberg_temp) as f32 - 1.0;
        let mut grid = uniform_grid(8, Terrain::DeepOcean, cold, 0);
        compute(&mut grid, &params);
        merge_terrain(&mut grid);
        assert!(grid.cells().iter().all(|c| c.terrain == Terrain::Ice));
    }
}
