//! World builder and pipeline orchestration
//!
//! Owns the grid and runs the generation phases in their fixed order:
//! elevation synthesis, elevation-based terrain, the climate chain
//! (temperature, pressure, wind, rainfall, climate, merge), rivers, and
//! shorelines. Everything after elevation is deterministic, so a world can
//! be rebuilt from its existing elevation field without touching the seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cell::Cell;
use crate::climate;
use crate::config::MapParams;
use crate::elevation;
use crate::error::MapError;
use crate::grid::Grid;
use crate::pressure;
use crate::rainfall;
use crate::rivers;
use crate::shoreline;
use crate::temperature;
use crate::terrain::{self, ElevationCutoffs};
use crate::wind;

/// The pipeline phases, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Elevation,
    ElevationTerrain,
    Climate,
    Rivers,
    Shorelines,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Elevation => "Generating Elevations",
            Phase::ElevationTerrain => "Assigning Elevation-based Terrain",
            Phase::Climate => "Assigning Climate-based Terrain",
            Phase::Rivers => "Creating River Networks",
            Phase::Shorelines => "Finding Shorelines",
        }
    }
}

/// Best-effort progress reporting: phase finished plus overall percent.
/// Generated output never depends on whether a callback is installed.
type ProgressCallback = Box<dyn FnMut(Phase, u8)>;

/// Builds and owns one world.
pub struct WorldBuilder {
    params: MapParams,
    grid: Grid,
    cutoffs: ElevationCutoffs,
    progress: Option<ProgressCallback>,
}

impl WorldBuilder {
    /// Validate the parameters and build the empty grid. No terrain exists
    /// until `generate` runs.
    pub fn new(params: MapParams) -> Result<Self, MapError> {
        params.validate()?;
        let grid = Grid::build(params.dimension, params.num_seasons);
        Ok(Self {
            params,
            grid,
            cutoffs: ElevationCutoffs::default(),
            progress: None,
        })
    }

    /// Install a progress callback for subsequent generation runs.
    pub fn on_progress(&mut self, callback: impl FnMut(Phase, u8) + 'static) {
        self.progress = Some(Box::new(callback));
    }

    fn report(&mut self, phase: Phase, percent: u8) {
        if let Some(callback) = self.progress.as_mut() {
            callback(phase, percent);
        }
    }

    /// Run the full pipeline. All randomness comes from one ChaCha8 stream
    /// seeded here, so the same seed and parameters reproduce the same world
    /// bit for bit.
    pub fn generate(&mut self, seed: u64) -> Result<(), MapError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        elevation::generate(&mut self.grid, &self.params, &mut rng)?;
        self.report(Phase::Elevation, 20);

        self.cutoffs = terrain::classify(&mut self.grid, &self.params);
        self.report(Phase::ElevationTerrain, 40);

        self.run_climate()?;
        self.report(Phase::Climate, 60);

        rivers::create(&mut self.grid);
        self.report(Phase::Rivers, 80);

        shoreline::detect(&mut self.grid);
        self.report(Phase::Shorelines, 100);

        Ok(())
    }

    /// Re-run every phase after elevation synthesis on the existing grid.
    /// The height field and the seed are untouched; terrain, climate and
    /// shorelines are recomputed from current state.
    pub fn rebuild(&mut self) -> Result<(), MapError> {
        self.cutoffs = terrain::classify(&mut self.grid, &self.params);
        self.report(Phase::ElevationTerrain, 25);

        self.run_climate()?;
        self.report(Phase::Climate, 50);

        rivers::create(&mut self.grid);
        self.report(Phase::Rivers, 75);

        shoreline::detect(&mut self.grid);
        self.report(Phase::Shorelines, 100);

        Ok(())
    }

    fn run_climate(&mut self) -> Result<(), MapError> {
        temperature::compute(&mut self.grid, &self.params)?;
        pressure::compute(&mut self.grid, &self.params);
        wind::compute(&mut self.grid, &self.params);
        rainfall::compute(&mut self.grid, &self.params);
        climate::compute(&mut self.grid, &self.params);
        climate::merge_terrain(&mut self.grid);
        Ok(())
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    pub fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Checked cell lookup by coordinates.
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell, MapError> {
        self.grid.get(x, y)
    }

    /// Cell by linear id.
    pub fn cell(&self, id: usize) -> &Cell {
        self.grid.cell(id)
    }

    /// The elevation cutoffs of the last terrain classification.
    pub fn cutoffs(&self) -> ElevationCutoffs {
        self.cutoffs
    }

    /// Current lowest and highest elevation on the grid.
    pub fn elevation_bounds(&self) -> (f32, f32) {
        elevation::elevation_bounds(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Terrain, WIND_E, WIND_N, WIND_S, WIND_W};

    fn generated(dim: usize, seasons: usize, seed: u64) -> WorldBuilder {
        let mut params = MapParams::default();
        params.dimension = dim;
        params.num_seasons = seasons;
        let mut world = WorldBuilder::new(params).unwrap();
        world.generate(seed).unwrap();
        world
    }

    #[test]
    fn test_invalid_params_rejected_before_building() {
        let mut params = MapParams::default();
        params.dimension = 37;
        assert!(WorldBuilder::new(params).is_err());
    }

    #[test]
    fn test_every_cell_has_terrain_after_generation() {
        let world = generated(16, 4, 42);
        for cell in world.grid().cells() {
            assert_ne!(cell.terrain, Terrain::Unassigned);
        }
    }

    #[test]
    fn test_wind_exclusivity_and_rainfall_present_all_seasons() {
        let world = generated(16, 4, 42);
        for cell in world.grid().cells() {
            assert_eq!(cell.rainfall.len(), 4);
            for season in 0..4 {
                let w = cell.wind[season];
                assert!(!(w & WIND_N != 0 && w & WIND_S != 0));
                assert!(!(w & WIND_E != 0 && w & WIND_W != 0));
            }
        }
    }

    #[test]
    fn test_cutoffs_are_ordered() {
        let world = generated(16, 4, 42);
        let cutoffs = world.cutoffs();
        assert!(cutoffs.deep_ocean <= cutoffs.ocean);
        assert!(cutoffs.ocean <= cutoffs.mountains);
        assert!(cutoffs.mountains <= cutoffs.impassable);
    }

    #[test]
    fn test_shoreline_bits_only_on_land() {
        let world = generated(16, 4, 42);
        for cell in world.grid().cells() {
            if cell.is_water() {
                assert_eq!(cell.shoreline, 0);
            }
        }
    }

    #[test]
    fn test_progress_reaches_one_hundred() {
        let mut params = MapParams::default();
        params.dimension = 16;
        let mut world = WorldBuilder::new(params).unwrap();

        use std::cell::RefCell;
        use std::rc::Rc;
        let seen: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        world.on_progress(move |_phase, percent| sink.borrow_mut().push(percent));

        world.generate(42).unwrap();
        let seen = seen.borrow();
        assert_eq!(seen.as_slice(), &[20, 40, 60, 80, 100]);
    }

    #[test]
    fn test_callback_does_not_change_output() {
        let quiet = generated(16, 4, 42);

        let mut params = MapParams::default();
        params.dimension = 16;
        let mut noisy = WorldBuilder::new(params).unwrap();
        noisy.on_progress(|_, _| {});
        noisy.generate(42).unwrap();

        for (a, b) in quiet.grid().cells().iter().zip(noisy.grid().cells()) {
            assert_eq!(a.terrain, b.terrain);
            assert_eq!(a.elevation.to_bits(), b.elevation.to_bits());
        }
    }

    #[test]
    fn test_rebuild_is_supported_and_complete() {
        let mut world = generated(16, 4, 42);
        world.rebuild().unwrap();
        for cell in world.grid().cells() {
            assert_ne!(cell.terrain, Terrain::Unassigned);
        }
    }
}
