//! Map generation parameters
//!
//! Every tunable coefficient of the generation pipeline lives here, grouped
//! by the phase that consumes it. Parameters serialize to JSON so a world can
//! be regenerated from a saved file together with its seed.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

// =============================================================================
// WORLD SIZES
// =============================================================================

/// Named world sizes mapping to grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldSize {
    Tiny,
    Small,
    Normal,
    Huge,
}

impl WorldSize {
    pub fn all() -> &'static [WorldSize] {
        &[
            WorldSize::Tiny,
            WorldSize::Small,
            WorldSize::Normal,
            WorldSize::Huge,
        ]
    }

    /// Grid dimension for this size (the map is dimension x dimension).
    pub fn dimension(&self) -> usize {
        match self {
            WorldSize::Tiny => 32,
            WorldSize::Small => 64,
            WorldSize::Normal => 128,
            WorldSize::Huge => 256,
        }
    }
}

impl std::str::FromStr for WorldSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tiny" => Ok(WorldSize::Tiny),
            "small" => Ok(WorldSize::Small),
            "normal" => Ok(WorldSize::Normal),
            "huge" => Ok(WorldSize::Huge),
            _ => Err(format!("unknown world size '{s}' (tiny/small/normal/huge)")),
        }
    }
}

impl std::fmt::Display for WorldSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldSize::Tiny => write!(f, "tiny"),
            WorldSize::Small => write!(f, "small"),
            WorldSize::Normal => write!(f, "normal"),
            WorldSize::Huge => write!(f, "huge"),
        }
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// The full coefficient bag for one world.
///
/// Immutable once generation starts; `validate` is called before any grid is
/// built and rejects configurations the pipeline cannot run on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MapParams {
    /// Display name of the map.
    pub name: String,

    /// Grid dimension; the map is always a square of dimension x dimension
    /// cells. Must be a power of two of at least 4.
    pub dimension: usize,

    /// Number of seasons in a year. Temperature, pressure, wind and rainfall
    /// are computed per season.
    pub num_seasons: usize,

    /// Cap for the bounded distance transform used by pressure and wind.
    pub max_range: i32,

    /// Fixed-point scale applied to all temperatures (degrees Kelvin times
    /// this factor).
    pub temp_scale: i32,

    //
    // Elevation
    //
    /// Number of coarse initialization passes of the fractal synthesizer.
    pub iterations: u32,

    /// Terrain roughness exponent. Values close to 0.0 mean rougher terrain,
    /// values close to or above 1.0 mean smoother.
    pub roughness: f32,

    /// Fraction of cells that should end up below the deep-ocean cutoff.
    pub percent_deep_ocean: f32,

    /// Fraction of cells that should end up below the ocean cutoff.
    pub percent_ocean: f32,

    /// Fraction of cells that should end up below the mountain cutoff;
    /// everything above it becomes mountains.
    pub percent_mountains: f32,

    /// As percent_mountains, for impassable mountains.
    pub percent_impassable: f32,

    /// Connected water bodies smaller than this many cells are reverted to
    /// unassigned terrain and re-classified by climate.
    pub min_inland_sea_size: usize,

    //
    // Temperature
    //
    /// Tilt of the planet with respect to its orbital plane, in degrees.
    /// Smaller numbers produce less seasonality; numbers above 45 violate
    /// assumptions of the model.
    pub axial_tilt: f64,

    /// Orbital eccentricity; affects seasonality as well. Numbers above 0.5
    /// are probably unrealistic.
    pub orbital_eccentricity: f64,

    /// Phase offset of the eccentricity with respect to the axial tilt, in
    /// radians. Varying this produces complicated seasonality.
    pub eccentricity_phase: f64,

    /// Base temperature for land cells in Kelvin, before tilt, eccentricity
    /// and ocean effects.
    pub base_land_temp: f64,

    /// Pole-to-equator swing of land temperatures: land varies from
    /// base - variance/2 at the poles to base + variance/2 at the equator.
    pub land_temp_variance: f64,

    /// Fraction of the axial tilt applied to land temperatures. Land swings
    /// more from season to season than the ocean, so this is normally higher
    /// than ocean_temp_tilt.
    pub land_temp_tilt: f64,

    /// Weighting term for blending land and sea temperatures on land cells;
    /// see land_div.
    pub land_smooth: f64,

    /// Divisor for the land-count window when blending on land cells. Raising
    /// it diminishes the influence of nearby land.
    pub land_div: f64,

    /// As base_land_temp, for the ocean.
    pub base_ocean_temp: f64,

    /// As land_temp_variance, for the ocean.
    pub ocean_temp_variance: f64,

    /// As land_temp_tilt, for the ocean.
    pub ocean_temp_tilt: f64,

    /// As land_smooth, for ocean cells.
    pub ocean_smooth: f64,

    /// As land_div, for ocean cells.
    pub ocean_div: f64,

    //
    // Pressure
    //
    /// Ocean pressure zones ignore land masses of at most this radius,
    /// like islands.
    pub ocean_land_ignore: i32,

    /// Ocean pressure zones must be at least this far from the nearest
    /// non-ignored land.
    pub ocean_land_dist: i32,

    /// Scaled-temperature band for ocean lows: low end.
    pub ocean_low_min: i32,
    /// Scaled-temperature band for ocean lows: high end.
    pub ocean_low_max: i32,
    /// Scaled-temperature band for ocean highs: low end.
    pub ocean_high_min: i32,
    /// Scaled-temperature band for ocean highs: high end.
    pub ocean_high_max: i32,

    /// Land pressure zones ignore water bodies of at most this radius,
    /// like lakes.
    pub land_ocean_ignore: i32,

    /// Land pressure zones must be at least this far from the nearest
    /// non-ignored ocean.
    pub land_ocean_dist: i32,

    /// Scaled-temperature band for land lows: low end.
    pub land_low_min: i32,
    /// Scaled-temperature band for land lows: high end.
    pub land_low_max: i32,
    /// Scaled-temperature band for land highs: low end.
    pub land_high_min: i32,
    /// Scaled-temperature band for land highs: high end.
    pub land_high_max: i32,

    //
    // Wind
    //
    /// Top of the smoothed pressure field; lows are 0 and highs this value.
    pub max_pressure: i32,

    /// Pressure difference between adjacent isobars. Winds follow isobar
    /// crossings, so smaller separations produce denser winds.
    pub bar_sep: i32,

    //
    // Rainfall
    //
    /// Maximum depth of the fetch walk: the moisture carried by wind from one
    /// cell can travel at most this many cells before stopping.
    pub max_fetch: i32,

    /// Base amount of rainfall in every cell.
    pub rain_const: i32,

    /// Rainfall adjustment on land cells.
    pub land_delta: i32,

    /// Rainfall added to a mountain cell for each unit of fetch it absorbs.
    pub mountain_delta: i32,

    /// Rainfall added per unit of fetch in the cell itself.
    pub fetch_delta: i32,

    /// Rainfall added to cells on the heat equator.
    pub heq_delta: i32,

    /// Rainfall added to cells next to the heat equator.
    pub near_heq_delta: i32,

    /// Rainfall added to cells on the flank of a circular wind pattern,
    /// where the wind blows south. Normally negative.
    pub flank_delta: i32,

    /// Rainfall added per adjacent cell, weighted by that cell's fetch.
    pub near_fetch_delta: i32,

    //
    // Climate
    //
    /// Ocean cells below this temperature (Kelvin) all year round freeze
    /// into icebergs.
    pub iceberg_temp: i32,

    /// Cutoff points turning average annual temperature (Fahrenheit) into a
    /// row of the climate table.
    pub temp_cuts: [i32; 4],

    /// Cutoff points turning average annual rainfall (0..255) into a column
    /// of the climate table.
    pub rain_cuts: [i32; 5],

    /// Degrees Fahrenheit subtracted from mountain cells before the climate
    /// lookup.
    pub mountain_cooling: i32,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            name: "Map 1".to_string(),
            dimension: WorldSize::Normal.dimension(),
            num_seasons: 4,
            max_range: 15,
            temp_scale: 10,

            iterations: 2,
            roughness: 0.7,
            percent_deep_ocean: 0.525,
            percent_ocean: 0.7,
            percent_mountains: 0.985,
            percent_impassable: 0.995,
            min_inland_sea_size: 5,

            axial_tilt: 23.0,
            orbital_eccentricity: 0.0,
            eccentricity_phase: 0.0,
            base_land_temp: 275.0,
            land_temp_variance: 45.0,
            land_temp_tilt: 1.0,
            land_smooth: 0.6,
            land_div: 180.0,
            base_ocean_temp: 275.0,
            ocean_temp_variance: 30.0,
            ocean_temp_tilt: 0.2,
            ocean_smooth: 0.2,
            ocean_div: 250.0,

            ocean_land_ignore: 1,
            ocean_land_dist: 5,
            ocean_low_min: 40,
            ocean_low_max: 65,
            ocean_high_min: 130,
            ocean_high_max: 180,
            land_ocean_ignore: 3,
            land_ocean_dist: 7,
            land_low_min: 220,
            land_low_max: 255,
            land_high_min: 0,
            land_high_max: 20,

            max_pressure: 255,
            bar_sep: 16,

            max_fetch: 5,
            rain_const: 32,
            land_delta: 10,
            mountain_delta: 32,
            fetch_delta: 4,
            heq_delta: 32,
            near_heq_delta: 24,
            flank_delta: -24,
            near_fetch_delta: 3,

            iceberg_temp: 263,
            temp_cuts: [0, 65, 100, 140],
            rain_cuts: [37, 58, 85, 150, 170],
            mountain_cooling: 20,
        }
    }
}

impl MapParams {
    /// Default parameters at a named world size.
    pub fn with_size(size: WorldSize) -> Self {
        Self {
            dimension: size.dimension(),
            ..Self::default()
        }
    }

    /// Check the configuration before any generation work starts.
    ///
    /// The dimension must be a power of two so the fractal step size halves
    /// cleanly down to 1, and the percentile targets must be fractions.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.dimension < 4 || !self.dimension.is_power_of_two() {
            return Err(MapError::InvalidDimension(self.dimension));
        }
        if self.num_seasons < 1 {
            return Err(MapError::InvalidSeasons(self.num_seasons));
        }
        let percentiles = [
            ("percent_deep_ocean", self.percent_deep_ocean),
            ("percent_ocean", self.percent_ocean),
            ("percent_mountains", self.percent_mountains),
            ("percent_impassable", self.percent_impassable),
        ];
        for (name, value) in percentiles {
            if !(0.0..=1.0).contains(&value) {
                return Err(MapError::InvalidPercentile { name, value });
            }
        }
        Ok(())
    }
}
