//! Cell data model
//!
//! A cell is the basic element of the map: elevation, terrain, climate, and
//! the per-season temperature, pressure, wind and rainfall records.

use serde::{Deserialize, Serialize};

// =============================================================================
// DIRECTIONS AND BITMASKS
// =============================================================================

/// The six hex directions, in neighbor-table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    pub fn all() -> &'static [Direction; 6] {
        &[
            Direction::North,
            Direction::NorthEast,
            Direction::SouthEast,
            Direction::South,
            Direction::SouthWest,
            Direction::NorthWest,
        ]
    }

    /// Index into a six-entry neighbor table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Shoreline bit for this direction.
    pub fn mask(&self) -> u8 {
        1 << self.index()
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::NorthWest => "NW",
        }
    }
}

/// Wind blowing north.
pub const WIND_N: u8 = 1;
/// Wind blowing south.
pub const WIND_S: u8 = 2;
/// Wind blowing east.
pub const WIND_E: u8 = 4;
/// Wind blowing west.
pub const WIND_W: u8 = 8;

// =============================================================================
// TERRAIN, CLIMATE, PRESSURE
// =============================================================================

/// Final terrain of a cell.
///
/// Elevation classification assigns the ocean and mountain types; the rest
/// are filled in from climate by the merge step. `Unassigned` only survives
/// between those two phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Unassigned,
    DeepOcean,
    Ocean,
    Mountains,
    ImpassableMountains,
    Volcano,
    Ice,
    Tundra,
    Steppe,
    Prairie,
    Savannah,
    Forest,
    Jungle,
    Swamp,
    Desert,
}

impl Terrain {
    pub fn display_name(&self) -> &'static str {
        match self {
            Terrain::Unassigned => "None",
            Terrain::DeepOcean => "DeepOcean",
            Terrain::Ocean => "Ocean",
            Terrain::Mountains => "Mountains",
            Terrain::ImpassableMountains => "ImpassableMountains",
            Terrain::Volcano => "Volcano",
            Terrain::Ice => "Ice",
            Terrain::Tundra => "Tundra",
            Terrain::Steppe => "Steppe",
            Terrain::Prairie => "Prairie",
            Terrain::Savannah => "Savannah",
            Terrain::Forest => "Forest",
            Terrain::Jungle => "Jungle",
            Terrain::Swamp => "Swamp",
            Terrain::Desert => "Desert",
        }
    }

    /// Single-character glyph used by the text dump.
    pub fn glyph(&self) -> char {
        match self {
            Terrain::Unassigned => '!',
            Terrain::DeepOcean | Terrain::Ocean => ' ',
            Terrain::Mountains => '^',
            Terrain::ImpassableMountains => 'M',
            Terrain::Volcano => 'V',
            Terrain::Ice => 'I',
            Terrain::Tundra => '#',
            Terrain::Steppe => '-',
            Terrain::Prairie => '=',
            Terrain::Savannah => '+',
            Terrain::Forest => '*',
            Terrain::Jungle => '&',
            Terrain::Swamp => 'Y',
            Terrain::Desert => 'D',
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, Terrain::DeepOcean | Terrain::Ocean)
    }

    pub fn is_land(&self) -> bool {
        !self.is_water()
    }

    pub fn is_mountain(&self) -> bool {
        matches!(self, Terrain::Mountains | Terrain::ImpassableMountains)
    }
}

/// Climate classification of a cell, from the temperature/rainfall table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Climate {
    #[default]
    None,
    Tundra,
    Steppe,
    Deciduous,
    Desert,
    Savannah,
    Jungle,
    Swamp,
    Ocean,
    OceanIce,
    Prairie,
}

/// Per-season pressure state of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pressure {
    #[default]
    None,
    Low,
    High,
    /// On the heat equator, the latitude band of peak heating.
    HeatEquator,
}

// =============================================================================
// CELL
// =============================================================================

/// One hex of the map. All per-season vectors have length equal to the
/// configured season count.
#[derive(Clone, Debug)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    /// Linear id, y * dimension + x.
    pub id: usize,
    /// Normalized elevation in [0, 1] once synthesis has run.
    pub elevation: f32,
    /// Raw per-season temperature (Kelvin times the configured scale).
    pub temperature: Vec<f32>,
    /// Temperature rescaled into 0..254 from the global range.
    pub scaled_temperature: Vec<f32>,
    pub pressure: Vec<Pressure>,
    /// Per-season wind bitmask (WIND_N/S/E/W).
    pub wind: Vec<u8>,
    /// Per-season rainfall, 0..255.
    pub rainfall: Vec<u8>,
    pub climate: Climate,
    pub terrain: Terrain,
    /// One bit per hex direction with a water neighbor; land cells only.
    pub shoreline: u8,
}

impl Cell {
    pub fn new(x: usize, y: usize, dimension: usize, num_seasons: usize) -> Self {
        Self {
            x,
            y,
            id: y * dimension + x,
            elevation: 0.0,
            temperature: vec![0.0; num_seasons],
            scaled_temperature: vec![0.0; num_seasons],
            pressure: vec![Pressure::None; num_seasons],
            wind: vec![0; num_seasons],
            rainfall: vec![0; num_seasons],
            climate: Climate::None,
            terrain: Terrain::Unassigned,
            shoreline: 0,
        }
    }

    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    pub fn is_land(&self) -> bool {
        self.terrain.is_land()
    }

    /// Average annual rainfall across seasons.
    pub fn avg_rainfall(&self) -> f32 {
        let sum: f32 = self.rainfall.iter().map(|&r| r as f32).sum();
        sum / self.rainfall.len() as f32
    }

    /// Average annual temperature in degrees Fahrenheit, given the
    /// fixed-point temperature scale of the map parameters.
    pub fn avg_temperature_f(&self, temp_scale: i32) -> f32 {
        let sum: f32 = self.temperature.iter().sum();
        let avg = sum / self.temperature.len() as f32;
        (avg / temp_scale as f32 - 273.0) * 1.8 + 32.0
    }

    pub fn has_shoreline(&self, dir: Direction) -> bool {
        self.shoreline & dir.mask() != 0
    }
}
