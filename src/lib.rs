//! Hex world generation library
//!
//! Builds a planet-scale hexagonal terrain map from a parameter bag and a
//! seed: fractal elevation, percentile terrain, a five-stage seasonal
//! climate simulation, and shoreline geometry.

pub mod ascii;
pub mod cell;
pub mod climate;
pub mod config;
pub mod elevation;
pub mod error;
pub mod grid;
pub mod pressure;
pub mod rainfall;
pub mod range;
pub mod rivers;
pub mod shoreline;
pub mod snapshot;
pub mod temperature;
pub mod terrain;
pub mod wind;
pub mod world;
