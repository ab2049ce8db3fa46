//! Error types for map generation.
//!
//! Parameter problems are caught by validation before any grid is built;
//! degenerate-input errors abort the phase that detected them.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    /// The map dimension must be a power of two so the diamond-square step
    /// can halve all the way down to 1.
    #[error("invalid dimension {0}: must be a power of two of at least 4")]
    InvalidDimension(usize),

    #[error("invalid season count {0}: must be at least 1")]
    InvalidSeasons(usize),

    /// A terrain percentile target fell outside [0, 1].
    #[error("percentile {name} = {value} is outside [0, 1]")]
    InvalidPercentile { name: &'static str, value: f32 },

    /// A cell lookup outside the grid.
    #[error("coordinate ({x}, {y}) is outside the {dimension}x{dimension} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        dimension: usize,
    },

    /// A value range collapsed to zero where a rescale needed to divide by it.
    /// Names the pipeline phase that hit the condition.
    #[error("degenerate input during {phase}: value range collapsed to zero")]
    DegenerateInput { phase: &'static str },
}
