//! River network stage
//!
//! Runs in sequence with the other phases but produces nothing yet; maps
//! are balanced around rivers being absent. This is the seam where a
//! network tracer would go.

use crate::grid::Grid;

pub fn create(_grid: &mut Grid) {}
