//! Shoreline detection
//!
//! Every land cell gets one bit per hex direction whose neighbor is water.
//! Water cells keep an empty mask, and all masks are cleared first so the
//! pass can be re-run after terrain changes.

use crate::cell::Direction;
use crate::grid::Grid;

pub fn detect(grid: &mut Grid) {
    for id in 0..grid.len() {
        grid.cell_mut(id).shoreline = 0;

        if grid.cell(id).is_water() {
            continue;
        }

        let mut mask = 0u8;
        for dir in Direction::all() {
            if let Some(neighbor) = grid.neighbor(id, *dir) {
                if neighbor.is_water() {
                    mask |= dir.mask();
                }
            }
        }
        grid.cell_mut(id).shoreline = mask;
    }
}
