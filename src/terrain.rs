//! Elevation-based terrain classification
//!
//! Assigns the terrain that can be determined from elevation alone: the two
//! ocean depths and the two mountain grades. Everything in between stays
//! unassigned until the climate pass fills it in. Small landlocked seas are
//! reverted to unassigned so they re-enter climate classification too.

use std::collections::VecDeque;

use crate::cell::{Direction, Terrain};
use crate::config::MapParams;
use crate::grid::Grid;

/// The four elevation cutoffs derived from the percentile targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElevationCutoffs {
    pub deep_ocean: f32,
    pub ocean: f32,
    pub mountains: f32,
    pub impassable: f32,
}

const HISTOGRAM_BUCKETS: usize = 1001;

/// Sampling stride for the elevation histogram. Every fifth cell is enough
/// to place the cutoffs and keeps the scan cheap on huge maps.
const SAMPLE_STRIDE: usize = 5;

/// Classify terrain from elevation and prune small inland seas.
pub fn classify(grid: &mut Grid, params: &MapParams) -> ElevationCutoffs {
    let cutoffs = find_cutoffs(grid, params);

    for id in 0..grid.len() {
        let cell = grid.cell_mut(id);
        if cell.elevation < cutoffs.deep_ocean {
            cell.terrain = Terrain::DeepOcean;
        } else if cell.elevation < cutoffs.ocean {
            cell.terrain = Terrain::Ocean;
        } else if cell.elevation > cutoffs.impassable {
            cell.terrain = Terrain::ImpassableMountains;
        } else if cell.elevation > cutoffs.mountains {
            cell.terrain = Terrain::Mountains;
        }
    }

    prune_inland_seas(grid, params.min_inland_sea_size);
    cutoffs
}

/// Build the sampled elevation histogram and walk its cumulative sum once
/// per percentile target. Each walk starts over from the lowest bucket; the
/// targets are fractions of all sampled cells, not of the remainder.
fn find_cutoffs(grid: &Grid, params: &MapParams) -> ElevationCutoffs {
    let (lowest, highest) = crate::elevation::elevation_bounds(grid);
    let shift = if lowest < 0.0 { -lowest } else { 0.0 };
    let span = (highest + shift) - (lowest + shift);
    let norm_factor = if span > 0.0 {
        (HISTOGRAM_BUCKETS - 1) as f32 / span
    } else {
        // Flat field; all samples land in bucket 0 and every cutoff
        // degenerates to the same elevation.
        0.0
    };

    let mut histogram = [0u32; HISTOGRAM_BUCKETS];
    let mut sampled = 0u32;
    let mut id = 0;
    while id < grid.len() {
        let bucket = ((grid.cell(id).elevation + shift) * norm_factor) as usize;
        histogram[bucket.min(HISTOGRAM_BUCKETS - 1)] += 1;
        sampled += 1;
        id += SAMPLE_STRIDE;
    }

    let cutoff = |target: f32| -> f32 {
        let wanted = (sampled as f32 * target) as u32;
        let mut seen = 0u32;
        let mut bucket: isize = 0;
        while seen < wanted && bucket < HISTOGRAM_BUCKETS as isize {
            seen += histogram[bucket as usize];
            bucket += 1;
        }
        bucket -= 1;
        if norm_factor > 0.0 {
            bucket as f32 / norm_factor - shift
        } else {
            lowest
        }
    };

    ElevationCutoffs {
        deep_ocean: cutoff(params.percent_deep_ocean),
        ocean: cutoff(params.percent_ocean),
        mountains: cutoff(params.percent_mountains),
        impassable: cutoff(params.percent_impassable),
    }
}

/// Flood-fill every connected water body over hex adjacency and revert the
/// ones smaller than `min_size` to unassigned terrain. Iterative worklist,
/// so arbitrarily large bodies cannot overflow the stack.
fn prune_inland_seas(grid: &mut Grid, min_size: usize) {
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();

    for start in 0..grid.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        if !grid.cell(start).is_water() {
            continue;
        }

        let mut body = vec![start];
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            for dir in Direction::all() {
                if let Some(next) = grid.neighbor_id(current, *dir) {
                    if !visited[next] {
                        visited[next] = true;
                        if grid.cell(next).is_water() {
                            body.push(next);
                            queue.push_back(next);
                        }
                    }
                }
            }
        }

        if body.len() < min_size {
            for id in body {
                grid.cell_mut(id).terrain = Terrain::Unassigned;
            }
        }
    }
}
