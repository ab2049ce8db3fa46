//! Flat terrain snapshot for host consumption
//!
//! A game layer rarely wants the full per-season cell records; this is the
//! compact per-tile view it keeps after generation.

use serde::{Deserialize, Serialize};

use crate::cell::Terrain;
use crate::world::WorldBuilder;

/// One tile of the snapshot.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TerrainTile {
    pub x: usize,
    pub y: usize,
    pub terrain: Terrain,
    pub elevation: f32,
}

/// Every tile of a generated world, in linear id order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainSnapshot {
    pub dimension: usize,
    pub tiles: Vec<TerrainTile>,
}

impl TerrainSnapshot {
    pub fn from_world(world: &WorldBuilder) -> Self {
        let tiles = world
            .grid()
            .cells()
            .iter()
            .map(|cell| TerrainTile {
                x: cell.x,
                y: cell.y,
                terrain: cell.terrain,
                elevation: cell.elevation,
            })
            .collect();
        Self {
            dimension: world.dimension(),
            tiles,
        }
    }
}
