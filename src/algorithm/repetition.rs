//! Distance from a candidate placement to the nearest reachable copy of a tile
//!
//! The search walks the already-assigned part of the tile grid breadth-first,
//! starting from the populated neighbours of the candidate cell. Unpopulated
//! cells are dead ends, so only the connected assigned region is searched. The
//! first matching cell reached is reported, which approximates but does not
//! guarantee the geometrically nearest occurrence.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::spatial::grid::{CoordGrid, Coordinate};
use crate::spatial::tiles::{Tile, TileId};

/// Rounded Euclidean distance from `placement` to the first cell holding `tile`
///
/// Returns `None` when no cell holding the tile is reachable through populated
/// neighbours, which callers treat as infinitely far away.
pub fn repetition_distance(
    tile_grid: &CoordGrid<Tile>,
    tile: TileId,
    placement: Coordinate,
) -> Option<u32> {
    let width = tile_grid.width();
    let mut visited = bitvec![0; tile_grid.capacity()];
    let mut queue = VecDeque::new();

    for (coordinate, _) in tile_grid.neighbours_of(placement) {
        mark_visited(&mut visited, width, coordinate);
        queue.push_back(coordinate);
    }

    while let Some(current) = queue.pop_front() {
        let Some(placed) = tile_grid.try_get(current) else {
            continue;
        };
        if placed.id() == tile {
            return Some(placement.rounded_distance(current));
        }

        for (neighbour, _) in tile_grid.neighbours_of(current) {
            if mark_visited(&mut visited, width, neighbour) {
                queue.push_back(neighbour);
            }
        }
    }

    None
}

/// Whether a placement at `placement` keeps at least `minimum` distance from every reachable copy
pub fn satisfies_minimum(
    tile_grid: &CoordGrid<Tile>,
    tile: TileId,
    placement: Coordinate,
    minimum: u32,
) -> bool {
    repetition_distance(tile_grid, tile, placement).is_none_or(|distance| distance >= minimum)
}

// Returns true if the coordinate was not visited before
fn mark_visited(visited: &mut BitVec, width: usize, coordinate: Coordinate) -> bool {
    let index = coordinate.y * width + coordinate.x;
    if visited.get(index).as_deref() == Some(&false) {
        visited.set(index, true);
        true
    } else {
        false
    }
}
