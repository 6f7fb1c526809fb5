//! Centre-biased breadth-first tile assignment
//!
//! Cells are visited breadth-first over the 8-connected grid, starting at the
//! grid centre. Each cell receives the best-matching tile from the pool; when a
//! minimum repetition distance is configured, candidates are tried from best to
//! worst match until one is far enough from its nearest reachable copy. If none
//! is, the worst match is placed anyway and the cell is recorded as a fallback.
//!
//! The pool is never depleted: a tile stays eligible for every later cell,
//! limited only by the spacing constraint.

use std::collections::VecDeque;

use image::Rgb;
use log::{debug, trace, warn};
use ndarray::Array2;

use crate::algorithm::repetition::satisfies_minimum;
use crate::io::error::{MosaicError, Result};
use crate::spatial::grid::{CoordGrid, Coordinate};
use crate::spatial::tiles::Tile;

/// Processing state of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Not yet discovered
    #[default]
    Unvisited,
    /// Waiting in the breadth-first queue
    Queued,
    /// Holds its final tile
    Assigned,
}

/// Breadth-first traversal state over a fixed grid
///
/// Cells move strictly `Unvisited → Queued → Assigned`.
#[derive(Debug, Clone)]
pub struct Traversal {
    states: Array2<CellState>,
    queue: VecDeque<Coordinate>,
}

impl Traversal {
    /// Create a traversal with every cell unvisited
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            states: Array2::default((height, width)),
            queue: VecDeque::new(),
        }
    }

    /// State of a cell, `None` outside the grid
    pub fn state(&self, coordinate: Coordinate) -> Option<CellState> {
        self.states.get([coordinate.y, coordinate.x]).copied()
    }

    /// Queue an unvisited cell
    ///
    /// Returns whether the cell was queued; cells already queued or assigned,
    /// and cells outside the grid, are ignored.
    pub fn enqueue(&mut self, coordinate: Coordinate) -> bool {
        match self.states.get_mut([coordinate.y, coordinate.x]) {
            Some(state) if *state == CellState::Unvisited => {
                *state = CellState::Queued;
                self.queue.push_back(coordinate);
                true
            }
            _ => false,
        }
    }

    /// Take the next queued cell in FIFO order
    pub fn pop(&mut self) -> Option<Coordinate> {
        self.queue.pop_front()
    }

    /// Mark a queued cell as assigned
    ///
    /// Returns `false` if the cell was not in the `Queued` state.
    pub fn mark_assigned(&mut self, coordinate: Coordinate) -> bool {
        match self.states.get_mut([coordinate.y, coordinate.x]) {
            Some(state) if *state == CellState::Queued => {
                *state = CellState::Assigned;
                true
            }
            _ => false,
        }
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }
}

/// Result of filling a tile grid
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Chosen tile per cell, same bounds as the colour grid
    pub tile_grid: CoordGrid<Tile>,
    /// Cells in the order they were assigned
    pub order: Vec<Coordinate>,
    /// Cells where no candidate met the repetition distance and the worst match was placed
    pub fallback_cells: Vec<Coordinate>,
}

impl Assignment {
    /// Whether any cell fell back to the worst match
    pub fn degraded(&self) -> bool {
        !self.fallback_cells.is_empty()
    }
}

enum Selection<'a> {
    Matched(&'a Tile),
    Fallback(&'a Tile),
}

/// Fills a tile grid from a colour grid and a tile pool
#[derive(Debug, Clone, Copy, Default)]
pub struct TileAssigner {
    min_repetition_distance: u32,
    start: Option<Coordinate>,
}

impl TileAssigner {
    /// Create an assigner enforcing a minimum repetition distance (0 disables it)
    pub const fn new(min_repetition_distance: u32) -> Self {
        Self {
            min_repetition_distance,
            start: None,
        }
    }

    /// Seed the traversal at a given cell instead of the grid centre
    #[must_use]
    pub const fn starting_at(mut self, start: Coordinate) -> Self {
        self.start = Some(start);
        self
    }

    /// Configured minimum repetition distance
    pub const fn min_repetition_distance(&self) -> u32 {
        self.min_repetition_distance
    }

    /// Central cell `(width / 2, height / 2)`
    pub const fn centre_of(width: usize, height: usize) -> Coordinate {
        Coordinate::new(width / 2, height / 2)
    }

    /// Assign a tile to every cell of the colour grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile pool is empty (`InsufficientTiles`, before any cell is written)
    /// - The traversal seed lies outside the grid (`OutOfBounds`)
    /// - A reachable cell of the colour grid is unpopulated (`CellNotFound`)
    pub fn assign(&self, colour_grid: &CoordGrid<Rgb<u8>>, tiles: &[Tile]) -> Result<Assignment> {
        let (width, height) = (colour_grid.width(), colour_grid.height());
        if tiles.is_empty() {
            return Err(MosaicError::InsufficientTiles {
                cells: colour_grid.capacity(),
            });
        }

        let start = self.start.unwrap_or_else(|| Self::centre_of(width, height));
        if !colour_grid.in_bounds(start.x, start.y) {
            return Err(MosaicError::OutOfBounds {
                x: start.x,
                y: start.y,
                width,
                height,
            });
        }

        debug!(
            "Assigning {} tiles to a {width}x{height} grid from {start} (minimum repetition distance {})",
            tiles.len(),
            self.min_repetition_distance
        );

        let mut traversal = Traversal::new(width, height);
        let mut tile_grid = CoordGrid::new(width, height);
        let mut order = Vec::with_capacity(colour_grid.capacity());
        let mut fallback_cells = Vec::new();

        traversal.enqueue(start);
        while let Some(cell) = traversal.pop() {
            let target = *colour_grid.get(cell.x, cell.y)?;

            let tile = match self.select(&tile_grid, tiles, target, cell) {
                Some(Selection::Matched(tile)) => tile,
                Some(Selection::Fallback(tile)) => {
                    fallback_cells.push(cell);
                    tile
                }
                None => {
                    return Err(MosaicError::InsufficientTiles {
                        cells: colour_grid.capacity(),
                    });
                }
            };
            trace!("Cell {cell} <- tile {}", tile.id());

            tile_grid.add(cell.x, cell.y, tile.clone())?;
            traversal.mark_assigned(cell);
            order.push(cell);

            for (neighbour, _) in colour_grid.neighbours_of(cell) {
                traversal.enqueue(neighbour);
            }
        }

        if !fallback_cells.is_empty() {
            warn!(
                "{} of {} cells could not keep a repetition distance of {}; placed worst matches instead",
                fallback_cells.len(),
                order.len(),
                self.min_repetition_distance
            );
        }

        Ok(Assignment {
            tile_grid,
            order,
            fallback_cells,
        })
    }

    fn select<'a>(
        &self,
        tile_grid: &CoordGrid<Tile>,
        tiles: &'a [Tile],
        target: Rgb<u8>,
        cell: Coordinate,
    ) -> Option<Selection<'a>> {
        if self.min_repetition_distance == 0 {
            return best_match(tiles, target).map(Selection::Matched);
        }

        let mut candidates: Vec<(u32, &Tile)> = tiles
            .iter()
            .map(|tile| (tile.color_distance(target), tile))
            .collect();
        candidates.sort_by_key(|&(distance, tile)| (distance, tile.id()));

        let spaced = |tile: &Tile| {
            satisfies_minimum(tile_grid, tile.id(), cell, self.min_repetition_distance)
        };

        // Best remaining match first; the worst match is taken if nothing qualifies
        let (&(_, worst), others) = candidates.split_last()?;
        if let Some(&(_, tile)) = others.iter().find(|&&(_, tile)| spaced(tile)) {
            return Some(Selection::Matched(tile));
        }
        if spaced(worst) {
            Some(Selection::Matched(worst))
        } else {
            Some(Selection::Fallback(worst))
        }
    }
}

/// Tile with the smallest colour distance to the target, ties broken by lowest id
pub fn best_match(tiles: &[Tile], target: Rgb<u8>) -> Option<&Tile> {
    tiles
        .iter()
        .min_by_key(|tile| (tile.color_distance(target), tile.id()))
}
