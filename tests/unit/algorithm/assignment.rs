//! Tests for breadth-first tile assignment

#[cfg(test)]
mod tests {

    use std::collections::HashSet;

    use greedymosaic::MosaicError;
    use greedymosaic::algorithm::assignment::{CellState, TileAssigner, Traversal, best_match};
    use greedymosaic::spatial::grid::{CoordGrid, Coordinate};
    use greedymosaic::spatial::tiles::{Tile, TileId};
    use image::{Rgb, RgbImage};

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn solid_tile(id: u64, colour: Rgb<u8>) -> Tile {
        Tile::new(TileId(id), RgbImage::from_pixel(2, 2, colour))
    }

    fn colour_grid(width: usize, height: usize, colour: impl Fn(usize, usize) -> Rgb<u8>) -> CoordGrid<Rgb<u8>> {
        let mut grid = CoordGrid::new(width, height);
        for x in 0..width {
            for y in 0..height {
                assert!(matches!(grid.add(x, y, colour(x, y)), Ok(true)));
            }
        }
        grid
    }

    fn checkerboard(x: usize, y: usize) -> Rgb<u8> {
        if (x + y) % 2 == 0 { BLACK } else { WHITE }
    }

    fn tile_id_at(grid: &CoordGrid<Tile>, coordinate: Coordinate) -> Option<TileId> {
        grid.try_get(coordinate).map(Tile::id)
    }

    // Tests that an empty pool fails before any cell is written
    // Verified by moving the pool check after the traversal
    #[test]
    fn test_empty_pool_fails_fast() {
        let grid = colour_grid(3, 3, checkerboard);

        let result = TileAssigner::new(0).assign(&grid, &[]);

        assert!(matches!(result, Err(MosaicError::InsufficientTiles { cells: 9 })));
    }

    // Tests that traversal starts at the centre and expands breadth-first in (x, y) order
    // Verified by seeding the queue at the origin
    #[test]
    fn test_centre_first_breadth_first_order() {
        let grid = colour_grid(3, 3, |_, _| BLACK);
        let tiles = [solid_tile(0, BLACK)];

        let assignment = TileAssigner::new(0).assign(&grid, &tiles);
        assert!(assignment.is_ok());
        let Ok(assignment) = assignment else { return };

        let expected: Vec<Coordinate> = [
            (1, 1),
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ]
        .into_iter()
        .map(Coordinate::from)
        .collect();
        assert_eq!(assignment.order, expected);
        assert!(assignment.tile_grid.is_full());
    }

    // Tests that every cell is assigned exactly once on a non-square grid
    // Verified by enqueueing neighbours without checking their state
    #[test]
    fn test_every_cell_assigned_once() {
        let grid = colour_grid(7, 4, checkerboard);
        let tiles = [solid_tile(0, BLACK), solid_tile(1, WHITE)];

        let assignment = TileAssigner::new(2).assign(&grid, &tiles);

        assert!(assignment.is_ok_and(|assignment| {
            let unique: HashSet<Coordinate> = assignment.order.iter().copied().collect();
            assignment.order.len() == 28
                && unique.len() == 28
                && assignment.tile_grid.len() == 28
                && assignment.order.first() == Some(&Coordinate::new(3, 2))
        }));
    }

    // Tests that with no spacing constraint the result does not depend on the start cell
    // Verified by letting the best match depend on neighbouring assignments
    #[test]
    fn test_zero_distance_is_order_independent() {
        let grid = colour_grid(5, 4, |x, y| Rgb([(x * 50) as u8, (y * 60) as u8, 90]));
        let tiles: Vec<Tile> = (0..12)
            .map(|id| solid_tile(id, Rgb([(id * 20) as u8, (255 - id * 20) as u8, (id * 7) as u8])))
            .collect();

        let from_centre = TileAssigner::new(0).assign(&grid, &tiles);
        let from_corner = TileAssigner::new(0)
            .starting_at(Coordinate::new(0, 0))
            .assign(&grid, &tiles);
        assert!(from_centre.is_ok() && from_corner.is_ok());
        let (Ok(from_centre), Ok(from_corner)) = (from_centre, from_corner) else {
            return;
        };

        assert_ne!(from_centre.order, from_corner.order);
        for coordinate in grid.coordinates() {
            assert_eq!(
                tile_id_at(&from_centre.tile_grid, coordinate),
                tile_id_at(&from_corner.tile_grid, coordinate),
                "cell {coordinate} differs between start cells"
            );
        }
    }

    // Tests that a black and white checkerboard with distance one is matched cell by cell
    // Verified by dropping the colour sort and always taking the first tile
    #[test]
    fn test_checkerboard_keeps_edge_neighbours_distinct() {
        let grid = colour_grid(3, 3, checkerboard);
        let tiles = [solid_tile(0, BLACK), solid_tile(1, WHITE)];

        let assignment = TileAssigner::new(1).assign(&grid, &tiles);
        assert!(assignment.is_ok());
        let Ok(assignment) = assignment else { return };

        assert!(!assignment.degraded());
        for (coordinate, tile) in assignment.tile_grid.iter() {
            let expected = if (coordinate.x + coordinate.y) % 2 == 0 { 0 } else { 1 };
            assert_eq!(tile.id(), TileId(expected));

            let right = Coordinate::new(coordinate.x + 1, coordinate.y);
            let below = Coordinate::new(coordinate.x, coordinate.y + 1);
            for other in [right, below] {
                if let Some(other_id) = tile_id_at(&assignment.tile_grid, other) {
                    assert_ne!(tile.id(), other_id, "{coordinate} and {other} share a tile");
                }
            }
        }
    }

    // Tests that a distance of two keeps every 8-connected pair distinct when the pool allows it
    // Verified by skipping the repetition check and always taking the best match
    #[test]
    fn test_distance_two_separates_all_neighbours() {
        let grid = colour_grid(3, 3, |_, _| Rgb([128, 128, 128]));
        let tiles: Vec<Tile> = (0..9)
            .map(|id| solid_tile(id, Rgb([128 + id as u8, 128, 128])))
            .collect();

        let assignment = TileAssigner::new(2).assign(&grid, &tiles);
        assert!(assignment.is_ok());
        let Ok(assignment) = assignment else { return };

        assert!(assignment.fallback_cells.is_empty());
        for (a, tile_a) in assignment.tile_grid.iter() {
            for (b, tile_b) in assignment.tile_grid.neighbours_of(a) {
                assert_ne!(tile_a.id(), tile_b.id(), "{a} and {b} share a tile");
            }
        }
        // The centre is assigned first and gets the best match
        assert_eq!(tile_id_at(&assignment.tile_grid, Coordinate::new(1, 1)), Some(TileId(0)));
    }

    // Tests that an unsatisfiable distance still fills the grid and reports fallbacks
    // Verified by returning an error when no candidate satisfies the distance
    #[test]
    fn test_single_tile_with_large_distance_degrades() {
        let grid = colour_grid(3, 3, checkerboard);
        let tiles = [solid_tile(0, BLACK)];

        let assignment = TileAssigner::new(5).assign(&grid, &tiles);
        assert!(assignment.is_ok());
        let Ok(assignment) = assignment else { return };

        assert!(assignment.tile_grid.is_full());
        assert!(assignment.tile_grid.iter().all(|(_, tile)| tile.id() == TileId(0)));
        assert!(assignment.degraded());
        assert_eq!(assignment.fallback_cells.len(), 8);
        assert!(!assignment.fallback_cells.contains(&Coordinate::new(1, 1)));
    }

    // Tests that independent copies of one image satisfy the spacing constraint
    // Verified by comparing tiles by colour instead of identity
    #[test]
    fn test_copies_count_as_distinct_tiles() {
        let grid = colour_grid(2, 1, |_, _| BLACK);
        let original = solid_tile(0, BLACK);
        let tiles = [original.clone(), original.with_id(TileId(1))];

        let assignment = TileAssigner::new(2).assign(&grid, &tiles);

        assert!(assignment.is_ok_and(|assignment| {
            assignment.fallback_cells.is_empty()
                && tile_id_at(&assignment.tile_grid, Coordinate::new(1, 0)) == Some(TileId(0))
                && tile_id_at(&assignment.tile_grid, Coordinate::new(0, 0)) == Some(TileId(1))
        }));
    }

    // Tests that seeds outside the grid and missing colour cells are reported
    // Verified by clamping the seed into the grid
    #[test]
    fn test_invalid_seed_and_missing_colour() {
        let grid = colour_grid(2, 2, |_, _| BLACK);
        let tiles = [solid_tile(0, BLACK)];

        let result = TileAssigner::new(0)
            .starting_at(Coordinate::new(2, 0))
            .assign(&grid, &tiles);
        assert!(matches!(result, Err(MosaicError::OutOfBounds { x: 2, y: 0, .. })));

        let empty: CoordGrid<Rgb<u8>> = CoordGrid::new(2, 2);
        let result = TileAssigner::new(0).assign(&empty, &tiles);
        assert!(matches!(result, Err(MosaicError::CellNotFound { x: 1, y: 1 })));
    }

    // Tests that equal colour distances resolve to the lowest tile id
    // Verified by taking the first tile in slice order
    #[test]
    fn test_best_match_breaks_ties_by_id() {
        let tiles = [
            solid_tile(3, Rgb([10, 0, 0])),
            solid_tile(1, Rgb([10, 0, 0])),
            solid_tile(2, Rgb([200, 0, 0])),
        ];

        assert_eq!(best_match(&tiles, Rgb([10, 0, 0])).map(Tile::id), Some(TileId(1)));
        assert_eq!(best_match(&tiles, Rgb([190, 0, 0])).map(Tile::id), Some(TileId(2)));
        assert!(best_match(&[], BLACK).is_none());
    }

    // Tests that cells move strictly from unvisited to queued to assigned
    // Verified by allowing enqueue from any state
    #[test]
    fn test_traversal_state_transitions() {
        let mut traversal = Traversal::new(3, 2);
        let cell = Coordinate::new(2, 1);

        assert_eq!(traversal.state(cell), Some(CellState::Unvisited));
        assert!(!traversal.mark_assigned(cell));

        assert!(traversal.enqueue(cell));
        assert!(!traversal.enqueue(cell));
        assert_eq!(traversal.state(cell), Some(CellState::Queued));

        assert!(traversal.mark_assigned(cell));
        assert!(!traversal.enqueue(cell));
        assert_eq!(traversal.state(cell), Some(CellState::Assigned));

        assert!(!traversal.enqueue(Coordinate::new(3, 0)));
        assert_eq!(traversal.state(Coordinate::new(0, 2)), None);
        assert_eq!(traversal.count(CellState::Unvisited), 5);
    }

    // Tests that queued cells come back in FIFO order
    // Verified by popping from the back of the queue
    #[test]
    fn test_traversal_queue_is_fifo() {
        let mut traversal = Traversal::new(2, 2);
        for (x, y) in [(1, 1), (0, 0), (1, 0)] {
            assert!(traversal.enqueue(Coordinate::new(x, y)));
        }

        assert_eq!(traversal.pop(), Some(Coordinate::new(1, 1)));
        assert_eq!(traversal.pop(), Some(Coordinate::new(0, 0)));
        assert_eq!(traversal.pop(), Some(Coordinate::new(1, 0)));
        assert_eq!(traversal.pop(), None);
        assert_eq!(traversal.count(CellState::Queued), 3);
        assert_eq!(TileAssigner::centre_of(5, 4), Coordinate::new(2, 2));
    }
}
