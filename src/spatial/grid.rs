//! Sparse two-dimensional coordinate grid
//!
//! Maps unique integer coordinates to values inside a fixed `width × height`
//! bound. Entries are kept ordered by `(x, y)`, and inserting at an occupied
//! coordinate leaves the stored value untouched.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use crate::io::error::{MosaicError, Result};

/// Integer grid position (`x` column, `y` row)
///
/// Ordering is lexicographic on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Coordinate {
    /// Create a coordinate from a column and a row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate, rounded to the nearest integer
    pub fn rounded_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x) as f64;
        let dy = self.y.abs_diff(other.y) as f64;
        dx.hypot(dy).round() as u32
    }

    /// Whether the two coordinates touch in 8-connectivity (and are not equal)
    pub const fn is_adjacent_to(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx <= 1 && dy <= 1 && (dx + dy) > 0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Bounded grid of values keyed by coordinate
#[derive(Debug, Clone)]
pub struct CoordGrid<V> {
    width: usize,
    height: usize,
    entries: BTreeMap<Coordinate, V>,
}

impl<V> CoordGrid<V> {
    /// Create an empty grid with fixed bounds
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            entries: BTreeMap::new(),
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells inside the bounds, populated or not
    pub const fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no cell is populated
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every cell inside the bounds is populated
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity()
    }

    /// Whether a coordinate lies inside the bounds
    pub const fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Store a value at `(x, y)`
    ///
    /// Returns `Ok(true)` if the coordinate was newly populated and `Ok(false)`
    /// if it was already occupied, in which case the original value is kept.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the coordinate lies outside the grid
    pub fn add(&mut self, x: usize, y: usize, value: V) -> Result<bool> {
        if !self.in_bounds(x, y) {
            return Err(MosaicError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        match self.entries.entry(Coordinate::new(x, y)) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    /// Value stored at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if nothing is stored at the coordinate
    pub fn get(&self, x: usize, y: usize) -> Result<&V> {
        self.entries
            .get(&Coordinate::new(x, y))
            .ok_or(MosaicError::CellNotFound { x, y })
    }

    /// Value stored at a coordinate, if any
    pub fn try_get(&self, coordinate: Coordinate) -> Option<&V> {
        self.entries.get(&coordinate)
    }

    /// Whether a value is stored at the coordinate
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.entries.contains_key(&coordinate)
    }

    /// Populated neighbours of a coordinate in 8-connectivity, ordered by `(x, y)`
    ///
    /// The query coordinate itself and unpopulated cells are never returned.
    pub fn neighbours_of(&self, coordinate: Coordinate) -> Vec<(Coordinate, &V)> {
        let x_range = coordinate.x.saturating_sub(1)..=coordinate.x.saturating_add(1);
        let mut neighbours = Vec::with_capacity(8);

        // Column-major scan yields (x, y) order
        for x in x_range {
            for y in coordinate.y.saturating_sub(1)..=coordinate.y.saturating_add(1) {
                let candidate = Coordinate::new(x, y);
                if candidate == coordinate {
                    continue;
                }
                if let Some(value) = self.entries.get(&candidate) {
                    neighbours.push((candidate, value));
                }
            }
        }

        neighbours
    }

    /// Populated neighbours of `(x, y)`, see [`CoordGrid::neighbours_of`]
    pub fn neighbours_of_xy(&self, x: usize, y: usize) -> Vec<(Coordinate, &V)> {
        self.neighbours_of(Coordinate::new(x, y))
    }

    /// Iterate over populated entries in `(x, y)` order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &V)> {
        self.entries.iter().map(|(coordinate, value)| (*coordinate, value))
    }

    /// Iterate over populated coordinates in `(x, y)` order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.entries.keys().copied()
    }
}
