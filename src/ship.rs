//! Ship definitions and placement geometry over the `BitGrid`.

use core::fmt;

use crate::common::GameError;
use crate::grid::BitGrid;

/// Orientation of a ship on the board. Only relevant at placement time; the
/// occupancy mask is what matters afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Class of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    /// Create a new ship class.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length in cells.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on an N×N board, with hits tracked in a `BitGrid`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship<const N: usize> {
    class: ShipClass,
    orientation: Orientation,
    row: usize,
    col: usize,
    mask: BitGrid<N>,
    hits: BitGrid<N>,
}

impl<const N: usize> Ship<N> {
    /// Place a ship at (`row`, `col`) with `orientation`.
    /// Fails with `OutOfBounds` if any cell would fall off the grid.
    pub fn new(
        class: ShipClass,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, GameError> {
        let len = class.length();
        if row >= N || col >= N {
            return Err(GameError::OutOfBounds);
        }
        match orientation {
            Orientation::Horizontal if col + len > N => return Err(GameError::OutOfBounds),
            Orientation::Vertical if row + len > N => return Err(GameError::OutOfBounds),
            _ => {}
        }

        let mut mask = BitGrid::<N>::new();
        for i in 0..len {
            let (r, c) = match orientation {
                Orientation::Horizontal => (row, col + i),
                Orientation::Vertical => (row + i, col),
            };
            mask.set(r, c)?;
        }

        Ok(Ship {
            class,
            orientation,
            row,
            col,
            mask,
            hits: BitGrid::new(),
        })
    }

    /// Register a hit at (`row`, `col`).
    /// Returns `true` if the cell belongs to this ship and records it.
    pub fn register_hit(&mut self, row: usize, col: usize) -> bool {
        if self.mask.get(row, col).unwrap_or(false) {
            let _ = self.hits.set(row, col);
            true
        } else {
            false
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.count_ones() == self.class.length()
    }

    /// Whether (`row`, `col`) is one of the ship's cells.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// The ship's cells in anchor-to-tail order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (row, col, orientation) = (self.row, self.col, self.orientation);
        (0..self.class.length()).map(move |i| match orientation {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        })
    }

    /// Ship's class.
    pub fn class(&self) -> ShipClass {
        self.class
    }

    /// Anchor of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Orientation of the ship.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> BitGrid<N> {
        self.mask
    }

    /// Hit mask restricted to this ship's cells.
    pub fn hit_mask(&self) -> BitGrid<N> {
        self.hits
    }

    /// The ship's cells plus their 8-neighborhood. Placement of another ship
    /// may not intersect this.
    pub fn keep_out(&self) -> BitGrid<N> {
        self.mask.dilated()
    }
}

impl<const N: usize> fmt::Debug for Ship<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.class.name(),
            self.row,
            self.col,
            self.orientation,
            self.hits.count_ones(),
        )
    }
}
