//! One player's board: fleet slots plus occupancy, hit, miss and sunk masks.

use crate::common::{AttackOutcome, Cell, GameError};
use crate::config::{FLEET, GRID_SIZE, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS};
use crate::grid::BitGrid;
use crate::ship::{Orientation, Ship};
use rand::Rng;

type Grid = BitGrid<GRID_SIZE>;

/// Board state for a single player. Ship slots follow the fleet table order
/// (longest first); a slot is `None` until its ship is placed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    ships: [Option<Ship<GRID_SIZE>>; NUM_SHIPS],
    ship_map: Grid,
    hits: Grid,
    misses: Grid,
    sunk: Grid,
}

impl Board {
    /// Create an empty board (no ships placed, nothing attacked).
    pub fn new() -> Self {
        Board {
            ships: [None; NUM_SHIPS],
            ship_map: Grid::new(),
            hits: Grid::new(),
            misses: Grid::new(),
            sunk: Grid::new(),
        }
    }

    /// Ship slots in fleet-table order.
    pub fn ships(&self) -> &[Option<Ship<GRID_SIZE>>] {
        &self.ships
    }

    /// Occupancy mask of all placed ships.
    pub fn ship_map(&self) -> Grid {
        self.ship_map
    }

    /// Mask of resolved hits (sunk cells included).
    pub fn hits(&self) -> Grid {
        self.hits
    }

    /// Mask of resolved misses.
    pub fn misses(&self) -> Grid {
        self.misses
    }

    /// Returns `true` once all five ships are placed.
    pub fn fleet_complete(&self) -> bool {
        self.ships.iter().all(|s| s.is_some())
    }

    /// Returns `true` when the fleet is complete and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.fleet_complete() && self.ships.iter().flatten().all(|s| s.is_sunk())
    }

    /// Lengths of ships not yet placed. Entries are zero for placed slots,
    /// keeping fixed-size output for `no_std` callers.
    pub fn remaining_sizes(&self) -> [usize; NUM_SHIPS] {
        let mut lens = [0usize; NUM_SHIPS];
        for (i, slot) in self.ships.iter().enumerate() {
            if slot.is_none() {
                lens[i] = FLEET[i].length();
            }
        }
        lens
    }

    /// First unplaced slot whose class length matches `size`.
    fn find_slot(&self, size: usize) -> Option<usize> {
        (0..NUM_SHIPS).find(|&i| self.ships[i].is_none() && FLEET[i].length() == size)
    }

    /// Pure adjacency predicate: a candidate mask is placeable iff it avoids
    /// every existing ship cell and all of their 8-neighbors.
    pub fn can_place(&self, candidate: &Grid) -> bool {
        (*candidate & self.ship_map.dilated()).is_empty()
    }

    /// Place a ship of `size` anchored at (row, col).
    ///
    /// On success returns the filled slot index and the ship's cell mask.
    /// `NoSelection` if no unplaced ship of that size remains, `OutOfBounds`
    /// if the ship would leave the grid, `Overlap` if it lands on or touches
    /// the existing fleet. Failure leaves the board unchanged.
    pub fn place(
        &mut self,
        size: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(usize, Grid), GameError> {
        let slot = self.find_slot(size).ok_or(GameError::NoSelection)?;
        let mask = self.place_slot(slot, row, col, orientation)?;
        Ok((slot, mask))
    }

    /// Place the ship of a specific fleet slot. Used by `place` and by
    /// snapshot restore, which must keep slot identity.
    pub(crate) fn place_slot(
        &mut self,
        slot: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Grid, GameError> {
        if self.ships[slot].is_some() {
            return Err(GameError::Overlap);
        }
        let ship = Ship::<GRID_SIZE>::new(FLEET[slot], orientation, row, col)?;
        let mask = ship.mask();
        if !self.can_place(&mask) {
            return Err(GameError::Overlap);
        }
        self.ship_map |= mask;
        self.ships[slot] = Some(ship);
        Ok(mask)
    }

    /// Resolve an attack at (row, col), marking hit/miss and reporting the
    /// outcome. When a ship's last segment is hit the whole ship is marked
    /// sunk and its cell mask is returned alongside the outcome.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<(AttackOutcome, Grid), GameError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(GameError::CellAlreadyResolved);
        }
        // ship_map is the union of the slot masks, so a set cell has an owner
        for slot in self.ships.iter_mut().flatten() {
            if slot.contains(row, col) {
                slot.register_hit(row, col);
                self.hits.set(row, col)?;
                if slot.is_sunk() {
                    let mask = slot.mask();
                    self.sunk |= mask;
                    return Ok((AttackOutcome::Sunk, mask));
                }
                return Ok((AttackOutcome::Hit, Grid::new()));
            }
        }
        self.misses.set(row, col)?;
        Ok((AttackOutcome::Miss, Grid::new()))
    }

    /// Presentation view of one cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        if self.sunk.get(row, col)? {
            Ok(Cell::Sunk)
        } else if self.hits.get(row, col)? {
            Ok(Cell::Hit)
        } else if self.misses.get(row, col)? {
            Ok(Cell::Miss)
        } else if self.ship_map.get(row, col)? {
            Ok(Cell::Ship)
        } else {
            Ok(Cell::Empty)
        }
    }

    /// Remove all ships and attack marks.
    pub fn clear(&mut self) {
        *self = Board::new();
    }

    /// Clear the board, then place the whole fleet at random, longest ship
    /// first. Each ship gets up to `MAX_PLACEMENT_ATTEMPTS` random
    /// anchor+orientation draws; a ship whose budget runs out stays unplaced
    /// and the call reports `IncompletePlacement` after trying every slot.
    /// The successfully placed ships are kept either way.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.clear();
        for slot in 0..NUM_SHIPS {
            let len = FLEET[slot].length();
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let orientation = if rng.random() {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let max_r = match orientation {
                    Orientation::Vertical => GRID_SIZE - len,
                    Orientation::Horizontal => GRID_SIZE - 1,
                };
                let max_c = match orientation {
                    Orientation::Horizontal => GRID_SIZE - len,
                    Orientation::Vertical => GRID_SIZE - 1,
                };
                let r = rng.random_range(0..=max_r);
                let c = rng.random_range(0..=max_c);
                if self.place_slot(slot, r, c, orientation).is_ok() {
                    break;
                }
            }
        }
        if self.fleet_complete() {
            Ok(())
        } else {
            Err(GameError::IncompletePlacement)
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Board {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.hits, self.misses, self.ships
        )
    }
}
