//! Serializable snapshots of a whole game.
//!
//! The wire form stores placements (slot position, anchor, orientation) and
//! the set of resolved shots per board; hit/miss/sunk state is re-derived by
//! replaying the shots through the normal attack path, so a decoded snapshot
//! is validated by the same rules as live play.

use crate::board::Board;
use crate::common::GameError;
use crate::config::{GRID_SIZE, NUM_SHIPS};
use crate::engine::{Phase, PlayerId};
use crate::grid::BitGrid;
use crate::ship::Orientation;

type Grid = BitGrid<GRID_SIZE>;

/// One placed ship: anchor and orientation. The fleet slot is implied by the
/// record's position, and the class comes from the fleet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShipRecord {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// One player's board: placements plus every resolved shot (hit or miss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoardRecord {
    pub ships: [Option<ShipRecord>; NUM_SHIPS],
    pub shots: Grid,
}

/// Complete game state in serializable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub current: PlayerId,
    pub winner: Option<PlayerId>,
    pub selected_size: Option<usize>,
    pub orientation: Orientation,
    pub boards: [BoardRecord; 2],
}

impl From<&Board> for BoardRecord {
    fn from(board: &Board) -> Self {
        let ships = core::array::from_fn(|i| {
            board.ships()[i].map(|ship| {
                let (row, col) = ship.origin();
                ShipRecord {
                    row,
                    col,
                    orientation: ship.orientation(),
                }
            })
        });
        BoardRecord {
            ships,
            shots: board.hits() | board.misses(),
        }
    }
}

impl BoardRecord {
    /// Rebuild a live board by replaying placements and shots.
    pub(crate) fn restore(&self) -> Result<Board, GameError> {
        let mut board = Board::new();
        for (slot, rec) in self.ships.iter().enumerate() {
            if let Some(rec) = rec {
                board.place_slot(slot, rec.row, rec.col, rec.orientation)?;
            }
        }
        for (r, c) in self.shots.iter_set_cells() {
            board.attack(r, c)?;
        }
        Ok(board)
    }
}
