//! Common types for the game engine: command errors, attack outcomes and
//! per-cell views.

use crate::grid::GridError;

/// Result of an attack on a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Attack hit an undepleted ship segment.
    Hit,
    /// Attack missed all ships.
    Miss,
    /// Attack hit the last segment of a ship, sinking it.
    Sunk,
}

/// Presentation view of a single board cell.
///
/// `Sunk` wins over `Hit` so a renderer can mark a whole ship without
/// re-deriving fleet state; the hit mask still records the sunk cells
/// internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship,
    Hit,
    Miss,
    Sunk,
}

/// Errors returned by engine and board commands. All are recoverable: a
/// rejected command leaves the game state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Underlying grid error (capacity misuse, not a coordinate problem).
    Grid(GridError),
    /// Placement or attack coordinates extend past the grid edge.
    OutOfBounds,
    /// Ship placement lands on or touches an existing ship.
    Overlap,
    /// Command is not legal in the current phase.
    InvalidPhase,
    /// Target cell was already hit or missed.
    CellAlreadyResolved,
    /// Command addressed the wrong player's board or was issued out of turn.
    WrongBoard,
    /// No ship size is selected, or the size matches no unplaced ship.
    NoSelection,
    /// Random placement exhausted its attempt budget with ships left over.
    IncompletePlacement,
}

impl From<GridError> for GameError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::IndexOutOfBounds { .. } => GameError::OutOfBounds,
            other => GameError::Grid(other),
        }
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::Grid(e) => write!(f, "Grid error: {}", e),
            GameError::OutOfBounds => write!(f, "Placement or attack is out of bounds"),
            GameError::Overlap => write!(f, "Ship placement overlaps or touches another ship"),
            GameError::InvalidPhase => write!(f, "Command is not valid in the current phase"),
            GameError::CellAlreadyResolved => write!(f, "Cell was already attacked"),
            GameError::WrongBoard => write!(f, "Command addressed the wrong board"),
            GameError::NoSelection => write!(f, "No matching ship size is selected"),
            GameError::IncompletePlacement => {
                write!(f, "Random placement could not place every ship")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
