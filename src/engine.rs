//! The game engine: a pure state machine over two boards.
//!
//! The presentation layer issues commands (`select_ship`, `rotate`,
//! `place_ship`, `attack`, `random_placement`, `restart`) and re-renders from
//! the returned reports and the read-only queries. The engine never renders
//! and never panics past its boundary; invalid commands report why and leave
//! the state untouched.

use crate::board::Board;
use crate::common::{AttackOutcome, Cell, GameError};
use crate::config::GRID_SIZE;
use crate::grid::BitGrid;
use crate::ship::Orientation;
use core::fmt;
use log::debug;
use rand::Rng;

type Grid = BitGrid<GRID_SIZE>;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 1-based number for display.
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Players place their fleets, player 1 first.
    Setup,
    /// Players alternate attacks.
    Battle,
    /// One fleet is fully sunk; no further commands are accepted.
    Over,
}

/// Pending ship selection during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub size: usize,
    pub orientation: Orientation,
}

/// Canonical status of the game, derived solely from phase, current player
/// and winner. `Display` yields the one status line a UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Setup(PlayerId),
    Battle(PlayerId),
    Over(PlayerId),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Setup(p) => write!(f, "Player {} - Place your ships", p.number()),
            Status::Battle(p) => write!(f, "Player {}'s turn to attack", p.number()),
            Status::Over(p) => write!(f, "Player {} wins!", p.number()),
        }
    }
}

/// Result of a successful placement, sufficient to re-render without
/// re-deriving game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceReport {
    pub player: PlayerId,
    /// Cells the new ship occupies.
    pub cells: Grid,
    /// Whether this placement completed the player's fleet.
    pub fleet_complete: bool,
    /// Phase after the placement (flips to `Battle` when both fleets are in).
    pub phase: Phase,
}

/// Result of a successful attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: PlayerId,
    pub target: PlayerId,
    pub row: usize,
    pub col: usize,
    pub outcome: AttackOutcome,
    /// Cells of the ship this attack sank; empty unless `outcome` is `Sunk`.
    pub sunk_cells: Grid,
    /// Set iff this attack ended the game.
    pub winner: Option<PlayerId>,
}

/// Core game state: both boards, phase, turn, pending selection and winner.
pub struct GameEngine {
    boards: [Board; 2],
    phase: Phase,
    current: PlayerId,
    selected_size: Option<usize>,
    orientation: Orientation,
    winner: Option<PlayerId>,
}

impl GameEngine {
    /// Fresh game: empty boards, setup phase, player 1 to place.
    pub fn new() -> Self {
        GameEngine {
            boards: [Board::new(), Board::new()],
            phase: Phase::Setup,
            current: PlayerId::One,
            selected_size: None,
            orientation: Orientation::Horizontal,
            winner: None,
        }
    }

    #[inline]
    fn index(player: PlayerId) -> usize {
        match player {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Read-only view of a player's board.
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[Self::index(player)]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Pending ship selection, if a size is chosen.
    pub fn selection(&self) -> Option<Selection> {
        self.selected_size.map(|size| Selection {
            size,
            orientation: self.orientation,
        })
    }

    /// Presentation view of one cell of a player's board.
    pub fn cell(&self, player: PlayerId, row: usize, col: usize) -> Result<Cell, GameError> {
        self.board(player).cell(row, col)
    }

    /// Canonical status for the UI status line.
    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Setup => Status::Setup(self.current),
            Phase::Battle => Status::Battle(self.current),
            Phase::Over => Status::Over(self.winner.unwrap_or(self.current)),
        }
    }

    /// True iff every ship of `player`'s fleet has every cell hit.
    pub fn check_win_condition(&self, player: PlayerId) -> bool {
        self.board(player).all_sunk()
    }

    /// Select the ship size to place next. The pending orientation carries
    /// over from any previous selection.
    pub fn select_ship(&mut self, size: usize) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::InvalidPhase);
        }
        let board = self.board(self.current);
        if !board.remaining_sizes().contains(&size) || size == 0 {
            return Err(GameError::NoSelection);
        }
        self.selected_size = Some(size);
        Ok(())
    }

    /// Toggle the pending orientation. Rejected when no size is selected.
    pub fn rotate(&mut self) -> Result<(), GameError> {
        if self.selected_size.is_none() {
            return Err(GameError::NoSelection);
        }
        self.orientation = self.orientation.toggled();
        Ok(())
    }

    /// Place a ship of `size` for `player`, anchored at (row, col).
    ///
    /// Only legal during setup and only for the player whose turn it is.
    /// A successful placement clears the pending size; completing a fleet
    /// hands setup to player 2, and completing the second fleet starts the
    /// battle with player 1 to move.
    pub fn place_ship(
        &mut self,
        player: PlayerId,
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
    ) -> Result<PlaceReport, GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::InvalidPhase);
        }
        if player != self.current {
            return Err(GameError::WrongBoard);
        }
        let (slot, cells) = self.boards[Self::index(player)].place(size, row, col, orientation)?;
        self.selected_size = None;
        self.orientation = orientation;
        debug!(
            "player {} placed ship slot {} at ({}, {}) {:?}",
            player.number(),
            slot,
            row,
            col,
            orientation
        );
        let fleet_complete = self.board(player).fleet_complete();
        if fleet_complete {
            self.advance_setup(player);
        }
        Ok(PlaceReport {
            player,
            cells,
            fleet_complete,
            phase: self.phase,
        })
    }

    /// Clear `player`'s board and place their whole fleet at random.
    ///
    /// On success the same fleet-complete transition runs as for manual
    /// placement. If the retry budget runs out `IncompletePlacement` is
    /// reported; the partial fleet stays on the board and no transition
    /// happens, so the player can retry.
    pub fn random_placement<R: Rng>(
        &mut self,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<PlaceReport, GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::InvalidPhase);
        }
        if player != self.current {
            return Err(GameError::WrongBoard);
        }
        self.selected_size = None;
        self.boards[Self::index(player)].randomize(rng)?;
        debug!("player {} fleet placed at random", player.number());
        self.advance_setup(player);
        Ok(PlaceReport {
            player,
            cells: self.board(player).ship_map(),
            fleet_complete: true,
            phase: self.phase,
        })
    }

    /// Fleet-complete transition shared by manual and random placement.
    fn advance_setup(&mut self, player: PlayerId) {
        match player {
            PlayerId::One => self.current = PlayerId::Two,
            PlayerId::Two => {
                self.phase = Phase::Battle;
                self.current = PlayerId::One;
                debug!("both fleets placed, battle begins");
            }
        }
    }

    /// Resolve `attacker`'s shot at (row, col) on the opponent's board.
    ///
    /// Only legal during battle on the attacker's own turn. The win check
    /// runs before the turn switch: a winning attack ends the game with the
    /// attacker still the current player, any other attack passes the turn.
    pub fn attack(
        &mut self,
        attacker: PlayerId,
        row: usize,
        col: usize,
    ) -> Result<AttackReport, GameError> {
        if self.phase != Phase::Battle {
            return Err(GameError::InvalidPhase);
        }
        if attacker != self.current {
            return Err(GameError::WrongBoard);
        }
        let target = attacker.opponent();
        let (outcome, sunk_cells) = self.boards[Self::index(target)].attack(row, col)?;
        debug!(
            "player {} attacked ({}, {}): {:?}",
            attacker.number(),
            row,
            col,
            outcome
        );
        let winner = if self.check_win_condition(target) {
            self.phase = Phase::Over;
            self.winner = Some(attacker);
            debug!("player {} wins", attacker.number());
            Some(attacker)
        } else {
            self.current = target;
            None
        };
        Ok(AttackReport {
            attacker,
            target,
            row,
            col,
            outcome,
            sunk_cells,
            winner,
        })
    }

    /// Reset everything: boards, fleets, phase, turn, selection and winner.
    pub fn restart(&mut self) {
        debug!("game restarted");
        *self = GameEngine::new();
    }
}

#[cfg(feature = "std")]
impl GameEngine {
    /// Serializable snapshot of the whole game.
    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        crate::snapshot::GameSnapshot {
            phase: self.phase,
            current: self.current,
            winner: self.winner,
            selected_size: self.selected_size,
            orientation: self.orientation,
            boards: [(&self.boards[0]).into(), (&self.boards[1]).into()],
        }
    }

    /// Rebuild an engine from a snapshot, re-validating placements and shots
    /// through the normal rules.
    pub fn from_snapshot(snap: &crate::snapshot::GameSnapshot) -> Result<Self, GameError> {
        Ok(GameEngine {
            boards: [snap.boards[0].restore()?, snap.boards[1].restore()?],
            phase: snap.phase,
            current: snap.current,
            selected_size: snap.selected_size,
            orientation: snap.orientation,
            winner: snap.winner,
        })
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
