use flotilla::{AttackOutcome, Board, Cell, GameError, Orientation, FLEET, NUM_SHIPS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Sum of the fleet lengths (5+4+3+3+2).
fn fleet_cells() -> usize {
    FLEET.iter().map(|c| c.length()).sum()
}

#[test]
fn test_adjacency_rule() {
    let mut board = Board::new();
    board.place(5, 0, 0, Orientation::Horizontal).unwrap();

    // directly below the carrier: touches it, rejected
    assert_eq!(
        board.place(2, 1, 0, Orientation::Horizontal).unwrap_err(),
        GameError::Overlap
    );
    assert_eq!(board.ship_map().count_ones(), 5);

    // one row further down: legal
    board.place(2, 2, 0, Orientation::Horizontal).unwrap();
    assert_eq!(board.ship_map().count_ones(), 7);

    // diagonal touch is also rejected
    assert_eq!(
        board.place(4, 1, 5, Orientation::Horizontal).unwrap_err(),
        GameError::Overlap
    );
}

#[test]
fn test_out_of_bounds_leaves_board_unchanged() {
    let mut board = Board::new();
    assert_eq!(
        board.place(4, 0, 12, Orientation::Horizontal).unwrap_err(),
        GameError::OutOfBounds
    );
    assert!(board.ship_map().is_empty());
    assert!(!board.fleet_complete());
}

#[test]
fn test_size_must_match_unplaced_slot() {
    let mut board = Board::new();
    // no ship of size 6 in the fleet
    assert_eq!(
        board.place(6, 0, 0, Orientation::Horizontal).unwrap_err(),
        GameError::NoSelection
    );
    // both size-3 slots can be filled, a third size-3 cannot
    board.place(3, 0, 0, Orientation::Horizontal).unwrap();
    board.place(3, 2, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(3, 4, 0, Orientation::Horizontal).unwrap_err(),
        GameError::NoSelection
    );
}

#[test]
fn test_attack_hit_miss_sink() {
    let mut board = Board::new();
    board.place(2, 0, 0, Orientation::Horizontal).unwrap();

    let (outcome, sunk) = board.attack(5, 5).unwrap();
    assert_eq!(outcome, AttackOutcome::Miss);
    assert!(sunk.is_empty());
    assert_eq!(board.cell(5, 5).unwrap(), Cell::Miss);

    let (outcome, sunk) = board.attack(0, 0).unwrap();
    assert_eq!(outcome, AttackOutcome::Hit);
    assert!(sunk.is_empty());
    assert_eq!(board.cell(0, 0).unwrap(), Cell::Hit);

    let (outcome, sunk) = board.attack(0, 1).unwrap();
    assert_eq!(outcome, AttackOutcome::Sunk);
    assert_eq!(sunk.count_ones(), 2);
    assert!(sunk.get(0, 0).unwrap() && sunk.get(0, 1).unwrap());
    // both cells now render as sunk, not hit
    assert_eq!(board.cell(0, 0).unwrap(), Cell::Sunk);
    assert_eq!(board.cell(0, 1).unwrap(), Cell::Sunk);
}

#[test]
fn test_repeat_attack_rejected_without_change() {
    let mut board = Board::new();
    board.place(2, 0, 0, Orientation::Horizontal).unwrap();
    board.attack(0, 0).unwrap();
    let before = board;
    assert_eq!(
        board.attack(0, 0).unwrap_err(),
        GameError::CellAlreadyResolved
    );
    assert_eq!(board, before);

    board.attack(9, 9).unwrap();
    let before = board;
    assert_eq!(
        board.attack(9, 9).unwrap_err(),
        GameError::CellAlreadyResolved
    );
    assert_eq!(board, before);
}

#[test]
fn test_attack_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(board.attack(15, 0).unwrap_err(), GameError::OutOfBounds);
    assert_eq!(board.attack(0, 15).unwrap_err(), GameError::OutOfBounds);
}

#[test]
fn test_all_sunk_requires_complete_fleet() {
    let mut board = Board::new();
    assert!(!board.all_sunk());
    board.place(2, 0, 0, Orientation::Horizontal).unwrap();
    board.attack(0, 0).unwrap();
    board.attack(0, 1).unwrap();
    // one sunk ship is not a sunk fleet
    assert!(!board.all_sunk());
}

#[test]
fn test_randomize_places_full_fleet() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(42);
    board.randomize(&mut rng).unwrap();
    assert!(board.fleet_complete());
    assert_eq!(board.ship_map().count_ones(), fleet_cells());
}

#[test]
fn test_randomize_respects_adjacency() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut board = Board::new();
        board.randomize(&mut rng).unwrap();
        let ships: Vec<_> = board.ships().iter().flatten().collect();
        assert_eq!(ships.len(), NUM_SHIPS);
        for (i, a) in ships.iter().enumerate() {
            for b in ships.iter().skip(i + 1) {
                assert!(
                    (a.mask() & b.keep_out()).is_empty(),
                    "ships may not touch: {:?} vs {:?}",
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_randomize_clears_previous_fleet() {
    let mut board = Board::new();
    let mut rng = SmallRng::seed_from_u64(1);
    board.place(5, 0, 0, Orientation::Horizontal).unwrap();
    board.attack(0, 0).unwrap();
    board.randomize(&mut rng).unwrap();
    assert_eq!(board.ship_map().count_ones(), fleet_cells());
    assert!(board.hits().is_empty());
    assert!(board.misses().is_empty());
}
