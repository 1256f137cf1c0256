use crate::ship::ShipClass;

/// Side length of each player's board.
pub const GRID_SIZE: usize = 15;
pub const NUM_SHIPS: usize = 5;
/// Fleet table, longest first; `randomize` places in this order.
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];
/// Random placement retry budget per ship.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;
