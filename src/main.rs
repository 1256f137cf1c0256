#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use flotilla::{
    init_logging, AttackOutcome, Board, Cell, GameEngine, GameError, Phase, PlayerId, GRID_SIZE,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{Rng, SeedableRng};
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Two players sharing one terminal: place fleets, then trade shots.
    Hotseat {
        #[arg(long, help = "Fix RNG seed for reproducible random placement")]
        seed: Option<u64>,
    },
    /// Watch a full random game play itself out.
    Auto {
        #[arg(long, help = "Fix RNG seed for a reproducible game")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

#[cfg(feature = "std")]
fn parse_coord(input: &str) -> Option<(usize, usize)> {
    if input.len() < 2 {
        return None;
    }
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    let row_str: String = chars.collect();
    let row: usize = row_str.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}

/// Render one board. With `reveal` unset, unhit ship cells print as water so
/// the board can be shown to the opponent.
#[cfg(feature = "std")]
fn print_board(board: &Board, reveal: bool) {
    print!("   ");
    for c in 0..GRID_SIZE {
        let ch = (b'A' + c as u8) as char;
        print!(" {}", ch);
    }
    println!();
    for r in 0..GRID_SIZE {
        print!("{:2} ", r + 1);
        for c in 0..GRID_SIZE {
            let ch = match board.cell(r, c).unwrap_or(Cell::Empty) {
                Cell::Sunk => '#',
                Cell::Hit => 'X',
                Cell::Miss => 'o',
                Cell::Ship if reveal => '■',
                _ => '·',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

#[cfg(feature = "std")]
fn prompt(line: &str) -> io::Result<Option<String>> {
    print!("{}", line);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

#[cfg(feature = "std")]
fn run_hotseat(seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let mut engine = GameEngine::new();

    loop {
        println!("\n{}", engine.status());
        let player = engine.current_player();
        match engine.phase() {
            Phase::Setup => {
                print_board(engine.board(player), true);
                let remaining = engine.board(player).remaining_sizes();
                let sizes: Vec<_> = remaining.iter().filter(|s| **s > 0).collect();
                println!("Unplaced ship sizes: {:?}", sizes);
                if let Some(sel) = engine.selection() {
                    println!("Selected: size {} {:?}", sel.size, sel.orientation);
                }
                let Some(input) = prompt("setup> select <size> | rotate | place <A1> | random | quit: ")? else {
                    return Ok(());
                };
                let mut parts = input.split_whitespace();
                match parts.next() {
                    Some("select") => {
                        let size = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
                        report(engine.select_ship(size));
                    }
                    Some("rotate") => report(engine.rotate()),
                    Some("place") => {
                        let Some(sel) = engine.selection() else {
                            println!("{}", GameError::NoSelection);
                            continue;
                        };
                        match parts.next().and_then(parse_coord) {
                            Some((r, c)) => {
                                match engine.place_ship(player, r, c, sel.size, sel.orientation) {
                                    Ok(rep) if rep.fleet_complete => {
                                        println!("Fleet complete!");
                                    }
                                    Ok(_) => {}
                                    Err(e) => println!("{}", e),
                                }
                            }
                            None => println!("Could not parse coordinate"),
                        }
                    }
                    Some("random") => match engine.random_placement(player, &mut rng) {
                        Ok(_) => println!("Fleet placed at random"),
                        Err(e) => println!("{}", e),
                    },
                    Some("quit") => return Ok(()),
                    _ => println!("Unknown command"),
                }
            }
            Phase::Battle => {
                println!("Your shots so far:");
                print_board(engine.board(player.opponent()), false);
                let Some(input) = prompt("battle> fire <A1> | quit: ")? else {
                    return Ok(());
                };
                let mut parts = input.split_whitespace();
                match parts.next() {
                    Some("fire") => match parts.next().and_then(parse_coord) {
                        Some((r, c)) => match engine.attack(player, r, c) {
                            Ok(rep) => {
                                println!("{} -> {:?}", coord_to_string(r, c), rep.outcome);
                                if rep.outcome == AttackOutcome::Sunk {
                                    println!("A ship went down!");
                                }
                            }
                            Err(e) => println!("{}", e),
                        },
                        None => println!("Could not parse coordinate"),
                    },
                    Some("quit") => return Ok(()),
                    _ => println!("Unknown command"),
                }
            }
            Phase::Over => {
                print_board(engine.board(PlayerId::One), true);
                print_board(engine.board(PlayerId::Two), true);
                let Some(input) = prompt("game over> restart | quit: ")? else {
                    return Ok(());
                };
                match input.as_str() {
                    "restart" => engine.restart(),
                    "quit" => return Ok(()),
                    _ => println!("Unknown command"),
                }
            }
        }
    }
}

#[cfg(feature = "std")]
fn report(result: Result<(), GameError>) {
    if let Err(e) = result {
        println!("{}", e);
    }
}

#[cfg(feature = "std")]
fn run_auto(seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = make_rng(seed);
    let mut engine = GameEngine::new();

    engine
        .random_placement(PlayerId::One, &mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    engine
        .random_placement(PlayerId::Two, &mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut shots = 0usize;
    while engine.phase() == Phase::Battle {
        let attacker = engine.current_player();
        let r = rng.random_range(0..GRID_SIZE);
        let c = rng.random_range(0..GRID_SIZE);
        match engine.attack(attacker, r, c) {
            Ok(rep) => {
                shots += 1;
                if rep.outcome != AttackOutcome::Miss {
                    println!(
                        "Player {} {} at {}: {:?}",
                        attacker.number(),
                        if rep.outcome == AttackOutcome::Sunk { "sank a ship" } else { "hit" },
                        coord_to_string(r, c),
                        rep.outcome
                    );
                }
            }
            Err(GameError::CellAlreadyResolved) => continue,
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
    }

    println!("\n{} after {} shots", engine.status(), shots);
    print_board(engine.board(PlayerId::One), true);
    print_board(engine.board(PlayerId::Two), true);
    Ok(())
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Hotseat { seed } => run_hotseat(seed),
        Commands::Auto { seed } => run_auto(seed),
    }
}
