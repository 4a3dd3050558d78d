#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use dynamic_battleship::{
    cli::{self, coord_to_string},
    init_logging, CellState, Difficulty, GameEngine, Mode,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Two players take turns at the same terminal.
    Play {
        #[arg(long, default_value = "player1")]
        player1: String,
        #[arg(long, default_value = "player2")]
        player2: String,
        #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
        difficulty: Difficulty,
        #[arg(long, value_enum, default_value_t = Mode::Tutorial)]
        mode: Mode,
        #[arg(long, help = "Fix RNG seed for reproducible regenerations (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Place both fleets at random and let random shooters play it out.
    Auto {
        #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
        difficulty: Difficulty,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 10_000)]
        max_shots: usize,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            player1,
            player2,
            difficulty,
            mode,
            seed,
        } => {
            let mut engine = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (regenerations will be reproducible)", s);
                    GameEngine::with_seed(s)
                }
                None => GameEngine::new(),
            };
            engine.register(&player2, &player2)?;
            engine.register(&player1, &player1)?;
            engine.set_difficulty(difficulty)?;
            engine.set_mode(mode);
            engine.start_match(&player2)?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            placement(&mut engine, &mut input)?;
            battle(&mut engine, &mut input)?;
            print_scores(&engine, &[&player1, &player2]);
        }
        Commands::Auto {
            difficulty,
            seed,
            max_shots,
        } => {
            let engine = cli::autoplay(seed, difficulty, Mode::Arcade, max_shots)?;
            match engine.winner() {
                Some(w) => println!(
                    "{} won after {} shots and {} regenerations",
                    w.username(),
                    engine.shots_fired(),
                    engine.regenerations()
                ),
                None => println!("No winner after {} shots", engine.shots_fired()),
            }
            print_scores(&engine, &["player1", "player2"]);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn prompt(input: &mut impl BufRead, text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input closed");
    }
    Ok(line.trim().to_string())
}

#[cfg(feature = "std")]
fn placement(engine: &mut GameEngine, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("\n════════════════ SHIP PLACEMENT ({}) ════════════════", engine.difficulty());
    println!("  <CODE> <COORD> [H|V]  place a ship, e.g. 'AZ B2 V'");
    println!("  remove <CODE>         take a ship back");
    println!("  auto                  fill the rest of the fleet at random");
    println!("  ready                 finish placement");
    while engine.is_placement_phase() {
        let who = engine.current_turn_username().unwrap_or_default().to_string();
        println!(
            "\n{}: {}/{} ships placed",
            who,
            engine.current_turn_ship_count(),
            engine.difficulty().required_ships()
        );
        if let Some(own) = engine.own_board() {
            print!("{}", cli::render_grid(&own));
        }
        let line = prompt(input, "> ")?;
        let mut words = line.split_whitespace();
        match words.next().map(str::to_ascii_lowercase).as_deref() {
            None => continue,
            Some("auto") => {
                if let Err(e) = engine.place_fleet_randomly() {
                    println!("✗ {}", e);
                }
            }
            Some("remove") => match words.next().map(str::parse) {
                Some(Ok(code)) => match engine.remove_ship(code) {
                    Ok(ship) => println!("✓ removed {}", ship.code()),
                    Err(e) => println!("✗ {}", e),
                },
                _ => println!("✗ usage: remove <CODE>"),
            },
            Some("ready") => match engine.continue_to_next_turn() {
                Ok(()) => println!("✓ {} is ready", who),
                Err(e) => println!("✗ {}", e),
            },
            Some(_) => match cli::parse_placement(&line) {
                Ok((code, r, c, o)) => match engine.add_ship(code, r, c, o) {
                    Ok(_) => println!("✓ {} placed at {}", code.name(), coord_to_string(r, c)),
                    Err(e) => println!("✗ {}", e),
                },
                Err(e) => println!("✗ {}", e),
            },
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn battle(engine: &mut GameEngine, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("\n════════════════════ BATTLE ════════════════════");
    println!("Enter a target like 'C4', or 'surrender'.");
    loop {
        let who = engine.current_turn_username().unwrap_or_default().to_string();
        let view = engine
            .enemy_board()
            .ok_or_else(|| anyhow::anyhow!("no match in progress"))?;
        let shown = if engine.mode().reveals_enemy() {
            cli::reveal(&view, engine.enemy_ships())
        } else {
            view
        };
        println!("\n{}'s turn. Enemy waters:", who);
        print!("{}", cli::render_grid(&shown));
        println!("{}", cli::LEGEND);

        let line = prompt(input, "target> ")?;
        if line.eq_ignore_ascii_case("surrender") {
            if let Some(winner) = engine.surrender() {
                println!("\n🏳  {} surrendered. {} wins!", who, winner.username());
            }
            return Ok(());
        }
        let (r, c) = match cli::parse_coord(&line) {
            Ok(rc) => rc,
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        };
        let target = coord_to_string(r, c);
        match engine.shoot(r, c) {
            Some(CellState::Miss) => {
                let next = engine.current_turn_username().unwrap_or_default();
                if next == who {
                    println!("💧 You already missed at {}.", target);
                } else {
                    println!("💧 Miss at {}. Turn passes to {}.", target, next);
                }
            }
            Some(CellState::Hit) => {
                let code = engine.last_hit_ship().map(|s| s.code().name()).unwrap_or("ship");
                if engine.was_last_shot_regenerated() {
                    println!("🎯 HIT on the {} at {}! The enemy fleet has moved.", code, target);
                } else {
                    println!("🎯 {} at {}: that part was already damaged. Nothing moves.", code, target);
                }
            }
            Some(CellState::Sunk) => {
                if let Some(winner) = engine.winner() {
                    println!("\n💥 All enemy ships sunk. {} wins!", winner.username());
                    return Ok(());
                }
                match engine.last_hit_ship().filter(|_| engine.was_last_ship_sunk()) {
                    Some(ship) => println!("💥 SUNK! The {} goes down.", ship.code().name()),
                    None => println!("That wreck is already on the bottom."),
                }
            }
            Some(other) => println!("{} was already resolved as {:?}.", target, other),
            None => println!("✗ shot rejected"),
        }
    }
}

#[cfg(feature = "std")]
fn print_scores(engine: &GameEngine, names: &[&str]) {
    println!("\nScores:");
    for name in names {
        if let Some(p) = engine.accounts().player(name) {
            println!(
                "  {:<12} {:>3} pts  last: {}",
                p.username(),
                p.points(),
                p.history().latest().unwrap_or("-")
            );
        }
    }
}
