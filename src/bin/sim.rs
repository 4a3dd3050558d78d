use dynamic_battleship::{cli, Difficulty, Mode};
use serde_json::json;

const MAX_SHOTS: usize = 10_000;

fn main() -> anyhow::Result<()> {
    dynamic_battleship::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [easy|normal|expert|genius]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let difficulty = match args.get(2).map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("normal") => Difficulty::Normal,
        Some("easy") => Difficulty::Easy,
        Some("expert") => Difficulty::Expert,
        Some("genius") => Difficulty::Genius,
        Some(other) => anyhow::bail!("unknown difficulty '{}'", other),
    };

    let engine = cli::autoplay(seed, difficulty, Mode::Arcade, MAX_SHOTS)?;
    let points = |name: &str| engine.accounts().player(name).map_or(0, |p| p.points());

    let result = json!({
        "seed": seed,
        "difficulty": difficulty,
        "winner": engine.winner().map(|p| p.username()),
        "shots": engine.shots_fired(),
        "regenerations": engine.regenerations(),
        "points": { "player1": points("player1"), "player2": points("player2") },
        "final": engine.snapshot(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
