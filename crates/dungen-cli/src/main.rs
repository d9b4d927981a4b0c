//! Command-line front end: generate one level and print it.

use std::process::ExitCode;

use clap::Parser;
use dungen_core::{generate, GameRng, GenConfig};

#[derive(Parser, Debug)]
#[command(name = "dungen", about = "Procedural dungeon layout generator", version)]
struct Args {
    /// Seed for the generation RNG; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Map width in tiles.
    #[arg(long, default_value_t = 80)]
    width: i32,

    /// Map height in tiles.
    #[arg(long, default_value_t = 21)]
    height: i32,

    /// Ceiling on the number of rooms.
    #[arg(long, default_value_t = 9)]
    rooms: usize,

    /// Chance (percent) for corridors and doors to be secret.
    #[arg(long, default_value_t = 0)]
    secret: u32,

    /// Emit the level as JSON instead of ASCII art.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let cfg = GenConfig {
        width: args.width,
        height: args.height,
        max_rooms: args.rooms,
        secret_percent: args.secret,
        ..Default::default()
    };

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    eprintln!("seed: {}", rng.seed());

    let level = match generate(&cfg, &mut rng) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&level) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", level.render_ascii());
    }
    ExitCode::SUCCESS
}
