//! Analyze a PGN database and write the opening-tree JSON report.
//!
//! Usage: opening-tree <input.pgn[.zst]> [output.json] [--max-games N] [--max-ply N] [--pretty]

use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use opening_tree::{DatabaseReport, TreeBuilder, read_games};

const DEFAULT_OUTPUT: &str = "output.json";

struct Options {
    input: String,
    output: PathBuf,
    max_games: Option<usize>,
    max_ply: Option<usize>,
    pretty: bool,
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {program} <input.pgn[.zst]> [output.json] [--max-games N] [--max-ply N] [--pretty]"
    );
    eprintln!();
    eprintln!("The input may be a glob pattern covering several PGN files.");
    process::exit(1);
}

fn parse_options() -> Options {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("opening-tree");

    let mut positional: Vec<&str> = Vec::new();
    let mut max_games = None;
    let mut max_ply = None;
    let mut pretty = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-games" => {
                max_games = args.get(i + 1).and_then(|s| s.parse().ok());
                if max_games.is_none() {
                    usage(program);
                }
                i += 2;
            }
            "--max-ply" => {
                max_ply = args.get(i + 1).and_then(|s| s.parse().ok());
                if max_ply.is_none() {
                    usage(program);
                }
                i += 2;
            }
            "--pretty" => {
                pretty = true;
                i += 1;
            }
            flag if flag.starts_with("--") => usage(program),
            arg => {
                positional.push(arg);
                i += 1;
            }
        }
    }

    let (input, output) = match positional.as_slice() {
        [input] => (input.to_string(), PathBuf::from(DEFAULT_OUTPUT)),
        [input, output] => (input.to_string(), PathBuf::from(output)),
        _ => usage(program),
    };

    Options {
        input,
        output,
        max_games,
        max_ply,
        pretty,
    }
}

fn main() -> anyhow::Result<()> {
    let options = parse_options();
    let start = Instant::now();

    let games = read_games(&options.input, options.max_games)?;
    println!("Parsed {} games from {}", games.len(), options.input);

    let mut builder = TreeBuilder::new(&games);
    if let Some(max_ply) = options.max_ply {
        builder = builder.max_ply(max_ply);
    }
    let tree = builder.build();
    println!("Opening tree: {} nodes", tree.len());

    let report = DatabaseReport::new(games, tree);
    report.write_to_file(&options.output, options.pretty)?;

    let rates = &report.win_rates;
    println!(
        "White {:.1}% / Black {:.1}% / Draw {:.1}%",
        rates.white.rate, rates.black.rate, rates.draw.rate
    );
    println!(
        "Wrote {} in {:.2}s",
        options.output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
