//! Batch puzzle generation.
//!
//! Generates a corpus of puzzles per difficulty and writes them as a JSON
//! array, ready for upload into whatever store serves them. Progress goes
//! to stderr so the JSON on stdout stays clean.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use sudoku_engine::{Catalog, Difficulty, Puzzle};

#[derive(Parser)]
#[command(name = "sudoku-gen", about = "Generate Sudoku puzzles as JSON")]
struct Args {
    /// Puzzles to generate per difficulty
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// Single difficulty to generate (easy, medium, hard); all by default
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let difficulties: Vec<Difficulty> = match &args.difficulty {
        Some(name) => {
            let difficulty = name
                .parse::<Difficulty>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
            vec![difficulty]
        }
        None => Difficulty::all().to_vec(),
    };

    let catalog = Catalog::new();
    let mut puzzles: Vec<Puzzle> = Vec::with_capacity(difficulties.len() * args.count);

    for &difficulty in &difficulties {
        for i in 0..args.count {
            let puzzle = match args.seed {
                Some(seed) => {
                    catalog.generate_with_seed(difficulty, seed.wrapping_add(i as u64))
                }
                None => catalog.generate(difficulty),
            };
            eprintln!("generated {difficulty} puzzle {}/{}", i + 1, args.count);
            puzzles.push(puzzle);
        }
    }

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    write_json(writer, &puzzles, args.pretty)?;
    eprintln!("finished generating {} puzzles", puzzles.len());
    Ok(())
}

fn write_json(mut writer: Box<dyn Write>, puzzles: &[Puzzle], pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, puzzles)?;
    } else {
        serde_json::to_writer(&mut writer, puzzles)?;
    }
    writeln!(writer)?;
    writer.flush()
}
