//! Example demonstrating puzzle generation on arbitrary block geometries.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` over a `Solver`
//! - Generate a puzzle from a seeded RNG
//! - Display the clue grid and its full solution
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Choose the block shape (board size is `block_width * block_height`
//! squared):
//!
//! ```sh
//! cargo run --example generate_board -- --block-width 3 --block-height 2
//! ```
//!
//! Control seeding, clue count, and the RNG seed:
//!
//! ```sh
//! cargo run --example generate_board -- --seed-cells 8 --clues 30 --rng-seed 42
//! ```

use std::process;

use clap::Parser;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use varoku_core::{Geometry, Position};
use varoku_generator::{GeneratedPuzzle, PuzzleGenerator};
use varoku_solver::testing::BacktrackingSolver;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Block width in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 2)]
    block_width: u8,

    /// Block height in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 2)]
    block_height: u8,

    /// Number of cells filled with random values before solving.
    #[arg(long, value_name = "COUNT", default_value_t = 6)]
    seed_cells: usize,

    /// Number of solution cells kept as clues.
    #[arg(long, value_name = "COUNT", default_value_t = 6)]
    clues: usize,

    /// Seed for the puzzle RNG.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    rng_seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let geometry = match Geometry::new(args.block_width, args.block_height) {
        Ok(geometry) => geometry,
        Err(err) => {
            eprintln!("Invalid geometry: {err}");
            process::exit(2);
        }
    };

    let solver = BacktrackingSolver;
    let generator = PuzzleGenerator::new(&solver);
    let mut rng = Pcg64Mcg::seed_from_u64(args.rng_seed);

    let puzzle = match generator.generate(geometry, args.seed_cells, args.clues, &mut rng) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("Generation failed: {err}");
            process::exit(1);
        }
    };

    println!("Geometry:");
    println!(
        "  {}x{} blocks, {} values",
        geometry.block_width(),
        geometry.block_height(),
        geometry.size()
    );
    println!();
    println!("Problem:");
    print_clues(&puzzle);
    println!();
    println!("Solution:");
    print_solution(&puzzle);
}

fn print_clues(puzzle: &GeneratedPuzzle) {
    let geometry = puzzle.geometry;
    for y in 0..geometry.size() {
        print!(" ");
        for x in 0..geometry.size() {
            let pos = Position::new(x, y);
            match puzzle.clues.iter().find(|&&(clue, _)| clue == pos) {
                Some(&(_, value)) => print!(" {value:>3}"),
                None => print!("   ."),
            }
        }
        println!();
    }
}

fn print_solution(puzzle: &GeneratedPuzzle) {
    let geometry = puzzle.geometry;
    for y in 0..geometry.size() {
        print!(" ");
        for x in 0..geometry.size() {
            print!(" {:>3}", puzzle.solution.value(Position::new(x, y)));
        }
        println!();
    }
}
