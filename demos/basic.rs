//! Basic example of using the Sudoku engine

use sudoku_engine::{Catalog, Difficulty, Grid, SolveOutcome, Solver};

fn main() {
    // Generate a puzzle
    println!("Generating a medium puzzle...\n");
    let catalog = Catalog::new();
    let puzzle = catalog.generate(Difficulty::Medium);

    println!("Board ({}):", puzzle.id);
    println!("{}", puzzle.board);
    println!("Clues: {}", puzzle.board.clue_count());
    println!("Empty cells: {}\n", puzzle.board.empty_count());

    // Solve it back
    match catalog.solve(&puzzle.board) {
        SolveOutcome::Solved(solution) => {
            println!("Solved:");
            println!("{solution}");
        }
        SolveOutcome::Unsatisfiable => {
            println!("No solution found (this shouldn't happen for a generated puzzle!)");
        }
    }

    // Parse a puzzle from a string
    println!("--- Parsing a puzzle from string ---\n");
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    if let Some(grid) = Grid::from_string(puzzle_string) {
        println!("Parsed puzzle:");
        println!("{grid}");

        // Check uniqueness
        let mut solver = Solver::validating();
        let solutions = solver.count_solutions(&grid, 2);
        println!("Number of solutions (up to 2): {solutions}");
    }
}
