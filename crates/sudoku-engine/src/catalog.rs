//! Catalog boundary.
//!
//! The seam the engine exposes to persistence and serving code: request a
//! puzzle at a difficulty, solve an externally supplied board, or check a
//! single placement. The catalog owns only its carve configuration; each
//! call works on its own grid and recursion stack, so concurrent callers
//! need no coordination.

use crate::{CarveConfig, Carver, Difficulty, Grid, Position, SolveOutcome, Solver};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated puzzle, immutable once assembled. `board` and `solution`
/// agree on every clue; ownership passes to the caller for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: String,
    pub difficulty: Difficulty,
    pub board: Grid,
    pub solution: Grid,
}

/// Puzzle source backed by the solver and carver.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    config: CarveConfig,
}

impl Catalog {
    /// Catalog with the default difficulty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with an operator-supplied difficulty table.
    pub fn with_config(config: CarveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// Generate a fresh puzzle: grow a random solution out of an empty
    /// grid, carve it down to the tier's clue count, and stamp an id.
    pub fn generate(&self, difficulty: Difficulty) -> Puzzle {
        let solution = Self::fresh_solution(Solver::generating());
        let board = Carver::new(self.config.clone()).carve(&solution, difficulty);
        Self::assemble(difficulty, board, solution)
    }

    /// Seeded variant of [`generate`](Self::generate) for reproducible
    /// output (the id is still fresh).
    pub fn generate_with_seed(&self, difficulty: Difficulty, seed: u64) -> Puzzle {
        let solution = Self::fresh_solution(Solver::generating_with_seed(seed));
        let board =
            Carver::with_seed(self.config.clone(), seed).carve(&solution, difficulty);
        Self::assemble(difficulty, board, solution)
    }

    /// Solve an externally supplied board deterministically. Used to
    /// validate a submission or compute a completion for hints.
    pub fn solve(&self, board: &Grid) -> SolveOutcome {
        Solver::validating().solve(board)
    }

    /// Whether placing `value` at `pos` keeps the board legal. Thin
    /// pass-through to the constraint check, for interactive input.
    pub fn validate_placement(&self, board: &Grid, pos: Position, value: u8) -> bool {
        board.is_legal(pos, value)
    }

    fn fresh_solution(mut solver: Solver) -> Grid {
        // An empty grid always has a completion, so this terminates on
        // the first pass.
        loop {
            if let SolveOutcome::Solved(grid) = solver.solve(&Grid::empty()) {
                return grid;
            }
        }
    }

    fn assemble(difficulty: Difficulty, board: Grid, solution: Grid) -> Puzzle {
        Puzzle {
            id: Uuid::new_v4().to_string(),
            difficulty,
            board,
            solution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CELL_COUNT;

    #[test]
    fn test_generate_all_difficulties() {
        let catalog = Catalog::new();
        for &difficulty in Difficulty::all() {
            let puzzle = catalog.generate_with_seed(difficulty, 42);

            assert!(puzzle.solution.is_solved());
            assert_eq!(puzzle.difficulty, difficulty);
            assert!(!puzzle.id.is_empty());

            let expected_clues =
                CELL_COUNT - catalog.config().cells_to_clear(difficulty);
            assert_eq!(puzzle.board.clue_count(), expected_clues);

            // Every clue on the board agrees with the solution.
            for pos in Position::all() {
                if puzzle.board.get(pos) != 0 {
                    assert_eq!(puzzle.board.get(pos), puzzle.solution.get(pos));
                }
            }
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let catalog = Catalog::new();
        let a = catalog.generate_with_seed(Difficulty::Easy, 1);
        let b = catalog.generate_with_seed(Difficulty::Easy, 1);
        assert_ne!(a.id, b.id);
        // Same seed, same grids.
        assert_eq!(a.board, b.board);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn test_generated_board_is_solvable() {
        let catalog = Catalog::new();
        let puzzle = catalog.generate_with_seed(Difficulty::Hard, 7);

        let solved = catalog.solve(&puzzle.board).solved().unwrap();
        assert!(solved.is_solved());
        // The carved clues survive into any completion.
        for pos in Position::all() {
            if puzzle.board.get(pos) != 0 {
                assert_eq!(solved.get(pos), puzzle.board.get(pos));
            }
        }
    }

    #[test]
    fn test_solve_rejects_contradictory_board() {
        let mut board = Grid::empty();
        board.set(Position::new(3, 0), 9);
        board.set(Position::new(3, 8), 9);

        let catalog = Catalog::new();
        assert_eq!(catalog.solve(&board), SolveOutcome::Unsatisfiable);
    }

    #[test]
    fn test_validate_placement_passthrough() {
        let catalog = Catalog::new();
        let mut board = Grid::empty();
        board.set(Position::new(0, 0), 4);

        assert!(!catalog.validate_placement(&board, Position::new(0, 5), 4));
        assert!(catalog.validate_placement(&board, Position::new(0, 5), 7));
    }

    #[test]
    fn test_custom_config_changes_clue_counts() {
        let config = CarveConfig::new(20, 35, 55, 17).unwrap();
        let catalog = Catalog::with_config(config);
        let puzzle = catalog.generate_with_seed(Difficulty::Hard, 3);
        assert_eq!(puzzle.board.clue_count(), CELL_COUNT - 55);
    }

    #[test]
    fn test_puzzle_wire_shape() {
        let catalog = Catalog::new();
        let puzzle = catalog.generate_with_seed(Difficulty::Medium, 5);

        let json = serde_json::to_value(&puzzle).unwrap();
        assert_eq!(json["difficulty"], "medium");
        assert!(json["board"].is_array());
        assert_eq!(json["board"].as_array().unwrap().len(), 9);
        assert!(json["board"][0].is_array());

        let back: Puzzle = serde_json::from_value(json).unwrap();
        assert_eq!(back, puzzle);
    }
}
