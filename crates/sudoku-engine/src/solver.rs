//! Backtracking solver.
//!
//! Depth-first search over empty cells in fixed row-major order. The one
//! knob is the candidate ordering: sequential for validating externally
//! supplied boards (deterministic result), shuffled for growing a fresh
//! solution out of an empty grid. Randomness enters the engine here and
//! nowhere else.

use crate::rng::SimpleRng;
use crate::Grid;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Candidate ordering strategy for the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueOrder {
    /// Try `1..9` in fixed order. Deterministic.
    Sequential,
    /// Try a fresh random permutation of `1..9` at every cell.
    Shuffled,
}

/// Outcome of a solve call. `Unsatisfiable` is a legitimate result, not a
/// fault; callers branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// The grid extends to a full valid solution.
    Solved(Grid),
    /// No assignment of the empty cells satisfies the constraints.
    Unsatisfiable,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Unsatisfiable)
    }

    /// The solved grid, if any.
    pub fn solved(self) -> Option<Grid> {
        match self {
            SolveOutcome::Solved(grid) => Some(grid),
            SolveOutcome::Unsatisfiable => None,
        }
    }
}

enum Search {
    Solved,
    Exhausted,
    TimedOut,
}

/// Backtracking Sudoku solver.
///
/// Stateless across calls apart from the RNG cursor; every solve works on
/// its own copy of the input grid, so concurrent callers need no
/// coordination and the caller's grid is never mutated.
pub struct Solver {
    order: ValueOrder,
    rng: SimpleRng,
}

impl Solver {
    /// Deterministic solver for validating externally supplied boards.
    pub fn validating() -> Self {
        Self {
            order: ValueOrder::Sequential,
            rng: SimpleRng::with_seed(0),
        }
    }

    /// Randomized solver for generating fresh solution grids.
    pub fn generating() -> Self {
        Self {
            order: ValueOrder::Shuffled,
            rng: SimpleRng::new(),
        }
    }

    /// Randomized solver with a fixed seed, for reproducible generation.
    pub fn generating_with_seed(seed: u64) -> Self {
        Self {
            order: ValueOrder::Shuffled,
            rng: SimpleRng::with_seed(seed),
        }
    }

    pub fn order(&self) -> ValueOrder {
        self.order
    }

    /// Complete the grid, or report that no completion exists.
    ///
    /// An input that already violates a row, column, or box constraint is
    /// rejected before any search.
    pub fn solve(&mut self, grid: &Grid) -> SolveOutcome {
        match self.solve_impl(grid, None) {
            Some(outcome) => outcome,
            // Unreachable without a deadline.
            None => SolveOutcome::Unsatisfiable,
        }
    }

    /// Like [`solve`](Self::solve), but gives up once `budget` has
    /// elapsed, returning `None`. The deadline is checked at every cell
    /// visit, so pathological orderings cannot run away.
    pub fn solve_within(&mut self, grid: &Grid, budget: Duration) -> Option<SolveOutcome> {
        self.solve_impl(grid, Some(Instant::now() + budget))
    }

    fn solve_impl(&mut self, grid: &Grid, deadline: Option<Instant>) -> Option<SolveOutcome> {
        if !grid.is_consistent() {
            return Some(SolveOutcome::Unsatisfiable);
        }
        let mut working = grid.clone();
        match self.search(&mut working, deadline) {
            Search::Solved => Some(SolveOutcome::Solved(working)),
            Search::Exhausted => Some(SolveOutcome::Unsatisfiable),
            Search::TimedOut => None,
        }
    }

    fn search(&mut self, grid: &mut Grid, deadline: Option<Instant>) -> Search {
        if let Some(d) = deadline {
            if Instant::now() >= d {
                return Search::TimedOut;
            }
        }

        let pos = match grid.first_empty() {
            Some(pos) => pos,
            None => return Search::Solved,
        };

        let mut candidates: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        if self.order == ValueOrder::Shuffled {
            self.rng.shuffle(&mut candidates);
        }

        for &value in &candidates {
            if !grid.is_legal(pos, value) {
                continue;
            }
            grid.set(pos, value);
            match self.search(grid, deadline) {
                Search::Solved => return Search::Solved,
                Search::TimedOut => {
                    grid.set(pos, 0);
                    return Search::TimedOut;
                }
                Search::Exhausted => grid.set(pos, 0),
            }
        }
        Search::Exhausted
    }

    /// Count completions of the grid, stopping once `limit` are found.
    pub fn count_solutions(&mut self, grid: &Grid, limit: usize) -> usize {
        if limit == 0 || !grid.is_consistent() {
            return 0;
        }
        let mut working = grid.clone();
        let mut count = 0;
        self.count_recursive(&mut working, &mut count, limit);
        count
    }

    /// Whether the grid has exactly one completion.
    pub fn has_unique_solution(&mut self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }

    fn count_recursive(&mut self, grid: &mut Grid, count: &mut usize, limit: usize) {
        if *count >= limit {
            return;
        }
        let pos = match grid.first_empty() {
            Some(pos) => pos,
            None => {
                *count += 1;
                return;
            }
        };

        for value in 1..=9 {
            if !grid.is_legal(pos, value) {
                continue;
            }
            grid.set(pos, value);
            self.count_recursive(grid, count, limit);
            grid.set(pos, 0);
            if *count >= limit {
                return;
            }
        }
    }
}
