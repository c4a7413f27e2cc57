//! Puzzle carving.
//!
//! Turns a solved grid into a playable board by clearing a configured
//! number of cells for the requested difficulty. The clear counts and the
//! minimum-clue floor are configuration, validated when the config is
//! built or deserialized, never mid-carve.

use crate::rng::SimpleRng;
use crate::{Grid, Position, CELL_COUNT, GRID_SIZE};
use serde::{Deserialize, Serialize};

/// Difficulty tier of a puzzle. Serializes lowercase, matching the wire
/// values the surrounding system stores and queries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::UnknownDifficulty {
                name: other.to_string(),
            }),
        }
    }
}

/// Configuration rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "{difficulty}: clearing {clears} cells leaves fewer than {min_clues} clues on the board"
    )]
    ClearCountExceedsFloor {
        difficulty: Difficulty,
        clears: usize,
        min_clues: usize,
    },
    #[error("unknown difficulty {name:?} (expected easy, medium, or hard)")]
    UnknownDifficulty { name: String },
}

/// Number of clues the smallest uniquely solvable 9x9 puzzle can have.
pub const MIN_CLUE_FLOOR: usize = 17;

fn default_min_clues() -> usize {
    MIN_CLUE_FLOOR
}

/// Raw shape of the carve configuration, as operators write it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClearTable {
    easy: usize,
    medium: usize,
    hard: usize,
    #[serde(default = "default_min_clues")]
    min_clues: usize,
}

/// Difficulty -> cells-to-clear table plus the minimum-clue floor.
///
/// Can only be built through [`CarveConfig::new`] or deserialization, both
/// of which reject any tier whose clear count would leave fewer than
/// `min_clues` clues. A `CarveConfig` in hand is therefore always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClearTable", into = "ClearTable")]
pub struct CarveConfig {
    easy: usize,
    medium: usize,
    hard: usize,
    min_clues: usize,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            easy: 30,
            medium: 40,
            hard: 50,
            min_clues: MIN_CLUE_FLOOR,
        }
    }
}

impl CarveConfig {
    /// Build a config, rejecting clear counts that violate the floor.
    pub fn new(
        easy: usize,
        medium: usize,
        hard: usize,
        min_clues: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            easy,
            medium,
            hard,
            min_clues,
        };
        for &difficulty in Difficulty::all() {
            let clears = config.cells_to_clear(difficulty);
            if clears > CELL_COUNT - min_clues.min(CELL_COUNT) {
                return Err(ConfigError::ClearCountExceedsFloor {
                    difficulty,
                    clears,
                    min_clues,
                });
            }
        }
        Ok(config)
    }

    /// How many cells to clear for a tier.
    pub fn cells_to_clear(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// The minimum number of clues any carved board keeps.
    pub fn min_clues(&self) -> usize {
        self.min_clues
    }
}

impl TryFrom<ClearTable> for CarveConfig {
    type Error = ConfigError;

    fn try_from(table: ClearTable) -> Result<Self, Self::Error> {
        Self::new(table.easy, table.medium, table.hard, table.min_clues)
    }
}

impl From<CarveConfig> for ClearTable {
    fn from(config: CarveConfig) -> Self {
        Self {
            easy: config.easy,
            medium: config.medium,
            hard: config.hard,
            min_clues: config.min_clues,
        }
    }
}

/// Clears cells out of solved grids to produce playable boards.
pub struct Carver {
    config: CarveConfig,
    rng: SimpleRng,
}

impl Carver {
    pub fn new(config: CarveConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Carver with a fixed seed, for reproducible boards.
    pub fn with_seed(config: CarveConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Produce a board by clearing the configured number of cells.
    ///
    /// Picks uniformly random cells, clearing each filled one it hits,
    /// until the tier's count is reached. Panics if `solution` is not a
    /// full valid solution; carving anything else is a caller bug.
    pub fn carve(&mut self, solution: &Grid, difficulty: Difficulty) -> Grid {
        assert!(solution.is_solved(), "carve requires a solved grid");

        let target = self.config.cells_to_clear(difficulty);
        let mut board = solution.clone();
        let mut cleared = 0;
        while cleared < target {
            let pos = Position::new(
                self.rng.next_below(GRID_SIZE),
                self.rng.next_below(GRID_SIZE),
            );
            if board.get(pos) != 0 {
                board.set(pos, 0);
                cleared += 1;
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::canonical_solution;

    #[test]
    fn test_default_table() {
        let config = CarveConfig::default();
        assert_eq!(config.cells_to_clear(Difficulty::Easy), 30);
        assert_eq!(config.cells_to_clear(Difficulty::Medium), 40);
        assert_eq!(config.cells_to_clear(Difficulty::Hard), 50);
        assert_eq!(config.min_clues(), MIN_CLUE_FLOOR);
    }

    #[test]
    fn test_config_rejects_floor_violation() {
        // 81 - 17 = 64 cleared cells is the most any tier may ask for.
        assert!(CarveConfig::new(30, 40, 64, 17).is_ok());

        let err = CarveConfig::new(30, 40, 65, 17).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ClearCountExceedsFloor {
                difficulty: Difficulty::Hard,
                clears: 65,
                min_clues: 17,
            }
        );
    }

    #[test]
    fn test_config_deserialization_validates() {
        let config: CarveConfig =
            serde_json::from_str(r#"{"easy": 25, "medium": 45, "hard": 55, "min_clues": 20}"#)
                .unwrap();
        assert_eq!(config.cells_to_clear(Difficulty::Medium), 45);
        assert_eq!(config.min_clues(), 20);

        // min_clues defaults to the floor when omitted.
        let config: CarveConfig =
            serde_json::from_str(r#"{"easy": 30, "medium": 40, "hard": 50}"#).unwrap();
        assert_eq!(config.min_clues(), MIN_CLUE_FLOOR);

        // A table violating the floor never becomes a config.
        let result: Result<CarveConfig, _> =
            serde_json::from_str(r#"{"easy": 30, "medium": 40, "hard": 70}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = CarveConfig::new(28, 42, 52, 18).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: CarveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_carve_easy_canonical() {
        let solution = canonical_solution();
        let mut carver = Carver::with_seed(CarveConfig::default(), 42);
        let board = carver.carve(&solution, Difficulty::Easy);

        // 30 cleared cells leave exactly 51 clues.
        assert_eq!(board.clue_count(), 51);

        // Every remaining clue agrees with the solution.
        for pos in Position::all() {
            if board.get(pos) != 0 {
                assert_eq!(board.get(pos), solution.get(pos));
            }
        }
    }

    #[test]
    fn test_carve_counts_per_difficulty() {
        let solution = canonical_solution();
        for &difficulty in Difficulty::all() {
            let mut carver = Carver::with_seed(CarveConfig::default(), 7);
            let board = carver.carve(&solution, difficulty);
            let expected = CELL_COUNT - CarveConfig::default().cells_to_clear(difficulty);
            assert_eq!(board.clue_count(), expected, "tier {difficulty}");
        }
    }

    #[test]
    fn test_carve_seeded_is_reproducible() {
        let solution = canonical_solution();
        let a = Carver::with_seed(CarveConfig::default(), 9).carve(&solution, Difficulty::Hard);
        let b = Carver::with_seed(CarveConfig::default(), 9).carve(&solution, Difficulty::Hard);
        assert_eq!(a, b);
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        for &d in Difficulty::all() {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(ConfigError::UnknownDifficulty { .. })
        ));
    }

    #[test]
    fn test_difficulty_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"medium\"");
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
    }

    #[test]
    #[should_panic(expected = "carve requires a solved grid")]
    fn test_carve_rejects_unsolved_grid() {
        Carver::with_seed(CarveConfig::default(), 1).carve(&Grid::empty(), Difficulty::Easy);
    }
}
