//! Settings for generating and solving a maze.

use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::find::FrontierSearch;
use crate::grid::GridMaze;

/// Configuration for maze generation and search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekerConfig {
    /// Number of rows of generated mazes, at least 2.
    /// Default: 67
    pub rows: usize,

    /// Number of columns of generated mazes, at least 2.
    /// Default: 105
    pub cols: usize,

    /// How many of the best paths advance each round, at least 1.
    /// Default: 16
    pub max_paths_per_round: usize,

    /// Seed for generation. A random seed is drawn when unset.
    pub seed: Option<u64>,
}

impl Default for SeekerConfig {
    fn default() -> Self {
        Self {
            rows: 67,
            cols: 105,
            max_paths_per_round: 16,
            seed: None,
        }
    }
}

impl SeekerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the maze dimensions.
    pub fn with_dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Builder-style setter for the frontier cap.
    pub fn with_max_paths_per_round(mut self, max: usize) -> Self {
        self.max_paths_per_round = max;
        self
    }

    /// Builder-style setter for the generation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 || self.cols < 2 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_paths_per_round < 1 {
            return Err(MazeError::InvalidFrontierCap(self.max_paths_per_round));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn generate(&self) -> Result<GridMaze> {
        GridMaze::generate(self.rows, self.cols, &mut self.rng())
    }

    pub fn search(&self) -> Result<FrontierSearch> {
        FrontierSearch::new(self.max_paths_per_round)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeekerConfig::default();
        assert_eq!((config.rows, config.cols), (67, 105));
        assert_eq!(config.max_paths_per_round, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SeekerConfig::from_json(r#"{ "rows": 5, "seed": 9 }"#).unwrap();
        assert_eq!(
            config,
            SeekerConfig::default().with_dimensions(5, 105).with_seed(9)
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SeekerConfig::from_json(r#"{ "cols": 1 }"#),
            Err(MazeError::InvalidDimensions { rows: 67, cols: 1 })
        ));
        assert!(matches!(
            SeekerConfig::from_json(r#"{ "max_paths_per_round": 0 }"#),
            Err(MazeError::InvalidFrontierCap(0))
        ));
        assert!(matches!(
            SeekerConfig::from_json("{ rows: }"),
            Err(MazeError::Config(_))
        ));
    }

    #[test]
    fn test_seeded_generation() {
        let config = SeekerConfig::new().with_dimensions(8, 9).with_seed(1234);
        assert_eq!(config.generate().unwrap(), config.generate().unwrap());
        assert_eq!(config.search().unwrap().max_paths_per_round(), 16);
    }
}
