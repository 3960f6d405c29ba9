pub mod braid;
pub mod prims;
pub mod terrain;

use std::{fmt, sync::Arc};

use rand::{thread_rng, Rng as _, SeedableRng as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gameboard::Maze;
pub use prims::RndPrims;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("invalid maze size {rows}x{cols}")]
    InvalidSize { rows: usize, cols: usize },
    #[error("invalid terrain weights {0:?}")]
    InvalidWeights(TerrainWeights),
    #[error("braid divisor must be non-zero")]
    InvalidBraidDivisor,
}

/// Relative likelihood of each terrain. They don't need to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainWeights {
    pub grass: f64,
    pub mud: f64,
    pub water: f64,
}

impl TerrainWeights {
    pub fn is_valid(&self) -> bool {
        let all = [self.grass, self.mud, self.water];
        all.iter().all(|w| w.is_finite() && *w >= 0.0) && all.iter().sum::<f64>() > 0.0
    }

    pub fn total(&self) -> f64 {
        self.grass + self.mud + self.water
    }
}

impl Default for TerrainWeights {
    fn default() -> Self {
        Self {
            grass: 0.5,
            mud: 0.3,
            water: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub terrain: TerrainWeights,
    /// One extra passage per this many cells.
    pub braid_divisor: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            terrain: TerrainWeights::default(),
            braid_divisor: 10,
        }
    }
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if !self.terrain.is_valid() {
            return Err(GeneratorError::InvalidWeights(self.terrain));
        }
        if self.braid_divisor == 0 {
            return Err(GeneratorError::InvalidBraidDivisor);
        }
        Ok(())
    }
}

/// Builds the spanning tree of a maze. Terrain and braiding are applied afterwards.
pub trait TreeGenerator: fmt::Debug + Sync + Send {
    fn generate(&self, rows: usize, cols: usize, rng: &mut Random) -> Maze;
}

/// Full generation pipeline: spanning tree, braiding, terrain.
#[derive(Debug, Clone)]
pub struct Generator {
    tree: Arc<dyn TreeGenerator>,
    params: GeneratorParams,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Box::new(RndPrims), GeneratorParams::default())
    }
}

impl Generator {
    pub fn new(tree: Box<dyn TreeGenerator>, params: GeneratorParams) -> Self {
        Self {
            tree: tree.into(),
            params,
        }
    }

    pub fn with_params(params: GeneratorParams) -> Self {
        Self::new(Box::new(RndPrims), params)
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    pub fn generate(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut Random,
    ) -> Result<Maze, GeneratorError> {
        validate_size(rows, cols)?;
        self.params.validate()?;

        let mut maze = self.tree.generate(rows, cols, rng);
        let tree_passages = maze.passage_count();

        let braided = braid::braid(&mut maze, self.params.braid_divisor, rng);
        terrain::assign_terrain(&mut maze, &self.params.terrain, rng);

        log::debug!(
            "generated {}x{} maze: {} tree passages, {} braided",
            rows,
            cols,
            tree_passages,
            braided
        );

        Ok(maze)
    }

    /// Generates from `seed`, or from a fresh random seed when none is given.
    pub fn generate_seeded(
        &self,
        rows: usize,
        cols: usize,
        seed: Option<u64>,
    ) -> Result<Maze, GeneratorError> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        log::debug!("maze seed: {}", seed);

        let mut rng = Random::seed_from_u64(seed);
        self.generate(rows, cols, &mut rng)
    }
}

/// Generates a maze with default parameters.
pub fn new_maze(rows: usize, cols: usize, seed: Option<u64>) -> Result<Maze, GeneratorError> {
    Generator::default().generate_seeded(rows, cols, seed)
}

fn validate_size(rows: usize, cols: usize) -> Result<(), GeneratorError> {
    let fits = i32::try_from(rows)
        .ok()
        .zip(i32::try_from(cols).ok())
        .and_then(|(r, c)| r.checked_mul(c))
        .is_some();

    if rows == 0 || cols == 0 || !fits {
        return Err(GeneratorError::InvalidSize { rows, cols });
    }
    Ok(())
}
