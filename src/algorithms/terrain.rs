use rand::Rng as _;

use super::{Random, TerrainWeights};
use crate::gameboard::{Maze, Terrain};

/// Picks a terrain from one uniform draw in `[0, 1)`.
pub fn pick_terrain(weights: &TerrainWeights, draw: f64) -> Terrain {
    let total = weights.total();
    if draw < weights.grass / total {
        Terrain::Grass
    } else if draw < (weights.grass + weights.mud) / total {
        Terrain::Mud
    } else {
        Terrain::Water
    }
}

/// Draws terrain for every cell independently, then forces start and goal back to grass.
pub fn assign_terrain(maze: &mut Maze, weights: &TerrainWeights, rng: &mut Random) {
    for cell in maze.cells.iter_mut() {
        cell.set_terrain(pick_terrain(weights, rng.gen::<f64>()));
    }

    let (start, goal) = (maze.start(), maze.goal());
    maze.set_terrain(start, Terrain::Grass);
    maze.set_terrain(goal, Terrain::Grass);
}
