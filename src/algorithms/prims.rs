use rand::Rng as _;

use super::{Random, TreeGenerator};
use crate::{
    array::Array2D,
    dims::Pos,
    gameboard::{Direction, Maze},
};

/// Candidate edge from a cell inside the maze towards a cell that wasn't, when pushed.
#[derive(Debug, Clone, Copy)]
struct Wall {
    from: Pos,
    to: Pos,
    dir: Direction,
}

/// Randomized Prim's algorithm, grown from the start cell.
#[derive(Debug)]
pub struct RndPrims;

impl RndPrims {
    fn push_walls(maze: &Maze, visited: &Array2D<bool>, cell: Pos, frontier: &mut Vec<Wall>) {
        for (next, dir) in maze.grid_neighbors(cell) {
            if !visited[next] {
                frontier.push(Wall {
                    from: cell,
                    to: next,
                    dir,
                });
            }
        }
    }
}

impl TreeGenerator for RndPrims {
    fn generate(&self, rows: usize, cols: usize, rng: &mut Random) -> Maze {
        let mut maze = Maze::new_closed(rows, cols);
        if maze.get_cells().is_empty() {
            return maze;
        }

        let mut visited = Array2D::new(false, rows, cols);
        let mut frontier = Vec::new();

        let start = maze.start();
        visited[start] = true;
        Self::push_walls(&maze, &visited, start, &mut frontier);

        let mut peak = frontier.len();
        while !frontier.is_empty() {
            let Wall { from, to, dir } = frontier.swap_remove(rng.gen_range(0..frontier.len()));

            // stale entries: both ends got into the maze meanwhile
            if visited[from] == visited[to] {
                continue;
            }

            maze.remove_wall(from, dir);
            let fresh = if visited[from] { to } else { from };
            visited[fresh] = true;
            Self::push_walls(&maze, &visited, fresh, &mut frontier);

            peak = peak.max(frontier.len());
        }

        log::trace!("prim's frontier peaked at {} walls", peak);

        maze
    }
}
