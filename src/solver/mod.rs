//! Pathfinding over a generated [`Maze`].
//!
//! Every search runs from a start position to the maze goal (bottom-right cell) and keeps all of
//! its bookkeeping (visited flags, parents, distances) local to the call, so a maze can be solved
//! from several threads at once through shared references.

pub mod compare;
mod uninformed;
mod weighted;

use std::{fmt, str::FromStr};

use rayon::iter::{IntoParallelIterator as _, ParallelIterator as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{array::Array2D, dims::Pos, gameboard::Maze};
pub use compare::{Best, Comparison};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    /// Fixed comparison order, also used to break ties.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
        }
    }

    /// Whether the algorithm guarantees a minimum-cost path.
    pub fn is_cost_optimal(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown algorithm '{0}', expected one of bfs, dfs, dijkstra, astar")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" | "ucs" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("start coordinate {0} is outside of the maze")]
    InvalidCoordinate(Pos),
}

/// Result of a single solve.
///
/// An unreachable goal gives an empty path with zero cost and length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathInfo {
    /// Start to goal, inclusive.
    pub path: Vec<Pos>,
    /// Sum of terrain costs of every cell in `path`, start and goal included.
    pub total_cost: u64,
    pub length: usize,
    /// How many cells the search expanded before it stopped.
    pub explored: usize,
}

impl PathInfo {
    pub fn new(maze: &Maze, path: Vec<Pos>, explored: usize) -> Self {
        let total_cost = path
            .iter()
            .filter_map(|&pos| maze.get_cell(pos))
            .map(|cell| u64::from(cell.cost()))
            .sum();

        Self {
            length: path.len(),
            path,
            total_cost,
            explored,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Checks that consecutive cells are adjacent with no wall between them.
    pub fn is_valid_in(&self, maze: &Maze) -> bool {
        self.path
            .windows(2)
            .all(|pair| maze.open_neighbors(pair[0]).contains(&pair[1]))
    }
}

/// Parent pointers left behind by a search.
pub(crate) struct Trace {
    parents: Array2D<Option<Pos>>,
    reached: bool,
    explored: usize,
}

impl Trace {
    fn new(maze: &Maze) -> Self {
        Self {
            parents: Array2D::new(None, maze.rows(), maze.cols()),
            reached: false,
            explored: 0,
        }
    }

    /// Walks parents back from `goal` and reverses, so the path reads start to goal.
    fn into_path(self, start: Pos, goal: Pos) -> (Vec<Pos>, usize) {
        if !self.reached {
            return (Vec::new(), self.explored);
        }

        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            match self.parents.get(current).copied().flatten() {
                Some(parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        path.reverse();

        (path, self.explored)
    }
}

/// Solves paths on one maze. Holds only a shared reference.
#[derive(Debug, Clone, Copy)]
pub struct Solver<'a> {
    maze: &'a Maze,
}

impl<'a> Solver<'a> {
    pub fn new(maze: &'a Maze) -> Self {
        Self { maze }
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    pub fn goal(&self) -> Pos {
        self.maze.goal()
    }

    fn check_start(&self, start: Pos) -> Result<(), SolveError> {
        if self.maze.is_in_bounds(start) {
            Ok(())
        } else {
            Err(SolveError::InvalidCoordinate(start))
        }
    }

    /// Finds a path from `start` to the goal with `algorithm`.
    pub fn solve(&self, algorithm: Algorithm, start: Pos) -> Result<PathInfo, SolveError> {
        self.check_start(start)?;
        let goal = self.goal();

        let trace = match algorithm {
            Algorithm::Bfs => uninformed::bfs(self.maze, start, goal),
            Algorithm::Dfs => uninformed::dfs(self.maze, start, goal),
            Algorithm::Dijkstra => weighted::dijkstra(self.maze, start, goal),
            Algorithm::AStar => weighted::astar(self.maze, start, goal),
        };
        let (path, explored) = trace.into_path(start, goal);
        let info = PathInfo::new(self.maze, path, explored);

        log::debug!(
            "{} from {}: length {}, cost {}, explored {}",
            algorithm,
            start,
            info.length,
            info.total_cost,
            info.explored
        );

        Ok(info)
    }

    /// Same as [`Solver::solve`] with separate coordinates.
    pub fn solve_at(
        &self,
        algorithm: Algorithm,
        start_row: i32,
        start_col: i32,
    ) -> Result<PathInfo, SolveError> {
        self.solve(algorithm, Pos(start_row, start_col))
    }

    /// Runs all four algorithms from the same start and ranks them.
    pub fn compare_all(&self, start: Pos) -> Result<Comparison, SolveError> {
        self.check_start(start)?;

        let results = Algorithm::ALL
            .into_par_iter()
            .map(|algorithm| Ok((algorithm, self.solve(algorithm, start)?)))
            .collect::<Result<Vec<_>, SolveError>>()?;

        Ok(Comparison::new(results))
    }
}

/// Solves `maze` from `(start_row, start_col)` to its goal.
pub fn solve(
    maze: &Maze,
    algorithm: Algorithm,
    start_row: i32,
    start_col: i32,
) -> Result<PathInfo, SolveError> {
    Solver::new(maze).solve_at(algorithm, start_row, start_col)
}

/// Runs every algorithm from `(start_row, start_col)`, see [`Solver::compare_all`].
pub fn compare_all(maze: &Maze, start_row: i32, start_col: i32) -> Result<Comparison, SolveError> {
    Solver::new(maze).compare_all(Pos(start_row, start_col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algorithms::new_maze,
        gameboard::{Direction, Terrain},
    };

    /// Hand-built 5x5 board:
    ///
    /// ```text
    ///  S . . . .     terrain:  G G G G G
    ///  .       .               G W W W G
    ///  . . . . .               G M M M G
    ///  .       .               G W W W G
    ///  . . . . G               G G G G G
    /// ```
    ///
    /// Open edges: the whole outer ring, row 2 across, and nothing else.
    fn ring_maze() -> Maze {
        let mut maze = Maze::new_closed(5, 5);
        for i in 0..4 {
            maze.remove_wall(Pos(0, i), Direction::Right);
            maze.remove_wall(Pos(4, i), Direction::Right);
            maze.remove_wall(Pos(i, 0), Direction::Down);
            maze.remove_wall(Pos(i, 4), Direction::Down);
            maze.remove_wall(Pos(2, i), Direction::Right);
        }
        for col in 1..4 {
            maze.set_terrain(Pos(1, col), Terrain::Water);
            maze.set_terrain(Pos(2, col), Terrain::Mud);
            maze.set_terrain(Pos(3, col), Terrain::Water);
        }
        maze
    }

    fn brute_force_min_cost(maze: &Maze, start: Pos) -> Option<u64> {
        // Bellman-Ford style relaxation, independent of the heap code
        let mut best = Array2D::new(u64::MAX, maze.rows(), maze.cols());
        best[start] = u64::from(maze.get_cell(start)?.cost());
        loop {
            let mut changed = false;
            for pos in maze.get_cells().iter_pos() {
                if best[pos] == u64::MAX {
                    continue;
                }
                for next in maze.open_neighbors(pos) {
                    let cost = best[pos] + u64::from(maze.get_cell(next)?.cost());
                    if cost < best[next] {
                        best[next] = cost;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        let goal = best[maze.goal()];
        (goal != u64::MAX).then_some(goal)
    }

    fn edge_distance(maze: &Maze, start: Pos) -> Option<usize> {
        let mut dist = Array2D::new(usize::MAX, maze.rows(), maze.cols());
        dist[start] = 0;
        let mut layer = vec![start];
        let mut depth = 0;
        while !layer.is_empty() {
            depth += 1;
            let mut next_layer = Vec::new();
            for pos in layer {
                for next in maze.open_neighbors(pos) {
                    if dist[next] == usize::MAX {
                        dist[next] = depth;
                        next_layer.push(next);
                    }
                }
            }
            layer = next_layer;
        }
        let goal = dist[maze.goal()];
        (goal != usize::MAX).then_some(goal)
    }

    #[test]
    fn dijkstra_takes_the_cheap_ring() {
        let maze = ring_maze();
        let info = Solver::new(&maze).solve(Algorithm::Dijkstra, Pos(0, 0)).unwrap();

        // both ring halves cost 9; the top-right one is discovered first
        assert_eq!(
            info.path,
            vec![
                Pos(0, 0),
                Pos(0, 1),
                Pos(0, 2),
                Pos(0, 3),
                Pos(0, 4),
                Pos(1, 4),
                Pos(2, 4),
                Pos(3, 4),
                Pos(4, 4),
            ]
        );
        assert_eq!(info.total_cost, 9);
        assert_eq!(info.length, 9);
    }

    #[test]
    fn middle_start_avoids_mud() {
        let maze = ring_maze();
        let solver = Solver::new(&maze);
        let info = solver.solve(Algorithm::Dijkstra, Pos(2, 1)).unwrap();

        // west around the ring is 5 + 7 grass = 12, east across two more mud cells is 18
        assert_eq!(info.path.first(), Some(&Pos(2, 1)));
        assert_eq!(info.path.get(1), Some(&Pos(2, 0)));
        assert_eq!(info.length, 8);
        assert_eq!(info.total_cost, 12);
        assert_eq!(solver.solve(Algorithm::AStar, Pos(2, 1)).unwrap().total_cost, 12);

        // BFS ignores terrain and goes straight across
        let bfs = solver.solve(Algorithm::Bfs, Pos(2, 1)).unwrap();
        assert_eq!(bfs.length, 6);
        assert_eq!(bfs.total_cost, 5 + 5 + 5 + 1 + 1 + 1);
    }

    #[test]
    fn start_on_goal_is_single_cell() {
        let mut maze = new_maze(6, 6, Some(8)).unwrap();
        maze.set_terrain(maze.goal(), Terrain::Mud);
        let solver = Solver::new(&maze);

        for algorithm in Algorithm::ALL {
            let info = solver.solve(algorithm, maze.goal()).unwrap();
            assert_eq!(info.path, vec![maze.goal()]);
            assert_eq!(info.length, 1);
            assert_eq!(info.total_cost, 5);
        }
    }

    #[test]
    fn isolated_goal_gives_empty_paths() {
        let mut maze = new_maze(8, 8, Some(21)).unwrap();
        let goal = maze.goal();
        maze.isolate(goal);
        let solver = Solver::new(&maze);

        for algorithm in Algorithm::ALL {
            let info = solver.solve(algorithm, Pos(0, 0)).unwrap();
            assert!(!info.is_found(), "{algorithm}");
            assert_eq!(info.total_cost, 0);
            assert_eq!(info.length, 0);
        }
    }

    #[test]
    fn out_of_bounds_start_is_rejected() {
        let maze = new_maze(4, 4, Some(0)).unwrap();
        let solver = Solver::new(&maze);
        for start in [Pos(-1, 0), Pos(0, 4), Pos(4, 0), Pos(10, -3)] {
            assert_eq!(
                solver.solve(Algorithm::Bfs, start),
                Err(SolveError::InvalidCoordinate(start))
            );
            assert!(solver.compare_all(start).is_err());
        }
    }

    #[test]
    fn paths_are_valid() {
        for seed in 0..15 {
            let maze = new_maze(14, 11, Some(seed)).unwrap();
            let solver = Solver::new(&maze);
            for algorithm in Algorithm::ALL {
                let info = solver.solve(algorithm, Pos(3, 2)).unwrap();
                assert!(info.is_found());
                assert_eq!(info.path.first(), Some(&Pos(3, 2)));
                assert_eq!(info.path.last(), Some(&maze.goal()));
                assert!(info.is_valid_in(&maze), "{algorithm} seed {seed}");
                assert_eq!(info.length, info.path.len());
            }
        }
    }

    #[test]
    fn cost_optimal_algorithms_agree() {
        for seed in 0..25 {
            let maze = new_maze(12, 12, Some(seed)).unwrap();
            let solver = Solver::new(&maze);
            let dijkstra = solver.solve(Algorithm::Dijkstra, Pos(0, 0)).unwrap();
            let astar = solver.solve(Algorithm::AStar, Pos(0, 0)).unwrap();

            assert_eq!(dijkstra.total_cost, astar.total_cost, "seed {seed}");
            assert_eq!(
                Some(dijkstra.total_cost),
                brute_force_min_cost(&maze, Pos(0, 0)),
                "seed {seed}"
            );
            assert!(astar.explored <= dijkstra.explored, "seed {seed}");
        }
    }

    #[test]
    fn bfs_length_is_graph_distance() {
        for seed in 0..25 {
            let maze = new_maze(10, 13, Some(seed)).unwrap();
            let solver = Solver::new(&maze);
            let bfs = solver.solve(Algorithm::Bfs, Pos(1, 1)).unwrap();
            let edges = edge_distance(&maze, Pos(1, 1)).unwrap();
            assert_eq!(bfs.length, edges + 1, "seed {seed}");

            for algorithm in [Algorithm::Dfs, Algorithm::Dijkstra, Algorithm::AStar] {
                assert!(bfs.length <= solver.solve(algorithm, Pos(1, 1)).unwrap().length);
            }
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let maze = new_maze(16, 16, Some(99)).unwrap();
        let solver = Solver::new(&maze);
        for algorithm in Algorithm::ALL {
            let first = solver.solve(algorithm, Pos(5, 7)).unwrap();
            let second = solver.solve(algorithm, Pos(5, 7)).unwrap();
            assert_eq!(first, second, "{algorithm}");
        }
    }

    #[test]
    fn free_functions_match_solver() {
        let maze = new_maze(7, 9, Some(4)).unwrap();
        assert_eq!(
            solve(&maze, Algorithm::Dfs, 2, 3).unwrap(),
            Solver::new(&maze).solve(Algorithm::Dfs, Pos(2, 3)).unwrap()
        );
        assert_eq!(compare_all(&maze, 0, 0).unwrap().len(), 4);
    }

    #[test]
    fn algorithm_names_parse() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("DIJKSTRA".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert!("greedy".parse::<Algorithm>().is_err());
    }
}
