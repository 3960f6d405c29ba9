//! Weighted maze generation and pathfinding comparison.
//!
//! [`algorithms`] builds a connected maze with randomized Prim's algorithm, adds a few loops and
//! scatters grass, mud and water over it. [`solver`] finds routes from any cell to the
//! bottom-right goal with BFS, DFS, Dijkstra or A* and compares them.

pub mod algorithms;
pub mod array;
pub mod dims;
pub mod game;
pub mod gameboard;
pub mod logging;
pub mod settings;
pub mod solver;

pub use algorithms::{new_maze, Generator, GeneratorError, GeneratorParams, Random};
pub use dims::Pos;
pub use game::{GameError, GameSession};
pub use gameboard::{Cell, Direction, Maze, Terrain};
pub use solver::{compare_all, solve, Algorithm, Comparison, PathInfo, SolveError, Solver};
