use std::{cmp::Reverse, collections::BinaryHeap};

use super::Trace;
use crate::{array::Array2D, dims::Pos, gameboard::Maze};

/// Heap entry: priority first, then push order so equal priorities pop FIFO.
type Entry = Reverse<(u64, u64, Pos)>;

/// Uniform-cost search ordered by `g + heuristic`.
///
/// `g` sums the terrain cost of every cell entered after the start. Stale heap entries are
/// skipped on pop through the `finalized` table instead of being removed.
fn best_first(maze: &Maze, start: Pos, goal: Pos, heuristic: impl Fn(Pos) -> u64) -> Trace {
    let mut trace = Trace::new(maze);
    let mut dist = Array2D::new(u64::MAX, maze.rows(), maze.cols());
    let mut finalized = Array2D::new(false, maze.rows(), maze.cols());
    let mut heap = BinaryHeap::<Entry>::new();
    let mut seq = 0u64;

    dist[start] = 0;
    heap.push(Reverse((heuristic(start), seq, start)));

    while let Some(Reverse((_, _, current))) = heap.pop() {
        if finalized[current] {
            continue;
        }
        finalized[current] = true;
        trace.explored += 1;

        if current == goal {
            trace.reached = true;
            break;
        }

        let base = dist[current];
        for next in maze.open_neighbors(current) {
            let Some(cell) = maze.get_cell(next) else {
                continue;
            };

            let tentative = base + u64::from(cell.cost());
            if tentative < dist[next] {
                dist[next] = tentative;
                trace.parents[next] = Some(current);
                seq += 1;
                heap.push(Reverse((tentative + heuristic(next), seq, next)));
            }
        }
    }

    trace
}

pub(super) fn dijkstra(maze: &Maze, start: Pos, goal: Pos) -> Trace {
    best_first(maze, start, goal, |_| 0)
}

/// Manhattan distance never overestimates, since every step costs at least 1.
pub(super) fn astar(maze: &Maze, start: Pos, goal: Pos) -> Trace {
    best_first(maze, start, goal, |pos| u64::from(pos.manhattan(goal).unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameboard::{Direction, Terrain};

    /// 2x3, all open, with a water cell in the top middle:
    ///
    /// ```text
    /// G W G
    /// G G G
    /// ```
    fn puddle() -> Maze {
        let mut maze = Maze::new_closed(2, 3);
        for pos in Pos::iter_fill(Pos::ZERO, Pos(2, 3)) {
            maze.remove_wall(pos, Direction::Right);
            maze.remove_wall(pos, Direction::Down);
        }
        maze.set_terrain(Pos(0, 1), Terrain::Water);
        maze
    }

    #[test]
    fn dijkstra_walks_around_water() {
        let maze = puddle();
        let (path, _) = dijkstra(&maze, Pos(0, 0), Pos(0, 2)).into_path(Pos(0, 0), Pos(0, 2));
        assert_eq!(path, vec![Pos(0, 0), Pos(1, 0), Pos(1, 1), Pos(1, 2), Pos(0, 2)]);
    }

    #[test]
    fn astar_matches_dijkstra_on_puddle() {
        let maze = puddle();
        let (a, _) = astar(&maze, Pos(0, 0), Pos(0, 2)).into_path(Pos(0, 0), Pos(0, 2));
        assert_eq!(a, vec![Pos(0, 0), Pos(1, 0), Pos(1, 1), Pos(1, 2), Pos(0, 2)]);
    }

    #[test]
    fn stale_entries_are_not_counted() {
        let maze = puddle();
        let trace = dijkstra(&maze, Pos(0, 0), Pos(1, 2));
        assert!(trace.reached);
        assert!(trace.explored <= 6);
    }
}
