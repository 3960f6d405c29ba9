use std::collections::VecDeque;

use super::Trace;
use crate::{array::Array2D, dims::Pos, gameboard::Maze};

/// Container deciding the order in which discovered cells get expanded.
trait Frontier: Default {
    fn put(&mut self, pos: Pos);
    fn take(&mut self) -> Option<Pos>;
}

#[derive(Default)]
struct Queue(VecDeque<Pos>);

impl Frontier for Queue {
    fn put(&mut self, pos: Pos) {
        self.0.push_back(pos);
    }

    fn take(&mut self) -> Option<Pos> {
        self.0.pop_front()
    }
}

#[derive(Default)]
struct Stack(Vec<Pos>);

impl Frontier for Stack {
    fn put(&mut self, pos: Pos) {
        self.0.push(pos);
    }

    fn take(&mut self) -> Option<Pos> {
        self.0.pop()
    }
}

/// Cells are marked visited when discovered, and the search stops once the goal is taken out.
fn search<F: Frontier>(maze: &Maze, start: Pos, goal: Pos) -> Trace {
    let mut trace = Trace::new(maze);
    let mut visited = Array2D::new(false, maze.rows(), maze.cols());
    let mut frontier = F::default();

    visited[start] = true;
    frontier.put(start);

    while let Some(current) = frontier.take() {
        trace.explored += 1;
        if current == goal {
            trace.reached = true;
            break;
        }

        for next in maze.open_neighbors(current) {
            if !visited[next] {
                visited[next] = true;
                trace.parents[next] = Some(current);
                frontier.put(next);
            }
        }
    }

    trace
}

/// Fewest cells, terrain ignored.
pub(super) fn bfs(maze: &Maze, start: Pos, goal: Pos) -> Trace {
    search::<Queue>(maze, start, goal)
}

/// Deepest first. Sensitive to the up, right, down, left neighbor order.
pub(super) fn dfs(maze: &Maze, start: Pos, goal: Pos) -> Trace {
    search::<Stack>(maze, start, goal)
}
