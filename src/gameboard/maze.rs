use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Pos,
    gameboard::cell::{Cell, Direction, Terrain},
};

/// The grid: `rows × cols` cells with symmetric walls.
///
/// Start is always the top-left cell and goal the bottom-right one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) cells: Array2D<Cell>,
}

impl Maze {
    /// Fully walled maze, every cell grass.
    pub fn new_closed(rows: usize, cols: usize) -> Self {
        Maze {
            cells: Array2D::new(Cell::new(), rows, cols),
        }
    }

    pub fn size(&self) -> Pos {
        self.cells.size()
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn start(&self) -> Pos {
        Pos::ZERO
    }

    pub fn goal(&self) -> Pos {
        self.size() - Pos(1, 1)
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        self.cells.pos_to_idx(pos).is_some()
    }

    pub fn get_cell(&self, pos: Pos) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn get_cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    /// Neighbor position in `dir`, if it is inside the grid. Walls are not considered.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let next = pos + dir.offset();
        self.is_in_bounds(next).then_some(next)
    }

    /// A step is legal iff the cell has no wall on that side and the target is in bounds.
    pub fn can_move(&self, pos: Pos, dir: Direction) -> bool {
        self.get_cell(pos).is_some_and(|cell| cell.is_open(dir))
            && self.neighbor(pos, dir).is_some()
    }

    /// Reachable neighbors in the fixed up, right, down, left order.
    pub fn open_neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_move(pos, dir))
            .map(|dir| pos + dir.offset())
            .collect()
    }

    /// Orthogonal neighbors inside the grid, walls ignored.
    pub fn grid_neighbors(&self, pos: Pos) -> SmallVec<[(Pos, Direction); 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(pos, dir).map(|next| (next, dir)))
            .collect()
    }

    /// Opens the edge between `pos` and its neighbor in `dir` on both sides.
    ///
    /// Returns `false` and changes nothing when the neighbor is outside the grid.
    pub fn remove_wall(&mut self, pos: Pos, dir: Direction) -> bool {
        let Some(next) = self.neighbor(pos, dir) else {
            return false;
        };
        if !self.is_in_bounds(pos) {
            return false;
        }

        self.cells[pos].remove_wall(dir);
        self.cells[next].remove_wall(dir.reverse());
        true
    }

    /// Closes the edge between `pos` and its neighbor in `dir` on both sides.
    pub fn add_wall(&mut self, pos: Pos, dir: Direction) -> bool {
        if !self.is_in_bounds(pos) {
            return false;
        }

        self.cells[pos].put_wall(dir);
        if let Some(next) = self.neighbor(pos, dir) {
            self.cells[next].put_wall(dir.reverse());
        }
        true
    }

    /// Walls `pos` in on all four sides.
    pub fn isolate(&mut self, pos: Pos) {
        for dir in Direction::ALL {
            self.add_wall(pos, dir);
        }
    }

    pub fn set_terrain(&mut self, pos: Pos, terrain: Terrain) -> bool {
        match self.cells.get_mut(pos) {
            Some(cell) => {
                cell.set_terrain(terrain);
                true
            }
            None => false,
        }
    }

    /// Checks that every open edge is open from both sides and nothing opens past the border.
    pub fn walls_consistent(&self) -> bool {
        self.cells.iter_pos().all(|pos| {
            let cell = &self.cells[pos];
            Direction::ALL.into_iter().all(|dir| match self.neighbor(pos, dir) {
                Some(next) => cell.is_open(dir) == self.cells[next].is_open(dir.reverse()),
                None => cell.has_wall(dir),
            })
        })
    }

    /// Number of open edges, each counted once.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter_pos()
            .map(|pos| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&dir| self.can_move(pos, dir))
                    .count()
            })
            .sum()
    }
}
