use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dims::Pos;

/// Ground type of a cell. Affects path cost, never reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grass,
    Mud,
    Water,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::Grass, Terrain::Mud, Terrain::Water];

    /// Cost of stepping onto a cell of this terrain.
    ///
    /// The minimum is 1, which keeps the Manhattan heuristic admissible.
    pub fn cost(self) -> u32 {
        match self {
            Terrain::Grass => 1,
            Terrain::Mud => 5,
            Terrain::Water => 10,
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terrain::Grass => write!(f, "grass"),
            Terrain::Mud => write!(f, "mud"),
            Terrain::Water => write!(f, "water"),
        }
    }
}

/// Side of a cell. The discriminant is the index into [`Cell`] walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// Fixed enumeration order used by every traversal.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn offset(self) -> Pos {
        match self {
            Direction::Up => Pos(-1, 0),
            Direction::Right => Pos(0, 1),
            Direction::Down => Pos(1, 0),
            Direction::Left => Pos(0, -1),
        }
    }

    /// The same edge seen from the neighbor, `(d + 2) mod 4`.
    pub fn reverse(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Direction of the step `from -> to`, if they are orthogonally adjacent.
    pub fn between(from: Pos, to: Pos) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| from + dir.offset() == to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    terrain: Terrain,
}

impl Cell {
    /// Fully walled grass cell.
    pub fn new() -> Cell {
        Cell {
            walls: [true; 4],
            terrain: Terrain::Grass,
        }
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        !self.has_wall(dir)
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn cost(&self) -> u32 {
        self.terrain.cost()
    }

    // Only the board may touch walls, so both sides of an edge stay in sync.
    pub(crate) fn remove_wall(&mut self, dir: Direction) {
        self.walls[dir.index()] = false;
    }

    pub(crate) fn put_wall(&mut self, dir: Direction) {
        self.walls[dir.index()] = true;
    }

    pub(crate) fn set_terrain(&mut self, terrain: Terrain) {
        self.terrain = terrain;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
