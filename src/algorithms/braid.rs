use rand::Rng as _;

use super::Random;
use crate::{
    dims::Pos,
    gameboard::{Direction, Maze},
};

/// Opens `rows * cols / divisor` random edges at interior cells to add loops.
///
/// Returns how many of those edges were actually closed before. Grids with fewer than three
/// rows or columns have no interior and are left untouched.
pub fn braid(maze: &mut Maze, divisor: usize, rng: &mut Random) -> usize {
    let (rows, cols) = (maze.rows(), maze.cols());
    if rows < 3 || cols < 3 || divisor == 0 {
        log::trace!("no interior to braid in {}x{} maze", rows, cols);
        return 0;
    }

    let attempts = rows * cols / divisor;
    let mut opened = 0;

    for _ in 0..attempts {
        let row = rng.gen_range(1..=rows - 2);
        let col = rng.gen_range(1..=cols - 2);
        let Some(dir) = Direction::from_index(rng.gen_range(0..4)) else {
            continue;
        };

        let pos = Pos(row as i32, col as i32);
        let was_open = maze.can_move(pos, dir);
        if maze.remove_wall(pos, dir) && !was_open {
            opened += 1;
        }
    }

    opened
}
