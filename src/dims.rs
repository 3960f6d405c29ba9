use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Grid coordinate, `Pos(row, col)`, 0-indexed from the top-left cell.
///
/// Signed so that direction offsets can step outside the grid and be rejected by a bounds
/// check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos(pub i32, pub i32);

impl Pos {
    pub const ZERO: Pos = Pos(0, 0);

    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    /// Iterates every position in `from..to`, row by row.
    pub fn iter_fill(from: Pos, to: Pos) -> impl Iterator<Item = Pos> {
        (from.0..to.0).flat_map(move |row| (from.1..to.1).map(move |col| Pos(row, col)))
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn product(self) -> i32 {
        self.0 * self.1
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// `|Δrow| + |Δcol|`
    pub fn manhattan(self, other: Pos) -> i32 {
        (self - other).abs_sum()
    }

    /// Row-major index into a buffer of `size`, `None` when outside of it.
    pub fn linear_index(self, size: Pos) -> Option<usize> {
        if !self.all_non_negative() || self.0 >= size.0 || self.1 >= size.1 {
            return None;
        }

        Some((self.0 * size.1 + self.1) as usize)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, other: Pos) -> Pos {
        Pos(self.0 - other.0, self.1 - other.1)
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, other: Pos) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl SubAssign for Pos {
    fn sub_assign(&mut self, other: Pos) {
        self.0 -= other.0;
        self.1 -= other.1;
    }
}

impl From<(i32, i32)> for Pos {
    fn from(tuple: (i32, i32)) -> Self {
        Pos(tuple.0, tuple.1)
    }
}

impl From<Pos> for (i32, i32) {
    fn from(val: Pos) -> Self {
        (val.0, val.1)
    }
}
