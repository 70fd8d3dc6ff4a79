use std::{fmt::Display, str::FromStr};

use crate::error::BoardError;

pub mod move_gen;
pub mod rays;


/// The eight compass directions, in compass order.
///
/// ```text
///   nw    n   ne
///   +7   +8   +9
///      \  |  /
/// w -1 -- 0 -- +1 e
///      /  |  \
///   -9   -8   -7
///   sw    s   se
/// ```
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(u8)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];
    pub const ORTHO: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    pub const DIAG: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    const SHIFTS: [i8; 8] = [8, 9, 1, -7, -8, -9, -1, 7];
    const NAMES: [&'static str; 8] = ["n", "ne", "e", "se", "s", "sw", "w", "nw"];

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Index offset of one step in this direction.
    #[inline(always)]
    pub const fn shift(&self) -> i8 {
        Self::SHIFTS[self.index()]
    }

    pub const fn name(&self) -> &'static str {
        Self::NAMES[self.index()]
    }

    pub const fn opposite(&self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    pub fn from_shift(shift: i8) -> Result<Self, BoardError> {
        Self::SHIFTS
            .iter()
            .position(|&s| s == shift)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| BoardError::direction(shift))
    }
}

impl TryFrom<i8> for Direction {
    type Error = BoardError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::from_shift(value)
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    /// Accepts compass abbreviations (`ne`) and full names (`northeast`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase().replace(['-', '_'], "");
        let dir = match lower.as_str() {
            "n" | "north" => Direction::North,
            "ne" | "northeast" => Direction::NorthEast,
            "e" | "east" => Direction::East,
            "se" | "southeast" => Direction::SouthEast,
            "s" | "south" => Direction::South,
            "sw" | "southwest" => Direction::SouthWest,
            "w" | "west" => Direction::West,
            "nw" | "northwest" => Direction::NorthWest,
            _ => return Err(BoardError::direction(s)),
        };
        Ok(dir)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
