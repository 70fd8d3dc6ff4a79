use std::{fmt::Display, str::FromStr};

use crate::{consts::NUM_PLANES, error::BoardError};

/// Named starting positions a [`Board`](super::Board) can be built from.
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Layout {
    /// All planes zero
    #[default]
    Empty,
    /// Standard chess start position
    Classic,
    /// A letter "R" drawn in white pawns
    R,
    /// Both pawn ranks, nothing else
    Pawns,
    /// A random scatter of white pawns, different on every call
    RandomPawns,
    /// White king on e3 facing four black queens
    Slide,
}

impl Layout {
    pub const ALL: [Layout; 6] = [
        Layout::Empty,
        Layout::Classic,
        Layout::R,
        Layout::Pawns,
        Layout::RandomPawns,
        Layout::Slide,
    ];

    pub const fn keyword(&self) -> &'static str {
        match self {
            Layout::Empty => "empty",
            Layout::Classic => "classic",
            Layout::R => "r",
            Layout::Pawns => "pawns",
            Layout::RandomPawns => "randompawns",
            Layout::Slide => "slide",
        }
    }

    /// Plane values in [`Plane`](super::components::Plane) order.
    /// `None` for layouts that are not fixed data.
    pub const fn planes(&self) -> Option<[u64; NUM_PLANES]> {
        const R_SHAPE: u64 = 0x7844444870504844;
        const WHITE_PAWN_RANK: u64 = 0x000000000000ff00;
        const BLACK_PAWN_RANK: u64 = 0x00ff000000000000;
        const SLIDE_KING: u64 = 0x0000000000100000;
        const SLIDE_QUEENS: u64 = 0x1010000040001000;

        match self {
            Layout::Empty => Some([0; NUM_PLANES]),
            Layout::Classic => Some([
                0x000000000000ffff,
                0xffff000000000000,
                0x00ff00000000ff00,
                0x4200000000000042,
                0x2400000000000024,
                0x8100000000000081,
                0x0800000000000008,
                0x1000000000000010,
            ]),
            Layout::R => Some([R_SHAPE, 0, R_SHAPE, 0, 0, 0, 0, 0]),
            Layout::Pawns => Some([
                WHITE_PAWN_RANK,
                BLACK_PAWN_RANK,
                WHITE_PAWN_RANK | BLACK_PAWN_RANK,
                0,
                0,
                0,
                0,
                0,
            ]),
            Layout::RandomPawns => None,
            Layout::Slide => Some([
                SLIDE_KING,
                SLIDE_QUEENS,
                0,
                0,
                0,
                0,
                SLIDE_QUEENS,
                SLIDE_KING,
            ]),
        }
    }
}

impl FromStr for Layout {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Layout::Empty);
        }
        Layout::ALL
            .into_iter()
            .find(|layout| layout.keyword() == s)
            .ok_or_else(|| BoardError::UnknownLayout { name: s.into() })
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
