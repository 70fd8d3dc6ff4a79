pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod prelude;
pub mod utils;

pub mod consts {
    use crate::prelude::*;

    pub const NUM_SIDES: usize = Side::SIDES.len();
    pub const NUM_PIECES: usize = Piece::PIECES.len();
    pub const NUM_PLANES: usize = NUM_SIDES + NUM_PIECES;
    pub const NUM_SQUARES: usize = 64;
    pub const NUM_FILES: usize = 8;
    pub const NUM_RANKS: usize = 8;

    pub const FILE_MASKS: [u64; NUM_FILES] = [
        0x0101010101010101, // A
        0x0202020202020202, // B
        0x0404040404040404, // C
        0x0808080808080808, // D
        0x1010101010101010, // E
        0x2020202020202020, // F
        0x4040404040404040, // G
        0x8080808080808080, // H
    ];

    pub const RANK_MASKS: [u64; NUM_RANKS] = [
        0x00000000000000FF, // Rank 1
        0x000000000000FF00, // Rank 2
        0x0000000000FF0000, // Rank 3
        0x00000000FF000000, // Rank 4
        0x000000FF00000000, // Rank 5
        0x0000FF0000000000, // Rank 6
        0x00FF000000000000, // Rank 7
        0xFF00000000000000, // Rank 8
    ];

    pub const FILE_A: u64 = FILE_MASKS[0];
    pub const FILE_B: u64 = FILE_MASKS[1];
    pub const FILE_G: u64 = FILE_MASKS[6];
    pub const FILE_H: u64 = FILE_MASKS[7];
    pub const RANK_1: u64 = RANK_MASKS[0];
    pub const RANK_8: u64 = RANK_MASKS[7];

    pub const DIAGONAL_A1H8: u64 = 0x8040201008040201;
    pub const DIAGONAL_H1A8: u64 = 0x0102040810204080;

    /// Index offsets of the eight knight jumps.
    pub const KNIGHT_DELTAS: [i8; 8] = [15, 17, 10, -6, -15, -17, -10, 6];
}

pub use crate::board::{
    Board,
    components::{BitBoard, BitBoardIterator, Piece, Plane, Side, Square},
    layout::Layout,
};
pub use crate::consts::*;
pub use crate::error::BoardError;
pub use crate::game::GameHistory;
pub use crate::moves::{Direction, move_gen, rays};
pub use crate::utils::{config::Config, log::*, prng::*};
