use miette::Diagnostic;
use thiserror::Error;

use crate::board::components::Square;

/// Everything the board, ray engine and move generators can reject.
///
/// Each variant carries the offending input so callers can report it
/// without consulting the logs. A failed operation never leaves a board
/// half-modified.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BoardError {
    #[error("invalid coordinate: {input}")]
    #[diagnostic(
        code(bitchess::invalid_coordinate),
        help("squares are written as a file a-h followed by a rank 1-8, e.g. `e4`")
    )]
    InvalidCoordinate { input: String },

    #[error("invalid direction: {input}")]
    #[diagnostic(
        code(bitchess::invalid_direction),
        help("valid directions are n, ne, e, se, s, sw, w, nw (shifts 8, 9, 1, -7, -8, -9, -1, 7)")
    )]
    InvalidDirection { input: String },

    #[error("no piece at {square}")]
    #[diagnostic(code(bitchess::no_piece_at_square))]
    NoPieceAtSquare { square: Square },

    #[error("invalid piece spec: color {color}, role {role}")]
    #[diagnostic(
        code(bitchess::invalid_piece_spec),
        help("colors are white/black (planes 0-1), roles are pawn..king (planes 2-7)")
    )]
    InvalidPieceSpec { color: String, role: String },

    #[error("{square} is already occupied")]
    #[diagnostic(
        code(bitchess::square_occupied),
        help("remove the piece on the destination square first")
    )]
    SquareOccupied { square: Square },

    #[error("mask {mask:#018x} does not name exactly one square")]
    #[diagnostic(code(bitchess::invalid_square_mask))]
    InvalidSquareMask { mask: u64 },

    #[error("unknown layout: {name:?}")]
    #[diagnostic(
        code(bitchess::unknown_layout),
        help("known layouts: classic, r, pawns, randompawns, slide, empty")
    )]
    UnknownLayout { name: String },

    #[error("board planes disagree on squares {mask:#018x}")]
    #[diagnostic(code(bitchess::inconsistent_board))]
    InconsistentBoard { mask: u64 },

    #[error("{from}{to} is not a legal move")]
    #[diagnostic(code(bitchess::illegal_move))]
    IllegalMove { from: Square, to: Square },

    #[error("nothing to {action}")]
    #[diagnostic(code(bitchess::history_exhausted))]
    HistoryExhausted { action: &'static str },
}

impl BoardError {
    pub fn coordinate(input: impl ToString) -> Self {
        Self::InvalidCoordinate {
            input: input.to_string(),
        }
    }

    pub fn direction(input: impl ToString) -> Self {
        Self::InvalidDirection {
            input: input.to_string(),
        }
    }

    pub fn piece_spec(color: impl ToString, role: impl ToString) -> Self {
        Self::InvalidPieceSpec {
            color: color.to_string(),
            role: role.to_string(),
        }
    }
}
