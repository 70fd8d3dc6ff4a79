//! Destination sets for the piece on one square.
//!
//! Every generator here is a pure function of a board (plus, for en passant, the
//! previous position's pawn plane) and returns a [`BitBoard`] of reachable squares.
//! Nothing checks whether the mover's king is left in check.

use tracing::{debug, trace, warn};

use crate::{
    board::{
        Board,
        components::{BitBoard, Piece, Side, Square},
    },
    consts::{FILE_A, FILE_B, FILE_G, FILE_H, KNIGHT_DELTAS},
    error::BoardError,
    moves::{
        Direction,
        rays::{span, step},
    },
};

/// Squares a slider on `square` reaches along `direction`: every empty square up to the
/// first piece, plus that piece if it is not a friend.
pub fn sliding_attack(board: &Board, square: Square, direction: Direction) -> BitBoard {
    let ray_span = span(square.mask(), direction);
    let occupied = ray_span & board.occupancy();
    let ray = ray_span ^ span(occupied, direction);
    ray & !board.pieces_of_same_color(square)
}

fn slide_all(board: &Board, square: Square, directions: &[Direction]) -> BitBoard {
    directions
        .iter()
        .fold(BitBoard::EMPTY, |acc, &dir| acc | sliding_attack(board, square, dir))
}

pub fn bishop_moves(board: &Board, square: Square) -> BitBoard {
    slide_all(board, square, &Direction::DIAG)
}

pub fn rook_moves(board: &Board, square: Square) -> BitBoard {
    slide_all(board, square, &Direction::ORTHO)
}

pub fn queen_moves(board: &Board, square: Square) -> BitBoard {
    bishop_moves(board, square) | rook_moves(board, square)
}

pub fn knight_moves(board: &Board, square: Square) -> BitBoard {
    let origin = square.mask();
    let mut jumps = KNIGHT_DELTAS
        .iter()
        .fold(BitBoard::EMPTY, |acc, &delta| acc | origin.shift(delta));

    // Jumps from the two outer files must not land on the far side of the board.
    match square.file() {
        0 | 1 => jumps &= !BitBoard(FILE_G | FILE_H),
        6 | 7 => jumps &= !BitBoard(FILE_A | FILE_B),
        _ => {}
    }
    jumps & !board.pieces_of_same_color(square)
}

/// The eight neighbours, cut down to what the queen on the same square could reach.
/// Friendly pieces drop out with the queen set.
pub fn king_moves(board: &Board, square: Square) -> BitBoard {
    let neighbours = Direction::ALL
        .iter()
        .fold(BitBoard::EMPTY, |acc, &dir| acc | step(square.mask(), dir));
    neighbours & queen_moves(board, square)
}

/// One step forward onto an empty square.
pub fn pawn_pushes(board: &Board, square: Square) -> BitBoard {
    let Some(side) = board.side_at(square) else {
        return BitBoard::EMPTY;
    };
    square.mask().shift(side.forward()) & !board.occupancy()
}

/// Two steps forward from the home rank. Both squares must be empty.
pub fn pawn_double_pushes(board: &Board, square: Square) -> BitBoard {
    let Some(side) = board.side_at(square) else {
        return BitBoard::EMPTY;
    };
    if square.rank() != side.pawn_home_rank() {
        return BitBoard::EMPTY;
    }
    pawn_pushes(board, square).shift(side.forward()) & !board.occupancy()
}

/// Diagonal steps forward onto enemy pieces.
pub fn pawn_captures(board: &Board, square: Square) -> BitBoard {
    let Some(side) = board.side_at(square) else {
        return BitBoard::EMPTY;
    };
    let origin = square.mask();
    let mut targets = match side {
        Side::White => origin.shift(7) | origin.shift(9),
        Side::Black => origin.shift(-7) | origin.shift(-9),
    };
    match square.file() {
        0 => targets &= !BitBoard(FILE_H),
        7 => targets &= !BitBoard(FILE_A),
        _ => {}
    }
    targets & board.side_bb(side.flip())
}

/// The en passant capture square, if an enemy pawn beside `square` has just
/// double-pushed past it.
///
/// `previous_pawns` is the pawn plane of the position one move earlier. The enemy pawn
/// qualifies only if it was not on its square then, the square it skipped is empty, and
/// the square it started from held a pawn then and holds none now.
pub fn pawn_en_passant(board: &Board, square: Square, previous_pawns: BitBoard) -> BitBoard {
    let Some(side) = board.side_at(square) else {
        return BitBoard::EMPTY;
    };
    // Only a pawn that has advanced three ranks can meet a double-pushed pawn beside it.
    let capture_rank = match side {
        Side::White => 4,
        Side::Black => 3,
    };
    if square.rank() != capture_rank {
        return BitBoard::EMPTY;
    }

    let origin = square.mask();
    let forward = side.forward();
    let empty = !board.occupancy();
    let pawns = board.piece_bb(Piece::Pawn);
    let enemy_pawns = board.pieces(side.flip(), Piece::Pawn);

    let mut beside = BitBoard::EMPTY;
    if square.file() > 0 {
        beside |= origin.shift(-1);
    }
    if square.file() < 7 {
        beside |= origin.shift(1);
    }

    let arrived = beside & enemy_pawns & !previous_pawns;
    let skipped = arrived.shift(forward) & empty;
    let started = skipped.shift(forward) & previous_pawns & !pawns;
    let target = started.shift(-forward) & skipped;
    if target.any() {
        trace!("en passant from {square} onto {target}");
    }
    target
}

/// Every pawn destination: pushes, double pushes, captures and en passant.
pub fn pawn_moves(board: &Board, square: Square, previous_pawns: BitBoard) -> BitBoard {
    pawn_pushes(board, square)
        | pawn_double_pushes(board, square)
        | pawn_captures(board, square)
        | pawn_en_passant(board, square, previous_pawns)
}

/// Looks up the piece on `square` and returns its destinations.
///
/// Fails with [`BoardError::NoPieceAtSquare`] when no role plane holds the square, and
/// with [`BoardError::InconsistentBoard`] when a role plane does but no color plane does.
pub fn generate_moves(
    board: &Board,
    square: Square,
    previous_pawns: BitBoard,
) -> Result<BitBoard, BoardError> {
    let Some(piece) = board.piece_at(square) else {
        warn!("asked for moves from empty square {square}");
        return Err(BoardError::NoPieceAtSquare { square });
    };
    if board.side_at(square).is_none() {
        return Err(BoardError::InconsistentBoard {
            mask: square.mask().0,
        });
    }

    let moves = match piece {
        Piece::Pawn => pawn_moves(board, square, previous_pawns),
        Piece::Knight => knight_moves(board, square),
        Piece::Bishop => bishop_moves(board, square),
        Piece::Rook => rook_moves(board, square),
        Piece::Queen => queen_moves(board, square),
        Piece::King => king_moves(board, square),
    };
    debug!("{piece} on {square}: {} destinations", moves.pop_count());
    Ok(moves)
}

/// [`generate_moves`] for a caller holding a single-square mask.
pub fn generate_moves_from_mask(
    board: &Board,
    mask: BitBoard,
    previous_pawns: BitBoard,
) -> Result<BitBoard, BoardError> {
    generate_moves(board, Square::from_mask(mask)?, previous_pawns)
}

/// Destinations of every piece of `side`, in square order. Pieces with no moves are kept.
pub fn moves_for_side(
    board: &Board,
    side: Side,
    previous_pawns: BitBoard,
) -> Result<Vec<(Square, BitBoard)>, BoardError> {
    board
        .side_bb(side)
        .squares()
        .map(|square| Ok((square, generate_moves(board, square, previous_pawns)?)))
        .collect()
}
