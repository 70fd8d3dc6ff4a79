use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{consts::NUM_PLANES, error::BoardError, utils::prng::Prng};

use components::{BitBoard, Piece, Plane, Side, Square};
use layout::Layout;

pub mod components;
pub mod layout;
pub mod transforms;


/// Eight occupancy planes: two color planes followed by six role planes.
///
/// Every occupied square has exactly one color bit and exactly one role bit,
/// so `white | black` and the union of the role planes are always the same set.
/// The mutation methods below keep it that way; [`Board::validate`] checks it
/// for boards built from raw plane values.
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Board {
    planes: [BitBoard; NUM_PLANES],
}

impl Board {
    /// Builds a board from a named layout. `RandomPawns` is seeded from the clock.
    pub fn new(layout: Layout) -> Self {
        match layout.planes() {
            Some(planes) => Self::from_planes(planes),
            None => Self::random_pawns(&mut Prng::from_clock()),
        }
    }

    /// Builds a board from a layout keyword such as `"classic"` or `"slide"`.
    pub fn from_keyword(keyword: &str) -> Result<Self, BoardError> {
        Layout::from_str(keyword).map(Self::new)
    }

    pub fn classic() -> Self {
        Self::new(Layout::Classic)
    }

    /// A scatter of white pawns. Two draws are intersected to thin the density.
    pub fn random_pawns(prng: &mut Prng) -> Self {
        let pawns = prng.rand() & prng.rand();
        let mut planes = [0; NUM_PLANES];
        planes[Plane::White.index()] = pawns;
        planes[Plane::Pawn.index()] = pawns;
        Self::from_planes(planes)
    }

    /// Raw plane values in [`Plane`] order. Not checked, see [`Board::validate`].
    pub const fn from_planes(planes: [u64; NUM_PLANES]) -> Self {
        let mut bbs = [BitBoard::EMPTY; NUM_PLANES];
        let mut i = 0;
        while i < NUM_PLANES {
            bbs[i] = BitBoard(planes[i]);
            i += 1;
        }
        Self { planes: bbs }
    }

    #[inline(always)]
    pub const fn planes(&self) -> &[BitBoard; NUM_PLANES] {
        &self.planes
    }

    #[inline(always)]
    pub const fn plane(&self, plane: Plane) -> BitBoard {
        self.planes[plane.index()]
    }

    #[inline(always)]
    pub const fn side_bb(&self, side: Side) -> BitBoard {
        self.plane(Plane::side(side))
    }

    #[inline(always)]
    pub const fn piece_bb(&self, piece: Piece) -> BitBoard {
        self.plane(Plane::role(piece))
    }

    /// Pieces of one kind and color.
    #[inline(always)]
    pub const fn pieces(&self, side: Side, piece: Piece) -> BitBoard {
        self.side_bb(side).and(self.piece_bb(piece))
    }

    /// Every occupied square, from the color planes.
    #[inline(always)]
    pub const fn occupancy(&self) -> BitBoard {
        self.planes[0].or(self.planes[1])
    }

    /// Every occupied square, from the role planes.
    pub fn role_occupancy(&self) -> BitBoard {
        Plane::ROLES
            .iter()
            .fold(BitBoard::EMPTY, |acc, &plane| acc | self.plane(plane))
    }

    #[inline(always)]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.occupancy().intersects(square.mask())
    }

    pub fn side_at(&self, square: Square) -> Option<Side> {
        Side::SIDES
            .into_iter()
            .find(|&side| self.side_bb(side).intersects(square.mask()))
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        Piece::PIECES
            .into_iter()
            .find(|&piece| self.piece_bb(piece).intersects(square.mask()))
    }

    pub fn piece_info_at(&self, square: Square) -> Option<(Piece, Side)> {
        self.piece_at(square).zip(self.side_at(square))
    }

    /// The role plane holding `square`.
    pub fn plane_at(&self, square: Square) -> Option<Plane> {
        self.piece_at(square).map(Plane::role)
    }

    /// The color plane holding `square`, empty if nothing is there.
    pub fn pieces_of_same_color(&self, square: Square) -> BitBoard {
        self.side_at(square)
            .map_or(BitBoard::EMPTY, |side| self.side_bb(side))
    }

    /// The other color plane, empty if nothing is on `square`.
    pub fn pieces_of_opposite_color(&self, square: Square) -> BitBoard {
        self.side_at(square)
            .map_or(BitBoard::EMPTY, |side| self.side_bb(side.flip()))
    }

    /// The role plane holding `square` (both colors), empty if nothing is there.
    pub fn pieces_of_same_type(&self, square: Square) -> BitBoard {
        self.piece_at(square)
            .map_or(BitBoard::EMPTY, |piece| self.piece_bb(piece))
    }

    /// Places a piece on an empty square.
    pub fn create_piece(
        &mut self,
        side: Side,
        piece: Piece,
        square: Square,
    ) -> Result<(), BoardError> {
        if self.is_occupied(square) || self.role_occupancy().intersects(square.mask()) {
            return Err(BoardError::SquareOccupied { square });
        }
        self.planes[Plane::side(side).index()] |= square.mask();
        self.planes[Plane::role(piece).index()] |= square.mask();
        trace!("created {side} {piece} on {square}");
        Ok(())
    }

    /// Places a piece given raw plane indices: `color` in 0..2, `role` in 2..8.
    pub fn create_piece_indexed(
        &mut self,
        color: usize,
        role: usize,
        square: Square,
    ) -> Result<(), BoardError> {
        let side = Side::from_index(color);
        let piece = Plane::from_index(role).and_then(|plane| plane.piece());
        match (side, piece) {
            (Some(side), Some(piece)) => self.create_piece(side, piece, square),
            _ => Err(BoardError::piece_spec(color, role)),
        }
    }

    /// Places a piece from plane names and an algebraic square,
    /// e.g. `("white", "rook", "a1")`.
    pub fn create_piece_named(
        &mut self,
        color: &str,
        role: &str,
        coordinate: &str,
    ) -> Result<(), BoardError> {
        let side = Side::from_str(color).map_err(|_| BoardError::piece_spec(color, role))?;
        let piece = Piece::from_str(role).map_err(|_| BoardError::piece_spec(color, role))?;
        let square = Square::from_str(coordinate)?;
        self.create_piece(side, piece, square)
    }

    /// Clears `square` from every plane. Removing from an empty square does nothing.
    pub fn remove_piece(&mut self, square: Square) {
        let keep = !square.mask();
        self.planes.iter_mut().for_each(|plane| *plane &= keep);
        trace!("cleared {square}");
    }

    pub fn remove_piece_at(&mut self, coordinate: &str) -> Result<(), BoardError> {
        let square = Square::from_str(coordinate)?;
        self.remove_piece(square);
        Ok(())
    }

    /// Moves whatever stands on `from` to `to`, plane by plane.
    /// This does NOT handle captures: remove the piece on `to` first.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        if !self.is_occupied(from) {
            return Err(BoardError::NoPieceAtSquare { square: from });
        }
        if from == to {
            return Ok(());
        }
        if self.is_occupied(to) {
            return Err(BoardError::SquareOccupied { square: to });
        }

        let (from_bb, to_bb) = (from.mask(), to.mask());
        for plane in self.planes.iter_mut().filter(|p| p.intersects(from_bb)) {
            *plane ^= from_bb;
            *plane |= to_bb;
        }
        debug!("moved {from} -> {to}");
        Ok(())
    }

    pub fn move_piece_at(&mut self, from: &str, to: &str) -> Result<(), BoardError> {
        let from = Square::from_str(from)?;
        let to = Square::from_str(to)?;
        self.move_piece(from, to)
    }

    /// Checks the plane invariants: one color and one role per occupied
    /// square, and nothing else anywhere.
    pub fn validate(&self) -> Result<(), BoardError> {
        let white = self.plane(Plane::White);
        let black = self.plane(Plane::Black);

        let mut seen = BitBoard::EMPTY;
        let mut doubled = white & black;
        for plane in Plane::ROLES {
            let bb = self.plane(plane);
            doubled |= seen & bb;
            seen |= bb;
        }

        let mismatched = (white | black) ^ seen;
        let bad = doubled | mismatched;
        if bad.any() {
            return Err(BoardError::InconsistentBoard { mask: bad.0 });
        }
        Ok(())
    }
}

impl Display for Board {
    /// 8x8 grid, rank 8 on top. Uppercase is white, lowercase black, `-` empty.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            let row: Vec<String> = (0..8)
                .map(|file| {
                    let square = Square::from_coords(file, rank).unwrap_or_default();
                    match self.piece_info_at(square) {
                        Some((piece, side)) => piece.symbol(side).to_string(),
                        None => "-".to_string(),
                    }
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
