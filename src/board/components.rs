use std::{
    fmt::{Display, Write},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{consts::NUM_SQUARES, error::BoardError};

/// A set of squares, one bit per square (a1 = bit 0, h8 = bit 63).
#[derive(Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(transparent)]
pub struct BitBoard(pub u64);

impl BitAndAssign for BitBoard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl BitOrAssign for BitBoard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitXorAssign for BitBoard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}

impl BitOr for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitBoard {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(u64::MAX);

    /// Moves every bit by `amount` squares: positive towards h8, negative towards a1.
    /// Bits pushed past either end of the board are dropped; bits crossing the
    /// a/h file edge wrap onto the neighbouring rank, so callers mask for that.
    /// A shift of 64 or more squares in either direction leaves nothing.
    #[inline(always)]
    pub const fn shift(self, amount: i8) -> Self {
        if amount >= 64 || amount <= -64 {
            Self::EMPTY
        } else if amount >= 0 {
            Self(self.0 << amount as u32)
        } else {
            Self(self.0 >> amount.unsigned_abs() as u32)
        }
    }

    #[inline(always)]
    pub const fn set(&mut self, index: usize) {
        self.0 |= 1 << index;
    }

    #[inline(always)]
    pub const fn clear(&mut self, index: usize) {
        self.0 &= !(1 << index);
    }

    #[inline(always)]
    pub fn pop_count(&self) -> u32 {
        #[cfg(all(target_arch = "x86_64", target_feature = "popcnt"))]
        {
            unsafe { std::arch::x86_64::_popcnt64(self.0 as i64) as u32 }
        }
        #[cfg(not(all(target_arch = "x86_64", target_feature = "popcnt")))]
        {
            self.0.count_ones()
        }
    }

    #[inline(always)]
    pub fn lsb(&self) -> Option<u64> {
        if self.0 == 0 {
            return None;
        }
        #[cfg(all(target_arch = "x86_64", target_feature = "bmi1"))]
        {
            Some(unsafe { std::arch::x86_64::_tzcnt_u64(self.0) })
        }
        #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi1")))]
        {
            Some(self.0.trailing_zeros() as u64)
        }
    }

    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u64> {
        let idx = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(idx)
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn any(&self) -> bool {
        self.0 != 0
    }

    /// True when exactly one square is set.
    #[inline(always)]
    pub const fn is_single(&self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    #[inline(always)]
    pub const fn contains_square(&self, index: usize) -> bool {
        (self.0 & (1 << index)) != 0
    }

    #[inline(always)]
    pub const fn or(self, rhs: Self) -> Self {
        BitBoard(self.0 | rhs.0)
    }

    #[inline(always)]
    pub const fn and(self, rhs: Self) -> Self {
        BitBoard(self.0 & rhs.0)
    }

    #[inline(always)]
    pub const fn not(self) -> Self {
        BitBoard(!self.0)
    }

    #[inline(always)]
    pub const fn intersects(&self, other: BitBoard) -> bool {
        self.0 & other.0 != 0
    }

    #[inline(always)]
    pub const fn iter_bits(&self) -> BitBoardIterator {
        BitBoardIterator { remaining: self.0 }
    }

    /// Squares in the set, in index order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        self.iter_bits().map(|index| Square(index as u8))
    }

    /// Renders the set as an 8x8 grid, rank 8 on top, `1` for members.
    pub fn print_bitboard(&self) -> String {
        let mut out = String::with_capacity(8 * 8 * 2);
        for rank in (0..8).rev() {
            let row: Vec<&str> = (0..8)
                .map(|file| {
                    if self.contains_square(rank * 8 + file) {
                        "1"
                    } else {
                        "0"
                    }
                })
                .collect();
            // Writing into a String cannot fail
            let _ = writeln!(out, "{}", row.join(" "));
        }
        out
    }
}

/// Iterator that yields each set bit position in a BitBoard
pub struct BitBoardIterator {
    remaining: u64,
}

impl Iterator for BitBoardIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let idx = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1; // Clear the least significant bit
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.remaining.count_ones() as usize;
        (exact, Some(exact))
    }
}

impl ExactSizeIterator for BitBoardIterator {}

// TOML integers are signed 64-bit, so planes travel as hex strings.
impl Serialize for BitBoard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:#018x}", self.0))
    }
}

impl<'de> Deserialize<'de> for BitBoard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(&raw);
        u64::from_str_radix(digits, 16)
            .map(BitBoard)
            .map_err(|e| de::Error::custom(format!("bad bitboard {raw:?}: {e}")))
    }
}

impl Display for BitBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        self.flip()
    }
}

impl FromStr for Side {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Side::White),
            "black" => Ok(Side::Black),
            _ => Err(BoardError::piece_spec(s, "-")),
        }
    }
}

impl Side {
    pub const SIDES: [Side; 2] = [Side::White, Side::Black];

    pub const fn flip(&self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn index(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::White),
            1 => Some(Side::Black),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    /// Signed shift of one pawn step for this side.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Side::White => 8,
            Side::Black => -8,
        }
    }

    /// Zero-based rank the side's pawns start on.
    #[inline(always)]
    pub const fn pawn_home_rank(&self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }
}

#[derive(Default, PartialEq, Eq, Debug, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Piece {
    #[default]
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Piece {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Piece::PIECES
            .into_iter()
            .find(|piece| piece.name() == s)
            .ok_or_else(|| BoardError::piece_spec("-", s))
    }
}

impl Piece {
    pub const PIECES: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub const PIECE_CHARS: [[char; 6]; 2] = [
        ['P', 'N', 'B', 'R', 'Q', 'K'], // White
        ['p', 'n', 'b', 'r', 'q', 'k'], // Black
    ];

    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Piece::Pawn => "pawn",
            Piece::Knight => "knight",
            Piece::Bishop => "bishop",
            Piece::Rook => "rook",
            Piece::Queen => "queen",
            Piece::King => "king",
        }
    }

    pub const fn symbol(&self, side: Side) -> char {
        Self::PIECE_CHARS[side.index()][self.index()]
    }
}

/// One of the eight occupancy planes a [`Board`](crate::Board) is made of.
/// The first two hold color, the remaining six hold role.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Plane {
    White,
    Black,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Plane {
    pub const ALL: [Plane; 8] = [
        Plane::White,
        Plane::Black,
        Plane::Pawn,
        Plane::Knight,
        Plane::Bishop,
        Plane::Rook,
        Plane::Queen,
        Plane::King,
    ];

    /// Planes 2..8
    pub const ROLES: [Plane; 6] = [
        Plane::Pawn,
        Plane::Knight,
        Plane::Bishop,
        Plane::Rook,
        Plane::Queen,
        Plane::King,
    ];

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    pub const fn side(side: Side) -> Self {
        match side {
            Side::White => Plane::White,
            Side::Black => Plane::Black,
        }
    }

    pub const fn role(piece: Piece) -> Self {
        Self::ROLES[piece.index()]
    }

    /// The piece this plane stands for, `None` for the two color planes.
    pub const fn piece(&self) -> Option<Piece> {
        match self {
            Plane::White | Plane::Black => None,
            _ => Some(Piece::PIECES[self.index() - 2]),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Plane::White => "white",
            Plane::Black => "black",
            Plane::Pawn => "pawn",
            Plane::Knight => "knight",
            Plane::Bishop => "bishop",
            Plane::Rook => "rook",
            Plane::Queen => "queen",
            Plane::King => "king",
        }
    }
}

impl Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a single square on the board.
/// # Representation
/// Little-endian rank-file mapping, `index = 8 * rank + file`:
/// ```text
/// 8 | 56 57 58 59 60 61 62 63
/// 7 | 48 49 50 51 52 53 54 55
/// 6 | 40 41 42 43 44 45 46 47
/// 5 | 32 33 34 35 36 37 38 39
/// 4 | 24 25 26 27 28 29 30 31
/// 3 | 16 17 18 19 20 21 22 23
/// 2 | 08 09 10 11 12 13 14 15
/// 1 | 00 01 02 03 04 05 06 07
///   +------------------------
///     a  b  c  d  e  f  g  h
/// ```
#[derive(Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
    pub const RANKS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

    /// Returns a Square from a given index. Fails if index is not in [0, 63].
    #[inline(always)]
    pub fn new(index: usize) -> Result<Self, BoardError> {
        if index < NUM_SQUARES {
            return Ok(Self(index as u8));
        }
        Err(BoardError::coordinate(index))
    }

    /// Returns a Square from a zero-based file and rank.
    /// Fails with `InvalidCoordinate` when either is negative or past the board.
    #[inline(always)]
    pub fn from_coords(file: i8, rank: i8) -> Result<Self, BoardError> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            return Ok(Square((8 * rank + file) as u8));
        }
        Err(BoardError::coordinate(format!("file {file}, rank {rank}")))
    }

    /// The square named by a single-bit mask.
    pub fn from_mask(mask: BitBoard) -> Result<Self, BoardError> {
        if !mask.is_single() {
            return Err(BoardError::InvalidSquareMask { mask: mask.0 });
        }
        Ok(Square(mask.0.trailing_zeros() as u8))
    }

    /// File of a single-bit mask, taken from the bit's position.
    /// `mask` must have exactly one bit set.
    #[inline(always)]
    pub const fn file_of_mask(mask: BitBoard) -> u8 {
        debug_assert!(mask.is_single());
        (mask.0.trailing_zeros() & 7) as u8
    }

    /// Rank of a single-bit mask, taken from the bit's position.
    /// `mask` must have exactly one bit set.
    #[inline(always)]
    pub const fn rank_of_mask(mask: BitBoard) -> u8 {
        debug_assert!(mask.is_single());
        (mask.0.trailing_zeros() >> 3) as u8
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Zero-based file, a = 0
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 & 7
    }

    /// Zero-based rank, 1 = 0
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 >> 3
    }

    #[inline(always)]
    pub const fn mask(&self) -> BitBoard {
        BitBoard(1 << self.0)
    }

    /// All 64 squares from a1 to h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.index()
    }
}

impl From<Square> for BitBoard {
    fn from(value: Square) -> Self {
        value.mask()
    }
}

impl TryFrom<usize> for Square {
    type Error = BoardError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Square::new(value)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(BoardError::coordinate(s));
        };
        let file = Square::FILES.iter().position(|&c| c == file);
        let rank = Square::RANKS.iter().position(|&c| c == rank);
        match (file, rank) {
            (Some(file), Some(rank)) => Ok(Square((8 * rank + file) as u8)),
            _ => Err(BoardError::coordinate(s)),
        }
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(Square::FILES[self.file() as usize])?;
        f.write_char(Square::RANKS[self.rank() as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_bitboard() {
        let out = "0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 1 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0
";
        // e4
        let b = BitBoard(268_435_456);
        assert_eq!(out, b.print_bitboard())
    }

    #[test]
    fn test_display_square() {
        assert_eq!(format!("{}", Square(0)), "a1");
        assert_eq!(format!("{}", Square(7)), "h1");
        assert_eq!(format!("{}", Square(8)), "a2");
        assert_eq!(format!("{}", Square(11)), "d2");
        assert_eq!(format!("{}", Square(18)), "c3");
        assert_eq!(format!("{}", Square(28)), "e4");
        assert_eq!(format!("{}", Square(56)), "a8");
        assert_eq!(format!("{}", Square(63)), "h8");
    }

    #[test]
    fn test_square_from_str() {
        assert_eq!(Square::from_str("a1"), Ok(Square(0)));
        assert_eq!(Square::from_str("e2"), Ok(Square(12)));
        assert_eq!(Square::from_str("h8"), Ok(Square(63)));

        for bad in ["", "e", "e22", "i1", "a9", "a0", "E2", "2e", "é1"] {
            assert_eq!(
                Square::from_str(bad),
                Err(BoardError::coordinate(bad)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_square_from_coords() {
        assert_eq!(Square::from_coords(4, 1).map(|s| s.index()), Ok(12));
        assert!(Square::from_coords(-1, 0).is_err());
        assert!(Square::from_coords(0, -1).is_err());
        assert!(Square::from_coords(8, 0).is_err());
        assert!(Square::from_coords(0, 8).is_err());
    }

    #[test]
    fn test_square_from_mask() {
        assert_eq!(Square::from_mask(BitBoard(1 << 20)), Ok(Square(20)));
        assert_eq!(
            Square::from_mask(BitBoard(0b11)),
            Err(BoardError::InvalidSquareMask { mask: 0b11 })
        );
        assert!(Square::from_mask(BitBoard::EMPTY).is_err());
    }

    #[test]
    fn test_file_of_mask_uses_bit_position() {
        // h2 is bit 15; masking the raw value with 7 would give 0
        let h2 = BitBoard(1 << 15);
        assert_eq!(Square::file_of_mask(h2), 7);
        assert_eq!(Square::rank_of_mask(h2), 1);
        assert_eq!(Square::file_of_mask(BitBoard(1 << 32)), 0);
    }

    #[test]
    fn test_shift_drops_bits_off_the_board() {
        assert_eq!(BitBoard(1 << 60).shift(8), BitBoard::EMPTY);
        assert_eq!(BitBoard(1 << 3).shift(-8), BitBoard::EMPTY);
        assert_eq!(BitBoard(1 << 12).shift(16), BitBoard(1 << 28));
        assert_eq!(BitBoard(1 << 12).shift(-9), BitBoard(1 << 3));

        assert_eq!(BitBoard::FULL.shift(64), BitBoard::EMPTY);
        assert_eq!(BitBoard::FULL.shift(-64), BitBoard::EMPTY);
        assert_eq!(BitBoard::FULL.shift(i8::MAX), BitBoard::EMPTY);
        assert_eq!(BitBoard::FULL.shift(i8::MIN), BitBoard::EMPTY);
        assert_eq!(BitBoard::FULL.shift(63), BitBoard(1 << 63));
        assert_eq!(BitBoard::FULL.shift(-63), BitBoard(1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_rank_of_empty_mask_is_rejected() {
        let _ = Square::rank_of_mask(BitBoard::EMPTY);
    }

    #[test]
    fn test_bitboard_iteration() {
        let bb = BitBoard(0b1010_0001);
        assert_eq!(bb.iter_bits().collect::<Vec<_>>(), vec![0, 5, 7]);
        assert_eq!(bb.iter_bits().len(), 3);
        assert_eq!(bb.pop_count(), 3);

        let mut bb = bb;
        assert_eq!(bb.pop_lsb(), Some(0));
        assert_eq!(bb.lsb(), Some(5));
    }

    #[test]
    fn test_plane_lookup() {
        assert_eq!(Plane::role(Piece::Knight), Plane::Knight);
        assert_eq!(Plane::side(Side::Black).index(), 1);
        assert_eq!(Plane::from_index(7), Some(Plane::King));
        assert_eq!(Plane::from_index(8), None);
        assert_eq!(Plane::Queen.piece(), Some(Piece::Queen));
        assert_eq!(Plane::White.piece(), None);
    }
}
