//! Whole-board mirrors and rotations.
//!
//! Every mirror is a short parallel-prefix sequence of masked shifts, so a
//! transform costs the same no matter how many squares are set. The ray
//! engine uses the rotations to turn east/west and diagonal problems into
//! north/south ones, where shifting cannot wrap around a file edge.

use super::components::BitBoard;

impl BitBoard {
    /// Reflects ranks: a1 <-> a8. Reverses the eight rank bytes.
    #[inline]
    pub const fn mirror_vertical(self) -> Self {
        const K1: u64 = 0x00FF00FF00FF00FF;
        const K2: u64 = 0x0000FFFF0000FFFF;
        let mut b = self.0;
        b = ((b >> 8) & K1) | ((b & K1) << 8);
        b = ((b >> 16) & K2) | ((b & K2) << 16);
        b = (b >> 32) | (b << 32);
        Self(b)
    }

    /// Reflects files: a1 <-> h1. Reverses the bits of every rank byte.
    #[inline]
    pub const fn mirror_horizontal(self) -> Self {
        const K1: u64 = 0x5555555555555555;
        const K2: u64 = 0x3333333333333333;
        const K4: u64 = 0x0f0f0f0f0f0f0f0f;
        let mut b = self.0;
        b = ((b >> 1) & K1) | ((b & K1) << 1);
        b = ((b >> 2) & K2) | ((b & K2) << 2);
        b = ((b >> 4) & K4) | ((b & K4) << 4);
        Self(b)
    }

    /// Reflects across the a1-h8 diagonal: (file, rank) -> (rank, file).
    #[inline]
    pub const fn mirror_diagonal(self) -> Self {
        const K1: u64 = 0x5500550055005500;
        const K2: u64 = 0x3333000033330000;
        const K4: u64 = 0x0f0f0f0f00000000;
        let mut b = self.0;
        let mut t = K4 & (b ^ (b << 28));
        b ^= t ^ (t >> 28);
        t = K2 & (b ^ (b << 14));
        b ^= t ^ (t >> 14);
        t = K1 & (b ^ (b << 7));
        b ^= t ^ (t >> 7);
        Self(b)
    }

    /// Reflects across the a8-h1 diagonal: (file, rank) -> (7 - rank, 7 - file).
    #[inline]
    pub const fn mirror_antidiagonal(self) -> Self {
        const K1: u64 = 0xaa00aa00aa00aa00;
        const K2: u64 = 0xcccc0000cccc0000;
        const K4: u64 = 0xf0f0f0f00f0f0f0f;
        let mut b = self.0;
        let mut t = b ^ (b << 36);
        b ^= K4 & (t ^ (b >> 36));
        t = K2 & (b ^ (b << 18));
        b ^= t ^ (t >> 18);
        t = K1 & (b ^ (b << 9));
        b ^= t ^ (t >> 9);
        Self(b)
    }

    /// (file, rank) -> (7 - rank, file). Inverse of [`BitBoard::rotate_270`].
    #[inline]
    pub const fn rotate_90(self) -> Self {
        self.mirror_vertical().mirror_diagonal()
    }

    /// (file, rank) -> (rank, 7 - file). Inverse of [`BitBoard::rotate_90`].
    #[inline]
    pub const fn rotate_270(self) -> Self {
        self.mirror_diagonal().mirror_vertical()
    }

    #[inline]
    pub const fn rotate_180(self) -> Self {
        self.mirror_vertical().mirror_horizontal()
    }
}
