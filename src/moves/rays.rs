//! Fill, span and first-blocker sets along one compass direction.
//!
//! North and south are plain shifts by whole ranks, which fall off the board on their own.
//! East and west are turned a quarter so they become north and south. The four diagonals
//! cannot be turned into a straight line, so every shift is checked against the same shift
//! performed in the quarter-turned frame: a bit that wrapped across a file edge in one frame
//! wrapped across a rank edge in the other, and the intersection keeps only honest moves.

use crate::board::components::BitBoard;

use super::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Quarter,
    ThreeQuarter,
}

impl Turn {
    #[inline(always)]
    const fn apply(self, bb: BitBoard) -> BitBoard {
        match self {
            Turn::Quarter => bb.rotate_90(),
            Turn::ThreeQuarter => bb.rotate_270(),
        }
    }

    #[inline(always)]
    const fn undo(self, bb: BitBoard) -> BitBoard {
        match self {
            Turn::Quarter => bb.rotate_270(),
            Turn::ThreeQuarter => bb.rotate_90(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Shift as is.
    Straight,
    /// Quarter-turn, shift by whole ranks, turn back.
    Rotated,
    /// Shift as is, masked by the shift `guard` in the turned frame.
    Guarded { turn: Turn, guard: i8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ray {
    shift: i8,
    frame: Frame,
}

/// Indexed by [`Direction::index`].
const RAYS: [Ray; 8] = [
    // n
    Ray {
        shift: 8,
        frame: Frame::Straight,
    },
    // ne
    Ray {
        shift: 9,
        frame: Frame::Guarded {
            turn: Turn::Quarter,
            guard: 7,
        },
    },
    // e
    Ray {
        shift: 8,
        frame: Frame::Rotated,
    },
    // se
    Ray {
        shift: -7,
        frame: Frame::Guarded {
            turn: Turn::ThreeQuarter,
            guard: -9,
        },
    },
    // s
    Ray {
        shift: -8,
        frame: Frame::Straight,
    },
    // sw
    Ray {
        shift: -9,
        frame: Frame::Guarded {
            turn: Turn::Quarter,
            guard: -7,
        },
    },
    // w
    Ray {
        shift: -8,
        frame: Frame::Rotated,
    },
    // nw
    Ray {
        shift: 7,
        frame: Frame::Guarded {
            turn: Turn::ThreeQuarter,
            guard: 9,
        },
    },
];

impl Ray {
    /// Every bit of `bb` moved `steps` squares along the ray. Bits that would leave the board
    /// disappear.
    #[inline(always)]
    const fn advance(&self, bb: BitBoard, steps: i8) -> BitBoard {
        let amount = self.shift * steps;
        match self.frame {
            Frame::Straight => bb.shift(amount),
            Frame::Rotated => bb.rotate_90().shift(amount).rotate_270(),
            Frame::Guarded { turn, guard } => {
                let turned = turn.apply(bb).shift(guard * steps);
                bb.shift(amount).and(turn.undo(turned))
            }
        }
    }

    const fn fill(&self, bb: BitBoard) -> BitBoard {
        let mut fill = bb;
        fill = fill.or(self.advance(fill, 1));
        fill = fill.or(self.advance(fill, 2));
        fill.or(self.advance(fill, 4))
    }

    /// Only the freshly shifted bits are kept at each stage, so origin bits that happen to
    /// lie in another origin's path are reported as part of its span.
    const fn span(&self, bb: BitBoard) -> BitBoard {
        let mut span = self.advance(bb, 1);
        span = span.or(self.advance(span.or(bb), 2));
        span.or(self.advance(span.or(bb), 4))
    }
}

#[inline(always)]
const fn ray(direction: Direction) -> &'static Ray {
    &RAYS[direction.index()]
}

/// One square along `direction`, without wrapping around a board edge.
#[inline(always)]
pub const fn step(bb: BitBoard, direction: Direction) -> BitBoard {
    ray(direction).advance(bb, 1)
}

/// `bb` together with everything it can see along `direction`, up to the edge.
#[inline(always)]
pub const fn fill(bb: BitBoard, direction: Direction) -> BitBoard {
    ray(direction).fill(bb)
}

/// The squares strictly beyond `bb` along `direction`, ignoring blockers.
/// For a single square this is `fill ^ square`.
#[inline(always)]
pub const fn span(bb: BitBoard, direction: Direction) -> BitBoard {
    ray(direction).span(bb)
}

/// The bits of `bb` that no other bit of `bb` precedes when looking along `direction`,
/// i.e. the first piece met on each line.
///
/// ```
/// use bitchess::prelude::*;
///
/// // e2, e6 and e8 on one file: looking north from below, e2 is met first.
/// let occupants = BitBoard(0x1000_1000_0000_1000);
/// assert_eq!(block(occupants, Direction::North), Square::from_str("e2").unwrap().mask());
/// ```
#[inline(always)]
pub const fn block(bb: BitBoard, direction: Direction) -> BitBoard {
    bb.and(fill(step(bb, direction), direction).not())
}
