pub use crate::board::{
    self, Board,
    components::{BitBoard, BitBoardIterator, Piece, Plane, Side, Square},
    layout::Layout,
};
pub use crate::consts::*;
pub use crate::error::BoardError;
pub use crate::game::{self, GameHistory};
pub use crate::moves::{
    self, Direction,
    move_gen::{self, generate_moves},
    rays::{self, block, fill, span, step},
};
pub use crate::utils::{self, cli::*, config::{Config, parse_level}, log::*, prng::*};
pub use miette::{self, Context, IntoDiagnostic, Result};
pub use std::fmt::Display;
pub use std::str::FromStr;
pub use tracing::{Level, debug, error, info, trace, warn};
