//! Position history: an ordered list of board snapshots plus a cursor.

use std::path::Path;

use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    board::{
        Board,
        components::{BitBoard, Piece, Square},
    },
    error::BoardError,
    moves::move_gen::generate_moves,
};

/// Snapshots from the starting position up to the latest move.
///
/// `cursor` points at the current position. Undo and redo only move the cursor;
/// pushing a new position drops everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    cursor: usize,
    snapshots: Vec<Board>,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl GameHistory {
    pub fn new(start: Board) -> Self {
        Self {
            snapshots: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Board {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Pawn plane of the position before the current one; empty at the start.
    pub fn previous_pawns(&self) -> BitBoard {
        match self.cursor {
            0 => BitBoard::EMPTY,
            n => self.snapshots[n - 1].piece_bb(Piece::Pawn),
        }
    }

    pub fn push(&mut self, board: Board) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(board);
        self.cursor += 1;
    }

    pub fn undo(&mut self) -> Result<&Board, BoardError> {
        if self.cursor == 0 {
            return Err(BoardError::HistoryExhausted { action: "undo" });
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    pub fn redo(&mut self) -> Result<&Board, BoardError> {
        if self.cursor + 1 >= self.snapshots.len() {
            return Err(BoardError::HistoryExhausted { action: "redo" });
        }
        self.cursor += 1;
        Ok(self.current())
    }

    /// Destinations of the piece on `square` in the current position.
    pub fn moves_from(&self, square: Square) -> Result<BitBoard, BoardError> {
        generate_moves(self.current(), square, self.previous_pawns())
    }

    /// Plays `from`-`to` if the generator allows it, taking whatever stands on `to`
    /// (or the pawn passed by an en passant capture), and records the result.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<&Board, BoardError> {
        let destinations = self.moves_from(from)?;
        if !destinations.intersects(to.mask()) {
            return Err(BoardError::IllegalMove { from, to });
        }

        let mut next = *self.current();
        if next.is_occupied(to) {
            debug!("{from}{to} captures on {to}");
            next.remove_piece(to);
        } else if let Some((Piece::Pawn, side)) = next.piece_info_at(from)
            && from.file() != to.file()
        {
            let passed = Square::from_mask(to.mask().shift(-side.forward()))?;
            debug!("{from}{to} takes en passant on {passed}");
            next.remove_piece(passed);
        }
        next.move_piece(from, to)?;

        self.push(next);
        Ok(self.current())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> miette::Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)
            .into_diagnostic()
            .context("Serializing game history")?;
        std::fs::write(path, text)
            .into_diagnostic()
            .with_context(|| format!("Writing history to {}", path.display()))?;
        info!("saved {} positions to {}", self.len(), path.display());
        Ok(())
    }

    /// Reads a history written by [`GameHistory::save`]. Every snapshot is validated.
    pub fn load(path: impl AsRef<Path>) -> miette::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("Reading history from {}", path.display()))?;
        let history: GameHistory = toml::from_str(&text)
            .into_diagnostic()
            .with_context(|| format!("Parsing history in {}", path.display()))?;

        if history.cursor >= history.snapshots.len() {
            miette::bail!(
                "History in {} has cursor {} but only {} positions",
                path.display(),
                history.cursor,
                history.snapshots.len()
            );
        }
        for (i, board) in history.snapshots.iter().enumerate() {
            board
                .validate()
                .with_context(|| format!("Position {i} in {}", path.display()))?;
        }
        info!("loaded {} positions from {}", history.len(), path.display());
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_push_undo_redo() {
        let mut history = GameHistory::new(Board::classic());
        assert_eq!(history.previous_pawns(), BitBoard::EMPTY);
        assert!(matches!(
            history.undo(),
            Err(BoardError::HistoryExhausted { action: "undo" })
        ));

        history.apply_move(sq("e2"), sq("e4")).unwrap();
        history.apply_move(sq("e7"), sq("e5")).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.previous_pawns(),
            Board::classic().piece_bb(Piece::Pawn) ^ mask(&["e2", "e4"])
        );

        history.undo().unwrap();
        assert_eq!(history.cursor(), 1);
        history.redo().unwrap();
        assert!(history.redo().is_err());

        // A new move after undo drops the abandoned line
        history.undo().unwrap();
        history.apply_move(sq("d7"), sq("d5")).unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.current().is_occupied(sq("d5")));
        assert!(!history.current().is_occupied(sq("e5")));
    }

    fn mask(squares: &[&str]) -> BitBoard {
        squares
            .iter()
            .fold(BitBoard::EMPTY, |acc, s| acc | sq(s).mask())
    }

    #[test]
    fn test_illegal_move_leaves_history_alone() {
        let mut history = GameHistory::new(Board::classic());
        assert_eq!(
            history.apply_move(sq("e2"), sq("e5")),
            Err(BoardError::IllegalMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert_eq!(
            history.apply_move(sq("e4"), sq("e5")),
            Err(BoardError::NoPieceAtSquare { square: sq("e4") })
        );
        assert_eq!(history.len(), 1);
        assert_eq!(*history.current(), Board::classic());
    }

    #[test]
    fn test_capture_and_en_passant() {
        init();
        let mut start = Board::default();
        start.create_piece(Side::White, Piece::Pawn, sq("e5")).unwrap();
        start.create_piece(Side::Black, Piece::Pawn, sq("d7")).unwrap();
        start.create_piece(Side::Black, Piece::Knight, sq("f6")).unwrap();
        let mut history = GameHistory::new(start);

        history.apply_move(sq("d7"), sq("d5")).unwrap();
        assert!(history.moves_from(sq("e5")).unwrap().intersects(sq("d6").mask()));

        history.apply_move(sq("e5"), sq("d6")).unwrap();
        let board = history.current();
        assert_eq!(board.piece_info_at(sq("d6")), Some((Piece::Pawn, Side::White)));
        assert!(!board.is_occupied(sq("d5")));
        assert!(board.validate().is_ok());

        // Ordinary capture
        let mut start = Board::default();
        start.create_piece(Side::White, Piece::Rook, sq("a1")).unwrap();
        start.create_piece(Side::Black, Piece::Knight, sq("a6")).unwrap();
        let mut history = GameHistory::new(start);
        history.apply_move(sq("a1"), sq("a6")).unwrap();
        assert_eq!(
            history.current().piece_info_at(sq("a6")),
            Some((Piece::Rook, Side::White))
        );
        assert_eq!(history.current().occupancy().pop_count(), 1);
    }

    #[test]
    fn test_save_and_load() {
        init();
        let path =
            std::env::temp_dir().join(format!("bitchess_history_{}.toml", std::process::id()));
        let mut history = GameHistory::new(Board::classic());
        history.apply_move(sq("g1"), sq("f3")).unwrap();
        history.apply_move(sq("b8"), sq("c6")).unwrap();
        history.undo().unwrap();

        history.save(&path).unwrap();
        let loaded = GameHistory::load(&path).unwrap();
        assert_eq!(loaded, history);

        // A corrupted snapshot is rejected
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, text.replacen("0x000000000000ffff", "0x000000000001ffff", 1))
            .unwrap();
        assert!(GameHistory::load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
