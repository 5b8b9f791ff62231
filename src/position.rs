//! Rules-engine adapter.
//!
//! `cozy_chess` supplies move generation and board state but keeps no game
//! history, so `Position` carries the hashes of every position reached and
//! the moves played to answer repetition and move-count queries. Positions
//! are never mutated in place: `apply` returns a new copy.

use crate::error::{Error, Result};
use cozy_chess::util::{display_uci_move, parse_uci_move};
use cozy_chess::{Board, Color, Move, Piece, Square};

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    // Hash of every position reached in this game, current one included.
    history: Vec<u64>,
    moves: Vec<Move>,
    setup_plies: u32,
}

pub fn opponent(side: Color) -> Color {
    match side {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

#[inline]
fn is_dark(sq: Square) -> bool {
    (sq.file() as usize + sq.rank() as usize) % 2 == 0
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = Board::from_fen(fen.trim(), false).map_err(|e| Error::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(Self::from_board(board))
    }

    /// Wraps a board as the start of a game. Plies already played are
    /// recovered from the fullmove counter and side to move.
    pub fn from_board(board: Board) -> Self {
        let black_to_move = board.side_to_move() == Color::Black;
        let setup_plies =
            (board.fullmove_number().saturating_sub(1) as u32) * 2 + black_to_move as u32;
        Self { history: vec![board.hash()], board, moves: Vec::new(), setup_plies }
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn fen(&self) -> String { self.board.to_string() }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    /// Legal moves in the rules engine's enumeration order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut v = Vec::with_capacity(64);
        self.board.generate_moves(|ml| {
            for m in ml { v.push(m); }
            false
        });
        v
    }

    /// Legal moves tagged with the type of the piece making them.
    pub fn legal_moves_with_piece(&self) -> Vec<(Move, Piece)> {
        let mut v = Vec::with_capacity(64);
        self.board.generate_moves(|ml| {
            for m in ml { v.push((m, ml.piece)); }
            false
        });
        v
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    /// Returns a copy of this position with `mv` played.
    pub fn apply(&self, mv: Move) -> Result<Position> {
        if !self.board.is_legal(mv) {
            return Err(Error::IllegalMove { notation: self.uci(mv), fen: self.fen() });
        }
        Ok(self.child(mv))
    }

    /// Parses and plays a move in coordinate notation.
    pub fn apply_notation(&self, notation: &str) -> Result<Position> {
        let mv = self.parse_move(notation)?;
        Ok(self.child(mv))
    }

    /// Parses UCI notation (castling as `e1g1`) and checks the move is
    /// legal here.
    pub fn parse_move(&self, notation: &str) -> Result<Move> {
        let illegal = || Error::IllegalMove { notation: notation.to_string(), fen: self.fen() };
        let text = notation.trim();
        let mv = parse_uci_move(&self.board, text).map_err(|_| illegal())?;
        // King-takes-rook castling text is the engine's form, not UCI.
        if self.board.is_legal(mv) && self.uci(mv) == text { Ok(mv) } else { Err(illegal()) }
    }

    /// UCI text of a move played from this position. The rules engine keeps
    /// castling as king-takes-rook internally.
    pub fn uci(&self, mv: Move) -> String {
        display_uci_move(&self.board, mv).to_string()
    }

    /// Every legal move in UCI notation, in enumeration order.
    pub fn legal_notations(&self) -> Vec<String> {
        self.legal_moves().into_iter().map(|mv| self.uci(mv)).collect()
    }

    // Caller guarantees legality (moves come from generation).
    pub(crate) fn child(&self, mv: Move) -> Position {
        let mut board = self.board.clone();
        board.play(mv);
        let mut history = self.history.clone();
        history.push(board.hash());
        let mut moves = self.moves.clone();
        moves.push(mv);
        Position { board, history, moves, setup_plies: self.setup_plies }
    }

    pub fn is_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_checkmate(&self) -> bool { self.is_check() && !self.has_legal_moves() }

    pub fn is_stalemate(&self) -> bool { !self.is_check() && !self.has_legal_moves() }

    pub fn is_insufficient_material(&self) -> bool {
        self.side_cannot_mate(Color::White) && self.side_cannot_mate(Color::Black)
    }

    fn side_cannot_mate(&self, side: Color) -> bool {
        let b = &self.board;
        let own = b.colors(side);
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !(own & heavy).is_empty() {
            return false;
        }
        if !(own & b.pieces(Piece::Knight)).is_empty() {
            let theirs = b.colors(opponent(side));
            let helpers = theirs & !b.pieces(Piece::King) & !b.pieces(Piece::Queen);
            return own.len() <= 2 && helpers.is_empty();
        }
        if !(own & b.pieces(Piece::Bishop)).is_empty() {
            let bishops = b.pieces(Piece::Bishop);
            let one_colour = bishops.into_iter().all(is_dark) || bishops.into_iter().all(|sq| !is_dark(sq));
            return one_colour && b.pieces(Piece::Pawn).is_empty() && b.pieces(Piece::Knight).is_empty();
        }
        true
    }

    /// How many times the current position has occurred in this game.
    pub fn repetitions(&self) -> usize {
        let current = self.board.hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    pub fn is_fivefold_repetition(&self) -> bool { self.repetitions() >= 5 }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.board.halfmove_clock() >= 150 && !self.is_checkmate()
    }

    /// Threefold repetition or the fifty-move rule.
    pub fn can_claim_draw(&self) -> bool {
        self.repetitions() >= 3 || self.board.halfmove_clock() >= 100
    }

    /// Drawn outcome: stalemate, insufficient material, fivefold repetition,
    /// and claimable draws when `claim_draw` is set.
    pub fn is_draw(&self, claim_draw: bool) -> bool {
        self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_fivefold_repetition()
            || (claim_draw && self.can_claim_draw())
    }

    pub fn is_game_over(&self, claim_draw: bool) -> bool {
        self.is_checkmate() || self.is_draw(claim_draw) || self.is_seventyfive_moves()
    }

    /// The side that delivered mate, if the side to move is checkmated.
    pub fn winner(&self) -> Option<Color> {
        if self.is_checkmate() { Some(opponent(self.side_to_move())) } else { None }
    }

    pub fn piece_count(&self, piece: Piece, side: Color) -> u32 {
        (self.board.colors(side) & self.board.pieces(piece)).len()
    }

    /// Plies played in the game so far, including those implied by the
    /// setup FEN.
    pub fn move_history_length(&self) -> u32 {
        self.setup_plies + self.moves.len() as u32
    }

    pub fn moves(&self) -> &[Move] { &self.moves }

    /// The standard initial setup with nothing played yet.
    pub fn is_start_position(&self) -> bool {
        self.move_history_length() == 0 && self.board == Board::default()
    }

    pub fn last_move(&self) -> Option<Move> { self.moves.last().copied() }
}
