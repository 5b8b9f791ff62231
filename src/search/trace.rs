use crate::config::piece_name;
use crate::error::side_name;
use cozy_chess::{Color, Piece};
use std::fmt;

/// One explored child, reported after its subtree has been searched.
#[derive(Debug, Clone)]
pub struct MoveTrace {
    /// Side to move in the child position.
    pub to_move: Color,
    /// Number of candidate moves at the parent.
    pub candidates: usize,
    /// Remaining depth at the parent.
    pub depth: u32,
    pub piece: Piece,
    /// UCI notation.
    pub mv: String,
    pub score: f64,
}

impl fmt::Display for MoveTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, M{}, D{}, {}:{} - SCORE: {:.2}",
            side_name(self.to_move),
            self.candidates,
            self.depth,
            piece_name(self.piece),
            self.mv,
            self.score
        )
    }
}

pub type TraceSink = Box<dyn FnMut(&MoveTrace)>;

/// Sink forwarding every trace line to the `log` facade.
pub fn log_sink() -> TraceSink {
    Box::new(|t: &MoveTrace| log::info!(target: "chessbot::search", "{}", t))
}
