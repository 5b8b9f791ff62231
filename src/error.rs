use cozy_chess::Color;
use std::fmt;

/// Errors surfaced by the engine to its callers.
#[derive(Debug)]
pub enum Error {
    /// Configuration rejected at player construction.
    InvalidConfig { reason: String },
    /// A FEN string the rules engine could not parse.
    InvalidFen { fen: String, reason: String },
    /// A well-formed move that is not legal in the given position.
    IllegalMove { notation: String, fen: String },
    /// A move was requested from a position that is already game over.
    NoLegalMove { fen: String },
    /// A player was asked to move while the other side is on move.
    NotOnMove { player: &'static str, side: Color },
    /// Reading or writing the interactive channel failed.
    Input { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            Error::InvalidFen { fen, reason } => write!(f, "invalid fen '{fen}': {reason}"),
            Error::IllegalMove { notation, fen } => {
                write!(f, "illegal move {notation} in position {fen}")
            }
            Error::NoLegalMove { fen } => write!(f, "no legal move in position {fen}"),
            Error::NotOnMove { player, side } => {
                write!(f, "{player} player plays {} but it is not its turn", side_name(*side))
            }
            Error::Input { reason } => write!(f, "input error: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Input { reason: e.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn side_name(side: Color) -> &'static str {
    match side {
        Color::White => "White",
        Color::Black => "Black",
    }
}
