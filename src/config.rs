//! Scoring tables and engine parameters.

use crate::error::{Error, Result};
use cozy_chess::{Color, Piece};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::str::FromStr;

pub const DEFAULT_DEPTH: u32 = 3;

pub fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "PAWN",
        Piece::Knight => "KNIGHT",
        Piece::Bishop => "BISHOP",
        Piece::Rook => "ROOK",
        Piece::Queen => "QUEEN",
        Piece::King => "KING",
    }
}

pub fn parse_piece_name(name: &str) -> Option<Piece> {
    match name.trim().to_ascii_lowercase().as_str() {
        "pawn" | "p" => Some(Piece::Pawn),
        "knight" | "n" => Some(Piece::Knight),
        "bishop" | "b" => Some(Piece::Bishop),
        "rook" | "r" => Some(Piece::Rook),
        "queen" | "q" => Some(Piece::Queen),
        "king" | "k" => Some(Piece::King),
        _ => None,
    }
}

// Pieces each side starts with.
fn starting_count(piece: Piece) -> u32 {
    match piece {
        Piece::Pawn => 8,
        Piece::Knight | Piece::Bishop | Piece::Rook => 2,
        Piece::Queen | Piece::King => 1,
    }
}

/// Weight per piece type used by the material heuristic. Piece types missing
/// from the table do not count.
#[derive(Clone, Debug, PartialEq)]
pub struct PieceScores {
    entries: Vec<(Piece, f64)>,
}

impl Default for PieceScores {
    fn default() -> Self {
        Self {
            entries: vec![
                (Piece::Pawn, 1.0),
                (Piece::Bishop, 4.0),
                (Piece::King, 50.0),
                (Piece::Queen, 10.0),
                (Piece::Knight, 5.0),
                (Piece::Rook, 3.0),
            ],
        }
    }
}

impl PieceScores {
    pub fn empty() -> Self { Self { entries: Vec::new() } }

    /// Sets (or replaces) the weight of one piece type.
    pub fn with(mut self, piece: Piece, score: f64) -> Self {
        match self.entries.iter_mut().find(|(p, _)| *p == piece) {
            Some(e) => e.1 = score,
            None => self.entries.push((piece, score)),
        }
        self
    }

    pub fn get(&self, piece: Piece) -> Option<f64> {
        self.entries.iter().find(|(p, _)| *p == piece).map(|&(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Piece, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Largest heuristic swing reachable from a standard game: one side
    /// keeps its whole starting army, the other only its king. King
    /// weights cancel since both kings stay on the board.
    pub fn max_swing(&self) -> f64 {
        self.iter()
            .filter(|&(p, _)| p != Piece::King)
            .map(|(p, s)| starting_count(p) as f64 * s)
            .sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidConfig { reason: "piece score table is empty".into() });
        }
        for (i, &(piece, score)) in self.entries.iter().enumerate() {
            if !score.is_finite() || score <= 0.0 {
                return Err(Error::InvalidConfig {
                    reason: format!("{} score must be positive, got {}", piece_name(piece), score),
                });
            }
            if self.entries[..i].iter().any(|&(p, _)| p == piece) {
                return Err(Error::InvalidConfig {
                    reason: format!("{} listed twice", piece_name(piece)),
                });
            }
        }
        Ok(())
    }
}

/// Parses `pawn=1,knight=5,...`. Duplicates are kept so validation can
/// report them.
impl FromStr for PieceScores {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let (name, value) = item.split_once('=').ok_or_else(|| Error::InvalidConfig {
                reason: format!("expected piece=score, got '{item}'"),
            })?;
            let piece = parse_piece_name(name).ok_or_else(|| Error::InvalidConfig {
                reason: format!("unknown piece type '{}'", name.trim()),
            })?;
            let score: f64 = value.trim().parse().map_err(|_| Error::InvalidConfig {
                reason: format!("bad score '{}' for {}", value.trim(), piece_name(piece)),
            })?;
            entries.push((piece, score));
        }
        Ok(Self { entries })
    }
}

/// Scores of decided games, from the perspective player's side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndScores {
    pub win: f64,
    pub lose: f64,
    pub tie: f64,
}

impl Default for EndScores {
    fn default() -> Self {
        Self { win: 100.0, lose: -100.0, tie: 0.0 }
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub piece_scores: PieceScores,
    pub end_scores: EndScores,
    /// Search depth in plies.
    pub depth: u32,
    /// Count claimable draws (threefold, fifty-move) as ties.
    pub claim_draw: bool,
    /// Add the [0,1) evaluation jitter at search leaves too.
    pub search_jitter: bool,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            piece_scores: PieceScores::default(),
            end_scores: EndScores::default(),
            depth: DEFAULT_DEPTH,
            claim_draw: false,
            search_jitter: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.piece_scores.validate()?;
        if self.depth == 0 {
            return Err(Error::InvalidConfig { reason: "search depth must be at least 1".into() });
        }
        let EndScores { win, lose, tie } = self.end_scores;
        if !(win.is_finite() && lose.is_finite() && tie.is_finite()) {
            return Err(Error::InvalidConfig { reason: "end scores must be finite".into() });
        }
        // Decisive results must dominate every heuristic value, jitter included.
        let bound = self.piece_scores.max_swing() + 1.0;
        if win <= bound || lose >= -bound {
            return Err(Error::InvalidConfig {
                reason: format!("win/lose scores ({win}/{lose}) must exceed the material swing of {bound}"),
            });
        }
        if !(lose < tie && tie < win) {
            return Err(Error::InvalidConfig { reason: "expected lose < tie < win".into() });
        }
        Ok(())
    }

    /// RNG for one side. Seeded configs derive a separate stream per side.
    pub fn rng_for(&self, side: Color) -> SmallRng {
        match self.seed {
            Some(seed) => {
                let salt = match side { Color::White => 0x57, Color::Black => 0xB1 };
                SmallRng::seed_from_u64(seed ^ salt)
            }
            None => SmallRng::from_entropy(),
        }
    }
}
