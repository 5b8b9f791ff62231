//! Plays one game between two players.

use crate::config::PieceScores;
use crate::error::{side_name, Error, Result};
use crate::eval::material_totals;
use crate::player::{Player, PlayerKind};
use crate::position::Position;
use cozy_chess::Color;
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
    /// Stopped at the ply limit before the game ended.
    Unfinished,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub fen: String,
    pub last_move: Option<String>,
    /// Moves played in this game, in UCI notation.
    pub moves: Vec<String>,
    pub plies: usize,
    pub elapsed_secs: f64,
    pub outcome: Outcome,
}

pub struct Game {
    start: Position,
    max_plies: Option<usize>,
    scores: PieceScores,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Position::startpos())
    }
}

impl Game {
    pub fn new(start: Position) -> Self {
        Self { start, max_plies: None, scores: PieceScores::default() }
    }

    pub fn with_max_plies(mut self, max_plies: Option<usize>) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Table used for the material totals in the game log.
    pub fn with_piece_scores(mut self, scores: PieceScores) -> Self {
        self.scores = scores;
        self
    }

    /// Alternates the players until the game is over (claimable draws end
    /// it) or the ply limit is reached.
    pub fn play(&self, white: &mut dyn Player, black: &mut dyn Player) -> Result<GameRecord> {
        for (p, side) in [(&*white, Color::White), (&*black, Color::Black)] {
            if p.side() != side {
                return Err(Error::InvalidConfig {
                    reason: format!("{} player is bound to {}, expected {}", p.name(), side_name(p.side()), side_name(side)),
                });
            }
        }

        let started = Instant::now();
        let mut position = self.start.clone();
        let mut played: Vec<String> = Vec::new();
        let finished = loop {
            if position.is_game_over(true) {
                break true;
            }
            if self.max_plies.map_or(false, |m| played.len() >= m) {
                break false;
            }
            let mover: &mut dyn Player = match position.side_to_move() {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let notation = mover.select_move(&position)?;
            position = position.apply_notation(&notation)?;
            let (w, b) = material_totals(&position, &self.scores);
            log::debug!("ply {}: {} plays {} (material {} / {})", played.len() + 1, mover.name(), notation, w, b);
            played.push(notation);
        };

        let outcome = if !finished {
            Outcome::Unfinished
        } else {
            match position.winner() {
                Some(Color::White) => Outcome::WhiteWins,
                Some(Color::Black) => Outcome::BlackWins,
                None => Outcome::Draw,
            }
        };
        let (w, b) = material_totals(&position, &self.scores);
        log::info!(
            "{} (white) vs {} (black): {:?} after {} plies, material {} / {}",
            white.name(),
            black.name(),
            outcome,
            played.len(),
            w,
            b
        );

        Ok(GameRecord {
            white: white.name().to_string(),
            black: black.name().to_string(),
            fen: position.fen(),
            last_move: played.last().cloned(),
            plies: played.len(),
            moves: played,
            elapsed_secs: started.elapsed().as_secs_f64(),
            outcome,
        })
    }
}

/// Coin flip for which of two players takes white. Returns (white, black).
pub fn assign_colors<R: Rng + ?Sized>(first: PlayerKind, second: PlayerKind, rng: &mut R) -> (PlayerKind, PlayerKind) {
    if rng.gen::<bool>() { (first, second) } else { (second, first) }
}
