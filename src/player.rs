//! Move-selection policies. Every policy is bound to one side for a game and
//! answers with a move in coordinate notation.

use crate::config::EngineConfig;
use crate::error::{side_name, Error, Result};
use crate::eval::Evaluator;
use crate::position::Position;
use crate::search::Searcher;
use cozy_chess::{Color, Move};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub trait Player {
    fn name(&self) -> &'static str;
    fn side(&self) -> Color;
    fn select_move(&mut self, position: &Position) -> Result<String>;
}

fn ensure_on_move(player: &'static str, side: Color, position: &Position) -> Result<()> {
    if position.side_to_move() != side {
        return Err(Error::NotOnMove { player, side });
    }
    Ok(())
}

fn no_legal_move(position: &Position) -> Error {
    Error::NoLegalMove { fen: position.fen() }
}

pub struct RandomPlayer {
    side: Color,
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(side: Color, rng: SmallRng) -> Self { Self { side, rng } }
}

impl Player for RandomPlayer {
    fn name(&self) -> &'static str { "random" }
    fn side(&self) -> Color { self.side }

    fn select_move(&mut self, position: &Position) -> Result<String> {
        ensure_on_move(self.name(), self.side, position)?;
        let moves = position.legal_moves();
        let mv = moves.choose(&mut self.rng).ok_or_else(|| no_legal_move(position))?;
        Ok(position.uci(*mv))
    }
}

/// One-ply lookahead on the jittered evaluation. Ties go to the move
/// generated first.
pub struct GreedyPlayer {
    side: Color,
    evaluator: Evaluator,
    rng: SmallRng,
}

impl GreedyPlayer {
    pub fn new(side: Color, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let evaluator = Evaluator::new(config.piece_scores.clone(), config.end_scores, config.claim_draw);
        Ok(Self { side, evaluator, rng: config.rng_for(side) })
    }

    /// Every legal move with the score of the position it leads to.
    pub fn score_moves(&mut self, position: &Position) -> Vec<(Move, f64)> {
        position
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let child = position.child(mv);
                (mv, self.evaluator.evaluate_jittered(&child, self.side, &mut self.rng))
            })
            .collect()
    }
}

impl Player for GreedyPlayer {
    fn name(&self) -> &'static str { "greedy" }
    fn side(&self) -> Color { self.side }

    fn select_move(&mut self, position: &Position) -> Result<String> {
        ensure_on_move(self.name(), self.side, position)?;
        let mut best: Option<(Move, f64)> = None;
        for (mv, score) in self.score_moves(position) {
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| position.uci(mv)).ok_or_else(|| no_legal_move(position))
    }
}

pub struct MiniMaxPlayer {
    side: Color,
    depth: u32,
    searcher: Searcher,
}

impl MiniMaxPlayer {
    pub fn new(side: Color, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { side, depth: config.depth, searcher: Searcher::new(config, config.rng_for(side)) })
    }

    pub fn depth(&self) -> u32 { self.depth }

    pub fn set_verbose(&mut self, on: bool) { self.searcher.set_verbose(on); }

    pub fn searcher_mut(&mut self) -> &mut Searcher { &mut self.searcher }
}

impl Player for MiniMaxPlayer {
    fn name(&self) -> &'static str { "minimax" }
    fn side(&self) -> Color { self.side }

    fn select_move(&mut self, position: &Position) -> Result<String> {
        ensure_on_move(self.name(), self.side, position)?;
        let result = self.searcher.search(position, self.side, self.depth);
        result.best_move.map(|m| position.uci(m)).ok_or_else(|| no_legal_move(position))
    }
}

/// Interactive player reading UCI notation from `input`.
pub struct HumanPlayer<R, W> {
    side: Color,
    input: R,
    output: W,
}

impl HumanPlayer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(side: Color) -> Self {
        Self::new(side, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(side: Color, input: R, output: W) -> Self { Self { side, input, output } }

    pub fn into_output(self) -> W { self.output }

    // Some(text) when the line is well-formed notation.
    fn read_candidate(&mut self) -> Result<Option<String>> {
        write!(self.output, "({}) Your turn! Choose move (in uci): ", side_name(self.side))?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Input { reason: "input closed before a legal move was entered".into() });
        }
        let text = line.trim();
        Ok(text.parse::<Move>().ok().map(|_| text.to_string()))
    }

    fn print_moves(&mut self, moves: &[String]) -> Result<()> {
        for row in moves.chunks(4) {
            writeln!(self.output, "{}", row.join(" | "))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &'static str { "human" }
    fn side(&self) -> Color { self.side }

    fn select_move(&mut self, position: &Position) -> Result<String> {
        ensure_on_move(self.name(), self.side, position)?;
        let legal = position.legal_notations();
        loop {
            match self.read_candidate()? {
                None => writeln!(self.output, "Invalid uci move! Try again.")?,
                Some(mv) if legal.contains(&mv) => return Ok(mv),
                Some(_) => {
                    writeln!(self.output, "Not a legal move! Available moves:\n")?;
                    self.print_moves(&legal)?;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Random,
    Greedy,
    MiniMax,
    Human,
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(PlayerKind::Random),
            "greedy" => Ok(PlayerKind::Greedy),
            "minimax" => Ok(PlayerKind::MiniMax),
            "human" => Ok(PlayerKind::Human),
            other => Err(Error::InvalidConfig { reason: format!("unknown player kind '{other}'") }),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerKind::Random => "random",
            PlayerKind::Greedy => "greedy",
            PlayerKind::MiniMax => "minimax",
            PlayerKind::Human => "human",
        };
        f.write_str(s)
    }
}

/// Builds a player for `side`; humans use stdin/stdout.
pub fn build_player(kind: PlayerKind, side: Color, config: &EngineConfig, verbose: bool) -> Result<Box<dyn Player>> {
    config.validate()?;
    Ok(match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new(side, config.rng_for(side))),
        PlayerKind::Greedy => Box::new(GreedyPlayer::new(side, config)?),
        PlayerKind::MiniMax => {
            let mut p = MiniMaxPlayer::new(side, config)?;
            p.set_verbose(verbose);
            Box::new(p)
        }
        PlayerKind::Human => Box::new(HumanPlayer::stdio(side)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_kinds_round_trip_through_names() {
        for kind in [PlayerKind::Random, PlayerKind::Greedy, PlayerKind::MiniMax, PlayerKind::Human] {
            assert_eq!(kind.to_string().parse::<PlayerKind>().unwrap(), kind);
        }
        assert!("engine".parse::<PlayerKind>().is_err());
    }

    #[test]
    fn build_player_rejects_zero_depth() {
        let config = EngineConfig { depth: 0, ..EngineConfig::default() };
        assert!(build_player(PlayerKind::MiniMax, Color::White, &config, false).is_err());
    }
}
