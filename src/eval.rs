//! Static evaluation: decided outcomes first, material balance otherwise.

use crate::config::{EndScores, PieceScores};
use crate::position::{opponent, Position};
use cozy_chess::Color;
use rand::Rng;

/// Material of `perspective` minus material of its opponent.
pub fn material_balance(position: &Position, perspective: Color, scores: &PieceScores) -> f64 {
    let them = opponent(perspective);
    scores
        .iter()
        .map(|(piece, s)| {
            let own = position.piece_count(piece, perspective) as f64 * s;
            let other = position.piece_count(piece, them) as f64 * s;
            own - other
        })
        .sum()
}

/// (white, black) material totals, for display.
pub fn material_totals(position: &Position, scores: &PieceScores) -> (f64, f64) {
    scores.iter().fold((0.0, 0.0), |(w, b), (piece, s)| {
        (
            w + position.piece_count(piece, Color::White) as f64 * s,
            b + position.piece_count(piece, Color::Black) as f64 * s,
        )
    })
}

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    pub piece_scores: PieceScores,
    pub end_scores: EndScores,
    pub claim_draw: bool,
}

impl Evaluator {
    pub fn new(piece_scores: PieceScores, end_scores: EndScores, claim_draw: bool) -> Self {
        Self { piece_scores, end_scores, claim_draw }
    }

    /// The end score of a decided position, `None` while undecided.
    pub fn outcome_score(&self, position: &Position, perspective: Color) -> Option<f64> {
        if position.is_draw(self.claim_draw) {
            return Some(self.end_scores.tie);
        }
        match position.winner() {
            Some(side) if side == perspective => Some(self.end_scores.win),
            Some(_) => Some(self.end_scores.lose),
            None => None,
        }
    }

    /// Score of `position` for `perspective`, without jitter.
    pub fn evaluate(&self, position: &Position, perspective: Color) -> f64 {
        self.outcome_score(position, perspective)
            .unwrap_or_else(|| material_balance(position, perspective, &self.piece_scores))
    }

    /// Like `evaluate`, plus a [0,1) perturbation on undecided positions so
    /// equal-material candidates do not always resolve the same way.
    pub fn evaluate_jittered<R: Rng + ?Sized>(
        &self,
        position: &Position,
        perspective: Color,
        rng: &mut R,
    ) -> f64 {
        match self.outcome_score(position, perspective) {
            Some(score) => score,
            None => rng.gen::<f64>() + material_balance(position, perspective, &self.piece_scores),
        }
    }
}
