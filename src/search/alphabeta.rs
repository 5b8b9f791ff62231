use crate::config::EngineConfig;
use crate::eval::Evaluator;
use crate::position::Position;
use crate::search::order::order_moves;
use crate::search::trace::{log_sink, MoveTrace, TraceSink};
use cozy_chess::{Color, Move, Piece};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Score from the perspective player's side.
    pub score: f64,
    /// `None` at terminal or depth-0 roots.
    pub best_move: Option<Move>,
    pub nodes: u64,
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// The perspective player stays fixed for the whole tree; a node maximizes
/// when that player is on move and minimizes otherwise. Children are searched
/// in `order_moves` order on independent position copies.
pub struct Searcher {
    evaluator: Evaluator,
    search_jitter: bool,
    pruning: bool,
    rng: SmallRng,
    nodes: u64,
    tracer: Option<TraceSink>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(&EngineConfig::default(), SmallRng::seed_from_u64(0))
    }
}

impl Searcher {
    pub fn new(config: &EngineConfig, rng: SmallRng) -> Self {
        Self {
            evaluator: Evaluator::new(config.piece_scores.clone(), config.end_scores, config.claim_draw),
            search_jitter: config.search_jitter,
            pruning: true,
            rng,
            nodes: 0,
            tracer: None,
        }
    }

    pub fn evaluator(&self) -> &Evaluator { &self.evaluator }
    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn set_seed(&mut self, seed: u64) { self.rng = SmallRng::seed_from_u64(seed); }
    pub fn set_pruning(&mut self, on: bool) { self.pruning = on; }
    pub fn set_search_jitter(&mut self, on: bool) { self.search_jitter = on; }

    pub fn set_tracer<F>(&mut self, tracer: Option<F>)
    where
        F: FnMut(&MoveTrace) + 'static,
    {
        self.tracer = tracer.map(|f| Box::new(f) as TraceSink);
    }

    /// Verbose mode: trace every explored move through `log`.
    pub fn set_verbose(&mut self, on: bool) {
        self.tracer = if on { Some(log_sink()) } else { None };
    }

    pub fn search(&mut self, position: &Position, perspective: Color, depth: u32) -> SearchResult {
        self.search_window(position, perspective, depth, f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn search_window(
        &mut self,
        position: &Position,
        perspective: Color,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> SearchResult {
        self.nodes = 0;
        let (score, best_move) = self.minimax(position, perspective, depth, alpha, beta);
        log::debug!(
            "search depth={} score={:.2} best={} nodes={}",
            depth,
            score,
            best_move.map(|m| position.uci(m)).unwrap_or_else(|| "none".into()),
            self.nodes
        );
        SearchResult { score, best_move, nodes: self.nodes }
    }

    fn leaf_score(&mut self, position: &Position, perspective: Color) -> f64 {
        if self.search_jitter {
            self.evaluator.evaluate_jittered(position, perspective, &mut self.rng)
        } else {
            self.evaluator.evaluate(position, perspective)
        }
    }

    fn minimax(
        &mut self,
        position: &Position,
        perspective: Color,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> (f64, Option<Move>) {
        self.nodes += 1;
        if depth == 0 || position.is_game_over(self.evaluator.claim_draw) {
            return (self.leaf_score(position, perspective), None);
        }

        // First move of the game: pick any legal move to vary openings.
        if position.is_start_position() {
            let moves = position.legal_moves();
            return (0.0, moves.choose(&mut self.rng).copied());
        }

        let moves = order_moves(position);
        let maximizing = position.side_to_move() == perspective;
        let mut best_score = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut best_move: Option<Move> = None;

        for &(mv, piece) in &moves {
            let child = position.child(mv);
            let (score, _) = self.minimax(&child, perspective, depth - 1, alpha, beta);
            self.trace(position, &child, moves.len(), depth, piece, mv, score);

            // Later moves win ties.
            if maximizing {
                if score >= best_score { best_score = score; best_move = Some(mv); }
                alpha = alpha.max(score);
            } else {
                if score <= best_score { best_score = score; best_move = Some(mv); }
                beta = beta.min(score);
            }
            // Equal bounds keep searching so ties resolve as in full minimax.
            if self.pruning && beta < alpha { break; }
        }

        if best_move.is_none() {
            return (self.leaf_score(position, perspective), None);
        }
        (best_score, best_move)
    }

    fn trace(
        &mut self,
        parent: &Position,
        child: &Position,
        candidates: usize,
        depth: u32,
        piece: Piece,
        mv: Move,
        score: f64,
    ) {
        if let Some(sink) = self.tracer.as_mut() {
            let t = MoveTrace { to_move: child.side_to_move(), candidates, depth, piece, mv: parent.uci(mv), score };
            sink(&t);
        }
    }
}
