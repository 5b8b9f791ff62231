// Minimax chess players over the cozy_chess rules engine
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod player;
pub mod position;
pub mod search;

pub use config::{EndScores, EngineConfig, PieceScores};
pub use error::{Error, Result};
pub use eval::{material_balance, material_totals, Evaluator};
pub use game::{Game, GameRecord, Outcome};
pub use player::{GreedyPlayer, HumanPlayer, MiniMaxPlayer, Player, PlayerKind, RandomPlayer};
pub use position::Position;
pub use search::{SearchResult, Searcher};
