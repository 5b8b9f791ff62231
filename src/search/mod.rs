pub mod alphabeta;
pub mod order;
pub mod trace;

pub use alphabeta::{SearchResult, Searcher};
pub use order::{order_moves, order_rank};
pub use trace::{MoveTrace, TraceSink};
