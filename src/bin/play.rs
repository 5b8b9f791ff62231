use anyhow::Context;
use chessbot::config::{EndScores, EngineConfig, PieceScores, DEFAULT_DEPTH};
use chessbot::game::{assign_colors, Game};
use chessbot::player::{build_player, PlayerKind};
use chessbot::position::Position;
use clap::Parser;
use cozy_chess::Color;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play one game between two chess policies (random, greedy, minimax, human)")]
struct Args {
    /// Policy playing white
    #[arg(long, default_value = "greedy")]
    white: PlayerKind,

    /// Policy playing black
    #[arg(long, default_value = "minimax")]
    black: PlayerKind,

    /// Flip a coin for which policy takes white
    #[arg(long)]
    random_colors: bool,

    /// Search depth in plies for minimax players
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Random seed (omit for a fresh game every run)
    #[arg(long)]
    seed: Option<u64>,

    /// Start from this FEN instead of the initial position
    #[arg(long)]
    fen: Option<String>,

    /// Piece weights, e.g. "pawn=1,knight=5,bishop=4,rook=3,queen=10,king=50"
    #[arg(long)]
    piece_scores: Option<String>,

    #[arg(long, default_value_t = 100.0)]
    win: f64,
    #[arg(long, default_value_t = -100.0, allow_hyphen_values = true)]
    lose: f64,
    #[arg(long, default_value_t = 0.0)]
    tie: f64,

    /// Score claimable draws (threefold, fifty-move) as ties during search
    #[arg(long)]
    claim_draw: bool,

    /// Add evaluation jitter at search leaves
    #[arg(long)]
    search_jitter: bool,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<usize>,

    /// Log every move explored by minimax players
    #[arg(long)]
    verbose: bool,

    /// Print the game record as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let piece_scores = match args.piece_scores.as_deref() {
        Some(s) => s.parse::<PieceScores>()?,
        None => PieceScores::default(),
    };
    let config = EngineConfig {
        piece_scores: piece_scores.clone(),
        end_scores: EndScores { win: args.win, lose: args.lose, tie: args.tie },
        depth: args.depth,
        claim_draw: args.claim_draw,
        search_jitter: args.search_jitter,
        seed: args.seed,
    };
    config.validate()?;

    let start = match args.fen.as_deref() {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };

    let (white_kind, black_kind) = if args.random_colors {
        let mut rng = match args.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        assign_colors(args.white, args.black, &mut rng)
    } else {
        (args.white, args.black)
    };

    let mut white = build_player(white_kind, Color::White, &config, args.verbose)?;
    let mut black = build_player(black_kind, Color::Black, &config, args.verbose)?;

    let game = Game::new(start).with_max_plies(args.max_plies).with_piece_scores(piece_scores);
    let record = game.play(white.as_mut(), black.as_mut()).context("game aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!(
            "white={} black={} outcome={:?} plies={} time={:.2}s",
            record.white, record.black, record.outcome, record.plies, record.elapsed_secs
        );
        println!("final: {}", record.fen);
        println!("moves: {}", record.moves.join(" "));
    }
    Ok(())
}
