use crate::position::Position;
use cozy_chess::{Move, Piece};
use std::cmp::Reverse;

/// Fixed ordering rank of the moving piece; higher is searched first.
#[inline]
pub fn order_rank(piece: Piece) -> u8 {
    match piece {
        Piece::King => 6,
        Piece::Queen => 5,
        Piece::Rook => 4,
        Piece::Bishop => 3,
        Piece::Knight => 2,
        Piece::Pawn => 1,
    }
}

/// Legal moves tagged with the moving piece, highest rank first. The sort is
/// stable so equal ranks keep the generator's order.
pub fn order_moves(position: &Position) -> Vec<(Move, Piece)> {
    let mut moves = position.legal_moves_with_piece();
    moves.sort_by_key(|&(_, p)| Reverse(order_rank(p)));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descend_from_king_to_pawn() {
        let ranks: Vec<u8> = [Piece::King, Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight, Piece::Pawn]
            .iter()
            .map(|&p| order_rank(p))
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn start_position_puts_knights_before_pawns() {
        let pos = Position::startpos();
        let ordered = order_moves(&pos);
        assert_eq!(ordered.len(), 20);
        assert!(ordered[..4].iter().all(|&(_, p)| p == Piece::Knight));
        assert!(ordered[4..].iter().all(|&(_, p)| p == Piece::Pawn));
    }
}
