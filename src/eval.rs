use crate::bitboard::EDGES;
use crate::board::{crowning_row, Board};
use crate::parameters::EvalWeights;

/// Static evaluation from the side-to-move's perspective: positive when
/// the player to move is ahead. Four features, each `us - them`:
///
///   piece_strength  1 per man, 2 per king
///   movers          pieces with a legal non-capture step
///   kings_row       own pieces parked on the opponent's crowning row
///   edges           own pieces on the board rim
///
/// The board is never mutated.
pub fn evaluate(board: &Board, weights: &EvalWeights) -> i32 {
    let us = board.side_to_move;
    let them = 1 - us;

    let piece_strength = (board.pieces[us].count() + board.kings[us].count()) as i32
        - (board.pieces[them].count() + board.kings[them].count()) as i32;

    let movers = board.movers(us).count() as i32 - board.movers(them).count() as i32;

    // Holding the opponent's crowning row denies them king squares.
    let kings_row = (board.pieces[us] & crowning_row(them)).count() as i32
        - (board.pieces[them] & crowning_row(us)).count() as i32;

    // Rim pieces cannot be captured; the engine counts that above the
    // mobility they give up.
    let edges = (board.pieces[us] & EDGES).count() as i32
        - (board.pieces[them] & EDGES).count() as i32;

    piece_strength * weights.piece_strength
        + movers * weights.movers
        + kings_row * weights.kings_row
        + edges * weights.edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Bitboard;
    use crate::board::{BLACK, WHITE};

    fn sq(n: u32) -> Bitboard {
        Bitboard::from_square(n).unwrap()
    }

    #[test]
    fn opening_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate(&board, &EvalWeights::default()), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric_in_the_side_to_move() {
        let mut board = Board::from_fen("B:W21,22,K30:B1,2,3,K7").unwrap();
        let weights = EvalWeights::default();
        let black_view = evaluate(&board, &weights);
        board.side_to_move = WHITE;
        assert_eq!(evaluate(&board, &weights), -black_view);
    }

    #[test]
    fn a_king_outweighs_a_man() {
        let weights = EvalWeights::default();
        let man = Board::from_fen("B:W24:B10").unwrap();
        let king = Board::from_fen("B:W24:BK10").unwrap();
        assert_eq!(
            evaluate(&king, &weights) - evaluate(&man, &weights),
            weights.piece_strength
        );
    }

    #[test]
    fn kings_row_and_edge_features_count_for_the_holder() {
        let weights = EvalWeights {
            piece_strength: 0,
            movers: 0,
            kings_row: 16,
            edges: 0,
        };
        // Black man on white's crowning row blocks white from crowning.
        let mut board = Board::clear();
        board.pieces[BLACK] = sq(2);
        board.pieces[WHITE] = sq(18);
        board.side_to_move = BLACK;
        assert_eq!(evaluate(&board, &weights), 16);

        let edge_weights = EvalWeights {
            piece_strength: 0,
            movers: 0,
            kings_row: 0,
            edges: 8,
        };
        let mut board = Board::clear();
        board.pieces[BLACK] = sq(13); // edge column
        board.pieces[WHITE] = sq(18); // center
        board.side_to_move = BLACK;
        assert_eq!(evaluate(&board, &edge_weights), 8);
    }

    #[test]
    fn evaluate_leaves_the_board_alone() {
        let board = Board::new();
        let copy = board.clone();
        let _ = evaluate(&board, &EvalWeights::default());
        assert_eq!(board.pieces, copy.pieces);
        assert_eq!(board.kings, copy.kings);
        assert_eq!(board.side_to_move, copy.side_to_move);
    }
}
