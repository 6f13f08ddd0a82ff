#[cfg(debug_assertions)]
use crate::bitboard::{BLACK_KINGS_ROW, WHITE_KINGS_ROW};
#[cfg(debug_assertions)]
use crate::board::{Board, BLACK, WHITE};

/// Debug-build invariant check run after every make/unmake. A violation
/// here is an engine bug, never a protocol error, so it dumps the board
/// and aborts.
#[cfg(debug_assertions)]
pub fn validate_board(board: &Board) {
    let mut broken = Vec::new();

    if (board.pieces[BLACK] & board.pieces[WHITE]).any() {
        broken.push("black and white overlap");
    }
    if (board.kings[BLACK] & !board.pieces[BLACK]).any() {
        broken.push("black king off a black piece");
    }
    if (board.kings[WHITE] & !board.pieces[WHITE]).any() {
        broken.push("white king off a white piece");
    }
    if ((board.pieces[BLACK] & !board.kings[BLACK]) & BLACK_KINGS_ROW).any() {
        broken.push("uncrowned black man on the black kings row");
    }
    if ((board.pieces[WHITE] & !board.kings[WHITE]) & WHITE_KINGS_ROW).any() {
        broken.push("uncrowned white man on the white kings row");
    }
    if board.side_to_move > WHITE {
        broken.push("bad side to move");
    }

    if !broken.is_empty() {
        eprintln!("CRITICAL: board invariant violated!");
        for b in &broken {
            eprintln!("  - {}", b);
        }
        eprintln!("FEN: {}", board.to_fen());
        eprint!("{}", board.render(false));
        panic!("board invariant violated: {}", broken.join(", "));
    }
}
