use crate::board::Board;
use std::time::Instant;

/// Count the leaf positions of the legal-move tree. Multi-jump
/// sequences count as one move, as they are generated.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in board.generate_moves() {
        board.make(m);
        nodes += perft(board, depth - 1);
        board.unmake();
    }
    nodes
}

/// Node count per first move, for narrowing down generator bugs.
pub fn perft_divide(board: &mut Board, depth: u32) {
    println!("--- Perft Divide Depth {} ---", depth);
    let mut total = 0;
    for m in board.generate_moves() {
        board.make(m);
        let count = perft(board, depth - 1);
        board.unmake();
        println!("{}: {}", m, count);
        total += count;
    }
    println!("Total: {}", total);
}

pub fn run_perft_suite() {
    println!("--- Ember Perft Suite ---");

    let positions: [(&str, &str, &[u64]); 2] = [
        (
            "Opening Position",
            "B:W21,22,23,24,25,26,27,28,29,30,31,32:B1,2,3,4,5,6,7,8,9,10,11,12",
            &[1, 7, 49, 302, 1469, 7361, 36768, 179740],
        ),
        (
            "Two Men Each",
            "W:W21,22:B1,2",
            &[1, 3, 12],
        ),
    ];

    let mut total_nodes = 0;
    let mut total_time = 0;

    for (name, fen, expected) in positions.iter() {
        println!("\nTesting: {}", name);
        let mut board = Board::from_fen(fen).expect("suite position parses");

        let depth = expected.len() - 1;
        let start = Instant::now();
        let nodes = perft(&mut board, depth as u32);
        let elapsed = start.elapsed().as_millis();

        total_nodes += nodes;
        total_time += elapsed;

        println!("Depth {}: Nodes: {} Time: {}ms", depth, nodes, elapsed);

        if nodes == expected[depth] {
            println!("RESULT: PASS");
        } else {
            println!("RESULT: FAIL (Expected {})", expected[depth]);
            perft_divide(&mut board, depth as u32);
        }
    }

    println!("\n--- SUITE COMPLETE ---");
    println!("Total Nodes: {}", total_nodes);
    println!("Total Time:  {}ms", total_time);
    if total_time > 0 {
        println!("NPS:         {}", (total_nodes as u128 * 1000) / total_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_opening() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 1), 7);
        assert_eq!(perft(&mut board, 2), 49);
        assert_eq!(perft(&mut board, 3), 302);
        assert_eq!(perft(&mut board, 4), 1469);
        assert_eq!(perft(&mut board, 5), 7361);
        // Depth 6 (36768) runs in the suite; it is slow under debug.
    }

    #[test]
    fn perft_leaves_the_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        let _ = perft(&mut board, 4);
        assert_eq!(board.pieces, before.pieces);
        assert_eq!(board.kings, before.kings);
        assert_eq!(board.side_to_move, before.side_to_move);
        assert_eq!(board.history.len(), 0);
    }

    #[test]
    fn perft_forced_capture_line() {
        // One forced double jump, then white is out of pieces.
        let mut board = Board::from_fen("B:W14,22:B10").unwrap();
        assert_eq!(perft(&mut board, 1), 1);
        assert_eq!(perft(&mut board, 2), 0);
    }
}
