pub mod bitboard;
pub mod board;
pub mod debug;
pub mod engine;
pub mod eval;
pub mod logging;
pub mod moves;
pub mod parameters;
pub mod perft;
pub mod search;

use std::env;
use std::thread;
use std::time::Instant;

use crate::board::{Board, BLACK};
use crate::parameters::EvalWeights;

const BENCH_DEPTH: i32 = 11;

pub fn run_cli() {
    logging::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "perft" => {
                perft::run_perft_suite();
                return;
            }
            "bench" => {
                run_bench();
                return;
            }
            "eval" => {
                run_eval(args.get(2).map(String::as_str));
                return;
            }
            "params" => {
                let path = args.get(2).map(String::as_str).unwrap_or("ember.json");
                if let Err(e) = EvalWeights::default().save_to_json(path) {
                    eprintln!("Error: cannot write {}: {}", path, e);
                    std::process::exit(255);
                }
                println!("wrote default weights to {}", path);
                return;
            }
            other => {
                eprintln!("Error: unknown argument: {}", other);
                eprintln!("Usage: ember [perft|bench|eval [FEN]|params [FILE]]");
                std::process::exit(255);
            }
        }
    }

    // Plenty of stack for the recursive search.
    let builder = thread::Builder::new()
        .name("engine_thread".into())
        .stack_size(32 * 1024 * 1024);

    let handler = builder
        .spawn(|| {
            let mut engine = engine::Engine::new();
            engine.run()
        })
        .unwrap();

    let code = handler.join().unwrap();
    if code != 0 {
        std::process::exit(code);
    }
}

fn run_bench() {
    println!("Running Benchmark: Opening Position Depth {}", BENCH_DEPTH);
    let board = Board::new();
    let mut post = search::PostProgress;
    let start = Instant::now();
    let (score, pv) = search::think(
        &board,
        BENCH_DEPTH,
        3600,
        &EvalWeights::default(),
        Some(&mut post),
    );
    println!(
        "score {} best {} in {}ms",
        score,
        pv.first().map(|m| m.to_string()).unwrap_or_default(),
        start.elapsed().as_millis()
    );
}

fn run_eval(fen: Option<&str>) {
    let board = match fen {
        Some(f) => match Board::from_fen(f) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error: bad position: {}", e);
                std::process::exit(255);
            }
        },
        None => Board::new(),
    };
    print!("{}", board.render(false));
    println!(
        "side to move: {}",
        if board.side_to_move == BLACK { "black" } else { "white" }
    );
    let weights = EvalWeights::default();
    println!("score: {}", eval::evaluate(&board, &weights));
}
