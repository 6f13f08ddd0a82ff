use std::io::{self, BufRead};

use crate::board::{Board, BLACK, WHITE};
use crate::moves::{looks_like_move, MoveToken};
use crate::parameters::EvalWeights;
use crate::search::{self, PostProgress, Progress};

const UNLIMITED: i32 = 999_999;
const DEFAULT_TIME: u64 = 10;
const WEIGHTS_FILE: &str = "ember.json";

/// What the command loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// Protocol-level failures. Formatted into a reply and forgotten; they
// never unwind into the engine state.
enum CommandError {
    Malformed,
    IllegalMove(String),
}

/// The engine facade: one owned board plus the protocol switches. Reads
/// commands line by line and answers on stdout.
pub struct Engine {
    board: Board,
    rotate: bool,
    force_mode: bool,
    engine_side: usize,
    depth_limit: i32,
    time_limit: u64,
    verbose: bool,
    game_over: bool,
    weights: EvalWeights,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Engine {
        Engine {
            board: Board::new(),
            rotate: false,
            force_mode: false,
            engine_side: WHITE,
            depth_limit: UNLIMITED,
            time_limit: DEFAULT_TIME,
            verbose: false,
            game_over: false,
            weights: EvalWeights::load_or_default(WEIGHTS_FILE),
        }
    }

    /// Command loop. Returns the process exit code: 0 after `quit`, 255
    /// when the input channel fails or closes without one.
    pub fn run(&mut self) -> i32 {
        let stdin = io::stdin();
        let mut buffer = String::new();
        loop {
            buffer.clear();
            match stdin.lock().read_line(&mut buffer) {
                Ok(0) => {
                    log::warn!("input closed without quit");
                    return 255;
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("input error: {}", e);
                    return 255;
                }
            }
            if self.handle_line(&buffer) == Flow::Quit {
                return 0;
            }
        }
    }

    /// Dispatch one protocol line, then give the engine its turn.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }
        log::debug!("command: {}", line);

        let parts: Vec<&str> = line.split_whitespace().collect();
        let result = match parts[0] {
            "analyze" => Ok(()),
            "black" => {
                self.board.side_to_move = BLACK;
                self.engine_side = WHITE;
                Ok(())
            }
            "white" => {
                self.board.side_to_move = WHITE;
                self.engine_side = BLACK;
                Ok(())
            }
            "force" => {
                self.force_mode = true;
                Ok(())
            }
            "go" => {
                self.force_mode = false;
                self.engine_side = self.board.side_to_move;
                Ok(())
            }
            "new" => {
                self.board = Board::new();
                self.force_mode = false;
                self.engine_side = WHITE;
                self.game_over = false;
                Ok(())
            }
            "ping" => match parts.get(1) {
                Some(n) => {
                    println!("pong {}", n);
                    Ok(())
                }
                None => Err(CommandError::Malformed),
            },
            "print" => {
                print!("{}", self.board.render(self.rotate));
                Ok(())
            }
            "rotate" => {
                self.rotate = !self.rotate;
                print!("{}", self.board.render(self.rotate));
                Ok(())
            }
            "sd" => self.set_depth(parts.get(1)),
            "st" => self.set_time(parts.get(1)),
            "setboard" => self.set_board(parts.get(1)),
            "undo" => {
                if self.board.unmake().is_some() {
                    self.game_over = false;
                }
                Ok(())
            }
            "history" => {
                for (i, m) in self.board.history.iter().enumerate() {
                    println!("{:3}. {}", i + 1, m);
                }
                Ok(())
            }
            "verbose" => {
                self.verbose = true;
                Ok(())
            }
            "quiet" => {
                self.verbose = false;
                Ok(())
            }
            "help" => {
                print_help();
                Ok(())
            }
            "quit" => return Flow::Quit,
            token if looks_like_move(token) => self.human_move(token),
            _ => Err(CommandError::Malformed),
        };

        match result {
            Ok(()) => self.engine_turn(),
            Err(CommandError::Malformed) => println!("Error (unknown command): {}", line),
            Err(CommandError::IllegalMove(token)) => println!("Illegal move: {}", token),
        }
        Flow::Continue
    }

    fn set_depth(&mut self, arg: Option<&&str>) -> Result<(), CommandError> {
        match arg.and_then(|a| a.parse::<i32>().ok()) {
            Some(d) if (1..=search::MAX_DEPTH).contains(&d) => {
                self.depth_limit = d;
                Ok(())
            }
            _ => Err(CommandError::Malformed),
        }
    }

    fn set_time(&mut self, arg: Option<&&str>) -> Result<(), CommandError> {
        match arg.and_then(|a| a.parse::<u64>().ok()) {
            Some(s) if s <= UNLIMITED as u64 => {
                self.time_limit = s;
                Ok(())
            }
            _ => Err(CommandError::Malformed),
        }
    }

    fn set_board(&mut self, arg: Option<&&str>) -> Result<(), CommandError> {
        let fen = arg.ok_or(CommandError::Malformed)?;
        match Board::from_fen(fen) {
            Ok(board) => {
                self.board = board;
                self.game_over = false;
                Ok(())
            }
            Err(e) => {
                log::warn!("setboard rejected: {}", e);
                Err(CommandError::Malformed)
            }
        }
    }

    fn human_move(&mut self, token: &str) -> Result<(), CommandError> {
        let parsed = MoveToken::parse(token)
            .ok_or_else(|| CommandError::IllegalMove(token.to_string()))?;
        let legal = self.board.generate_moves();
        let m = legal
            .iter()
            .find(|m| parsed.matches(m))
            .copied()
            .ok_or_else(|| CommandError::IllegalMove(token.to_string()))?;
        self.apply_move(m);
        Ok(())
    }

    fn apply_move(&mut self, m: crate::moves::Move) {
        log::info!("move {} by {}", m, side_name(self.board.side_to_move));
        self.board.make(m);
        if self.board.generate_moves().is_empty() {
            self.announce_result();
        }
    }

    // If it is the engine's turn, think and answer with a move.
    fn engine_turn(&mut self) {
        if self.force_mode || self.game_over || self.board.side_to_move != self.engine_side {
            return;
        }
        if self.board.generate_moves().is_empty() {
            self.announce_result();
            return;
        }
        let mut post = PostProgress;
        let progress: Option<&mut dyn Progress> =
            if self.verbose { Some(&mut post) } else { None };
        let (score, pv) = search::think(
            &self.board,
            self.depth_limit,
            self.time_limit,
            &self.weights,
            progress,
        );
        let Some(&m) = pv.first() else {
            self.announce_result();
            return;
        };
        log::info!("playing {} (score {})", m, score);
        println!("move {}", m);
        self.apply_move(m);
    }

    // The player to move is out of moves and loses.
    fn announce_result(&mut self) {
        if self.board.side_to_move == BLACK {
            println!("RESULT 1-0 {{White wins}}");
        } else {
            println!("RESULT 0-1 {{Black wins}}");
        }
        self.game_over = true;
    }
}

fn side_name(side: usize) -> &'static str {
    if side == BLACK {
        "black"
    } else {
        "white"
    }
}

fn print_help() {
    println!("analyze          enter analysis mode");
    println!("black            black to move; engine plays white");
    println!("white            white to move; engine plays black");
    println!("force            accept moves for both sides");
    println!("go               engine plays the side to move");
    println!("new              start a new game");
    println!("ping N           answer pong N");
    println!("print            show the board");
    println!("rotate           flip the board display");
    println!("sd D             search depth limit (1..999)");
    println!("st S             search time limit in seconds");
    println!("setboard FEN     load a position, e.g. B:W21,K30:B1,2");
    println!("undo             take back the last move");
    println!("history          show the moves played so far");
    println!("verbose | quiet  toggle search progress output");
    println!("quit             exit");
    println!("11-15, 11x18x25  play a move");
}
