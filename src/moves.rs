use std::fmt;

use crate::bitboard::{Bitboard, EMPTY};

/// One legal move: a slide, or a complete (maximal) jump sequence.
///
/// A jump sequence is a single `Move` whose `orig` is the first square,
/// `dest` the final landing square and `capture` the union of all jumped
/// squares. `captured_kings` is the subset of `capture` that held enemy
/// kings when the move was generated; unmaking restores exactly those
/// bits to the enemy king board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub orig: Bitboard,
    pub dest: Bitboard,
    pub capture: Bitboard,
    pub captured_kings: Bitboard,
    pub will_crown: bool,
}

impl Move {
    pub fn slide(orig: Bitboard, dest: Bitboard, will_crown: bool) -> Move {
        Move {
            orig,
            dest,
            capture: EMPTY,
            captured_kings: EMPTY,
            will_crown,
        }
    }

    pub fn jump(
        orig: Bitboard,
        dest: Bitboard,
        capture: Bitboard,
        captured_kings: Bitboard,
        will_crown: bool,
    ) -> Move {
        Move {
            orig,
            dest,
            capture,
            captured_kings,
            will_crown,
        }
    }

    #[inline(always)]
    pub fn is_jump(&self) -> bool {
        self.capture.any()
    }

    #[inline(always)]
    pub fn captured_a_king(&self) -> bool {
        self.captured_kings.any()
    }

    /// The squares visited by this move in order, origin first.
    ///
    /// For jumps the intermediate landings are not stored, so they are
    /// rebuilt by walking the capture set: from each visited square, try
    /// the four diagonals for a captured piece with a landing beyond it,
    /// and keep the walk that consumes every capture and ends on `dest`.
    pub fn path(&self) -> Vec<u32> {
        let mut path = vec![self.orig.square()];
        if !self.is_jump() {
            path.push(self.dest.square());
            return path;
        }
        if !walk(self.orig, self.dest, self.capture, &mut path) {
            // No consistent ordering found; degrade to the endpoints.
            path.truncate(1);
            path.push(self.dest.square());
        }
        path
    }
}

fn walk(cur: Bitboard, dest: Bitboard, remaining: Bitboard, path: &mut Vec<u32>) -> bool {
    if remaining.is_empty() {
        return cur == dest;
    }
    let steps = [
        (cur.left_forward(), Bitboard::left_forward as fn(Bitboard) -> Bitboard),
        (cur.right_forward(), Bitboard::right_forward),
        (cur.left_backward(), Bitboard::left_backward),
        (cur.right_backward(), Bitboard::right_backward),
    ];
    for (over, shift) in steps {
        let jumped = over & remaining;
        if jumped.is_empty() {
            continue;
        }
        let landing = shift(jumped);
        if landing.is_empty() {
            continue;
        }
        path.push(landing.square());
        if walk(landing, dest, remaining & !jumped, path) {
            return true;
        }
        path.pop();
    }
    false
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_jump() { 'x' } else { '-' };
        let path = self.path();
        let mut first = true;
        for sq in path {
            if !first {
                write!(f, "{}", sep)?;
            }
            write!(f, "{}", sq)?;
            first = false;
        }
        Ok(())
    }
}

/// A syntactically valid move token from the command stream, e.g.
/// `11-15`, `11x18` or `11x18x25`. Not yet checked for legality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveToken {
    pub squares: Vec<u32>,
    pub is_jump: bool,
}

impl MoveToken {
    pub fn parse(token: &str) -> Option<MoveToken> {
        let is_jump = token.contains('x');
        let sep = if is_jump { 'x' } else { '-' };
        let mut squares = Vec::new();
        for part in token.split(sep) {
            let sq: u32 = part.parse().ok()?;
            if !(1..=32).contains(&sq) {
                return None;
            }
            squares.push(sq);
        }
        if squares.len() < 2 || (!is_jump && squares.len() != 2) {
            return None;
        }
        Some(MoveToken { squares, is_jump })
    }

    pub fn orig(&self) -> u32 {
        self.squares[0]
    }

    pub fn dest(&self) -> u32 {
        *self.squares.last().unwrap()
    }

    /// True if `m` is the move this token denotes. Endpoints and move
    /// kind must agree; when the token spells out intermediate landings
    /// they must match the reconstructed path as well.
    pub fn matches(&self, m: &Move) -> bool {
        if self.is_jump != m.is_jump()
            || self.orig() != m.orig.square()
            || self.dest() != m.dest.square()
        {
            return false;
        }
        if self.squares.len() > 2 {
            return m.path() == self.squares;
        }
        true
    }
}

/// Quick shape check used by the command dispatcher to tell move tokens
/// from command words.
pub fn looks_like_move(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
        && (token.contains('-') || token.contains('x'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Bitboard;

    fn sq(n: u32) -> Bitboard {
        Bitboard::from_square(n).unwrap()
    }

    #[test]
    fn slide_text() {
        let m = Move::slide(sq(11), sq(15), false);
        assert_eq!(m.to_string(), "11-15");
    }

    #[test]
    fn single_jump_text() {
        // 10 jumps over 14 and lands on 17.
        let m = Move::jump(sq(10), sq(17), sq(14), crate::bitboard::EMPTY, false);
        assert_eq!(m.to_string(), "10x17");
    }

    #[test]
    fn chained_jump_text_rebuilds_the_path() {
        // 10 over 14 to 17, then over 22 to 26.
        let m = Move::jump(
            sq(10),
            sq(26),
            sq(14) | sq(22),
            crate::bitboard::EMPTY,
            false,
        );
        assert_eq!(m.to_string(), "10x17x26");
        assert_eq!(m.path(), vec![10, 17, 26]);
    }

    #[test]
    fn token_parsing() {
        let t = MoveToken::parse("11-15").unwrap();
        assert!(!t.is_jump);
        assert_eq!((t.orig(), t.dest()), (11, 15));

        let t = MoveToken::parse("11x18x25").unwrap();
        assert!(t.is_jump);
        assert_eq!(t.squares, vec![11, 18, 25]);

        assert!(MoveToken::parse("0-15").is_none());
        assert!(MoveToken::parse("11-33").is_none());
        assert!(MoveToken::parse("11-15-18").is_none());
        assert!(MoveToken::parse("11").is_none());
        assert!(MoveToken::parse("pong").is_none());
    }

    #[test]
    fn token_matching_uses_intermediate_squares() {
        let m = Move::jump(
            sq(10),
            sq(26),
            sq(14) | sq(22),
            crate::bitboard::EMPTY,
            false,
        );
        assert!(MoveToken::parse("10x26").unwrap().matches(&m));
        assert!(MoveToken::parse("10x17x26").unwrap().matches(&m));
        assert!(!MoveToken::parse("10x19x26").unwrap().matches(&m));
        assert!(!MoveToken::parse("10-26").unwrap().matches(&m));
    }

    #[test]
    fn move_shapes() {
        assert!(looks_like_move("11-15"));
        assert!(looks_like_move("3x12"));
        assert!(!looks_like_move("go"));
        assert!(!looks_like_move("x11"));
    }
}
