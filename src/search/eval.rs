use cozy_chess::{Color, Piece};

use crate::board::{Cells, Position};
use crate::error::Result;

pub const PAWN: i32 = 100;
pub const KNIGHT: i32 = 320;
pub const BISHOP: i32 = 330;
pub const ROOK: i32 = 500;
pub const QUEEN: i32 = 900;
pub const KING: i32 = 20_000;

/// Bound used in place of infinity by the search; larger than any evaluation.
pub const SCORE_INF: i32 = 1_000_000;

// Piece-square bonuses indexed a8 = 0 .. h1 = 63. Both colours read the same
// cell of the same table; only the sign differs.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5,  5,  5, -5, -5,  0,  0,  0,
     2,  2,  2,  2,  2,  2, -2, -2,
     1,  1,  1,  2,  2,  1,  1,  1,
     1,  1,  2,  3,  3,  2,  1,  1,
     2,  2,  2,  4,  4,  2,  2,  2,
     5,  5,  5,  6,  6,  5,  5,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -5, -4, -2, -2, -2, -2, -4, -5,
    -4,  0,  0,  0,  0,  0,  0, -4,
    -2,  0,  1,  2,  2,  1,  0, -2,
    -2,  0,  2,  3,  3,  2,  0, -2,
    -2,  0,  2,  3,  3,  2,  0, -2,
    -2,  0,  1,  2,  2,  1,  0, -2,
    -4,  0,  0,  0,  0,  0,  0, -4,
    -5, -4, -2, -2, -2, -2, -4, -5,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -2, -1, -1, -1, -1, -1, -1, -2,
    -1,  1,  0,  0,  0,  0,  1, -1,
    -1,  2,  2,  2,  2,  2,  2, -1,
    -1,  2,  3,  2,  2,  3,  2, -1,
    -1,  2,  3,  2,  2,  3,  2, -1,
    -1,  2,  2,  2,  2,  2,  2, -1,
    -1,  1,  0,  0,  0,  0,  1, -1,
    -2, -1, -1, -1, -1, -1, -1, -2,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
     0,  0,  1,  2,  2,  1,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -2, -1, -1,  0,  0, -1, -1, -2,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
     0,  0,  1,  1,  1,  1,  0,  0,
     0,  0,  1,  1,  1,  1,  0,  0,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -1,  0,  1,  1,  1,  1,  0, -1,
    -2, -1, -1,  0,  0, -1, -1, -2,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -3, -4, -4, -5, -5, -4, -4, -3,
    -2, -3, -3, -4, -4, -3, -3, -2,
    -1, -2, -2, -2, -2, -2, -2, -1,
     2,  2,  0,  0,  0,  0,  2,  2,
     2,  3,  1,  0,  0,  1,  3,  2,
];

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

fn table(piece: Piece) -> &'static [i32; 64] {
    match piece {
        Piece::Pawn => &PAWN_TABLE,
        Piece::Knight => &KNIGHT_TABLE,
        Piece::Bishop => &BISHOP_TABLE,
        Piece::Rook => &ROOK_TABLE,
        Piece::Queen => &QUEEN_TABLE,
        Piece::King => &KING_TABLE,
    }
}

/// Material plus placement bonus for one piece on cell `idx`, signed so that
/// White is positive.
#[inline]
pub fn piece_square_value(color: Color, piece: Piece, idx: usize) -> i32 {
    let v = piece_value(piece) + table(piece)[idx];
    if color == Color::White { v } else { -v }
}

/// Static score of a cell array, always from White's point of view.
pub fn evaluate(cells: &Cells) -> i32 {
    cells.iter().map(|(idx, (color, piece))| piece_square_value(color, piece, idx)).sum()
}

/// Never normalised to the side to move.
pub fn eval_cp(pos: &Position) -> i32 {
    evaluate(&pos.cells())
}

/// Evaluate a raw FEN placement without consulting the rules engine.
pub fn evaluate_fen(fen: &str) -> Result<i32> {
    Ok(evaluate(&Cells::from_fen(fen)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_kings_score_only_placement() {
        // White king h1 (63) = +2, black king a8 (0) = -(-3)
        let s = evaluate_fen("k7/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        assert_eq!(s, 2 + 3);
    }

    #[test]
    fn black_uses_same_cell_negated() {
        assert_eq!(piece_square_value(Color::White, Piece::Knight, 0), KNIGHT - 5);
        assert_eq!(piece_square_value(Color::Black, Piece::Knight, 0), -(KNIGHT - 5));
    }
}
