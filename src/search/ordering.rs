//! MVV-LVA ordering over the flat cell view.

use cozy_chess::Move;

use crate::board::notation::square_index;
use crate::board::Cells;
use crate::search::eval::piece_value;

fn from_to(mv: Move) -> (Option<usize>, Option<usize>) {
    let s = format!("{}", mv);
    (square_index(&s[0..2]), square_index(&s[2..4]))
}

/// A move captures when its destination holds a piece of the other colour.
/// En passant lands on an empty cell and is treated as quiet.
pub fn is_capture(cells: &Cells, mv: Move) -> bool {
    match from_to(mv) {
        (Some(from), Some(to)) => match (cells.get(from), cells.get(to)) {
            (Some((mover, _)), Some((victim, _))) => mover != victim,
            _ => false,
        },
        _ => false,
    }
}

/// Victim value minus attacker value; 0 for quiet moves.
pub fn mvv_lva(cells: &Cells, mv: Move) -> i32 {
    if !is_capture(cells, mv) { return 0; }
    let (from, to) = from_to(mv);
    let value_at = |idx: Option<usize>| idx.and_then(|i| cells.get(i)).map_or(0, |(_, p)| piece_value(p));
    value_at(to) - value_at(from)
}

/// Highest priority first; equal priorities keep their input order.
pub fn order_moves(cells: &Cells, mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|&m| -mvv_lva(cells, m));
    moves
}

/// Captures only, already ordered.
pub fn ordered_captures(cells: &Cells, moves: Vec<Move>) -> Vec<Move> {
    let caps = moves.into_iter().filter(|&m| is_capture(cells, m)).collect();
    order_moves(cells, caps)
}
