use cozy_chess::{Board as CozyBoard, Color, Move, Piece};

use crate::board::notation::{self, Cells};
use crate::error::{EngineError, Result};

/// Immutable game state backed by cozy-chess. Every transition returns a new
/// `Position`; nothing is mutated in place.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    /// Accepts FEN with absent trailing fields; see [`notation::normalize`].
    pub fn from_fen(fen: &str) -> Result<Self> {
        let full = notation::normalize(fen)?;
        CozyBoard::from_fen(&full, false)
            .map(|b| Self { board: b })
            .map_err(|e| EngineError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    /// Serialized notation; also the position cache key.
    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    pub fn cells(&self) -> Cells { Cells::from_board(&self.board) }

    /// Legal moves in generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { out.extend(ml); false });
        out
    }

    /// Child position after `mv`, or `IllegalMove` if the rules refuse it.
    pub fn apply(&self, mv: Move) -> Result<Position> {
        if !self.board.is_legal(mv) {
            return Err(EngineError::IllegalMove(format!("{}", mv)));
        }
        let mut child = self.board.clone();
        child.play_unchecked(mv);
        Ok(Self { board: child })
    }

    pub fn apply_uci(&self, mv_uci: &str) -> Result<Position> {
        let mv = self.parse_uci(mv_uci).ok_or_else(|| EngineError::IllegalMove(mv_uci.to_string()))?;
        self.apply(mv)
    }

    /// Resolve coordinate text against the legal moves. Castling is accepted
    /// both as king-two-squares (`e1g1`) and king-takes-rook (`e1h1`).
    pub fn parse_uci(&self, mv_uci: &str) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|&m| format!("{}", m) == mv_uci || self.to_uci(m) == mv_uci)
    }

    /// Standard coordinate text for `mv`; cozy-chess encodes castling as the
    /// king capturing its own rook, which is rewritten to the g/c file here.
    pub fn to_uci(&self, mv: Move) -> String {
        let s = format!("{}", mv);
        let is_castle = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == Some(self.board.side_to_move());
        if !is_castle { return s; }
        let (from, to) = (&s[0..2], &s[2..4]);
        let file = if to.as_bytes()[0] > from.as_bytes()[0] { 'g' } else { 'c' };
        format!("{}{}{}", from, file, &from[1..2])
    }

    pub fn with_moves(&self, moves: &[String]) -> Result<Self> {
        let mut pos = self.clone();
        for m in moves { pos = pos.apply_uci(m)?; }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_moves() {
        assert_eq!(Position::startpos().legal_moves().len(), 20);
    }

    #[test]
    fn apply_returns_new_position_and_leaves_parent() {
        let pos = Position::startpos();
        let before = pos.fen();
        let child = pos.apply_uci("e2e4").unwrap();
        assert_eq!(pos.fen(), before);
        assert_ne!(child.fen(), before);
        assert_eq!(child.side_to_move(), Color::Black);
    }

    #[test]
    fn illegal_move_is_distinguishable() {
        let pos = Position::startpos();
        let err = pos.apply_uci("e2e5").unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove(ref m) if m == "e2e5"));
    }

    #[test]
    fn castling_uses_standard_notation() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = pos.parse_uci("e1g1").expect("short castle legal");
        assert_eq!(pos.to_uci(short), "e1g1");
        let long = pos.parse_uci("e1c1").expect("long castle legal");
        assert_eq!(pos.to_uci(long), "e1c1");
    }

    #[test]
    fn fen_round_trips_through_rules_engine() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(Position::from_fen(&pos.fen()).unwrap().fen(), pos.fen());
    }

    #[test]
    fn short_fen_gets_defaults() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w").unwrap();
        assert_eq!(pos.legal_moves().len(), 5);
    }
}
