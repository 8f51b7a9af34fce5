//! FEN glue: field splitting with defaults, and the flat 64-cell view used by
//! evaluation and move ordering. Cell 0 is a8, cell 7 is h8, cell 63 is h1.

use cozy_chess::{Board, Color, Piece};

use crate::error::{EngineError, Result};

/// The six space-separated FEN fields. Missing trailing fields take the
/// defaults "", "", "0" and "1".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields<'a> {
    pub placement: &'a str,
    pub side_to_move: &'a str,
    pub castling: &'a str,
    pub en_passant: &'a str,
    pub halfmove: &'a str,
    pub fullmove: &'a str,
}

impl<'a> FenFields<'a> {
    pub fn split(fen: &'a str) -> Result<Self> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or_else(|| invalid(fen, "empty string"))?;
        let side_to_move = parts.next().ok_or_else(|| invalid(fen, "missing side to move"))?;
        Ok(Self {
            placement,
            side_to_move,
            castling: parts.next().unwrap_or(""),
            en_passant: parts.next().unwrap_or(""),
            halfmove: parts.next().unwrap_or("0"),
            fullmove: parts.next().unwrap_or("1"),
        })
    }

    /// Full six-field string with empty castling / en-passant written as "-".
    pub fn normalized(&self) -> String {
        let dash = |s: &'a str| if s.is_empty() { "-" } else { s };
        format!(
            "{} {} {} {} {} {}",
            self.placement,
            self.side_to_move,
            dash(self.castling),
            dash(self.en_passant),
            self.halfmove,
            self.fullmove
        )
    }
}

/// Fill in absent trailing fields so the rules engine will accept `fen`.
pub fn normalize(fen: &str) -> Result<String> {
    FenFields::split(fen).map(|f| f.normalized())
}

fn invalid(fen: &str, reason: &str) -> EngineError {
    EngineError::InvalidFen { fen: fen.to_string(), reason: reason.to_string() }
}

/// "e2" -> 52 under the a8 = 0 convention.
pub fn square_index(sq: &str) -> Option<usize> {
    let b = sq.as_bytes();
    if b.len() != 2 { return None; }
    let (f, r) = (b[0], b[1]);
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) { return None; }
    let file = (f - b'a') as usize;
    let row = (b'8' - r) as usize;
    Some(row * 8 + file)
}

pub type Occupant = Option<(Color, Piece)>;

const PIECES: [Piece; 6] = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King];

/// Occupants of all 64 cells, top-left first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cells([Occupant; 64]);

impl Cells {
    /// Expand the placement field (e.g. `rnbqkbnr/pppppppp/8/...`).
    pub fn from_placement(placement: &str) -> Result<Self> {
        let mut cells = [None; 64];
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid(placement, "placement must have 8 ranks"));
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for ch in rank.chars() {
                if let Some(run) = ch.to_digit(10) {
                    file += run as usize;
                    continue;
                }
                let occ = piece_from_char(ch).ok_or_else(|| invalid(placement, "unknown piece symbol"))?;
                if file >= 8 { return Err(invalid(placement, "rank overflows 8 files")); }
                cells[row * 8 + file] = Some(occ);
                file += 1;
            }
            if file != 8 {
                return Err(invalid(placement, "rank does not cover 8 files"));
            }
        }
        Ok(Self(cells))
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Self::from_placement(FenFields::split(fen)?.placement)
    }

    pub fn from_board(board: &Board) -> Self {
        let mut cells = [None; 64];
        for &color in &[Color::White, Color::Black] {
            for &piece in &PIECES {
                for sq in board.colors(color) & board.pieces(piece) {
                    if let Some(idx) = square_index(&format!("{}", sq)) {
                        cells[idx] = Some((color, piece));
                    }
                }
            }
        }
        Self(cells)
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Occupant { self.0[idx] }

    pub fn at(&self, sq: &str) -> Occupant { square_index(sq).and_then(|i| self.0[i]) }

    pub fn iter(&self) -> impl Iterator<Item = (usize, (Color, Piece))> + '_ {
        self.0.iter().enumerate().filter_map(|(i, o)| o.map(|p| (i, p)))
    }
}

fn piece_from_char(ch: char) -> Option<(Color, Piece)> {
    let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
    let piece = match ch.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    Some((color, piece))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_follow_a8_origin() {
        assert_eq!(square_index("a8"), Some(0));
        assert_eq!(square_index("h8"), Some(7));
        assert_eq!(square_index("a1"), Some(56));
        assert_eq!(square_index("h1"), Some(63));
        assert_eq!(square_index("i1"), None);
        assert_eq!(square_index("e"), None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let f = FenFields::split("8/8/8/8/8/8/8/K6k w").unwrap();
        assert_eq!(f.castling, "");
        assert_eq!(f.en_passant, "");
        assert_eq!(f.halfmove, "0");
        assert_eq!(f.fullmove, "1");
        assert_eq!(f.normalized(), "8/8/8/8/8/8/8/K6k w - - 0 1");
    }

    #[test]
    fn startpos_cells_match_board() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let parsed = Cells::from_fen(fen).unwrap();
        assert_eq!(parsed, Cells::from_board(&Board::default()));
        assert_eq!(parsed.get(0), Some((Color::Black, Piece::Rook)));
        assert_eq!(parsed.at("e1"), Some((Color::White, Piece::King)));
        assert_eq!(parsed.at("e4"), None);
        assert_eq!(parsed.iter().count(), 32);
    }

    #[test]
    fn malformed_placement_is_rejected() {
        assert!(Cells::from_placement("8/8/8").is_err());
        assert!(Cells::from_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(Cells::from_placement("7x/8/8/8/8/8/8/8").is_err());
        assert!(FenFields::split("").is_err());
    }
}
