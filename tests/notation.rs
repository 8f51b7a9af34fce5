use cozy_chess::{Color, Piece};
use pawnstorm::board::notation::{normalize, square_index};
use pawnstorm::board::{Cells, FenFields};
use pawnstorm::{EngineError, Position};
use pretty_assertions::assert_eq;

#[test]
fn all_six_fields_are_read_in_order() {
    let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    let f = FenFields::split(fen).unwrap();
    assert_eq!(
        f,
        FenFields {
            placement: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
            side_to_move: "b",
            castling: "KQkq",
            en_passant: "e3",
            halfmove: "0",
            fullmove: "1",
        }
    );
    assert_eq!(f.normalized(), fen);
}

#[test]
fn absent_trailing_fields_default() {
    assert_eq!(normalize("4k3/8/8/8/8/8/8/4K3 b").unwrap(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    assert_eq!(normalize("4k3/8/8/8/8/8/8/4K3 w K").unwrap(), "4k3/8/8/8/8/8/8/4K3 w K - 0 1");
    assert_eq!(normalize("4k3/8/8/8/8/8/8/4K3 w - - 7").unwrap(), "4k3/8/8/8/8/8/8/4K3 w - - 7 1");
}

#[test]
fn missing_side_to_move_is_invalid() {
    let err = Position::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap_err();
    assert!(matches!(err, EngineError::InvalidFen { .. }), "got {err:?}");
}

#[test]
fn cells_run_from_top_left_to_bottom_right() {
    let cells = Cells::from_fen("r6k/8/8/8/8/8/8/K6R w - - 0 1").unwrap();
    assert_eq!(cells.get(0), Some((Color::Black, Piece::Rook)));
    assert_eq!(cells.get(7), Some((Color::Black, Piece::King)));
    assert_eq!(cells.get(56), Some((Color::White, Piece::King)));
    assert_eq!(cells.get(63), Some((Color::White, Piece::Rook)));
    assert_eq!(cells.at("h1"), cells.get(63));
    assert_eq!(cells.at("d5"), None);
    assert_eq!(square_index("d5"), Some(27));
}

#[test]
fn placement_cells_agree_with_rules_engine() {
    let pos = Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4").unwrap();
    let parsed = Cells::from_fen(&pos.fen()).unwrap();
    assert_eq!(parsed, pos.cells());
    assert_eq!(pos.cells().at("c4"), Some((Color::White, Piece::Bishop)));
    assert_eq!(pos.cells().at("f6"), Some((Color::Black, Piece::Knight)));
}
