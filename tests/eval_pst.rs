use pawnstorm::search::eval::{eval_cp, evaluate_fen, QUEEN};
use pawnstorm::Position;

#[test]
fn knight_center_better_than_rim() {
    let c = evaluate_fen("k7/8/8/8/3N4/8/8/7K w - - 0 1").unwrap();
    let r = evaluate_fen("k7/8/8/8/8/8/8/N6K w - - 0 1").unwrap();
    assert!(c > r, "center eval {c} should be greater than rim {r}");
}

#[test]
fn score_is_not_normalised_to_side_to_move() {
    let w = Position::from_fen("4k3/8/8/8/8/8/3Q4/4K3 w - - 0 1").unwrap();
    let b = Position::from_fen("4k3/8/8/8/8/8/3Q4/4K3 b - - 0 1").unwrap();
    assert_eq!(eval_cp(&w), eval_cp(&b));
    assert!(eval_cp(&w) > QUEEN - 10);
}

#[test]
fn black_material_is_negative() {
    let s = evaluate_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(s < -(QUEEN - 10), "{s}");
}

#[test]
fn raw_fen_and_rules_engine_agree() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    assert_eq!(evaluate_fen(fen).unwrap(), eval_cp(&Position::from_fen(fen).unwrap()));
}

#[test]
fn placement_without_kings_still_evaluates() {
    assert_eq!(evaluate_fen("8/8/8/8/8/8/8/8 w").unwrap(), 0);
    assert!(Position::from_fen("8/8/8/8/8/8/8/8 w").is_err());
}
