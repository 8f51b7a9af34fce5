use criterion::{criterion_group, criterion_main, Criterion, black_box};
use pawnstorm::Position;

fn bench_eval(c: &mut Criterion) {
    let p = Position::startpos();
    c.bench_function("eval_cp_startpos", |ben| {
        ben.iter(|| {
            let v = pawnstorm::search::eval::eval_cp(black_box(&p));
            black_box(v)
        })
    });
    let fen = p.fen();
    c.bench_function("evaluate_fen_startpos", |ben| {
        ben.iter(|| black_box(pawnstorm::search::eval::evaluate_fen(black_box(&fen))))
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
