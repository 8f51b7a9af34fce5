use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pawnstorm::{EngineConfig, Position, SearchOutcome};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "pawnstorm-bench", version, about = "Run the searcher over a suite of FEN positions")]
struct Args {
    /// File with one FEN per line ('#' starts a comment); startpos when omitted
    #[arg(long)]
    suite: Option<PathBuf>,

    /// Maximum depth
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Movetime in milliseconds per position
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Position cache capacity in entries
    #[arg(long, default_value_t = 20_000)]
    cache: usize,

    /// Positions searched concurrently; each search is single-threaded
    #[arg(long, default_value_t = 1)]
    jobs: usize,
}

struct Row {
    fen: String,
    outcome: SearchOutcome,
    bestmove: String,
    nodes: u64,
    qnodes: u64,
    elapsed: Duration,
}

fn load_suite(args: &Args) -> Result<Vec<String>> {
    let Some(path) = &args.suite else { return Ok(vec![Position::startpos().fen()]) };
    let text = std::fs::read_to_string(path).with_context(|| format!("read suite {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn run_one(fen: &str, cfg: &EngineConfig) -> Result<Row> {
    let pos = Position::from_fen(fen)?;
    let mut s = cfg.searcher();
    let t0 = Instant::now();
    let outcome = s.search(&pos, cfg.params());
    let elapsed = t0.elapsed();
    let stats = s.stats();
    let bestmove = outcome.best_move().map(|m| pos.to_uci(m)).unwrap_or_else(|| "(none)".to_string());
    Ok(Row { fen: fen.to_string(), outcome, bestmove, nodes: stats.nodes, qnodes: stats.qnodes, elapsed })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let suite = load_suite(&args)?;
    let cfg = EngineConfig {
        max_depth: args.depth,
        move_time_ms: args.movetime,
        cache_capacity: args.cache,
        ..EngineConfig::default()
    };

    let pb = ProgressBar::new(suite.len() as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {elapsed_precise}")?);
    let run = |fen: &String| {
        let r = run_one(fen, &cfg);
        pb.inc(1);
        r
    };
    let rows: Vec<Result<Row>> = if args.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(args.jobs).build()?;
        pool.install(|| suite.par_iter().map(run).collect())
    } else {
        suite.iter().map(run).collect()
    };
    pb.finish_and_clear();

    let (mut nodes, mut secs) = (0u64, 0.0f64);
    for row in rows {
        let row = row?;
        let depth = match row.outcome { SearchOutcome::Found { depth, .. } => depth, _ => 0 };
        println!("{} bestmove={} depth={} nodes={} qnodes={} elapsed={:.3}s",
            row.fen, row.bestmove, depth, row.nodes, row.qnodes, row.elapsed.as_secs_f64());
        nodes += row.nodes + row.qnodes;
        secs += row.elapsed.as_secs_f64();
    }
    let nps = if secs > 0.0 { nodes as f64 / secs } else { 0.0 };
    println!("summary: positions={} nodes={} elapsed={:.3}s nps={:.1}", suite.len(), nodes, secs, nps);
    Ok(())
}
