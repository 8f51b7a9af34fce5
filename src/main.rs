use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use pawnstorm::{search::eval, uci::UciEngine, Agent, EngineConfig, MoveRequest};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Time-bounded alpha-beta chess move picker", long_about = None)]
struct Args {
    /// JSON config file (max_depth, move_time_ms, cache_capacity, persist_cache, fallback_seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum iterative-deepening depth
    #[arg(long)]
    depth: Option<u32>,

    /// Time budget per move in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Position cache capacity in entries
    #[arg(long)]
    cache: Option<usize>,

    /// Seed for the random fallback move
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Speak UCI on stdin/stdout
    Uci,
    /// Pick a move for one position
    Bestmove {
        /// FEN, or 'startpos'
        #[arg(long, default_value = "startpos")]
        fen: String,
    },
    /// Answer one JSON request per stdin line: {"board": "<fen>"} -> {"move": ...}
    Agent,
    /// Static evaluation of a FEN placement (White-positive centipawns)
    Eval {
        #[arg(long)]
        fen: String,
    },
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut cfg = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.depth { cfg.max_depth = d; }
    if let Some(t) = args.movetime { cfg.move_time_ms = t; }
    if let Some(c) = args.cache { cfg.cache_capacity = c; }
    if args.seed.is_some() { cfg.fallback_seed = args.seed; }
    info!("config: {:?}", cfg);
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = load_config(&args)?;

    match &args.cmd {
        Cmd::Uci => UciEngine::new(cfg).run_loop()?,
        Cmd::Bestmove { fen } => {
            let mut agent = Agent::new(cfg);
            let fen = if fen == "startpos" { pawnstorm::Position::startpos().fen() } else { fen.clone() };
            let mv = agent.choose(&fen).with_context(|| format!("search {}", fen))?;
            println!("bestmove {}", mv.unwrap_or_else(|| "(none)".to_string()));
        }
        Cmd::Agent => {
            let mut agent = Agent::new(cfg);
            let stdin = io::stdin();
            let mut out = io::stdout().lock();
            for line in stdin.lock().lines() {
                let line = line?;
                if line.trim().is_empty() { continue; }
                let req: MoveRequest = serde_json::from_str(&line).with_context(|| format!("parse request: {}", line))?;
                let reply = agent.respond(&req)?;
                writeln!(out, "{}", serde_json::to_string(&reply)?)?;
                out.flush()?;
            }
        }
        Cmd::Eval { fen } => {
            let cp = eval::evaluate_fen(fen).with_context(|| format!("evaluate {}", fen))?;
            println!("{}", cp);
        }
    }
    Ok(())
}
