//! Request-level entry points: run the search under a fixed configuration and
//! always answer with a legal move when one exists.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::board::Position;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::search::{SearchOutcome, SearchParams, Searcher};

#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    /// Position in FEN; trailing fields may be omitted.
    pub board: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReply {
    #[serde(rename = "move")]
    pub mv: Option<String>,
}

/// Search `fen` and return the chosen move in coordinate notation, or `None`
/// when the position is terminal or the budget expired first. No fallback.
pub fn best_move(searcher: &mut Searcher, fen: &str, depth: u32, movetime: Duration) -> Result<Option<String>> {
    let pos = Position::from_fen(fen)?;
    let outcome = searcher.search(&pos, SearchParams { depth, movetime });
    Ok(outcome.best_move().map(|m| pos.to_uci(m)))
}

pub struct Agent {
    config: EngineConfig,
    searcher: Searcher,
    rng: SmallRng,
    last: Option<SearchOutcome>,
}

impl Default for Agent {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Agent {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.fallback_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let searcher = config.searcher();
        Self { config, searcher, rng, last: None }
    }

    /// Replace the searcher, e.g. to install a deterministic clock.
    pub fn with_searcher(mut self, searcher: Searcher) -> Self {
        self.searcher = searcher;
        self
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn searcher(&self) -> &Searcher { &self.searcher }

    /// Outcome of the most recent search, before any fallback.
    pub fn last_outcome(&self) -> Option<SearchOutcome> { self.last }

    pub fn new_game(&mut self) { self.searcher.new_game(); }

    pub fn choose(&mut self, fen: &str) -> Result<Option<String>> {
        let pos = Position::from_fen(fen)?;
        Ok(self.choose_in(&pos, self.config.params()))
    }

    /// `None` only when `pos` has no legal moves.
    pub fn choose_in(&mut self, pos: &Position, params: SearchParams) -> Option<String> {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            self.last = Some(SearchOutcome::Terminal { score: crate::search::eval::eval_cp(pos) });
            return None;
        }
        let outcome = self.searcher.search(pos, params);
        self.last = Some(outcome);
        let stats = self.searcher.stats();
        let mv = match outcome {
            SearchOutcome::Found { mv, score, depth } => {
                info!("chose {} at depth {} score {} nodes {} qnodes {}",
                    pos.to_uci(mv), depth, score, stats.nodes, stats.qnodes);
                mv
            }
            other => {
                let mv = moves[self.rng.gen_range(0..moves.len())];
                warn!("search returned {:?}; falling back to random move {}", other, pos.to_uci(mv));
                mv
            }
        };
        Some(pos.to_uci(mv))
    }

    pub fn respond(&mut self, req: &MoveRequest) -> Result<MoveReply> {
        Ok(MoveReply { mv: self.choose(&req.board)? })
    }
}
