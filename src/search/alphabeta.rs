use cozy_chess::{Color, Move};
use log::{debug, trace};
use std::time::Duration;

use crate::board::Position;
use crate::search::cache::{PositionCache, DEFAULT_CAPACITY};
use crate::search::clock::{Clock, WallClock};
use crate::search::eval::{eval_cp, SCORE_INF};
use crate::search::ordering::{order_moves, ordered_captures};

/// Scores are White-positive at every ply. Plies where White moves maximise,
/// plies where Black moves minimise; nothing is negated across recursion.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub movetime: Duration,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: 2, movetime: Duration::from_millis(200) }
    }
}

/// Score and best move of one alpha-beta node. `best` is `None` at leaves,
/// terminal positions and nodes cut short by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub score: i32,
    pub best: Option<Move>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The root has no legal moves.
    Terminal { score: i32 },
    /// The budget ran out before any depth produced a move.
    TimedOut,
    /// `depth` is the deepest iteration that returned `mv`; 0 when `mv` was
    /// the only legal move.
    Found { mv: Move, score: i32, depth: u32 },
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<Move> {
        match *self {
            SearchOutcome::Found { mv, .. } => Some(mv),
            _ => None,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub cache_hits: u64,
    pub cache_len: usize,
}

pub struct Searcher {
    cache: PositionCache,
    clock: Box<dyn Clock>,
    budget: Duration,
    nodes: u64,
    qnodes: u64,
    persist_cache: bool,
    refusal_logged: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(DEFAULT_CAPACITY) }
}

impl Searcher {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: PositionCache::new(cache_capacity),
            clock: Box::new(WallClock::default()),
            budget: Duration::MAX,
            nodes: 0,
            qnodes: 0,
            persist_cache: true,
            refusal_logged: false,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// When false the cache is emptied at the start of every [`Searcher::search`].
    pub fn set_persist_cache(&mut self, persist: bool) { self.persist_cache = persist; }

    pub fn cache(&self) -> &PositionCache { &self.cache }

    pub fn new_game(&mut self) {
        self.cache.clear();
        self.refusal_logged = false;
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            nodes: self.nodes,
            qnodes: self.qnodes,
            cache_hits: self.cache.hits(),
            cache_len: self.cache.len(),
        }
    }

    fn begin(&mut self, budget: Duration) {
        self.clock.start();
        self.budget = budget;
        self.nodes = 0;
        self.qnodes = 0;
    }

    #[inline]
    fn out_of_time(&self) -> bool { self.clock.elapsed() >= self.budget }

    /// Quiescence value of `pos` over the full window, with no time limit.
    pub fn qsearch_eval_cp(&mut self, pos: &Position) -> i32 {
        self.begin(Duration::MAX);
        let maximizing = pos.side_to_move() == Color::White;
        self.qsearch(pos, -SCORE_INF, SCORE_INF, maximizing)
    }

    pub fn qnodes(&self) -> u64 { self.qnodes }

    fn qsearch(&mut self, pos: &Position, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        if self.out_of_time() { return eval_cp(pos); }
        self.qnodes += 1;

        // Stand pat
        let stand = eval_cp(pos);
        if maximizing {
            if stand >= beta { return beta; }
            if stand > alpha { alpha = stand; }
        } else {
            if stand <= alpha { return alpha; }
            if stand < beta { beta = stand; }
        }

        let moves = pos.legal_moves();
        if moves.is_empty() { return stand; }
        let caps = ordered_captures(&pos.cells(), moves);
        if caps.is_empty() { return stand; }

        for m in caps {
            let child = match pos.apply(m) {
                Ok(c) => c,
                Err(e) => { trace!("qsearch skipping {}: {}", m, e); continue; }
            };
            let score = self.qsearch(&child, alpha, beta, !maximizing);
            if maximizing {
                if score >= beta { return beta; }
                if score > alpha { alpha = score; }
            } else {
                if score <= alpha { return alpha; }
                if score < beta { beta = score; }
            }
        }
        if maximizing { alpha } else { beta }
    }

    /// One full-window alpha-beta search of `pos` at `depth`, with no time limit.
    pub fn search_depth(&mut self, pos: &Position, depth: u32) -> Node {
        self.begin(Duration::MAX);
        let maximizing = pos.side_to_move() == Color::White;
        self.alphabeta(pos, depth, -SCORE_INF, SCORE_INF, maximizing)
    }

    fn alphabeta(&mut self, pos: &Position, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> Node {
        if self.out_of_time() { return Node { score: eval_cp(pos), best: None }; }
        self.nodes += 1;

        let moves = pos.legal_moves();
        if moves.is_empty() { return Node { score: eval_cp(pos), best: None }; }
        if depth == 0 {
            return Node { score: self.qsearch(pos, alpha, beta, maximizing), best: None };
        }

        let key = pos.fen();
        if let Some(en) = self.cache.probe(&key, depth, alpha, beta) {
            return Node { score: en.value, best: en.best };
        }

        let ordered = order_moves(&pos.cells(), moves);
        let mut value = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best: Option<Move> = None;
        for m in ordered {
            let child = match pos.apply(m) {
                Ok(c) => c,
                Err(e) => { trace!("skipping {}: {}", m, e); continue; }
            };
            let score = self.alphabeta(&child, depth - 1, alpha, beta, !maximizing).score;
            if maximizing {
                if score > value { value = score; best = Some(m); }
                alpha = alpha.max(value);
            } else {
                if score < value { value = score; best = Some(m); }
                beta = beta.min(value);
            }
            if alpha >= beta { break; }
        }

        if !self.cache.record(key, depth, alpha, beta, value, best) && !self.refusal_logged {
            trace!("position cache full at {} entries; no longer recording", self.cache.capacity());
            self.refusal_logged = true;
        }
        Node { score: value, best }
    }

    /// Iterative deepening from depth 1 to `params.depth` within `params.movetime`.
    /// A depth of 0 is searched as 1. The root maximises when White is to move
    /// and minimises otherwise.
    pub fn search(&mut self, pos: &Position, params: SearchParams) -> SearchOutcome {
        self.begin(params.movetime);
        if !self.persist_cache { self.cache.clear(); }
        let moves = pos.legal_moves();
        match moves[..] {
            [] => return SearchOutcome::Terminal { score: eval_cp(pos) },
            [only] => return SearchOutcome::Found { mv: only, score: eval_cp(pos), depth: 0 },
            _ => {}
        }

        let maximizing = pos.side_to_move() == Color::White;
        let mut found: Option<(Move, i32, u32)> = None;
        for d in 1..=params.depth.max(1) {
            if self.out_of_time() { break; }
            let node = self.alphabeta(pos, d, -SCORE_INF, SCORE_INF, maximizing);
            if let Some(mv) = node.best {
                found = Some((mv, node.score, d));
                debug!("depth {} best {} score {} nodes {} qnodes {} cache {}",
                    d, pos.to_uci(mv), node.score, self.nodes, self.qnodes, self.cache.len());
            }
            if self.out_of_time() { break; }
        }
        match found {
            Some((mv, score, depth)) => SearchOutcome::Found { mv, score, depth },
            None => SearchOutcome::TimedOut,
        }
    }
}
