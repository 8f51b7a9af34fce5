pub mod alphabeta;
pub mod cache;
pub mod clock;
pub mod eval;
pub mod ordering;

pub use alphabeta::{Node, SearchOutcome, SearchParams, SearchStats, Searcher};
pub use cache::{CacheEntry, PositionCache};
