// Alpha-beta move picker with quiescence and a FEN-keyed position cache
pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod search;
pub mod uci;

pub use agent::{best_move, Agent, MoveReply, MoveRequest};
pub use board::Position;
pub use config::EngineConfig;
pub use error::EngineError;
pub use search::{SearchOutcome, SearchParams, Searcher};
