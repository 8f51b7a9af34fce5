use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::search::cache::DEFAULT_CAPACITY;
use crate::search::{SearchParams, Searcher};

/// Engine settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_depth: u32,
    pub move_time_ms: u64,
    pub cache_capacity: usize,
    /// Keep cached positions between moves of the same game.
    pub persist_cache: bool,
    /// Seed for the random fallback move; entropy when absent.
    pub fallback_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            move_time_ms: 200,
            cache_capacity: DEFAULT_CAPACITY,
            persist_cache: true,
            fallback_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn params(&self) -> SearchParams {
        SearchParams { depth: self.max_depth, movetime: Duration::from_millis(self.move_time_ms) }
    }

    pub fn searcher(&self) -> Searcher {
        let mut s = Searcher::new(self.cache_capacity);
        s.set_persist_cache(self.persist_cache);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"max_depth": 4, "fallback_seed": 7}"#).unwrap();
        assert_eq!(cfg, EngineConfig { max_depth: 4, fallback_seed: Some(7), ..EngineConfig::default() });
        assert_eq!(cfg.params().movetime, Duration::from_millis(200));
    }

    #[test]
    fn unreadable_json_is_an_error() {
        assert!(EngineConfig::from_json_str("{max_depth: 4").is_err());
    }
}
