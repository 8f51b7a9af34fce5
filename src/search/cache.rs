use cozy_chess::Move;
use std::collections::HashMap;

pub const DEFAULT_CAPACITY: usize = 20_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub depth: u32,
    pub alpha: i32,
    pub beta: i32,
    pub value: i32,
    pub best: Option<Move>,
}

impl CacheEntry {
    /// Usable for a query at `depth` with window (`alpha`, `beta`) only if it
    /// was searched at least as deep with a window at least as wide.
    #[inline]
    pub fn answers(&self, depth: u32, alpha: i32, beta: i32) -> bool {
        self.depth >= depth && self.alpha <= alpha && self.beta >= beta
    }
}

/// Search results keyed by full FEN. Admission stops once `capacity` entries
/// exist; nothing is ever evicted.
#[derive(Debug)]
pub struct PositionCache {
    map: HashMap<String, CacheEntry>,
    capacity: usize,
    hits: u64,
}

impl Default for PositionCache {
    fn default() -> Self { Self::new(DEFAULT_CAPACITY) }
}

impl PositionCache {
    pub fn new(capacity: usize) -> Self {
        Self { map: HashMap::with_capacity(capacity.min(DEFAULT_CAPACITY)), capacity, hits: 0 }
    }

    pub fn probe(&mut self, key: &str, depth: u32, alpha: i32, beta: i32) -> Option<CacheEntry> {
        let hit = self.map.get(key).copied().filter(|e| e.answers(depth, alpha, beta));
        if hit.is_some() { self.hits += 1; }
        hit
    }

    /// Returns false when the cache is full and the entry was dropped. An
    /// existing key is overwritten only while there is room.
    pub fn record(&mut self, key: String, depth: u32, alpha: i32, beta: i32, value: i32, best: Option<Move>) -> bool {
        if self.map.len() >= self.capacity {
            return false;
        }
        self.map.insert(key, CacheEntry { depth, alpha, beta, value, best });
        true
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> { self.map.get(key) }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    pub fn is_full(&self) -> bool { self.map.len() >= self.capacity }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn hits(&self) -> u64 { self.hits }

    pub fn clear(&mut self) {
        self.map.clear();
        self.hits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrower_window_cannot_answer_wider_query() {
        let e = CacheEntry { depth: 3, alpha: -50, beta: 50, value: 10, best: None };
        assert!(e.answers(3, -40, 40));
        assert!(e.answers(2, -50, 50));
        assert!(!e.answers(4, -40, 40));
        assert!(!e.answers(3, -60, 40));
        assert!(!e.answers(3, -40, 60));
    }

    #[test]
    fn full_cache_refuses_even_existing_keys() {
        let mut c = PositionCache::new(1);
        assert!(c.record("a".into(), 1, -10, 10, 5, None));
        assert!(!c.record("a".into(), 2, -10, 10, 7, None));
        assert_eq!(c.get("a").map(|e| e.value), Some(5));
    }
}
