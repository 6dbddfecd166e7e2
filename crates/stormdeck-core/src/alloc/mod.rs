//! Optimized collection types for Stormdeck.
//!
//! Re-exports of hash collections using AHash. Lookups keyed by pane or slot
//! identity go through these instead of the std hasher.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("ws-0", 0u32);
        assert_eq!(map.get("ws-0"), Some(&0));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }
}
