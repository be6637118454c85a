use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet, VecDeque};

/// In-memory cache of image handles keyed by source URI.
///
/// Tracks in-flight and failed fetches so each source is requested at most once.
/// Only sources outside the most recent claim are evicted, so a visible set
/// larger than the capacity grows the cache instead of refetching forever.
#[derive(Debug)]
pub struct ThumbnailCache {
    capacity: usize,
    handles: HashMap<String, Handle>,
    order: VecDeque<String>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    /// Sources passed to the last `claim_missing` call
    wanted: HashSet<String>,
}

impl ThumbnailCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            handles: HashMap::new(),
            order: VecDeque::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            wanted: HashSet::new(),
        }
    }

    pub fn get(&self, source: &str) -> Option<&Handle> {
        self.handles.get(source)
    }

    pub fn is_failed(&self, source: &str) -> bool {
        self.failed.contains(source)
    }

    /// Sources that still need fetching; they are marked pending on return.
    ///
    /// The given sources become the wanted set and are protected from eviction.
    pub fn claim_missing<'a>(&mut self, sources: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        self.wanted.clear();
        let mut claimed = Vec::new();
        for source in sources {
            if !self.wanted.insert(source.to_string()) {
                continue;
            }
            if self.handles.contains_key(source)
                || self.pending.contains(source)
                || self.failed.contains(source)
            {
                continue;
            }
            self.pending.insert(source.to_string());
            claimed.push(source.to_string());
        }
        self.evict();
        claimed
    }

    pub fn insert(&mut self, source: String, bytes: Vec<u8>) {
        self.pending.remove(&source);
        if !self.handles.contains_key(&source) {
            self.order.push_back(source.clone());
        }
        self.handles.insert(source, Handle::from_bytes(bytes));
        self.evict();
    }

    pub fn fail(&mut self, source: String) {
        self.pending.remove(&source);
        self.failed.insert(source);
    }

    /// Drop the oldest unwanted handles until the cache fits its capacity
    fn evict(&mut self) {
        while self.handles.len() > self.capacity {
            let Some(index) = self.order.iter().position(|s| !self.wanted.contains(s)) else {
                break;
            };
            if let Some(oldest) = self.order.remove(index) {
                self.handles.remove(&oldest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_each_source_once() {
        let mut cache = ThumbnailCache::new(10);

        let first = cache.claim_missing(["a", "b", "a"]);
        assert_eq!(first, vec!["a", "b"]);
        assert!(cache.claim_missing(["a", "b"]).is_empty());

        cache.insert("a".into(), vec![1, 2, 3]);
        cache.fail("b".into());
        assert!(cache.get("a").is_some());
        assert!(cache.is_failed("b"));
        assert!(cache.claim_missing(["a", "b", "c"]) == vec!["c"]);
    }

    #[test]
    fn test_visible_set_larger_than_capacity_is_fetched_once() {
        let mut cache = ThumbnailCache::new(400);
        let sources: Vec<String> = (0..600).map(|n| format!("img-{}", n)).collect();

        let mut fetches = 0;
        for _ in 0..5 {
            let claimed = cache.claim_missing(sources.iter().map(String::as_str));
            fetches += claimed.len();
            for source in claimed {
                cache.insert(source, vec![0]);
            }
        }

        assert_eq!(fetches, sources.len());
        assert_eq!(cache.handles.len(), sources.len());
    }

    #[test]
    fn test_evicts_oldest_unwanted() {
        let mut cache = ThumbnailCache::new(2);
        for source in cache.claim_missing(["a", "b", "c"]) {
            cache.insert(source, vec![0]);
        }
        assert_eq!(cache.handles.len(), 3);

        // Narrowing the view releases the oldest handles first
        assert!(cache.claim_missing(["b", "c"]).is_empty());
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());

        assert!(cache.claim_missing(["c"]).is_empty());
        assert_eq!(cache.handles.len(), 2);

        cache.insert("d".into(), vec![0]);
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());

        // Evicted sources may be fetched again
        assert_eq!(cache.claim_missing(["a"]), vec!["a"]);
    }
}
