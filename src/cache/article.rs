//! Bounded article cache with first-in-first-out eviction.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::debug;

/// Default number of chapter pages kept in memory.
pub const DEFAULT_CAPACITY: usize = 4;

/// Thread-safe map of article title → rendered markup.
///
/// Invariants:
/// - at most `capacity` entries
/// - when a new title arrives at capacity, the oldest *inserted* entry goes
/// - hits never reorder entries, and re-inserting a present title is a no-op
///
/// One mutex guards both the map and the insertion order, so a concurrent
/// miss on the same title cannot insert twice or push the size past capacity.
pub struct ArticleCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    pages: FxHashMap<String, Arc<str>>,
    order: VecDeque<String>,
}

impl ArticleCache {
    /// Create a cache holding up to `capacity` pages (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn get(&self, title: &str) -> Option<Arc<str>> {
        self.inner.lock().pages.get(title).cloned()
    }

    /// Insert `markup` under `title` unless the title is already cached.
    ///
    /// Returns the markup now stored for `title`, which is the earlier value
    /// when another caller got there first.
    pub fn put(&self, title: &str, markup: impl Into<Arc<str>>) -> Arc<str> {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.pages.get(title) {
            return Arc::clone(existing);
        }

        if inner.order.len() >= self.capacity
            && let Some(oldest) = inner.order.pop_front()
        {
            inner.pages.remove(&oldest);
            debug!("cache"; "evicted '{}'", oldest);
        }

        let markup = markup.into();
        inner.pages.insert(title.to_string(), Arc::clone(&markup));
        inner.order.push_back(title.to_string());
        markup
    }

    /// Return the cached page or fetch, store and return it.
    ///
    /// The fetch runs without holding the lock: two threads missing the same
    /// title may both fetch, but only the first result is stored.
    pub fn get_or_try_insert_with<E>(
        &self,
        title: &str,
        fetch: impl FnOnce() -> Result<String, E>,
    ) -> Result<Arc<str>, E> {
        if let Some(hit) = self.get(title) {
            debug!("cache"; "hit '{}'", title);
            return Ok(hit);
        }
        debug!("cache"; "miss '{}'", title);
        let markup = fetch()?;
        Ok(self.put(title, markup))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.inner.lock().pages.contains_key(title)
    }

    /// Cached titles, oldest first.
    pub fn titles(&self) -> Vec<String> {
        self.inner.lock().order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ArticleCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
