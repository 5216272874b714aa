//! In-memory key/value store.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// An unbounded key/value store with no expiry.
///
/// Every `Cache` is independent; share one by passing it around.
///
/// # Examples
///
/// ```
/// use utilkit::cache::Cache;
///
/// let mut cache = Cache::new();
/// cache.set("count", 0);
/// assert!(cache.has("count"));
/// assert_eq!(cache.get("count"), Some(&0));
/// cache.remove("count");
/// assert!(!cache.has("count"));
/// ```
#[derive(Debug, Clone)]
pub struct Cache<K, V> {
    store: HashMap<K, V>,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self {
            store: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Cache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the previous value if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.store.insert(key, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.get(key)
    }

    /// Check whether `key` is present, whatever its value.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.contains_key(key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let removed = self.store.remove(key);
        if removed.is_some() {
            tracing::trace!(remaining = self.store.len(), "cache entry removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite() {
        let mut cache: Cache<String, &str> = Cache::new();
        assert_eq!(cache.set("k".to_string(), "a"), None);
        assert_eq!(cache.set("k".to_string(), "b"), Some("a"));
        assert_eq!(cache.get("k"), Some(&"b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let mut cache = Cache::new();
        cache.set("zero", 0);
        cache.set("empty", "".len());
        assert!(cache.has("zero"));
        assert!(cache.has("empty"));
        assert_eq!(cache.remove("zero"), Some(0));
        assert!(!cache.has("zero"));
    }

    #[test]
    fn test_missing_keys() {
        let mut cache: Cache<&str, bool> = Cache::new();
        assert_eq!(cache.get("nope"), None);
        assert!(!cache.has("nope"));
        assert_eq!(cache.remove("nope"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = Cache::new();
        let b: Cache<&str, i32> = Cache::new();
        a.set("shared", 1);
        assert!(!b.has("shared"));
        a.clear();
        assert!(a.is_empty());
    }
}
