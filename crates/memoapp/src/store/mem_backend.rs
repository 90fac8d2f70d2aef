use super::backend::KvBackend;
use crate::error::{MemoError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since memo is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `KvBackend` trait to use `&self` for all methods.
///
/// An optional byte quota mimics the capacity limit of browser-style local
/// storage: a write whose stored total would exceed it fails and changes
/// nothing.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of keys plus values, in bytes.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Test helper to plant raw text, bypassing quota and error simulation.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn usage_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(MemoError::Store("Simulated write error".to_string()));
        }

        if let Some(limit) = self.quota {
            let needed = self.usage_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(MemoError::QuotaExceeded { needed, limit });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap(), Some("v".to_string()));

        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);

        // Removing again is fine
        backend.remove("k").unwrap();
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let backend = MemBackend::new().with_quota(10);
        backend.set("k", "12345").unwrap();

        let err = backend.set("k", "12345678901").unwrap_err();
        assert!(matches!(err, MemoError::QuotaExceeded { limit: 10, .. }));

        // Previous value survives
        assert_eq!(backend.get("k").unwrap(), Some("12345".to_string()));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let backend = MemBackend::new().with_quota(8);
        backend.set("k", "1234567").unwrap();
        // Replacing with a value of the same size stays within quota
        backend.set("k", "7654321").unwrap();
        assert_eq!(backend.get("k").unwrap(), Some("7654321".to_string()));
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set("k", "before").unwrap();
        backend.set_simulate_write_error(true);

        assert!(matches!(
            backend.set("k", "after"),
            Err(MemoError::Store(_))
        ));
        assert_eq!(backend.get("k").unwrap(), Some("before".to_string()));
    }
}
