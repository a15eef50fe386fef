//! Generated action ids

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::action::ActionId;

/// Source of fresh action ids.
///
/// Every call must return an id no other call has returned.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ActionId;
}

/// Counter-based generator producing `{prefix}{n}`, starting at 0.
///
/// The increment is a single atomic fetch-add, so each value is handed out
/// exactly once even with concurrent callers.
///
/// ```
/// use async_actions_core::{IdGenerator, SequentialIds};
///
/// let ids = SequentialIds::new();
/// assert_eq!(ids.next_id().as_str(), "ACTION_0");
/// assert_eq!(ids.next_id().as_str(), "ACTION_1");
/// ```
#[derive(Debug)]
pub struct SequentialIds {
    prefix: &'static str,
    next: AtomicU64,
}

static GLOBAL_IDS: SequentialIds = SequentialIds::new();

impl SequentialIds {
    pub const DEFAULT_PREFIX: &'static str = "ACTION_";

    pub const fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    pub const fn with_prefix(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(0),
        }
    }

    /// The process-wide generator.
    ///
    /// Starts at zero when the process starts and is never reset.
    pub fn global() -> &'static SequentialIds {
        &GLOBAL_IDS
    }

    /// The number the next call will use.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> ActionId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        ActionId::from(format!("{}{}", self.prefix, n))
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> ActionId {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Arc<G> {
    fn next_id(&self) -> ActionId {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_sequential_prefix() {
        let ids = SequentialIds::with_prefix("job-");
        assert_eq!(ids.peek(), 0);
        assert_eq!(ids.next_id(), "job-0");
        assert_eq!(ids.next_id(), "job-1");
        assert_eq!(ids.peek(), 2);
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let ids = Arc::new(SequentialIds::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..100).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id handed out");
            }
        }
        assert_eq!(seen.len(), 800);
        assert_eq!(ids.peek(), 800);
    }

    #[test]
    fn test_global_is_shared() {
        let a = SequentialIds::global().next_id();
        let b = SequentialIds::global().next_id();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("ACTION_"));
    }
}
