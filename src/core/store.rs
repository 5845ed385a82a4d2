//! Observable in-memory collection shared by the disk and VM stores

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Immutable view of a store's records at one revision
pub type Snapshot<T> = Arc<Vec<T>>;

type Callback<T> = Arc<dyn Fn(&Snapshot<T>) + Send + Sync>;

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single-writer record collection with copy-on-write snapshots.
///
/// Every mutation swaps in a freshly built `Vec`, so a subscriber holding the
/// previous snapshot can tell a change happened by pointer comparison alone.
pub struct Store<T> {
    records: RwLock<Snapshot<T>>,
    subscribers: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
    next_subscription: AtomicU64,
    revision: AtomicU64,
}

impl<T> Store<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Arc::new(Vec::new())),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            revision: AtomicU64::new(0),
        }
    }

    /// Current records
    pub fn snapshot(&self) -> Snapshot<T> {
        Arc::clone(&self.records.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of mutations applied so far
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the collection with the output of `f` and notify subscribers
    pub fn replace_with(&self, f: impl FnOnce(&[T]) -> Vec<T>) -> Snapshot<T> {
        let next = {
            let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
            let next = Arc::new(f(records.as_slice()));
            *records = Arc::clone(&next);
            self.revision.fetch_add(1, Ordering::AcqRel);
            next
        };

        // Callbacks run without any store lock held so they may read or subscribe
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(&next);
        }

        next
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&Snapshot<T>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Returns false if the id was never registered or already removed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp source that never goes backwards, even if the wall clock does
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let now = match *last {
            Some(prev) => Utc::now().max(prev),
            None => Utc::now(),
        };
        *last = Some(now);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn replace_swaps_reference_even_without_change() {
        let store: Store<u32> = Store::new();
        store.replace_with(|_| vec![1, 2, 3]);
        let before = store.snapshot();

        store.replace_with(|records| records.to_vec());
        let after = store.snapshot();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn subscribers_see_new_snapshot() {
        let store: Store<&'static str> = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.len()));

        store.replace_with(|_| vec!["a"]);
        store.replace_with(|records| {
            let mut next = records.to_vec();
            next.push("b");
            next
        });

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store: Store<u8> = Store::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.replace_with(|_| vec![1]);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.replace_with(|_| vec![2]);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscriber_may_read_store_during_notification() {
        let store: Arc<Store<u8>> = Arc::new(Store::new());
        let inner = Arc::clone(&store);
        let observed = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&observed);
        store.subscribe(move |_| {
            sink.store(inner.len(), Ordering::SeqCst);
        });

        store.replace_with(|_| vec![7, 8]);
        assert_eq!(observed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clock_is_non_decreasing() {
        let clock = MonotonicClock::default();
        let mut prev = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next >= prev);
            prev = next;
        }
    }
}
