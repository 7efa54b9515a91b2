//! Keyed wait/publish primitive used for "mailbox changed" push notifications.
//!
//! A consumer calls [`Signal::wait`] with a key (an account id) and is
//! suspended until somebody publishes a value for that key, or until the wait
//! is aborted. Every publish wakes all current waiters of the key exactly
//! once; a waiter that wants further notifications has to wait again.

use crate::model::{AccountId, MailboxId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// Result of a single [`Signal::wait`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<V> {
    /// A value was published for the awaited key.
    Signalled(V),
    /// The wait was released without a value (session teardown).
    Aborted,
}

impl<V> WaitOutcome<V> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, WaitOutcome::Aborted)
    }
}

/// Map from key to the continuations currently waiting on it.
pub struct Signal<K, V> {
    waiters: Mutex<HashMap<K, Vec<oneshot::Sender<V>>>>,
}

/// Account scoped "mailbox changed" signal.
pub type MailboxSignal = Signal<AccountId, MailboxId>;

impl<K, V> Default for Signal<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            waiters: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Signal<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Vec<oneshot::Sender<V>>>> {
        // The map stays consistent even if a holder panicked mid-operation.
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Suspends until a value is published for `key` or the wait is aborted.
    pub async fn wait(&self, key: K) -> WaitOutcome<V> {
        let receiver = {
            let (sender, receiver) = oneshot::channel();
            self.lock().entry(key).or_default().push(sender);
            receiver
        };

        match receiver.await {
            Ok(value) => WaitOutcome::Signalled(value),
            Err(_) => WaitOutcome::Aborted,
        }
    }

    /// Wakes every current waiter of `key` with `value`.
    ///
    /// Returns the number of waiters that received the value. Waiters that
    /// registered after this call are not affected.
    pub fn publish(&self, key: &K, value: V) -> usize {
        let senders = self.lock().remove(key).unwrap_or_default();
        senders
            .into_iter()
            .filter(|sender| !sender.is_closed())
            .filter_map(|sender| sender.send(value.clone()).ok())
            .count()
    }

    /// Releases every waiter of `key` with [`WaitOutcome::Aborted`].
    pub fn abort(&self, key: &K) -> usize {
        self.lock()
            .remove(key)
            .map(|senders| senders.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0)
    }

    /// Releases all waiters of all keys.
    pub fn abort_all(&self) -> usize {
        let mut waiters = self.lock();
        let released = waiters
            .values()
            .flatten()
            .filter(|sender| !sender.is_closed())
            .count();
        waiters.clear();
        released
    }

    /// Number of live waiters registered for `key`.
    pub fn waiting(&self, key: &K) -> usize {
        self.lock()
            .get(key)
            .map(|senders| senders.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0)
    }
}
