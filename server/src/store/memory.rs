use super::MailStore;
use super::names::unique_mailbox_name;
use super::seed::SeedData;
use crate::common::{StoreError, StoreResult};
use crate::model::{AccountId, MailboxId, MailboxSummary, MessageId, MessageSummary, NewMessage};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MailboxRecord {
    account_id: AccountId,
    name: String,
}

#[derive(Debug, Default)]
struct Inner {
    next_mailbox_id: i64,
    next_message_id: i64,
    mailboxes: BTreeMap<MailboxId, MailboxRecord>,
    messages: BTreeMap<MessageId, MessageSummary>,
}

impl Inner {
    fn allocate_mailbox_id(&mut self) -> MailboxId {
        self.next_mailbox_id += 1;
        MailboxId(self.next_mailbox_id)
    }

    fn allocate_message_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        MessageId(self.next_message_id)
    }

    fn unread_count(&self, mailbox: MailboxId) -> u32 {
        let count = self
            .messages
            .values()
            .filter(|m| m.mailbox_id == mailbox && !m.seen)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn summary(&self, id: MailboxId, record: &MailboxRecord) -> MailboxSummary {
        MailboxSummary::new(id, record.account_id, record.name.clone())
            .with_unread(self.unread_count(id))
    }

    fn insert_mailbox(&mut self, account_id: AccountId, name: String) -> MailboxSummary {
        let id = self.allocate_mailbox_id();
        let record = MailboxRecord { account_id, name };
        let summary = self.summary(id, &record);
        self.mailboxes.insert(id, record);
        summary
    }

    fn insert_message(
        &mut self,
        mailbox: MailboxId,
        message: NewMessage,
        seen: bool,
    ) -> StoreResult<MessageSummary> {
        if !self.mailboxes.contains_key(&mailbox) {
            return Err(StoreError::MailboxNotFound { id: mailbox });
        }

        let id = self.allocate_message_id();
        let stored = MessageSummary {
            id,
            mailbox_id: mailbox,
            seen,
            from: message.from,
            subject: message.subject,
            text: message.text,
            received_at: Utc::now(),
        };
        self.messages.insert(id, stored.clone());
        Ok(stored)
    }
}

/// In-process [`MailStore`] backed by ordered maps.
///
/// Ids are allocated monotonically so "descending by id" is also "newest
/// first". An optional artificial latency is applied to every call, which is
/// handy to watch the UI stay responsive while queries are in flight.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = (!latency.is_zero()).then_some(latency);
        self
    }

    /// Builds a store for `account` populated from `seed`.
    ///
    /// Mailboxes are created in the order listed, so the last one listed is
    /// shown first.
    pub fn from_seed(account: AccountId, seed: &SeedData) -> StoreResult<Self> {
        let mut inner = Inner::default();
        for mailbox in &seed.mailboxes {
            let summary = inner.insert_mailbox(account, mailbox.name.clone());
            for message in &mailbox.messages {
                inner.insert_message(summary.id, message.message.clone(), message.seen)?;
            }
        }

        log::debug!(
            "Seeded store for account {account} with {} mailboxes and {} messages",
            inner.mailboxes.len(),
            inner.messages.len()
        );

        Ok(Self {
            inner: RwLock::new(inner),
            latency: None,
        })
    }

    /// Creates a mailbox with an explicit name.
    pub async fn create_named_mailbox(
        &self,
        account: AccountId,
        name: impl Into<String>,
    ) -> MailboxSummary {
        self.inner.write().await.insert_mailbox(account, name.into())
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl MailStore for MemoryStore {
    async fn list_mailboxes(&self, account: AccountId) -> StoreResult<Vec<MailboxSummary>> {
        self.simulate_latency().await;
        let inner = self.inner.read().await;
        Ok(inner
            .mailboxes
            .iter()
            .rev()
            .filter(|(_, record)| record.account_id == account)
            .map(|(id, record)| inner.summary(*id, record))
            .collect())
    }

    async fn list_messages(&self, mailbox: MailboxId) -> StoreResult<Vec<MessageSummary>> {
        self.simulate_latency().await;
        let inner = self.inner.read().await;
        if !inner.mailboxes.contains_key(&mailbox) {
            return Err(StoreError::MailboxNotFound { id: mailbox });
        }

        Ok(inner
            .messages
            .values()
            .rev()
            .filter(|m| m.mailbox_id == mailbox)
            .cloned()
            .collect())
    }

    async fn create_mailbox(&self, account: AccountId) -> StoreResult<MailboxSummary> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;
        let name = {
            let mut rng = rand::thread_rng();
            unique_mailbox_name(&mut rng, |candidate| {
                inner
                    .mailboxes
                    .values()
                    .any(|r| r.account_id == account && r.name == candidate)
            })
        };

        let summary = inner.insert_mailbox(account, name);
        log::info!("Created mailbox {} ({})", summary.name, summary.id);
        Ok(summary)
    }

    async fn delete_mailbox(&self, mailbox: MailboxId) -> StoreResult<()> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;
        if inner.mailboxes.remove(&mailbox).is_none() {
            return Err(StoreError::MailboxNotFound { id: mailbox });
        }

        let before = inner.messages.len();
        inner.messages.retain(|_, m| m.mailbox_id != mailbox);
        log::info!(
            "Deleted mailbox {mailbox} and {} of its messages",
            before - inner.messages.len()
        );
        Ok(())
    }

    async fn mark_seen(&self, message: MessageId) -> StoreResult<()> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;
        let stored = inner
            .messages
            .get_mut(&message)
            .ok_or(StoreError::MessageNotFound { id: message })?;
        stored.seen = true;
        Ok(())
    }

    async fn insert_message(
        &self,
        mailbox: MailboxId,
        message: NewMessage,
    ) -> StoreResult<MessageSummary> {
        self.simulate_latency().await;
        self.inner.write().await.insert_message(mailbox, message, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    const ACCOUNT: AccountId = AccountId(1);

    #[tokio::test]
    async fn mailboxes_are_listed_newest_first_with_unread_counts() {
        let store = MemoryStore::new();
        let first = store.create_named_mailbox(ACCOUNT, "first").await;
        let second = store.create_named_mailbox(ACCOUNT, "second").await;
        assert_ok!(
            store
                .insert_message(first.id, NewMessage::new("a", "one", ""))
                .await
        );
        assert_ok!(
            store
                .insert_message(first.id, NewMessage::new("a", "two", ""))
                .await
        );

        let listed = assert_ok!(store.list_mailboxes(ACCOUNT).await);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[0].unread_count, 0);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(listed[1].unread_count, 2);
    }

    #[tokio::test]
    async fn other_accounts_are_not_listed() {
        let store = MemoryStore::new();
        store.create_named_mailbox(AccountId(2), "theirs").await;
        let listed = assert_ok!(store.list_mailboxes(ACCOUNT).await);
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn listing_messages_of_missing_mailbox_fails() {
        let store = MemoryStore::new();
        let error = assert_err!(store.list_messages(MailboxId(99)).await);
        assert_eq!(error, StoreError::MailboxNotFound { id: MailboxId(99) });
    }

    #[tokio::test]
    async fn seed_preserves_seen_flags() {
        let store = assert_ok!(MemoryStore::from_seed(ACCOUNT, &SeedData::demo()));
        let mailboxes = assert_ok!(store.list_mailboxes(ACCOUNT).await);
        let inbox = mailboxes
            .iter()
            .find(|m| m.name == "inbox")
            .expect("inbox seeded");
        assert_eq!(inbox.unread_count, 2);
    }

    #[tokio::test]
    async fn latency_zero_is_ignored() {
        let store = MemoryStore::new().with_latency(Duration::ZERO);
        assert_none!(store.latency);
    }
}
