//! Storage collaborator.
//!
//! The UI only ever talks to storage through [`MailStore`], from background
//! tasks. [`MemoryStore`] is the implementation shipped with the binary; the
//! trait keeps the interactive core independent of how mail is persisted.

use crate::common::StoreResult;
use crate::model::{AccountId, MailboxId, MailboxSummary, MessageId, MessageSummary, NewMessage};
use async_trait::async_trait;

pub mod memory;
pub mod names;
pub mod seed;

pub use memory::MemoryStore;
pub use seed::{SeedData, SeedMailbox, SeedMessage};

/// Query and mutation interface over mailboxes and messages.
///
/// Implementations must be safe to call concurrently from several background
/// tasks. Each call is expected to be atomic on its own; callers never rely on
/// ordering between two calls issued at the same time.
///
/// # Examples
///
/// ```no_run
/// use server::model::AccountId;
/// use server::store::{MailStore, MemoryStore};
///
/// # async fn demo() -> server::common::StoreResult<()> {
/// let store = MemoryStore::new();
/// let created = store.create_mailbox(AccountId(1)).await?;
/// let mailboxes = store.list_mailboxes(AccountId(1)).await?;
/// assert_eq!(mailboxes[0].id, created.id);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MailStore: Send + Sync {
    /// Mailboxes of `account`, newest first, each with its unseen message count.
    async fn list_mailboxes(&self, account: AccountId) -> StoreResult<Vec<MailboxSummary>>;

    /// Messages of `mailbox`, newest first.
    async fn list_messages(&self, mailbox: MailboxId) -> StoreResult<Vec<MessageSummary>>;

    /// Creates a mailbox with a generated name for `account`.
    async fn create_mailbox(&self, account: AccountId) -> StoreResult<MailboxSummary>;

    /// Deletes `mailbox` together with every message it contains.
    async fn delete_mailbox(&self, mailbox: MailboxId) -> StoreResult<()>;

    /// Flags `message` as seen. Marking an already seen message succeeds.
    async fn mark_seen(&self, message: MessageId) -> StoreResult<()>;

    /// Stores an inbound message in `mailbox`.
    async fn insert_message(
        &self,
        mailbox: MailboxId,
        message: NewMessage,
    ) -> StoreResult<MessageSummary>;
}
