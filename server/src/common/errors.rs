use crate::model::{MailboxId, MessageId};
use thiserror::Error;

/// Errors produced by the storage collaborator.
///
/// Every store operation is fallible. The UI never treats these as fatal: a
/// failed query leaves the last known data on screen and a failed mutation is
/// reported as a transient status hint.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`MailboxNotFound`] - the mailbox id does not exist (or was deleted)
/// - [`MessageNotFound`] - the message id does not exist
///
/// ## Infrastructure Errors
/// - [`Unavailable`] - the store could not serve the request at all
/// - [`Seed`] - seed data could not be read or parsed
///
/// # Examples
///
/// ```no_run
/// use server::common::StoreError;
/// use server::model::MailboxId;
///
/// fn describe(error: &StoreError) -> &'static str {
///     match error {
///         StoreError::MailboxNotFound { .. } => "mailbox is gone",
///         StoreError::MessageNotFound { .. } => "message is gone",
///         StoreError::Unavailable { .. } => "try again later",
///         StoreError::Seed { .. } => "fix the seed file",
///     }
/// }
///
/// assert_eq!(
///     describe(&StoreError::MailboxNotFound { id: MailboxId(3) }),
///     "mailbox is gone"
/// );
/// ```
///
/// [`MailboxNotFound`]: StoreError::MailboxNotFound
/// [`MessageNotFound`]: StoreError::MessageNotFound
/// [`Unavailable`]: StoreError::Unavailable
/// [`Seed`]: StoreError::Seed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Mailbox {id} not found")]
    MailboxNotFound { id: MailboxId },

    #[error("Message {id} not found")]
    MessageNotFound { id: MessageId },

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Invalid seed data: {reason}")]
    Seed { reason: String },
}

impl StoreError {
    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
