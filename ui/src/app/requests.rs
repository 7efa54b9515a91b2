//! Background work requested by the controller.
//!
//! A [`Ticket`] carries only immutable inputs and a correlation id. The task
//! that runs it answers with a [`Completion`] holding the same id, which the
//! controller matches against what it still expects.

use crate::error::{AppError, AppResult};
use server::model::{AccountId, MailboxId, MailboxSummary, MessageId, MessageSummary};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    RefreshMailboxes { account: AccountId, passive: bool },
    RefreshMessages { mailbox: MailboxId, passive: bool },
    CreateMailbox { account: AccountId },
    DeleteMailbox { mailbox: MailboxId },
    MarkSeen { message: MessageId },
    AwaitNotification { account: AccountId },
}

impl Request {
    /// Whether this is the long-lived notification wait.
    pub fn is_listener(&self) -> bool {
        matches!(self, Request::AwaitNotification { .. })
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Request::RefreshMailboxes { .. } => "refresh mailboxes",
            Request::RefreshMessages { .. } => "refresh messages",
            Request::CreateMailbox { .. } => "create mailbox",
            Request::DeleteMailbox { .. } => "delete mailbox",
            Request::MarkSeen { .. } => "mark message seen",
            Request::AwaitNotification { .. } => "wait for notifications",
        }
    }

    /// Splits the request into the kind of background work that answers it.
    pub fn job(self) -> Job {
        let call = match self {
            Request::RefreshMailboxes { account, .. } => StoreCall::ListMailboxes(account),
            Request::RefreshMessages { mailbox, .. } => StoreCall::ListMessages(mailbox),
            Request::CreateMailbox { account } => StoreCall::CreateMailbox(account),
            Request::DeleteMailbox { mailbox } => StoreCall::DeleteMailbox(mailbox),
            Request::MarkSeen { message } => StoreCall::MarkSeen(message),
            Request::AwaitNotification { account } => return Job::Listen(account),
        };
        Job::Store(call)
    }
}

/// One call against the mail store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    ListMailboxes(AccountId),
    ListMessages(MailboxId),
    CreateMailbox(AccountId),
    DeleteMailbox(MailboxId),
    MarkSeen(MessageId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Answered by a store call and a [`Completion`].
    Store(StoreCall),
    /// Answered by the next notification for the account.
    Listen(AccountId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: RequestId,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Mailboxes(AppResult<Vec<MailboxSummary>>),
    Messages(AppResult<Vec<MessageSummary>>),
    MailboxCreated(AppResult<MailboxSummary>),
    MailboxDeleted(AppResult<()>),
    MarkedSeen(AppResult<()>),
}

impl Outcome {
    /// The failure carried by this outcome, if any.
    pub fn error(&self) -> Option<&AppError> {
        match self {
            Outcome::Mailboxes(result) => result.as_ref().err(),
            Outcome::Messages(result) => result.as_ref().err(),
            Outcome::MailboxCreated(result) => result.as_ref().err(),
            Outcome::MailboxDeleted(result) | Outcome::MarkedSeen(result) => {
                result.as_ref().err()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub id: RequestId,
    pub outcome: Outcome,
}

impl Completion {
    pub fn new(id: RequestId, outcome: Outcome) -> Self {
        Self { id, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_listener_skips_the_store() {
        let requests = [
            Request::RefreshMailboxes {
                account: AccountId(1),
                passive: true,
            },
            Request::RefreshMessages {
                mailbox: MailboxId(2),
                passive: false,
            },
            Request::CreateMailbox {
                account: AccountId(1),
            },
            Request::DeleteMailbox {
                mailbox: MailboxId(2),
            },
            Request::MarkSeen {
                message: MessageId(3),
            },
        ];
        for request in requests {
            assert!(matches!(request.job(), Job::Store(_)), "{request:?}");
        }

        let listener = Request::AwaitNotification {
            account: AccountId(4),
        };
        assert_eq!(listener.job(), Job::Listen(AccountId(4)));
    }

    #[test]
    fn refreshes_keep_their_target() {
        let request = Request::RefreshMessages {
            mailbox: MailboxId(9),
            passive: true,
        };
        assert_eq!(
            request.job(),
            Job::Store(StoreCall::ListMessages(MailboxId(9)))
        );
    }
}
