use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of the account owning a set of mailboxes.
    AccountId
);
id_type!(
    /// Identifier of a mailbox.
    MailboxId
);
id_type!(
    /// Identifier of a single delivered message.
    MessageId
);

/// A mailbox together with the number of messages in it that were not seen yet.
///
/// Summaries are read-only projections of the store. They are produced by
/// [`MailStore::list_mailboxes`](crate::store::MailStore::list_mailboxes) and
/// replaced wholesale on every refresh.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MailboxSummary {
    pub id: MailboxId,
    pub account_id: AccountId,
    pub name: String,
    pub unread_count: u32,
}

impl MailboxSummary {
    pub fn new(id: MailboxId, account_id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            account_id,
            name: name.into(),
            unread_count: 0,
        }
    }

    /// Returns a copy of this summary with the unread counter set to `unread_count`.
    pub fn with_unread(mut self, unread_count: u32) -> Self {
        self.unread_count = unread_count;
        self
    }
}

/// A message as listed inside a mailbox.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct MessageSummary {
    pub id: MessageId,
    pub mailbox_id: MailboxId,
    pub seen: bool,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl MessageSummary {
    /// Subject line suitable for display, never empty.
    pub fn display_subject(&self) -> &str {
        if self.subject.trim().is_empty() {
            "(no subject)"
        } else {
            &self.subject
        }
    }

    /// Returns a copy of this message flagged as seen.
    pub fn into_seen(mut self) -> Self {
        self.seen = true;
        self
    }
}

/// Payload of an inbound message before it is stored.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct NewMessage {
    pub from: String,
    pub subject: String,
    #[serde(default)]
    pub text: String,
}

impl NewMessage {
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }
}
