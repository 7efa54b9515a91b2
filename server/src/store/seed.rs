use crate::common::{StoreError, StoreResult};
use crate::model::NewMessage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial content for a [`MemoryStore`](super::MemoryStore).
///
/// ```json
/// {
///   "mailboxes": [
///     {
///       "name": "inbox",
///       "messages": [
///         { "from": "ops@example.com", "subject": "Deploy done", "text": "All green.", "seen": true }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedData {
    #[serde(default)]
    pub mailboxes: Vec<SeedMailbox>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SeedMailbox {
    pub name: String,
    #[serde(default)]
    pub messages: Vec<SeedMessage>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SeedMessage {
    #[serde(flatten)]
    pub message: NewMessage,
    #[serde(default)]
    pub seen: bool,
}

impl SeedData {
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Seed {
            reason: e.to_string(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Seed {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_json(&content)
    }

    /// Small data set used when no seed file is configured.
    pub fn demo() -> Self {
        let message = |from: &str, subject: &str, text: &str, seen: bool| SeedMessage {
            message: NewMessage::new(from, subject, text),
            seen,
        };

        Self {
            mailboxes: vec![
                SeedMailbox {
                    name: "newsletters".to_string(),
                    messages: vec![
                        message(
                            "digest@weekly.example",
                            "This week in terminals",
                            "Five new ways to make your prompt slower.\n\nRead on.",
                            true,
                        ),
                        message(
                            "hello@launch.example",
                            "We are live!",
                            "Thanks for signing up early. Your invite code is waiting.",
                            false,
                        ),
                    ],
                },
                SeedMailbox {
                    name: "receipts".to_string(),
                    messages: vec![message(
                        "billing@shop.example",
                        "Your order has shipped",
                        "Order #1042 left the warehouse this morning.",
                        false,
                    )],
                },
                SeedMailbox {
                    name: "inbox".to_string(),
                    messages: vec![
                        message(
                            "alice@example.com",
                            "Lunch tomorrow?",
                            "Noodles at noon, same place as last time.",
                            true,
                        ),
                        message(
                            "ci@builds.example",
                            "Build #311 failed",
                            "The integration suite failed on the main branch.\n\nSee the logs for details.",
                            false,
                        ),
                        message(
                            "bob@example.com",
                            "Re: release checklist",
                            "I ticked off the changelog item. The rest is yours.",
                            false,
                        ),
                    ],
                },
            ],
        }
    }
}
