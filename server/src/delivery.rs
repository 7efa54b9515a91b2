use crate::bus::MailboxSignal;
use crate::common::StoreResult;
use crate::model::{AccountId, MailboxId, MessageSummary, NewMessage};
use crate::store::MailStore;
use std::sync::Arc;

/// Inbound path for new mail: store the message, then tell the account's
/// listeners which mailbox changed.
#[derive(Clone)]
pub struct Delivery {
    store: Arc<dyn MailStore>,
    signal: Arc<MailboxSignal>,
}

impl Delivery {
    pub fn new(store: Arc<dyn MailStore>, signal: Arc<MailboxSignal>) -> Self {
        Self { store, signal }
    }

    pub fn store(&self) -> &Arc<dyn MailStore> {
        &self.store
    }

    /// Stores `message` in `mailbox` and publishes the change for `account`.
    ///
    /// Nothing is published when the insert fails.
    pub async fn deliver(
        &self,
        account: AccountId,
        mailbox: MailboxId,
        message: NewMessage,
    ) -> StoreResult<MessageSummary> {
        let stored = self.store.insert_message(mailbox, message).await?;
        let woken = self.signal.publish(&account, mailbox);
        log::debug!(
            "Delivered message {} to mailbox {mailbox}, notified {woken} listener(s)",
            stored.id
        );
        Ok(stored)
    }
}
