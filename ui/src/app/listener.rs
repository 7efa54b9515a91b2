use crate::components::common::NotificationMsg;
use server::bus::{MailboxSignal, WaitOutcome};
use server::model::AccountId;
use std::sync::Arc;

/// One-shot wait for the next "mailbox changed" notification of an account.
///
/// Each call to [`NotificationListener::next`] yields exactly one message; the
/// controller re-arms by issuing a new wait once it has handled it.
#[derive(Clone)]
pub struct NotificationListener {
    signal: Arc<MailboxSignal>,
    account: AccountId,
}

impl NotificationListener {
    pub fn new(signal: Arc<MailboxSignal>, account: AccountId) -> Self {
        Self { signal, account }
    }

    pub async fn next(&self) -> NotificationMsg {
        match self.signal.wait(self.account).await {
            WaitOutcome::Signalled(mailbox) => NotificationMsg::MailboxChanged(mailbox),
            WaitOutcome::Aborted => {
                log::debug!("Notification wait for account {} aborted", self.account);
                NotificationMsg::ListenerStopped
            }
        }
    }
}
