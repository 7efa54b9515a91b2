use crate::config::demo::DemoConfig;
use rand::Rng;
use rand::seq::SliceRandom;
use server::delivery::Delivery;
use server::model::{AccountId, NewMessage};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const SENDERS: [&str; 5] = [
    "alerts@status.example",
    "team@project.example",
    "noreply@shop.example",
    "friend@mail.example",
    "digest@weekly.example",
];

const SUBJECTS: [&str; 6] = [
    "Build finished",
    "Your order has shipped",
    "Lunch tomorrow?",
    "Weekly digest",
    "Incident resolved",
    "Re: meeting notes",
];

/// Delivers random mail to random mailboxes of the account so that push
/// notifications can be watched without an external sender.
pub struct TrafficGenerator {
    delivery: Delivery,
    account: AccountId,
    min_per_minute: u32,
    max_per_minute: u32,
}

impl TrafficGenerator {
    pub fn new(delivery: Delivery, account: AccountId, demo: &DemoConfig) -> Self {
        let min_per_minute = demo.traffic_min_per_minute().max(1);
        Self {
            delivery,
            account,
            min_per_minute,
            max_per_minute: demo.traffic_max_per_minute().max(min_per_minute),
        }
    }

    /// Runs until `cancel` fires.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::select! {
                () = self.run() => {},
                () = cancel.cancelled() => log::debug!("Traffic generator stopped"),
            }
        })
    }

    fn next_delay(&self) -> Duration {
        let per_minute = rand::thread_rng().gen_range(self.min_per_minute..=self.max_per_minute);
        Duration::from_millis((60_000 / u64::from(per_minute)).max(100))
    }

    async fn run(self) {
        log::info!(
            "Generating {}-{} messages per minute for account {}",
            self.min_per_minute,
            self.max_per_minute,
            self.account
        );
        let mut sequence = 0u64;
        loop {
            tokio::time::sleep(self.next_delay()).await;

            let mailboxes = match self.delivery.store().list_mailboxes(self.account).await {
                Ok(mailboxes) => mailboxes,
                Err(e) => {
                    log::warn!("Traffic generator could not list mailboxes: {e}");
                    continue;
                }
            };

            // Picked before awaiting so the generator future stays Send.
            let picked = {
                let mut rng = rand::thread_rng();
                mailboxes
                    .choose(&mut rng)
                    .map(|mailbox| (mailbox.id, random_message(&mut rng, sequence + 1)))
            };
            let Some((mailbox, message)) = picked else {
                continue;
            };

            sequence += 1;
            if let Err(e) = self.delivery.deliver(self.account, mailbox, message).await {
                log::warn!("Traffic generator could not deliver to mailbox {mailbox}: {e}");
            }
        }
    }
}

fn random_message<R: Rng + ?Sized>(rng: &mut R, sequence: u64) -> NewMessage {
    let from = SENDERS.choose(rng).copied().unwrap_or(SENDERS[0]);
    let subject = SUBJECTS.choose(rng).copied().unwrap_or(SUBJECTS[0]);
    NewMessage::new(
        from,
        subject,
        format!("Generated message #{sequence}.\n\nDelivered by the demo traffic generator."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use server::bus::{MailboxSignal, WaitOutcome};
    use server::store::{MailStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn delay_stays_within_configured_rate() {
        let store = Arc::new(MemoryStore::new());
        let delivery = Delivery::new(store, Arc::new(MailboxSignal::new()));
        let generator = TrafficGenerator {
            delivery,
            account: AccountId(1),
            min_per_minute: 60,
            max_per_minute: 120,
        };
        for _ in 0..50 {
            let delay = generator.next_delay();
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_secs(1));
        }
    }

    #[tokio::test]
    async fn delivers_and_notifies_until_cancelled() {
        let store = Arc::new(MemoryStore::new());
        let inbox = store.create_named_mailbox(AccountId(1), "inbox").await;
        let signal = Arc::new(MailboxSignal::new());
        let delivery = Delivery::new(store.clone(), signal.clone());
        let generator = TrafficGenerator {
            delivery,
            account: AccountId(1),
            min_per_minute: 600,
            max_per_minute: 600,
        };

        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait(AccountId(1)).await })
        };
        let cancel = CancellationToken::new();
        let handle = generator.spawn(cancel.clone());

        let outcome = tokio::time::timeout(Duration::from_secs(2), waiter)
            .await
            .expect("notified in time")
            .expect("waiter task");
        assert_eq!(outcome, WaitOutcome::Signalled(inbox.id));

        cancel.cancel();
        handle.await.expect("generator task");
        assert!(!store.list_messages(inbox.id).await.expect("list").is_empty());
    }
}
