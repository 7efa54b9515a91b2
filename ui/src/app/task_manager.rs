use crate::app::listener::NotificationListener;
use crate::app::requests::{Completion, Job, Outcome, StoreCall, Ticket};
use crate::components::common::Msg;
use crate::error::{AppError, ErrorReporter};
use server::bus::MailboxSignal;
use server::store::MailStore;
use server::taskpool::TaskPool;
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Runs controller tickets on the task pool and posts the results back to
/// the event loop.
///
/// Failures never escape a task: they are reported as status hints and
/// travel back inside the completion so the controller can mark the
/// affected pane stale.
#[derive(Clone)]
pub struct TaskManager {
    taskpool: TaskPool,
    tx_to_main: Sender<Msg>,
    error_reporter: ErrorReporter,
    store: Arc<dyn MailStore>,
    signal: Arc<MailboxSignal>,
}

impl TaskManager {
    pub fn new(
        taskpool: TaskPool,
        tx_to_main: Sender<Msg>,
        error_reporter: ErrorReporter,
        store: Arc<dyn MailStore>,
        signal: Arc<MailboxSignal>,
    ) -> Self {
        Self {
            taskpool,
            tx_to_main,
            error_reporter,
            store,
            signal,
        }
    }

    pub fn dispatch_all(&self, tickets: impl IntoIterator<Item = Ticket>) {
        for ticket in tickets {
            self.dispatch(ticket);
        }
    }

    pub fn dispatch(&self, ticket: Ticket) {
        let Ticket { id, request } = ticket;
        let tx_to_main = self.tx_to_main.clone();
        let error_reporter = self.error_reporter.clone();

        let call = match request.job() {
            Job::Store(call) => call,
            Job::Listen(account) => {
                let listener = NotificationListener::new(self.signal.clone(), account);
                self.taskpool.execute(async move {
                    let notification = listener.next().await;
                    Self::send_message_or_report_error(
                        &tx_to_main,
                        Msg::Notification(notification),
                        "notification",
                        &error_reporter,
                    );
                });
                return;
            }
        };

        let store = self.store.clone();
        self.taskpool.execute(async move {
            let outcome = Self::run(store.as_ref(), call).await;
            if let Some(error) = outcome.error() {
                error_reporter.report_store_error(request.describe(), error);
            }
            Self::send_message_or_report_error(
                &tx_to_main,
                Msg::Completion(Completion::new(id, outcome)),
                "completion",
                &error_reporter,
            );
        });
    }

    async fn run(store: &dyn MailStore, call: StoreCall) -> Outcome {
        match call {
            StoreCall::ListMailboxes(account) => {
                Outcome::Mailboxes(store.list_mailboxes(account).await.map_err(AppError::from))
            }
            StoreCall::ListMessages(mailbox) => {
                Outcome::Messages(store.list_messages(mailbox).await.map_err(AppError::from))
            }
            StoreCall::CreateMailbox(account) => Outcome::MailboxCreated(
                store.create_mailbox(account).await.map_err(AppError::from),
            ),
            StoreCall::DeleteMailbox(mailbox) => Outcome::MailboxDeleted(
                store.delete_mailbox(mailbox).await.map_err(AppError::from),
            ),
            StoreCall::MarkSeen(message) => {
                Outcome::MarkedSeen(store.mark_seen(message).await.map_err(AppError::from))
            }
        }
    }

    /// Releases every notification wait, then cancels running tasks and
    /// refuses new ones. Returns how many waiters were released.
    pub fn shutdown(&self) -> usize {
        let released = self.signal.abort_all();
        log::debug!("Released {released} notification waiter(s)");
        self.taskpool.shutdown();
        released
    }

    /// Helper method to send a message to the main thread or report error if it fails
    pub fn send_message_or_report_error(
        tx: &Sender<Msg>,
        msg: Msg,
        context: &str,
        error_reporter: &ErrorReporter,
    ) {
        if let Err(e) = tx.send(msg) {
            error_reporter.report_send_error(context, e);
        }
    }
}
