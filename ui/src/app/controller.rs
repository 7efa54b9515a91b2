//! The interactive core.
//!
//! [`Controller`] owns every piece of UI state. It is driven only by [`Msg`]
//! values and answers with the [`Ticket`]s the caller has to run in the
//! background; it never performs I/O itself, which keeps it fully testable
//! without a terminal or a store.

use crate::app::requests::{Completion, Outcome, Request, RequestId, Ticket};
use crate::app::screens::{HomeIntent, HomeScreen, MessageIntent, MessageScreen};
use crate::components::common::{Msg, NotificationMsg, StatusActivityMsg, StatusHint};
use crate::components::help_bar::HelpEntry;
use crate::components::keymap::{KeyAction, KeyMap};
use server::model::{AccountId, MailboxId, MessageId, MessageSummary};
use std::collections::{HashMap, HashSet};

/// Columns reserved around the content area.
const HORIZONTAL_CHROME: u16 = 12;
/// Rows reserved for the title, the status line and the help bar.
const VERTICAL_CHROME: u16 = 5;

#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    Message(MessageScreen),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerState {
    Idle,
    Armed(RequestId),
    Stopped,
}

#[derive(Debug)]
pub struct Controller {
    account: AccountId,
    keymap: KeyMap,
    home: HomeScreen,
    screen: Screen,
    width: u16,
    height: u16,
    quitting: bool,
    listener: ListenerState,
    next_request: u64,
    in_flight: HashMap<RequestId, Request>,
    last_applied_mailboxes: Option<RequestId>,
    last_applied_messages: Option<RequestId>,
    marked_seen: HashSet<MessageId>,
    status: Option<StatusHint>,
    title: String,
    signature: String,
}

impl Controller {
    pub fn new(account: AccountId, keymap: KeyMap) -> Self {
        Self {
            account,
            keymap,
            home: HomeScreen::new(),
            screen: Screen::Home,
            width: 0,
            height: 0,
            quitting: false,
            listener: ListenerState::Idle,
            next_request: 1,
            in_flight: HashMap::new(),
            last_applied_mailboxes: None,
            last_applied_messages: None,
            marked_seen: HashSet::new(),
            status: None,
            title: String::new(),
            signature: String::new(),
        }
    }

    pub fn with_branding(mut self, title: impl Into<String>, signature: impl Into<String>) -> Self {
        self.title = title.into();
        self.signature = signature.into();
        self
    }

    /// Initial load: the mailbox list plus the first notification wait.
    pub fn start(&mut self) -> Vec<Ticket> {
        let mut tickets = vec![self.issue(Request::RefreshMailboxes {
            account: self.account,
            passive: false,
        })];
        tickets.extend(self.arm_listener());
        tickets
    }

    pub fn handle(&mut self, msg: Msg) -> Vec<Ticket> {
        if self.quitting {
            return vec![];
        }

        match msg {
            Msg::Input(key) => {
                self.status = None;
                match self.keymap.resolve(&key) {
                    Some(action) => self.on_action(action),
                    None => vec![],
                }
            }
            Msg::Resize(width, height) => {
                self.resize(width, height);
                vec![]
            }
            Msg::Completion(completion) => self.on_completion(completion),
            Msg::Notification(notification) => self.on_notification(notification),
            Msg::StatusActivity(StatusActivityMsg::Show(hint)) => {
                self.status = Some(hint);
                vec![]
            }
        }
    }

    fn issue(&mut self, request: Request) -> Ticket {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        if request.is_listener() {
            self.listener = ListenerState::Armed(id);
        } else {
            self.in_flight.insert(id, request);
        }
        log::debug!("Issuing {} {id}", request.describe());
        Ticket { id, request }
    }

    fn arm_listener(&mut self) -> Option<Ticket> {
        match self.listener {
            ListenerState::Idle => Some(self.issue(Request::AwaitNotification {
                account: self.account,
            })),
            ListenerState::Armed(_) | ListenerState::Stopped => None,
        }
    }

    fn content_size(&self) -> (u16, u16) {
        (
            self.width.saturating_sub(HORIZONTAL_CHROME),
            self.height.saturating_sub(VERTICAL_CHROME),
        )
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let (width, height) = self.content_size();
        self.home.resize(width, height);
        if let Screen::Message(reader) = &mut self.screen {
            reader.resize(height);
        }
    }

    fn on_action(&mut self, action: KeyAction) -> Vec<Ticket> {
        if action == KeyAction::Quit {
            log::info!("Quit requested");
            self.quitting = true;
            return vec![];
        }

        match &mut self.screen {
            Screen::Home => {
                let intents = self.home.handle_input(action);
                self.apply_home_intents(intents)
            }
            Screen::Message(reader) => {
                for intent in reader.handle_input(action) {
                    match intent {
                        MessageIntent::Dismiss => self.screen = Screen::Home,
                    }
                }
                vec![]
            }
        }
    }

    fn apply_home_intents(&mut self, intents: Vec<HomeIntent>) -> Vec<Ticket> {
        let mut tickets = Vec::new();
        for intent in intents {
            match intent {
                HomeIntent::SelectMailbox(mailbox) => {
                    tickets.push(self.issue(Request::RefreshMessages {
                        mailbox,
                        passive: false,
                    }));
                }
                HomeIntent::CreateMailbox => {
                    tickets.push(self.issue(Request::CreateMailbox {
                        account: self.account,
                    }));
                }
                HomeIntent::DeleteMailbox(mailbox) => {
                    tickets.push(self.issue(Request::DeleteMailbox { mailbox }));
                }
                HomeIntent::SelectMessage(message) => {
                    tickets.extend(self.open_message(message));
                }
            }
        }
        tickets
    }

    fn open_message(&mut self, message: MessageSummary) -> Option<Ticket> {
        let (_, height) = self.content_size();
        let ticket = self.mark_seen(&message);
        let shown = if ticket.is_some() {
            message.into_seen()
        } else {
            message
        };
        self.screen = Screen::Message(MessageScreen::new(shown, height));
        ticket
    }

    /// Flags `message` as seen locally and asks the store to do the same.
    ///
    /// Each message is written at most once per session, however many times
    /// it is opened.
    fn mark_seen(&mut self, message: &MessageSummary) -> Option<Ticket> {
        if message.seen || !self.marked_seen.insert(message.id) {
            return None;
        }

        self.home.replace_message(message.clone().into_seen());
        if let Some(mailbox) = self.home.mailbox(message.mailbox_id).cloned() {
            let unread = mailbox.unread_count.saturating_sub(1);
            self.home.replace_mailbox(mailbox.with_unread(unread));
        }
        Some(self.issue(Request::MarkSeen {
            message: message.id,
        }))
    }

    fn is_outdated(last_applied: Option<RequestId>, id: RequestId) -> bool {
        last_applied.is_some_and(|last| id < last)
    }

    fn on_completion(&mut self, completion: Completion) -> Vec<Ticket> {
        let Completion { id, outcome } = completion;
        let Some(request) = self.in_flight.remove(&id) else {
            log::debug!("Ignoring completion {id} nobody is waiting for");
            return vec![];
        };

        match (request, outcome) {
            (Request::RefreshMailboxes { passive, .. }, Outcome::Mailboxes(result)) => {
                if Self::is_outdated(self.last_applied_mailboxes, id) {
                    log::debug!("Dropping outdated mailbox list {id}");
                    return vec![];
                }
                // A failure leaves nothing applied, so older good data may still land.
                if result.is_ok() {
                    self.last_applied_mailboxes = Some(id);
                }
                let intents = self.home.apply_mailboxes(passive, result);
                if self.home.open_mailbox().is_none() {
                    self.screen = Screen::Home;
                }
                self.apply_home_intents(intents)
            }
            (Request::RefreshMessages { mailbox, passive }, Outcome::Messages(result)) => {
                if Self::is_outdated(self.last_applied_messages, id) {
                    log::debug!("Dropping outdated message list {id}");
                    return vec![];
                }
                let result = result.map(|messages| {
                    messages
                        .into_iter()
                        .map(|m| {
                            if self.marked_seen.contains(&m.id) {
                                m.into_seen()
                            } else {
                                m
                            }
                        })
                        .collect()
                });
                let succeeded = result.is_ok();
                if self.home.apply_messages(mailbox, passive, result) {
                    if succeeded {
                        self.last_applied_messages = Some(id);
                    }
                    self.refresh_reader();
                } else {
                    log::debug!("Dropping messages of mailbox {mailbox}, it is no longer open");
                }
                vec![]
            }
            (Request::CreateMailbox { .. }, Outcome::MailboxCreated(result)) => match result {
                Ok(mailbox) => {
                    self.status = Some(StatusHint::info(format!(
                        "Created mailbox {}",
                        mailbox.name
                    )));
                    vec![self.refresh_mailboxes(false)]
                }
                Err(e) => {
                    log::debug!("Mailbox creation failed: {e}");
                    vec![]
                }
            },
            (Request::DeleteMailbox { mailbox }, Outcome::MailboxDeleted(result)) => match result {
                Ok(()) => {
                    let name = self
                        .home
                        .mailbox(mailbox)
                        .map(|m| m.name.clone())
                        .unwrap_or_else(|| mailbox.to_string());
                    self.status = Some(StatusHint::info(format!("Deleted mailbox {name}")));
                    vec![self.refresh_mailboxes(false)]
                }
                Err(e) => {
                    log::debug!("Deleting mailbox {mailbox} failed: {e}");
                    vec![]
                }
            },
            (Request::MarkSeen { message }, Outcome::MarkedSeen(result)) => {
                if let Err(e) = result {
                    // The local flag stays; the next refresh shows what the store has.
                    log::warn!("Marking message {message} seen failed: {e}");
                }
                vec![]
            }
            (request, outcome) => {
                log::error!(
                    "Completion {id} does not match its request: {request:?} / {outcome:?}"
                );
                vec![]
            }
        }
    }

    fn refresh_mailboxes(&mut self, passive: bool) -> Ticket {
        self.issue(Request::RefreshMailboxes {
            account: self.account,
            passive,
        })
    }

    fn refresh_reader(&mut self) {
        if let Screen::Message(reader) = &mut self.screen {
            if let Some(message) = self.home.message(reader.message().id) {
                reader.replace_message(message.clone());
            }
        }
    }

    fn on_notification(&mut self, notification: NotificationMsg) -> Vec<Ticket> {
        match notification {
            NotificationMsg::MailboxChanged(mailbox) => {
                if self.listener == ListenerState::Stopped {
                    return vec![];
                }
                self.listener = ListenerState::Idle;
                log::debug!("Mailbox {mailbox} changed");

                let mut tickets = Vec::new();
                if self.home.open_mailbox() == Some(mailbox) {
                    tickets.push(self.issue(Request::RefreshMessages {
                        mailbox,
                        passive: true,
                    }));
                }
                tickets.push(self.refresh_mailboxes(true));
                tickets.extend(self.arm_listener());
                tickets
            }
            NotificationMsg::ListenerStopped => {
                log::info!("Notification listener stopped");
                self.listener = ListenerState::Stopped;
                vec![]
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self.screen {
            Screen::Home => Mode::Home,
            Screen::Message(_) => Mode::Message,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    /// Terminal size as last reported.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn status(&self) -> Option<&StatusHint> {
        self.status.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Whether any store operation is still running.
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn listener_armed(&self) -> bool {
        matches!(self.listener, ListenerState::Armed(_))
    }

    pub fn open_mailbox(&self) -> Option<MailboxId> {
        self.home.open_mailbox()
    }

    pub fn help_entries(&self) -> Vec<HelpEntry> {
        let keys = &self.keymap;
        let mut entries = match self.screen {
            Screen::Home => vec![
                HelpEntry::new(format!("↑/{}", keys.up()), "up"),
                HelpEntry::new(format!("↓/{}", keys.down()), "down"),
                HelpEntry::new("enter", "open"),
                HelpEntry::new("tab", "switch pane"),
                HelpEntry::new(keys.create_mailbox().to_string(), "new mailbox"),
                HelpEntry::new(keys.delete_mailbox().to_string(), "delete mailbox"),
            ],
            Screen::Message(_) => vec![
                HelpEntry::new(format!("↑/{}", keys.up()), "scroll up"),
                HelpEntry::new(format!("↓/{}", keys.down()), "scroll down"),
                HelpEntry::new("esc", "back"),
            ],
        };
        entries.push(HelpEntry::new(keys.quit().to_string(), "quit"));
        entries
    }

    /// Plain text rendition of the whole screen. Empty once quitting.
    pub fn render_text(&self) -> String {
        if self.quitting {
            return String::new();
        }

        let content = match &self.screen {
            Screen::Home => self.home.render_text(),
            Screen::Message(reader) => reader.render_text(),
        };
        let status = self
            .status
            .as_ref()
            .map(|hint| hint.text.clone())
            .unwrap_or_default();
        let help = self
            .help_entries()
            .iter()
            .map(HelpEntry::text)
            .collect::<Vec<_>>()
            .join(" • ");
        let help = if self.signature.is_empty() {
            help
        } else {
            format!("{help}  {}", self.signature)
        };

        format!("{content}\n\n{status}\n{help}")
    }
}
