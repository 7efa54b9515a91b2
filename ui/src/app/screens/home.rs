use super::side_by_side;
use crate::components::keymap::KeyAction;
use crate::components::picker::{Picker, PickerItem};
use crate::error::AppResult;
use server::model::{MailboxId, MailboxSummary, MessageId, MessageSummary};

const MAILBOX_TITLE: &str = "Mailboxes";
const MESSAGE_TITLE: &str = "Messages";
const STALE_SUFFIX: &str = " (stale)";
const PANE_GAP: u16 = 2;
const MIN_MAILBOX_PANE_WIDTH: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Mailboxes,
    Messages,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeIntent {
    SelectMailbox(MailboxId),
    CreateMailbox,
    DeleteMailbox(MailboxId),
    SelectMessage(MessageSummary),
}

fn mailbox_item(mailbox: &MailboxSummary) -> PickerItem<MailboxId> {
    let badge = if mailbox.unread_count > 0 {
        mailbox.unread_count.to_string()
    } else {
        String::new()
    };
    PickerItem::new(mailbox.name.clone(), mailbox.id).with_badge(badge)
}

fn message_item(message: &MessageSummary) -> PickerItem<MessageId> {
    let marker = if message.seen { ' ' } else { '•' };
    PickerItem::new(format!("{marker} {}", message.display_subject()), message.id)
        .with_badge(message.received_at.format("%b %d").to_string())
}

/// Mailbox list on the left, messages of the open mailbox on the right.
#[derive(Debug, Clone)]
pub struct HomeScreen {
    mailboxes: Vec<MailboxSummary>,
    mailbox_picker: Picker<MailboxId>,
    messages: Vec<MessageSummary>,
    message_picker: Picker<MessageId>,
    open_mailbox: Option<MailboxId>,
    pane: Pane,
    mailboxes_stale: bool,
    messages_stale: bool,
    width: u16,
    height: u16,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    pub fn new() -> Self {
        let mut mailbox_picker = Picker::new(MAILBOX_TITLE);
        mailbox_picker.focus();
        Self {
            mailboxes: Vec::new(),
            mailbox_picker,
            messages: Vec::new(),
            message_picker: Picker::new(MESSAGE_TITLE),
            open_mailbox: None,
            pane: Pane::Mailboxes,
            mailboxes_stale: false,
            messages_stale: false,
            width: 0,
            height: 0,
        }
    }

    pub fn mailboxes(&self) -> &[MailboxSummary] {
        &self.mailboxes
    }

    pub fn messages(&self) -> &[MessageSummary] {
        &self.messages
    }

    pub fn mailbox(&self, id: MailboxId) -> Option<&MailboxSummary> {
        self.mailboxes.iter().find(|m| m.id == id)
    }

    pub fn message(&self, id: MessageId) -> Option<&MessageSummary> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn mailbox_picker(&self) -> &Picker<MailboxId> {
        &self.mailbox_picker
    }

    pub fn message_picker(&self) -> &Picker<MessageId> {
        &self.message_picker
    }

    /// Mailbox whose messages are shown (or being loaded) in the right pane.
    pub fn open_mailbox(&self) -> Option<MailboxId> {
        self.open_mailbox
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn mailboxes_stale(&self) -> bool {
        self.mailboxes_stale
    }

    pub fn messages_stale(&self) -> bool {
        self.messages_stale
    }

    pub fn focus(&mut self, pane: Pane) {
        self.pane = pane;
        match pane {
            Pane::Mailboxes => {
                self.mailbox_picker.focus();
                self.message_picker.blur();
            }
            Pane::Messages => {
                self.mailbox_picker.blur();
                self.message_picker.focus();
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let (left, right) = self.pane_widths();
        self.mailbox_picker.set_viewport(left, height);
        self.message_picker.set_viewport(right, height);
    }

    fn pane_widths(&self) -> (u16, u16) {
        let left = (self.width / 3)
            .max(MIN_MAILBOX_PANE_WIDTH)
            .min(self.width);
        let right = self.width.saturating_sub(left + PANE_GAP);
        (left, right)
    }

    pub fn handle_input(&mut self, action: KeyAction) -> Vec<HomeIntent> {
        match action {
            KeyAction::SwitchPane => {
                let next = match self.pane {
                    Pane::Mailboxes => Pane::Messages,
                    Pane::Messages => Pane::Mailboxes,
                };
                self.focus(next);
                vec![]
            }
            KeyAction::PaneLeft => {
                self.focus(Pane::Mailboxes);
                vec![]
            }
            KeyAction::PaneRight => {
                self.focus(Pane::Messages);
                vec![]
            }
            KeyAction::CreateMailbox => vec![HomeIntent::CreateMailbox],
            KeyAction::DeleteMailbox => self
                .mailbox_picker
                .highlighted_item()
                .map(|item| vec![HomeIntent::DeleteMailbox(item.value)])
                .unwrap_or_default(),
            other => match other.nav() {
                Some(nav) => match self.pane {
                    Pane::Mailboxes => match self.mailbox_picker.navigate(nav) {
                        Some(item) => {
                            self.open(item.value);
                            self.focus(Pane::Messages);
                            vec![HomeIntent::SelectMailbox(item.value)]
                        }
                        None => vec![],
                    },
                    Pane::Messages => self
                        .message_picker
                        .navigate(nav)
                        .and_then(|item| self.message(item.value).cloned())
                        .map(|message| vec![HomeIntent::SelectMessage(message)])
                        .unwrap_or_default(),
                },
                None => vec![],
            },
        }
    }

    /// Merges a mailbox list result.
    ///
    /// A failure keeps the current list and only marks the pane stale. When
    /// the selected mailbox changes, the returned intents open the new one.
    pub fn apply_mailboxes(
        &mut self,
        passive: bool,
        result: AppResult<Vec<MailboxSummary>>,
    ) -> Vec<HomeIntent> {
        let mailboxes = match result {
            Ok(mailboxes) => mailboxes,
            Err(_) => {
                self.mailboxes_stale = true;
                self.update_titles();
                return vec![];
            }
        };

        let items = mailboxes.iter().map(mailbox_item).collect();
        self.mailboxes = mailboxes;
        self.mailboxes_stale = false;
        if passive {
            self.mailbox_picker.merge_items(items);
        } else {
            self.mailbox_picker.set_items(items);
        }

        let intents = match self.mailbox_picker.selected_item().map(|item| item.value) {
            None => {
                self.close_mailbox();
                vec![]
            }
            Some(id) if Some(id) == self.open_mailbox => vec![],
            Some(id) => {
                self.open(id);
                vec![HomeIntent::SelectMailbox(id)]
            }
        };
        self.update_titles();
        intents
    }

    /// Merges the message list of `mailbox`. Results for any other mailbox
    /// are ignored and `false` is returned.
    pub fn apply_messages(
        &mut self,
        mailbox: MailboxId,
        passive: bool,
        result: AppResult<Vec<MessageSummary>>,
    ) -> bool {
        if self.open_mailbox != Some(mailbox) {
            return false;
        }

        match result {
            Ok(messages) => {
                let items = messages.iter().map(message_item).collect();
                self.messages = messages;
                self.messages_stale = false;
                if passive {
                    self.message_picker.merge_items(items);
                } else {
                    self.message_picker.set_items(items);
                }
            }
            Err(_) => self.messages_stale = true,
        }
        self.update_titles();
        true
    }

    /// Swaps in a new summary for an existing mailbox.
    pub fn replace_mailbox(&mut self, mailbox: MailboxSummary) -> bool {
        let Some(existing) = self.mailboxes.iter_mut().find(|m| m.id == mailbox.id) else {
            return false;
        };
        self.mailbox_picker
            .replace_item(&mailbox.id, mailbox_item(&mailbox));
        *existing = mailbox;
        true
    }

    /// Swaps in a new summary for a message of the open mailbox.
    pub fn replace_message(&mut self, message: MessageSummary) -> bool {
        let Some(existing) = self.messages.iter_mut().find(|m| m.id == message.id) else {
            return false;
        };
        self.message_picker
            .replace_item(&message.id, message_item(&message));
        *existing = message;
        true
    }

    fn open(&mut self, mailbox: MailboxId) {
        if self.open_mailbox != Some(mailbox) {
            self.open_mailbox = Some(mailbox);
            self.messages.clear();
            self.message_picker.set_items(Vec::new());
            self.messages_stale = false;
        }
        self.update_titles();
    }

    fn close_mailbox(&mut self) {
        self.open_mailbox = None;
        self.messages.clear();
        self.message_picker.set_items(Vec::new());
        self.messages_stale = false;
        if self.pane == Pane::Messages {
            self.focus(Pane::Mailboxes);
        }
    }

    fn update_titles(&mut self) {
        let stale = |stale: bool| if stale { STALE_SUFFIX } else { "" };

        self.mailbox_picker
            .set_title(format!("{MAILBOX_TITLE}{}", stale(self.mailboxes_stale)));

        let name = self
            .open_mailbox
            .and_then(|id| self.mailbox(id))
            .map(|m| m.name.as_str())
            .unwrap_or(MESSAGE_TITLE)
            .to_string();
        self.message_picker
            .set_title(format!("{name}{}", stale(self.messages_stale)));
    }

    pub fn render_text(&self) -> String {
        let (left, _) = self.pane_widths();
        side_by_side(
            &self.mailbox_picker.render_text(),
            usize::from(left),
            usize::from(PANE_GAP),
            &self.message_picker.render_text(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::Utc;
    use claims::*;
    use server::model::AccountId;

    fn mailbox(id: i64, name: &str, unread: u32) -> MailboxSummary {
        MailboxSummary::new(MailboxId(id), AccountId(1), name).with_unread(unread)
    }

    fn message(id: i64, mailbox: i64, seen: bool) -> MessageSummary {
        MessageSummary {
            id: MessageId(id),
            mailbox_id: MailboxId(mailbox),
            seen,
            from: "someone@example.com".to_string(),
            subject: format!("subject {id}"),
            text: "body".to_string(),
            received_at: Utc::now(),
        }
    }

    fn loaded() -> HomeScreen {
        let mut home = HomeScreen::new();
        home.resize(60, 10);
        home.apply_mailboxes(
            false,
            Ok(vec![mailbox(3, "c", 0), mailbox(2, "b", 1), mailbox(1, "a", 2)]),
        );
        home
    }

    #[test]
    fn first_load_opens_the_first_mailbox() {
        let mut home = HomeScreen::new();
        let intents = home.apply_mailboxes(false, Ok(vec![mailbox(5, "inbox", 0)]));
        assert_eq!(intents, vec![HomeIntent::SelectMailbox(MailboxId(5))]);
        assert_eq!(home.open_mailbox(), Some(MailboxId(5)));
    }

    #[test]
    fn passive_refresh_with_same_selection_emits_nothing() {
        let mut home = loaded();
        let intents = home.apply_mailboxes(
            true,
            Ok(vec![mailbox(3, "c", 4), mailbox(2, "b", 1), mailbox(1, "a", 2)]),
        );
        assert!(intents.is_empty());
        assert_eq!(home.mailbox_picker().items()[0].badge, "4");
    }

    #[test]
    fn empty_list_clears_message_pane() {
        let mut home = loaded();
        assert!(home.apply_messages(MailboxId(3), false, Ok(vec![message(1, 3, false)])));
        home.focus(Pane::Messages);

        let intents = home.apply_mailboxes(false, Ok(vec![]));
        assert!(intents.is_empty());
        assert_none!(home.open_mailbox());
        assert!(home.messages().is_empty());
        assert_eq!(home.pane(), Pane::Mailboxes);
    }

    #[test]
    fn failed_refresh_keeps_data_and_marks_pane_stale() {
        let mut home = loaded();
        let intents =
            home.apply_mailboxes(true, Err(AppError::Store("unavailable".to_string())));
        assert!(intents.is_empty());
        assert_eq!(home.mailboxes().len(), 3);
        assert!(home.mailboxes_stale());
        assert_eq!(home.mailbox_picker().title(), "Mailboxes (stale)");

        home.apply_mailboxes(true, Ok(vec![mailbox(3, "c", 0)]));
        assert!(!home.mailboxes_stale());
    }

    #[test]
    fn messages_for_other_mailboxes_are_ignored() {
        let mut home = loaded();
        assert!(!home.apply_messages(MailboxId(1), false, Ok(vec![message(1, 1, false)])));
        assert!(home.messages().is_empty());
    }

    #[test]
    fn confirming_a_mailbox_opens_it_and_focuses_messages() {
        let mut home = loaded();
        home.handle_input(KeyAction::Down);
        let intents = home.handle_input(KeyAction::Confirm);

        assert_eq!(intents, vec![HomeIntent::SelectMailbox(MailboxId(2))]);
        assert_eq!(home.open_mailbox(), Some(MailboxId(2)));
        assert_eq!(home.pane(), Pane::Messages);
        assert!(home.message_picker().is_focused());
        assert!(!home.mailbox_picker().is_focused());
        assert_eq!(home.message_picker().title(), "b");
    }

    #[test]
    fn confirming_a_message_selects_it() {
        let mut home = loaded();
        home.apply_messages(
            MailboxId(3),
            false,
            Ok(vec![message(8, 3, false), message(7, 3, true)]),
        );
        home.focus(Pane::Messages);
        home.handle_input(KeyAction::Bottom);

        let intents = home.handle_input(KeyAction::Confirm);
        assert_eq!(intents, vec![HomeIntent::SelectMessage(message_with_id(&home, 7))]);
    }

    fn message_with_id(home: &HomeScreen, id: i64) -> MessageSummary {
        home.message(MessageId(id)).cloned().expect("message loaded")
    }

    #[test]
    fn delete_targets_highlighted_mailbox() {
        let mut home = loaded();
        home.handle_input(KeyAction::Bottom);
        assert_eq!(
            home.handle_input(KeyAction::DeleteMailbox),
            vec![HomeIntent::DeleteMailbox(MailboxId(1))]
        );
        assert_eq!(
            home.handle_input(KeyAction::CreateMailbox),
            vec![HomeIntent::CreateMailbox]
        );
    }

    #[test]
    fn replace_updates_list_and_badge() {
        let mut home = loaded();
        assert!(home.replace_mailbox(mailbox(1, "a", 1)));
        assert_eq!(home.mailbox_picker().items()[2].badge, "1");
        assert!(home.replace_mailbox(mailbox(1, "a", 0)));
        assert_eq!(home.mailbox_picker().items()[2].badge, "");
        assert!(!home.replace_mailbox(mailbox(42, "ghost", 0)));
    }

    #[test]
    fn unseen_messages_carry_a_marker() {
        let mut home = loaded();
        home.apply_messages(
            MailboxId(3),
            false,
            Ok(vec![message(2, 3, false), message(1, 3, true)]),
        );
        let items = home.message_picker().items();
        assert!(items[0].label.starts_with('•'));
        assert!(items[1].label.starts_with(' '));
    }

    #[test]
    fn panes_split_the_width() {
        let home = loaded();
        assert_eq!(home.mailbox_picker().width(), 20);
        assert_eq!(home.message_picker().width(), 38);
        assert_eq!(home.mailbox_picker().height(), 10);
        assert!(home.render_text().starts_with("Mailboxes"));
    }
}
