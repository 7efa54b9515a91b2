use chrono::{TimeZone, Utc};
use claims::*;
use mailroom::app::controller::{Controller, Mode};
use mailroom::app::requests::{Completion, Outcome, Request, Ticket};
use mailroom::app::screens::Pane;
use mailroom::components::common::{Msg, NotificationMsg};
use mailroom::components::keymap::KeyMap;
use mailroom::AppError;
use server::model::{AccountId, MailboxId, MailboxSummary, MessageId, MessageSummary};
use tuirealm::event::{Key, KeyEvent, KeyModifiers};

// Helper module for driving the controller without a terminal
mod helpers {
    use super::*;

    pub const ACCOUNT: AccountId = AccountId(1);
    pub const A: MailboxId = MailboxId(1);
    pub const B: MailboxId = MailboxId(2);
    pub const C: MailboxId = MailboxId(3);
    pub const D: MailboxId = MailboxId(4);

    pub fn mailbox(id: MailboxId) -> MailboxSummary {
        let name = match id.0 {
            1 => "alpha",
            2 => "bravo",
            3 => "charlie",
            _ => "delta",
        };
        MailboxSummary::new(id, ACCOUNT, name)
    }

    pub fn mailboxes(ids: &[MailboxId]) -> Vec<MailboxSummary> {
        ids.iter().copied().map(mailbox).collect()
    }

    pub fn message(id: i64, mailbox: MailboxId, seen: bool) -> MessageSummary {
        MessageSummary {
            id: MessageId(id),
            mailbox_id: mailbox,
            seen,
            from: "sender@example.com".to_string(),
            subject: format!("message {id}"),
            text: "hello".to_string(),
            received_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    pub fn key(code: Key) -> Msg {
        Msg::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn char_key(c: char) -> Msg {
        key(Key::Char(c))
    }

    pub fn complete(controller: &mut Controller, ticket: &Ticket, outcome: Outcome) -> Vec<Ticket> {
        controller.handle(Msg::Completion(Completion::new(ticket.id, outcome)))
    }

    pub fn find(tickets: &[Ticket], matches: impl Fn(&Request) -> bool) -> Ticket {
        tickets
            .iter()
            .copied()
            .find(|t| matches(&t.request))
            .unwrap_or_else(|| panic!("no matching ticket in {tickets:?}"))
    }

    pub fn is_mailbox_refresh(request: &Request) -> bool {
        matches!(request, Request::RefreshMailboxes { .. })
    }

    pub fn is_message_refresh(request: &Request) -> bool {
        matches!(request, Request::RefreshMessages { .. })
    }

    /// Controller sized to 80x24 with mailboxes {A, B, C} loaded and A open.
    pub fn loaded() -> (Controller, Ticket) {
        let mut controller = Controller::new(ACCOUNT, KeyMap::default());
        controller.handle(Msg::Resize(80, 24));
        let start = controller.start();
        let tickets = complete(
            &mut controller,
            &start[0],
            Outcome::Mailboxes(Ok(mailboxes(&[A, B, C]))),
        );
        let messages = find(&tickets, is_message_refresh);
        (controller, messages)
    }

    /// Same as [`loaded`] but with B selected through the keyboard.
    pub fn with_bravo_selected() -> Controller {
        let (mut controller, _) = loaded();
        controller.handle(char_key('j'));
        let tickets = controller.handle(key(Key::Enter));
        assert_eq!(
            tickets[0].request,
            Request::RefreshMessages {
                mailbox: B,
                passive: false
            }
        );
        controller
    }

    pub fn passive_mailbox_refresh(controller: &mut Controller, changed: MailboxId) -> Ticket {
        let tickets =
            controller.handle(Msg::Notification(NotificationMsg::MailboxChanged(changed)));
        find(&tickets, is_mailbox_refresh)
    }
}

use helpers::*;

mod selection_follow_through {
    use super::*;

    #[test]
    fn first_load_opens_first_mailbox() {
        let (controller, messages) = loaded();
        assert_eq!(controller.open_mailbox(), Some(A));
        assert_eq!(
            messages.request,
            Request::RefreshMessages {
                mailbox: A,
                passive: false
            }
        );
    }

    #[test]
    fn passive_refresh_without_selected_mailbox_falls_back_to_first() {
        let mut controller = with_bravo_selected();
        let refresh = passive_mailbox_refresh(&mut controller, C);

        let tickets = complete(
            &mut controller,
            &refresh,
            Outcome::Mailboxes(Ok(mailboxes(&[A, C]))),
        );

        assert_eq!(controller.home().mailbox_picker().selected(), 0);
        assert_eq!(controller.home().mailbox_picker().highlighted(), 0);
        assert_eq!(controller.open_mailbox(), Some(A));
        assert_eq!(
            find(&tickets, is_message_refresh).request,
            Request::RefreshMessages {
                mailbox: A,
                passive: false
            }
        );
    }

    #[test]
    fn passive_refresh_keeps_selection_across_reorder() {
        let mut controller = with_bravo_selected();
        let refresh = passive_mailbox_refresh(&mut controller, C);

        let tickets = complete(
            &mut controller,
            &refresh,
            Outcome::Mailboxes(Ok(mailboxes(&[C, B, A]))),
        );

        assert!(tickets.is_empty());
        assert_eq!(controller.home().mailbox_picker().selected(), 1);
        assert_eq!(controller.open_mailbox(), Some(B));
    }

    #[test]
    fn non_passive_refresh_resets_to_first_row() {
        let mut controller = with_bravo_selected();
        let create = controller.handle(char_key('n'));
        let created = mailbox(D);
        let refresh = complete(
            &mut controller,
            &create[0],
            Outcome::MailboxCreated(Ok(created)),
        );
        assert_eq!(
            refresh[0].request,
            Request::RefreshMailboxes {
                account: ACCOUNT,
                passive: false
            }
        );

        let tickets = complete(
            &mut controller,
            &refresh[0],
            Outcome::Mailboxes(Ok(mailboxes(&[D, A, B, C]))),
        );

        assert_eq!(controller.home().mailbox_picker().selected(), 0);
        assert_eq!(controller.open_mailbox(), Some(D));
        assert_eq!(find(&tickets, is_message_refresh).request, Request::RefreshMessages {
            mailbox: D,
            passive: false
        });
    }

    #[test]
    fn deleting_the_last_mailbox_empties_both_panes() {
        let (mut controller, messages) = loaded();
        complete(
            &mut controller,
            &messages,
            Outcome::Messages(Ok(vec![message(1, A, false)])),
        );

        let delete = controller.handle(char_key('d'));
        assert_eq!(delete[0].request, Request::DeleteMailbox { mailbox: A });
        let refresh = complete(&mut controller, &delete[0], Outcome::MailboxDeleted(Ok(())));
        let tickets = complete(&mut controller, &refresh[0], Outcome::Mailboxes(Ok(vec![])));

        assert!(tickets.is_empty());
        assert_none!(controller.open_mailbox());
        assert!(controller.home().messages().is_empty());
    }
}

mod navigation {
    use super::*;

    #[test]
    fn bottom_top_and_confirm_on_short_list() {
        let (mut controller, _) = loaded();
        // 15 rows leave 10 for the panes, 8 of them for items
        controller.handle(Msg::Resize(80, 15));
        assert_eq!(controller.home().mailbox_picker().height(), 10);

        controller.handle(char_key('G'));
        assert_eq!(controller.home().mailbox_picker().highlighted(), 2);
        controller.handle(char_key('g'));
        assert_eq!(controller.home().mailbox_picker().highlighted(), 0);
        controller.handle(char_key('G'));

        let tickets = controller.handle(key(Key::Enter));
        assert_eq!(controller.home().mailbox_picker().selected(), 2);
        assert_eq!(controller.open_mailbox(), Some(C));
        assert_eq!(controller.home().pane(), Pane::Messages);
        assert_eq!(
            tickets[0].request,
            Request::RefreshMessages {
                mailbox: C,
                passive: false
            }
        );

        let text = controller.render_text();
        let rows: Vec<&str> = text.lines().collect();
        assert!(rows[0].starts_with("Mailboxes"));
        assert!(rows[2].starts_with("  alpha"));
        assert!(rows[4].starts_with("┃ charlie"));
    }

    #[test]
    fn navigation_is_ignored_while_empty() {
        let mut controller = Controller::new(ACCOUNT, KeyMap::default());
        controller.handle(Msg::Resize(80, 24));
        for c in ['j', 'k', 'g', 'G'] {
            assert!(controller.handle(char_key(c)).is_empty());
        }
        assert!(controller.handle(key(Key::Enter)).is_empty());
        assert!(controller.handle(char_key('d')).is_empty());
    }

    #[test]
    fn escape_returns_from_reader() {
        let (mut controller, messages) = loaded();
        complete(
            &mut controller,
            &messages,
            Outcome::Messages(Ok(vec![message(1, A, true)])),
        );
        controller.handle(key(Key::Right));
        controller.handle(key(Key::Enter));
        assert_eq!(controller.mode(), Mode::Message);
        assert!(controller.render_text().contains("Subject: message 1"));

        controller.handle(key(Key::Esc));
        assert_eq!(controller.mode(), Mode::Home);
    }
}

mod mark_seen {
    use super::*;

    fn reader_ready() -> (Controller, Ticket) {
        let (mut controller, messages) = loaded();
        complete(
            &mut controller,
            &messages,
            Outcome::Messages(Ok(vec![message(7, A, false), message(6, A, true)])),
        );
        controller.handle(key(Key::Tab));
        (controller, messages)
    }

    #[test]
    fn opening_twice_writes_once() {
        let (mut controller, _) = reader_ready();

        let first = controller.handle(key(Key::Enter));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].request, Request::MarkSeen {
            message: MessageId(7)
        });

        controller.handle(key(Key::Esc));
        let second = controller.handle(key(Key::Enter));
        assert!(second.is_empty());
    }

    #[test]
    fn already_seen_messages_are_not_written() {
        let (mut controller, _) = reader_ready();
        controller.handle(char_key('j'));
        assert!(controller.handle(key(Key::Enter)).is_empty());
        assert_eq!(controller.mode(), Mode::Message);
    }

    #[test]
    fn local_flag_survives_a_lagging_refresh() {
        let (mut controller, _) = reader_ready();
        controller.handle(key(Key::Enter));
        controller.handle(key(Key::Esc));

        let tickets = controller.handle(Msg::Notification(NotificationMsg::MailboxChanged(A)));
        let refresh = find(&tickets, is_message_refresh);
        complete(
            &mut controller,
            &refresh,
            Outcome::Messages(Ok(vec![message(7, A, false), message(6, A, true)])),
        );

        assert!(controller.home().messages()[0].seen);
        assert!(controller.handle(key(Key::Enter)).is_empty());
    }

    #[test]
    fn failure_is_not_rolled_back() {
        let (mut controller, _) = reader_ready();
        let tickets = controller.handle(key(Key::Enter));
        complete(
            &mut controller,
            &tickets[0],
            Outcome::MarkedSeen(Err(AppError::Store("down".to_string()))),
        );
        assert!(controller.home().messages()[0].seen);
    }
}

mod notifications {
    use super::*;

    #[test]
    fn change_in_another_mailbox_refreshes_list_only() {
        let (mut controller, messages) = loaded();
        complete(
            &mut controller,
            &messages,
            Outcome::Messages(Ok(vec![message(1, A, true)])),
        );
        controller.handle(key(Key::Tab));
        controller.handle(key(Key::Enter));
        assert_eq!(controller.mode(), Mode::Message);

        let tickets = controller.handle(Msg::Notification(NotificationMsg::MailboxChanged(B)));

        assert_eq!(tickets.len(), 2);
        assert_eq!(
            tickets[0].request,
            Request::RefreshMailboxes {
                account: ACCOUNT,
                passive: true
            }
        );
        assert!(tickets[1].request.is_listener());
        assert_eq!(controller.mode(), Mode::Message);
    }

    #[test]
    fn change_in_open_mailbox_also_refreshes_messages() {
        let (mut controller, _) = loaded();
        let tickets = controller.handle(Msg::Notification(NotificationMsg::MailboxChanged(A)));

        assert_eq!(tickets.len(), 3);
        assert_eq!(
            tickets[0].request,
            Request::RefreshMessages {
                mailbox: A,
                passive: true
            }
        );
        assert!(controller.listener_armed());
    }

    #[test]
    fn passive_message_refresh_keeps_highlight() {
        let (mut controller, messages) = loaded();
        complete(
            &mut controller,
            &messages,
            Outcome::Messages(Ok(vec![message(2, A, true), message(1, A, true)])),
        );
        controller.handle(key(Key::Tab));
        controller.handle(char_key('j'));

        let tickets = controller.handle(Msg::Notification(NotificationMsg::MailboxChanged(A)));
        complete(
            &mut controller,
            &find(&tickets, is_message_refresh),
            Outcome::Messages(Ok(vec![
                message(3, A, false),
                message(2, A, true),
                message(1, A, true),
            ])),
        );

        let picker = controller.home().message_picker();
        assert_eq!(picker.items()[picker.highlighted()].value, MessageId(1));
    }
}

mod stale_results {
    use super::*;

    #[test]
    fn messages_of_a_mailbox_left_behind_are_dropped() {
        let (mut controller, for_alpha) = loaded();
        controller.handle(char_key('j'));
        controller.handle(key(Key::Enter));

        complete(
            &mut controller,
            &for_alpha,
            Outcome::Messages(Ok(vec![message(1, A, false)])),
        );

        assert_eq!(controller.open_mailbox(), Some(B));
        assert!(controller.home().messages().is_empty());
    }

    #[test]
    fn failed_refresh_keeps_last_known_list() {
        let (mut controller, _) = loaded();
        let refresh = passive_mailbox_refresh(&mut controller, C);

        let tickets = complete(
            &mut controller,
            &refresh,
            Outcome::Mailboxes(Err(AppError::Store("unavailable".to_string()))),
        );

        assert!(tickets.is_empty());
        assert_eq!(controller.home().mailboxes().len(), 3);
        assert!(controller.home().mailboxes_stale());
        assert!(controller.render_text().contains("Mailboxes (stale)"));
    }

    #[test]
    fn older_mailbox_list_still_lands_after_newer_failure() {
        let mut controller = Controller::new(ACCOUNT, KeyMap::default());
        controller.handle(Msg::Resize(80, 24));
        let start = controller.start();
        let initial = find(&start, is_mailbox_refresh);
        let refresh = passive_mailbox_refresh(&mut controller, A);

        complete(
            &mut controller,
            &refresh,
            Outcome::Mailboxes(Err(AppError::Store("unavailable".to_string()))),
        );
        let tickets = complete(
            &mut controller,
            &initial,
            Outcome::Mailboxes(Ok(mailboxes(&[A, B, C]))),
        );

        assert_eq!(controller.home().mailboxes().len(), 3);
        assert!(!controller.home().mailboxes_stale());
        assert_eq!(controller.open_mailbox(), Some(A));
        assert!(tickets.iter().any(|t| is_message_refresh(&t.request)));
    }

    #[test]
    fn older_message_list_still_lands_after_newer_failure() {
        let (mut controller, initial) = loaded();
        let tickets =
            controller.handle(Msg::Notification(NotificationMsg::MailboxChanged(A)));
        let refresh = find(&tickets, is_message_refresh);

        complete(
            &mut controller,
            &refresh,
            Outcome::Messages(Err(AppError::Store("unavailable".to_string()))),
        );
        complete(
            &mut controller,
            &initial,
            Outcome::Messages(Ok(vec![message(1, A, false)])),
        );

        assert_eq!(controller.home().messages().len(), 1);
        assert!(!controller.home().messages_stale());
    }

    #[test]
    fn completions_are_not_applied_twice() {
        let (mut controller, messages) = loaded();
        complete(
            &mut controller,
            &messages,
            Outcome::Messages(Ok(vec![message(1, A, false)])),
        );
        complete(&mut controller, &messages, Outcome::Messages(Ok(vec![])));
        assert_eq!(controller.home().messages().len(), 1);
        assert!(!controller.is_busy());
    }
}
