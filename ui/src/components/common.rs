use crate::app::requests::Completion;
use server::model::MailboxId;
use tuirealm::event::KeyEvent;

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum ComponentId {
    TitleLabel,
    InputRouter,
}

/// Everything the event loop reacts to.
///
/// Terminal events arrive through the mounted components; completions,
/// notifications and status hints arrive from background tasks over the
/// model's channel.
#[derive(Debug, PartialEq)]
pub enum Msg {
    Input(KeyEvent),
    Resize(u16, u16),
    Completion(Completion),
    Notification(NotificationMsg),
    StatusActivity(StatusActivityMsg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMsg {
    MailboxChanged(MailboxId),
    ListenerStopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusActivityMsg {
    Show(StatusHint),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Transient one-line message shown under the panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHint {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusHint {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}
