use crate::components::picker::NavAction;
use crate::config::keys::KeyBindingsConfig;
use tuirealm::event::{Key, KeyEvent, KeyModifiers};

/// What a key press means, independent of which screen is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Top,
    Bottom,
    Up,
    Down,
    Confirm,
    Dismiss,
    SwitchPane,
    PaneLeft,
    PaneRight,
    CreateMailbox,
    DeleteMailbox,
}

impl KeyAction {
    pub fn nav(self) -> Option<NavAction> {
        match self {
            KeyAction::Top => Some(NavAction::Top),
            KeyAction::Bottom => Some(NavAction::Bottom),
            KeyAction::Up => Some(NavAction::Up),
            KeyAction::Down => Some(NavAction::Down),
            KeyAction::Confirm => Some(NavAction::Confirm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    quit: char,
    top: char,
    bottom: char,
    up: char,
    down: char,
    create_mailbox: char,
    delete_mailbox: char,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeyBindingsConfig::default())
    }
}

impl KeyMap {
    pub fn from_config(keys: &KeyBindingsConfig) -> Self {
        Self {
            quit: keys.quit(),
            top: keys.top(),
            bottom: keys.bottom(),
            up: keys.up(),
            down: keys.down(),
            create_mailbox: keys.create_mailbox(),
            delete_mailbox: keys.delete_mailbox(),
        }
    }

    pub fn quit(&self) -> char {
        self.quit
    }

    pub fn top(&self) -> char {
        self.top
    }

    pub fn bottom(&self) -> char {
        self.bottom
    }

    pub fn up(&self) -> char {
        self.up
    }

    pub fn down(&self) -> char {
        self.down
    }

    pub fn create_mailbox(&self) -> char {
        self.create_mailbox
    }

    pub fn delete_mailbox(&self) -> char {
        self.delete_mailbox
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<KeyAction> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                Key::Char('c') => Some(KeyAction::Quit),
                Key::Char('p') => Some(KeyAction::Up),
                Key::Char('n') => Some(KeyAction::Down),
                _ => None,
            };
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }

        match event.code {
            Key::Char(c) => self.resolve_char(c),
            Key::Up => Some(KeyAction::Up),
            Key::Down => Some(KeyAction::Down),
            Key::Home => Some(KeyAction::Top),
            Key::End => Some(KeyAction::Bottom),
            Key::Enter => Some(KeyAction::Confirm),
            Key::Esc | Key::Backspace => Some(KeyAction::Dismiss),
            Key::Tab | Key::BackTab => Some(KeyAction::SwitchPane),
            Key::Left => Some(KeyAction::PaneLeft),
            Key::Right => Some(KeyAction::PaneRight),
            _ => None,
        }
    }

    fn resolve_char(&self, c: char) -> Option<KeyAction> {
        // Checked in order, so a binding shared by two actions resolves to the first.
        [
            (self.quit, KeyAction::Quit),
            (self.top, KeyAction::Top),
            (self.bottom, KeyAction::Bottom),
            (self.up, KeyAction::Up),
            (self.down, KeyAction::Down),
            (self.create_mailbox, KeyAction::CreateMailbox),
            (self.delete_mailbox, KeyAction::DeleteMailbox),
        ]
        .into_iter()
        .find_map(|(key, action)| (key == c).then_some(action))
    }
}
