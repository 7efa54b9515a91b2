use serde::Deserialize;

/// Key bindings configuration (`[keys]`)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct KeyBindingsConfig {
    // Global keys
    key_quit: Option<char>,

    // Navigation keys
    key_top: Option<char>,
    key_bottom: Option<char>,
    key_up: Option<char>,
    key_down: Option<char>,

    // Mailbox actions
    key_create_mailbox: Option<char>,
    key_delete_mailbox: Option<char>,
}

impl KeyBindingsConfig {
    // Global keys
    pub fn quit(&self) -> char {
        self.key_quit.unwrap_or('q')
    }

    // Navigation keys
    pub fn top(&self) -> char {
        self.key_top.unwrap_or('g')
    }

    pub fn bottom(&self) -> char {
        self.key_bottom.unwrap_or('G')
    }

    pub fn up(&self) -> char {
        self.key_up.unwrap_or('k')
    }

    pub fn down(&self) -> char {
        self.key_down.unwrap_or('j')
    }

    // Mailbox actions
    pub fn create_mailbox(&self) -> char {
        self.key_create_mailbox.unwrap_or('n')
    }

    pub fn delete_mailbox(&self) -> char {
        self.key_delete_mailbox.unwrap_or('d')
    }

    /// Every binding with the config key it is read from.
    pub fn bindings(&self) -> [(&'static str, char); 7] {
        [
            ("key_quit", self.quit()),
            ("key_top", self.top()),
            ("key_bottom", self.bottom()),
            ("key_up", self.up()),
            ("key_down", self.down()),
            ("key_create_mailbox", self.create_mailbox()),
            ("key_delete_mailbox", self.delete_mailbox()),
        ]
    }
}
