use crate::components::keymap::KeyAction;
use server::model::MessageSummary;

const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M UTC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIntent {
    Dismiss,
}

/// Read-only view of a single message with a scrollable body.
///
/// Scrolling moves over source lines; the view wraps them to the pane width.
#[derive(Debug, Clone)]
pub struct MessageScreen {
    message: MessageSummary,
    scroll: usize,
    height: u16,
}

impl MessageScreen {
    pub fn new(message: MessageSummary, height: u16) -> Self {
        Self {
            message,
            scroll: 0,
            height,
        }
    }

    pub fn message(&self) -> &MessageSummary {
        &self.message
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Updates the shown message if `message` is the same one.
    pub fn replace_message(&mut self, message: MessageSummary) -> bool {
        if message.id != self.message.id {
            return false;
        }
        self.message = message;
        self.scroll = self.scroll.min(self.max_scroll());
        true
    }

    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn handle_input(&mut self, action: KeyAction) -> Vec<MessageIntent> {
        match action {
            KeyAction::Dismiss => return vec![MessageIntent::Dismiss],
            KeyAction::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyAction::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            KeyAction::Top => self.scroll = 0,
            KeyAction::Bottom => self.scroll = self.bottom(),
            _ => {}
        }
        vec![]
    }

    /// First line of the last full page.
    fn bottom(&self) -> usize {
        self.lines()
            .len()
            .saturating_sub(usize::from(self.height.max(1)))
    }

    // Wrapped lines can take more rows than the pane has, so scrolling may go
    // on until the last line sits at the top.
    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(1)
    }

    /// Header followed by the body, one entry per source line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("From:    {}", self.message.from),
            format!("Subject: {}", self.message.display_subject()),
            format!("Date:    {}", self.message.received_at.format(DATE_FORMAT)),
            String::new(),
        ];
        lines.extend(self.message.text.lines().map(str::to_string));
        lines
    }

    /// Lines from the scroll position on, at most one page of them.
    pub fn visible_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .skip(self.scroll)
            .take(usize::from(self.height))
            .collect()
    }

    pub fn render_text(&self) -> String {
        self.visible_lines().join("\n")
    }
}
