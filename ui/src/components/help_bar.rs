use tuirealm::Frame;
use tuirealm::props::Alignment;
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::{Line, Span, Text};
use tuirealm::ratatui::widgets::Paragraph;

use crate::theme::Palette;

/// One shortcut shown in the help bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub key: String,
    pub action: &'static str,
}

impl HelpEntry {
    pub fn new(key: impl Into<String>, action: &'static str) -> Self {
        Self {
            key: key.into(),
            action,
        }
    }

    pub fn text(&self) -> String {
        format!("{} {}", self.key, self.action)
    }
}

/// Help bar with the shortcuts of the live screen and the signature.
pub struct HelpBar {
    palette: Palette,
}

impl HelpBar {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    fn spans(&self, entries: &[HelpEntry], signature: &str) -> Vec<Span<'static>> {
        let mut spans: Vec<Span> = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", self.palette.title()));
            }
            spans.push(Span::styled(entry.key.clone(), self.palette.legend()));
            spans.push(Span::styled(
                format!(" {}", entry.action),
                self.palette.title(),
            ));
        }

        if !signature.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(signature.to_string(), self.palette.badge()));
        }
        spans
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, entries: &[HelpEntry], signature: &str) {
        let paragraph = Paragraph::new(Text::from(Line::from(self.spans(entries, signature))))
            .style(Style::default())
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }
}
