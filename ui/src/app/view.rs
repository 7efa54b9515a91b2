use crate::app::screens::{HomeScreen, MessageScreen};
use crate::components::common::StatusHint;
use crate::components::picker::Picker;
use crate::theme::Palette;
use tuirealm::Frame;
use tuirealm::ratatui::layout::{Constraint, Direction, Layout, Rect};
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::{Line, Span, Text};
use tuirealm::ratatui::widgets::{Paragraph, Wrap};

const PANE_GAP: u16 = 2;
const BUSY_TEXT: &str = "working…";
const LISTENER_STOPPED_TEXT: &str = "live updates stopped";

fn picker_text<V>(picker: &Picker<V>, palette: &Palette) -> Text<'static>
where
    V: Clone + PartialEq,
{
    let view = picker.view();
    let mut lines = Vec::with_capacity(view.lines.len() + 2);
    if !view.title.is_empty() {
        lines.push(Line::from(Span::styled(view.title, palette.title())));
        lines.push(Line::default());
    }

    for line in view.lines {
        let legend = if line.index == picker.selected() {
            palette.legend()
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(line.legend, legend),
            Span::raw(" "),
            Span::styled(line.label, palette.row(line.style)),
            Span::raw(" ".repeat(line.padding)),
            Span::styled(line.badge, palette.badge()),
        ]));
    }
    Text::from(lines)
}

pub fn view_home(f: &mut Frame, area: Rect, home: &HomeScreen, palette: &Palette) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length(home.mailbox_picker().width()), // Mailboxes
                Constraint::Length(PANE_GAP),
                Constraint::Min(0), // Messages
            ]
            .as_ref(),
        )
        .split(area);

    f.render_widget(
        Paragraph::new(picker_text(home.mailbox_picker(), palette)),
        panes[0],
    );
    f.render_widget(
        Paragraph::new(picker_text(home.message_picker(), palette)),
        panes[2],
    );
}

pub fn view_message(f: &mut Frame, area: Rect, reader: &MessageScreen, palette: &Palette) {
    f.render_widget(message_paragraph(reader, palette), area);
}

fn message_paragraph(reader: &MessageScreen, palette: &Palette) -> Paragraph<'static> {
    let header_rows = 3usize.saturating_sub(reader.scroll());
    let lines: Vec<Line> = reader
        .visible_lines()
        .into_iter()
        .enumerate()
        .map(|(row, text)| {
            if row < header_rows {
                Line::from(Span::styled(text, palette.title()))
            } else {
                Line::from(text)
            }
        })
        .collect();
    Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false })
}

pub fn view_status(
    f: &mut Frame,
    area: Rect,
    status: Option<&StatusHint>,
    busy: bool,
    listening: bool,
    palette: &Palette,
) {
    let line = match status {
        Some(hint) => Line::from(Span::styled(hint.text.clone(), palette.status(hint.level))),
        None if busy => Line::from(Span::styled(BUSY_TEXT, palette.title())),
        None if !listening => Line::from(Span::styled(LISTENER_STOPPED_TEXT, palette.title())),
        None => Line::default(),
    };
    f.render_widget(Paragraph::new(Text::from(line)), area);
}
