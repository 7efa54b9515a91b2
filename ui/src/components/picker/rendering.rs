use super::Picker;
use std::ops::Range;

/// Rows taken by the title and the blank line under it.
pub const TITLE_HEIGHT: u16 = 2;

/// Columns taken by the legend and the space after it.
pub const FIXED_CHROME: usize = 2;

const SELECTED_LEGEND: &str = "┃";
const PLAIN_LEGEND: &str = " ";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    HighlightedFocused,
    Selected,
    Plain,
}

/// One rendered row. `index` is the item's position in the full list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerLine {
    pub index: usize,
    pub legend: &'static str,
    pub label: String,
    pub padding: usize,
    pub badge: String,
    pub style: RowStyle,
}

impl PickerLine {
    pub fn text(&self) -> String {
        format!(
            "{} {}{}{}",
            self.legend,
            self.label,
            " ".repeat(self.padding),
            self.badge
        )
    }

    /// Visible columns of [`PickerLine::text`].
    pub fn width(&self) -> usize {
        self.legend.chars().count()
            + 1
            + self.label.chars().count()
            + self.padding
            + self.badge.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub title: String,
    pub lines: Vec<PickerLine>,
}

impl PickerView {
    pub fn to_text(&self) -> String {
        let mut rows = Vec::with_capacity(self.lines.len() + 2);
        if !self.title.is_empty() {
            rows.push(self.title.clone());
            rows.push(String::new());
        }
        rows.extend(self.lines.iter().map(PickerLine::text));
        rows.join("\n")
    }
}

impl<V> Picker<V>
where
    V: Clone + PartialEq,
{
    /// Rows available for items once the title is drawn.
    pub fn content_height(&self) -> usize {
        let title = if self.title.is_empty() {
            0
        } else {
            TITLE_HEIGHT
        };
        usize::from(self.height.saturating_sub(title))
    }

    /// Slice of items that fits the viewport.
    ///
    /// Scrolls forward only once the highlight moves past the fold, so the
    /// highlighted row ends up last in the window.
    pub fn visible_range(&self) -> Range<usize> {
        let content = self.content_height();
        if content == 0 {
            return 0..0;
        }

        if self.highlighted > content - 1 {
            self.highlighted + 1 - content..self.highlighted + 1
        } else {
            0..self.items.len().min(content)
        }
    }

    pub fn view(&self) -> PickerView {
        let width = usize::from(self.width);
        let lines = self.items[self.visible_range()]
            .iter()
            .zip(self.visible_range())
            .map(|(item, index)| {
                let (label, padding) = fit_label(&item.label, &item.badge, width);
                PickerLine {
                    index,
                    legend: if index == self.selected {
                        SELECTED_LEGEND
                    } else {
                        PLAIN_LEGEND
                    },
                    label,
                    padding,
                    badge: item.badge.clone(),
                    style: self.row_style(index),
                }
            })
            .collect();

        PickerView {
            title: self.title.clone(),
            lines,
        }
    }

    pub fn render_text(&self) -> String {
        self.view().to_text()
    }

    fn row_style(&self, index: usize) -> RowStyle {
        if index == self.highlighted && self.focused {
            RowStyle::HighlightedFocused
        } else if index == self.selected {
            RowStyle::Selected
        } else {
            RowStyle::Plain
        }
    }
}

/// Shortens `label` so the whole row fits `width` columns.
///
/// Returns the label to draw and the padding between it and the badge. Only
/// the label is ever cut; an overflowing row is filled to exactly `width`.
fn fit_label(label: &str, badge: &str, width: usize) -> (String, usize) {
    let label_len = label.chars().count();
    let badge_len = badge.chars().count();
    let gap = usize::from(!badge.is_empty());

    // A badge always keeps at least one column between itself and the label.
    if label_len + badge_len + gap + FIXED_CHROME > width {
        let budget = width.saturating_sub(FIXED_CHROME + badge_len + gap).max(1);
        let mut kept: String = label.chars().take(budget - 1).collect();
        kept.push(ELLIPSIS);
        (kept, gap)
    } else if badge.is_empty() {
        (label.to_string(), 0)
    } else {
        (label.to_string(), width - FIXED_CHROME - label_len - badge_len)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{NavAction, PickerItem};
    use super::*;

    fn picker(count: i64, width: u16, height: u16) -> Picker<i64> {
        let mut picker = Picker::new("Mailboxes");
        picker.set_items(
            (0..count)
                .map(|v| PickerItem::new(format!("item {v}"), v))
                .collect(),
        );
        picker.set_viewport(width, height);
        picker.focus();
        picker
    }

    #[test]
    fn window_starts_at_top_until_highlight_passes_fold() {
        let mut picker = picker(10, 30, 6);
        assert_eq!(picker.content_height(), 4);
        assert_eq!(picker.visible_range(), 0..4);

        for _ in 0..3 {
            picker.navigate(NavAction::Down);
        }
        assert_eq!(picker.visible_range(), 0..4);

        picker.navigate(NavAction::Down);
        assert_eq!(picker.visible_range(), 1..5);

        picker.navigate(NavAction::Bottom);
        assert_eq!(picker.visible_range(), 6..10);
        let view = picker.view();
        assert_eq!(view.lines.last().map(|l| l.index), Some(9));
    }

    #[test]
    fn window_does_not_recenter_when_moving_back() {
        let mut picker = picker(10, 30, 6);
        picker.navigate(NavAction::Bottom);
        picker.navigate(NavAction::Up);
        assert_eq!(picker.visible_range(), 5..9);

        picker.navigate(NavAction::Top);
        assert_eq!(picker.visible_range(), 0..4);
    }

    #[test]
    fn short_lists_render_every_item() {
        let picker = picker(3, 30, 10);
        assert_eq!(picker.visible_range(), 0..3);
        assert_eq!(picker.view().lines.len(), 3);
    }

    #[test]
    fn untitled_picker_uses_full_height() {
        let mut picker = picker(10, 30, 3);
        picker.set_title("");
        assert_eq!(picker.content_height(), 3);
        assert!(!picker.render_text().starts_with('\n'));
    }

    #[test]
    fn zero_height_renders_no_rows() {
        let picker = picker(3, 30, 1);
        assert!(picker.view().lines.is_empty());
    }

    #[test]
    fn long_label_is_cut_with_ellipsis_keeping_badge() {
        let (label, padding) = fit_label("quarterly-newsletter-archive", "12", 16);
        assert_eq!(label, "quarterly-…");
        assert_eq!(padding, 1);
        assert_eq!(FIXED_CHROME + label.chars().count() + padding + 2, 16);
    }

    #[test]
    fn long_label_without_badge_fills_width() {
        let (label, padding) = fit_label("a very long subject line", "", 10);
        assert_eq!(label, "a very …");
        assert_eq!(padding, 0);
    }

    #[test]
    fn fitting_label_pads_badge_to_the_right_edge() {
        let (label, padding) = fit_label("inbox", "3", 12);
        assert_eq!(label, "inbox");
        assert_eq!(padding, 4);
    }

    #[test]
    fn badge_never_touches_the_label() {
        let (label, padding) = fit_label("inbox", "3", 8);
        assert_eq!(label, "inb…");
        assert_eq!(padding, 1);

        let (label, padding) = fit_label("inbox", "3", 9);
        assert_eq!(label, "inbox");
        assert_eq!(padding, 1);
    }

    #[test]
    fn exact_fit_row_renders_name_and_badge_apart() {
        let mut picker = Picker::new("");
        picker.set_items(vec![PickerItem::new("inbox", 1).with_badge("3")]);
        picker.set_viewport(8, 4);

        let row = picker.view().lines[0].text();
        assert_eq!(row, "┃ inb… 3");
        assert_eq!(row.chars().count(), 8);
    }

    #[test]
    fn rendered_rows_carry_legend_and_style() {
        let mut picker = picker(3, 20, 10);
        picker.navigate(NavAction::Down);
        picker.navigate(NavAction::Confirm);
        picker.navigate(NavAction::Down);

        let lines = picker.view().lines;
        assert_eq!(lines[0].style, RowStyle::Plain);
        assert_eq!(lines[1].style, RowStyle::Selected);
        assert_eq!(lines[1].legend, "┃");
        assert_eq!(lines[2].style, RowStyle::HighlightedFocused);
        assert_eq!(lines[2].legend, " ");

        picker.blur();
        let lines = picker.view().lines;
        assert_eq!(lines[2].style, RowStyle::Plain);
    }

    #[test]
    fn highlighted_and_selected_row_prefers_highlight_when_focused() {
        let picker = picker(2, 20, 10);
        let lines = picker.view().lines;
        assert_eq!(lines[0].style, RowStyle::HighlightedFocused);
        assert_eq!(lines[0].legend, "┃");
    }

    #[test]
    fn text_frame_starts_with_title_block() {
        let picker = picker(2, 20, 10);
        let text = picker.render_text();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0], "Mailboxes");
        assert_eq!(rows[1], "");
        assert_eq!(rows[2], "┃ item 0");
        assert_eq!(rows[3], "  item 1");
    }
}
