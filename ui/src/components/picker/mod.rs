//! Scrollable, selectable list used for both the mailbox and the message pane.
//!
//! The picker is plain state: it never talks to the terminal and never fails.
//! Navigation clamps at both ends and is ignored while the picker is blurred
//! or empty. Rendering lives in [`rendering`] and is a pure function of the
//! state kept here.

mod rendering;

pub use rendering::{FIXED_CHROME, PickerLine, PickerView, RowStyle, TITLE_HEIGHT};

/// Display projection of a mailbox or message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem<V> {
    pub label: String,
    pub value: V,
    pub badge: String,
}

impl<V> PickerItem<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
            badge: String::new(),
        }
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Top,
    Bottom,
    Up,
    Down,
    Confirm,
}

#[derive(Debug, Clone)]
pub struct Picker<V> {
    title: String,
    items: Vec<PickerItem<V>>,
    highlighted: usize,
    selected: usize,
    focused: bool,
    width: u16,
    height: u16,
}

impl<V> Picker<V>
where
    V: Clone + PartialEq,
{
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            highlighted: 0,
            selected: 0,
            focused: false,
            width: 0,
            height: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn items(&self) -> &[PickerItem<V>] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn highlighted_item(&self) -> Option<&PickerItem<V>> {
        self.items.get(self.highlighted)
    }

    pub fn selected_item(&self) -> Option<&PickerItem<V>> {
        self.items.get(self.selected)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Replaces the list and resets both indices to the first row.
    pub fn set_items(&mut self, items: Vec<PickerItem<V>>) {
        self.items = items;
        self.highlighted = 0;
        self.selected = 0;
    }

    /// Replaces the list while keeping the selection on the same values.
    ///
    /// When the selected value is gone both indices go back to the first
    /// row. Otherwise the selection follows its value and the highlight
    /// follows its own value, falling back to the selection.
    pub fn merge_items(&mut self, items: Vec<PickerItem<V>>) {
        let selected = self.selected_item().map(|item| item.value.clone());
        let highlighted = self.highlighted_item().map(|item| item.value.clone());
        self.items = items;

        let position = |value: &Option<V>, items: &[PickerItem<V>]| {
            value
                .as_ref()
                .and_then(|v| items.iter().position(|item| &item.value == v))
        };

        match position(&selected, &self.items) {
            Some(selected) => {
                self.selected = selected;
                self.highlighted = position(&highlighted, &self.items).unwrap_or(selected);
            }
            None => {
                self.selected = 0;
                self.highlighted = 0;
            }
        }
    }

    /// Swaps the item carrying `value` for `item`, keeping indices untouched.
    pub fn replace_item(&mut self, value: &V, item: PickerItem<V>) -> bool {
        match self.items.iter_mut().find(|existing| &existing.value == value) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Applies a navigation key.
    ///
    /// Returns the chosen item only for [`NavAction::Confirm`].
    pub fn navigate(&mut self, action: NavAction) -> Option<PickerItem<V>> {
        if !self.focused || self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        match action {
            NavAction::Top => self.highlighted = 0,
            NavAction::Bottom => self.highlighted = last,
            NavAction::Up => self.highlighted = self.highlighted.saturating_sub(1),
            NavAction::Down => self.highlighted = (self.highlighted + 1).min(last),
            NavAction::Confirm => {
                self.selected = self.highlighted;
                return self.items.get(self.selected).cloned();
            }
        }
        None
    }
}
