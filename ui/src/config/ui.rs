use serde::Deserialize;

/// UI-specific configuration (`[ui]`)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct UIConfig {
    /// Text shown above the panes
    title: Option<String>,
    /// Right-aligned text next to the help bar
    signature: Option<String>,
    /// Color for titles, badges and the help bar (name, `#rrggbb` or 0-255)
    muted_color: Option<String>,
    /// Color for the highlighted row and the selection legend
    accent_color: Option<String>,
}

impl UIConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Mailroom")
    }

    pub fn signature(&self) -> &str {
        self.signature.as_deref().unwrap_or("mailroom")
    }

    pub fn muted_color(&self) -> &str {
        self.muted_color.as_deref().unwrap_or("244")
    }

    pub fn accent_color(&self) -> &str {
        self.accent_color.as_deref().unwrap_or("212")
    }
}
