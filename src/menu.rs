use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Copy,
    Paste,
}

/// Ctrl (Cmd on macOS) plus a character key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: char,
}

impl Shortcut {
    pub fn matches(&self, key: &str, command: bool) -> bool {
        let mut chars = key.chars();
        command
            && matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&self.key))
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ctrl+{}", self.key.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub action: MenuAction,
    pub label: &'static str,
    pub icon: &'static str,
    pub shortcut: Shortcut,
}

/// Screen position in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MenuPosition {
    pub x: f32,
    pub y: f32,
}

/// The table's right-click menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    entries: Vec<MenuEntry>,
    open_at: Option<MenuPosition>,
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self {
            entries: vec![
                MenuEntry {
                    action: MenuAction::Copy,
                    label: "Copy",
                    icon: "edit-copy",
                    shortcut: Shortcut { key: 'c' },
                },
                MenuEntry {
                    action: MenuAction::Paste,
                    label: "Paste",
                    icon: "edit-paste",
                    shortcut: Shortcut { key: 'v' },
                },
            ],
            open_at: None,
        }
    }
}

impl ContextMenu {
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn popup(&mut self, position: MenuPosition) {
        self.open_at = Some(position);
    }

    pub fn dismiss(&mut self) {
        self.open_at = None;
    }

    /// Where the menu is shown, `None` while hidden.
    pub fn position(&self) -> Option<MenuPosition> {
        self.open_at
    }

    pub fn shortcut_action(&self, key: &str, command: bool) -> Option<MenuAction> {
        self.entries
            .iter()
            .find(|entry| entry.shortcut.matches(key, command))
            .map(|entry| entry.action)
    }
}
