//! Keyboard shortcut registry and documentation.

use chalkboard_core::input::KeyEvent;
use chalkboard_core::session::{InteractionState, Outcome, Session};
use chalkboard_core::tools::ToolKind;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    DeleteSelection,
    Tool(ToolKind),
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, action: ShortcutAction, description: &'static str) -> Self {
        Self {
            key,
            action,
            description,
        }
    }

    /// Whether a DOM key name triggers this shortcut. Letters match either case.
    pub fn matches(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use ShortcutAction::*;
        vec![
            Shortcut::new("Delete", DeleteSelection, "Delete selected shape"),
            Shortcut::new("Backspace", DeleteSelection, "Delete selected shape"),
            Shortcut::new("D", Tool(ToolKind::Draw), "Draw tool"),
            Shortcut::new("E", Tool(ToolKind::Erase), "Erase tool"),
            Shortcut::new("T", Tool(ToolKind::Text), "Text tool"),
            Shortcut::new("R", Tool(ToolKind::Rect), "Rectangle tool"),
            Shortcut::new("C", Tool(ToolKind::Circle), "Circle tool"),
            Shortcut::new("A", Tool(ToolKind::Arrow), "Arrow tool"),
            Shortcut::new("M", Tool(ToolKind::Move), "Move tool"),
            Shortcut::new("S", Tool(ToolKind::Select), "Select tool"),
        ]
    }

    /// Find the action bound to a key.
    pub fn lookup(key: &str) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key))
            .map(|shortcut| shortcut.action)
    }

    /// Apply a key event to a session.
    ///
    /// Keys typed while a text prompt is open belong to the prompt and are
    /// ignored here.
    pub fn dispatch(session: &mut Session, event: &KeyEvent) -> Outcome {
        if let InteractionState::AwaitingTextInput { .. } = session.state() {
            return Outcome::Unchanged;
        }
        let KeyEvent::Pressed(key) = event else {
            return Outcome::Unchanged;
        };
        match Self::lookup(key) {
            Some(ShortcutAction::DeleteSelection) => session.handle_key(event),
            Some(ShortcutAction::Tool(tool)) => session.set_tool(tool),
            None => Outcome::Unchanged,
        }
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:12} {}", shortcut.key, shortcut.description);
        }
        println!();
    }
}
