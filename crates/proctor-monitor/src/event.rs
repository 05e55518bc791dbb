use crate::devtools::WindowMetrics;
use serde::{Deserialize, Serialize};

/// Modifier key state accompanying a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    /// Ctrl/Alt/Meta chords are blocked unconditionally; Shift is judged
    /// separately because it is legitimate for capitals while typing.
    pub fn chorded(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key identity as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Printable character, including space.
    Char(char),
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Tab,
    Escape,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    PrintScreen,
    ContextMenu,
    /// OS/Meta/Win key pressed on its own.
    Os,
    /// Function key F1..F12.
    Function(u8),
    /// Anything the host could not map.
    Other(String),
}

impl Key {
    /// Keys that count as plain typing inside an input field.
    pub fn is_typing_key(&self) -> bool {
        match self {
            Key::Char(c) => c.is_ascii_alphanumeric() || *c == ' ',
            Key::Backspace
            | Key::Delete
            | Key::ArrowLeft
            | Key::ArrowRight
            | Key::ArrowUp
            | Key::ArrowDown => true,
            _ => false,
        }
    }

    /// Human-readable name for warning text.
    pub(crate) fn name(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Enter => "Enter".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Delete => "Delete".to_string(),
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::ArrowUp => "ArrowUp".to_string(),
            Key::ArrowDown => "ArrowDown".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Insert => "Insert".to_string(),
            Key::Home => "Home".to_string(),
            Key::End => "End".to_string(),
            Key::PageUp => "PageUp".to_string(),
            Key::PageDown => "PageDown".to_string(),
            Key::PrintScreen => "PrintScreen".to_string(),
            Key::ContextMenu => "ContextMenu".to_string(),
            Key::Os => "OS".to_string(),
            Key::Function(n) => format!("F{}", n),
            Key::Other(name) => name.clone(),
        }
    }
}

/// Raw inbound event from the host page's event loop.
#[derive(Debug, Clone)]
pub enum RawEvent {
    /// Right-click / context-menu attempt.
    ContextMenu,
    /// Key press with modifier state and focus context.
    Key {
        key: Key,
        modifiers: Modifiers,
        /// Whether the event target is a text input or textarea.
        in_input_field: bool,
    },
    /// One pointer-move event.
    PointerMove,
    /// Tab visibility toggled.
    VisibilityChanged { hidden: bool },
    /// Window lost focus.
    FocusLost,
    /// Window regained focus.
    FocusGained,
    /// Text selection started.
    SelectionStart,
    /// Drag started.
    DragStart,
    /// Sampled outer/inner window dimensions.
    WindowMetrics(WindowMetrics),
}

/// Classification of a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeyClass {
    /// Pass through unsuppressed.
    Allowed,
    /// Suppress the default action and warn.
    Blocked { warning: String },
    /// Treat as a screenshot attempt.
    Screenshot,
}

/// Classify a key event against the whitelist.
///
/// Only Enter and plain typing inside input fields pass through. Modifier
/// chords, function keys, PrintScreen, and navigation keys are blocked;
/// screenshot-capable keys get the harsher screenshot handling.
pub(crate) fn classify_key(key: &Key, modifiers: Modifiers, in_input_field: bool) -> KeyClass {
    if modifiers.chorded() || (modifiers.shift && !(in_input_field && key.is_typing_key())) {
        return KeyClass::Blocked {
            warning: "Modifier keys are disabled for security".to_string(),
        };
    }

    match key {
        Key::PrintScreen | Key::Function(_) => KeyClass::Screenshot,
        Key::Tab
        | Key::Escape
        | Key::Insert
        | Key::Home
        | Key::End
        | Key::PageUp
        | Key::PageDown
        | Key::ContextMenu
        | Key::Os => KeyClass::Blocked {
            warning: format!("{} key is disabled for security", key.name()),
        },
        Key::Enter => KeyClass::Allowed,
        _ if in_input_field && key.is_typing_key() => KeyClass::Allowed,
        _ => KeyClass::Blocked {
            warning: format!("{} key is disabled for security", key.name()),
        },
    }
}
