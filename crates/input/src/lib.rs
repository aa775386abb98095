// Chunk: docs/chunks/input_events - Shared input event types

//! Input event types for keyboard, mouse, and scroll handling.
//!
//! These types abstract over the host toolkit's native events and provide a
//! clean Rust-native interface for the composer engine. The host is
//! responsible for translating platform events (with modifier state) into
//! these values; the engine never touches the windowing layer.

/// A keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new KeyEvent with the given key and modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a KeyEvent for a single character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers::default(),
        }
    }

    /// Returns a copy of this event with shift held.
    pub fn shifted(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// Modifier keys that can be held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key
    pub shift: bool,
    /// Control key
    pub control: bool,
    /// Alt / Option key
    pub alt: bool,
    /// Command / logo key
    pub command: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        control: false,
        alt: false,
        command: false,
    };

    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.command
    }

    /// True when the event should extend the selection rather than collapse
    /// it (the shift convention shared by every desktop toolkit).
    pub fn extends_selection(&self) -> bool {
        self.shift
    }

    /// True when movement should jump word-wise (Alt/Option on mac-style
    /// hosts, Control elsewhere).
    pub fn word_wise(&self) -> bool {
        self.alt || self.control
    }
}

/// Keys the composer engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    /// Backspace / delete backward
    Backspace,
    /// Forward delete
    Delete,
    /// Return / Enter
    Return,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
}

/// A mouse event, in widget-local coordinates (pixels from the top-left,
/// y increasing downward).
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// The type of mouse event
    pub kind: MouseEventKind,
    /// Position in widget coordinates
    pub position: (f32, f32),
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
    /// Number of consecutive clicks (1 for single, 2 for double, ...)
    pub click_count: u32,
}

impl MouseEvent {
    /// A plain single-click press at `(x, y)`.
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Down,
            position: (x, y),
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }

    /// A drag to `(x, y)` with the button held.
    pub fn drag(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Drag,
            position: (x, y),
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }

    /// A button release at `(x, y)`.
    pub fn release(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Up,
            position: (x, y),
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }
}

/// Kind of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Mouse button pressed
    Down,
    /// Mouse moved with the button held
    Drag,
    /// Mouse button released
    Up,
}

/// Scroll delta from a trackpad or mouse wheel, in pixels
/// (positive `dy` scrolls the content down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub dx: f32,
    pub dy: f32,
}

impl ScrollDelta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}
