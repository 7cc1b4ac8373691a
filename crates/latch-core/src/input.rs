//! Input events as delivered by the external input dispatcher

/// Physical keys on the device navigation cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    Ok,
    Back,
}

/// Phase of a key's press cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    /// Key went down
    Press,
    /// Key came up
    Release,
    /// Completed short press (down then up within the short window)
    Short,
    /// Held past the long-press threshold
    Long,
    /// Auto-repeat while held
    Repeat,
}

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Which key the event is about
    pub key: InputKey,
    /// Where in the press cycle the key is
    pub phase: KeyPhase,
}

impl InputEvent {
    /// Create a new input event
    pub fn new(key: InputKey, phase: KeyPhase) -> Self {
        Self { key, phase }
    }
}
