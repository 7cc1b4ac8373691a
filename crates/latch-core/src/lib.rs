//! Latch Core - lock-surface controller
//!
//! State machine for a device lock screen: a closing-door transition,
//! transient hints, a press-counting unlock gesture, and a pure mapping from
//! state to draw commands. Timer scheduling and pixel drawing stay behind
//! seams so the core runs the same against hardware, a terminal, or a test
//! harness.

pub mod animator;
pub mod clock;
pub mod controller;
pub mod input;
pub mod render;
pub mod state;

pub use clock::{ClockAdapter, TickRate, TimerDriver};
pub use controller::{LockController, LockNotification, UNLOCK_PRESS_TARGET};
pub use input::{InputEvent, InputKey, KeyPhase};
pub use render::{DrawCommand, Font, Icon, SURFACE_HEIGHT, SURFACE_WIDTH};
pub use state::{LockModel, LockState, GESTURE_WINDOW};
