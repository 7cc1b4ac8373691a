//! Pure mapping from surface state to draw commands

use crate::animator::{DOOR_LEFT_CLOSED_X, DOOR_RIGHT_CLOSED_X};
use crate::state::LockState;

/// Logical surface width in pixels
pub const SURFACE_WIDTH: i32 = 128;

/// Logical surface height in pixels
pub const SURFACE_HEIGHT: i32 = 64;

/// Vertical shift that keeps overlays clear of the status bar
const STATUS_BAR_SHIFT: i32 = 13;

/// Icons the surface can place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    DoorLeft,
    DoorRight,
    BackArrow,
    HintMascot,
}

impl Icon {
    /// Intrinsic (width, height) in pixels
    pub fn size(self) -> (i32, i32) {
        match self {
            Icon::DoorLeft | Icon::DoorRight => (70, 55),
            Icon::BackArrow => (10, 8),
            Icon::HintMascot => (45, 42),
        }
    }
}

/// Text faces available to the render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Primary,
    Secondary,
}

/// One drawing instruction for the external render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Place an icon with its top-left corner at (x, y)
    Icon { icon: Icon, x: i32, y: i32 },
    /// Multiline text wrapped in a tight frame
    FramedText {
        text: &'static str,
        x: i32,
        y: i32,
        font: Font,
    },
    /// Plain multiline text
    Text {
        text: &'static str,
        x: i32,
        y: i32,
        font: Font,
    },
    /// Bold frame with rounded corners
    RoundedFrame {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// Single pixel
    Dot { x: i32, y: i32 },
}

/// Map the surface state to its draw-command list.
///
/// Pure presentation: no timing, no counters, and identical inputs always
/// produce identical commands. The stable states draw nothing; the lock
/// indicator on the status bar belongs to the host.
pub fn render(state: LockState, door_offset: i8) -> Vec<DrawCommand> {
    match state {
        LockState::DoorsClosing => closing_doors(door_offset),
        LockState::LockedHintShown => locked_hint(),
        LockState::UnlockedHintShown => vec![DrawCommand::FramedText {
            text: "Unlocked",
            x: 42,
            y: 30 + STATUS_BAR_SHIFT,
            font: Font::Primary,
        }],
        LockState::Unlocked | LockState::Locked => Vec::new(),
    }
}

/// Doors slide in symmetrically from both edges, bottom-aligned
fn closing_doors(door_offset: i8) -> Vec<DrawCommand> {
    let offset = i32::from(door_offset);
    let (_, door_height) = Icon::DoorLeft.size();
    let door_y = SURFACE_HEIGHT - door_height;

    vec![
        DrawCommand::Icon {
            icon: Icon::DoorLeft,
            x: DOOR_LEFT_CLOSED_X + offset,
            y: door_y,
        },
        DrawCommand::Icon {
            icon: Icon::DoorRight,
            x: DOOR_RIGHT_CLOSED_X - offset,
            y: door_y,
        },
        DrawCommand::FramedText {
            text: "Locked",
            x: 42,
            y: 30 + STATUS_BAR_SHIFT,
            font: Font::Primary,
        },
    ]
}

/// Bordered panel telling the user how to unlock
fn locked_hint() -> Vec<DrawCommand> {
    vec![
        DrawCommand::RoundedFrame {
            x: 14,
            y: 2 + STATUS_BAR_SHIFT,
            width: 99,
            height: 48,
        },
        DrawCommand::Text {
            text: "To unlock\npress:",
            x: 65,
            y: 20 + STATUS_BAR_SHIFT,
            font: Font::Secondary,
        },
        DrawCommand::Icon {
            icon: Icon::BackArrow,
            x: 65,
            y: 36 + STATUS_BAR_SHIFT,
        },
        DrawCommand::Icon {
            icon: Icon::BackArrow,
            x: 80,
            y: 36 + STATUS_BAR_SHIFT,
        },
        DrawCommand::Icon {
            icon: Icon::BackArrow,
            x: 95,
            y: 36 + STATUS_BAR_SHIFT,
        },
        DrawCommand::Icon {
            icon: Icon::HintMascot,
            x: 16,
            y: 7 + STATUS_BAR_SHIFT,
        },
        DrawCommand::Dot { x: 17, y: 61 },
    ]
}
