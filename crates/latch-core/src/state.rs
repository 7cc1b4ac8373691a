//! Surface state and the mutable controller context

use std::time::{Duration, Instant};

use crate::animator::DOOR_CLOSED_OFFSET;

/// Longest gap between qualifying presses before the count resets
pub const GESTURE_WINDOW: Duration = Duration::from_millis(600);

/// Surface state; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// Idle, no overlay shown
    #[default]
    Unlocked,
    /// Overlay shown, accepting the unlock gesture
    Locked,
    /// Closing-door transition toward `Locked`
    DoorsClosing,
    /// Transient unlock instructions over `Locked`
    LockedHintShown,
    /// Transient confirmation over `Unlocked`
    UnlockedHintShown,
}

/// Mutable controller context
#[derive(Debug, Clone, Copy)]
pub struct LockModel {
    /// Current surface state
    pub state: LockState,
    /// Door travel progress; meaningful only in `DoorsClosing`
    pub door_offset: i8,
    /// Whether unlocking must route through PIN entry
    pub pin_required: bool,
    /// Consecutive qualifying presses so far
    pub press_count: u8,
    /// When the last gesture press landed; `None` counts as timed out
    pub last_press: Option<Instant>,
}

impl Default for LockModel {
    fn default() -> Self {
        Self {
            state: LockState::Unlocked,
            door_offset: DOOR_CLOSED_OFFSET,
            pin_required: false,
            press_count: 0,
            last_press: None,
        }
    }
}

impl LockModel {
    /// Whether the gesture window has elapsed since the last press
    pub fn gesture_expired(&self, now: Instant) -> bool {
        self.last_press
            .map_or(true, |last| now.saturating_duration_since(last) > GESTURE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_starts_unlocked() {
        let model = LockModel::default();
        assert_eq!(model.state, LockState::Unlocked);
        assert_eq!(model.press_count, 0);
        assert!(model.last_press.is_none());
    }

    #[test]
    fn test_gesture_expired_without_prior_press() {
        let model = LockModel::default();
        assert!(model.gesture_expired(Instant::now()));
    }

    #[test]
    fn test_gesture_window_boundary() {
        let base = Instant::now();
        let model = LockModel {
            last_press: Some(base),
            ..LockModel::default()
        };

        assert!(!model.gesture_expired(base + Duration::from_millis(600)));
        assert!(model.gesture_expired(base + Duration::from_millis(601)));
    }
}
