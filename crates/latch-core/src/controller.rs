//! Lock-surface state machine

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::animator;
use crate::clock::{ClockAdapter, TickRate, TimerDriver};
use crate::input::{InputEvent, InputKey, KeyPhase};
use crate::state::{LockModel, LockState};

/// Qualifying presses needed to complete the unlock gesture
pub const UNLOCK_PRESS_TARGET: u8 = 3;

/// Discrete notifications emitted to the desktop controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockNotification {
    /// A PIN-gated lock wants the PIN entry surface
    ShowPinInput,
    /// The unlock gesture completed; the host decides whether to unlock
    Unlocked,
    /// State advanced on a tick; the host should re-render
    Update,
}

/// The lock-surface controller.
///
/// One instance per device surface. Input and timer callbacks may arrive from
/// different tasks; every operation serializes on the internal model lock, so
/// a notification is never observable before the state change it reports.
pub struct LockController<T: TimerDriver> {
    model: Mutex<LockModel>,
    clock: ClockAdapter<T>,
    notifications: mpsc::UnboundedSender<LockNotification>,
}

impl<T: TimerDriver> LockController<T> {
    /// Create a controller and the receiving end of its notification channel
    pub fn new(driver: T) -> (Self, mpsc::UnboundedReceiver<LockNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            model: Mutex::new(LockModel::default()),
            clock: ClockAdapter::new(driver),
            notifications: tx,
        };
        (controller, rx)
    }

    fn model(&self) -> MutexGuard<'_, LockModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, notification: LockNotification) {
        // Receiver may already be gone during shutdown
        let _ = self.notifications.send(notification);
    }

    /// Lock the surface. Valid only while unlocked.
    pub fn request_lock(&self, pin_required: bool) {
        let mut model = self.model();
        debug_assert_eq!(
            model.state,
            LockState::Unlocked,
            "lock requested while not unlocked"
        );
        if model.state != LockState::Unlocked {
            error!(state = ?model.state, "lock requested while not unlocked");
        }
        model.state = LockState::Locked;
        model.pin_required = pin_required;
        debug!(pin_required, "surface locked");
    }

    /// Start the closing-door transition. Valid only while locked.
    pub fn begin_close_animation(&self) {
        let mut model = self.model();
        debug_assert_eq!(
            model.state,
            LockState::Locked,
            "close animation started outside the locked state"
        );
        if model.state != LockState::Locked {
            error!(state = ?model.state, "close animation started outside the locked state");
        }
        model.state = LockState::DoorsClosing;
        model.door_offset = animator::DOOR_OPEN_OFFSET;
        self.clock.run(TickRate::DoorAnimation);
    }

    /// Force-unlock the surface and show the confirmation hint.
    ///
    /// Also the unlock policy entry point: hosts call this after the
    /// `Unlocked` notification, or after their own PIN check succeeds.
    pub fn request_unlock(&self) {
        let mut model = self.model();
        model.press_count = 0;
        model.state = LockState::UnlockedHintShown;
        model.pin_required = false;
        self.clock.run(TickRate::UnlockedHint);
        debug!("surface unlocked");
    }

    /// Clock-driven step function
    pub fn on_tick(&self) {
        let mut model = self.model();
        match model.state {
            LockState::DoorsClosing => {
                let (next, moving) = animator::advance(model.door_offset);
                model.door_offset = next;
                if !moving {
                    model.state = LockState::Locked;
                    self.clock.stop();
                }
            }
            LockState::LockedHintShown => {
                model.state = LockState::Locked;
                self.clock.stop();
            }
            LockState::UnlockedHintShown => {
                model.state = LockState::Unlocked;
                self.clock.stop();
            }
            // Ticks must not arrive in stable states; stopping is idempotent
            LockState::Unlocked | LockState::Locked => self.clock.stop(),
        }
        self.notify(LockNotification::Update);
    }

    /// Input-driven step function; returns whether the event was consumed.
    ///
    /// `now` is the dispatcher's timestamp for the event, used to detect
    /// gesture-sequence timeouts.
    pub fn on_input(&self, event: InputEvent, now: Instant) -> bool {
        let mut model = self.model();

        // Any touch dismisses the unlocked confirmation, then falls through
        // so the host still sees the key
        if model.state == LockState::UnlockedHintShown && event.phase == KeyPhase::Press {
            model.state = LockState::Unlocked;
            self.clock.stop();
        }

        let state = model.state;
        if state == LockState::Unlocked || event.phase != KeyPhase::Short {
            return state != LockState::Unlocked;
        }

        if state == LockState::Locked && model.pin_required {
            self.notify(LockNotification::ShowPinInput);
        } else if state == LockState::Locked || state == LockState::LockedHintShown {
            // The timeout check must see the previous timestamp; it is
            // refreshed here and again unconditionally below
            if model.gesture_expired(now) {
                model.last_press = Some(now);
                model.press_count = 0;
            }

            // Every qualifying press refreshes the hint and its countdown
            if model.state == LockState::Locked && !model.pin_required {
                model.state = LockState::LockedHintShown;
            }
            self.clock.run(TickRate::LockedHint);

            if event.key == InputKey::Back {
                model.last_press = Some(now);
                model.press_count = model.press_count.saturating_add(1);
                if model.press_count == UNLOCK_PRESS_TARGET {
                    debug!("unlock gesture completed");
                    self.notify(LockNotification::Unlocked);
                }
            } else {
                model.press_count = 0;
            }

            model.last_press = Some(now);
        }

        true
    }

    /// True only while the locked hint overlay is up
    pub fn is_locked_hint_visible(&self) -> bool {
        self.model().state == LockState::LockedHintShown
    }

    /// Consistent copy of the model for rendering
    pub fn snapshot(&self) -> LockModel {
        *self.model()
    }

    /// Whether the underlying clock is currently armed
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }
}
