//! Single-timer clock adapter with semantic tick rates

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How often the door animation advances (16 frames per second)
const DOOR_FRAME_PERIOD: Duration = Duration::from_millis(1000 / 16);

/// How long the locked hint stays up without further presses
const LOCKED_HINT_PERIOD: Duration = Duration::from_millis(1000);

/// How long the unlocked confirmation stays up
const UNLOCKED_HINT_PERIOD: Duration = Duration::from_millis(2000);

/// The one reusable timer primitive the controller owns.
///
/// Implementations deliver a tick back into the controller after each period.
/// Arming while already armed reconfigures the pending expiry in place; a
/// second timer must never be created. Disarming when idle is a no-op.
pub trait TimerDriver: Send + Sync {
    /// Arm (or re-arm) the timer with the given period
    fn arm(&self, period: Duration, repeating: bool);

    /// Cancel any pending expiry
    fn disarm(&self);
}

impl<T: TimerDriver + ?Sized> TimerDriver for Arc<T> {
    fn arm(&self, period: Duration, repeating: bool) {
        (**self).arm(period, repeating);
    }

    fn disarm(&self) {
        (**self).disarm();
    }
}

/// Semantic tick rates the lock surface runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickRate {
    /// Fast animation frames while the doors close
    DoorAnimation,
    /// Single shot that expires the locked hint
    LockedHint,
    /// Single shot that expires the unlocked confirmation
    UnlockedHint,
}

impl TickRate {
    /// Timer period for this rate
    pub fn period(self) -> Duration {
        match self {
            TickRate::DoorAnimation => DOOR_FRAME_PERIOD,
            TickRate::LockedHint => LOCKED_HINT_PERIOD,
            TickRate::UnlockedHint => UNLOCKED_HINT_PERIOD,
        }
    }

    /// Whether the timer keeps firing at this rate
    pub fn repeating(self) -> bool {
        matches!(self, TickRate::DoorAnimation)
    }
}

/// Multiplexes one timer primitive across the semantic rates.
///
/// At most one timer is ever outstanding: running while already running
/// reconfigures the pending expiry instead of creating a second timer.
pub struct ClockAdapter<T> {
    driver: T,
    running: AtomicBool,
}

impl<T: TimerDriver> ClockAdapter<T> {
    /// Wrap a timer primitive
    pub fn new(driver: T) -> Self {
        Self {
            driver,
            running: AtomicBool::new(false),
        }
    }

    /// Run the clock at the given rate, reconfiguring in place if running
    pub fn run(&self, rate: TickRate) {
        self.running.store(true, Ordering::Release);
        self.driver.arm(rate.period(), rate.repeating());
    }

    /// Stop the clock; idempotent
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            self.driver.disarm();
        }
    }

    /// Whether the clock is currently armed
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum DriverCall {
        Arm { period: Duration, repeating: bool },
        Disarm,
    }

    #[derive(Default)]
    struct RecordingDriver {
        calls: Mutex<Vec<DriverCall>>,
    }

    impl RecordingDriver {
        fn calls(&self) -> Vec<DriverCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TimerDriver for RecordingDriver {
        fn arm(&self, period: Duration, repeating: bool) {
            self.calls
                .lock()
                .unwrap()
                .push(DriverCall::Arm { period, repeating });
        }

        fn disarm(&self) {
            self.calls.lock().unwrap().push(DriverCall::Disarm);
        }
    }

    #[test]
    fn test_rate_periods() {
        assert_eq!(TickRate::DoorAnimation.period(), Duration::from_millis(62));
        assert!(TickRate::DoorAnimation.repeating());
        assert_eq!(TickRate::LockedHint.period(), Duration::from_millis(1000));
        assert!(!TickRate::LockedHint.repeating());
        assert_eq!(TickRate::UnlockedHint.period(), Duration::from_millis(2000));
        assert!(!TickRate::UnlockedHint.repeating());
    }

    #[test]
    fn test_run_while_running_rearms_in_place() {
        let driver = Arc::new(RecordingDriver::default());
        let clock = ClockAdapter::new(driver.clone());

        clock.run(TickRate::LockedHint);
        clock.run(TickRate::LockedHint);
        assert!(clock.is_running());

        // Two arms, never a disarm in between: the primitive reconfigures
        assert_eq!(
            driver.calls(),
            vec![
                DriverCall::Arm {
                    period: Duration::from_millis(1000),
                    repeating: false
                };
                2
            ]
        );
    }

    #[test]
    fn test_stop_is_idempotent() {
        let driver = Arc::new(RecordingDriver::default());
        let clock = ClockAdapter::new(driver.clone());

        clock.run(TickRate::DoorAnimation);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());

        let disarms = driver
            .calls()
            .iter()
            .filter(|c| **c == DriverCall::Disarm)
            .count();
        assert_eq!(disarms, 1);
    }

    #[test]
    fn test_stop_before_run_never_touches_driver() {
        let driver = Arc::new(RecordingDriver::default());
        let clock = ClockAdapter::new(driver.clone());

        clock.stop();
        assert!(driver.calls().is_empty());
    }
}
