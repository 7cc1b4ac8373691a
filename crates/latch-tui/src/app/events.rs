//! Event funnel and the tokio timer primitive

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use tokio::sync::{mpsc, watch};

use latch_core::TimerDriver;

/// Events funneled into the application loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input
    Key(KeyCode),
    /// The controller's timer expired
    Tick,
}

/// Forward terminal key presses into the funnel
pub fn spawn_keyboard_task(events: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(Ok(event)) = stream.next().await {
            if let CrosstermEvent::Key(key) = event {
                if key.kind == KeyEventKind::Press && events.send(Event::Key(key.code)).is_err() {
                    break;
                }
            }
        }
    });
}

/// Armed state of the timer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerMode {
    Idle,
    Armed { period: Duration, repeating: bool },
}

/// The controller's timer primitive on tokio.
///
/// One long-lived task owns the schedule; arming replaces the pending expiry
/// in place, so at most one timer is ever outstanding. Expiries land in the
/// application funnel as ticks.
pub struct TokioTimer {
    mode: watch::Sender<TimerMode>,
}

impl TokioTimer {
    /// Spawn the timer task. Must be called from a runtime context.
    pub fn spawn(events: mpsc::UnboundedSender<Event>) -> Self {
        let (tx, rx) = watch::channel(TimerMode::Idle);
        tokio::spawn(run_timer(rx, events));
        Self { mode: tx }
    }
}

impl TimerDriver for TokioTimer {
    fn arm(&self, period: Duration, repeating: bool) {
        let _ = self.mode.send(TimerMode::Armed { period, repeating });
    }

    fn disarm(&self) {
        let _ = self.mode.send(TimerMode::Idle);
    }
}

async fn run_timer(mut mode: watch::Receiver<TimerMode>, events: mpsc::UnboundedSender<Event>) {
    loop {
        let current = *mode.borrow_and_update();
        match current {
            TimerMode::Idle => {
                if mode.changed().await.is_err() {
                    return;
                }
            }
            TimerMode::Armed { period, repeating } => {
                tokio::select! {
                    changed = mode.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                    () = tokio::time::sleep(period) => {
                        if events.send(Event::Tick).is_err() {
                            return;
                        }
                        // A single shot stays parked until re-armed or disarmed
                        if !repeating && mode.changed().await.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_repeating_timer_keeps_ticking() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::spawn(tx);
        timer.arm(Duration::from_millis(62), true);

        assert_eq!(rx.recv().await, Some(Event::Tick));
        assert_eq!(rx.recv().await, Some(Event::Tick));
        assert_eq!(rx.recv().await, Some(Event::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_shot_parks_after_firing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::spawn(tx);
        timer.arm(Duration::from_millis(1000), false);

        assert_eq!(rx.recv().await, Some(Event::Tick));
        tokio::time::advance(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());

        // Re-arming wakes it back up
        timer.arm(Duration::from_millis(1000), false);
        assert_eq!(rx.recv().await, Some(Event::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_cancels_pending_expiry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::spawn(tx);
        timer.arm(Duration::from_millis(1000), false);
        timer.disarm();

        tokio::time::advance(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_the_pending_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::spawn(tx);
        timer.arm(Duration::from_millis(2000), false);
        timer.arm(Duration::from_millis(62), true);

        // The short period wins; the long one never fires on its own
        let start = tokio::time::Instant::now();
        assert_eq!(rx.recv().await, Some(Event::Tick));
        assert!(start.elapsed() < Duration::from_millis(2000));
    }
}
