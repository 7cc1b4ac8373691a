//! Application state and event handling

pub mod config;
pub mod events;

use std::time::Instant;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use latch_core::{InputEvent, InputKey, KeyPhase, LockController, LockNotification, LockState};

use crate::ui;
use config::ShellConfig;
use events::{spawn_keyboard_task, Event, TokioTimer};

/// Longest PIN the stand-in prompt accepts
const MAX_PIN_LENGTH: usize = 12;

/// Main application struct
pub struct App {
    /// The lock-surface controller
    controller: LockController<TokioTimer>,

    /// Notifications emitted by the controller
    notifications: mpsc::UnboundedReceiver<LockNotification>,

    /// Funnel carrying keyboard input and timer ticks
    events: mpsc::UnboundedReceiver<Event>,

    /// Persisted host preferences
    config: ShellConfig,

    /// Stand-in PIN prompt buffer; `Some` while the prompt is open
    pin_entry: Option<String>,

    /// One-line status shown in the footer
    status: String,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create the app, the event funnel, and the timer task.
    ///
    /// Must be called from a runtime context so the background tasks can
    /// spawn.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::spawn(event_tx.clone());
        let (controller, notifications) = LockController::new(timer);
        spawn_keyboard_task(event_tx);

        let mut app = Self {
            controller,
            notifications,
            events: event_rx,
            config: ShellConfig::load(),
            pin_entry: None,
            status: String::from("Unlocked"),
            should_quit: false,
        };

        if app.config.lock_on_start {
            app.lock_surface(app.config.pin_required);
        }

        app
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            let snapshot = self.controller.snapshot();
            terminal
                .draw(|frame| ui::render(frame, &snapshot, self.pin_entry.as_deref(), &self.status))?;

            match self.events.recv().await {
                Some(Event::Key(code)) => self.handle_key(code),
                Some(Event::Tick) => self.controller.on_tick(),
                None => break,
            }

            self.drain_notifications();
        }

        Ok(())
    }

    /// Handle one key press from the terminal
    fn handle_key(&mut self, code: KeyCode) {
        if self.pin_entry.is_some() {
            self.handle_pin_key(code);
            return;
        }

        let now = Instant::now();
        if let Some(key) = device_key(code) {
            // A terminal keystroke is a completed press: key-down then short
            let consumed = self
                .controller
                .on_input(InputEvent::new(key, KeyPhase::Press), now)
                | self
                    .controller
                    .on_input(InputEvent::new(key, KeyPhase::Short), now);
            if consumed {
                return;
            }
        }

        self.handle_shell_key(code);
    }

    /// Shortcuts for events the lock surface lets through
    fn handle_shell_key(&mut self, code: KeyCode) {
        if self.controller.snapshot().state != LockState::Unlocked {
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('l') => self.lock_surface(self.config.pin_required),
            KeyCode::Char('p') => self.lock_surface(true),
            _ => {}
        }
    }

    /// Keys while the stand-in PIN prompt is open
    fn handle_pin_key(&mut self, code: KeyCode) {
        let Some(entry) = self.pin_entry.as_mut() else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.pin_entry = None;
                self.status = String::from("PIN entry cancelled");
            }
            KeyCode::Enter => {
                // PIN validation is the host's business and out of scope
                // here; any entry unlocks
                self.pin_entry = None;
                self.controller.request_unlock();
                self.status = String::from("Unlocked");
            }
            KeyCode::Backspace => {
                entry.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() && entry.len() < MAX_PIN_LENGTH => {
                entry.push(c);
            }
            _ => {}
        }
    }

    /// Lock the surface and start the closing-door transition
    fn lock_surface(&mut self, pin_required: bool) {
        if self.controller.snapshot().state != LockState::Unlocked {
            return;
        }

        self.controller.request_lock(pin_required);
        self.controller.begin_close_animation();
        self.status = if pin_required {
            String::from("Locked (PIN)")
        } else {
            String::from("Locked")
        };
    }

    /// React to controller notifications; the shell is the desktop
    /// controller here
    fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            match notification {
                LockNotification::ShowPinInput => {
                    self.pin_entry = Some(String::new());
                }
                LockNotification::Unlocked => {
                    // Gesture completed; the non-PIN policy unlocks right away
                    self.controller.request_unlock();
                    self.status = String::from("Unlocked");
                }
                LockNotification::Update => {
                    // Redraw happens at the top of the loop
                }
            }
        }
    }
}

/// Map a terminal key to a device navigation key
fn device_key(code: KeyCode) -> Option<InputKey> {
    match code {
        KeyCode::Backspace | KeyCode::Esc => Some(InputKey::Back),
        KeyCode::Enter => Some(InputKey::Ok),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        _ => None,
    }
}
