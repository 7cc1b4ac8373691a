//! UI rendering

pub mod surface;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use latch_core::{LockModel, LockState};

/// Main render function
pub fn render(frame: &mut Frame, model: &LockModel, pin_entry: Option<&str>, status: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(frame.area());

    surface::render_surface(frame, chunks[0], model);
    render_footer(frame, chunks[1], model, status);

    if let Some(entry) = pin_entry {
        render_pin_prompt(frame, frame.area(), entry);
    }
}

/// Status line plus the shortcuts that currently apply
fn render_footer(frame: &mut Frame, area: Rect, model: &LockModel, status: &str) {
    let hints: &[(&str, &str)] = match model.state {
        LockState::Unlocked => &[("l", "lock"), ("p", "PIN lock"), ("q", "quit")],
        LockState::Locked | LockState::LockedHintShown => &[("Backspace x3", "unlock")],
        _ => &[],
    };

    let mut spans: Vec<Span> = vec![Span::raw(format!("{status}  "))];
    for (key, action) in hints {
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action}  ")));
    }

    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Centered stand-in PIN dialog over everything else
fn render_pin_prompt(frame: &mut Frame, area: Rect, entry: &str) {
    let width = 36.min(area.width);
    let height = 5.min(area.height);
    let dialog = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, dialog);

    let block = Block::default().title(" PIN required ").borders(Borders::ALL);
    let masked = "\u{2022}".repeat(entry.len());
    let content = Paragraph::new(vec![
        Line::from(masked),
        Line::from(Span::styled(
            "[Enter] confirm  [Esc] cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(content, dialog);
}
