//! Draw-command interpreter for the terminal render target
//!
//! The core describes the lock surface as commands over a 128x64 pixel
//! space; this module replays them onto a ratatui canvas scaled to the
//! terminal.

use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Context, Points, Rectangle};
use ratatui::widgets::{Block, Borders};

use latch_core::render as presentation;
use latch_core::{DrawCommand, LockModel, SURFACE_HEIGHT, SURFACE_WIDTH};

/// Approximate line height of the device fonts, in surface pixels
const LINE_HEIGHT: i32 = 10;

/// Paint the logical surface into the given region
pub fn render_surface(frame: &mut Frame, area: Rect, model: &LockModel) {
    let commands = presentation::render(model.state, model.door_offset);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" latch "))
        .x_bounds([0.0, f64::from(SURFACE_WIDTH)])
        .y_bounds([0.0, f64::from(SURFACE_HEIGHT)])
        .paint(move |ctx| paint(ctx, &commands));

    frame.render_widget(canvas, area);
}

/// Device y grows downward, canvas y grows upward
fn flip(y: i32, height: i32) -> f64 {
    f64::from(SURFACE_HEIGHT - y - height)
}

fn paint(ctx: &mut Context<'_>, commands: &[DrawCommand]) {
    for command in commands {
        match *command {
            DrawCommand::Icon { icon, x, y } => {
                let (width, height) = icon.size();
                ctx.draw(&Rectangle {
                    x: f64::from(x),
                    y: flip(y, height),
                    width: f64::from(width),
                    height: f64::from(height),
                    color: Color::White,
                });
            }
            DrawCommand::FramedText { text, x, y, .. } => {
                // A tight frame around the text block
                let lines = text.lines().count() as i32;
                let width = text.lines().map(str::len).max().unwrap_or(0) as i32 * 6;
                ctx.draw(&Rectangle {
                    x: f64::from(x - 2),
                    y: flip(y - 2, lines * LINE_HEIGHT + 4),
                    width: f64::from(width + 4),
                    height: f64::from(lines * LINE_HEIGHT + 4),
                    color: Color::White,
                });
                print_lines(ctx, text, x, y);
            }
            DrawCommand::Text { text, x, y, .. } => {
                print_lines(ctx, text, x, y);
            }
            DrawCommand::RoundedFrame {
                x,
                y,
                width,
                height,
            } => {
                ctx.draw(&Rectangle {
                    x: f64::from(x),
                    y: flip(y, height),
                    width: f64::from(width),
                    height: f64::from(height),
                    color: Color::White,
                });
            }
            DrawCommand::Dot { x, y } => {
                ctx.draw(&Points {
                    coords: &[(f64::from(x), flip(y, 1))],
                    color: Color::White,
                });
            }
        }
    }
}

/// Print multiline text, top line at device y
fn print_lines(ctx: &mut Context<'_>, text: &'static str, x: i32, y: i32) {
    for (i, line) in text.lines().enumerate() {
        ctx.print(
            f64::from(x),
            flip(y + i as i32 * LINE_HEIGHT, LINE_HEIGHT),
            line,
        );
    }
}
