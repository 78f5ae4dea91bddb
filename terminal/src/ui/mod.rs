//! # User Interface
//!
//! egui rendering for the chat terminal. [`App`] implements [`eframe::App`] here:
//! every frame drains pending events, then draws the chat screen.

pub mod screens;
pub mod theme;

use crate::app::App;
use std::time::Duration;
use theme::Theme;

/// Events from background tasks only show up on the next frame.
const IDLE_REPAINT: Duration = Duration::from_millis(100);

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.on_tick();

        let theme = Theme::default();
        screens::chat::render(ctx, self, &theme);

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}
