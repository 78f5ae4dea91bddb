//! # Chat Screen
//!
//! Header with the connection status, the scrolling history, and the input box.
//! Enter sends, Shift+Enter inserts a newline.

use crate::app::{classify, App, AppState, Author};
use crate::ui::theme::Theme;
use egui::{Align, Button, Key, KeyboardShortcut, Layout, Modifiers, RichText, ScrollArea, TextEdit};
use shared::ChatMessage;

pub fn render(ctx: &egui::Context, app: &App, theme: &Theme) {
    egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
        let state = app.state.read();
        render_header(ui, &state, theme);
    });

    let submitted = egui::TopBottomPanel::bottom("chat_input")
        .show(ctx, |ui| render_input(ui, app))
        .inner;
    if submitted {
        app.submit();
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        render_history(ui, app, theme);
    });
}

fn render_header(ui: &mut egui::Ui, state: &AppState, theme: &Theme) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.heading("Chat");
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.colored_label(theme.status_color(&state.status), state.status.label());
            if let Some(connection_id) = &state.connection_id {
                ui.colored_label(theme.dim, format!("{} |", connection_id));
            }
        });
    });
    ui.add_space(4.0);
}

/// Returns true when the user asked to send.
fn render_input(ui: &mut egui::Ui, app: &App) -> bool {
    let mut state = app.state.write();
    let mut submitted = false;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let send_width = 72.0;
        let input = TextEdit::multiline(&mut state.draft)
            .hint_text("Type a message...")
            .desired_rows(2)
            .desired_width(ui.available_width() - send_width)
            .return_key(KeyboardShortcut::new(Modifiers::SHIFT, Key::Enter));
        let response = ui.add(input);

        if state.focus_input {
            response.request_focus();
            state.focus_input = false;
        }

        let can_send = !state.draft.trim().is_empty();
        let enter = response.has_focus() && ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter));
        let clicked = ui
            .add_enabled(can_send, Button::new("Send").min_size(egui::vec2(send_width - 8.0, 0.0)))
            .clicked();

        submitted = can_send && (enter || clicked);
    });
    ui.add_space(6.0);

    submitted
}

fn render_history(ui: &mut egui::Ui, app: &App, theme: &Theme) {
    let mut guard = app.state.write();
    let scroll = std::mem::take(&mut guard.scroll_to_bottom);
    let state = &*guard;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if state.history.is_empty() {
                ui.colored_label(theme.dim, "No messages yet. Start with \"Hey OpenAI\" to ask the bot.");
            }

            for message in state.history.iter() {
                let author = classify(message, state.connection_id.as_deref());
                render_message(ui, message, author, theme);
            }

            let end = ui.allocate_response(egui::Vec2::ZERO, egui::Sense::hover());
            if scroll {
                end.scroll_to_me(Some(Align::BOTTOM));
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, author: Author, theme: &Theme) {
    let layout = match author {
        Author::Me => Layout::top_down(Align::Max),
        Author::Other => Layout::top_down(Align::Min),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(theme.bubble(author))
            .stroke(egui::Stroke::new(1.0, theme.border))
            .corner_radius(6)
            .inner_margin(egui::Margin::symmetric(10, 6))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.label(RichText::new(&message.data).color(theme.text))
                    .on_hover_text(author.as_str());
            });
    });
}
