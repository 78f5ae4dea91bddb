//! # GUI Theme
//!
//! Dark terminal-style theme: black panels, white text, red accents.

use crate::app::{Author, ConnectionStatus};
use egui::Theme as EguiTheme;
use egui::{Color32, Context, Stroke, Visuals};

/// Chat color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub text: Color32,
    /// Red accent for selection and hover
    pub accent: Color32,
    pub border: Color32,
    /// Secondary text (hints, timestamps)
    pub dim: Color32,
    /// Bubble fill for messages from this connection
    pub me_bubble: Color32,
    /// Bubble fill for everyone else, the bot included
    pub other_bubble: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color32::from_rgb(0, 0, 0),
            text: Color32::from_rgb(255, 255, 255),
            accent: Color32::from_rgb(204, 0, 0),
            border: Color32::from_rgb(51, 51, 51),
            dim: Color32::from_rgb(150, 150, 150),
            me_bubble: Color32::from_rgb(68, 0, 0),
            other_bubble: Color32::from_rgb(26, 26, 26),
            success: Color32::from_rgb(0, 255, 0),
            warning: Color32::from_rgb(255, 170, 0),
            error: Color32::from_rgb(255, 0, 0),
        }
    }
}

impl Theme {
    pub fn bubble(&self, author: Author) -> Color32 {
        match author {
            Author::Me => self.me_bubble,
            Author::Other => self.other_bubble,
        }
    }

    pub fn status_color(&self, status: &ConnectionStatus) -> Color32 {
        match status {
            ConnectionStatus::Connected => self.success,
            ConnectionStatus::Connecting => self.warning,
            ConnectionStatus::Failed(_) => self.error,
            ConnectionStatus::Closed(_) => self.dim,
        }
    }

    pub fn visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();

        visuals.override_text_color = Some(self.text);
        visuals.faint_bg_color = self.background;
        visuals.extreme_bg_color = self.background;
        visuals.panel_fill = self.background;
        visuals.window_fill = self.background;
        visuals.window_stroke = Stroke::new(1.0, self.border);

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(30, 30, 30);
        visuals.widgets.hovered.bg_fill = Color32::from_rgb(51, 0, 0);
        visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, self.accent);
        visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(40, 0, 0);
        visuals.widgets.active.bg_fill = Color32::from_rgb(102, 0, 0);
        visuals.widgets.active.bg_stroke = Stroke::new(2.0, self.accent);
        visuals.widgets.active.weak_bg_fill = Color32::from_rgb(76, 0, 0);

        visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(204, 0, 0, 76);
        visuals.selection.stroke = Stroke::new(2.0, self.accent);

        visuals
    }

    /// Install the visuals for both egui themes.
    pub fn apply(&self, ctx: &Context) {
        let visuals = self.visuals();
        for theme in [EguiTheme::Dark, EguiTheme::Light] {
            ctx.style_mut_of(theme, |style| {
                style.visuals = visuals.clone();
                style.spacing.item_spacing = egui::Vec2::new(6.0, 6.0);
                style.spacing.button_padding = egui::Vec2::new(12.0, 6.0);
            });
        }
        tracing::debug!("Applied chat theme");
    }
}
