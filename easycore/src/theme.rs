//! Easy Paint theme
//!
//! Large, high-contrast widgets on a light background. Menus and dialogs
//! should be readable from a small chair a little too far from the screen.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The handful of colors the chrome uses.
pub struct EasyColors;

impl EasyColors {
    pub const PAPER: Color32 = Color32::from_rgb(255, 255, 255);
    pub const INK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const PANEL: Color32 = Color32::from_rgb(245, 245, 240);
    pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 214, 10);
}

/// Theme configuration for Easy Paint
pub struct EasyTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for EasyTheme {
    fn default() -> Self {
        Self {
            font_size_body: 18.0,
            font_size_heading: 28.0,
            font_size_small: 14.0,
            window_padding: 12.0,
            item_spacing: 8.0,
        }
    }
}

impl EasyTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();

        visuals.window_fill = EasyColors::PAPER;
        visuals.panel_fill = EasyColors::PANEL;
        visuals.extreme_bg_color = EasyColors::PAPER;

        visuals.window_rounding = Rounding::same(6.0);
        visuals.menu_rounding = Rounding::same(4.0);
        visuals.window_stroke = Stroke::new(2.0, EasyColors::INK);

        visuals.widgets.inactive.fg_stroke = Stroke::new(1.5, EasyColors::INK);
        visuals.widgets.hovered.bg_fill = EasyColors::HIGHLIGHT;
        visuals.widgets.hovered.weak_bg_fill = EasyColors::HIGHLIGHT;
        visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, EasyColors::INK);

        visuals.selection.bg_fill = EasyColors::HIGHLIGHT;
        visuals.selection.stroke = Stroke::new(1.0, EasyColors::INK);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);

        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(EasyColors::PANEL)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            egui::menu::bar(ui, add_contents);
        });
}

/// Drop key events that would rescale the whole UI.
///
/// egui zooms on Cmd+Plus / Cmd+Minus by default. A child leaning on the
/// keyboard should not be able to shrink the canvas. Call this at the start
/// of `update()`.
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|e| match e {
            egui::Event::Key { key, modifiers, .. }
                if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) => false,
            _ => true,
        });
    });
}
