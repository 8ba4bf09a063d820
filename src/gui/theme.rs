//! Theme and styling for the GUI.

use eframe::egui;

/// Centralized theme: colors and spacing used across the app shell and the
/// history widget.
#[derive(Clone, Copy)]
pub struct AppTheme {
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    pub primary: egui::Color32,
    pub selection: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,

    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Dark background with warm candy-pink accents
            background: egui::Color32::from_rgb(16, 13, 16),
            surface: egui::Color32::from_rgb(26, 22, 26),
            surface_hover: egui::Color32::from_rgb(38, 32, 38),
            surface_active: egui::Color32::from_rgb(50, 42, 50),
            panel_fill: egui::Color32::from_rgb(21, 17, 21),
            text_primary: egui::Color32::from_rgb(235, 225, 232),
            text_secondary: egui::Color32::from_rgb(160, 150, 158),

            primary: egui::Color32::from_rgb(242, 120, 159),
            selection: egui::Color32::from_rgb(92, 46, 66),
            warning: egui::Color32::from_rgb(255, 180, 84),
            error: egui::Color32::from_rgb(255, 92, 92),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
        }
    }
}

impl AppTheme {
    /// Color for a signed amount: red for negative, default otherwise.
    pub fn amount_color(&self, negative: bool) -> egui::Color32 {
        if negative {
            self.error
        } else {
            self.text_primary
        }
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);
    visuals.selection.bg_fill = theme.selection;

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.surface_active);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);
    ctx.set_style(style);
}
