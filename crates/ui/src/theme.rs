use bevy_egui::{egui, EguiContexts};

/// Dark, low-chrome overlay style for the in-game HUD.
pub fn apply_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgba_unmultiplied(25, 27, 34, 220);
    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.override_text_color = Some(egui::Color32::from_rgb(225, 225, 225));
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);

    ctx.set_style(style);
}
