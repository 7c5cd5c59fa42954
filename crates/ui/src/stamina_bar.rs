//! Bottom-center stamina bar: fill fraction with a red-to-cyan gradient,
//! hidden while stamina sits untouched at full.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::player::{Player, Stamina};

const BAR_WIDTH: f32 = 220.0;
const BAR_HEIGHT: f32 = 14.0;
/// Fill changes below this go unnoticed and don't wake the panel.
const FILL_EPSILON: f32 = 0.001;

const EMPTY_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 50, 40);
const FULL_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 200, 220);

#[derive(Resource, Default)]
pub struct StaminaBarState {
    last_fill: Option<f32>,
    pub force_show: bool,
}

/// Shown when forced, not full, or the fill moved since last frame.
pub fn bar_visible(force_show: bool, fill: f32, last_fill: Option<f32>) -> bool {
    force_show || fill < 1.0 || last_fill.is_none_or(|last| (fill - last).abs() > FILL_EPSILON)
}

pub fn lerp_color(empty: egui::Color32, full: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    egui::Color32::from_rgb(
        channel(empty.r(), full.r()),
        channel(empty.g(), full.g()),
        channel(empty.b(), full.b()),
    )
}

pub fn stamina_bar_ui(
    mut contexts: EguiContexts,
    player_q: Query<&Stamina, With<Player>>,
    mut state: ResMut<StaminaBarState>,
) {
    let Ok(stamina) = player_q.get_single() else {
        return;
    };
    let fill = stamina.fraction().clamp(0.0, 1.0);
    let visible = bar_visible(state.force_show, fill, state.last_fill);
    state.last_fill = Some(fill);
    if !visible {
        return;
    }

    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("stamina_bar"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -28.0])
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(BAR_WIDTH, BAR_HEIGHT),
                egui::Sense::hover(),
            );
            let painter = ui.painter();
            painter.rect_filled(rect, 4.0, egui::Color32::from_rgba_unmultiplied(20, 22, 28, 200));

            let mut fill_rect = rect.shrink(2.0);
            fill_rect.set_width(fill_rect.width() * fill);
            painter.rect_filled(fill_rect, 3.0, lerp_color(EMPTY_COLOR, FULL_COLOR, fill));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_only_when_full_and_settled() {
        // Full and unchanged: hidden.
        assert!(!bar_visible(false, 1.0, Some(1.0)));
        // Any deficit shows the bar.
        assert!(bar_visible(false, 0.99, Some(0.99)));
        // A change larger than epsilon shows it even at full.
        assert!(bar_visible(false, 1.0, Some(0.9)));
        // Forced always shows.
        assert!(bar_visible(true, 1.0, Some(1.0)));
        // First update has no history: show.
        assert!(bar_visible(false, 1.0, None));
    }

    #[test]
    fn test_tiny_fill_change_does_not_wake_panel() {
        assert!(!bar_visible(false, 1.0, Some(1.0 - FILL_EPSILON / 2.0)));
    }

    #[test]
    fn test_color_gradient_endpoints() {
        assert_eq!(lerp_color(EMPTY_COLOR, FULL_COLOR, 0.0), EMPTY_COLOR);
        assert_eq!(lerp_color(EMPTY_COLOR, FULL_COLOR, 1.0), FULL_COLOR);
    }

    #[test]
    fn test_color_gradient_midpoint() {
        let mid = lerp_color(
            egui::Color32::from_rgb(0, 0, 0),
            egui::Color32::from_rgb(200, 100, 50),
            0.5,
        );
        assert_eq!(mid, egui::Color32::from_rgb(100, 50, 25));
    }
}
