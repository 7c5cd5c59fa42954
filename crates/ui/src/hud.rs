//! Crosshair, carry hint, and transient status text.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::placement_preview::StatusMessage;
use simulation::buildings::{Building, Ore};
use simulation::held_item::HeldItemStore;

pub fn crosshair_ui(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let center = ctx.screen_rect().center();
    egui::Area::new(egui::Id::new("crosshair"))
        .fixed_pos(center - egui::vec2(2.0, 2.0))
        .show(ctx, |ui| {
            ui.painter().circle_filled(
                center,
                2.0,
                egui::Color32::from_rgba_unmultiplied(240, 240, 240, 200),
            );
        });
}

/// One line above the stamina bar naming the carried item and its controls.
pub fn carry_hint_ui(
    mut contexts: EguiContexts,
    store: Res<HeldItemStore>,
    buildings: Query<&Building>,
    ores: Query<&Ore>,
) {
    let Some(entity) = store.held_entity() else {
        return;
    };
    let hint = if let Ok(building) = buildings.get(entity) {
        format!(
            "Carrying {} (click to place, R to rotate, right-click to cancel)",
            building.kind.name()
        )
    } else if let Ok(ore) = ores.get(entity) {
        format!("Carrying {} (Q to drop)", ore.kind.name())
    } else {
        return;
    };

    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("carry_hint"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -52.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(hint).color(egui::Color32::from_rgb(230, 230, 230)));
        });
}

pub fn status_message_ui(mut contexts: EguiContexts, status: Res<StatusMessage>) {
    if !status.active() {
        return;
    }
    let color = if status.is_error {
        egui::Color32::from_rgb(240, 120, 100)
    } else {
        egui::Color32::from_rgb(220, 220, 220)
    };
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("status_message"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 48.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(&status.text).color(color).size(16.0));
        });
}
