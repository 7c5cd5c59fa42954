use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod hud;
pub mod stamina_bar;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<stamina_bar::StaminaBarState>()
            .add_systems(Startup, theme::apply_theme)
            .add_systems(
                Update,
                (
                    stamina_bar::stamina_bar_ui,
                    hud::crosshair_ui,
                    hud::carry_hint_ui,
                    hud::status_message_ui,
                ),
            );
    }
}
