//! Player-tunable settings, optionally loaded from a JSON file next to the
//! binary. Anything not present in the file keeps its default.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    // Movement
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_height: f32,
    pub gravity: f32,
    pub mouse_sensitivity: f32,

    // Stamina
    pub max_stamina: f32,
    pub stamina_regen_rate: f32,
    pub stamina_drain_rate: f32,

    // Interaction
    pub interact_distance: f32,

    // Placement
    pub cell_size: f32,
    pub rotate_step_degrees: f32,
    /// Raise the preview so its bounds bottom rests on the ground hit.
    pub snap_to_surface: bool,
    /// Window after a pickup during which the cancel button is ignored, so
    /// the same right-click that picked the building up cannot also cancel.
    pub cancel_debounce_secs: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 10.0,
            jump_height: 2.0,
            gravity: -9.81,
            mouse_sensitivity: 0.002,
            max_stamina: 5.0,
            stamina_regen_rate: 1.0,
            stamina_drain_rate: 1.0,
            interact_distance: 3.0,
            cell_size: 1.0,
            rotate_step_degrees: 90.0,
            snap_to_surface: true,
            cancel_debounce_secs: 0.12,
        }
    }
}

/// Read settings from `path`, falling back to defaults when the file is
/// missing or malformed. A malformed file is reported but never fatal.
pub fn load_or_default(path: &Path) -> GameSettings {
    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(settings) => {
                info!("Settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                warn!(
                    "Settings file {} is malformed, using defaults: {}",
                    path.display(),
                    e
                );
                GameSettings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => GameSettings::default(),
        Err(e) => {
            warn!(
                "Could not read settings file {}, using defaults: {}",
                path.display(),
                e
            );
            GameSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_or_default(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.walk_speed, GameSettings::default().walk_speed);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_fields() {
        let settings: GameSettings =
            serde_json::from_str(r#"{ "cell_size": 2.5, "rotate_step_degrees": 45.0 }"#).unwrap();
        assert_eq!(settings.cell_size, 2.5);
        assert_eq!(settings.rotate_step_degrees, 45.0);
        assert_eq!(settings.walk_speed, GameSettings::default().walk_speed);
        assert_eq!(
            settings.cancel_debounce_secs,
            GameSettings::default().cancel_debounce_secs
        );
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = GameSettings::default();
        settings.max_stamina = 8.0;
        let json = serde_json::to_string(&settings).unwrap();
        let back: GameSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_stamina, 8.0);
    }
}
