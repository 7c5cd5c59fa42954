use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

pub mod buildings;
pub mod config;
pub mod held_item;
pub mod locomotion;
pub mod player;
pub mod settings;
pub mod spatial;
pub mod terrain;
pub mod world_init;

#[cfg(test)]
pub mod test_harness;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Input resources normally come from InputPlugin under
        // DefaultPlugins; headless test apps don't carry it, and these
        // registrations are no-ops when it already ran.
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<MouseMotion>();

        app.init_resource::<settings::GameSettings>()
            .add_systems(Startup, world_init::init_world)
            .add_plugins((
                locomotion::LocomotionPlugin,
                held_item::HeldItemPlugin,
            ));
    }
}
