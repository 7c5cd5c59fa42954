use bevy::prelude::*;

pub mod camera;
pub mod grid_snap;
pub mod placement_preview;
pub mod world_render;

use placement_preview::{PreviewState, StatusMessage};
use simulation::held_item;
use simulation::locomotion;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PreviewState>()
            .init_resource::<StatusMessage>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    world_render::spawn_terrain_mesh,
                    placement_preview::setup_preview_materials,
                )
                    .chain()
                    .after(simulation::world_init::init_world),
            )
            .add_systems(
                Update,
                (
                    camera::apply_player_camera.after(locomotion::move_player),
                    world_render::attach_part_meshes,
                    placement_preview::tick_status_message,
                ),
            )
            .add_systems(
                Update,
                (
                    placement_preview::sync_ghost_with_held,
                    placement_preview::rotate_preview,
                    placement_preview::update_preview,
                    // Confirm/cancel run before the store applies their
                    // events, so a placement lands the same frame.
                    placement_preview::confirm_placement
                        .before(held_item::apply_place_events),
                    placement_preview::cancel_placement
                        .before(held_item::apply_return_events),
                )
                    .chain(),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
