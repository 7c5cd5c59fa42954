//! First-person camera: rides the player's eye point and applies the
//! accumulated look angles every frame.

use bevy::prelude::*;

use simulation::player::{eye_position, LookAngles, Player};

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.0, 0.0),
    ));
}

pub fn apply_player_camera(
    look: Res<LookAngles>,
    player_q: Query<&Transform, With<Player>>,
    mut camera_q: Query<&mut Transform, (With<Camera3d>, Without<Player>)>,
) {
    let Ok(player) = player_q.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_q.get_single_mut() else {
        return;
    };
    camera.translation = eye_position(player.translation);
    camera.rotation = Quat::from_rotation_y(look.yaw) * Quat::from_rotation_x(look.pitch);
}
