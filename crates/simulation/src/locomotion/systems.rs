use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::config::{GROUNDED_FALL_RESET, GROUND_PROBE_DISTANCE};
use crate::player::{LookAngles, Player, PlayerBody, Stamina};
use crate::settings::GameSettings;
use crate::terrain::Terrain;

use super::stamina::{effective_speed, jump_velocity, tick_stamina};

const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Accumulate mouse deltas into yaw/pitch.
pub fn mouse_look(
    mut motion: EventReader<MouseMotion>,
    settings: Res<GameSettings>,
    mut look: ResMut<LookAngles>,
) {
    for event in motion.read() {
        look.yaw -= event.delta.x * settings.mouse_sensitivity;
        look.pitch = (look.pitch - event.delta.y * settings.mouse_sensitivity)
            .clamp(-MAX_PITCH, MAX_PITCH);
    }
}

/// Walk/run, stamina, jump, and gravity, one character-controller tick.
/// Horizontal and vertical motion are applied as two separate moves.
pub fn move_player(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<GameSettings>,
    look: Res<LookAngles>,
    terrain: Res<Terrain>,
    mut query: Query<(&mut Transform, &mut PlayerBody, &mut Stamina), With<Player>>,
) {
    let Ok((mut transform, mut body, mut stamina)) = query.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    // Ground probe
    let ground = terrain.height_at(transform.translation.x, transform.translation.z);
    body.grounded = transform.translation.y <= ground + GROUND_PROBE_DISTANCE;
    if body.grounded && body.vertical_velocity < 0.0 {
        body.vertical_velocity = GROUNDED_FALL_RESET;
    }

    // Horizontal move
    let mut input = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        input.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        input.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    let move_dir = look.horizontal_forward() * input.y + look.horizontal_right() * input.x;

    let run_key_held = keys.pressed(KeyCode::ShiftLeft);
    let wants_run = run_key_held && input != Vec2::ZERO;
    stamina.current = tick_stamina(
        stamina.current,
        stamina.max,
        wants_run,
        run_key_held,
        settings.stamina_drain_rate,
        settings.stamina_regen_rate,
        dt,
    );

    let speed = effective_speed(
        settings.walk_speed,
        settings.run_speed,
        wants_run,
        stamina.current,
    );
    transform.translation += move_dir * speed * dt;
    transform.rotation = Quat::from_rotation_y(look.yaw);

    // Jump
    if keys.just_pressed(KeyCode::Space) && body.grounded {
        body.vertical_velocity = jump_velocity(settings.jump_height, settings.gravity);
    }

    // Vertical move
    body.vertical_velocity += settings.gravity * dt;
    transform.translation.y += body.vertical_velocity * dt;

    // Clamp to the surface under the new horizontal position
    let ground = terrain.height_at(transform.translation.x, transform.translation.z);
    if transform.translation.y < ground {
        transform.translation.y = ground;
    }
}

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LookAngles>()
            .add_systems(Update, (mouse_look, move_player).chain());
    }
}
