//! Pure stamina and speed rules, separated from the ECS so they can be
//! exercised directly.

/// Advance the stamina value by one tick.
///
/// Drains while a run is being attempted and stamina remains; regenerates
/// only while the run key is fully released; holding Shift while standing
/// still neither drains nor regenerates.
pub fn tick_stamina(
    current: f32,
    max: f32,
    wants_run: bool,
    run_key_held: bool,
    drain_rate: f32,
    regen_rate: f32,
    dt: f32,
) -> f32 {
    if wants_run && current > 0.0 {
        (current - drain_rate * dt).max(0.0)
    } else if !run_key_held && current < max {
        (current + regen_rate * dt).min(max)
    } else {
        current
    }
}

/// Run speed applies only while a run is requested and stamina remains.
pub fn effective_speed(walk_speed: f32, run_speed: f32, wants_run: bool, stamina: f32) -> f32 {
    if wants_run && stamina > 0.0 {
        run_speed
    } else {
        walk_speed
    }
}

/// Initial vertical velocity reaching `jump_height` under `gravity`.
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (2.0 * jump_height * gravity.abs()).sqrt()
}
