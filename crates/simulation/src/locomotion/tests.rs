use super::*;

const DT: f32 = 1.0 / 60.0;

fn run_for(seconds: f32, mut current: f32, max: f32, wants_run: bool, key_held: bool) -> f32 {
    let steps = (seconds / DT).round() as u32;
    for _ in 0..steps {
        current = tick_stamina(current, max, wants_run, key_held, 1.0, 1.0, DT);
    }
    current
}

#[test]
fn test_stamina_drains_while_running() {
    // max 5, drain rate 1, running 2 seconds: 5 -> 3.
    let after = run_for(2.0, 5.0, 5.0, true, true);
    assert!((after - 3.0).abs() < 1e-3, "expected 3.0, got {}", after);
}

#[test]
fn test_stamina_clamped_at_zero() {
    let after = run_for(10.0, 5.0, 5.0, true, true);
    assert_eq!(after, 0.0);
}

#[test]
fn test_stamina_regenerates_only_when_key_released() {
    // Holding Shift while standing still: no regen.
    let held = run_for(2.0, 1.0, 5.0, false, true);
    assert_eq!(held, 1.0);

    // Key released: regen toward max.
    let released = run_for(2.0, 1.0, 5.0, false, false);
    assert!((released - 3.0).abs() < 1e-3, "expected 3.0, got {}", released);
}

#[test]
fn test_stamina_clamped_at_max() {
    let after = run_for(30.0, 1.0, 5.0, false, false);
    assert_eq!(after, 5.0);
}

#[test]
fn test_effective_speed_falls_back_to_walk_when_exhausted() {
    assert_eq!(effective_speed(5.0, 10.0, true, 2.0), 10.0);
    assert_eq!(effective_speed(5.0, 10.0, true, 0.0), 5.0);
    assert_eq!(effective_speed(5.0, 10.0, false, 5.0), 5.0);
}

#[test]
fn test_jump_velocity_reaches_height() {
    // v = sqrt(2 g h); integrating v^2 / (2 g) recovers h.
    let gravity = -9.81;
    let v = jump_velocity(2.0, gravity);
    let peak = v * v / (2.0 * gravity.abs());
    assert!((peak - 2.0).abs() < 1e-4);
}
