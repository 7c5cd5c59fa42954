//! First-person movement: mouse look, walk/run with a stamina budget,
//! jumping, and gravity against the terrain heightfield.

mod stamina;
mod systems;

#[cfg(test)]
mod tests;

pub use stamina::{effective_speed, jump_velocity, tick_stamina};
pub use systems::{mouse_look, move_player, LocomotionPlugin};
