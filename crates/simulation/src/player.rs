//! Player entity, look state, and view-ray helpers shared by interaction
//! and placement systems.

use bevy::prelude::*;

use crate::config::EYE_HEIGHT;
use crate::spatial::{Collider, CollisionLayers};

#[derive(Component)]
pub struct Player;

/// Vertical motion state for the character controller.
#[derive(Component, Default)]
pub struct PlayerBody {
    pub vertical_velocity: f32,
    pub grounded: bool,
}

/// Sprint budget. Drained while running, regenerated while Shift is released.
#[derive(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Stamina {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Anchor a picked-up building is parented to while hidden.
#[derive(Component)]
pub struct HiddenAnchor;

/// Anchor a carried ore is parented to, in front of the viewer.
#[derive(Component)]
pub struct HandAnchor;

/// Accumulated mouse-look angles, radians. The player body carries the yaw;
/// pitch is applied only to the camera and the view ray.
#[derive(Resource, Default)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Unit vector out of the viewer's eye.
    pub fn forward(&self) -> Vec3 {
        (Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)) * Vec3::NEG_Z
    }

    /// Forward projected onto the ground plane, for movement.
    pub fn horizontal_forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    pub fn horizontal_right(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }
}

/// Eye position for a player standing at `feet`.
pub fn eye_position(feet: Vec3) -> Vec3 {
    feet + Vec3::Y * EYE_HEIGHT
}

pub fn spawn_player(commands: &mut Commands, position: Vec3, max_stamina: f32) -> Entity {
    commands
        .spawn((
            Player,
            PlayerBody::default(),
            Stamina::full(max_stamina),
            Transform::from_translation(position),
            Visibility::default(),
            Collider::new(Vec3::new(0.3, 0.9, 0.3), CollisionLayers::PLAYER)
                .with_offset(Vec3::Y * 0.9),
        ))
        .with_children(|parent| {
            parent.spawn((HiddenAnchor, Transform::default(), Visibility::default()));
            parent.spawn((
                HandAnchor,
                Transform::from_xyz(0.35, 1.3, -0.7),
                Visibility::default(),
            ));
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_matches_yaw() {
        let look = LookAngles {
            yaw: 0.0,
            pitch: 0.0,
        };
        assert!((look.forward() - Vec3::NEG_Z).length() < 1e-6);

        let turned = LookAngles {
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
        };
        assert!((turned.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_horizontal_forward_ignores_pitch() {
        let look = LookAngles {
            yaw: 0.3,
            pitch: -1.2,
        };
        let flat = look.horizontal_forward();
        assert!(flat.y.abs() < 1e-6);
        assert!((flat.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stamina_fraction() {
        let stamina = Stamina {
            current: 2.5,
            max: 5.0,
        };
        assert!((stamina.fraction() - 0.5).abs() < 1e-6);
        assert_eq!(Stamina { current: 0.0, max: 0.0 }.fraction(), 0.0);
    }
}
