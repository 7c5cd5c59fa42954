use bevy::prelude::*;

use simulation::spatial::{CollisionLayers, Obb};

/// Layers that block placement. The ghost itself carries no colliders, and
/// the held building is excluded explicitly, so anything else solid counts.
pub const OBSTRUCTION_MASK: CollisionLayers = CollisionLayers(
    CollisionLayers::BUILDING.0 | CollisionLayers::ORE.0 | CollisionLayers::PLAYER.0,
);

/// Marker for the ghost root entity.
#[derive(Component)]
pub struct PreviewGhost;

/// Marker for the ghost's visual parts, whose materials swap with validity.
#[derive(Component)]
pub struct GhostPart;

/// Live placement-preview state. The ghost exists iff a building is held;
/// `source` tracks the held entity so a changed identity rebuilds the ghost.
#[derive(Resource, Default)]
pub struct PreviewState {
    pub ghost: Option<Entity>,
    pub source: Option<Entity>,
    /// Accumulated rotation, degrees; always a multiple of the step.
    pub yaw_degrees: f32,
    pub valid: bool,
    /// Bounds of the ghost's part list in its local frame.
    pub bounds_center: Vec3,
    pub bounds_half: Vec3,
}

impl PreviewState {
    pub fn clear_ghost(&mut self) {
        self.ghost = None;
        self.source = None;
        self.valid = false;
    }
}

/// Translucent tint pair the ghost swaps between.
#[derive(Resource)]
pub struct PreviewMaterials {
    pub valid: Handle<StandardMaterial>,
    pub invalid: Handle<StandardMaterial>,
}

/// Short-lived message surfaced by the HUD (e.g. "Cannot place here").
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = 3.0;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

/// Cancel is ignored inside the debounce window so the right-click that
/// picked the building up cannot also return it.
pub fn cancel_allowed(seconds_since_pickup: f32, debounce_secs: f32) -> bool {
    seconds_since_pickup > debounce_secs
}

/// Ghost root height that rests the bounds bottom exactly on the hit
/// surface. Yaw-only rotation leaves the vertical extent unchanged.
pub fn rest_on_surface_y(hit_y: f32, bounds_center_y: f32, bounds_half_y: f32) -> f32 {
    hit_y - (bounds_center_y - bounds_half_y)
}

/// The oriented probe box for the validity query: local bounds carried to
/// the ghost pose, half-extents inflated by `epsilon`.
pub fn preview_probe(
    position: Vec3,
    yaw_degrees: f32,
    bounds_center: Vec3,
    bounds_half: Vec3,
    epsilon: f32,
) -> Obb {
    let rotation = Quat::from_rotation_y(yaw_degrees.to_radians());
    Obb {
        center: position + rotation * bounds_center,
        half_extents: bounds_half + Vec3::splat(epsilon),
        rotation,
    }
}
