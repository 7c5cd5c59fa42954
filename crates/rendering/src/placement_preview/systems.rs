use bevy::prelude::*;

use simulation::buildings::{encapsulate_parts, Building};
use simulation::config::{
    FALLBACK_BOUNDS_HALF_EXTENT, GROUND_RAY_MAX_DIST, OVERLAP_EPSILON,
};
use simulation::held_item::{HeldItemStore, PlaceBuilding, ReturnHeldBuilding};
use simulation::player::{eye_position, LookAngles, Player};
use simulation::settings::GameSettings;
use simulation::spatial::{self, Collider, CollisionLayers};
use simulation::terrain::Terrain;

use crate::grid_snap::{snap_xz, step_yaw};

use super::types::{
    cancel_allowed, preview_probe, rest_on_surface_y, GhostPart, PreviewGhost, PreviewMaterials,
    PreviewState, StatusMessage, OBSTRUCTION_MASK,
};

pub fn setup_preview_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let valid = materials.add(StandardMaterial {
        base_color: Color::srgba(0.25, 0.85, 0.35, 0.45),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let invalid = materials.add(StandardMaterial {
        base_color: Color::srgba(0.9, 0.15, 0.1, 0.45),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.insert_resource(PreviewMaterials { valid, invalid });
}

/// Keep the ghost in step with the carry slot: despawn it when no building
/// is held, rebuild it (and reset the accumulated yaw) when the held
/// building's identity changes.
pub fn sync_ghost_with_held(
    store: Res<HeldItemStore>,
    buildings: Query<&Building>,
    materials: Res<PreviewMaterials>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut state: ResMut<PreviewState>,
    mut commands: Commands,
) {
    let held = store.held_building();
    if state.source == held {
        return;
    }

    if let Some(ghost) = state.ghost.take() {
        commands.entity(ghost).despawn_recursive();
    }
    state.clear_ghost();

    let Some(entity) = held else {
        return;
    };
    let Ok(building) = buildings.get(entity) else {
        error!("Held entity has no building data, cannot build a preview");
        return;
    };

    let parts = building.kind.parts();
    let (center, half) = encapsulate_parts(&parts).unwrap_or((
        Vec3::ZERO,
        Vec3::splat(FALLBACK_BOUNDS_HALF_EXTENT),
    ));
    state.yaw_degrees = 0.0;
    state.bounds_center = center;
    state.bounds_half = half;

    let ghost = commands
        .spawn((PreviewGhost, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for part in &parts {
                let size = part.half_extents * 2.0;
                parent.spawn((
                    GhostPart,
                    Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                    MeshMaterial3d(materials.valid.clone()),
                    Transform::from_translation(part.offset),
                    Visibility::default(),
                ));
            }
        })
        .id();
    state.ghost = Some(ghost);
    state.source = Some(entity);
}

/// `R` turns the pending placement by one step and reapplies it immediately.
pub fn rotate_preview(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<GameSettings>,
    mut state: ResMut<PreviewState>,
    mut ghost_q: Query<&mut Transform, With<PreviewGhost>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) || state.source.is_none() {
        return;
    }
    state.yaw_degrees = step_yaw(state.yaw_degrees, settings.rotate_step_degrees);
    if let Some(ghost) = state.ghost {
        if let Ok(mut transform) = ghost_q.get_mut(ghost) {
            transform.rotation = Quat::from_rotation_y(state.yaw_degrees.to_radians());
        }
    }
}

/// Root plus all descendants, for the overlap exclusion list.
fn collect_subtree(root: Entity, children_q: &Query<&Children>, out: &mut Vec<Entity>) {
    out.push(root);
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if let Ok(children) = children_q.get(entity) {
            for &child in children {
                out.push(child);
                stack.push(child);
            }
        }
    }
}

/// Per-tick preview drive: ground ray, grid snap, surface rest, validity,
/// and material feedback. A missed ground ray keeps the last pose.
#[allow(clippy::too_many_arguments)]
pub fn update_preview(
    settings: Res<GameSettings>,
    look: Res<LookAngles>,
    terrain: Res<Terrain>,
    store: Res<HeldItemStore>,
    materials: Res<PreviewMaterials>,
    mut state: ResMut<PreviewState>,
    player_q: Query<&Transform, With<Player>>,
    colliders: Query<(Entity, &GlobalTransform, &Collider)>,
    mut ghost_q: Query<&mut Transform, (With<PreviewGhost>, Without<Player>)>,
    children_q: Query<&Children>,
    mut part_materials: Query<&mut MeshMaterial3d<StandardMaterial>, With<GhostPart>>,
) {
    let Some(ghost) = state.ghost else {
        return;
    };
    let Ok(player) = player_q.get_single() else {
        return;
    };
    let Ok(mut ghost_transform) = ghost_q.get_mut(ghost) else {
        return;
    };

    let eye = eye_position(player.translation);
    let dir = look.forward();

    // Ground surface: terrain plus any collider flagged as ground.
    let terrain_hit = terrain.raycast(eye, dir, GROUND_RAY_MAX_DIST);
    let collider_hit = spatial::raycast(
        eye,
        dir,
        GROUND_RAY_MAX_DIST,
        CollisionLayers::GROUND,
        colliders.iter(),
    );
    let hit = match (terrain_hit, collider_hit) {
        (Some(t), Some(c)) => {
            if (t - eye).length() <= c.distance {
                t
            } else {
                c.point
            }
        }
        (Some(t), None) => t,
        (None, Some(c)) => c.point,
        // No ground under the crosshair: hold the last pose this tick.
        (None, None) => return,
    };

    let rotation = Quat::from_rotation_y(state.yaw_degrees.to_radians());
    let mut position = snap_xz(hit, settings.cell_size);
    if settings.snap_to_surface {
        position.y = rest_on_surface_y(hit.y, state.bounds_center.y, state.bounds_half.y);
    }
    ghost_transform.rotation = rotation;
    ghost_transform.translation = position;

    // Obstruction test, skipping the ghost's own subtree and the held
    // building's (its colliders are disabled but still present).
    let probe = preview_probe(
        position,
        state.yaw_degrees,
        state.bounds_center,
        state.bounds_half,
        OVERLAP_EPSILON,
    );
    let mut exclude = Vec::new();
    collect_subtree(ghost, &children_q, &mut exclude);
    if let Some(held) = store.held_entity() {
        collect_subtree(held, &children_q, &mut exclude);
    }
    state.valid = spatial::overlap(&probe, OBSTRUCTION_MASK, &exclude, colliders.iter()).is_empty();

    // Tint every part by validity.
    let tint = if state.valid {
        materials.valid.clone()
    } else {
        materials.invalid.clone()
    };
    if let Ok(children) = children_q.get(ghost) {
        for &child in children {
            if let Ok(mut material) = part_materials.get_mut(child) {
                material.0 = tint.clone();
            }
        }
    }
}

/// Left click: place the held building at the ghost's pose, if valid.
pub fn confirm_placement(
    buttons: Res<ButtonInput<MouseButton>>,
    store: Res<HeldItemStore>,
    ghost_q: Query<&Transform, With<PreviewGhost>>,
    mut state: ResMut<PreviewState>,
    mut status: ResMut<StatusMessage>,
    mut place_events: EventWriter<PlaceBuilding>,
    mut commands: Commands,
) {
    if !buttons.just_pressed(MouseButton::Left) || !store.has_held_building() {
        return;
    }
    let Some(ghost) = state.ghost else {
        error!("Holding a building but no preview ghost exists, cannot place");
        return;
    };
    if !state.valid {
        info!("Placement blocked by obstruction");
        status.set("Cannot place here", true);
        return;
    }
    let Ok(transform) = ghost_q.get(ghost) else {
        error!("Preview ghost lost its transform, cannot place");
        return;
    };

    place_events.send(PlaceBuilding {
        position: transform.translation,
        yaw_degrees: state.yaw_degrees,
    });
    commands.entity(ghost).despawn_recursive();
    state.clear_ghost();
}

/// Right click: return the held building to where it came from, unless the
/// press is still inside the pickup debounce window.
pub fn cancel_placement(
    buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    settings: Res<GameSettings>,
    store: Res<HeldItemStore>,
    mut state: ResMut<PreviewState>,
    mut return_events: EventWriter<ReturnHeldBuilding>,
    mut commands: Commands,
) {
    if !buttons.just_pressed(MouseButton::Right) {
        return;
    }
    let Some(ghost) = state.ghost else {
        return;
    };
    if !store.has_held_building() {
        return;
    }
    let Some(since) = store.seconds_since_pickup(time.elapsed_secs()) else {
        return;
    };
    if !cancel_allowed(since, settings.cancel_debounce_secs) {
        return;
    }

    return_events.send(ReturnHeldBuilding);
    commands.entity(ghost).despawn_recursive();
    state.clear_ghost();
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}
