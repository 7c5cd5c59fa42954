use bevy::prelude::*;

use crate::buildings::{Building, Ore};
use crate::config::DROP_FORWARD_OFFSET;
use crate::player::{eye_position, HandAnchor, HiddenAnchor, LookAngles, Player};
use crate::settings::GameSettings;
use crate::spatial::{self, Collider, CollisionLayers};
use crate::terrain::Terrain;

use super::types::{
    Held, HeldItem, HeldItemStore, PickupKind, PickupRequest, PickupSnapshot, PlaceBuilding,
    ReturnHeldBuilding,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Root plus all descendants, depth-first.
fn collect_subtree(root: Entity, children_q: &Query<&Children>) -> Vec<Entity> {
    let mut out = vec![root];
    let mut stack = vec![root];
    while let Some(entity) = stack.pop() {
        if let Ok(children) = children_q.get(entity) {
            for &child in children {
                out.push(child);
                stack.push(child);
            }
        }
    }
    out
}

/// Force every saved flag on: placement re-enables everything no matter what
/// state the building was picked up in.
fn enable_all_flags(
    snapshot: &PickupSnapshot,
    visibility_q: &mut Query<&mut Visibility>,
    collider_q: &mut Query<&mut Collider>,
) {
    for (entity, _) in &snapshot.visibility {
        if let Ok(mut visibility) = visibility_q.get_mut(*entity) {
            *visibility = Visibility::Visible;
        }
    }
    for (entity, _) in &snapshot.colliders {
        if let Ok(mut collider) = collider_q.get_mut(*entity) {
            collider.enabled = true;
        }
    }
}

/// Restore every saved flag to its captured value.
fn restore_flags(
    snapshot: &PickupSnapshot,
    visibility_q: &mut Query<&mut Visibility>,
    collider_q: &mut Query<&mut Collider>,
) {
    for (entity, saved) in &snapshot.visibility {
        if let Ok(mut visibility) = visibility_q.get_mut(*entity) {
            *visibility = *saved;
        }
    }
    for (entity, saved) in &snapshot.colliders {
        if let Ok(mut collider) = collider_q.get_mut(*entity) {
            collider.enabled = *saved;
        }
    }
}

// ---------------------------------------------------------------------------
// Input systems
// ---------------------------------------------------------------------------

/// Ray from the viewer center against interactable colliders; right-click
/// picks up a building under the crosshair, `E` an ore. Requests are applied
/// by `apply_pickup_requests` in the same frame.
#[allow(clippy::too_many_arguments)]
pub fn handle_pickup_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    settings: Res<GameSettings>,
    store: Res<HeldItemStore>,
    look: Res<LookAngles>,
    player_q: Query<&Transform, With<Player>>,
    colliders: Query<(Entity, &GlobalTransform, &Collider)>,
    buildings: Query<&Building>,
    ores: Query<&Ore>,
    mut requests: EventWriter<PickupRequest>,
) {
    let building_pressed = buttons.just_pressed(MouseButton::Right);
    let ore_pressed = keys.just_pressed(KeyCode::KeyE);
    if !building_pressed && !ore_pressed {
        return;
    }
    let Ok(player) = player_q.get_single() else {
        return;
    };

    let Some(hit) = spatial::raycast(
        eye_position(player.translation),
        look.forward(),
        settings.interact_distance,
        CollisionLayers::BUILDING | CollisionLayers::ORE,
        colliders.iter(),
    ) else {
        return;
    };

    // Holding something already: pickup attempts are silent no-ops.
    if !store.is_empty() {
        return;
    }

    if building_pressed && buildings.get(hit.entity).is_ok() {
        requests.send(PickupRequest {
            entity: hit.entity,
            kind: PickupKind::Building,
        });
    } else if ore_pressed && ores.get(hit.entity).is_ok() {
        requests.send(PickupRequest {
            entity: hit.entity,
            kind: PickupKind::Ore,
        });
    }
}

/// Apply pickup requests: capture the snapshot, hide/disable the subtree,
/// and reparent to the appropriate anchor.
#[allow(clippy::too_many_arguments)]
pub fn apply_pickup_requests(
    mut requests: EventReader<PickupRequest>,
    mut store: ResMut<HeldItemStore>,
    time: Res<Time>,
    mut commands: Commands,
    children_q: Query<&Children>,
    parent_q: Query<&Parent>,
    transform_q: Query<&Transform>,
    global_q: Query<&GlobalTransform>,
    mut visibility_q: Query<&mut Visibility>,
    mut collider_q: Query<&mut Collider>,
    hidden_anchor_q: Query<Entity, With<HiddenAnchor>>,
    hand_anchor_q: Query<Entity, With<HandAnchor>>,
    buildings: Query<&Building>,
    ores: Query<&Ore>,
) {
    for request in requests.read() {
        if !store.is_empty() {
            continue;
        }
        let entity = request.entity;
        let Ok(original) = transform_q.get(entity).copied() else {
            warn!("Pickup target {:?} has no transform, ignoring", entity);
            continue;
        };

        match request.kind {
            PickupKind::Building => {
                let Ok(anchor) = hidden_anchor_q.get_single() else {
                    error!("No hidden anchor in the scene, cannot pick up building");
                    continue;
                };

                // Capture before mutating, so restore is bit-for-bit.
                let subtree = collect_subtree(entity, &children_q);
                let snapshot = PickupSnapshot {
                    parent: parent_q.get(entity).ok().map(|p| p.get()),
                    transform: original,
                    visibility: subtree
                        .iter()
                        .filter_map(|e| visibility_q.get(*e).ok().map(|v| (*e, *v)))
                        .collect(),
                    colliders: subtree
                        .iter()
                        .filter_map(|e| collider_q.get(*e).ok().map(|c| (*e, c.enabled)))
                        .collect(),
                };

                // The building vanishes from the world but stays alive.
                for e in &subtree {
                    if let Ok(mut visibility) = visibility_q.get_mut(*e) {
                        *visibility = Visibility::Hidden;
                    }
                    if let Ok(mut collider) = collider_q.get_mut(*e) {
                        collider.enabled = false;
                    }
                }

                // Reparent under the hidden anchor, preserving world
                // transform; scale explicitly re-pinned to the original.
                if let (Ok(entity_global), Ok(anchor_global)) =
                    (global_q.get(entity), global_q.get(anchor))
                {
                    let mut local = entity_global.reparented_to(anchor_global);
                    local.scale = original.scale;
                    commands.entity(entity).set_parent(anchor).insert(local);
                }

                if let Ok(building) = buildings.get(entity) {
                    info!("Picked up building: {}", building.kind.name());
                }
                store.put(Held {
                    entity,
                    item: HeldItem::Building { snapshot },
                    picked_up_at: time.elapsed_secs(),
                });
            }
            PickupKind::Ore => {
                let Ok(anchor) = hand_anchor_q.get_single() else {
                    error!("No hand anchor in the scene, cannot pick up ore");
                    continue;
                };

                if let Ok(mut collider) = collider_q.get_mut(entity) {
                    collider.enabled = false;
                }
                commands.entity(entity).set_parent(anchor).insert(Transform {
                    translation: Vec3::ZERO,
                    rotation: Quat::IDENTITY,
                    scale: original.scale,
                });

                if let Ok(ore) = ores.get(entity) {
                    info!("Picked up ore: {}", ore.kind.name());
                }
                store.put(Held {
                    entity,
                    item: HeldItem::Ore,
                    picked_up_at: time.elapsed_secs(),
                });
            }
        }
    }
}

/// `Q` sets a carried ore down in front of the viewer, settled on the
/// terrain. No-op when nothing is held or the held item is a building.
#[allow(clippy::too_many_arguments)]
pub fn handle_drop_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut store: ResMut<HeldItemStore>,
    look: Res<LookAngles>,
    terrain: Res<Terrain>,
    player_q: Query<&Transform, With<Player>>,
    transform_q: Query<&Transform>,
    mut collider_q: Query<&mut Collider>,
    ores: Query<&Ore>,
    mut commands: Commands,
) {
    if !keys.just_pressed(KeyCode::KeyQ) {
        return;
    }
    let Some(entity) = store.held_ore() else {
        return;
    };
    let Ok(player) = player_q.get_single() else {
        return;
    };

    let ahead = eye_position(player.translation) + look.forward() * DROP_FORWARD_OFFSET;
    let rest_half = collider_q
        .get(entity)
        .map(|c| c.half_extents.y)
        .unwrap_or(0.0);
    let ground_y = terrain.height_at(ahead.x, ahead.z);
    let scale = transform_q.get(entity).map(|t| t.scale).unwrap_or(Vec3::ONE);

    commands.entity(entity).remove_parent().insert(Transform {
        translation: Vec3::new(ahead.x, ground_y + rest_half, ahead.z),
        rotation: Quat::IDENTITY,
        scale,
    });
    if let Ok(mut collider) = collider_q.get_mut(entity) {
        collider.enabled = true;
    }

    if let Ok(ore) = ores.get(entity) {
        info!("Dropped ore: {}", ore.kind.name());
    }
    store.take();
}

// ---------------------------------------------------------------------------
// Placement event systems
// ---------------------------------------------------------------------------

/// A confirmed placement: move the held building to the chosen pose at the
/// world root and re-enable everything.
pub fn apply_place_events(
    mut events: EventReader<PlaceBuilding>,
    mut store: ResMut<HeldItemStore>,
    mut commands: Commands,
    mut visibility_q: Query<&mut Visibility>,
    mut collider_q: Query<&mut Collider>,
    buildings: Query<&Building>,
) {
    for event in events.read() {
        if !store.has_held_building() {
            continue;
        }
        let Some(held) = store.take() else {
            continue;
        };
        let HeldItem::Building { snapshot } = held.item else {
            continue;
        };

        commands.entity(held.entity).remove_parent().insert(Transform {
            translation: event.position,
            rotation: Quat::from_rotation_y(event.yaw_degrees.to_radians()),
            scale: snapshot.transform.scale,
        });
        enable_all_flags(&snapshot, &mut visibility_q, &mut collider_q);

        if let Ok(building) = buildings.get(held.entity) {
            info!(
                "Placed building {} at {:.1?}",
                building.kind.name(),
                event.position
            );
        }
    }
}

/// A cancelled placement: put the held building back exactly where and how
/// it was picked up.
pub fn apply_return_events(
    mut events: EventReader<ReturnHeldBuilding>,
    mut store: ResMut<HeldItemStore>,
    mut commands: Commands,
    mut visibility_q: Query<&mut Visibility>,
    mut collider_q: Query<&mut Collider>,
    buildings: Query<&Building>,
) {
    for _ in events.read() {
        if !store.has_held_building() {
            continue;
        }
        let Some(held) = store.take() else {
            continue;
        };
        let HeldItem::Building { snapshot } = held.item else {
            continue;
        };

        match snapshot.parent {
            Some(parent) => {
                commands.entity(held.entity).set_parent(parent);
            }
            None => {
                commands.entity(held.entity).remove_parent();
            }
        }
        commands.entity(held.entity).insert(snapshot.transform);
        restore_flags(&snapshot, &mut visibility_q, &mut collider_q);

        if let Ok(building) = buildings.get(held.entity) {
            info!("Returned building {} to its origin", building.kind.name());
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct HeldItemPlugin;

impl Plugin for HeldItemPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeldItemStore>()
            .add_event::<PickupRequest>()
            .add_event::<PlaceBuilding>()
            .add_event::<ReturnHeldBuilding>()
            .add_systems(
                Update,
                (
                    handle_pickup_input,
                    apply_pickup_requests,
                    handle_drop_input,
                    apply_place_events,
                    apply_return_events,
                )
                    .chain(),
            );
    }
}
