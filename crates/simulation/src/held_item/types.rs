use bevy::prelude::*;

/// Everything needed to put a picked-up building back exactly as it was:
/// parent relation, local transform, and the enabled state of every
/// visibility/collider flag in its subtree, captured at pickup time.
#[derive(Clone, Debug)]
pub struct PickupSnapshot {
    pub parent: Option<Entity>,
    pub transform: Transform,
    pub visibility: Vec<(Entity, Visibility)>,
    pub colliders: Vec<(Entity, bool)>,
}

/// What the player is carrying. Buildings travel with their restore
/// snapshot; ore carries no state beyond the entity itself.
#[derive(Clone, Debug)]
pub enum HeldItem {
    Building { snapshot: PickupSnapshot },
    Ore,
}

#[derive(Clone, Debug)]
pub struct Held {
    pub entity: Entity,
    pub item: HeldItem,
    /// `Time::elapsed_secs` at pickup, for the cancel debounce.
    pub picked_up_at: f32,
}

/// The single carry slot. At most one item is ever held; a pickup attempt
/// while the slot is occupied is a no-op.
#[derive(Resource, Default)]
pub struct HeldItemStore {
    held: Option<Held>,
}

impl HeldItemStore {
    pub fn held(&self) -> Option<&Held> {
        self.held.as_ref()
    }

    pub fn held_entity(&self) -> Option<Entity> {
        self.held.as_ref().map(|h| h.entity)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    pub fn has_held_building(&self) -> bool {
        self.held_building().is_some()
    }

    /// The held entity, if it is a building.
    pub fn held_building(&self) -> Option<Entity> {
        match &self.held {
            Some(Held {
                entity,
                item: HeldItem::Building { .. },
                ..
            }) => Some(*entity),
            _ => None,
        }
    }

    /// The held entity, if it is an ore.
    pub fn held_ore(&self) -> Option<Entity> {
        match &self.held {
            Some(Held {
                entity,
                item: HeldItem::Ore,
                ..
            }) => Some(*entity),
            _ => None,
        }
    }

    pub fn seconds_since_pickup(&self, now: f32) -> Option<f32> {
        self.held.as_ref().map(|h| now - h.picked_up_at)
    }

    pub(crate) fn put(&mut self, held: Held) {
        debug_assert!(self.held.is_none(), "carry slot already occupied");
        self.held = Some(held);
    }

    pub(crate) fn take(&mut self) -> Option<Held> {
        self.held.take()
    }
}

/// Which interactable category a pickup request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Building,
    Ore,
}

/// Internal request produced by the interaction input system and applied by
/// the scene-mutating systems the same frame.
#[derive(Event)]
pub struct PickupRequest {
    pub entity: Entity,
    pub kind: PickupKind,
}

/// Sent by the placement preview on a confirmed placement.
#[derive(Event)]
pub struct PlaceBuilding {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

/// Sent by the placement preview when the player cancels a placement.
#[derive(Event)]
pub struct ReturnHeldBuilding;
