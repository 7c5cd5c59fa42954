//! The single carry slot: which world entity the player is holding, the
//! snapshot needed to restore it, and the pickup/drop/place/return
//! operations that mutate the scene graph around it.

mod systems;
mod types;

pub use systems::{
    apply_pickup_requests, apply_place_events, apply_return_events, handle_drop_input,
    handle_pickup_input, HeldItemPlugin,
};
pub use types::{
    Held, HeldItem, HeldItemStore, PickupKind, PickupRequest, PickupSnapshot, PlaceBuilding,
    ReturnHeldBuilding,
};
