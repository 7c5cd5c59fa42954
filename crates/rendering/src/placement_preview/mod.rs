//! Ghost preview for placing the held building: grid-snapped to the ground
//! under the crosshair, rotated in discrete steps, validated against
//! obstructions, and tinted green/red accordingly.

mod systems;
mod types;


pub use systems::{
    cancel_placement, confirm_placement, rotate_preview, setup_preview_materials,
    sync_ghost_with_held, tick_status_message, update_preview,
};
pub use types::{
    cancel_allowed, preview_probe, rest_on_surface_y, GhostPart, PreviewGhost, PreviewMaterials,
    PreviewState, StatusMessage, OBSTRUCTION_MASK,
};
