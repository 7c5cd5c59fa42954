/// Terrain heightfield samples per side.
pub const TERRAIN_RESOLUTION: usize = 129;
/// World-space distance between adjacent heightfield samples.
pub const TERRAIN_SPACING: f32 = 2.0;
/// Side length of the playable area in world units.
pub const WORLD_SIZE: f32 = (TERRAIN_RESOLUTION - 1) as f32 * TERRAIN_SPACING;
/// Maximum terrain height in world units. Elevation [0,1] maps to [0, TERRAIN_HEIGHT_SCALE].
pub const TERRAIN_HEIGHT_SCALE: f32 = 3.0;
pub const TERRAIN_BASE_FREQUENCY: f32 = 0.02;

/// Camera/eye offset above the player's feet.
pub const EYE_HEIGHT: f32 = 1.6;
/// Feet-to-ground distance below which the player counts as grounded.
pub const GROUND_PROBE_DISTANCE: f32 = 0.2;
/// Small downward velocity applied while grounded so the probe stays in contact.
pub const GROUNDED_FALL_RESET: f32 = -2.0;

/// How far in front of the viewer a dropped ore lands.
pub const DROP_FORWARD_OFFSET: f32 = 1.0;
/// Maximum distance for the placement ground ray.
pub const GROUND_RAY_MAX_DIST: f32 = 100.0;
/// Half-extent inflation applied to preview bounds before the overlap query,
/// so a ghost resting flush against the surface it was snapped to does not
/// read as obstructed.
pub const OVERLAP_EPSILON: f32 = 0.01;
/// Half-extents used for preview bounds when the ghost has no visual parts.
pub const FALLBACK_BOUNDS_HALF_EXTENT: f32 = 0.25;
