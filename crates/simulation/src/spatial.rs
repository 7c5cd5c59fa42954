//! Minimal spatial query layer: box colliders on a layer bitmask, ray casts,
//! and oriented-box overlap tests. No dynamics: entities move only through
//! their transforms, and queries walk whatever collider set the caller hands
//! in, so the same functions run headless in tests.

use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Layers
// ---------------------------------------------------------------------------

/// Bitmask of collision layers. Queries match when the masks intersect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(1);
    pub const BUILDING: Self = Self(1 << 1);
    pub const ORE: Self = Self(1 << 2);
    pub const PLAYER: Self = Self(1 << 3);
    pub const ALL: Self = Self(u32::MAX);

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Collider component
// ---------------------------------------------------------------------------

/// Axis-aligned box in the entity's local frame. World orientation comes from
/// the entity's `GlobalTransform`, so a rotated entity carries a rotated box.
#[derive(Component, Clone, Debug)]
pub struct Collider {
    pub half_extents: Vec3,
    /// Box center offset from the entity origin, in local space.
    pub offset: Vec3,
    pub layers: CollisionLayers,
    pub enabled: bool,
}

impl Collider {
    pub fn new(half_extents: Vec3, layers: CollisionLayers) -> Self {
        Self {
            half_extents,
            offset: Vec3::ZERO,
            layers,
            enabled: true,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

// ---------------------------------------------------------------------------
// Oriented box
// ---------------------------------------------------------------------------

/// World-space oriented box.
#[derive(Clone, Copy, Debug)]
pub struct Obb {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation: Quat,
}

impl Obb {
    pub fn from_collider(collider: &Collider, global: &GlobalTransform) -> Self {
        let (scale, rotation, translation) = global.to_scale_rotation_translation();
        Self {
            center: translation + rotation * (collider.offset * scale),
            half_extents: collider.half_extents * scale.abs(),
            rotation,
        }
    }

    /// Separating-axis test against another oriented box (15 candidate axes).
    pub fn intersects(&self, other: &Obb) -> bool {
        const EPS: f32 = 1e-6;

        let a_mat = Mat3::from_quat(self.rotation);
        let b_mat = Mat3::from_quat(other.rotation);
        let a_axes = [a_mat.x_axis, a_mat.y_axis, a_mat.z_axis];
        let b_axes = [b_mat.x_axis, b_mat.y_axis, b_mat.z_axis];
        let ae = [self.half_extents.x, self.half_extents.y, self.half_extents.z];
        let be = [
            other.half_extents.x,
            other.half_extents.y,
            other.half_extents.z,
        ];

        // Rotation of B expressed in A's frame, plus an epsilon-padded
        // absolute copy to keep near-parallel cross-product axes stable.
        let mut r = [[0.0f32; 3]; 3];
        let mut abs_r = [[0.0f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = a_axes[i].dot(b_axes[j]);
                abs_r[i][j] = r[i][j].abs() + EPS;
            }
        }

        let t_world = other.center - self.center;
        let t = [
            t_world.dot(a_axes[0]),
            t_world.dot(a_axes[1]),
            t_world.dot(a_axes[2]),
        ];

        // A's face axes
        for i in 0..3 {
            let ra = ae[i];
            let rb = be[0] * abs_r[i][0] + be[1] * abs_r[i][1] + be[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        // B's face axes
        for j in 0..3 {
            let ra = ae[0] * abs_r[0][j] + ae[1] * abs_r[1][j] + ae[2] * abs_r[2][j];
            let rb = be[j];
            let dist = (t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j]).abs();
            if dist > ra + rb {
                return false;
            }
        }

        // Cross products of edge axes
        for i in 0..3 {
            for j in 0..3 {
                let i1 = (i + 1) % 3;
                let i2 = (i + 2) % 3;
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;
                let ra = ae[i1] * abs_r[i2][j] + ae[i2] * abs_r[i1][j];
                let rb = be[j1] * abs_r[i][j2] + be[j2] * abs_r[i][j1];
                let dist = (t[i2] * r[i1][j] - t[i1] * r[i2][j]).abs();
                if dist > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Slab test in the box's local frame. Returns the entry distance along the
/// ray, or 0.0 when the origin starts inside the box.
fn ray_obb_distance(origin: Vec3, dir: Vec3, obb: &Obb) -> Option<f32> {
    let inv_rot = obb.rotation.inverse();
    let o = inv_rot * (origin - obb.center);
    let d = inv_rot * dir;

    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let h = obb.half_extents[axis];
        if d[axis].abs() < 1e-8 {
            if o[axis].abs() > h {
                return None;
            }
        } else {
            let mut t1 = (-h - o[axis]) / d[axis];
            let mut t2 = (h - o[axis]) / d[axis];
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
    }
    Some(t_min)
}

/// Nearest enabled collider on `mask` hit by the ray, if any.
pub fn raycast<'a>(
    origin: Vec3,
    dir: Vec3,
    max_dist: f32,
    mask: CollisionLayers,
    colliders: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Collider)>,
) -> Option<RayHit> {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    let mut nearest: Option<RayHit> = None;
    for (entity, global, collider) in colliders {
        if !collider.enabled || !collider.layers.intersects(mask) {
            continue;
        }
        let obb = Obb::from_collider(collider, global);
        if let Some(distance) = ray_obb_distance(origin, dir, &obb) {
            if distance <= max_dist && nearest.map_or(true, |h| distance < h.distance) {
                nearest = Some(RayHit {
                    entity,
                    distance,
                    point: origin + dir * distance,
                });
            }
        }
    }
    nearest
}

/// All enabled colliders on `mask` overlapping `probe`. Entities in
/// `exclude` are skipped; the caller lists the probe's own entity tree and
/// anything whose colliders are known to be stale (e.g. the held building,
/// whose disabled colliders still sit at the pickup location).
pub fn overlap<'a>(
    probe: &Obb,
    mask: CollisionLayers,
    exclude: &[Entity],
    colliders: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Collider)>,
) -> Vec<Entity> {
    let mut overlapping = Vec::new();
    for (entity, global, collider) in colliders {
        if !collider.enabled || !collider.layers.intersects(mask) {
            continue;
        }
        if exclude.contains(&entity) {
            continue;
        }
        let obb = Obb::from_collider(collider, global);
        if probe.intersects(&obb) {
            overlapping.push(entity);
        }
    }
    overlapping
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_obb(center: Vec3, rotation: Quat) -> Obb {
        Obb {
            center,
            half_extents: Vec3::ONE,
            rotation,
        }
    }

    #[test]
    fn test_obb_separated_on_face_axis() {
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let b = unit_obb(Vec3::new(2.5, 0.0, 0.0), Quat::IDENTITY);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_obb_overlapping() {
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let b = unit_obb(Vec3::new(1.5, 0.5, 0.0), Quat::IDENTITY);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_obb_rotation_separates_where_aabbs_touch() {
        // A diamond (45 deg box) whose corners point at A: the axis-aligned
        // bounding boxes overlap, but the oriented test separates them.
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let rotated = Quat::from_rotation_z(std::f32::consts::FRAC_PI_4);
        // World AABB of the diamond spans [0.79, 3.61] on x/y and would
        // overlap A, but the corner-on orientation leaves a gap.
        let b = unit_obb(Vec3::new(2.2, 2.2, 0.0), rotated);
        assert!(!a.intersects(&b));

        // Brought closer, the rotated box does overlap.
        let c = unit_obb(Vec3::new(1.6, 1.6, 0.0), rotated);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_obb_contained() {
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let b = Obb {
            center: Vec3::ZERO,
            half_extents: Vec3::splat(0.1),
            rotation: Quat::from_rotation_y(1.0),
        };
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_ray_hits_nearest() {
        let collider = Collider::new(Vec3::ONE, CollisionLayers::BUILDING);
        let near = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0));
        let far = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -12.0));
        let e_near = Entity::from_raw(1);
        let e_far = Entity::from_raw(2);

        let hit = raycast(
            Vec3::ZERO,
            -Vec3::Z,
            100.0,
            CollisionLayers::ALL,
            [
                (e_far, &far, &collider),
                (e_near, &near, &collider),
            ],
        )
        .expect("should hit");
        assert_eq!(hit.entity, e_near);
        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert!((hit.point.z - -4.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_respects_mask_and_enabled() {
        let mut collider = Collider::new(Vec3::ONE, CollisionLayers::ORE);
        let global = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0));
        let entity = Entity::from_raw(1);

        // Wrong mask
        assert!(raycast(
            Vec3::ZERO,
            -Vec3::Z,
            100.0,
            CollisionLayers::BUILDING,
            [(entity, &global, &collider)],
        )
        .is_none());

        // Disabled
        collider.enabled = false;
        assert!(raycast(
            Vec3::ZERO,
            -Vec3::Z,
            100.0,
            CollisionLayers::ALL,
            [(entity, &global, &collider)],
        )
        .is_none());
    }

    #[test]
    fn test_ray_beyond_max_distance() {
        let collider = Collider::new(Vec3::ONE, CollisionLayers::BUILDING);
        let global = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -50.0));
        assert!(raycast(
            Vec3::ZERO,
            -Vec3::Z,
            10.0,
            CollisionLayers::ALL,
            [(Entity::from_raw(1), &global, &collider)],
        )
        .is_none());
    }

    #[test]
    fn test_ray_hits_rotated_collider() {
        // A thin slab rotated 45 degrees still reports the oriented entry point.
        let collider = Collider::new(Vec3::new(2.0, 0.1, 2.0), CollisionLayers::GROUND);
        let transform =
            Transform::from_xyz(0.0, 0.0, -5.0).with_rotation(Quat::from_rotation_x(0.3));
        let global = GlobalTransform::from(transform);
        let hit = raycast(
            Vec3::ZERO,
            -Vec3::Z,
            100.0,
            CollisionLayers::GROUND,
            [(Entity::from_raw(1), &global, &collider)],
        );
        assert!(hit.is_some());
    }

    #[test]
    fn test_overlap_exclusion_list() {
        let collider = Collider::new(Vec3::ONE, CollisionLayers::BUILDING);
        let global = GlobalTransform::from(Transform::from_xyz(0.5, 0.0, 0.0));
        let blocker = Entity::from_raw(3);
        let probe = unit_obb(Vec3::ZERO, Quat::IDENTITY);

        let hits = overlap(
            &probe,
            CollisionLayers::ALL,
            &[],
            [(blocker, &global, &collider)],
        );
        assert_eq!(hits, vec![blocker]);

        let hits = overlap(
            &probe,
            CollisionLayers::ALL,
            &[blocker],
            [(blocker, &global, &collider)],
        );
        assert!(hits.is_empty());
    }

    #[test]
    fn test_overlap_skips_disabled_and_masked() {
        let mut collider = Collider::new(Vec3::ONE, CollisionLayers::ORE);
        let global = GlobalTransform::from(Transform::from_xyz(0.5, 0.0, 0.0));
        let entity = Entity::from_raw(4);
        let probe = unit_obb(Vec3::ZERO, Quat::IDENTITY);

        assert!(overlap(
            &probe,
            CollisionLayers::BUILDING,
            &[],
            [(entity, &global, &collider)],
        )
        .is_empty());

        collider.enabled = false;
        assert!(overlap(
            &probe,
            CollisionLayers::ALL,
            &[],
            [(entity, &global, &collider)],
        )
        .is_empty());
    }

    #[test]
    fn test_obb_from_collider_applies_scale_and_offset() {
        let collider =
            Collider::new(Vec3::ONE, CollisionLayers::BUILDING).with_offset(Vec3::new(0.0, 1.0, 0.0));
        let transform = Transform::from_xyz(10.0, 0.0, 0.0).with_scale(Vec3::splat(2.0));
        let obb = Obb::from_collider(&collider, &GlobalTransform::from(transform));
        assert_eq!(obb.center, Vec3::new(10.0, 2.0, 0.0));
        assert_eq!(obb.half_extents, Vec3::splat(2.0));
    }
}
