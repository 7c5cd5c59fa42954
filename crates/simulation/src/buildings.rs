//! Relocatable farm structures and collectible ore deposits: the static
//! catalog of kinds, their visual part lists, and spawn helpers. Visual parts
//! are plain data; the rendering crate attaches meshes to them.

use bevy::prelude::*;

use crate::spatial::{Collider, CollisionLayers};

// ---------------------------------------------------------------------------
// Visual parts
// ---------------------------------------------------------------------------

/// A box-shaped visual element. Rendering adds a mesh + material for each.
#[derive(Component, Clone, Copy, Debug)]
pub struct VisualPart {
    pub half_extents: Vec3,
    pub color: Color,
}

/// One entry of a building's part list, in the building's local frame.
#[derive(Clone, Copy, Debug)]
pub struct PartSpec {
    pub offset: Vec3,
    pub half_extents: Vec3,
    pub color: Color,
}

/// Bounding box of a part list in the parent's local frame, as
/// (center, half_extents). `None` for an empty list.
pub fn encapsulate_parts(parts: &[PartSpec]) -> Option<(Vec3, Vec3)> {
    let first = parts.first()?;
    let mut min = first.offset - first.half_extents;
    let mut max = first.offset + first.half_extents;
    for part in &parts[1..] {
        min = min.min(part.offset - part.half_extents);
        max = max.max(part.offset + part.half_extents);
    }
    Some(((min + max) * 0.5, (max - min) * 0.5))
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Building {
    pub kind: BuildingKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildingKind {
    Shed,
    StorageCrate,
    FencePanel,
    WaterTrough,
}

impl BuildingKind {
    pub fn name(&self) -> &'static str {
        match self {
            BuildingKind::Shed => "Shed",
            BuildingKind::StorageCrate => "Storage Crate",
            BuildingKind::FencePanel => "Fence Panel",
            BuildingKind::WaterTrough => "Water Trough",
        }
    }

    pub fn parts(&self) -> Vec<PartSpec> {
        let wood = Color::srgb(0.55, 0.39, 0.23);
        let dark_wood = Color::srgb(0.42, 0.29, 0.17);
        match self {
            BuildingKind::Shed => vec![
                PartSpec {
                    offset: Vec3::new(0.0, 1.0, 0.0),
                    half_extents: Vec3::new(1.2, 1.0, 0.9),
                    color: wood,
                },
                PartSpec {
                    offset: Vec3::new(0.0, 2.2, 0.0),
                    half_extents: Vec3::new(1.35, 0.2, 1.05),
                    color: Color::srgb(0.6, 0.2, 0.15),
                },
            ],
            BuildingKind::StorageCrate => vec![PartSpec {
                offset: Vec3::new(0.0, 0.45, 0.0),
                half_extents: Vec3::splat(0.45),
                color: wood,
            }],
            BuildingKind::FencePanel => vec![
                PartSpec {
                    offset: Vec3::new(-0.85, 0.5, 0.0),
                    half_extents: Vec3::new(0.07, 0.5, 0.07),
                    color: dark_wood,
                },
                PartSpec {
                    offset: Vec3::new(0.85, 0.5, 0.0),
                    half_extents: Vec3::new(0.07, 0.5, 0.07),
                    color: dark_wood,
                },
                PartSpec {
                    offset: Vec3::new(0.0, 0.7, 0.0),
                    half_extents: Vec3::new(0.9, 0.12, 0.05),
                    color: wood,
                },
            ],
            BuildingKind::WaterTrough => vec![PartSpec {
                offset: Vec3::new(0.0, 0.3, 0.0),
                half_extents: Vec3::new(0.7, 0.3, 0.35),
                color: Color::srgb(0.45, 0.47, 0.5),
            }],
        }
    }
}

/// Spawn a building root with collider and visual part children.
pub fn spawn_building(
    commands: &mut Commands,
    kind: BuildingKind,
    translation: Vec3,
    yaw: f32,
) -> Entity {
    let parts = kind.parts();
    let (center, half_extents) =
        encapsulate_parts(&parts).unwrap_or((Vec3::ZERO, Vec3::splat(0.5)));

    commands
        .spawn((
            Building { kind },
            Transform {
                translation,
                rotation: Quat::from_rotation_y(yaw),
                ..default()
            },
            Visibility::default(),
            Collider::new(half_extents, CollisionLayers::BUILDING).with_offset(center),
        ))
        .with_children(|parent| {
            for part in &parts {
                parent.spawn((
                    VisualPart {
                        half_extents: part.half_extents,
                        color: part.color,
                    },
                    Transform::from_translation(part.offset),
                    Visibility::default(),
                ));
            }
        })
        .id()
}

// ---------------------------------------------------------------------------
// Ore
// ---------------------------------------------------------------------------

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ore {
    pub kind: OreKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OreKind {
    Stone,
    Copper,
    Iron,
}

impl OreKind {
    pub fn name(&self) -> &'static str {
        match self {
            OreKind::Stone => "Stone",
            OreKind::Copper => "Copper Ore",
            OreKind::Iron => "Iron Ore",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            OreKind::Stone => Color::srgb(0.5, 0.5, 0.52),
            OreKind::Copper => Color::srgb(0.72, 0.45, 0.2),
            OreKind::Iron => Color::srgb(0.55, 0.36, 0.3),
        }
    }

    pub fn half_extent(&self) -> f32 {
        match self {
            OreKind::Stone => 0.18,
            OreKind::Copper => 0.15,
            OreKind::Iron => 0.15,
        }
    }
}

/// Spawn an ore lump resting at `translation` (its base, not its center).
pub fn spawn_ore(commands: &mut Commands, kind: OreKind, translation: Vec3) -> Entity {
    let half = kind.half_extent();
    commands
        .spawn((
            Ore { kind },
            VisualPart {
                half_extents: Vec3::splat(half),
                color: kind.color(),
            },
            Transform::from_translation(translation + Vec3::Y * half),
            Visibility::default(),
            Collider::new(Vec3::splat(half), CollisionLayers::ORE),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encapsulate_empty() {
        assert!(encapsulate_parts(&[]).is_none());
    }

    #[test]
    fn test_encapsulate_single_part() {
        let parts = [PartSpec {
            offset: Vec3::new(0.0, 1.0, 0.0),
            half_extents: Vec3::new(1.0, 0.5, 2.0),
            color: Color::WHITE,
        }];
        let (center, half) = encapsulate_parts(&parts).unwrap();
        assert_eq!(center, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(half, Vec3::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn test_encapsulate_covers_all_parts() {
        let (center, half) = encapsulate_parts(&BuildingKind::Shed.parts()).unwrap();
        // Roof is wider than the base and reaches y = 2.4; base bottom is y = 0.
        assert!((half.y - 1.2).abs() < 1e-5);
        assert!((center.y - 1.2).abs() < 1e-5);
        assert!((half.x - 1.35).abs() < 1e-5);
    }

    #[test]
    fn test_every_building_kind_has_parts() {
        for kind in [
            BuildingKind::Shed,
            BuildingKind::StorageCrate,
            BuildingKind::FencePanel,
            BuildingKind::WaterTrough,
        ] {
            assert!(!kind.parts().is_empty(), "{} has no parts", kind.name());
        }
    }
}
