//! Meshes for the world the simulation spawns as plain data: the terrain
//! heightfield and box meshes for building parts and ore lumps.

use bevy::prelude::*;
use bevy::render::mesh::Indices;

use simulation::buildings::VisualPart;
use simulation::config::{TERRAIN_RESOLUTION, TERRAIN_SPACING};
use simulation::terrain::Terrain;

/// Build one triangle-list mesh over the whole heightfield, with normals
/// from central height differences.
fn build_terrain_mesh(terrain: &Terrain) -> Mesh {
    let res = TERRAIN_RESOLUTION;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(res * res);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(res * res);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(res * res);

    for row in 0..res {
        for col in 0..res {
            let x = col as f32 * TERRAIN_SPACING;
            let z = row as f32 * TERRAIN_SPACING;
            positions.push([x, terrain.height_at(x, z), z]);

            let left = terrain.height_at(x - TERRAIN_SPACING, z);
            let right = terrain.height_at(x + TERRAIN_SPACING, z);
            let near = terrain.height_at(x, z - TERRAIN_SPACING);
            let far = terrain.height_at(x, z + TERRAIN_SPACING);
            let normal = Vec3::new(left - right, 2.0 * TERRAIN_SPACING, near - far).normalize();
            normals.push(normal.to_array());

            uvs.push([col as f32 / (res - 1) as f32, row as f32 / (res - 1) as f32]);
        }
    }

    let mut indices: Vec<u32> = Vec::with_capacity((res - 1) * (res - 1) * 6);
    for row in 0..res - 1 {
        for col in 0..res - 1 {
            let i = (row * res + col) as u32;
            let right = i + 1;
            let below = i + res as u32;
            let below_right = below + 1;
            indices.extend_from_slice(&[i, below, right, right, below, below_right]);
        }
    }

    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::TriangleList,
        bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
            | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

pub fn spawn_terrain_mesh(
    terrain: Res<Terrain>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let mesh = meshes.add(build_terrain_mesh(&terrain));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.36, 0.52, 0.3),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((Mesh3d(mesh), MeshMaterial3d(material), Transform::IDENTITY));
}

/// Give every newly spawned visual part a box mesh in its own color.
pub fn attach_part_meshes(
    new_parts: Query<(Entity, &VisualPart), Added<VisualPart>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    for (entity, part) in &new_parts {
        let size = part.half_extents * 2.0;
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: part.color,
                perceptual_roughness: 0.9,
                ..default()
            })),
        ));
    }
}
