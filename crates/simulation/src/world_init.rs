//! Startup world: terrain, the player, a handful of relocatable farm
//! structures, and ore deposits scattered over the hills.

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::buildings::{spawn_building, spawn_ore, BuildingKind, OreKind};
use crate::config::WORLD_SIZE;
use crate::player::spawn_player;
use crate::settings::GameSettings;
use crate::terrain::Terrain;

pub const WORLD_SEED: i32 = 1337;
const ORE_DEPOSITS: usize = 24;

/// Insert before `SimulationPlugin` to start from an empty world (tests).
#[derive(Resource)]
pub struct SkipWorldInit;

pub fn init_world(
    mut commands: Commands,
    settings: Res<GameSettings>,
    skip: Option<Res<SkipWorldInit>>,
) {
    if skip.is_some() {
        commands.insert_resource(Terrain::flat(0.0));
        return;
    }

    let terrain = Terrain::generate(WORLD_SEED);
    let center = WORLD_SIZE * 0.5;

    let player_pos = Vec3::new(center, terrain.height_at(center, center), center);
    spawn_player(&mut commands, player_pos, settings.max_stamina);

    // A small farmstead near the spawn point.
    let farm = [
        (BuildingKind::Shed, center - 6.0, center - 8.0, 0.0),
        (BuildingKind::StorageCrate, center - 3.0, center - 9.0, 0.3),
        (BuildingKind::StorageCrate, center - 2.0, center - 6.5, 0.0),
        (BuildingKind::WaterTrough, center + 4.0, center - 7.0, 0.0),
        (
            BuildingKind::FencePanel,
            center + 7.0,
            center - 4.0,
            std::f32::consts::FRAC_PI_2,
        ),
        (BuildingKind::FencePanel, center + 7.0, center - 2.0, 0.0),
    ];
    for &(kind, x, z, yaw) in &farm {
        let y = terrain.height_at(x, z);
        spawn_building(&mut commands, kind, Vec3::new(x, y, z), yaw);
    }

    // Ore scattered deterministically around the map.
    let mut rng = ChaCha8Rng::seed_from_u64(WORLD_SEED as u64);
    for _ in 0..ORE_DEPOSITS {
        let x = rng.gen_range(WORLD_SIZE * 0.1..WORLD_SIZE * 0.9);
        let z = rng.gen_range(WORLD_SIZE * 0.1..WORLD_SIZE * 0.9);
        let kind = match rng.gen_range(0..3) {
            0 => OreKind::Stone,
            1 => OreKind::Copper,
            _ => OreKind::Iron,
        };
        spawn_ore(&mut commands, kind, Vec3::new(x, terrain.height_at(x, z), z));
    }

    info!(
        "World initialized: {} buildings, {} ore deposits",
        farm.len(),
        ORE_DEPOSITS
    );
    commands.insert_resource(terrain);
}
