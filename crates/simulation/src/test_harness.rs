//! # TestFarm: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` for running gameplay flows
//! without a window or renderer, with a deterministic fixed timestep.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use crate::buildings::{spawn_building, spawn_ore, BuildingKind, OreKind};
use crate::held_item::HeldItemStore;
use crate::player::{spawn_player, LookAngles};
use crate::settings::GameSettings;
use crate::spatial::Collider;
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// Timestep every `tick()` advances by.
pub const TICK: Duration = Duration::from_millis(16);

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Starts from a flat, empty world with a player at (64, 0, 64); spawn
/// whatever scene the test needs, then drive input and `tick()`.
pub struct TestFarm {
    pub app: App,
    pub player: Entity,
}

impl TestFarm {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TransformPlugin));

        // Flat terrain instead of the generated farm world.
        app.insert_resource(SkipWorldInit);
        app.add_plugins(SimulationPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

        // Run Startup so init_world inserts the flat terrain.
        app.update();

        let player = {
            let max_stamina = app.world().resource::<GameSettings>().max_stamina;
            let world = app.world_mut();
            let mut commands = world.commands();
            let player = spawn_player(&mut commands, Vec3::new(64.0, 0.0, 64.0), max_stamina);
            world.flush();
            player
        };

        // One tick so transforms propagate before any raycasts.
        let mut farm = Self { app, player };
        farm.tick();
        farm
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Advance one frame (16 ms), then retire just-pressed input edges the
    /// way the input plugin would.
    pub fn tick(&mut self) {
        self.app.update();
        let world = self.app.world_mut();
        world.resource_mut::<ButtonInput<KeyCode>>().clear();
        world.resource_mut::<ButtonInput<MouseButton>>().clear();
    }

    pub fn tick_for(&mut self, seconds: f32) {
        let steps = (seconds / TICK.as_secs_f32()).round() as u32;
        for _ in 0..steps {
            self.tick();
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(button);
    }

    /// Point the view: yaw/pitch in radians.
    pub fn set_look(&mut self, yaw: f32, pitch: f32) {
        let mut look = self.app.world_mut().resource_mut::<LookAngles>();
        look.yaw = yaw;
        look.pitch = pitch;
    }

    pub fn send_event<E: Event>(&mut self, event: E) {
        let _ = self.app.world_mut().send_event(event);
    }

    // -----------------------------------------------------------------------
    // Scene setup
    // -----------------------------------------------------------------------

    pub fn spawn_building(&mut self, kind: BuildingKind, translation: Vec3, yaw: f32) -> Entity {
        let world = self.app.world_mut();
        let mut commands = world.commands();
        let entity = spawn_building(&mut commands, kind, translation, yaw);
        world.flush();
        self.tick();
        entity
    }

    pub fn spawn_ore(&mut self, kind: OreKind, translation: Vec3) -> Entity {
        let world = self.app.world_mut();
        let mut commands = world.commands();
        let entity = spawn_ore(&mut commands, kind, translation);
        world.flush();
        self.tick();
        entity
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &HeldItemStore {
        self.app.world().resource::<HeldItemStore>()
    }

    pub fn transform(&self, entity: Entity) -> Transform {
        *self
            .app
            .world()
            .get::<Transform>(entity)
            .expect("entity has a transform")
    }

    pub fn visibility(&self, entity: Entity) -> Visibility {
        *self
            .app
            .world()
            .get::<Visibility>(entity)
            .expect("entity has visibility")
    }

    pub fn collider_enabled(&self, entity: Entity) -> bool {
        self.app
            .world()
            .get::<Collider>(entity)
            .expect("entity has a collider")
            .enabled
    }

    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.app.world().get::<Parent>(entity).map(|p| p.get())
    }

    pub fn children_of(&self, entity: Entity) -> Vec<Entity> {
        self.app
            .world()
            .get::<Children>(entity)
            .map(|c| c.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for TestFarm {
    fn default() -> Self {
        Self::new()
    }
}
