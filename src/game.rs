//! This module contains the main game logic and state.

use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use tracing::debug;

use crate::asset::TextureManifest;
use crate::audio::TrackSelector;
use crate::constants::PLAYER_SPAWN_CELL;
use crate::error::GameResult;
use crate::map::{ActiveMap, MapId, MapRegistry};
use crate::save::SaveSlot;
use crate::systems::animation::{animation_system, WalkAnimation};
use crate::systems::input::{input_system, Bindings, InputSnapshot};
use crate::systems::movement::{
    movement_system, Heading, MoveCooldown, PlayerControlled, Position,
};
use crate::systems::render::{present_system, render_system};
use crate::systems::state::{state_system, GameMode};
use crate::systems::{DeltaTime, GlobalState};

/// The map every fresh game starts on.
const START_MAP: MapId = MapId::Town;

/// Core game state manager built on the Bevy ECS architecture.
///
/// All game state lives in the `World`; the `Schedule` runs the systems in a
/// fixed chain once per frame. SDL2 handles are stored as `NonSend` resources
/// since they must stay on the main thread.
pub struct Game {
    pub world: World,
    schedule: Schedule,
}

impl Game {
    /// Builds the world: map templates, resources, SDL handles, and the
    /// player entity on its starting cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in map layouts fail to parse.
    pub fn new(
        canvas: Canvas<Window>,
        textures: TextureManifest,
        event_pump: EventPump,
        selector: TrackSelector,
    ) -> GameResult<Game> {
        let mut world = World::default();

        let registry = MapRegistry::new()?;
        let active = ActiveMap::new(START_MAP, &registry);

        // Arm the selector before the music thread's first poll, so the
        // starting map's theme plays without waiting for a map switch.
        selector.select(START_MAP.theme());

        world.insert_resource(registry);
        world.insert_resource(active);
        world.insert_resource(GameMode::default());
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(DeltaTime::default());
        world.insert_resource(MoveCooldown::default());
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(SaveSlot::default());
        world.insert_resource(selector);

        world.insert_non_send_resource(canvas);
        world.insert_non_send_resource(textures);
        world.insert_non_send_resource(event_pump);

        world.spawn((
            PlayerControlled,
            Position::from_cell(PLAYER_SPAWN_CELL),
            Heading::default(),
            WalkAnimation::default(),
        ));
        debug!(cell = ?PLAYER_SPAWN_CELL, map = %START_MAP, "Player spawned");

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                input_system,
                state_system,
                movement_system,
                animation_system,
                render_system,
                present_system,
            )
                .chain(),
        );

        Ok(Game { world, schedule })
    }

    /// Runs one frame of game logic.
    ///
    /// # Arguments
    ///
    /// * `dt` - Frame delta time in seconds
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate, `false` to continue.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt });
        self.schedule.run(&mut self.world);
        self.world.resource::<GlobalState>().exit
    }
}
