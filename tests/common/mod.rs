//! Shared helpers for integration tests.
#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use glam::IVec2;

use perllert::audio::TrackSelector;
use perllert::map::direction::Direction;
use perllert::map::{ActiveMap, MapId, MapRegistry};
use perllert::save::SaveSlot;
use perllert::systems::animation::WalkAnimation;
use perllert::systems::input::InputSnapshot;
use perllert::systems::movement::{Heading, MoveCooldown, PlayerControlled, Position};
use perllert::systems::state::GameMode;
use perllert::systems::{DeltaTime, GlobalState};

/// One simulated frame at sixty frames per second.
pub const FRAME: f32 = 1.0 / 60.0;

/// Builds a world with every logic-side resource the systems expect, playing
/// on the town map. No SDL state is involved.
pub fn create_test_world() -> World {
    let mut world = World::default();

    let registry = MapRegistry::new().expect("Layouts should parse");
    let active = ActiveMap::new(MapId::Town, &registry);

    world.insert_resource(registry);
    world.insert_resource(active);
    world.insert_resource(GameMode::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(DeltaTime { seconds: FRAME });
    world.insert_resource(MoveCooldown::default());
    world.insert_resource(InputSnapshot::default());
    world.insert_resource(SaveSlot::default());
    world.insert_resource(TrackSelector::new(MapId::Town.theme()));

    world
}

/// Spawns the player on a grid cell.
pub fn spawn_test_player(world: &mut World, cell: IVec2) -> Entity {
    world
        .spawn((
            PlayerControlled,
            Position::from_cell(cell),
            Heading::default(),
            WalkAnimation::default(),
        ))
        .id()
}

/// Publishes an input snapshot for the next system run.
pub fn set_input(world: &mut World, input: InputSnapshot) {
    world.insert_resource(input);
}

/// Holds a direction key for the next run.
pub fn hold(world: &mut World, direction: Direction) {
    set_input(
        world,
        InputSnapshot {
            held: Some(direction),
            ..Default::default()
        },
    );
}

/// Taps a direction key for the next run, as menu navigation sees it.
pub fn press(world: &mut World, direction: Direction) {
    set_input(
        world,
        InputSnapshot {
            pressed: Some(direction),
            ..Default::default()
        },
    );
}

/// Presses confirm for the next run.
pub fn confirm(world: &mut World) {
    set_input(
        world,
        InputSnapshot {
            confirm: true,
            ..Default::default()
        },
    );
}

/// Makes the next frame long enough to open the movement gate.
pub fn open_move_gate(world: &mut World) {
    world.insert_resource(DeltaTime {
        seconds: perllert::constants::MOVE_DELAY.as_secs_f32(),
    });
}

/// The player's current position.
pub fn player_position(world: &mut World) -> Position {
    let mut query = world.query::<&Position>();
    *query.single(world).expect("Player should exist")
}

/// The player's current heading.
pub fn player_heading(world: &mut World) -> Heading {
    let mut query = world.query::<&Heading>();
    *query.single(world).expect("Player should exist")
}
