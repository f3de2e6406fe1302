//! Player movement: the gated input evaluation and the step resolver.

use bevy_ecs::component::Component;
use bevy_ecs::query::With;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut, Single};
use glam::IVec2;
use tracing::info;

use crate::audio::TrackSelector;
use crate::constants::{GRID_CELL_SIZE, MOVE_DELAY, TILE_SIZE};
use crate::map::direction::Direction;
use crate::map::{ActiveMap, MapId, MapRegistry, Tile};
use crate::systems::input::InputSnapshot;
use crate::systems::state::GameMode;
use crate::systems::DeltaTime;

/// Marker for the entity the player controls.
#[derive(Component, Debug, Default)]
pub struct PlayerControlled;

/// Pixel-space position, always tile-aligned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub pixel: IVec2,
}

impl Position {
    pub fn from_cell(cell: IVec2) -> Self {
        Self {
            pixel: cell * TILE_SIZE as i32,
        }
    }

    /// The grid cell this position occupies.
    pub fn cell(&self) -> IVec2 {
        self.pixel / TILE_SIZE as i32
    }
}

/// Which way the player faces and whether they are walking.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Heading {
    pub facing: Direction,
    pub moving: bool,
}

/// Countdown gating how often held directional input is evaluated.
#[derive(Resource, Debug, Default)]
pub struct MoveCooldown {
    remaining: f32,
}

impl MoveCooldown {
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Re-arms the gate after an accepted evaluation, blocked or not.
    pub fn arm(&mut self) {
        self.remaining = MOVE_DELAY.as_secs_f32();
    }
}

/// What one evaluated step attempt resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Step admitted; the new pixel position.
    Moved(IVec2),
    /// A wall or the map edge refused the step.
    Blocked,
    /// The player pushed through an exit tile.
    Exit { to: MapId, spawn: IVec2 },
}

/// Resolves one attempted step.
///
/// The tile under the player is checked first: pushing an exit tile in its
/// own direction leaves the map instead of stepping. Otherwise the step is
/// admitted when the tentative cell exists and is walkable.
pub fn resolve_move(position: IVec2, direction: Direction, map: &ActiveMap) -> MoveOutcome {
    let cell = position / TILE_SIZE as i32;
    if let Some((to, via)) = map.tile(cell).and_then(Tile::exit) {
        if via == direction {
            return MoveOutcome::Exit {
                to,
                spawn: spawn_point(direction, position),
            };
        }
    }

    let tentative = position + direction.as_ivec2() * TILE_SIZE as i32;
    match map.tile(tentative / TILE_SIZE as i32) {
        Some(tile) if tile.walkable() => MoveOutcome::Moved(tentative),
        _ => MoveOutcome::Blocked,
    }
}

/// Where a player leaving through `via` lands on the destination map: one
/// tile inward from the opposite edge, keeping the perpendicular coordinate.
pub fn spawn_point(via: Direction, from: IVec2) -> IVec2 {
    let tile = TILE_SIZE as i32;
    let last_column = GRID_CELL_SIZE.x as i32 - 1;
    let last_row = GRID_CELL_SIZE.y as i32 - 1;
    match via {
        Direction::Right => IVec2::new(tile, from.y),
        Direction::Left => IVec2::new((last_column - 1) * tile, from.y),
        Direction::Down => IVec2::new(from.x, tile),
        Direction::Up => IVec2::new(from.x, (last_row - 1) * tile),
    }
}

/// Evaluates held directional input at the gate cadence and applies the
/// outcome.
///
/// A map switch happens wholesale inside this one system: grid overwrite,
/// player respawn, track cue. No other system ever observes half a switch.
pub fn movement_system(
    mode: Res<GameMode>,
    input: Res<InputSnapshot>,
    dt: Res<DeltaTime>,
    mut cooldown: ResMut<MoveCooldown>,
    registry: Res<MapRegistry>,
    mut active: ResMut<ActiveMap>,
    selector: Res<TrackSelector>,
    player: Single<(&mut Position, &mut Heading), With<PlayerControlled>>,
) {
    cooldown.tick(dt.seconds);

    let (mut position, mut heading) = player.into_inner();

    if *mode != GameMode::Playing {
        heading.moving = false;
        return;
    }

    // Idle is detected every frame; only evaluations are gated.
    let Some(direction) = input.held else {
        heading.moving = false;
        return;
    };

    if !cooldown.ready() {
        return;
    }

    heading.facing = direction;
    heading.moving = true;

    match resolve_move(position.pixel, direction, &active) {
        MoveOutcome::Moved(pixel) => position.pixel = pixel,
        MoveOutcome::Blocked => {}
        MoveOutcome::Exit { to, spawn } => {
            info!(from = %active.id, to = %to, "Stepped through an exit");
            active.switch_to(to, &registry);
            position.pixel = spawn;
            selector.select(to.theme());
        }
    }

    cooldown.arm();
}
