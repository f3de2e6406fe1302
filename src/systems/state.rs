//! The high-level state machine: playing versus the in-game menu.

use bevy_ecs::query::With;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut, Single};
use tracing::{debug, info, warn};

use crate::audio::{TrackCue, TrackSelector};
use crate::map::direction::Direction;
use crate::map::{ActiveMap, MapRegistry};
use crate::save::{self, SaveRecord, SaveSlot};
use crate::systems::input::InputSnapshot;
use crate::systems::movement::{PlayerControlled, Position};
use crate::systems::GlobalState;

/// Entries of the in-game menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuEntry {
    #[default]
    Save,
    Load,
    Exit,
}

impl MenuEntry {
    /// The entry above, clamped at the top.
    pub const fn up(self) -> MenuEntry {
        match self {
            MenuEntry::Save | MenuEntry::Load => MenuEntry::Save,
            MenuEntry::Exit => MenuEntry::Load,
        }
    }

    /// The entry below, clamped at the bottom.
    pub const fn down(self) -> MenuEntry {
        match self {
            MenuEntry::Save => MenuEntry::Load,
            MenuEntry::Load | MenuEntry::Exit => MenuEntry::Exit,
        }
    }
}

/// The menu's volatile state while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuScreen {
    pub selection: MenuEntry,
    /// A failed load is shown until the player acknowledges it. Navigation
    /// is ignored while this is set.
    pub load_error: bool,
}

/// Whether the player is out in the world or inside the menu.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Playing,
    Menu(MenuScreen),
}

/// Latches quit requests and drives menu navigation and the save, load and
/// exit actions.
///
/// The confirm press that opens the menu is consumed by the transition; it
/// never also activates the initial selection.
pub fn state_system(
    input: Res<InputSnapshot>,
    mut mode: ResMut<GameMode>,
    mut global: ResMut<GlobalState>,
    slot: Res<SaveSlot>,
    registry: Res<MapRegistry>,
    mut active: ResMut<ActiveMap>,
    selector: Res<TrackSelector>,
    player: Single<&mut Position, With<PlayerControlled>>,
) {
    if input.quit {
        info!("Quit requested");
        global.exit = true;
    }

    let mut position = player.into_inner();

    match *mode {
        GameMode::Playing => {
            if input.confirm {
                debug!("Menu opened");
                *mode = GameMode::Menu(MenuScreen::default());
            }
        }
        GameMode::Menu(mut screen) => {
            if screen.load_error {
                if input.confirm {
                    debug!("Load error acknowledged");
                    screen.load_error = false;
                }
                *mode = GameMode::Menu(screen);
                return;
            }

            match input.pressed {
                Some(Direction::Up) => screen.selection = screen.selection.up(),
                Some(Direction::Down) => screen.selection = screen.selection.down(),
                _ => {}
            }

            if input.confirm {
                match screen.selection {
                    MenuEntry::Save => save_game(&slot, &active, &selector, &position),
                    MenuEntry::Load => {
                        if !load_game(&slot, &registry, &mut active, &selector, &mut position) {
                            screen.load_error = true;
                        }
                    }
                    MenuEntry::Exit => {
                        debug!("Menu closed");
                        *mode = GameMode::Playing;
                        return;
                    }
                }
            }

            *mode = GameMode::Menu(screen);
        }
    }
}

/// Serializes the running game to the save slot. Failure leaves the game
/// untouched and is only logged.
fn save_game(slot: &SaveSlot, active: &ActiveMap, selector: &TrackSelector, position: &Position) {
    let cell = position.cell();
    let record = SaveRecord {
        map: active.id,
        music: selector.current().to_raw(),
        xpos: cell.x,
        ypos: cell.y,
    };
    match save::write_record(&slot.path, &record) {
        Ok(()) => info!(path = %slot.path.display(), map = %record.map, "Game saved"),
        Err(e) => warn!("Failed to save: {}", e),
    }
}

/// Applies a saved record wholesale. Returns `false` without touching any
/// game state when the slot is missing or invalid.
fn load_game(
    slot: &SaveSlot,
    registry: &MapRegistry,
    active: &mut ActiveMap,
    selector: &TrackSelector,
    position: &mut Position,
) -> bool {
    let record = match save::read_record(&slot.path) {
        Ok(record) => record,
        Err(e) => {
            warn!("Failed to load: {}", e);
            return false;
        }
    };

    // The record arrives fully validated; everything below is infallible.
    active.switch_to(record.map, registry);
    *position = Position::from_cell(record.cell());
    selector.select(TrackCue::from_raw(record.music));
    info!(map = %record.map, cell = ?record.cell(), "Game loaded");
    true
}
