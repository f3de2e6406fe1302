//! Keyboard bindings and the per-frame input snapshot.

use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use bevy_ecs::system::{NonSendMut, Res, ResMut};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, KeyboardState, Scancode};
use sdl2::EventPump;

use crate::map::direction::Direction;

/// Abstract commands a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Move(Direction),
    Confirm,
    Quit,
}

/// Maps physical keys to game commands.
#[derive(Resource, Debug)]
pub struct Bindings {
    key_bindings: HashMap<Keycode, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Movement, arrows and WASD
        key_bindings.insert(Keycode::Up, GameCommand::Move(Direction::Up));
        key_bindings.insert(Keycode::W, GameCommand::Move(Direction::Up));
        key_bindings.insert(Keycode::Down, GameCommand::Move(Direction::Down));
        key_bindings.insert(Keycode::S, GameCommand::Move(Direction::Down));
        key_bindings.insert(Keycode::Left, GameCommand::Move(Direction::Left));
        key_bindings.insert(Keycode::A, GameCommand::Move(Direction::Left));
        key_bindings.insert(Keycode::Right, GameCommand::Move(Direction::Right));
        key_bindings.insert(Keycode::D, GameCommand::Move(Direction::Right));

        // Menu interaction
        key_bindings.insert(Keycode::Return, GameCommand::Confirm);
        key_bindings.insert(Keycode::Space, GameCommand::Confirm);

        // Exit
        key_bindings.insert(Keycode::Escape, GameCommand::Quit);
        key_bindings.insert(Keycode::Q, GameCommand::Quit);

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn get(&self, key: Keycode) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    /// The highest-priority direction whose bound keys include one currently
    /// held down. Priority is up, left, down, right.
    pub fn held_direction(&self, keyboard: &KeyboardState) -> Option<Direction> {
        Direction::PRIORITY.into_iter().find(|direction| {
            self.key_bindings.iter().any(|(key, command)| {
                *command == GameCommand::Move(*direction)
                    && Scancode::from_keycode(*key)
                        .is_some_and(|scancode| keyboard.is_scancode_pressed(scancode))
            })
        })
    }
}

/// Keeps `current` unless `candidate` outranks it in the fixed priority order.
fn prefer(current: Option<Direction>, candidate: Direction) -> Option<Direction> {
    let rank = |direction: Direction| {
        Direction::PRIORITY
            .iter()
            .position(|d| *d == direction)
            .unwrap_or(Direction::PRIORITY.len())
    };
    match current {
        Some(held) if rank(held) <= rank(candidate) => Some(held),
        _ => Some(candidate),
    }
}

/// Everything downstream systems need to know about this frame's input.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Direction whose key is held down right now, if any.
    pub held: Option<Direction>,
    /// Direction freshly pressed this frame. Used for menu navigation, where
    /// holding a key must not repeat.
    pub pressed: Option<Direction>,
    /// A confirm key went down this frame.
    pub confirm: bool,
    /// A quit key went down this frame, or the window was closed.
    pub quit: bool,
}

/// Drains the event pump and publishes a fresh [`InputSnapshot`].
pub fn input_system(
    bindings: Res<Bindings>,
    mut input: ResMut<InputSnapshot>,
    mut pump: NonSendMut<EventPump>,
) {
    let mut snapshot = InputSnapshot::default();

    for event in pump.poll_iter() {
        match event {
            Event::Quit { .. } => snapshot.quit = true,
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => match bindings.get(key) {
                Some(GameCommand::Move(direction)) => {
                    snapshot.pressed = prefer(snapshot.pressed, direction);
                }
                Some(GameCommand::Confirm) => snapshot.confirm = true,
                Some(GameCommand::Quit) => snapshot.quit = true,
                None => {}
            },
            _ => {}
        }
    }

    snapshot.held = bindings.held_direction(&pump.keyboard_state());
    *input = snapshot;
}
