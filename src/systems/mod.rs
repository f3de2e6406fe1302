//! The game's systems and the small shared resources they communicate through.

pub mod animation;
pub mod input;
pub mod movement;
pub mod render;
pub mod state;

use bevy_ecs::resource::Resource;

/// Flags that outlive any single system.
#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DeltaTime {
    pub seconds: f32,
}
