//! Walk-cycle animation, decoupled from the movement gate.

use bevy_ecs::component::Component;
use bevy_ecs::system::{Query, Res};

use crate::constants::{WALK_FRAME_COUNT, WALK_FRAME_TIME};
use crate::systems::movement::Heading;
use crate::systems::DeltaTime;

/// Frame state for a walking character.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WalkAnimation {
    pub frame: usize,
    time_bank: f32,
}

/// Advances walk frames while moving. Stopping snaps back to the standing
/// frame immediately and empties the time bank, so a later step starts its
/// cycle from zero.
pub fn animation_system(dt: Res<DeltaTime>, mut query: Query<(&Heading, &mut WalkAnimation)>) {
    for (heading, mut animation) in query.iter_mut() {
        if heading.moving {
            animation.time_bank += dt.seconds;
            while animation.time_bank >= WALK_FRAME_TIME {
                animation.time_bank -= WALK_FRAME_TIME;
                animation.frame = (animation.frame + 1) % WALK_FRAME_COUNT;
            }
        } else {
            animation.frame = 0;
            animation.time_bank = 0.0;
        }
    }
}
