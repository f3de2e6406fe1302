//! This module renders each frame to the canvas.

use bevy_ecs::query::With;
use bevy_ecs::system::{NonSend, NonSendMut, Query, Res};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::warn;

use crate::asset::{Asset, TextureManifest};
use crate::constants::TILE_SIZE;
use crate::map::render::MapRenderer;
use crate::map::ActiveMap;
use crate::systems::animation::WalkAnimation;
use crate::systems::movement::{Heading, PlayerControlled, Position};
use crate::systems::state::{GameMode, MenuEntry, MenuScreen};

/// The sheet cell for a facing and walk state, resolved only here at the
/// render boundary. Standing always shows column zero.
fn sprite_clip(heading: &Heading, animation: &WalkAnimation) -> Rect {
    let column = if heading.moving {
        animation.frame as u32
    } else {
        0
    };
    Rect::new(
        (column * TILE_SIZE) as i32,
        (heading.facing.sheet_row() * TILE_SIZE) as i32,
        TILE_SIZE,
        TILE_SIZE,
    )
}

pub fn render_system(
    active: Res<ActiveMap>,
    mode: Res<GameMode>,
    player: Query<(&Position, &Heading, &WalkAnimation), With<PlayerControlled>>,
    mut canvas: NonSendMut<Canvas<Window>>,
    textures: NonSend<TextureManifest>,
) {
    canvas.set_draw_color(Color::BLACK);
    canvas.clear();

    MapRenderer::render_grid(&mut canvas, &textures, active.grid());

    if let Ok((position, heading, animation)) = player.single() {
        match textures.get(Asset::PlayerSheet) {
            Some(sheet) => {
                let dest = Rect::new(position.pixel.x, position.pixel.y, TILE_SIZE, TILE_SIZE);
                if let Err(e) = canvas.copy(sheet, sprite_clip(heading, animation), dest) {
                    warn!("Failed to draw player: {}", e);
                }
            }
            None => warn!("Player sheet missing from manifest"),
        }
    }

    if let GameMode::Menu(screen) = *mode {
        draw_menu(&mut canvas, screen);
    }
}

/// Draws the menu panel along the right edge: one row per entry, the
/// selection highlighted, and the load row turned red while an error waits
/// for acknowledgement.
fn draw_menu(canvas: &mut Canvas<Window>, screen: MenuScreen) {
    let panel = Rect::new(100, 8, 52, 64);
    canvas.set_draw_color(Color::RGB(24, 24, 32));
    if let Err(e) = canvas.fill_rect(panel) {
        warn!("Failed to draw menu panel: {}", e);
    }
    canvas.set_draw_color(Color::WHITE);
    if let Err(e) = canvas.draw_rect(panel) {
        warn!("Failed to draw menu border: {}", e);
    }

    let entries = [MenuEntry::Save, MenuEntry::Load, MenuEntry::Exit];
    for (index, entry) in entries.into_iter().enumerate() {
        let row = Rect::new(104, 12 + index as i32 * 20, 44, 16);
        let color = if screen.load_error && entry == MenuEntry::Load {
            Color::RGB(168, 48, 48)
        } else if screen.selection == entry {
            Color::RGB(232, 214, 96)
        } else {
            Color::RGB(90, 90, 110)
        };
        canvas.set_draw_color(color);
        if let Err(e) = canvas.fill_rect(row) {
            warn!("Failed to draw menu row: {}", e);
        }
    }
}

/// Flips the finished frame onto the screen.
pub fn present_system(mut canvas: NonSendMut<Canvas<Window>>) {
    canvas.present();
}
