//! Draws a tile grid onto the canvas.

use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::warn;

use crate::asset::TextureManifest;
use crate::constants::TILE_SIZE;
use crate::map::Grid;

pub struct MapRenderer;

impl MapRenderer {
    /// Copies every tile's texture into its cell. A failed copy is logged
    /// and skipped; one bad tile must not blank the frame.
    pub fn render_grid(canvas: &mut Canvas<Window>, textures: &TextureManifest, grid: &Grid) {
        for (y, row) in grid.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let Some(texture) = textures.get(tile.asset()) else {
                    continue;
                };
                let dest = Rect::new(
                    x as i32 * TILE_SIZE as i32,
                    y as i32 * TILE_SIZE as i32,
                    TILE_SIZE,
                    TILE_SIZE,
                );
                if let Err(e) = canvas.copy(texture, None, dest) {
                    warn!(x, y, "Failed to draw tile: {}", e);
                }
            }
        }
    }
}
