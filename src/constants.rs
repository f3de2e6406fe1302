//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{IVec2, UVec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 16;
/// The size of every map, in tiles.
pub const GRID_CELL_SIZE: UVec2 = UVec2::new(10, 9);

/// The scale factor for the window (integer zoom)
pub const SCALE: f32 = 8.0;

/// The size of the canvas, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(GRID_CELL_SIZE.x * TILE_SIZE, GRID_CELL_SIZE.y * TILE_SIZE);

/// The cell the player starts on when a fresh game begins.
pub const PLAYER_SPAWN_CELL: IVec2 = IVec2::new(4, 4);

/// Minimum time between two directional input evaluations.
pub const MOVE_DELAY: Duration = Duration::from_millis(100);

/// Frames in one walk cycle of the character sheet.
pub const WALK_FRAME_COUNT: usize = 2;
/// Time each walk frame stays on screen, in seconds.
pub const WALK_FRAME_TIME: f32 = 0.15;

/// How often the audio thread samples the track selector.
pub const TRACK_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Pause between halting one track and starting the next.
pub const TRACK_SETTLE_DELAY: Duration = Duration::from_millis(300);
/// Number of music tracks shipped with the game.
pub const TRACK_COUNT: i32 = 3;

/// Directory save data is written under, relative to the working directory.
pub const SAVE_DIR: &str = "save";
/// File name of the single save slot.
pub const SAVE_FILE: &str = "progress.txt";

/// The raw layout of the town map, as a 2D array of characters.
///
/// `#` wall, `.` grass, `*` flowers, `>` east exit, `v` south exit.
pub const TOWN_LAYOUT: [&str; GRID_CELL_SIZE.y as usize] = [
    "########.#",
    "#........#",
    "#....##..#",
    "#....*#..#",
    "#.....#..#",
    "#.#...#..#",
    "#........>",
    "#........>",
    "#.v#######",
];

/// The raw layout of the center building, entered through the town's east exits.
pub const CENTER_LAYOUT: [&str; GRID_CELL_SIZE.y as usize] = [
    "##########",
    "#........#",
    "#.######.#",
    "#........#",
    "#.*....*.#",
    "#........#",
    "<........#",
    "<........#",
    "##########",
];

/// The raw layout of the ruins south of town.
pub const RUINS_LAYOUT: [&str; GRID_CELL_SIZE.y as usize] = [
    "##^#######",
    "#....*...#",
    "#.##.##..#",
    "#.#....#.#",
    "#...##...#",
    "#.##..##.#",
    "#..*.....#",
    "#........#",
    "##########",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_tile_size() {
        assert_eq!(TILE_SIZE, 16);
    }

    #[test]
    fn test_grid_cell_size() {
        assert_eq!(GRID_CELL_SIZE.x, 10);
        assert_eq!(GRID_CELL_SIZE.y, 9);
    }

    #[test]
    fn test_canvas_size() {
        let expected = UVec2::new(10 * TILE_SIZE, 9 * TILE_SIZE);
        assert_eq!(CANVAS_SIZE, expected);
        assert_eq!(CANVAS_SIZE.x, 160); // 10 * 16
        assert_eq!(CANVAS_SIZE.y, 144); // 9 * 16
    }

    #[test]
    fn test_spawn_cell_within_grid() {
        assert!(PLAYER_SPAWN_CELL.x >= 0 && (PLAYER_SPAWN_CELL.x as u32) < GRID_CELL_SIZE.x);
        assert!(PLAYER_SPAWN_CELL.y >= 0 && (PLAYER_SPAWN_CELL.y as u32) < GRID_CELL_SIZE.y);
    }

    #[test]
    fn test_move_delay_shorter_than_settle() {
        // Walking through a doorway should never outpace the audio handoff gate.
        assert!(MOVE_DELAY < TRACK_SETTLE_DELAY);
    }

    #[test]
    fn test_layout_dimensions() {
        for layout in [&TOWN_LAYOUT, &CENTER_LAYOUT, &RUINS_LAYOUT] {
            assert_eq!(layout.len(), GRID_CELL_SIZE.y as usize);
            for row in layout.iter() {
                assert_eq!(row.len(), GRID_CELL_SIZE.x as usize);
            }
        }
    }

    #[test]
    fn test_town_exit_characters() {
        // East doorways on rows 6 and 7, south doorway on the bottom row.
        assert_eq!(TOWN_LAYOUT[6].chars().nth(9), Some('>'));
        assert_eq!(TOWN_LAYOUT[7].chars().nth(9), Some('>'));
        assert_eq!(TOWN_LAYOUT[8].chars().nth(2), Some('v'));
    }

    #[test]
    fn test_spawn_cell_is_grass() {
        let row = TOWN_LAYOUT[PLAYER_SPAWN_CELL.y as usize];
        assert_eq!(row.chars().nth(PLAYER_SPAWN_CELL.x as usize), Some('.'));
    }
}
