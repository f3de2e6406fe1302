use glam::IVec2;
use perllert::audio::TrackCue;
use perllert::constants::{GRID_CELL_SIZE, TILE_SIZE};
use perllert::map::direction::Direction;
use perllert::map::{ActiveMap, MapId, MapRegistry, Tile};
use perllert::systems::movement::spawn_point;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_every_layout_parses() {
    MapRegistry::new().expect("All built-in layouts should parse");
}

#[test]
fn test_town_exits_are_wired() {
    let registry = MapRegistry::new().expect("Layouts should parse");
    let town = registry.template(MapId::Town);

    assert_that(&town[6][9]).is_equal_to(Tile::Exit {
        to: MapId::Center,
        via: Direction::Right,
    });
    assert_that(&town[7][9]).is_equal_to(Tile::Exit {
        to: MapId::Center,
        via: Direction::Right,
    });
    assert_that(&town[8][2]).is_equal_to(Tile::Exit {
        to: MapId::Ruins,
        via: Direction::Down,
    });
}

#[test]
fn test_return_exits_are_wired() {
    let registry = MapRegistry::new().expect("Layouts should parse");

    let center = registry.template(MapId::Center);
    assert_that(&center[6][0]).is_equal_to(Tile::Exit {
        to: MapId::Town,
        via: Direction::Left,
    });
    assert_that(&center[7][0]).is_equal_to(Tile::Exit {
        to: MapId::Town,
        via: Direction::Left,
    });

    let ruins = registry.template(MapId::Ruins);
    assert_that(&ruins[0][2]).is_equal_to(Tile::Exit {
        to: MapId::Town,
        via: Direction::Up,
    });
}

/// Every doorway's landing cell must exist and be walkable, otherwise a map
/// switch would strand the player inside a wall.
#[test]
fn test_every_exit_lands_on_walkable_ground() {
    let registry = MapRegistry::new().expect("Layouts should parse");

    for id in MapId::iter() {
        let grid = registry.template(id);
        for (y, row) in grid.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let Some((to, via)) = tile.exit() else {
                    continue;
                };

                let from = IVec2::new(x as i32, y as i32) * TILE_SIZE as i32;
                let spawn = spawn_point(via, from);
                let destination = ActiveMap::new(to, &registry);
                let landing = destination
                    .tile(spawn / TILE_SIZE as i32)
                    .expect("Exit landing should be on the grid");

                assert_that(&landing.walkable()).is_true();
            }
        }
    }
}

#[test]
fn test_tile_lookup_is_bounded() {
    let registry = MapRegistry::new().expect("Layouts should parse");
    let active = ActiveMap::new(MapId::Town, &registry);

    assert_that(&active.tile(IVec2::new(0, 0))).is_some();
    assert_that(&active.tile(IVec2::new(-1, 0))).is_none();
    assert_that(&active.tile(IVec2::new(0, -1))).is_none();
    assert_that(&active.tile(IVec2::new(GRID_CELL_SIZE.x as i32, 0))).is_none();
    assert_that(&active.tile(IVec2::new(0, GRID_CELL_SIZE.y as i32))).is_none();
}

#[test]
fn test_switching_copies_the_whole_template() {
    let registry = MapRegistry::new().expect("Layouts should parse");
    let mut active = ActiveMap::new(MapId::Town, &registry);

    active.switch_to(MapId::Center, &registry);
    assert_that(&active.id).is_equal_to(MapId::Center);
    assert_that(&(active.grid() == registry.template(MapId::Center))).is_true();

    active.switch_to(MapId::Town, &registry);
    assert_that(&active.id).is_equal_to(MapId::Town);
    assert_that(&(active.grid() == registry.template(MapId::Town))).is_true();
}

#[test]
fn test_map_names_round_trip() {
    for id in MapId::iter() {
        // Save files store the lowercase form.
        let name = id.to_string();
        assert_that(&name.chars().all(|c| c.is_ascii_lowercase())).is_true();

        let parsed = name.parse::<MapId>().expect("Name should parse back");
        assert_that(&parsed).is_equal_to(id);
    }
    assert_that(&"dungeon".parse::<MapId>().is_err()).is_true();
}

#[test]
fn test_each_map_has_its_own_theme() {
    assert_that(&MapId::Town.theme()).is_equal_to(TrackCue::Track(1));
    assert_that(&MapId::Center.theme()).is_equal_to(TrackCue::Track(2));
    assert_that(&MapId::Ruins.theme()).is_equal_to(TrackCue::Track(3));
}
