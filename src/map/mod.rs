//! This module defines the game maps and provides types for interacting with them.

pub mod direction;
pub mod parser;
pub mod render;

use bevy_ecs::resource::Resource;
use glam::IVec2;
use strum_macros::{Display, EnumIter, EnumString};

use crate::asset::Asset;
use crate::audio::TrackCue;
use crate::constants::{CENTER_LAYOUT, GRID_CELL_SIZE, RUINS_LAYOUT, TOWN_LAYOUT};
use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::parser::LayoutParser;

/// A full map's tiles, row-major.
pub type Grid = [[Tile; GRID_CELL_SIZE.x as usize]; GRID_CELL_SIZE.y as usize];

/// Identifier for each of the game's maps.
///
/// The set is closed: save files name maps by these strings, and an exit can
/// only be wired to one of them, so lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MapId {
    Town,
    Center,
    Ruins,
}

impl MapId {
    /// The music track that loops while this map is active.
    pub const fn theme(self) -> TrackCue {
        match self {
            MapId::Town => TrackCue::Track(1),
            MapId::Center => TrackCue::Track(2),
            MapId::Ruins => TrackCue::Track(3),
        }
    }
}

/// A single map tile, carrying everything the game needs to know about it:
/// how it renders, whether it admits the player, and where it leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Plain walkable ground.
    Grass,
    /// Walkable ground with a flower overlay.
    Flowers,
    /// A blocking wall.
    Wall,
    /// A walkable doorway that switches maps when pushed through in its direction.
    Exit { to: MapId, via: Direction },
}

impl Tile {
    /// Whether the player may stand on this tile.
    pub const fn walkable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// The map switch this tile triggers when the player pushes `via` while
    /// standing on it, if it is an exit at all.
    pub const fn exit(self) -> Option<(MapId, Direction)> {
        match self {
            Tile::Exit { to, via } => Some((to, via)),
            _ => None,
        }
    }

    /// The texture this tile renders with.
    pub const fn asset(self) -> Asset {
        match self {
            Tile::Grass => Asset::GrassTile,
            Tile::Flowers => Asset::FlowersTile,
            Tile::Wall => Asset::WallTile,
            Tile::Exit { .. } => Asset::DoorwayTile,
        }
    }
}

/// One immutable parsed template per map, built once at startup.
#[derive(Resource)]
pub struct MapRegistry {
    town: Grid,
    center: Grid,
    ruins: Grid,
}

impl MapRegistry {
    /// Parses every layout constant and wires its exits.
    ///
    /// # Errors
    ///
    /// Returns an error if any layout fails to parse; this is fatal at startup.
    pub fn new() -> Result<Self, ParseError> {
        let town = LayoutParser::parse_layout(
            &TOWN_LAYOUT,
            &[(Direction::Right, MapId::Center), (Direction::Down, MapId::Ruins)],
        )?;
        let center = LayoutParser::parse_layout(&CENTER_LAYOUT, &[(Direction::Left, MapId::Town)])?;
        let ruins = LayoutParser::parse_layout(&RUINS_LAYOUT, &[(Direction::Up, MapId::Town)])?;

        Ok(Self { town, center, ruins })
    }

    /// The pristine template for a map. Templates are never mutated.
    pub fn template(&self, id: MapId) -> &Grid {
        match id {
            MapId::Town => &self.town,
            MapId::Center => &self.center,
            MapId::Ruins => &self.ruins,
        }
    }
}

/// The map currently being played: a mutable copy of one registry template.
#[derive(Resource)]
pub struct ActiveMap {
    pub id: MapId,
    grid: Grid,
}

impl ActiveMap {
    pub fn new(id: MapId, registry: &MapRegistry) -> Self {
        Self {
            id,
            grid: *registry.template(id),
        }
    }

    /// Replaces the whole grid with the destination's template.
    pub fn switch_to(&mut self, id: MapId, registry: &MapRegistry) {
        self.id = id;
        self.grid = *registry.template(id);
    }

    /// The tile under a grid cell, or `None` outside the grid.
    pub fn tile(&self, cell: IVec2) -> Option<Tile> {
        if cell.x < 0 || cell.y < 0 || cell.x >= GRID_CELL_SIZE.x as i32 || cell.y >= GRID_CELL_SIZE.y as i32 {
            return None;
        }
        Some(self.grid[cell.y as usize][cell.x as usize])
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
