//! Map parsing functionality for converting raw layout constants into tile grids.

use crate::constants::GRID_CELL_SIZE;
use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::{Grid, MapId, Tile};

/// Destination wiring for a layout's exit characters, keyed by travel direction.
pub type ExitWiring<'a> = &'a [(Direction, MapId)];

/// Parser for converting raw layout constants into tile grids.
pub struct LayoutParser;

impl LayoutParser {
    /// Parses a single layout character into a tile.
    ///
    /// Exit characters (`^`, `v`, `<`, `>`) point out of the map in the
    /// direction they resemble; their destination comes from `exits`.
    ///
    /// # Errors
    ///
    /// Returns an error if the character is unknown, or if it is an exit
    /// character whose direction has no wired destination.
    pub fn parse_character(c: char, exits: ExitWiring) -> Result<Tile, ParseError> {
        let tile = match c {
            '#' => Tile::Wall,
            '.' => Tile::Grass,
            '*' => Tile::Flowers,
            '^' | 'v' | '<' | '>' => {
                let via = match c {
                    '^' => Direction::Up,
                    'v' => Direction::Down,
                    '<' => Direction::Left,
                    _ => Direction::Right,
                };
                let (_, to) = exits
                    .iter()
                    .find(|(direction, _)| *direction == via)
                    .ok_or(ParseError::UnwiredExit(c))?;
                Tile::Exit { to: *to, via }
            }
            _ => return Err(ParseError::UnknownCharacter(c)),
        };
        Ok(tile)
    }

    /// Parses a raw layout into a tile grid, row-major.
    ///
    /// # Arguments
    ///
    /// * `layout` - The raw layout as an array of strings
    /// * `exits` - Destination wiring for the layout's exit characters
    ///
    /// # Errors
    ///
    /// Returns an error if the layout contains unknown characters, a row of
    /// the wrong width, or an exit character without a wired destination.
    pub fn parse_layout(layout: &[&str; GRID_CELL_SIZE.y as usize], exits: ExitWiring) -> Result<Grid, ParseError> {
        let mut tiles = [[Tile::Grass; GRID_CELL_SIZE.x as usize]; GRID_CELL_SIZE.y as usize];

        for (y, line) in layout.iter().enumerate() {
            let width = line.chars().count();
            if width != GRID_CELL_SIZE.x as usize {
                return Err(ParseError::RowWidth {
                    row: y,
                    expected: GRID_CELL_SIZE.x as usize,
                    found: width,
                });
            }
            for (x, character) in line.chars().enumerate() {
                tiles[y][x] = Self::parse_character(character, exits)?;
            }
        }

        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOWN_LAYOUT;

    const WIRING: ExitWiring = &[(Direction::Right, MapId::Center), (Direction::Down, MapId::Ruins)];

    #[test]
    fn test_parse_character() {
        assert!(matches!(LayoutParser::parse_character('#', WIRING).unwrap(), Tile::Wall));
        assert!(matches!(LayoutParser::parse_character('.', WIRING).unwrap(), Tile::Grass));
        assert!(matches!(LayoutParser::parse_character('*', WIRING).unwrap(), Tile::Flowers));
        assert!(matches!(
            LayoutParser::parse_character('>', WIRING).unwrap(),
            Tile::Exit {
                to: MapId::Center,
                via: Direction::Right
            }
        ));
        assert!(matches!(
            LayoutParser::parse_character('v', WIRING).unwrap(),
            Tile::Exit {
                to: MapId::Ruins,
                via: Direction::Down
            }
        ));

        // Test invalid character
        assert!(LayoutParser::parse_character('Z', WIRING).is_err());
    }

    #[test]
    fn test_parse_character_unwired_exit() {
        let result = LayoutParser::parse_character('^', WIRING);
        assert!(matches!(result.unwrap_err(), ParseError::UnwiredExit('^')));
    }

    #[test]
    fn test_parse_layout() {
        let result = LayoutParser::parse_layout(&TOWN_LAYOUT, WIRING);
        assert!(result.is_ok());

        let tiles = result.unwrap();
        assert_eq!(tiles.len(), GRID_CELL_SIZE.y as usize);
        assert_eq!(tiles[0].len(), GRID_CELL_SIZE.x as usize);

        // Border wall in the top-left corner, grass in the open interior.
        assert_eq!(tiles[0][0], Tile::Wall);
        assert_eq!(tiles[1][1], Tile::Grass);
    }

    #[test]
    fn test_parse_layout_invalid_character() {
        let mut invalid_layout = TOWN_LAYOUT;
        invalid_layout[0] = "#########Z";

        let result = LayoutParser::parse_layout(&invalid_layout, WIRING);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_parse_layout_bad_width() {
        let mut invalid_layout = TOWN_LAYOUT;
        invalid_layout[3] = "#####";

        let result = LayoutParser::parse_layout(&invalid_layout, WIRING);
        assert!(matches!(
            result.unwrap_err(),
            ParseError::RowWidth {
                row: 3,
                expected: 10,
                found: 5
            }
        ));
    }
}
