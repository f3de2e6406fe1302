use glam::IVec2;

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// The order in which held direction keys are honored when several are
    /// down during the same evaluation. Exactly one wins.
    pub const PRIORITY: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    /// Returns the direction as an IVec2, with positive y pointing down the screen.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Row of the character sheet holding this facing's walk frames.
    pub const fn sheet_row(self) -> u32 {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_covers_every_direction_once() {
        let mut seen = std::collections::HashSet::new();
        for direction in Direction::PRIORITY {
            assert!(seen.insert(direction));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_vectors_are_unit_steps() {
        assert_eq!(Direction::Up.as_ivec2(), IVec2::new(0, -1));
        assert_eq!(Direction::Down.as_ivec2(), IVec2::new(0, 1));
        assert_eq!(Direction::Left.as_ivec2(), IVec2::new(-1, 0));
        assert_eq!(Direction::Right.as_ivec2(), IVec2::new(1, 0));
    }

    #[test]
    fn test_sheet_rows_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for direction in Direction::PRIORITY {
            assert!(seen.insert(direction.sheet_row()));
        }
    }
}
