use glam::IVec2;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

/// One of the four axis-aligned headings. The declaration order doubles as the
/// priority order used by ghosts when choosing a turn, and as the cyclic order of the
/// wall-bounce fallback.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Left,
    Right,
}

impl Direction {
    /// The four directions, in priority order.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    pub const fn as_usize(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// The next direction in index order, wrapping around.
    pub const fn next_cyclic(self) -> Direction {
        Self::DIRECTIONS[(self.as_usize() + 1) % Self::DIRECTIONS.len()]
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
