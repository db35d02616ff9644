//! This module contains all the constants used in the simulation.

use glam::{IVec2, UVec2};

use crate::map::direction::Direction;

/// The size of the canvas the pixel offsets are expressed against, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(720, 960);
/// The size of the game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(30, 32);
/// The size of a single tile, in pixels.
pub const CELL_SIZE: UVec2 = UVec2::new(CANVAS_SIZE.x / BOARD_CELL_SIZE.x, CANVAS_SIZE.y / BOARD_CELL_SIZE.y);

/// The raw layout of the game board.
///
/// `#` is a boundary, `.` a dot, `o` a super dot, `T` a wrap (teleport) edge and ` ` open floor.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "                              ",
    " ############################ ",
    " #............##............# ",
    " #.####.#####.##.#####.####.# ",
    " #o#  #.#   #.##.#   #.#  #o# ",
    " #.####.#####.##.#####.####.# ",
    " #..........................# ",
    " #.####.##.########.##.####.# ",
    " #.####.##.########.##.####.# ",
    " #......##....##....##......# ",
    " ######.##### ## #####.###### ",
    "      #.##          ##.#      ",
    "      #.## ######## ##.#      ",
    "      #.## #      # ##.#      ",
    " ######.## #      # ##.###### ",
    " T     .   #      #   .     T ",
    " ######.## #      # ##.###### ",
    "      #.## ######## ##.#      ",
    "      #.##          ##.#      ",
    " ######.##.######## ##.###### ",
    " #............##............# ",
    " #.####.#####.##.#####.####.# ",
    " #.####.#####.##.#####.####.# ",
    " #...##....... ........##...# ",
    " ###.##.##.########.##.##.### ",
    " ###.##.##.########.##.##.### ",
    " #......##....##....##......# ",
    " #.##########.##.##########.# ",
    " #.##########.##.##########.# ",
    " #..........................# ",
    " ############################ ",
    "                              ",
];

/// Player spawn: tile and default facing.
pub mod player {
    use super::*;

    pub const START: IVec2 = IVec2::new(14, 23);
    pub const START_FACING: Direction = Direction::Left;
    /// Pixels per second.
    pub const VELOCITY: i32 = 300;
}

/// Ghost spawn, pen and behaviour tuning.
pub mod ghost {
    use super::*;

    /// The first pen slot; ghost `n` starts `n` columns to the right of it.
    pub const PEN_START: IVec2 = IVec2::new(13, 15);
    /// Where a released ghost leaves the pen.
    pub const PEN_EXIT: IVec2 = IVec2::new(14, 11);
    pub const START_FACING: Direction = Direction::Left;
    /// Pixels per second.
    pub const VELOCITY: i32 = 100;
    /// Delay before each ghost (in spawn order) is released from the pen.
    pub const RELEASE_DELAYS_MS: [u64; 4] = [0, 1_000, 4_000, 7_000];
    /// How far ahead of the player the ambusher aims, in tiles.
    pub const AMBUSH_LEAD_TILES: i32 = 4;
    /// Manhattan distance at which the shy ghost gives up the chase.
    pub const SHY_DISTANCE: i32 = 8;
}

/// Durations of the timed game mechanics, in milliseconds.
pub mod timing {
    /// Length of the READY stage before play starts.
    pub const READY_MS: u64 = 3_000;
    pub const FRIGHTENED_MS: u64 = 8_000;
    /// Period of the frightened two-colour flash.
    pub const BLINK_MS: u64 = 1_000;
    /// How long a spawned fruit stays collectible.
    pub const FRUIT_AVAILABLE_MS: u64 = 8_000;
    /// How long after a fruit is eaten before another one may spawn.
    pub const FRUIT_RESPAWN_MS: u64 = 10_000;
}

/// Point values and score thresholds.
pub mod scoring {
    pub const DOT_POINTS: u32 = 10;
    pub const SUPER_DOT_POINTS: u32 = 100;
    /// Value of the first ghost captured in a frightened window; doubles per capture.
    pub const FRIGHTENED_GHOST_POINTS: u32 = 100;
    pub const FRUIT_POINTS: u32 = 100;
    pub const FRUIT_POINTS_MULTIPLIER: u32 = 2;
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_HIGH_SCORE: u32 = 10_000;
    pub const EXTRA_LIFE_THRESHOLD: u32 = 10_000;
    pub const EXTRA_LIFE_INCREMENT: u32 = 10_000;
}

/// Bonus fruit placement and spawn thresholds.
pub mod fruit {
    use super::*;

    pub const SPAWN: IVec2 = IVec2::new(14, 18);
    /// Dots eaten before the first fruit appears.
    pub const DOT_THRESHOLD: u32 = 70;
    /// Added to the threshold every time a fruit appears.
    pub const DOT_THRESHOLD_INCREMENT: u32 = 100;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(CELL_SIZE, UVec2::new(24, 30));
    }

    #[test]
    fn test_raw_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_CELL_SIZE.y as usize);
        for row in RAW_BOARD.iter() {
            assert_eq!(row.len(), BOARD_CELL_SIZE.x as usize);
        }
    }

    #[test]
    fn test_raw_board_tunnel_row() {
        let tunnel_row = RAW_BOARD[15];
        assert_eq!(tunnel_row.chars().nth(1), Some('T'));
        assert_eq!(tunnel_row.chars().nth(BOARD_CELL_SIZE.x as usize - 2), Some('T'));
    }

    #[test]
    fn test_raw_board_super_dots() {
        let count: usize = RAW_BOARD.iter().map(|row| row.chars().filter(|&c| c == 'o').count()).sum();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_spawn_tiles_are_open() {
        let tile = |p: IVec2| RAW_BOARD[p.y as usize].as_bytes()[p.x as usize];
        assert_eq!(tile(player::START), b' ');
        assert_eq!(tile(ghost::PEN_EXIT), b' ');
        assert_eq!(tile(fruit::SPAWN), b' ');
        for slot in 0..4 {
            assert_eq!(tile(ghost::PEN_START + IVec2::X * slot), b' ');
        }
    }
}
