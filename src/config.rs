//! Runtime tuning for a simulation. Defaults mirror [`crate::constants`].

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2};

use crate::constants::{self, fruit, ghost, player, scoring, timing};
use crate::error::{GameError, GameResult, ParseError};
use crate::map::direction::Direction;
use crate::map::grid::Grid;

/// Pixel size of one tile and the half extents the sub-tile offset may range over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    pub size: IVec2,
}

impl TileGeometry {
    pub fn new(size: UVec2) -> Self {
        Self { size: size.as_ivec2() }
    }

    /// Half extents along each axis, truncated.
    pub fn half(&self) -> IVec2 {
        self.size / 2
    }
}

impl Default for TileGeometry {
    fn default() -> Self {
        Self::new(constants::CELL_SIZE)
    }
}

/// Everything needed to build a [`crate::game::Game`].
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub layout: Vec<String>,
    pub tile: TileGeometry,

    pub player_start: IVec2,
    pub player_facing: Direction,
    pub player_velocity: i32,

    pub ghost_pen: IVec2,
    pub ghost_pen_exit: IVec2,
    pub ghost_facing: Direction,
    pub ghost_velocity: i32,
    pub ghost_release_delays: [u64; 4],

    pub ready_ms: u64,
    pub frightened_ms: u64,
    pub blink_ms: u64,
    pub fruit_available_ms: u64,
    pub fruit_respawn_ms: u64,
    pub fruit_spawn: IVec2,
    pub fruit_dot_threshold: u32,
    pub fruit_dot_threshold_increment: u32,

    pub starting_lives: u32,
    pub starting_high_score: u32,
    pub extra_life_threshold: u32,
    pub extra_life_increment: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: constants::RAW_BOARD.iter().map(|row| row.to_string()).collect(),
            tile: TileGeometry::default(),

            player_start: player::START,
            player_facing: player::START_FACING,
            player_velocity: player::VELOCITY,

            ghost_pen: ghost::PEN_START,
            ghost_pen_exit: ghost::PEN_EXIT,
            ghost_facing: ghost::START_FACING,
            ghost_velocity: ghost::VELOCITY,
            ghost_release_delays: ghost::RELEASE_DELAYS_MS,

            ready_ms: timing::READY_MS,
            frightened_ms: timing::FRIGHTENED_MS,
            blink_ms: timing::BLINK_MS,
            fruit_available_ms: timing::FRUIT_AVAILABLE_MS,
            fruit_respawn_ms: timing::FRUIT_RESPAWN_MS,
            fruit_spawn: fruit::SPAWN,
            fruit_dot_threshold: fruit::DOT_THRESHOLD,
            fruit_dot_threshold_increment: fruit::DOT_THRESHOLD_INCREMENT,

            starting_lives: scoring::STARTING_LIVES,
            starting_high_score: scoring::STARTING_HIGH_SCORE,
            extra_life_threshold: scoring::EXTRA_LIFE_THRESHOLD,
            extra_life_increment: scoring::EXTRA_LIFE_INCREMENT,
        }
    }
}

impl GameConfig {
    /// Uses `layout` instead of the canonical board.
    pub fn with_layout<S: AsRef<str>>(mut self, layout: &[S]) -> Self {
        self.layout = layout.iter().map(|row| row.as_ref().to_string()).collect();
        self
    }

    /// Pen slot of the ghost at `index` in spawn order.
    pub fn ghost_slot(&self, index: usize) -> IVec2 {
        self.ghost_pen + IVec2::X * index as i32
    }

    /// Parses the layout and checks that every start position is an open tile on it.
    pub fn build_grid(&self) -> GameResult<Grid> {
        let grid = Grid::parse(&self.layout)?;

        let mut positions = vec![
            ("player start", self.player_start),
            ("pen exit", self.ghost_pen_exit),
            ("fruit spawn", self.fruit_spawn),
        ];
        positions.extend((0..4).map(|i| ("ghost pen", self.ghost_slot(i))));

        for (what, pos) in positions {
            if grid.is_boundary(pos) {
                return Err(ParseError::OutOfBounds { what, pos }.into());
            }
        }

        if self.tile.size.min_element() <= 0 || self.player_velocity < 0 || self.ghost_velocity < 0 {
            return Err(GameError::InvalidConfig(format!(
                "tile size {} with velocities {}/{}",
                self.tile.size, self.player_velocity, self.ghost_velocity
            )));
        }

        Ok(grid)
    }
}
