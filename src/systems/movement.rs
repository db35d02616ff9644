use glam::IVec2;
use tracing::{debug, trace};

use crate::config::TileGeometry;
use crate::map::direction::Direction;
use crate::map::grid::Grid;

/// Outcome of a single [`Mover::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Not enough time passed to move a whole pixel.
    Idle,
    /// Moved within the current tile.
    Moved,
    /// Reached the tile edge and committed the pending direction.
    Turned,
    /// Reached the tile edge with a boundary ahead.
    HitWall,
    /// Crossed into the next tile.
    Arrived,
}

/// Where and how an agent starts, and where it returns to after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub tile: IVec2,
    pub facing: Direction,
}

/// Continuous motion over the tile grid.
///
/// An agent sits on a tile with a pixel offset from the tile's center. The offset only
/// ever varies along the axis of the facing direction and stays within the tile's half
/// extents; crossing the far edge either turns, stops, or steps onto the next tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mover {
    pub tile: IVec2,
    pub offset: IVec2,
    pub facing: Direction,
    /// The direction that will be taken at the next tile edge.
    pub pending: Direction,
    /// Pixels per second.
    pub velocity: i32,
    /// Timestamp (ms) of the last advance that actually moved.
    pub last_update: u64,
}

impl Mover {
    pub fn new(spawn: Spawn, velocity: i32, now: u64) -> Self {
        Self {
            tile: spawn.tile,
            offset: IVec2::ZERO,
            facing: spawn.facing,
            pending: spawn.facing,
            velocity,
            last_update: now,
        }
    }

    /// Whether the tile adjacent in `direction` can be entered.
    pub fn direction_valid(&self, direction: Direction, grid: &Grid) -> bool {
        !grid.neighbor(self.tile, direction).is_boundary()
    }

    /// Queues `direction` for the next tile edge. Directions into a boundary are ignored.
    pub fn request_direction(&mut self, direction: Direction, grid: &Grid) -> bool {
        if !self.direction_valid(direction, grid) {
            debug!(tile = ?self.tile, ?direction, "Rejected direction into boundary");
            return false;
        }
        self.pending = direction;
        true
    }

    /// Whether stepping one tile in `direction` shrinks the row or column distance to `target`.
    pub fn is_closer(&self, direction: Direction, target: IVec2) -> bool {
        let current = (target - self.tile).abs();
        let next = (target - (self.tile + direction.as_ivec2())).abs();
        next.y < current.y || next.x < current.x
    }

    /// Places the agent at the center of `tile`, keeping its heading.
    pub fn relocate(&mut self, tile: IVec2) {
        trace!(from = ?self.tile, to = ?tile, "Relocated");
        self.tile = tile;
        self.offset = IVec2::ZERO;
    }

    pub fn reset_to(&mut self, spawn: Spawn, now: u64) {
        self.relocate(spawn.tile);
        self.facing = spawn.facing;
        self.pending = spawn.facing;
        self.last_update = now;
    }

    /// Moves the agent by however many pixels elapsed since the last update.
    ///
    /// A single call never moves further than one full tile along the facing axis. When
    /// no whole pixel has elapsed, nothing changes and the elapsed time keeps accruing.
    pub fn advance(&mut self, now: u64, grid: &Grid, geometry: &TileGeometry) -> Step {
        let elapsed = now.saturating_sub(self.last_update);
        let pixels = (elapsed as i64 * self.velocity as i64 / 1000) as i32;
        if pixels == 0 {
            return Step::Idle;
        }
        self.last_update = now;

        let unit = self.facing.as_ivec2();
        let horizontal = unit.x != 0;
        let sign = if horizontal { unit.x } else { unit.y };
        let (extent, half) = if horizontal {
            (geometry.size.x, geometry.half().x)
        } else {
            (geometry.size.y, geometry.half().y)
        };
        let pixels = pixels.min(extent);

        let blocked = grid.neighbor(self.tile, self.facing).is_boundary();
        let (mut min, mut max) = (-half, half);
        if blocked {
            if sign > 0 {
                max = 0;
            } else {
                min = 0;
            }
        }

        let current = if horizontal { self.offset.x } else { self.offset.y };
        let mut moved = current + sign * pixels;

        if (min..=max).contains(&moved) {
            self.set_axis_offset(horizontal, moved);
            return Step::Moved;
        }

        if self.facing != self.pending {
            trace!(tile = ?self.tile, from = ?self.facing, to = ?self.pending, "Turned at tile edge");
            self.facing = self.pending;
            self.offset = IVec2::ZERO;
            return Step::Turned;
        }

        if blocked {
            self.offset = IVec2::ZERO;
            return Step::HitWall;
        }

        self.tile += unit;
        moved -= sign * (max - min);
        self.offset = IVec2::ZERO;
        self.set_axis_offset(horizontal, moved);
        Step::Arrived
    }

    fn set_axis_offset(&mut self, horizontal: bool, value: i32) {
        if horizontal {
            self.offset.x = value;
        } else {
            self.offset.y = value;
        }
    }
}
