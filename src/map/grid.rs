//! The maze: a fixed grid of tiles whose collectibles are consumed during a level.

use bevy_ecs::resource::Resource;
use glam::IVec2;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::map::direction::Direction;
use crate::map::parser::{MapTileParser, Tile};

/// The live maze plus the canonical layout it is restored from between levels.
///
/// Positions are `IVec2` with `x` as the column and `y` as the row. Anything outside the
/// grid classifies as a boundary, so agents can never walk off the edge.
#[derive(Resource, Debug, Clone)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    canonical: Vec<Vec<Tile>>,
    remaining: usize,
}

impl Grid {
    /// Builds a grid from a rectangular ASCII layout.
    pub fn parse<S: AsRef<str>>(raw_board: &[S]) -> Result<Self, ParseError> {
        let canonical = MapTileParser::parse_board(raw_board)?;
        let remaining = Self::count_collectibles(&canonical);
        debug!(
            rows = canonical.len(),
            cols = canonical[0].len(),
            collectibles = remaining,
            "Grid parsed"
        );
        Ok(Self {
            tiles: canonical.clone(),
            canonical,
            remaining,
        })
    }

    fn count_collectibles(tiles: &[Vec<Tile>]) -> usize {
        tiles.iter().flatten().filter(|tile| tile.is_collectible()).count()
    }

    pub fn width(&self) -> i32 {
        self.tiles[0].len() as i32
    }

    pub fn height(&self) -> i32 {
        self.tiles.len() as i32
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width() && pos.y < self.height()
    }

    /// The tile at `pos`; out-of-bounds positions are boundaries.
    pub fn tile(&self, pos: IVec2) -> Tile {
        if !self.contains(pos) {
            return Tile::Boundary;
        }
        self.tiles[pos.y as usize][pos.x as usize]
    }

    pub fn is_boundary(&self, pos: IVec2) -> bool {
        self.tile(pos).is_boundary()
    }

    /// The tile adjacent to `pos` in `direction`.
    pub fn neighbor(&self, pos: IVec2, direction: Direction) -> Tile {
        self.tile(pos + direction.as_ivec2())
    }

    /// The column a wrap tile at `pos` teleports to, on the same row.
    pub fn mirrored(&self, pos: IVec2) -> IVec2 {
        IVec2::new(self.width() - pos.x - 1, pos.y)
    }

    /// Clears a collectible at `pos`, returning what was there.
    ///
    /// Anything other than a dot or super dot is left untouched and `None` is returned, so
    /// consuming the same tile twice has no further effect.
    pub fn consume_tile(&mut self, pos: IVec2) -> Option<Tile> {
        let tile = self.tile(pos);
        if !tile.is_collectible() {
            return None;
        }

        self.tiles[pos.y as usize][pos.x as usize] = Tile::Empty;
        self.remaining -= 1;
        trace!(?pos, ?tile, remaining = self.remaining, "Tile consumed");
        Some(tile)
    }

    /// Number of dots and super dots left in the current level.
    pub fn remaining_collectibles(&self) -> usize {
        self.remaining
    }

    /// Restores every collectible from the canonical layout.
    pub fn restore(&mut self) {
        self.tiles.clone_from(&self.canonical);
        self.remaining = Self::count_collectibles(&self.tiles);
        debug!(collectibles = self.remaining, "Grid restored to canonical layout");
    }

    /// Iterates the rows of the live grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }
}
