//! Conversion of the ASCII board into tiles.

use crate::error::ParseError;

/// What occupies a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Open floor.
    Empty,
    /// An impassable wall.
    Boundary,
    /// A regular dot.
    Dot,
    /// A super dot, which frightens the ghosts.
    SuperDot,
    /// A teleport edge; stepping onto it moves an agent to the mirrored column.
    Wrap,
}

impl Tile {
    pub fn is_collectible(self) -> bool {
        matches!(self, Tile::Dot | Tile::SuperDot)
    }

    pub fn is_boundary(self) -> bool {
        self == Tile::Boundary
    }
}

/// Parser for converting raw board layouts into tiles.
pub struct MapTileParser;

impl MapTileParser {
    /// Converts a single board character into its tile.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownCharacter` for any character outside the board vocabulary.
    pub fn parse_character(c: char) -> Result<Tile, ParseError> {
        match c {
            '#' => Ok(Tile::Boundary),
            '.' => Ok(Tile::Dot),
            'o' => Ok(Tile::SuperDot),
            'T' => Ok(Tile::Wrap),
            ' ' => Ok(Tile::Empty),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a rectangular board into rows of tiles.
    ///
    /// # Errors
    ///
    /// Fails on an empty board, on rows of differing width, or on unknown characters.
    pub fn parse_board<S: AsRef<str>>(raw_board: &[S]) -> Result<Vec<Vec<Tile>>, ParseError> {
        let width = raw_board.first().ok_or(ParseError::Empty)?.as_ref().chars().count();
        if width == 0 {
            return Err(ParseError::Empty);
        }

        raw_board
            .iter()
            .enumerate()
            .map(|(row, line)| {
                let line = line.as_ref();
                let found = line.chars().count();
                if found != width {
                    return Err(ParseError::Ragged {
                        row,
                        expected: width,
                        found,
                    });
                }
                line.chars().map(Self::parse_character).collect()
            })
            .collect()
    }
}
