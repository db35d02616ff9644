//! This module defines the game map and provides functions for interacting with it.

pub mod direction;
pub mod grid;
pub mod parser;
