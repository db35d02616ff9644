//! Headless Pac-Man simulation core.
//!
//! Tile-grid movement with sub-tile pixel offsets, ghost targeting driven by a timed
//! scatter/chase cycle, collisions and scoring. Hosts drive it with [`game::Game::tick`]
//! and read back [`game::Snapshot`]s and [`events::GameEvent`]s.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod map;
pub mod systems;
pub mod timer;
