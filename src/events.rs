use bevy_ecs::prelude::*;
use glam::IVec2;

use crate::map::direction::Direction;
use crate::systems::components::{GhostKind, GhostMode, HeldDirections};

/// Input a host feeds into the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// A discrete directional key press.
    MovePlayer(Direction),
    /// The full set of directional keys currently held.
    HoldDirections(HeldDirections),
}

/// Things that happened during a tick, for hosts that play sounds or draw effects.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayStarted,
    DotEaten { tile: IVec2 },
    SuperDotEaten { tile: IVec2 },
    GhostCaptured { ghost: GhostKind, points: u32 },
    PlayerCaught { ghost: GhostKind, lives: u32 },
    FruitSpawned { tile: IVec2 },
    FruitEaten { points: u32 },
    FruitExpired,
    /// The maze was cleared; `level` is the level now starting.
    LevelCleared { level: u32 },
    ExtraLife { lives: u32 },
    ModeChanged { mode: GhostMode },
    GameOver { score: u32 },
}
