#![allow(dead_code)]

use glam::IVec2;
use pacman_sim::constants::timing::READY_MS;
use pacman_sim::constants::RAW_BOARD;
use pacman_sim::game::Game;
use pacman_sim::map::direction::Direction;
use pacman_sim::systems::components::{Agent, GhostKind, GhostMode, GhostState, Scoreboard};
use pacman_sim::systems::movement::Mover;
use pacman_sim::systems::timers::GameTimers;

/// A game on the canonical board whose ready pause has already elapsed.
pub fn started_game() -> Game {
    let mut game = Game::new(0).unwrap();
    game.tick(READY_MS);
    game
}

/// The canonical board with every collectible removed except those at `keep`.
pub fn board_keeping(keep: &[IVec2]) -> Vec<String> {
    RAW_BOARD
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, c)| {
                    let pos = IVec2::new(col as i32, row as i32);
                    if matches!(c, '.' | 'o') && !keep.contains(&pos) {
                        ' '
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect()
}

pub fn player_mover(game: &Game) -> Mover {
    game.world.get::<Agent>(game.player_entity()).unwrap().mover
}

pub fn ghost_mover(game: &Game, kind: GhostKind) -> Mover {
    game.world.get::<Agent>(game.ghost_entity(kind)).unwrap().mover
}

pub fn ghost_state(game: &Game, kind: GhostKind) -> GhostState {
    game.world.get::<GhostState>(game.ghost_entity(kind)).unwrap().clone()
}

/// Puts the player at the center of `tile`, heading `facing`, with its clock at `now`.
pub fn place_player(game: &mut Game, tile: IVec2, facing: Direction, now: u64) {
    let player = game.player_entity();
    let mut agent = game.world.get_mut::<Agent>(player).unwrap();
    agent.mover.tile = tile;
    agent.mover.offset = IVec2::ZERO;
    agent.mover.facing = facing;
    agent.mover.pending = facing;
    agent.mover.last_update = now;
}

/// Takes a ghost out of the pen and puts it at the center of `tile`.
pub fn place_ghost(game: &mut Game, kind: GhostKind, tile: IVec2, facing: Direction, now: u64) {
    let ghost = game.ghost_entity(kind);
    {
        let mut agent = game.world.get_mut::<Agent>(ghost).unwrap();
        agent.mover.tile = tile;
        agent.mover.offset = IVec2::ZERO;
        agent.mover.facing = facing;
        agent.mover.pending = facing;
        agent.mover.last_update = now;
    }

    let release = {
        let mut state = game.world.get_mut::<GhostState>(ghost).unwrap();
        state.in_box = false;
        state.release_timer.take()
    };
    if let Some(key) = release {
        game.world.resource_mut::<GameTimers>().stop(key);
    }
}

pub fn set_ghost_mode(game: &mut Game, kind: GhostKind, mode: GhostMode) {
    let ghost = game.ghost_entity(kind);
    game.world.get_mut::<GhostState>(ghost).unwrap().mode = mode;
}

pub fn scoreboard_mut(game: &mut Game) -> bevy_ecs::world::Mut<'_, Scoreboard> {
    game.world.resource_mut::<Scoreboard>()
}
