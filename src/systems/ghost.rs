use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res};
use glam::IVec2;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::GameConfig;
use crate::constants::ghost::{AMBUSH_LEAD_TILES, SHY_DISTANCE};
use crate::constants::scoring::FRIGHTENED_GHOST_POINTS;
use crate::map::direction::Direction;
use crate::map::grid::Grid;
use crate::map::parser::Tile;
use crate::systems::components::{
    Agent, Clock, FrightenedWindow, GhostKind, GhostMode, GhostState, ModeSchedule, PlayerControlled, Scoreboard,
};
use crate::systems::movement::{Mover, Step};
use crate::systems::timers::{GameTimers, TimerAction};

/// Where a chasing ghost of `kind` is headed, given the player and the direct ghost.
pub fn chase_target(kind: GhostKind, ghost: &Mover, player: &Mover, direct_ghost: IVec2) -> IVec2 {
    match kind {
        GhostKind::Direct => player.tile,
        GhostKind::Ambusher => player.tile + player.facing.as_ivec2() * AMBUSH_LEAD_TILES,
        GhostKind::Flanker => direct_ghost * 3 - player.tile * 2,
        GhostKind::Shy => {
            let distance = (player.tile - ghost.tile).abs().element_sum();
            if distance > SHY_DISTANCE {
                player.tile
            } else {
                kind.home_corner()
            }
        }
    }
}

/// Picks the direction a ghost takes out of its current tile.
///
/// Nothing closer to the target keeps the current heading when it is open. Reversing is
/// only allowed when every other direction is blocked.
pub fn choose_direction(mover: &Mover, grid: &Grid, target: IVec2, mode: GhostMode) -> Direction {
    let reverse = mover.facing.opposite();
    let options: SmallVec<[Direction; 4]> = Direction::DIRECTIONS
        .into_iter()
        .filter(|&direction| direction != reverse && mover.direction_valid(direction, grid))
        .collect();

    if let Some(&direction) = options
        .iter()
        .find(|&&direction| mode == GhostMode::Scatter || mover.is_closer(direction, target))
    {
        return direction;
    }

    if options.contains(&mover.facing) {
        return mover.facing;
    }

    if let Some(&direction) = options.first() {
        return direction;
    }

    if mover.direction_valid(reverse, grid) {
        trace!(tile = ?mover.tile, direction = ?reverse, "Ghost forced to reverse direction");
        return reverse;
    }

    warn!(tile = ?mover.tile, "Ghost stuck with no available directions");
    mover.facing
}

/// Retargets and picks the next direction when a ghost enters a new tile.
fn on_ghost_arrival(
    kind: GhostKind,
    mover: &mut Mover,
    state: &mut GhostState,
    grid: &Grid,
    player: &Mover,
    direct_ghost: IVec2,
) {
    if grid.tile(mover.tile) == Tile::Wrap {
        mover.relocate(grid.mirrored(mover.tile));
    }

    match state.mode {
        GhostMode::Chase => state.target = chase_target(kind, mover, player, direct_ghost),
        GhostMode::Frightened => state.target = kind.home_corner(),
        GhostMode::Scatter => {}
    }

    mover.pending = choose_direction(mover, grid, state.target, state.mode);
}

/// Moves every released ghost and runs its tile hooks.
pub fn ghost_movement_system(
    clock: Res<Clock>,
    grid: Res<Grid>,
    config: Res<GameConfig>,
    players: Query<&Agent, (With<PlayerControlled>, Without<GhostState>)>,
    mut ghosts: Query<(&mut Agent, &mut GhostState), Without<PlayerControlled>>,
) {
    let Some(player) = players.iter().next().map(|agent| agent.mover) else {
        return;
    };

    let mut direct_ghost = ghosts
        .iter()
        .find(|(agent, _)| agent.ghost_kind() == Some(GhostKind::Direct))
        .map_or(player.tile, |(agent, _)| agent.mover.tile);

    for (mut agent, mut state) in ghosts.iter_mut() {
        let Some(kind) = agent.ghost_kind() else {
            continue;
        };
        if state.in_box {
            continue;
        }

        match agent.mover.advance(clock.0, &grid, &config.tile) {
            Step::Arrived => on_ghost_arrival(kind, &mut agent.mover, &mut state, &grid, &player, direct_ghost),
            Step::HitWall => {
                agent.mover.pending = agent.mover.facing.next_cyclic();
                trace!(ghost = ?kind, tile = ?agent.mover.tile, pending = ?agent.mover.pending, "Ghost hit wall");
            }
            _ => {}
        }

        if kind == GhostKind::Direct {
            direct_ghost = agent.mover.tile;
        }
    }
}

fn stop_frightened_timers(state: &mut GhostState, timers: &mut GameTimers) {
    for key in [state.blink_timer.take(), state.frightened_timer.take()].into_iter().flatten() {
        timers.stop(key);
    }
}

/// Makes a ghost capturable, restarting its blink and expiry timers.
pub fn frighten(ghost: Entity, state: &mut GhostState, timers: &mut GameTimers, config: &GameConfig, now: u64) {
    stop_frightened_timers(state, timers);

    state.mode = GhostMode::Frightened;
    state.flashing = true;
    state.flash_index = 0;
    state.blink_timer = Some(timers.schedule(config.blink_ms, true, TimerAction::FlashToggle { ghost }, now));
    state.frightened_timer = Some(timers.schedule(
        config.frightened_ms,
        false,
        TimerAction::FrightenedExpired { ghost },
        now,
    ));
}

/// Starts a fresh frightened window: the capture value drops back to its base and the
/// window's own expiry timer is restarted.
pub fn open_frightened_window(
    window: &mut FrightenedWindow,
    scoreboard: &mut Scoreboard,
    timers: &mut GameTimers,
    config: &GameConfig,
    now: u64,
) {
    if let Some(key) = window.timer.take() {
        timers.stop(key);
    }
    scoreboard.frightened_points = FRIGHTENED_GHOST_POINTS;
    window.timer = Some(timers.schedule(config.frightened_ms, false, TimerAction::FrightenedWindowClosed, now));
}

/// Ends a ghost's frightened state, returning it to the scheduled mode.
pub fn calm(state: &mut GhostState, timers: &mut GameTimers, schedule: &ModeSchedule) {
    stop_frightened_timers(state, timers);
    state.flashing = false;
    state.flash_index = 0;
    state.mode = schedule.current_mode();
}

/// Sends a ghost back to its pen slot and queues its release.
pub fn reset_ghost(
    ghost: Entity,
    agent: &mut Agent,
    state: &mut GhostState,
    timers: &mut GameTimers,
    config: &GameConfig,
    schedule: &ModeSchedule,
    now: u64,
) {
    let Some(kind) = agent.ghost_kind() else {
        return;
    };

    agent.mover.reset_to(agent.spawn, now);
    calm(state, timers, schedule);
    state.in_box = true;
    state.target = kind.home_corner();
    schedule_release(ghost, kind, state, timers, config, now);
    debug!(ghost = ?kind, "Ghost reset to pen");
}

/// Starts (or restarts) the timer that lets a ghost out of the pen.
pub fn schedule_release(
    ghost: Entity,
    kind: GhostKind,
    state: &mut GhostState,
    timers: &mut GameTimers,
    config: &GameConfig,
    now: u64,
) {
    if let Some(key) = state.release_timer.take() {
        timers.stop(key);
    }
    let delay = config.ghost_release_delays[kind.index()];
    state.release_timer = Some(timers.schedule(delay, false, TimerAction::ReleaseGhost { ghost }, now));
}

/// Moves a penned ghost out to the pen exit.
pub fn release(agent: &mut Agent, state: &mut GhostState, config: &GameConfig, now: u64) {
    state.release_timer = None;
    if !state.in_box {
        return;
    }
    state.in_box = false;
    agent.mover.relocate(config.ghost_pen_exit);
    agent.mover.last_update = now;
    debug!(ghost = ?agent.ghost_kind(), tile = ?config.ghost_pen_exit, "Ghost released");
}
