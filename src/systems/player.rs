use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, trace};

use crate::config::GameConfig;
use crate::constants::scoring::{DOT_POINTS, SUPER_DOT_POINTS};
use crate::events::GameEvent;
use crate::map::grid::Grid;
use crate::map::parser::Tile;
use crate::systems::components::{
    Agent, BonusFruit, Clock, FrightenedWindow, GhostState, HeldDirections, PlayerControlled, Scoreboard,
};
use crate::systems::ghost::{frighten, open_frightened_window};
use crate::systems::item::{check_fruit_threshold, try_capture_fruit};
use crate::systems::movement::Step;
use crate::systems::timers::GameTimers;

/// Moves the player and handles whatever is on each tile it enters.
#[allow(clippy::too_many_arguments)]
pub fn player_movement_system(
    clock: Res<Clock>,
    config: Res<GameConfig>,
    held: Res<HeldDirections>,
    mut grid: ResMut<Grid>,
    mut scoreboard: ResMut<Scoreboard>,
    mut fruit: ResMut<BonusFruit>,
    mut window: ResMut<FrightenedWindow>,
    mut timers: ResMut<GameTimers>,
    mut events: EventWriter<GameEvent>,
    mut players: Query<&mut Agent, (With<PlayerControlled>, Without<GhostState>)>,
    mut ghosts: Query<(Entity, &mut GhostState), Without<PlayerControlled>>,
) {
    let now = clock.0;

    for mut agent in players.iter_mut() {
        match agent.mover.advance(now, &grid, &config.tile) {
            Step::Arrived => {}
            Step::HitWall => {
                trace!(tile = ?agent.mover.tile, "Player hit wall");
                continue;
            }
            _ => continue,
        }

        if let Some(direction) = held.first() {
            agent.mover.request_direction(direction, &grid);
        }

        let tile = agent.mover.tile;
        try_capture_fruit(
            tile,
            &mut fruit,
            &mut scoreboard,
            &mut timers,
            &config,
            now,
            &mut events,
        );

        match grid.tile(tile) {
            Tile::Dot => {
                grid.consume_tile(tile);
                scoreboard.add(DOT_POINTS);
                scoreboard.dots_eaten += 1;
                events.write(GameEvent::DotEaten { tile });
            }
            Tile::SuperDot => {
                grid.consume_tile(tile);
                scoreboard.add(SUPER_DOT_POINTS);
                open_frightened_window(&mut window, &mut scoreboard, &mut timers, &config, now);
                for (entity, mut state) in ghosts.iter_mut() {
                    frighten(entity, &mut state, &mut timers, &config, now);
                }
                debug!(?tile, "Super dot eaten, ghosts frightened");
                events.write(GameEvent::SuperDotEaten { tile });
            }
            Tile::Wrap => {
                let destination = grid.mirrored(tile);
                agent.mover.relocate(destination);
                debug!(from = ?tile, to = ?destination, "Player wrapped");
            }
            Tile::Empty | Tile::Boundary => continue,
        }

        check_fruit_threshold(&mut fruit, &scoreboard, &mut timers, &config, now, &mut events);
        trace!(score = scoreboard.score, "Score");
    }
}
