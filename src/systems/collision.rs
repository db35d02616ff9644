use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::systems::components::{Agent, Clock, GhostState, ModeSchedule, PlayerControlled, Scoreboard};
use crate::systems::ghost::reset_ghost;
use crate::systems::timers::GameTimers;

/// Resolves ghosts sharing the player's tile once everyone has moved.
///
/// A flashing ghost is captured for the current frightened value, which then doubles.
/// Any other ghost costs a life and sends every agent back to its spawn; nothing else is
/// resolved for the rest of the tick.
#[allow(clippy::too_many_arguments)]
pub fn ghost_collision_system(
    clock: Res<Clock>,
    config: Res<GameConfig>,
    schedule: Res<ModeSchedule>,
    mut scoreboard: ResMut<Scoreboard>,
    mut timers: ResMut<GameTimers>,
    mut events: EventWriter<GameEvent>,
    mut players: Query<&mut Agent, (With<PlayerControlled>, Without<GhostState>)>,
    mut ghosts: Query<(Entity, &mut Agent, &mut GhostState), Without<PlayerControlled>>,
) {
    let now = clock.0;
    let Some(mut player) = players.iter_mut().next() else {
        return;
    };
    let player_tile = player.mover.tile;

    let hits: SmallVec<[Entity; 4]> = ghosts
        .iter()
        .filter(|(_, agent, _)| agent.mover.tile == player_tile)
        .map(|(entity, _, _)| entity)
        .collect();

    for entity in hits {
        let Ok((_, mut agent, mut state)) = ghosts.get_mut(entity) else {
            continue;
        };
        let Some(kind) = agent.ghost_kind() else {
            continue;
        };

        if state.flashing {
            let points = scoreboard.frightened_points;
            scoreboard.add(points);
            scoreboard.frightened_points *= 2;
            reset_ghost(entity, &mut agent, &mut state, &mut timers, &config, &schedule, now);
            info!(ghost = ?kind, points, score = scoreboard.score, "Ghost captured");
            events.write(GameEvent::GhostCaptured { ghost: kind, points });
            continue;
        }

        scoreboard.lives = scoreboard.lives.saturating_sub(1);
        info!(ghost = ?kind, lives = scoreboard.lives, "Player caught, lost a life");

        let spawn = player.spawn;
        player.mover.reset_to(spawn, now);
        for (ghost, mut agent, mut state) in ghosts.iter_mut() {
            reset_ghost(ghost, &mut agent, &mut state, &mut timers, &config, &schedule, now);
        }
        debug!("All agents reset after life lost");

        events.write(GameEvent::PlayerCaught {
            ghost: kind,
            lives: scoreboard.lives,
        });
        return;
    }
}
