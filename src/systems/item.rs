use bevy_ecs::event::EventWriter;
use glam::IVec2;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::constants::scoring::{FRUIT_POINTS, FRUIT_POINTS_MULTIPLIER};
use crate::events::GameEvent;
use crate::systems::components::{BonusFruit, Scoreboard};
use crate::systems::timers::{GameTimers, TimerAction};

impl BonusFruit {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tile: config.fruit_spawn,
            active: false,
            eligible: true,
            points: FRUIT_POINTS,
            dot_threshold: config.fruit_dot_threshold,
            available_timer: None,
            respawn_timer: None,
        }
    }
}

/// Awards the fruit if it is out and the player stands on it.
pub fn try_capture_fruit(
    player_tile: IVec2,
    fruit: &mut BonusFruit,
    scoreboard: &mut Scoreboard,
    timers: &mut GameTimers,
    config: &GameConfig,
    now: u64,
    events: &mut EventWriter<GameEvent>,
) -> bool {
    if !fruit.active || fruit.tile != player_tile {
        return false;
    }

    let points = fruit.points;
    scoreboard.add(points);
    fruit.points *= FRUIT_POINTS_MULTIPLIER;
    fruit.active = false;
    fruit.eligible = false;
    if let Some(key) = fruit.available_timer.take() {
        timers.stop(key);
    }
    if let Some(key) = fruit.respawn_timer.take() {
        timers.stop(key);
    }
    fruit.respawn_timer = Some(timers.schedule(
        config.fruit_respawn_ms,
        false,
        TimerAction::FruitRespawnReady,
        now,
    ));

    info!(points, next = fruit.points, "Fruit eaten");
    events.write(GameEvent::FruitEaten { points });
    true
}

/// Puts the fruit out once enough dots have been eaten, raising the next threshold.
pub fn check_fruit_threshold(
    fruit: &mut BonusFruit,
    scoreboard: &Scoreboard,
    timers: &mut GameTimers,
    config: &GameConfig,
    now: u64,
    events: &mut EventWriter<GameEvent>,
) {
    if scoreboard.dots_eaten < fruit.dot_threshold {
        return;
    }
    fruit.dot_threshold += config.fruit_dot_threshold_increment;

    if fruit.active || !fruit.eligible {
        debug!(
            active = fruit.active,
            eligible = fruit.eligible,
            next_threshold = fruit.dot_threshold,
            "Fruit threshold reached but not spawning"
        );
        return;
    }

    fruit.active = true;
    fruit.available_timer = Some(timers.schedule(config.fruit_available_ms, false, TimerAction::FruitExpired, now));
    debug!(tile = ?fruit.tile, next_threshold = fruit.dot_threshold, "Fruit spawned");
    events.write(GameEvent::FruitSpawned { tile: fruit.tile });
}
