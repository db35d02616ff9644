use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Res, ResMut};
use tracing::info;

use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::map::grid::Grid;
use crate::systems::components::{GameStage, Scoreboard};

/// Run condition for everything that only happens during active play.
pub fn is_playing(stage: Res<GameStage>) -> bool {
    *stage == GameStage::Playing
}

/// Level completion, extra lives and the end of the game.
pub fn level_system(
    config: Res<GameConfig>,
    mut grid: ResMut<Grid>,
    mut scoreboard: ResMut<Scoreboard>,
    mut stage: ResMut<GameStage>,
    mut events: EventWriter<GameEvent>,
) {
    if grid.remaining_collectibles() == 0 {
        scoreboard.level += 1;
        grid.restore();
        info!(level = scoreboard.level, "Level cleared");
        events.write(GameEvent::LevelCleared {
            level: scoreboard.level,
        });
    }

    if scoreboard.score >= scoreboard.next_extra_life {
        scoreboard.lives += 1;
        scoreboard.next_extra_life += config.extra_life_increment;
        info!(
            lives = scoreboard.lives,
            next = scoreboard.next_extra_life,
            "Earned extra life"
        );
        events.write(GameEvent::ExtraLife {
            lives: scoreboard.lives,
        });
    }

    if scoreboard.lives == 0 {
        *stage = GameStage::GameOver;
        info!(score = scoreboard.score, "Game over");
        events.write(GameEvent::GameOver {
            score: scoreboard.score,
        });
    }
}
