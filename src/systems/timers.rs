use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::scoring::FRIGHTENED_GHOST_POINTS;
use crate::events::GameEvent;
use crate::systems::components::{
    Agent, BonusFruit, Clock, FrightenedWindow, GameStage, GhostMode, GhostState, ModeSchedule, Scoreboard,
};
use crate::systems::ghost::{calm, release, schedule_release};
use crate::timer::TimerRegistry;

/// What happens when a simulation timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// The ready pause is over and play begins.
    ReadyFinished,
    /// Step the scatter/chase schedule.
    AdvanceSchedule,
    FlashToggle { ghost: Entity },
    FrightenedExpired { ghost: Entity },
    /// The frightened window is over; capture values start from the base again.
    FrightenedWindowClosed,
    ReleaseGhost { ghost: Entity },
    FruitExpired,
    /// A new fruit may spawn again.
    FruitRespawnReady,
}

pub type GameTimers = TimerRegistry<TimerAction>;

/// Fires every due timer and applies its action.
///
/// Dispatches through [`GameTimers::due`] and [`GameTimers::fire`] rather than `tick`: due
/// keys are collected up front and each one is re-checked before firing, so actions that
/// start or stop timers never cause a skipped or doubled firing within a tick.
#[allow(clippy::too_many_arguments)]
pub fn timer_system(
    clock: Res<Clock>,
    config: Res<GameConfig>,
    mut timers: ResMut<GameTimers>,
    mut stage: ResMut<GameStage>,
    mut schedule: ResMut<ModeSchedule>,
    mut fruit: ResMut<BonusFruit>,
    mut window: ResMut<FrightenedWindow>,
    mut scoreboard: ResMut<Scoreboard>,
    mut events: EventWriter<GameEvent>,
    mut agents: Query<(Entity, &mut Agent, Option<&mut GhostState>)>,
) {
    let now = clock.0;

    for key in timers.due(now) {
        let Some(action) = timers.fire(key, now) else {
            continue;
        };
        trace!(?key, ?action, now, "Timer fired");

        match action {
            TimerAction::ReadyFinished => {
                *stage = GameStage::Playing;
                schedule.index = 0;
                if let Some(previous) = schedule.timer.take() {
                    timers.stop(previous);
                }
                if let Some(duration) = schedule.current_duration() {
                    schedule.timer = Some(timers.schedule(duration, true, TimerAction::AdvanceSchedule, now));
                }

                for (entity, mut agent, ghost) in agents.iter_mut() {
                    agent.mover.last_update = now;
                    if let (Some(mut state), Some(kind)) = (ghost, agent.ghost_kind()) {
                        state.mode = schedule.current_mode();
                        schedule_release(entity, kind, &mut state, &mut timers, &config, now);
                    }
                }

                info!(now, "Play started");
                events.write(GameEvent::PlayStarted);
            }
            TimerAction::AdvanceSchedule => {
                let mode = schedule.advance();
                match schedule.current_duration() {
                    Some(duration) => {
                        timers.set_duration(key, duration);
                        timers.start(key, now);
                    }
                    None => {
                        timers.stop(key);
                        schedule.timer = None;
                    }
                }

                for (_, _, ghost) in agents.iter_mut() {
                    if let Some(mut state) = ghost {
                        if state.mode != GhostMode::Frightened {
                            state.mode = mode;
                        }
                    }
                }

                debug!(?mode, index = schedule.index, "Ghost mode schedule advanced");
                events.write(GameEvent::ModeChanged { mode });
            }
            TimerAction::FlashToggle { ghost } => {
                if let Ok((_, _, Some(mut state))) = agents.get_mut(ghost) {
                    state.flash_index ^= 1;
                }
            }
            TimerAction::FrightenedExpired { ghost } => {
                if let Ok((_, _, Some(mut state))) = agents.get_mut(ghost) {
                    // The expiry timer already removed itself.
                    state.frightened_timer = None;
                    calm(&mut state, &mut timers, &schedule);
                    debug!(?ghost, mode = ?state.mode, "Frightened window expired");
                }
            }
            TimerAction::FrightenedWindowClosed => {
                window.timer = None;
                scoreboard.frightened_points = FRIGHTENED_GHOST_POINTS;
                debug!("Frightened capture value reset");
            }
            TimerAction::ReleaseGhost { ghost } => {
                if let Ok((_, mut agent, Some(mut state))) = agents.get_mut(ghost) {
                    release(&mut agent, &mut state, &config, now);
                }
            }
            TimerAction::FruitExpired => {
                fruit.active = false;
                fruit.available_timer = None;
                debug!(tile = ?fruit.tile, "Fruit expired");
                events.write(GameEvent::FruitExpired);
            }
            TimerAction::FruitRespawnReady => {
                fruit.eligible = true;
                fruit.respawn_timer = None;
            }
        }
    }
}
