//! This module contains the main game logic and state.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::{Mut, World};
use glam::IVec2;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::constants::scoring::FRIGHTENED_GHOST_POINTS;
use crate::error::GameResult;
use crate::events::{GameCommand, GameEvent};
use crate::map::direction::Direction;
use crate::map::grid::Grid;
use crate::systems::collision::ghost_collision_system;
use crate::systems::components::{
    Agent, AgentKind, BonusFruit, Clock, FrightenedWindow, GameStage, GhostKind, GhostMode, GhostState, HeldDirections,
    ModeSchedule, PlayerControlled, Scoreboard,
};
use crate::systems::ghost::ghost_movement_system;
use crate::systems::movement::{Mover, Spawn};
use crate::systems::player::player_movement_system;
use crate::systems::stage::{is_playing, level_system};
use crate::systems::timers::{timer_system, GameTimers, TimerAction};

/// Position and heading of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgentView {
    pub tile: IVec2,
    pub offset: IVec2,
    pub facing: Direction,
    pub pending: Direction,
}

impl From<&Mover> for AgentView {
    fn from(mover: &Mover) -> Self {
        Self {
            tile: mover.tile,
            offset: mover.offset,
            facing: mover.facing,
            pending: mover.pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostView {
    pub kind: GhostKind,
    pub agent: AgentView,
    pub mode: GhostMode,
    pub flashing: bool,
    pub flash_index: u8,
    pub in_box: bool,
    pub target: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FruitView {
    pub tile: IVec2,
    pub active: bool,
    pub points: u32,
}

/// Read-only view of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub player: AgentView,
    pub ghosts: SmallVec<[GhostView; 4]>,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    pub stage: GameStage,
    pub fruit: FruitView,
    pub remaining_collectibles: usize,
}

/// The simulation: an ECS world and the schedule that advances it.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    player: Entity,
    ghosts: SmallVec<[Entity; 4]>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Builds a simulation of the canonical maze, starting its ready pause at `now`.
    pub fn new(now: u64) -> GameResult<Game> {
        Self::with_config(GameConfig::default(), now)
    }

    pub fn with_config(config: GameConfig, now: u64) -> GameResult<Game> {
        let grid = config.build_grid()?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameEvent>(&mut world);

        let player = world
            .spawn((
                PlayerControlled,
                Agent::new(
                    AgentKind::Player,
                    Spawn {
                        tile: config.player_start,
                        facing: config.player_facing,
                    },
                    config.player_velocity,
                    now,
                ),
            ))
            .id();

        let initial_mode = ModeSchedule::default().current_mode();
        let ghosts = GhostKind::iter()
            .map(|kind| {
                let spawn = Spawn {
                    tile: config.ghost_slot(kind.index()),
                    facing: config.ghost_facing,
                };
                world
                    .spawn((
                        Agent::new(AgentKind::Ghost(kind), spawn, config.ghost_velocity, now),
                        GhostState::new(kind, initial_mode),
                    ))
                    .id()
            })
            .collect();

        let mut timers = GameTimers::default();
        timers.schedule(config.ready_ms, false, TimerAction::ReadyFinished, now);

        Self::insert_resources(&mut world, &config, grid, timers, now);
        world.insert_resource(config);
        Self::configure_schedule(&mut schedule);

        info!(now, "Game initialized");

        Ok(Game {
            world,
            schedule,
            player,
            ghosts,
            events: Vec::new(),
        })
    }

    fn insert_resources(world: &mut World, config: &GameConfig, grid: Grid, timers: GameTimers, now: u64) {
        world.insert_resource(grid);
        world.insert_resource(timers);
        world.insert_resource(Clock(now));
        world.insert_resource(GameStage::Ready);
        world.insert_resource(Scoreboard {
            score: 0,
            high_score: config.starting_high_score,
            lives: config.starting_lives,
            level: 1,
            dots_eaten: 0,
            frightened_points: FRIGHTENED_GHOST_POINTS,
            next_extra_life: config.extra_life_threshold,
        });
        world.insert_resource(HeldDirections::empty());
        world.insert_resource(BonusFruit::new(config));
        world.insert_resource(ModeSchedule::default());
        world.insert_resource(FrightenedWindow::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule.add_systems(
            (
                timer_system,
                player_movement_system.run_if(is_playing),
                ghost_movement_system.run_if(is_playing),
                ghost_collision_system.run_if(is_playing),
                level_system.run_if(is_playing),
            )
                .chain(),
        );
    }

    /// Advances the simulation to `now` (milliseconds).
    pub fn tick(&mut self, now: u64) {
        self.world.insert_resource(Clock(now));
        self.schedule.run(&mut self.world);

        let mut events = self.world.resource_mut::<Events<GameEvent>>();
        self.events.extend(events.drain());
    }

    /// Queues a turn for the player; turns into a wall are ignored.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let player = self.player;
        let accepted = self.world.resource_scope(|world, grid: Mut<Grid>| {
            world
                .get_mut::<Agent>(player)
                .is_some_and(|mut agent| agent.mover.request_direction(direction, &grid))
        });
        debug!(?direction, accepted, "Direction requested");
        accepted
    }

    /// Replaces the set of held directional keys, re-applied on each tile the player enters.
    pub fn set_held_directions(&mut self, held: HeldDirections) {
        *self.world.resource_mut::<HeldDirections>() = held;
    }

    pub fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::MovePlayer(direction) => {
                self.request_direction(direction);
            }
            GameCommand::HoldDirections(held) => self.set_held_directions(held),
        }
    }

    /// Returns and clears every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn grid(&self) -> &Grid {
        self.world.resource::<Grid>()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.world.resource::<Scoreboard>()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn is_game_over(&self) -> bool {
        self.stage() == GameStage::GameOver
    }

    pub fn player_entity(&self) -> Entity {
        self.player
    }

    /// The ghost entity of `kind`.
    pub fn ghost_entity(&self, kind: GhostKind) -> Entity {
        self.ghosts[kind.index()]
    }

    pub fn snapshot(&self) -> Snapshot {
        let player = self
            .world
            .get::<Agent>(self.player)
            .map(|agent| AgentView::from(&agent.mover))
            .unwrap_or_default();

        let ghosts = self
            .ghosts
            .iter()
            .filter_map(|&entity| {
                let agent = self.world.get::<Agent>(entity)?;
                let state = self.world.get::<GhostState>(entity)?;
                Some(GhostView {
                    kind: agent.ghost_kind()?,
                    agent: AgentView::from(&agent.mover),
                    mode: state.mode,
                    flashing: state.flashing,
                    flash_index: state.flash_index,
                    in_box: state.in_box,
                    target: state.target,
                })
            })
            .collect();

        let scoreboard = self.scoreboard();
        let fruit = self.world.resource::<BonusFruit>();

        Snapshot {
            player,
            ghosts,
            score: scoreboard.score,
            high_score: scoreboard.high_score,
            lives: scoreboard.lives,
            level: scoreboard.level,
            stage: self.stage(),
            fruit: FruitView {
                tile: fruit.tile,
                active: fruit.active,
                points: fruit.points,
            },
            remaining_collectibles: self.grid().remaining_collectibles(),
        }
    }
}
