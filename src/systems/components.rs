use bevy_ecs::{component::Component, resource::Resource};
use bitflags::bitflags;
use glam::IVec2;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

use crate::map::direction::Direction;
use crate::systems::movement::{Mover, Spawn};
use crate::timer::TimerKey;

/// A tag component for the entity steered by player input.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// The four ghost personalities, in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
pub enum GhostKind {
    /// Chases the player's tile directly.
    Direct,
    /// Aims a few tiles ahead of the player.
    Ambusher,
    /// Aims at the point mirroring the direct ghost through the player.
    Flanker,
    /// Chases from afar and retreats home when close.
    Shy,
}

impl GhostKind {
    pub const fn index(self) -> usize {
        match self {
            GhostKind::Direct => 0,
            GhostKind::Ambusher => 1,
            GhostKind::Flanker => 2,
            GhostKind::Shy => 3,
        }
    }

    /// The corner a ghost retreats to; some corners lie just outside the grid.
    pub const fn home_corner(self) -> IVec2 {
        match self {
            GhostKind::Direct => IVec2::new(0, 0),
            GhostKind::Ambusher => IVec2::new(30, 0),
            GhostKind::Flanker => IVec2::new(0, 32),
            GhostKind::Shy => IVec2::new(32, 32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Player,
    Ghost(GhostKind),
}

/// Every moving agent, player or ghost, carries exactly one of these.
#[derive(Component, Debug, Clone, Copy)]
pub struct Agent {
    pub kind: AgentKind,
    pub mover: Mover,
    pub spawn: Spawn,
}

impl Agent {
    pub fn new(kind: AgentKind, spawn: Spawn, velocity: i32, now: u64) -> Self {
        Self {
            kind,
            mover: Mover::new(spawn, velocity, now),
            spawn,
        }
    }

    pub fn ghost_kind(&self) -> Option<GhostKind> {
        match self.kind {
            AgentKind::Ghost(kind) => Some(kind),
            AgentKind::Player => None,
        }
    }
}

/// Per-ghost behaviour state.
#[derive(Component, Debug, Clone)]
pub struct GhostState {
    pub mode: GhostMode,
    /// Set while the ghost can be captured.
    pub flashing: bool,
    /// Which of the two frightened colours is shown.
    pub flash_index: u8,
    /// Still waiting in the pen.
    pub in_box: bool,
    pub target: IVec2,
    pub blink_timer: Option<TimerKey>,
    pub frightened_timer: Option<TimerKey>,
    pub release_timer: Option<TimerKey>,
}

impl GhostState {
    pub fn new(kind: GhostKind, mode: GhostMode) -> Self {
        Self {
            mode,
            flashing: false,
            flash_index: 0,
            in_box: true,
            target: kind.home_corner(),
            blink_timer: None,
            frightened_timer: None,
            release_timer: None,
        }
    }
}

/// The timestamp of the tick being simulated, in milliseconds.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Clock(pub u64);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStage {
    /// Short pause before play, agents are frozen.
    Ready,
    Playing,
    GameOver,
}

/// Score, lives and the counters that drive score-based rewards.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    pub dots_eaten: u32,
    /// Value of the next ghost captured while frightened.
    pub frightened_points: u32,
    pub next_extra_life: u32,
}

impl Scoreboard {
    pub fn add(&mut self, points: u32) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }
}

bitflags! {
    /// Directional keys currently held down by the host.
    #[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeldDirections: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl HeldDirections {
    /// The highest priority held direction (up, down, left, then right).
    pub fn first(self) -> Option<Direction> {
        Direction::DIRECTIONS
            .into_iter()
            .find(|direction| self.contains(Self::from(*direction)))
    }
}

impl From<Direction> for HeldDirections {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => HeldDirections::UP,
            Direction::Down => HeldDirections::DOWN,
            Direction::Left => HeldDirections::LEFT,
            Direction::Right => HeldDirections::RIGHT,
        }
    }
}

/// The bonus fruit and its spawn bookkeeping.
#[derive(Resource, Debug, Clone)]
pub struct BonusFruit {
    pub tile: IVec2,
    pub active: bool,
    /// Cleared for a while after a fruit is eaten.
    pub eligible: bool,
    pub points: u32,
    pub dot_threshold: u32,
    pub available_timer: Option<TimerKey>,
    pub respawn_timer: Option<TimerKey>,
}

/// The frightened window opened by the latest super dot.
///
/// Outlives the per-ghost timers, which are dropped when a ghost is captured or reset.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrightenedWindow {
    pub timer: Option<TimerKey>,
}

/// The scatter/chase cycle shared by every ghost.
#[derive(Resource, Debug, Clone, Default)]
pub struct ModeSchedule {
    pub index: usize,
    pub timer: Option<TimerKey>,
}

impl ModeSchedule {
    /// Each mode and how long it lasts; the last entry is permanent.
    pub const ENTRIES: [(GhostMode, Option<u64>); 8] = [
        (GhostMode::Scatter, Some(7_000)),
        (GhostMode::Chase, Some(20_000)),
        (GhostMode::Scatter, Some(7_000)),
        (GhostMode::Chase, Some(20_000)),
        (GhostMode::Scatter, Some(5_000)),
        (GhostMode::Chase, Some(20_000)),
        (GhostMode::Scatter, Some(5_000)),
        (GhostMode::Chase, None),
    ];

    pub fn current_mode(&self) -> GhostMode {
        Self::ENTRIES[self.index].0
    }

    pub fn current_duration(&self) -> Option<u64> {
        Self::ENTRIES[self.index].1
    }

    /// Moves to the next entry, staying on the permanent one once reached.
    pub fn advance(&mut self) -> GhostMode {
        self.index = (self.index + 1).min(Self::ENTRIES.len() - 1);
        self.current_mode()
    }
}
