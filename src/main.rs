use std::env;

use anyhow::Context;
use pacman_sim::events::GameEvent;
use pacman_sim::game::Game;
use pacman_sim::map::direction::Direction;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use thousands::Separable;
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Simulated milliseconds per frame.
const FRAME_MS: u64 = 16;
/// How often the autopilot picks a new direction.
const DECISION_MS: u64 = 400;
const DEFAULT_DURATION_SECS: u64 = 120;

/// Runs the simulation without a display, steering the player at random.
///
/// Usage: `pacman-sim [seconds] [seed]`
fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")?;

    let mut args = env::args().skip(1);
    let duration_secs = match args.next() {
        Some(arg) => arg.parse::<u64>().context("duration must be a whole number of seconds")?,
        None => DEFAULT_DURATION_SECS,
    };
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 0,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new(0).context("Failed to build the game")?;
    info!(duration_secs, seed, "Starting headless run");

    let end = duration_secs * 1_000;
    let mut now = 0;
    let mut captures = 0u32;
    while now < end && !game.is_game_over() {
        now += FRAME_MS;

        if now % DECISION_MS < FRAME_MS {
            if let Some(&direction) = Direction::DIRECTIONS.choose(&mut rng) {
                game.request_direction(direction);
            }
        }

        game.tick(now);

        for event in game.drain_events() {
            match event {
                GameEvent::GhostCaptured { .. } => captures += 1,
                GameEvent::DotEaten { .. } => {}
                other => debug!(?other, now, "Event"),
            }
        }
    }

    let snapshot = game.snapshot();
    info!(
        score = %snapshot.score.separate_with_commas(),
        high_score = %snapshot.high_score.separate_with_commas(),
        level = snapshot.level,
        lives = snapshot.lives,
        captures,
        stage = ?snapshot.stage,
        elapsed_ms = %now.separate_with_commas(),
        "Run finished"
    );

    Ok(())
}
