use glam::IVec2;
use pacman_sim::config::GameConfig;
use pacman_sim::events::{GameCommand, GameEvent};
use pacman_sim::game::Game;
use pacman_sim::map::direction::Direction;
use pacman_sim::map::parser::Tile;
use pacman_sim::systems::components::{GameStage, GhostKind, GhostMode, HeldDirections, ModeSchedule};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::*;

#[test]
fn test_agents_frozen_during_ready() {
    let mut game = Game::new(0).unwrap();
    game.tick(1_000);
    game.tick(2_999);

    assert_that(&game.stage()).is_equal_to(GameStage::Ready);
    assert_that(&player_mover(&game).tile).is_equal_to(IVec2::new(14, 23));
    assert_that(&player_mover(&game).offset).is_equal_to(IVec2::ZERO);
    assert_that(&game.drain_events().is_empty()).is_true();
}

#[test]
fn test_play_starts_after_ready() {
    let mut game = Game::new(0).unwrap();
    game.tick(3_000);

    assert_that(&game.stage()).is_equal_to(GameStage::Playing);
    assert_that(&game.drain_events().contains(&GameEvent::PlayStarted)).is_true();
    assert_that(&player_mover(&game).last_update).is_equal_to(3_000);

    // The first ghost leaves the pen on the following tick.
    game.tick(3_001);
    let state = ghost_state(&game, GhostKind::Direct);
    assert_that(&state.in_box).is_false();
    assert_that(&ghost_mover(&game, GhostKind::Direct).tile).is_equal_to(IVec2::new(14, 11));
    assert_that(&ghost_state(&game, GhostKind::Ambusher).in_box).is_true();
}

#[test]
fn test_first_dot_scores_and_carries_offset() {
    let mut game = started_game();
    game.tick(3_050);

    let mover = player_mover(&game);
    assert_eq!(mover.tile, IVec2::new(13, 23));
    assert_eq!(mover.offset, IVec2::new(9, 0));
    assert_that(&game.scoreboard().score).is_equal_to(10);
    assert_that(&game.grid().tile(IVec2::new(13, 23))).is_equal_to(Tile::Empty);
    assert_that(&game.drain_events().contains(&GameEvent::DotEaten {
        tile: IVec2::new(13, 23),
    })).is_true();
}

#[test]
fn test_wall_request_is_ignored() {
    let mut game = started_game();
    assert_that(&game.request_direction(Direction::Up)).is_false();
    assert_that(&player_mover(&game).pending).is_equal_to(Direction::Left);

    assert_that(&game.request_direction(Direction::Right)).is_true();
    assert_that(&player_mover(&game).pending).is_equal_to(Direction::Right);
}

#[test]
fn test_move_command_queues_direction() {
    let mut game = started_game();
    game.handle_command(GameCommand::MovePlayer(Direction::Right));
    assert_that(&player_mover(&game).pending).is_equal_to(Direction::Right);
}

#[test]
fn test_held_direction_applied_on_arrival() {
    let mut game = started_game();
    // The start tile is walled in above, the tile to its left is not.
    game.set_held_directions(HeldDirections::UP);
    assert_that(&player_mover(&game).pending).is_equal_to(Direction::Left);

    game.tick(3_050);

    let mover = player_mover(&game);
    assert_that(&mover.tile).is_equal_to(IVec2::new(13, 23));
    assert_that(&mover.pending).is_equal_to(Direction::Up);
}

#[test]
fn test_capture_values_double() {
    let mut game = started_game();

    game.tick(3_050);
    assert_that(&game.scoreboard().score).is_equal_to(10);

    place_player(&mut game, IVec2::new(2, 5), Direction::Up, 3_050);
    game.tick(3_110);
    assert_that(&player_mover(&game).tile).is_equal_to(IVec2::new(2, 4));
    assert_that(&game.scoreboard().score).is_equal_to(110);
    assert_that(&ghost_state(&game, GhostKind::Direct).flashing).is_true();

    place_ghost(&mut game, GhostKind::Direct, IVec2::new(2, 4), Direction::Left, 3_110);
    game.tick(3_111);
    assert_that(&game.scoreboard().score).is_equal_to(210);
    assert_that(&game.scoreboard().lives).is_equal_to(3);

    let captured = ghost_state(&game, GhostKind::Direct);
    assert_that(&captured.flashing).is_false();
    assert_that(&captured.in_box).is_true();

    place_ghost(&mut game, GhostKind::Ambusher, IVec2::new(2, 4), Direction::Left, 3_111);
    game.tick(3_112);
    assert_that(&game.scoreboard().score).is_equal_to(410);

    let events = game.drain_events();
    assert_that(&events.contains(&GameEvent::GhostCaptured {
        ghost: GhostKind::Direct,
        points: 100,
    })).is_true();
    assert_that(&events.contains(&GameEvent::GhostCaptured {
        ghost: GhostKind::Ambusher,
        points: 200,
    })).is_true();
}

#[test]
fn test_caught_player_loses_life_and_everyone_resets() {
    let mut game = started_game();
    game.tick(3_050);
    place_ghost(&mut game, GhostKind::Flanker, IVec2::new(13, 23), Direction::Right, 3_050);

    game.tick(3_051);

    let snapshot = game.snapshot();
    assert_that(&snapshot.lives).is_equal_to(2);
    assert_that(&snapshot.player.tile).is_equal_to(IVec2::new(14, 23));
    assert_that(&snapshot.player.offset).is_equal_to(IVec2::ZERO);
    assert_that(&snapshot.player.facing).is_equal_to(Direction::Left);
    for (index, ghost) in snapshot.ghosts.iter().enumerate() {
        assert_that(&ghost.in_box).is_true();
        assert_that(&ghost.agent.tile).is_equal_to(IVec2::new(13 + index as i32, 15));
    }
    assert_that(&game.drain_events().contains(&GameEvent::PlayerCaught {
        ghost: GhostKind::Flanker,
        lives: 2,
    })).is_true();
}

#[test]
fn test_last_life_ends_the_game() {
    let mut game = started_game();
    scoreboard_mut(&mut game).lives = 1;
    place_ghost(&mut game, GhostKind::Shy, IVec2::new(14, 23), Direction::Left, 3_000);

    game.tick(3_001);
    assert_that(&game.is_game_over()).is_true();

    let events = game.drain_events();
    assert_that(&events.contains(&GameEvent::GameOver { score: 0 })).is_true();

    // Nothing moves once the game is over.
    let before = player_mover(&game);
    game.tick(5_000);
    assert_that(&player_mover(&game)).is_equal_to(before);
}

#[test]
fn test_player_wraps_through_tunnel() {
    let config = GameConfig {
        player_start: IVec2::new(3, 15),
        ..GameConfig::default()
    };
    let mut game = Game::with_config(config, 0).unwrap();
    game.tick(3_000);

    let mut now = 3_000;
    while player_mover(&game).tile.x <= 14 && now < 5_000 {
        now += 20;
        game.tick(now);
    }

    assert_that(&player_mover(&game).tile).is_equal_to(IVec2::new(28, 15));
    assert_that(&game.scoreboard().lives).is_equal_to(3);
}

#[test]
fn test_level_cleared_restores_grid() {
    let layout = board_keeping(&[IVec2::new(13, 23)]);
    let config = GameConfig::default().with_layout(&layout);
    let mut game = Game::with_config(config, 0).unwrap();
    assert_that(&game.grid().remaining_collectibles()).is_equal_to(1);

    game.tick(3_000);
    game.tick(3_050);

    assert_that(&game.scoreboard().level).is_equal_to(2);
    assert_that(&game.grid().remaining_collectibles()).is_equal_to(1);
    assert_that(&game.grid().tile(IVec2::new(13, 23))).is_equal_to(Tile::Dot);
    assert_that(&game.drain_events().contains(&GameEvent::LevelCleared { level: 2 })).is_true();
}

#[test]
fn test_extra_life_at_threshold() {
    let mut game = started_game();
    scoreboard_mut(&mut game).score = 9_995;

    game.tick(3_050);

    let scoreboard = game.scoreboard();
    assert_that(&scoreboard.lives).is_equal_to(4);
    assert_that(&scoreboard.next_extra_life).is_equal_to(20_000);
    assert_that(&scoreboard.high_score).is_equal_to(10_005);
}

#[test]
fn test_fruit_spawns_and_is_eaten() {
    let mut game = started_game();
    scoreboard_mut(&mut game).dots_eaten = 69;

    game.tick(3_050);
    assert_that(&game.snapshot().fruit.active).is_true();
    assert_that(&game.drain_events().contains(&GameEvent::FruitSpawned {
        tile: IVec2::new(14, 18),
    })).is_true();

    place_player(&mut game, IVec2::new(15, 18), Direction::Left, 3_050);
    game.tick(3_100);

    let snapshot = game.snapshot();
    assert_that(&snapshot.player.tile).is_equal_to(IVec2::new(14, 18));
    assert_that(&snapshot.fruit.active).is_false();
    assert_that(&snapshot.fruit.points).is_equal_to(200);
    assert_that(&snapshot.score).is_equal_to(110);
    assert_that(&game.drain_events().contains(&GameEvent::FruitEaten { points: 100 })).is_true();
}

#[test]
fn test_fruit_expires() {
    let mut game = started_game();
    scoreboard_mut(&mut game).dots_eaten = 69;
    game.tick(3_050);
    assert_that(&game.snapshot().fruit.active).is_true();

    place_player(&mut game, IVec2::new(2, 29), Direction::Left, 3_050);
    game.tick(11_050);

    assert_that(&game.snapshot().fruit.active).is_false();
    assert_that(&game.drain_events().contains(&GameEvent::FruitExpired)).is_true();
}

#[test]
fn test_frightened_window_blinks_then_expires() {
    let mut game = started_game();
    place_player(&mut game, IVec2::new(2, 5), Direction::Up, 3_000);
    game.tick(3_060);
    assert_that(&ghost_state(&game, GhostKind::Shy).mode).is_equal_to(GhostMode::Frightened);

    game.tick(4_060);
    let state = ghost_state(&game, GhostKind::Shy);
    assert_that(&state.flashing).is_true();
    assert_that(&state.flash_index).is_equal_to(1);

    game.tick(11_060);
    let state = ghost_state(&game, GhostKind::Shy);
    assert_that(&state.flashing).is_false();
    assert_that(&state.flash_index).is_equal_to(0);
    assert_that(&state.blink_timer).is_none();
    // The schedule moved on to chase at 10 s while the ghost was frightened.
    assert_that(&state.mode).is_equal_to(GhostMode::Chase);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(100);
}

#[test]
fn test_capture_value_resets_after_every_ghost_is_captured() {
    let mut game = started_game();
    place_player(&mut game, IVec2::new(2, 5), Direction::Up, 3_000);
    game.tick(3_060);

    let mut now = 3_060;
    for kind in [GhostKind::Direct, GhostKind::Ambusher, GhostKind::Flanker, GhostKind::Shy] {
        place_ghost(&mut game, kind, IVec2::new(2, 4), Direction::Left, now);
        now += 1;
        game.tick(now);
    }
    assert_that(&game.scoreboard().frightened_points).is_equal_to(1_600);

    // No ghost is frightened any more, but the window still closes on time.
    game.tick(20_000);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(100);

    place_player(&mut game, IVec2::new(27, 5), Direction::Up, 20_000);
    game.tick(20_060);
    place_ghost(&mut game, GhostKind::Direct, IVec2::new(27, 4), Direction::Left, 20_060);
    game.tick(20_061);

    let events = game.drain_events();
    assert_that(&events.contains(&GameEvent::GhostCaptured {
        ghost: GhostKind::Direct,
        points: 100,
    }))
    .is_true();
}

#[test]
fn test_capture_value_resets_after_life_lost_mid_window() {
    let mut game = started_game();
    place_player(&mut game, IVec2::new(2, 5), Direction::Up, 3_000);
    game.tick(3_060);

    place_ghost(&mut game, GhostKind::Direct, IVec2::new(2, 4), Direction::Left, 3_060);
    game.tick(3_061);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(200);

    // The captured ghost comes back calm and catches the player.
    game.tick(3_062);
    place_ghost(&mut game, GhostKind::Direct, IVec2::new(2, 4), Direction::Left, 3_062);
    game.tick(3_063);
    assert_that(&game.scoreboard().lives).is_equal_to(2);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(200);

    game.tick(20_000);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(100);
}

#[test]
fn test_second_super_dot_restarts_capture_value() {
    let mut game = started_game();
    place_player(&mut game, IVec2::new(2, 5), Direction::Up, 3_000);
    game.tick(3_060);
    place_ghost(&mut game, GhostKind::Ambusher, IVec2::new(2, 4), Direction::Left, 3_060);
    game.tick(3_061);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(200);

    // Still inside the first window.
    place_player(&mut game, IVec2::new(27, 5), Direction::Up, 4_000);
    game.tick(4_060);
    assert_that(&game.scoreboard().frightened_points).is_equal_to(100);
}

#[test]
fn test_mode_schedule_runs_to_permanent_chase() {
    let mut game = started_game();
    let mut modes = Vec::new();
    for now in [10_000, 30_000, 37_000, 57_000, 62_000, 82_000, 87_000, 200_000] {
        game.tick(now);
        modes.extend(game.drain_events().into_iter().filter_map(|event| match event {
            GameEvent::ModeChanged { mode } => Some(mode),
            _ => None,
        }));
    }

    use GhostMode::*;
    assert_eq!(modes, vec![Chase, Scatter, Chase, Scatter, Chase, Scatter, Chase]);
    assert_that(&game.world.resource::<ModeSchedule>().timer).is_none();
}

#[test]
fn test_bad_layout_is_rejected() {
    let config = GameConfig::default().with_layout(&["#####", "#.x.#", "#####"]);
    assert_that(&Game::with_config(config, 0).is_err()).is_true();
}
