//! Simulation tick
//!
//! Advances the game by one frame's worth of time. The Playing update runs in
//! a fixed order so seeded runs replay exactly.

use glam::Vec2;

use super::body::Body;
use super::collision::{apply_crow_penalty, collect_crops, collect_power_ups, crow_hits, scythe_sweep};
use super::entity::PowerUpKind;
use super::roll::Roll;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{MAX_FRAME_DT, PLAYER_SPEED};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held direction keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI steers the farmer
    pub idle_mode: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick<R: Roll>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = *input;
    if input.idle_mode {
        steer_idle(state, &mut input);
    }

    state.time_ticks += 1;

    // 1. Clock
    state.time_left = (state.time_left - dt).max(0.0);
    if state.time_left <= 0.0 {
        log::info!("Time up on level {} with score {}", state.current_level, state.score);
        state.set_phase(GamePhase::GameOver);
        state.events.push(GameEvent::TimeUp);
        return;
    }

    // 2. Player
    state.player.apply_input(&input);
    state.player.update(dt, &state.scarecrows);

    // 3. Spawning
    state.spawner.advance(
        dt,
        state.spawn_every,
        &mut state.rng,
        &state.config,
        &mut state.crops,
        &mut state.power_ups,
    );

    // 4. Crows
    for crow in &mut state.crows {
        crow.update(dt);
    }

    // 5. Crops
    let harvest = collect_crops(&state.player.body, &mut state.crops);
    if !harvest.is_empty() {
        state.score += harvest.points;
        state.events.push(GameEvent::CropsCollected {
            count: harvest.count,
            points: harvest.points,
        });
        if state.score >= state.goal {
            state.goal_reached();
        }
    }

    // 6. Power-ups
    for kind in collect_power_ups(&state.player.body, &mut state.power_ups) {
        state.player.grant(kind);
        log::debug!("Picked up {:?}", kind);
        state.events.push(GameEvent::PowerUpCollected(kind));

        if kind == PowerUpKind::Scythe {
            let harvest = scythe_sweep(&state.player.body, &mut state.crops);
            if !harvest.is_empty() {
                state.score += harvest.points;
                state.events.push(GameEvent::CropsCollected {
                    count: harvest.count,
                    points: harvest.points,
                });
            }
        }
    }

    // 7. Crows
    let hits = crow_hits(&state.player.body, &state.crows);
    if hits > 0 {
        let before = state.score;
        state.score = apply_crow_penalty(state.score, hits);
        state.events.push(GameEvent::CrowHit {
            crows: hits,
            penalty: before - state.score,
        });
    }

    // 8. Cleanup
    purge_dead(state);

    // 9. Cosmetic phases
    for crop in &mut state.crops {
        crop.update(dt);
    }
    for power_up in &mut state.power_ups {
        power_up.update(dt);
    }
}

fn purge_dead<R>(state: &mut GameState<R>) {
    state.crops.retain(|c| c.body.alive);
    state.power_ups.retain(|p| p.body.alive);
}

/// Center of the nearest live body
fn nearest_center<'a>(bodies: impl Iterator<Item = &'a Body>, from: Vec2) -> Option<Vec2> {
    bodies
        .filter(|b| b.alive)
        .map(|b| b.pos + b.size / 2.0)
        .min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Demo AI: head for the nearest pickup, preferring power-ups, and sidestep
/// scarecrows one axis at a time
fn steer_idle<R>(state: &GameState<R>, input: &mut TickInput) {
    let player = &state.player.body;
    let center = player.pos + player.size / 2.0;

    let target = nearest_center(state.power_ups.iter().map(|p| &p.body), center)
        .or_else(|| nearest_center(state.crops.iter().map(|c| &c.body), center));

    let dead_zone = 4.0;
    let want = target.map_or(Vec2::ZERO, |target| {
        let delta = target - center;
        Vec2::new(
            if delta.x.abs() > dead_zone { delta.x.signum() } else { 0.0 },
            if delta.y.abs() > dead_zone { delta.y.signum() } else { 0.0 },
        )
    });

    // Probe one frame ahead; a blocked move falls back to single-axis steps
    let step = PLAYER_SPEED * MAX_FRAME_DT;
    let blocked = |dir: Vec2| {
        let mut probe = *player;
        probe.pos = probe.clamp_to_field(probe.pos + dir * step);
        state.scarecrows.iter().any(|s| s.body.alive && probe.overlaps(&s.body))
    };
    let dir = if want == Vec2::ZERO {
        Vec2::ZERO
    } else {
        [
            want,
            Vec2::new(want.x, 0.0),
            Vec2::new(0.0, want.y),
            Vec2::NEG_Y,
            Vec2::Y,
            Vec2::NEG_X,
            Vec2::X,
        ]
        .into_iter()
        .find(|d| *d != Vec2::ZERO && !blocked(*d))
        .unwrap_or(Vec2::ZERO)
    };

    input.left = dir.x < 0.0;
    input.right = dir.x > 0.0;
    input.up = dir.y < 0.0;
    input.down = dir.y > 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::entity::{Crop, CropKind, Crow, PowerUp};
    use crate::sim::roll::ScriptedRolls;
    use crate::sim::state::{AdvancePolicy, AdvanceTrigger};
    use crate::sim::Scarecrow;
    use proptest::prelude::*;

    /// Playing state with no obstacles, crows or pending spawns in the way
    fn quiet_game() -> GameState<ScriptedRolls> {
        // 0.99 rolls: wheat at the far corner, never a power-up
        let mut state = GameState::with_rng(GameConfig::default(), ScriptedRolls::new([0.99]));
        state.start();
        state.scarecrows.clear();
        state.crows.clear();
        state.drain_events();
        state
    }

    fn player_pos<R>(state: &GameState<R>) -> Vec2 {
        state.player.body.pos
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut state = GameState::new(1, GameConfig::default());
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_pause_input_stops_clock() {
        let mut state = quiet_game();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 0.016);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.time_left, 60.0);

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.time_left, 60.0);

        tick(&mut state, &pause, 0.016);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.time_left < 60.0);
    }

    #[test]
    fn test_time_up_game_over() {
        let mut state = quiet_game();
        state.time_left = 0.02;
        tick(&mut state, &TickInput::default(), 0.033);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_left, 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::TimeUp]);

        // Stays over
        tick(&mut state, &TickInput::default(), 0.033);
        assert_eq!(state.time_left, 0.0);
    }

    #[test]
    fn test_two_crops_same_tick() {
        let mut state = quiet_game();
        let pos = player_pos(&state);
        state.crops.push(Crop::of_kind(pos + Vec2::new(5.0, 5.0), CropKind::Pumpkin));
        state.crops.push(Crop::of_kind(pos + Vec2::new(-5.0, 0.0), CropKind::Wheat));

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.score, 4);
        assert!(state.crops.is_empty());
        assert!(state
            .drain_events()
            .contains(&GameEvent::CropsCollected { count: 2, points: 4 }));
    }

    #[test]
    fn test_goal_triggers_single_advance() {
        let mut state = quiet_game();
        state.score = 14;
        let pos = player_pos(&state);
        state.crops.push(Crop::of_kind(pos, CropKind::Pumpkin));
        state.crops.push(Crop::of_kind(Vec2::new(30.0, 30.0), CropKind::Wheat));
        state.power_ups.push(PowerUp::new(Vec2::new(60.0, 60.0), PowerUpKind::Speed));

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.score, 17);
        assert_eq!(state.current_level, 2);
        assert_eq!(state.levels_completed, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.crops.is_empty());
        assert!(state.power_ups.is_empty());

        let advances = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelStarted { .. }))
            .count();
        assert_eq!(advances, 1);
    }

    #[test]
    fn test_final_level_goal_wins() {
        let mut state = quiet_game();
        state.goal_reached();
        state.goal_reached();
        assert_eq!(state.current_level, 3);
        state.crows.clear();
        state.scarecrows.clear();
        state.score = state.goal - 1;
        let pos = player_pos(&state);
        state.crops.push(Crop::of_kind(pos, CropKind::GoldenApple));

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.current_level, 4);
        assert_eq!(state.levels_completed, 3);

        // Win is terminal for the run
        let time = state.time_left;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.time_left, time);
    }

    #[test]
    fn test_winning_tick_still_runs_pickups_and_crows() {
        let mut state = quiet_game();
        state.goal_reached();
        state.goal_reached();
        state.crows.clear();
        state.scarecrows.clear();
        state.score = 24;
        let pos = player_pos(&state);
        state.crops.push(Crop::of_kind(pos, CropKind::GoldenApple));
        state.crops.push(Crop::of_kind(Vec2::new(30.0, 30.0), CropKind::Wheat));
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::Speed));
        state.crows.push(Crow::new(pos.x + 4.0, pos.y + 4.0, Vec2::ZERO));

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.phase, GamePhase::Win);
        // 24 + 5, then one crow
        assert_eq!(state.score, 27);
        assert!(state.power_ups.is_empty());
        assert!((state.player.speed_boost - 5.0).abs() < 0.0001);
        assert_eq!(state.crops.len(), 1);
        assert!((state.crops[0].sway - 0.032).abs() < 0.0001);
    }

    #[test]
    fn test_staged_goal_waits_on_level_complete() {
        let mut state = quiet_game().with_policy(AdvancePolicy::Staged);
        state.score = 14;
        state.time_left = 5.0;
        let pos = player_pos(&state);
        state.crops.push(Crop::of_kind(pos, CropKind::Pumpkin));

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        // 17 + floor(4.984 * 2)
        assert_eq!(state.score, 17 + 9);
        assert_eq!(state.current_level, 1);

        state.advance_to_next_level();
        assert_eq!(state.current_level, 2);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::LevelStarted { level: 2, trigger: AdvanceTrigger::Command })
        ));
    }

    #[test]
    fn test_crow_penalties() {
        for (start, crows, expected) in [(5, 1, 3), (5, 2, 1), (1, 1, 0)] {
            let mut state = quiet_game();
            state.score = start;
            let pos = player_pos(&state);
            for _ in 0..crows {
                state.crows.push(Crow::new(pos.x + 4.0, pos.y + 4.0, Vec2::ZERO));
            }
            tick(&mut state, &TickInput::default(), 0.016);
            assert_eq!(state.score, expected, "start {start} with {crows} crows");
        }
    }

    #[test]
    fn test_scythe_harvests_nearby_crops() {
        let mut state = quiet_game();
        let pos = player_pos(&state);
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::Scythe));
        state.crops.push(Crop::of_kind(pos + Vec2::new(60.0, -60.0), CropKind::GoldenApple));
        state.crops.push(Crop::of_kind(pos + Vec2::new(-90.0, 0.0), CropKind::Pumpkin));
        state.crops.push(Crop::of_kind(pos + Vec2::new(0.0, -150.0), CropKind::Wheat));

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.score, 8);
        assert_eq!(state.crops.len(), 1);
        assert_eq!(state.crops[0].kind, CropKind::Wheat);
        assert!(state.power_ups.is_empty());
        assert!(state.player.scythe_active());
    }

    #[test]
    fn test_speed_power_up_grants_boost() {
        let mut state = quiet_game();
        let pos = player_pos(&state);
        state.power_ups.push(PowerUp::new(pos, PowerUpKind::Speed));
        tick(&mut state, &TickInput::default(), 0.016);
        assert!((state.player.speed_boost - 5.0).abs() < 0.0001);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 0.016);
        assert_eq!(state.player.vel.x, PLAYER_SPEED * 1.5);
    }

    #[test]
    fn test_scarecrow_blocks_whole_move() {
        let mut state = quiet_game();
        let pos = player_pos(&state);
        state.scarecrows.push(Scarecrow::new(pos.x + 36.0, pos.y - 20.0));
        let diagonal = TickInput {
            right: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &diagonal, 0.033);
        assert_eq!(player_pos(&state), pos);
    }

    #[test]
    fn test_spawns_follow_accumulator() {
        let mut state = quiet_game();
        tick(&mut state, &TickInput::default(), 0.5);
        assert!(state.crops.is_empty());
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.crops.len(), 1);
        let crop = &state.crops[0];
        assert_eq!(crop.kind, CropKind::Wheat);
        assert_eq!(crop.body.pos, Vec2::new(840.0, 480.0));
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_cosmetic_phases_advance_after_purge() {
        let mut state = quiet_game();
        state.crops.push(Crop::of_kind(Vec2::new(30.0, 30.0), CropKind::Wheat));
        state.power_ups.push(PowerUp::new(Vec2::new(90.0, 30.0), PowerUpKind::Speed));
        tick(&mut state, &TickInput::default(), 0.02);
        assert!((state.crops[0].sway - 0.04).abs() < 0.0001);
        assert!((state.power_ups[0].pulse - 0.1).abs() < 0.0001);
    }

    #[test]
    fn test_idle_mode_walks_toward_crop() {
        let mut state = quiet_game();
        let start = player_pos(&state);
        state.crops.push(Crop::of_kind(Vec2::new(90.0, 90.0), CropKind::Wheat));
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &idle, 0.016);
        let now = player_pos(&state);
        assert!(now.x < start.x);
        assert!(now.y < start.y);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, GameConfig::default());
        let mut b = GameState::new(99999, GameConfig::default());
        a.start();
        b.start();
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &idle, 0.033);
            tick(&mut b, &idle, 0.033);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.crops.len(), b.crops.len());
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.current_level, b.current_level);
    }

    proptest! {
        #[test]
        fn prop_clock_never_increases(steps in prop::collection::vec(0.0f32..0.033, 1..200)) {
            let mut state = GameState::new(5, GameConfig::default());
            state.start();
            let mut last = state.time_left;
            for dt in steps {
                tick(&mut state, &TickInput::default(), dt);
                prop_assert!(state.time_left <= last);
                prop_assert!(state.time_left >= 0.0);
                last = state.time_left;
            }
        }
    }
}
