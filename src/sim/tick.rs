//! Fixed-step simulation tick
//!
//! One call advances the world by one frame. Input is an immutable snapshot
//! taken before the call; every state change a host needs to hear about is
//! returned as a `GameEvent`, in the order it happened.

use super::collision::{circle_vs_circle, enemy_contact, platform_landing};
use super::state::{EnemyState, GameEvent, GameState, RunPhase};
use crate::consts::{FALL_MARGIN, LEVEL_BONUS, STOMP_POINTS};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left direction held
    pub left: bool,
    /// Right direction held
    pub right: bool,
    /// One-shot jump intent (key-down edge or jump button tap)
    pub jump: bool,
}

/// Advance the game state by one tick
///
/// No-op unless the run is `Active`. Returns the notifications produced.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != RunPhase::Active {
        return events;
    }

    state.time_ticks += 1;
    let config = state.config;

    // Horizontal input: left wins over right, otherwise decay
    let player = &mut state.player;
    if input.left {
        player.vel.x = -player.speed;
    } else if input.right {
        player.vel.x = player.speed;
    } else {
        player.vel.x *= config.friction;
    }

    if input.jump && player.on_ground {
        player.vel.y = -player.jump_power;
        player.on_ground = false;
    }

    // Semi-implicit Euler
    player.vel.y += config.gravity;
    player.pos += player.vel;

    // Grounding is re-derived every tick. Later platforms override earlier ones.
    player.on_ground = false;
    for platform in &state.platforms {
        if platform_landing(player, &platform.rect) {
            player.on_ground = true;
            player.vel.y = 0.0;
            player.pos.y = platform.rect.y - player.radius;
        }
    }

    if player.pos.x < player.radius {
        player.pos.x = player.radius;
        player.vel.x = 0.0;
    }

    if player.pos.y > config.world_height + FALL_MARGIN {
        lose_life(state, &mut events);
    }
    state.camera.follow(state.player.pos.x, config.world_width);
    if state.phase == RunPhase::GameOver {
        return events;
    }

    collect_items(state, &mut events);

    if resolve_enemies(state, &mut events) == RunPhase::GameOver {
        return events;
    }

    if state.player.pos.x > state.level_end_x {
        advance_level(state, &mut events);
    }

    events
}

/// Pick up every uncollected item the player overlaps
fn collect_items(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &state.player;
    for item in state.collectibles.iter_mut().filter(|c| !c.collected) {
        if circle_vs_circle(player.pos, player.radius, item.pos, item.radius) {
            item.collected = true;
            state.score += item.value;
            events.push(GameEvent::ScoreChanged(state.score));
        }
    }
}

/// Move enemies, then stomp or get hurt by each one touching the player
fn resolve_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) -> RunPhase {
    for i in 0..state.enemies.len() {
        let enemy = &mut state.enemies[i];
        if !enemy.is_active() {
            continue;
        }
        enemy.patrol();

        let enemy_rect = enemy.rect;
        if !enemy_contact(&state.player, &enemy_rect) {
            continue;
        }

        if state.player.vel.y > 0.0 && state.player.pos.y < enemy_rect.y {
            state.player.vel.y = -state.config.bounce_velocity;
            state.enemies[i].state = EnemyState::Defeated;
            state.score += STOMP_POINTS;
            events.push(GameEvent::ScoreChanged(state.score));
            log::debug!("Stomped enemy {} (score {})", i, state.score);
        } else {
            lose_life(state, events);
            if state.phase == RunPhase::GameOver {
                return RunPhase::GameOver;
            }
        }
    }
    state.phase
}

/// Spend a life. At zero the run ends; otherwise the player respawns in the
/// same level with its content untouched.
pub fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LivesChanged(state.lives));

    if state.lives == 0 {
        state.phase = RunPhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!(
            "Game over at level {} with score {}",
            state.level,
            state.score
        );
    } else {
        log::debug!("Life lost, {} remaining", state.lives);
        state.respawn_player();
    }
}

/// Move to the next level: bonus, respawn, fresh content
pub fn advance_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.level += 1;
    events.push(GameEvent::LevelChanged(state.level));

    state.score += LEVEL_BONUS;
    events.push(GameEvent::ScoreChanged(state.score));

    state.load_level();
    state.respawn_player();
    log::info!("Advanced to level {} (score {})", state.level, state.score);
}
