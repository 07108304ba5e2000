//! Fixed timestep simulation tick
//!
//! Core game loop that advances a round deterministically.

use glam::Vec2;
use rand::Rng;

use super::effects::{self, PopText, SMASH_WORDS};
use super::mission::Mission;
use super::spawn;
use super::state::{Entity, EntityKind, GameEvent, GamePhase, GameState, HammerTrailPoint, Tint};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in canvas pixels (mouse/touch)
    pub pointer: Option<Vec2>,
    /// Swing the hammer (click/tap)
    pub swing: bool,
    /// Fire the ultra-bonk (space/button)
    pub power: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - a bot plays the round
    pub autoplay: bool,
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::GameOver => return,
        // Space still detonates a charged ultra-bonk on the pause screen
        GamePhase::Paused => {
            if input.power && state.power_ready() {
                mega_bonk(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    let time_ms = state.time_ticks as f32 * SIM_DT * 1000.0;
    state.backdrop.update(state.width, state.height, time_ms);

    let mut input = input.clone();
    if input.autoplay {
        autopilot(state, &mut input);
    }
    let input = &input;

    if let Some(pointer) = input.pointer {
        state.pointer = pointer;
    }

    if input.power && state.power_ready() {
        mega_bonk(state);
    }

    if input.swing {
        state.player.dash_ticks = DASH_TICKS;
        state.events.push(GameEvent::Swing);
    }

    // Impact freeze: the dash keeps running out, nothing else moves
    if state.hit_stop > 0 {
        state.hit_stop -= 1;
        state.player.dash_ticks = state.player.dash_ticks.saturating_sub(1);
        return;
    }

    state.time_left -= dt;
    if state.time_left <= 0.0 {
        end_round(state);
        return;
    }

    let difficulty = state.difficulty();

    // Player chases the pointer
    let pointer = state.pointer;
    state.player.follow(pointer);
    if state.player.is_dashing() {
        let head = state.player.head();
        state.hammer_trail.push(HammerTrailPoint { pos: head, life: 1.0 });
    }
    for point in &mut state.hammer_trail {
        point.life -= 0.1;
    }
    state.hammer_trail.retain(|p| p.life > 0.0);

    // Spawn
    let live = state.entities.len();
    if live < spawn::max_entities(difficulty)
        && state.rng.random::<f32>() < spawn::spawn_chance(difficulty, live)
    {
        let id = state.next_entity_id();
        let (width, height, mission) = (state.width, state.height, state.mission.kind);
        let entity = spawn::spawn_entity(&mut state.rng, id, width, height, difficulty, mission);
        state.entities.push(entity);
    }

    // Move targets, then resolve hammer hits
    for entity in &mut state.entities {
        entity.update(state.width, state.height);
    }

    if state.player.is_dashing() {
        let player_pos = state.player.pos;
        let mut hits: Vec<Entity> = Vec::new();
        state.entities.retain(|e| {
            let hit = e.pos.distance(player_pos) < e.radius + HAMMER_REACH;
            if hit {
                hits.push(e.clone());
            }
            !hit
        });

        // Newest first
        for entity in hits.iter().rev() {
            if entity.kind.is_mine() {
                mine_hit(state);
            } else {
                smash(state, entity);
            }
        }

        // A mine can take the clock past zero mid-frame
        if state.time_left <= 0.0 {
            end_round(state);
            return;
        }
    }

    effects::update_effects(&mut state.particles, &mut state.pop_texts);

    // Screen effects
    if state.shake > 0.0 {
        state.shake *= 0.88;
        if state.shake < 0.01 {
            state.shake = 0.0;
        }
    }
    if state.shock_radius > 0.0 {
        state.shock_radius += state.width * 0.055;
        if state.shock_radius > state.width * 1.5 {
            state.shock_radius = 0.0;
        }
    }
    if state.flash > 0.0 {
        state.flash = (state.flash - 0.035).max(0.0);
    }

    state.player.dash_ticks = state.player.dash_ticks.saturating_sub(1);
}

/// Clamp the clock and finish the round
fn end_round(state: &mut GameState) {
    state.time_left = 0.0;
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!("Round over, final score {}", state.score);
}

/// Hammer connects with a target
fn smash(state: &mut GameState, entity: &Entity) {
    state.shake = 15.0;
    state.hit_stop = SMASH_HIT_STOP;
    state.combo += 1;

    let was_ready = state.power_ready();
    state.power = (state.power + POWER_PER_HIT).min(POWER_MAX);
    if !was_ready && state.power_ready() {
        state.events.push(GameEvent::PowerReady);
    }

    state.score += SMASH_POINTS * state.multiplier();
    state.time_left += SMASH_TIME_BONUS;

    let word = SMASH_WORDS[state.rng.random_range(0..SMASH_WORDS.len())];
    let tint = entity.kind.tint();
    state
        .pop_texts
        .push(PopText::new(entity.pos - Vec2::new(0.0, 40.0), word, tint, 50.0));
    effects::burst(&mut state.particles, &mut state.rng, entity.pos, tint, 15);

    state.mission.record_smash(entity.kind);
    state.events.push(GameEvent::Smash { kind: entity.kind });
    refresh_mission(state);
}

/// Hammer lands on a mine
fn mine_hit(state: &mut GameState) {
    state.time_left -= MINE_TIME_PENALTY;
    state.score = state.score.saturating_sub(MINE_SCORE_PENALTY);
    state.combo = 0;
    state.shake = 35.0;
    state.hit_stop = MINE_HIT_STOP;
    state.events.push(GameEvent::MineHit);
    // Streak progress drops with the combo
    refresh_mission(state);
}

/// Sync streak progress and pay out a finished mission
fn refresh_mission(state: &mut GameState) {
    state.mission.sync_combo(state.combo);
    if !state.mission.is_complete() {
        return;
    }

    state.score += MISSION_POINTS;
    state.time_left += MISSION_TIME_BONUS;
    let center = state.center();
    state
        .pop_texts
        .push(PopText::new(center, "MISSION COMPLETE!", Tint::Gold, 90.0));
    state.flash = 0.5;
    state.shake = 20.0;
    effects::burst(&mut state.particles, &mut state.rng, center, Tint::Sky, 40);

    log::info!("Mission complete: {}", state.mission.description());
    state.mission = Mission::random(&mut state.rng);
    state.events.push(GameEvent::MissionComplete);
}

/// Ultra-bonk: shockwave that detonates every mine on screen
fn mega_bonk(state: &mut GameState) {
    state.power = 0;
    state.shock_radius = 1.0;
    state.flash = 1.0;
    state.shake = 60.0;

    let (mines, rest): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut state.entities)
        .into_iter()
        .partition(|e| e.kind.is_mine());
    state.entities = rest;

    for mine in &mines {
        state
            .pop_texts
            .push(PopText::new(mine.pos, "KABOOM!", Tint::Orange, 70.0));
        effects::burst(&mut state.particles, &mut state.rng, mine.pos, Tint::Ember, 20);
        state.score += MEGA_BONK_MINE_POINTS;
    }

    state.events.push(GameEvent::MegaBonk {
        mines: mines.len() as u32,
    });
}

/// Demo bot: chase the nearest non-mine and swing when close
fn autopilot(state: &GameState, input: &mut TickInput) {
    if state.power_ready() {
        input.power = true;
    }

    let player = state.player.pos;
    let target = state
        .entities
        .iter()
        .filter(|e| e.kind != EntityKind::Mine)
        .min_by(|a, b| {
            a.pos
                .distance(player)
                .partial_cmp(&b.pos.distance(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target) = target {
        // Lead moving targets slightly
        let aim = target.pos + target.vel * 4.0;
        input.pointer = Some(aim);
        let reach = target.radius + HAMMER_REACH + 60.0;
        if !state.player.is_dashing() && target.pos.distance(player) < reach {
            input.swing = true;
        }
    }
}
