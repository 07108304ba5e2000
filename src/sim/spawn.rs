//! Target spawning
//!
//! Spawn odds lean on the active mission: a fast-hunt doubles the fast
//! chance, and targets that advance the mission are flagged for a highlight.

use glam::Vec2;
use rand::Rng;

use super::mission::MissionKind;
use super::state::{Entity, EntityKind};
use crate::consts::SPAWN_MARGIN;

/// Probability of a mine at a difficulty
pub fn mine_chance(difficulty: f32) -> f32 {
    0.12 + difficulty * 0.15
}

/// Probability of a fast target for a mission
pub fn fast_chance(mission: MissionKind) -> f32 {
    if mission == MissionKind::HuntFast {
        0.40
    } else {
        0.20
    }
}

pub const SLOW_CHANCE: f32 = 0.10;

/// Maximum live targets at a difficulty
pub fn max_entities(difficulty: f32) -> usize {
    8 + (difficulty * 12.0).floor() as usize
}

/// Per-tick spawn probability
pub fn spawn_chance(difficulty: f32, live: usize) -> f32 {
    if live < 5 {
        0.5
    } else {
        0.05 + difficulty * 0.12
    }
}

/// Pick a target kind from a uniform roll in [0, 1)
pub fn pick_kind(roll: f32, difficulty: f32, mission: MissionKind) -> EntityKind {
    let mine = mine_chance(difficulty);
    let fast = mine + fast_chance(mission);
    let slow = fast + SLOW_CHANCE;
    if roll < mine {
        EntityKind::Mine
    } else if roll < fast {
        EntityKind::Fast
    } else if roll < slow {
        EntityKind::Slow
    } else {
        EntityKind::Normal
    }
}

/// Build a new target somewhere inside the viewport
pub fn spawn_entity(
    rng: &mut impl Rng,
    id: u32,
    width: f32,
    height: f32,
    difficulty: f32,
    mission: MissionKind,
) -> Entity {
    let pos = Vec2::new(
        rng.random::<f32>() * (width - 2.0 * SPAWN_MARGIN).max(0.0) + SPAWN_MARGIN,
        rng.random::<f32>() * (height - 2.0 * SPAWN_MARGIN).max(0.0) + SPAWN_MARGIN,
    );
    let wobble = rng.random::<f32>() * 100.0;
    let kind = pick_kind(rng.random::<f32>(), difficulty, mission);

    let spread = match kind {
        EntityKind::Mine => 3.0 * (1.0 + difficulty),
        EntityKind::Fast => 9.0 + difficulty * 7.0,
        EntityKind::Slow => 2.0,
        EntityKind::Normal => 3.0,
    };
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * spread,
        (rng.random::<f32>() - 0.5) * spread,
    );

    let mission_target = match mission {
        MissionKind::HuntFast => kind == EntityKind::Fast,
        MissionKind::HuntAny => !kind.is_mine(),
        MissionKind::Streak => false,
    };

    Entity {
        id,
        kind,
        pos,
        vel,
        radius: kind.radius(),
        wobble,
        mission_target,
    }
}
