//! Game state and core simulation types
//!
//! Everything a round needs lives here. Visual-only objects (particles, pop
//! texts, backdrop) share the seeded RNG so a seed + input stream replays the
//! same round.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::backdrop::Backdrop;
use super::effects::{Particle, PopText};
use super::mission::Mission;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Timer running, targets spawning
    Playing,
    /// Frozen (workbench open, tab hidden)
    Paused,
    /// Timer hit zero; terminal until restart
    GameOver,
}

/// Named colors used by the simulation. The renderer maps them to CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Sky,
    Ember,
    Charcoal,
    Lime,
    White,
    Gold,
    Orange,
}

/// Target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Normal,
    Fast,
    Mine,
    Slow,
}

impl EntityKind {
    pub fn tint(&self) -> Tint {
        match self {
            EntityKind::Normal => Tint::Sky,
            EntityKind::Fast => Tint::Ember,
            EntityKind::Mine => Tint::Charcoal,
            EntityKind::Slow => Tint::Lime,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            EntityKind::Normal => 35.0,
            EntityKind::Fast => 25.0,
            EntityKind::Mine => 40.0,
            EntityKind::Slow => 32.0,
        }
    }

    pub fn is_mine(&self) -> bool {
        *self == EntityKind::Mine
    }
}

/// A bouncing target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Animation phase
    pub wobble: f32,
    /// Highlighted because smashing it advances the mission
    pub mission_target: bool,
}

impl Entity {
    /// Move one tick and bounce off the viewport edges
    pub fn update(&mut self, width: f32, height: f32) {
        self.wobble += 0.15;
        self.pos += self.vel;

        if self.pos.x < self.radius {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x > width - self.radius {
            self.pos.x = width - self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < self.radius {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y > height - self.radius {
            self.pos.y = height - self.radius;
            self.vel.y = -self.vel.y;
        }
    }
}

/// The hammer-wielding player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians), hammer head points this way
    pub angle: f32,
    /// Ticks of dash remaining (a swing in progress)
    pub dash_ticks: u32,
}

impl Player {
    pub fn is_dashing(&self) -> bool {
        self.dash_ticks > 0
    }

    /// Ease toward the pointer and face it
    pub fn follow(&mut self, pointer: Vec2) {
        let delta = pointer - self.pos;
        self.angle = delta.y.atan2(delta.x);
        let ease = if self.is_dashing() {
            PLAYER_DASH_EASE
        } else {
            PLAYER_EASE
        };
        self.pos += delta * ease;
    }

    /// Hammer head position
    pub fn head(&self) -> Vec2 {
        self.pos + crate::direction(self.angle) * HAMMER_HEAD_OFFSET
    }
}

/// Fading smear left behind the hammer head while dashing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HammerTrailPoint {
    pub pos: Vec2,
    pub life: f32,
}

/// Things that happened during a tick (for audio and HUD)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Swing,
    Smash { kind: EntityKind },
    MineHit,
    MegaBonk { mines: u32 },
    MissionComplete,
    PowerReady,
    GameOver { score: u64 },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    /// Seconds left on the clock
    pub time_left: f32,
    pub score: u64,
    pub combo: u32,
    /// Ultra-bonk meter (0..=100)
    pub power: u32,
    /// Ticks left during which the simulation is frozen after an impact
    pub hit_stop: u32,
    /// Simulation tick counter (hit-stop ticks included)
    pub time_ticks: u64,
    /// Last pointer position
    pub pointer: Vec2,
    pub player: Player,
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
    pub pop_texts: Vec<PopText>,
    pub hammer_trail: Vec<HammerTrailPoint>,
    pub mission: Mission,
    pub backdrop: Backdrop,
    /// Screen shake amplitude in pixels
    pub shake: f32,
    /// Shock ring radius (0 = inactive)
    pub shock_radius: f32,
    /// White flash opacity
    pub flash: f32,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh round for a viewport
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mission = Mission::random(&mut rng);
        let backdrop = Backdrop::generate(&mut rng, width, height);
        let center = Vec2::new(width / 2.0, height / 2.0);

        log::debug!("New round seed={} mission={:?}", seed, mission.kind);

        Self {
            seed,
            rng,
            width,
            height,
            phase: GamePhase::Playing,
            time_left: START_TIME,
            score: 0,
            combo: 0,
            power: 0,
            hit_stop: 0,
            time_ticks: 0,
            pointer: center,
            player: Player {
                pos: center,
                ..Default::default()
            },
            entities: Vec::new(),
            particles: Vec::new(),
            pop_texts: Vec::new(),
            hammer_trail: Vec::new(),
            mission,
            backdrop,
            shake: 0.0,
            shock_radius: 0.0,
            flash: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Viewport changed: rebuild the backdrop and keep targets on screen
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.backdrop = Backdrop::generate(&mut self.rng, width, height);
        for entity in &mut self.entities {
            entity.pos.x = entity.pos.x.clamp(entity.radius, (width - entity.radius).max(entity.radius));
            entity.pos.y = entity.pos.y.clamp(entity.radius, (height - entity.radius).max(entity.radius));
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ultra-bonk is charged
    pub fn power_ready(&self) -> bool {
        self.power >= POWER_MAX
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Score multiplier for the current combo
    pub fn multiplier(&self) -> u64 {
        1 + (self.combo / COMBO_STEP) as u64
    }

    pub fn difficulty(&self) -> f32 {
        crate::difficulty_for(self.score)
    }

    /// Screen center (where mission banners pop)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::backdrop::BUILDING_WIDTH;
    use proptest::prelude::*;

    fn push_at(state: &mut GameState, kind: EntityKind, pos: Vec2) {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: kind.radius(),
            wobble: 0.0,
            mission_target: false,
        });
    }

    fn assert_on_screen(state: &GameState) {
        for e in &state.entities {
            assert!(e.pos.x >= e.radius && e.pos.x <= state.width - e.radius, "{:?}", e.pos);
            assert!(e.pos.y >= e.radius && e.pos.y <= state.height - e.radius, "{:?}", e.pos);
        }
    }

    #[test]
    fn test_resize_pulls_targets_inside() {
        let mut state = GameState::new(42, 1600.0, 1200.0);
        push_at(&mut state, EntityKind::Normal, Vec2::new(1590.0, 1190.0));
        push_at(&mut state, EntityKind::Mine, Vec2::new(1200.0, 50.0));
        push_at(&mut state, EntityKind::Fast, Vec2::new(30.0, 900.0));
        push_at(&mut state, EntityKind::Slow, Vec2::new(400.0, 300.0));

        state.resize(800.0, 600.0);

        assert_eq!((state.width, state.height), (800.0, 600.0));
        assert_on_screen(&state);
        assert_eq!(state.entities[0].pos, Vec2::new(765.0, 565.0));
        assert_eq!(state.entities[1].pos, Vec2::new(760.0, 50.0));
        assert_eq!(state.entities[2].pos, Vec2::new(30.0, 575.0));
        // Already inside, untouched
        assert_eq!(state.entities[3].pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_rebuilds_skyline() {
        let mut state = GameState::new(42, 1600.0, 1200.0);
        assert_eq!(state.backdrop.buildings.len(), 25);
        state.resize(800.0, 600.0);
        assert_eq!(
            state.backdrop.buildings.len(),
            (800.0 / BUILDING_WIDTH).ceil() as usize + 5
        );
        assert_eq!(state.backdrop.buildings.len(), 15);
    }

    proptest! {
        #[test]
        fn prop_resize_keeps_targets_on_screen(
            seed in any::<u64>(),
            points in prop::collection::vec((0.0f32..2000.0, 0.0f32..2000.0), 1..20),
            width in 100.0f32..2000.0,
            height in 100.0f32..2000.0,
        ) {
            let mut state = GameState::new(seed, 2000.0, 2000.0);
            for (i, (x, y)) in points.into_iter().enumerate() {
                let kinds = [EntityKind::Normal, EntityKind::Fast, EntityKind::Mine, EntityKind::Slow];
                let kind = kinds[i % kinds.len()];
                push_at(&mut state, kind, Vec2::new(x, y));
            }
            state.resize(width, height);
            for e in &state.entities {
                prop_assert!(e.pos.x >= e.radius && e.pos.x <= width - e.radius);
                prop_assert!(e.pos.y >= e.radius && e.pos.y <= height - e.radius);
            }
            prop_assert_eq!(
                state.backdrop.buildings.len(),
                (width / BUILDING_WIDTH).ceil() as usize + 5
            );
        }
    }
}
