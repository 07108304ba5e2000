//! Comic Bonk - a comic-book whack-a-target arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, hammer, missions, effects)
//! - `renderer`: Canvas 2D drawing
//! - `hud`: View-model for the DOM overlay
//! - `platform`: Browser/native platform abstraction (storage, clock)
//! - `wallet`: Mobile wallet bridge and mint-to-play gate

pub mod audio;
pub mod hammer;
pub mod highscore;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod wallet;

pub use hammer::HammerConfig;
pub use highscore::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, motion constants are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Round length at start (seconds)
    pub const START_TIME: f32 = 30.0;
    /// Score at which difficulty saturates
    pub const DIFFICULTY_SCORE: f32 = 2500.0;

    /// Hammer reach added to a target's radius for a hit
    pub const HAMMER_REACH: f32 = 35.0;
    /// Distance from player to hammer head (trail points)
    pub const HAMMER_HEAD_OFFSET: f32 = 55.0;
    /// Dash length in ticks (150 ms)
    pub const DASH_TICKS: u32 = 9;
    /// Player easing toward the pointer
    pub const PLAYER_EASE: f32 = 0.15;
    pub const PLAYER_DASH_EASE: f32 = 0.6;

    /// Smash rewards
    pub const SMASH_POINTS: u64 = 15;
    pub const SMASH_TIME_BONUS: f32 = 1.2;
    pub const COMBO_STEP: u32 = 5;

    /// Mine penalties
    pub const MINE_TIME_PENALTY: f32 = 5.0;
    pub const MINE_SCORE_PENALTY: u64 = 75;

    /// Power meter
    pub const POWER_MAX: u32 = 100;
    pub const POWER_PER_HIT: u32 = 10;
    pub const MEGA_BONK_MINE_POINTS: u64 = 50;

    /// Mission rewards
    pub const MISSION_POINTS: u64 = 300;
    pub const MISSION_TIME_BONUS: f32 = 5.0;

    /// Hit-stop (frozen ticks) after impacts
    pub const SMASH_HIT_STOP: u32 = 4;
    pub const MINE_HIT_STOP: u32 = 12;

    /// Spawn margin from viewport edges
    pub const SPAWN_MARGIN: f32 = 40.0;
}

/// Difficulty in [0, 1] for a score
#[inline]
pub fn difficulty_for(score: u64) -> f32 {
    (score as f32 / consts::DIFFICULTY_SCORE).min(1.0)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
