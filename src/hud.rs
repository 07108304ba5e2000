//! HUD view-model
//!
//! Everything the DOM overlay shows, captured from the game state once per
//! frame so the front-end only touches elements whose text changed.

use crate::consts::POWER_MAX;
use crate::sim::{GamePhase, GameState};

/// Seconds at which the timer turns red
pub const LOW_TIME_SECONDS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u64,
    pub best: u64,
    /// Whole seconds left, rounded up
    pub display_time: u32,
    pub low_time: bool,
    /// Combo counter, hidden below 2
    pub combo: Option<u32>,
    /// Charge in percent (0..=100)
    pub power_percent: u32,
    pub power_ready: bool,
    pub mission: String,
    pub mission_progress: String,
    pub paused: bool,
    pub game_over: bool,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, best: u64) -> Self {
        let display_time = state.time_left.max(0.0).ceil() as u32;
        Self {
            score: state.score,
            best: best.max(state.score),
            display_time,
            low_time: display_time <= LOW_TIME_SECONDS,
            combo: (state.combo > 1).then_some(state.combo),
            power_percent: state.power * 100 / POWER_MAX,
            power_ready: state.power_ready(),
            mission: state.mission.description(),
            mission_progress: state.mission.progress_label(),
            paused: state.phase == GamePhase::Paused,
            game_over: state.is_over(),
        }
    }

    pub fn combo_label(&self) -> String {
        match self.combo {
            Some(combo) => format!("{}x COMBO!", combo),
            None => String::new(),
        }
    }
}

/// Shorten a base58 public key to `abcd...wxyz`
pub fn short_address(public_key: &str) -> String {
    let chars: Vec<char> = public_key.chars().collect();
    if chars.len() <= 8 {
        return public_key.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
