//! Rolling side-objectives
//!
//! One mission is active at a time. Completing it pays out and a new one is
//! drawn immediately.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::EntityKind;

/// Mission types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionKind {
    /// Reach a combo; progress mirrors the live combo
    Streak,
    /// Smash fast targets
    HuntFast,
    /// Smash any non-mine target
    HuntAny,
}

impl MissionKind {
    pub const ALL: [MissionKind; 3] = [MissionKind::Streak, MissionKind::HuntFast, MissionKind::HuntAny];

    pub fn goal(&self) -> u32 {
        match self {
            MissionKind::Streak => 5,
            MissionKind::HuntFast => 3,
            MissionKind::HuntAny => 10,
        }
    }

    /// Whether smashing this kind of target advances the mission
    pub fn targets(&self, kind: EntityKind) -> bool {
        match self {
            MissionKind::Streak => false,
            MissionKind::HuntFast => kind == EntityKind::Fast,
            MissionKind::HuntAny => !kind.is_mine(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub goal: u32,
    pub current: u32,
}

impl Mission {
    pub fn new(kind: MissionKind) -> Self {
        Self {
            kind,
            goal: kind.goal(),
            current: 0,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        let kind = MissionKind::ALL[rng.random_range(0..MissionKind::ALL.len())];
        Self::new(kind)
    }

    pub fn description(&self) -> String {
        match self.kind {
            MissionKind::Streak => format!("GET A {}x COMBO", self.goal),
            MissionKind::HuntFast => format!("SMASH {} FAST TARGETS", self.goal),
            MissionKind::HuntAny => format!("SMASH {} TARGETS", self.goal),
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.current, self.goal)
    }

    /// Record a smash of the given target kind
    pub fn record_smash(&mut self, kind: EntityKind) {
        if self.kind.targets(kind) {
            self.current += 1;
        }
    }

    /// Sync streak progress with the live combo
    pub fn sync_combo(&mut self, combo: u32) {
        if self.kind == MissionKind::Streak {
            self.current = combo;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(Mission::new(MissionKind::Streak).description(), "GET A 5x COMBO");
        assert_eq!(Mission::new(MissionKind::HuntFast).description(), "SMASH 3 FAST TARGETS");
        assert_eq!(Mission::new(MissionKind::HuntAny).description(), "SMASH 10 TARGETS");
    }

    #[test]
    fn test_hunt_fast_ignores_other_kinds() {
        let mut mission = Mission::new(MissionKind::HuntFast);
        mission.record_smash(EntityKind::Normal);
        mission.record_smash(EntityKind::Slow);
        assert_eq!(mission.current, 0);
        mission.record_smash(EntityKind::Fast);
        assert_eq!(mission.progress_label(), "1/3");
    }

    #[test]
    fn test_streak_mirrors_combo() {
        let mut mission = Mission::new(MissionKind::Streak);
        mission.record_smash(EntityKind::Normal);
        assert_eq!(mission.current, 0);
        mission.sync_combo(4);
        assert!(!mission.is_complete());
        mission.sync_combo(5);
        assert!(mission.is_complete());
        mission.sync_combo(0);
        assert_eq!(mission.current, 0);
    }

    #[test]
    fn test_hunt_any_counts_everything_but_mines() {
        let mut mission = Mission::new(MissionKind::HuntAny);
        for kind in [EntityKind::Normal, EntityKind::Fast, EntityKind::Slow, EntityKind::Mine] {
            mission.record_smash(kind);
        }
        assert_eq!(mission.current, 3);
    }
}
