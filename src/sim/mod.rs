//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (particles and backdrop included)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod backdrop;
pub mod effects;
pub mod mission;
pub mod spawn;
pub mod state;
pub mod tick;

pub use backdrop::{Backdrop, Cloud, ComicPanel, PanelTone};
pub use effects::{Particle, ParticleShape, PopText};
pub use mission::{Mission, MissionKind};
pub use state::{
    Entity, EntityKind, GameEvent, GamePhase, GameState, HammerTrailPoint, Player, Tint,
};
pub use tick::{TickInput, tick};
